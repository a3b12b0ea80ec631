//! Transcribe Image use case
//!
//! Extracts the question text from an uploaded image with the multimodal model.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::solve_logger::{NoSolveLogger, SolveEvent, SolveLogger};
use serde_json::json;
use solver_domain::{DomainError, ImageFormat, PromptTemplate, SolveErrorKind};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors that can occur during transcription
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscribeError {
    #[error(transparent)]
    Input(#[from] DomainError),

    #[error("could not extract any text from the image")]
    NoText,

    #[error("An error occurred during image processing: {0}")]
    Gateway(#[from] GatewayError),
}

impl TranscribeError {
    pub fn kind(&self) -> SolveErrorKind {
        match self {
            TranscribeError::Input(e) if e.is_empty_input() => SolveErrorKind::EmptyInput,
            TranscribeError::Input(_) => SolveErrorKind::UnsupportedFormat,
            TranscribeError::NoText => SolveErrorKind::Transcription,
            TranscribeError::Gateway(GatewayError::Timeout(_)) => SolveErrorKind::Timeout,
            TranscribeError::Gateway(GatewayError::InvalidImage(_)) => {
                SolveErrorKind::ExternalService
            }
            TranscribeError::Gateway(_) => SolveErrorKind::Transcription,
        }
    }
}

/// Use case for turning an image upload into question text
pub struct TranscribeImageUseCase<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    logger: Arc<dyn SolveLogger>,
}

impl<G: LlmGateway + ?Sized> TranscribeImageUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            logger: Arc::new(NoSolveLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn SolveLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Extract the question text from `image`.
    ///
    /// The format is checked from `filename` before any external call.
    /// The returned text is trimmed and never empty.
    pub async fn transcribe(&self, image: &[u8], filename: &str) -> Result<String, TranscribeError> {
        let format = ImageFormat::from_filename(filename)?;
        if image.is_empty() {
            return Err(DomainError::EmptyInput.into());
        }

        info!("Transcribing {} ({}, {} bytes)", filename, format, image.len());

        let result = match self
            .gateway
            .generate_from_image(PromptTemplate::transcription_prompt(), image, format)
            .await
        {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    Err(TranscribeError::NoText)
                } else {
                    Ok(text.to_string())
                }
            }
            Err(e) => Err(TranscribeError::Gateway(e)),
        };

        if let Err(e) = &result {
            error!("Transcription of {} failed: {}", filename, e);
            self.logger.log(SolveEvent::new(
                "transcription_failed",
                json!({
                    "filename": filename,
                    "message": e.to_string(),
                }),
            ));
        }

        result
    }
}
