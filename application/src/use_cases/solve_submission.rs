//! Solve Submission use case
//!
//! Entry point for one user submission: optional image, optional text.
//! The image takes precedence and is transcribed first; the resulting text
//! goes through the length gate and is then solved.

use crate::config::SolverConfig;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier, SolveStage};
use crate::ports::solve_logger::{NoSolveLogger, SolveLogger};
use crate::use_cases::solve_question::SolveQuestionUseCase;
use crate::use_cases::transcribe_image::{TranscribeError, TranscribeImageUseCase};
use solver_domain::{DomainError, Question, SolveErrorKind, SolveResult};
use std::sync::Arc;
use tracing::{info, warn};

/// An uploaded image file
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Input for the SolveSubmission use case
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Typed question text (may be empty)
    pub text: String,
    /// Uploaded image, preferred over `text` when present
    pub image: Option<ImageUpload>,
}

impl Submission {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }
}

/// Where a submission failed before reaching the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// The image could not be transcribed
    Transcription,
    /// The question text was rejected by the input checks
    Input,
    /// Solving itself failed
    Solve,
}

/// Outcome of one submission
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub result: SolveResult,
    /// Set when the result is a failure
    pub failed_at: Option<FailureStage>,
}

impl SubmissionOutcome {
    fn solved(result: SolveResult) -> Self {
        let failed_at = (!result.is_success()).then_some(FailureStage::Solve);
        Self { result, failed_at }
    }

    fn rejected(stage: FailureStage, kind: SolveErrorKind, message: impl Into<String>) -> Self {
        Self {
            result: SolveResult::failure(kind, message),
            failed_at: Some(stage),
        }
    }
}

/// Use case that runs a whole submission through transcription and solving
pub struct SolveSubmissionUseCase<G: LlmGateway + ?Sized> {
    transcriber: TranscribeImageUseCase<G>,
    solver: SolveQuestionUseCase<G>,
}

impl<G: LlmGateway + ?Sized> SolveSubmissionUseCase<G> {
    pub fn new(gateway: Arc<G>, config: SolverConfig) -> Self {
        Self::with_logger(gateway, config, Arc::new(NoSolveLogger))
    }

    pub fn with_logger(gateway: Arc<G>, config: SolverConfig, logger: Arc<dyn SolveLogger>) -> Self {
        Self {
            transcriber: TranscribeImageUseCase::new(gateway.clone()).with_logger(logger.clone()),
            solver: SolveQuestionUseCase::new(gateway, config).with_logger(logger),
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, submission: Submission) -> SubmissionOutcome {
        self.execute_with_progress(submission, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        submission: Submission,
        progress: &dyn ProgressNotifier,
    ) -> SubmissionOutcome {
        let text = match submission.image {
            Some(image) => {
                progress.on_stage_start(SolveStage::Transcribe);
                match self.transcriber.transcribe(&image.bytes, &image.filename).await {
                    Ok(text) => {
                        progress.on_stage_complete(SolveStage::Transcribe, true);
                        info!("Transcribed question from {}", image.filename);
                        text
                    }
                    Err(e) => {
                        progress.on_stage_complete(SolveStage::Transcribe, false);
                        return Self::transcription_failed(e);
                    }
                }
            }
            None => submission.text,
        };

        let min_length = self.solver.config().min_question_length;
        let question = match Question::parse_with_min_length(&text, min_length) {
            Ok(question) => question,
            Err(e) => {
                warn!("Rejected submission: {}", e);
                return SubmissionOutcome::rejected(
                    FailureStage::Input,
                    SolveErrorKind::EmptyInput,
                    e.to_string(),
                );
            }
        };

        SubmissionOutcome::solved(self.solver.execute_with_progress(&question, progress).await)
    }

    fn transcription_failed(err: TranscribeError) -> SubmissionOutcome {
        let stage = match err {
            TranscribeError::Input(DomainError::UnsupportedFormat(_)) => FailureStage::Input,
            _ => FailureStage::Transcription,
        };
        SubmissionOutcome::rejected(stage, err.kind(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockGateway, VALID_REPLY};

    fn use_case(gateway: &Arc<MockGateway>) -> SolveSubmissionUseCase<MockGateway> {
        SolveSubmissionUseCase::new(gateway.clone(), SolverConfig::default())
    }

    #[tokio::test]
    async fn test_text_submission_is_solved() {
        let gateway = Arc::new(MockGateway::replying(VALID_REPLY));
        let outcome = use_case(&gateway)
            .execute(Submission::text("Find the derivative of f(x) = x^3"))
            .await;

        assert!(outcome.result.is_success());
        assert_eq!(outcome.failed_at, None);
    }

    #[tokio::test]
    async fn test_short_question_rejected_before_any_call() {
        let gateway = Arc::new(MockGateway::replying(VALID_REPLY));
        let outcome = use_case(&gateway).execute(Submission::text("2+2=")).await;

        assert_eq!(outcome.failed_at, Some(FailureStage::Input));
        assert_eq!(outcome.result.error_kind(), Some(SolveErrorKind::EmptyInput));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_submission_rejected() {
        let gateway = Arc::new(MockGateway::replying(VALID_REPLY));
        let outcome = use_case(&gateway).execute(Submission::default()).await;

        assert_eq!(
            outcome.result.error(),
            Some("Please enter a math question or upload an image.")
        );
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_image_takes_precedence_over_text() {
        let gateway = Arc::new(MockGateway::with_replies(vec![
            Ok("Find the derivative of f(x) = x^3".to_string()),
            Ok(VALID_REPLY.to_string()),
        ]));
        let submission = Submission::text("this text is ignored entirely")
            .with_image(ImageUpload::new("q.png", vec![1, 2, 3]));
        let outcome = use_case(&gateway).execute(submission).await;

        assert!(outcome.result.is_success());
        assert_eq!(gateway.calls(), 2);
        let prompts = gateway.prompts();
        assert!(prompts[1].contains("Find the derivative of f(x) = x^3"));
        assert!(!prompts[1].contains("this text is ignored"));
    }

    #[tokio::test]
    async fn test_unsupported_image_rejected_before_any_call() {
        let gateway = Arc::new(MockGateway::replying(VALID_REPLY));
        let submission = Submission::text("Find the derivative of f(x) = x^3")
            .with_image(ImageUpload::new("diagram.gif", vec![1, 2, 3]));
        let outcome = use_case(&gateway).execute(submission).await;

        assert_eq!(outcome.failed_at, Some(FailureStage::Input));
        assert_eq!(
            outcome.result.error_kind(),
            Some(SolveErrorKind::UnsupportedFormat)
        );
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_transcribed_text_goes_through_length_gate() {
        let gateway = Arc::new(MockGateway::replying("x = ?"));
        let submission = Submission::default().with_image(ImageUpload::new("q.jpg", vec![1]));
        let outcome = use_case(&gateway).execute(submission).await;

        assert_eq!(outcome.failed_at, Some(FailureStage::Input));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_solve_failure_stage() {
        let gateway = Arc::new(MockGateway::replying("no json at all"));
        let outcome = use_case(&gateway)
            .execute(Submission::text("Find the derivative of f(x) = x^3"))
            .await;

        assert_eq!(outcome.failed_at, Some(FailureStage::Solve));
        assert_eq!(outcome.result.error_kind(), Some(SolveErrorKind::Extraction));
    }
}
