//! Solve Question use case
//!
//! Builds the prompt, calls the model and turns its reply into a validated
//! [`MathSolution`]. Every failure becomes a [`SolveResult::Failure`].

use crate::config::SolverConfig;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier, SolveStage};
use crate::ports::solve_logger::{NoSolveLogger, SolveEvent, SolveLogger};
use serde_json::json;
use solver_domain::{
    ExtractionError, MathSolution, ParseError, Question, SchemaError, SolveErrorKind, SolveResult,
    ValidationError, build_prompt, preview, validate,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that can occur while solving one question
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("AI did not provide a valid response.")]
    EmptyResponse,

    #[error("The AI provided an invalid response format. Error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("The AI provided an invalid response format. Error: {0}")]
    Parse(ParseError),

    #[error("The AI provided an invalid response format. Error: {0}")]
    Validation(ValidationError),

    #[error("An error occurred: {0}")]
    Gateway(#[from] GatewayError),
}

impl From<SchemaError> for SolveError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Parse(e) => SolveError::Parse(e),
            SchemaError::Validation(e) => SolveError::Validation(e),
        }
    }
}

impl SolveError {
    /// Machine-readable category of this failure
    pub fn kind(&self) -> SolveErrorKind {
        match self {
            SolveError::EmptyResponse => SolveErrorKind::EmptyResponse,
            SolveError::Extraction(_) => SolveErrorKind::Extraction,
            SolveError::Parse(_) => SolveErrorKind::Parse,
            SolveError::Validation(_) => SolveErrorKind::Validation,
            SolveError::Gateway(e) if e.is_timeout() => SolveErrorKind::Timeout,
            SolveError::Gateway(_) => SolveErrorKind::ExternalService,
        }
    }
}

/// Use case for solving one validated question
pub struct SolveQuestionUseCase<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    config: SolverConfig,
    logger: Arc<dyn SolveLogger>,
}

impl<G: LlmGateway + ?Sized> SolveQuestionUseCase<G> {
    pub fn new(gateway: Arc<G>, config: SolverConfig) -> Self {
        Self {
            gateway,
            config,
            logger: Arc::new(NoSolveLogger),
        }
    }

    /// Record failed solves (with the raw reply) to a structured log
    pub fn with_logger(mut self, logger: Arc<dyn SolveLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, question: &Question) -> SolveResult {
        self.execute_with_progress(question, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> SolveResult {
        info!("Solving question: {}", preview(question.content(), 80));

        let prompt = build_prompt(question.content());
        debug!("Prompt length: {} chars", prompt.len());

        progress.on_stage_start(SolveStage::Generate);
        let raw = match self.gateway.generate_json(&prompt).await {
            Ok(raw) => {
                progress.on_stage_complete(SolveStage::Generate, true);
                raw
            }
            Err(e) => {
                progress.on_stage_complete(SolveStage::Generate, false);
                error!("An error occurred while calling the AI: {}", e);
                return self.failure(question, SolveError::from(e), None);
            }
        };

        progress.on_stage_start(SolveStage::Parse);
        match self.interpret(&raw) {
            Ok(solution) => {
                progress.on_stage_complete(SolveStage::Parse, true);
                info!("Solved with {} steps", solution.solution_steps().len());
                SolveResult::success(solution, raw)
            }
            Err(e) => {
                progress.on_stage_complete(SolveStage::Parse, false);
                warn!("Failed to parse or validate the AI response: {}", e);
                self.failure(question, e, Some(raw))
            }
        }
    }

    /// Turn a raw model reply into a validated solution
    pub fn interpret(&self, raw: &str) -> Result<MathSolution, SolveError> {
        if raw.trim().is_empty() {
            return Err(SolveError::EmptyResponse);
        }

        let json_text = self.config.extractor().extract(raw)?;
        debug!("Extracted JSON candidate: {}", preview(&json_text, 200));

        Ok(validate(&json_text)?)
    }

    fn failure(&self, question: &Question, err: SolveError, raw: Option<String>) -> SolveResult {
        let kind = err.kind();
        let message = err.to_string();

        if let Some(raw) = raw.as_deref() {
            self.logger.log(SolveEvent::new(
                "solve_failed",
                json!({
                    "question": question.content(),
                    "error_kind": kind.as_str(),
                    "message": message,
                    "raw_response": raw,
                }),
            ));
        }

        let result = SolveResult::failure(kind, message);
        match raw {
            Some(raw) => result.with_raw_response(raw),
            None => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockGateway, RecordingLogger, VALID_REPLY};
    use solver_domain::{ExtractionStrategy, RepairPolicy};

    fn question() -> Question {
        Question::parse("Find the derivative of f(x) = x^3").unwrap()
    }

    fn use_case(gateway: &Arc<MockGateway>) -> SolveQuestionUseCase<MockGateway> {
        SolveQuestionUseCase::new(gateway.clone(), SolverConfig::default())
    }

    #[tokio::test]
    async fn test_valid_reply_succeeds() {
        let gateway = Arc::new(MockGateway::replying(VALID_REPLY));
        let result = use_case(&gateway).execute(&question()).await;

        assert!(result.is_success());
        let solution = result.solution().unwrap();
        assert_eq!(solution.final_answer(), "f'(x) = 3x^2");
        assert_eq!(result.raw_response(), Some(VALID_REPLY));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_carries_the_question() {
        let gateway = Arc::new(MockGateway::replying(VALID_REPLY));
        use_case(&gateway).execute(&question()).await;

        let prompts = gateway.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Find the derivative of f(x) = x^3"));
    }

    #[tokio::test]
    async fn test_reply_wrapped_in_prose_and_latex() {
        let reply = r#"Sure! Here it is:
```json
{"question":"q","solution_steps":["Use \sqrt{x}"],"final_answer":"\sqrt{2}"}
```"#;
        let gateway = Arc::new(MockGateway::replying(reply));
        let result = use_case(&gateway).execute(&question()).await;

        let solution = result.solution().unwrap();
        assert_eq!(solution.final_answer(), r"\sqrt{2}");
    }

    #[tokio::test]
    async fn test_empty_reply() {
        let gateway = Arc::new(MockGateway::replying("  \n"));
        let result = use_case(&gateway).execute(&question()).await;

        assert_eq!(result.error_kind(), Some(SolveErrorKind::EmptyResponse));
        assert_eq!(result.error(), Some("AI did not provide a valid response."));
        assert_eq!(result.raw_response(), Some("  \n"));
    }

    #[tokio::test]
    async fn test_reply_without_json() {
        let gateway = Arc::new(MockGateway::replying("I cannot solve this."));
        let result = use_case(&gateway).execute(&question()).await;

        assert_eq!(result.error_kind(), Some(SolveErrorKind::Extraction));
        assert_eq!(result.raw_response(), Some("I cannot solve this."));
    }

    #[tokio::test]
    async fn test_reply_with_missing_fields() {
        let gateway = Arc::new(MockGateway::replying(r#"{"question":"q"}"#));
        let result = use_case(&gateway).execute(&question()).await;

        assert_eq!(result.error_kind(), Some(SolveErrorKind::Validation));
        let error = result.error().unwrap();
        assert!(error.contains("solution_steps: field required"));
        assert!(error.contains("final_answer: field required"));
    }

    #[tokio::test]
    async fn test_malformed_json_without_repair() {
        let gateway = Arc::new(MockGateway::replying(r#"{"question": q}"#));
        let config = SolverConfig::default()
            .with_extraction(ExtractionStrategy::Span)
            .with_repair(RepairPolicy::Never);
        let result = SolveQuestionUseCase::new(gateway, config)
            .execute(&question())
            .await;

        assert_eq!(result.error_kind(), Some(SolveErrorKind::Parse));
    }

    #[tokio::test]
    async fn test_gateway_failure_has_no_raw_response() {
        let gateway = Arc::new(MockGateway::failing(GatewayError::RequestFailed(
            "HTTP 500".to_string(),
        )));
        let result = use_case(&gateway).execute(&question()).await;

        assert_eq!(result.error_kind(), Some(SolveErrorKind::ExternalService));
        assert_eq!(result.raw_response(), None);
        assert!(result.error().unwrap().starts_with("An error occurred: "));
    }

    #[tokio::test]
    async fn test_timeout_kind_preserved() {
        let gateway = Arc::new(MockGateway::failing(GatewayError::Timeout(60)));
        let result = use_case(&gateway).execute(&question()).await;

        assert_eq!(result.error_kind(), Some(SolveErrorKind::Timeout));
    }

    #[tokio::test]
    async fn test_failures_with_raw_reply_are_logged() {
        let gateway = Arc::new(MockGateway::replying("no json"));
        let logger = Arc::new(RecordingLogger::default());
        let result = use_case(&gateway)
            .with_logger(logger.clone())
            .execute(&question())
            .await;
        assert!(!result.is_success());

        let events = logger.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "solve_failed");
        assert_eq!(events[0].1["error_kind"], "extraction");
        assert_eq!(events[0].1["raw_response"], "no json");
    }

    #[tokio::test]
    async fn test_gateway_failures_are_not_logged() {
        let gateway = Arc::new(MockGateway::failing(GatewayError::Timeout(5)));
        let logger = Arc::new(RecordingLogger::default());
        use_case(&gateway)
            .with_logger(logger.clone())
            .execute(&question())
            .await;

        assert!(logger.events().is_empty());
    }
}
