//! Application layer for math-solver
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SolverConfig;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier, SolveStage},
    solve_logger::{NoSolveLogger, SolveEvent, SolveLogger},
};
pub use use_cases::solve_question::{SolveError, SolveQuestionUseCase};
pub use use_cases::solve_submission::{
    FailureStage, ImageUpload, SolveSubmissionUseCase, Submission, SubmissionOutcome,
};
pub use use_cases::transcribe_image::{TranscribeError, TranscribeImageUseCase};
