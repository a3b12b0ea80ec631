//! Use cases (application services)

pub mod solve_question;
pub mod solve_submission;
pub mod transcribe_image;

#[cfg(test)]
pub(crate) mod test_support;

pub use solve_question::{SolveError, SolveQuestionUseCase};
pub use solve_submission::{
    FailureStage, ImageUpload, SolveSubmissionUseCase, Submission, SubmissionOutcome,
};
pub use transcribe_image::{TranscribeError, TranscribeImageUseCase};
