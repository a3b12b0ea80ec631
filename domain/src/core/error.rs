//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while validating user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Please enter a math question or upload an image.")]
    EmptyInput,

    #[error("Please enter a complete math question (at least {min} characters, got {actual}).")]
    QuestionTooShort { min: usize, actual: usize },

    #[error("Invalid file type '{0}'. Only PNG, JPG, and JPEG are allowed.")]
    UnsupportedFormat(String),
}

impl DomainError {
    /// Check if this error was caused by missing or insufficient question text
    pub fn is_empty_input(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyInput | DomainError::QuestionTooShort { .. }
        )
    }
}
