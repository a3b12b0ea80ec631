//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Minimum number of characters a question must have before it is sent to the model
pub const MIN_QUESTION_LENGTH: usize = 10;

/// A math question that passed the request-level length gate (Value Object)
///
/// The content is stored trimmed. Length is counted in characters, not bytes,
/// so questions written with Unicode math symbols are not penalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Parse raw user input into a question using the default length gate
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Self::parse_with_min_length(raw, MIN_QUESTION_LENGTH)
    }

    /// Parse raw user input, rejecting empty text and text shorter than `min_length`
    pub fn parse_with_min_length(raw: &str, min_length: usize) -> Result<Self, DomainError> {
        let content = raw.trim();
        if content.is_empty() {
            return Err(DomainError::EmptyInput);
        }

        let actual = content.chars().count();
        if actual < min_length {
            return Err(DomainError::QuestionTooShort {
                min: min_length,
                actual,
            });
        }

        Ok(Self {
            content: content.to_string(),
        })
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::parse("  Solve x^2 - 4 = 0  ").unwrap();
        assert_eq!(q.content(), "Solve x^2 - 4 = 0");
    }

    #[test]
    fn test_short_question_rejected() {
        let err = Question::parse("2+2=").unwrap_err();
        assert_eq!(err, DomainError::QuestionTooShort { min: 10, actual: 4 });
    }

    #[test]
    fn test_empty_question_rejected() {
        assert_eq!(Question::parse("").unwrap_err(), DomainError::EmptyInput);
        assert_eq!(Question::parse("   \n").unwrap_err(), DomainError::EmptyInput);
    }

    #[test]
    fn test_length_counts_chars() {
        // 10 characters, 20+ bytes
        assert!(Question::parse("∫∫∫∫∫∫∫∫∫∫").is_ok());
    }

    #[test]
    fn test_custom_min_length() {
        assert!(Question::parse_with_min_length("x=1", 3).is_ok());
        assert!(Question::parse_with_min_length("x=1", 4).is_err());
    }
}
