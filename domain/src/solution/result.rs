//! Outcome of one solve request

use super::entities::MathSolution;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Which pipeline stage a failed solve stopped at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveErrorKind {
    /// No question text and no image, or question text too short
    EmptyInput,
    /// Uploaded file extension not recognized
    UnsupportedFormat,
    /// Image transcription returned no usable text
    Transcription,
    /// No JSON object found in the model response
    Extraction,
    /// Candidate JSON text is not valid JSON
    Parse,
    /// JSON does not satisfy the solution schema
    Validation,
    /// The model replied with no text at all
    EmptyResponse,
    /// Network, HTTP status or authentication failure talking to the model
    ExternalService,
    /// The model did not answer within the configured timeout
    Timeout,
}

impl SolveErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolveErrorKind::EmptyInput => "empty_input",
            SolveErrorKind::UnsupportedFormat => "unsupported_format",
            SolveErrorKind::Transcription => "transcription",
            SolveErrorKind::Extraction => "extraction",
            SolveErrorKind::Parse => "parse",
            SolveErrorKind::Validation => "validation",
            SolveErrorKind::EmptyResponse => "empty_response",
            SolveErrorKind::ExternalService => "external_service",
            SolveErrorKind::Timeout => "timeout",
        }
    }

    /// Errors caused by the request itself rather than by the model or the network
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SolveErrorKind::EmptyInput | SolveErrorKind::UnsupportedFormat
        )
    }
}

impl fmt::Display for SolveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of solving one question. This is the only value handed to presentation.
///
/// Serializes as `{"success": true, "solution": .., "raw_response": ..}` or
/// `{"success": false, "error": .., "error_kind": .., "raw_response": ..|null}`.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveResult {
    Success {
        solution: MathSolution,
        raw_response: String,
    },
    Failure {
        kind: SolveErrorKind,
        error: String,
        raw_response: Option<String>,
    },
}

impl SolveResult {
    pub fn success(solution: MathSolution, raw_response: impl Into<String>) -> Self {
        SolveResult::Success {
            solution,
            raw_response: raw_response.into(),
        }
    }

    pub fn failure(kind: SolveErrorKind, error: impl Into<String>) -> Self {
        SolveResult::Failure {
            kind,
            error: error.into(),
            raw_response: None,
        }
    }

    /// Attach the raw model response to a failure (no-op on success)
    pub fn with_raw_response(mut self, raw: impl Into<String>) -> Self {
        if let SolveResult::Failure { raw_response, .. } = &mut self {
            *raw_response = Some(raw.into());
        }
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SolveResult::Success { .. })
    }

    pub fn solution(&self) -> Option<&MathSolution> {
        match self {
            SolveResult::Success { solution, .. } => Some(solution),
            SolveResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SolveResult::Success { .. } => None,
            SolveResult::Failure { error, .. } => Some(error),
        }
    }

    pub fn error_kind(&self) -> Option<SolveErrorKind> {
        match self {
            SolveResult::Success { .. } => None,
            SolveResult::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn raw_response(&self) -> Option<&str> {
        match self {
            SolveResult::Success { raw_response, .. } => Some(raw_response),
            SolveResult::Failure { raw_response, .. } => raw_response.as_deref(),
        }
    }
}

impl Serialize for SolveResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SolveResult::Success {
                solution,
                raw_response,
            } => {
                let mut state = serializer.serialize_struct("SolveResult", 3)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("solution", solution)?;
                state.serialize_field("raw_response", raw_response)?;
                state.end()
            }
            SolveResult::Failure {
                kind,
                error,
                raw_response,
            } => {
                let mut state = serializer.serialize_struct("SolveResult", 4)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.serialize_field("error_kind", kind.as_str())?;
                state.serialize_field("raw_response", raw_response)?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::schema::validate;

    #[test]
    fn test_success_serialization() {
        let raw = r#"{"question":"2+2","solution_steps":["add"],"final_answer":"4"}"#;
        let result = SolveResult::success(validate(raw).unwrap(), raw);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["solution"]["final_answer"], "4");
        assert_eq!(json["raw_response"], raw);
    }

    #[test]
    fn test_failure_serialization_without_raw() {
        let result = SolveResult::failure(SolveErrorKind::Timeout, "timed out");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "timed out");
        assert_eq!(json["error_kind"], "timeout");
        assert!(json["raw_response"].is_null());
    }

    #[test]
    fn test_with_raw_response_only_affects_failure() {
        let failure = SolveResult::failure(SolveErrorKind::Parse, "bad").with_raw_response("{");
        assert_eq!(failure.raw_response(), Some("{"));
        assert_eq!(failure.error_kind(), Some(SolveErrorKind::Parse));
        assert!(failure.solution().is_none());
    }

    #[test]
    fn test_client_error_kinds() {
        assert!(SolveErrorKind::EmptyInput.is_client_error());
        assert!(SolveErrorKind::UnsupportedFormat.is_client_error());
        assert!(!SolveErrorKind::Validation.is_client_error());
        assert!(!SolveErrorKind::Timeout.is_client_error());
    }
}
