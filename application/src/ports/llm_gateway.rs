//! LLM Gateway port
//!
//! Defines the interface for communicating with the generative model service.

use async_trait::async_trait;
use solver_domain::ImageFormat;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Check if this error represents a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Timeout(_))
    }
}

/// Gateway for generative model calls
///
/// This port defines how the application layer talks to the external model.
/// Implementations (adapters) live in the infrastructure layer. Both calls
/// return the model's text verbatim; an empty string is a valid reply and is
/// handled by the caller.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a text prompt and ask for a JSON-typed response
    async fn generate_json(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Send a prompt together with an image and get free text back
    async fn generate_from_image(
        &self,
        prompt: &str,
        image: &[u8],
        format: ImageFormat,
    ) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_check() {
        assert!(GatewayError::Timeout(30).is_timeout());
        assert!(!GatewayError::Auth("bad key".to_string()).is_timeout());
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(GatewayError::Timeout(60).to_string(), "Timeout after 60 seconds");
    }
}
