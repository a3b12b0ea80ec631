//! Gemini API configuration from TOML (`[gemini]` section)

use serde::{Deserialize, Serialize};

/// Raw Gemini configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Direct API key (prefer the environment variable).
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Base URL of the Generative Language REST API.
    pub base_url: String,
    /// Model used to solve questions.
    pub model: String,
    /// Model used to read question images.
    pub vision_model: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            vision_model: "gemini-1.5-flash".to_string(),
            timeout_seconds: 60,
        }
    }
}

impl FileGeminiConfig {
    /// Resolve the API key from the config, then from `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| lookup(&self.api_key_env).filter(|key| !key.trim().is_empty()))
    }
}
