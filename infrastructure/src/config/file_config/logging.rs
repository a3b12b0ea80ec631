//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving failed solves with their raw responses
    pub failure_log: Option<PathBuf>,
    /// Plain-text copy of the tracing output
    pub file: Option<PathBuf>,
}
