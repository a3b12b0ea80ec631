//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types by
//! the binary after validation.

mod gemini;
mod logging;
mod server;
mod solver;

pub use gemini::FileGeminiConfig;
pub use logging::FileLoggingConfig;
pub use server::FileServerConfig;
pub use solver::FileSolverConfig;

use serde::{Deserialize, Serialize};
use solver_domain::{ConfigIssue, ConfigIssueCode};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Gemini API settings
    pub gemini: FileGeminiConfig,
    /// Web server settings
    pub server: FileServerConfig,
    /// Solve pipeline settings
    pub solver: FileSolverConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. API key presence (config or environment)
    /// 2. Non-zero request timeout
    /// 3. Solver enum values and the minimum question length
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.validate_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn validate_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. API key
        if self.gemini.resolve_api_key_with(lookup).is_none() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingApiKey,
                format!(
                    "{} not found in environment variables",
                    self.gemini.api_key_env
                ),
            ));
        }

        // 2. Timeout
        if self.gemini.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "gemini.timeout_seconds".to_string(),
                },
                "gemini.timeout_seconds cannot be 0",
            ));
        }

        // 3. Solver settings
        issues.extend(self.solver.to_solver_config().1);

        issues
    }
}
