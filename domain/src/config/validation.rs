//! Configuration issues reported at startup.
//!
//! Loaders collect every problem they find instead of failing on the first
//! one; callers decide what to do based on [`Severity`].

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the solver cannot run with this configuration.
    Error,
    /// Non-fatal: a default is used instead.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// No Gemini API key in the config file or environment.
    MissingApiKey,
    /// A numeric setting is outside its valid range.
    InvalidValue { field: String },
    /// A string setting is not one of the accepted values.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        assert!(ConfigIssue::error(ConfigIssueCode::MissingApiKey, "no key").is_error());
        let warning = ConfigIssue::warning(
            ConfigIssueCode::InvalidValue {
                field: "solver.min_question_length".to_string(),
            },
            "zero",
        );
        assert!(!warning.is_error());
        assert_eq!(warning.severity, Severity::Warning);
    }
}
