//! Solve pipeline configuration from TOML (`[solver]` section)

use serde::{Deserialize, Serialize};
use solver_application::SolverConfig;
use solver_domain::{
    ConfigIssue, ConfigIssueCode, ExtractionStrategy, MIN_QUESTION_LENGTH, RepairPolicy,
};
use std::str::FromStr;

/// Raw solver configuration from TOML
///
/// Enum-like fields stay strings here so an unknown value becomes a
/// warning instead of a load failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSolverConfig {
    pub min_question_length: usize,
    /// "balanced" or "span"
    pub extraction: String,
    /// "always", "on_parse_failure" or "never"
    pub backslash_repair: String,
}

impl Default for FileSolverConfig {
    fn default() -> Self {
        Self {
            min_question_length: MIN_QUESTION_LENGTH,
            extraction: ExtractionStrategy::default().to_string(),
            backslash_repair: RepairPolicy::default().to_string(),
        }
    }
}

impl FileSolverConfig {
    pub fn parse_extraction(&self) -> (ExtractionStrategy, Vec<ConfigIssue>) {
        parse_enum("solver.extraction", &self.extraction, &["balanced", "span"])
    }

    pub fn parse_backslash_repair(&self) -> (RepairPolicy, Vec<ConfigIssue>) {
        parse_enum(
            "solver.backslash_repair",
            &self.backslash_repair,
            &["always", "on_parse_failure", "never"],
        )
    }

    /// Convert to the application config, collecting issues on the way
    pub fn to_solver_config(&self) -> (SolverConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let min_length = if self.min_question_length == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidValue {
                    field: "solver.min_question_length".to_string(),
                },
                format!(
                    "solver.min_question_length: 0 would accept any text, using {}",
                    MIN_QUESTION_LENGTH
                ),
            ));
            MIN_QUESTION_LENGTH
        } else {
            self.min_question_length
        };

        let (extraction, extraction_issues) = self.parse_extraction();
        let (repair, repair_issues) = self.parse_backslash_repair();
        issues.extend(extraction_issues);
        issues.extend(repair_issues);

        let config = SolverConfig::default()
            .with_min_question_length(min_length)
            .with_extraction(extraction)
            .with_repair(repair);
        (config, issues)
    }
}

fn parse_enum<T: FromStr + Default + std::fmt::Display>(
    field: &str,
    value: &str,
    valid: &[&str],
) -> (T, Vec<ConfigIssue>) {
    match value.parse::<T>() {
        Ok(parsed) => (parsed, Vec::new()),
        Err(_) => {
            let fallback = T::default();
            let issue = ConfigIssue::warning(
                ConfigIssueCode::InvalidEnumValue {
                    field: field.to_string(),
                    value: value.to_string(),
                    valid_values: valid.iter().map(|v| v.to_string()).collect(),
                },
                format!(
                    "{}: unknown value '{}', falling back to '{}'",
                    field, value, fallback
                ),
            );
            (fallback, vec![issue])
        }
    }
}
