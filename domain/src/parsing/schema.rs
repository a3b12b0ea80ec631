//! Schema validation for solution payloads.
//!
//! Expected schema:
//! ```json
//! {
//!   "question": "string (non-empty)",
//!   "solution_steps": ["string", "..."],
//!   "final_answer": "string (non-empty)",
//!   "difficulty_level": "string (optional)",
//!   "topic": "string (optional)"
//! }
//! ```
//!
//! Violations are accumulated in field order, so a response missing three
//! fields reports all three at once.

use crate::solution::MathSolution;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Syntax error reported by the JSON parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid JSON at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// One schema violation on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name, `solution_steps[i]` for a step element, `$` for the root
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Every schema violation found in one payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("response validation failed: {}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Names of the offending fields, in report order
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by [`validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Parse `json_text` and validate it against the solution schema
pub fn validate(json_text: &str) -> Result<MathSolution, SchemaError> {
    let value: Value = serde_json::from_str(json_text).map_err(ParseError::from)?;
    Ok(validate_value(&value)?)
}

/// Validate an already-parsed JSON value against the solution schema
pub fn validate_value(value: &Value) -> Result<MathSolution, ValidationError> {
    let Some(object) = value.as_object() else {
        return Err(ValidationError {
            violations: vec![FieldViolation::new(
                "$",
                format!("expected a JSON object, got {}", type_name(value)),
            )],
        });
    };

    let mut violations = Vec::new();

    let question = required_text(object, "question", &mut violations);
    let solution_steps = required_steps(object, &mut violations);
    let final_answer = required_text(object, "final_answer", &mut violations);
    let difficulty_level = optional_text(object, "difficulty_level", &mut violations);
    let topic = optional_text(object, "topic", &mut violations);

    match (question, solution_steps, final_answer) {
        (Some(question), Some(solution_steps), Some(final_answer)) if violations.is_empty() => {
            Ok(MathSolution::new(
                question,
                solution_steps,
                final_answer,
                difficulty_level,
                topic,
            ))
        }
        _ => Err(ValidationError { violations }),
    }
}

fn required_text(
    object: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::new(field, "field required"));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            violations.push(FieldViolation::new(field, "must not be empty"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            violations.push(FieldViolation::new(
                field,
                format!("expected a string, got {}", type_name(other)),
            ));
            None
        }
    }
}

fn required_steps(
    object: &Map<String, Value>,
    violations: &mut Vec<FieldViolation>,
) -> Option<Vec<String>> {
    const FIELD: &str = "solution_steps";

    let items = match object.get(FIELD) {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::new(FIELD, "field required"));
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            violations.push(FieldViolation::new(
                FIELD,
                format!("expected an array of strings, got {}", type_name(other)),
            ));
            return None;
        }
    };

    if items.is_empty() {
        violations.push(FieldViolation::new(FIELD, "must contain at least one step"));
        return None;
    }

    let mut steps = Vec::with_capacity(items.len());
    let before = violations.len();
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::String(s) => steps.push(s.clone()),
            other => violations.push(FieldViolation::new(
                format!("{}[{}]", FIELD, index),
                format!("expected a string, got {}", type_name(other)),
            )),
        }
    }

    (violations.len() == before).then_some(steps)
}

fn optional_text(
    object: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            violations.push(FieldViolation::new(
                field,
                format!("expected a string, got {}", type_name(other)),
            ));
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
