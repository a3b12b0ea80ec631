//! JSON extraction from free-form model responses.
//!
//! The model is asked for a bare JSON object but often wraps it in prose or
//! markdown fences. Two strategies locate the candidate object:
//!
//! | Strategy | Candidate |
//! |----------|-----------|
//! | [`ExtractionStrategy::Balanced`] | first complete top-level `{..}` that parses, found by a depth/string-aware scan |
//! | [`ExtractionStrategy::Span`] | first `{` through last `}` |
//!
//! `Balanced` falls back to `Span` when no object ever closes.

use super::repair::RepairPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while isolating the JSON payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no JSON object found")]
    NoJsonObject,
}

/// How the candidate JSON object is located in the raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    /// Depth-aware scan for complete top-level objects
    #[default]
    Balanced,
    /// Naive slice from the first `{` to the last `}`
    Span,
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStrategy::Balanced => write!(f, "balanced"),
            ExtractionStrategy::Span => write!(f, "span"),
        }
    }
}

impl std::str::FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "balanced" | "scan" => Ok(ExtractionStrategy::Balanced),
            "span" | "naive" => Ok(ExtractionStrategy::Span),
            _ => Err(format!("Invalid ExtractionStrategy: {}", s)),
        }
    }
}

/// Locates and repairs the JSON object inside a raw model response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResponseExtractor {
    pub strategy: ExtractionStrategy,
    pub repair: RepairPolicy,
}

impl ResponseExtractor {
    pub fn new(strategy: ExtractionStrategy, repair: RepairPolicy) -> Self {
        Self { strategy, repair }
    }

    /// Extract the candidate JSON text from `raw_text` and apply the repair policy
    pub fn extract(&self, raw_text: &str) -> Result<String, ExtractionError> {
        match self.strategy {
            ExtractionStrategy::Span => {
                let candidate = span_candidate(raw_text).ok_or(ExtractionError::NoJsonObject)?;
                Ok(self.repair.apply(candidate))
            }
            ExtractionStrategy::Balanced => {
                let candidates = top_level_objects(raw_text);
                if candidates.is_empty() {
                    let candidate =
                        span_candidate(raw_text).ok_or(ExtractionError::NoJsonObject)?;
                    return Ok(self.repair.apply(candidate));
                }

                let mut repaired: Vec<String> =
                    candidates.iter().map(|c| self.repair.apply(c)).collect();
                let chosen = repaired
                    .iter()
                    .position(|c| is_json_object(c))
                    .unwrap_or(0);
                Ok(repaired.swap_remove(chosen))
            }
        }
    }
}

/// Extract the JSON object from a raw model response.
///
/// Uses the balanced scan and always runs the backslash repair pass.
/// Fails with [`ExtractionError::NoJsonObject`] when the text has no `{` or no `}`.
pub fn extract_json(raw_text: &str) -> Result<String, ExtractionError> {
    ResponseExtractor::new(ExtractionStrategy::Balanced, RepairPolicy::Always).extract(raw_text)
}

/// First `{` through last `}` inclusive, if both exist in that order.
pub fn span_candidate(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// All complete top-level `{..}` objects in `text`, in order of appearance.
///
/// Each scan starts at a `{` and tracks nesting depth plus string-literal and
/// escape state, so braces inside strings do not count. A `{` that never
/// closes is skipped and scanning resumes at the next `{` after it.
pub fn top_level_objects(text: &str) -> Vec<&str> {
    let mut objects = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('{') {
        let start = pos + offset;
        match balanced_len(&text[start..]) {
            Some(len) => {
                objects.push(&text[start..start + len]);
                pos = start + len;
            }
            None => pos = start + 1,
        }
    }

    objects
}

/// Byte length of the balanced object starting at `text[0] == '{'`.
fn balanced_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

fn is_json_object(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok_and(|v| v.is_object())
}
