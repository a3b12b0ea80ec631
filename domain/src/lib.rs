//! Domain layer for math-solver
//!
//! This crate contains the solution schema and the pure logic that turns a
//! free-form model reply into a validated [`MathSolution`]. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Pipeline
//!
//! ```text
//! question ─▶ build_prompt ─▶ (model) ─▶ extract_json ─▶ validate ─▶ MathSolution
//! ```
//!
//! - [`prompt`]: solve and transcription prompts
//! - [`parsing`]: JSON extraction, repair and schema validation
//! - [`solution`]: [`MathSolution`] and the [`SolveResult`] outcome

pub mod config;
pub mod core;
pub mod parsing;
pub mod prompt;
pub mod solution;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    error::DomainError,
    image_format::ImageFormat,
    question::{MIN_QUESTION_LENGTH, Question},
    string::preview,
};
pub use parsing::{
    ExtractionError, ExtractionStrategy, FieldViolation, ParseError, RepairPolicy,
    ResponseExtractor, SchemaError, ValidationError, extract_json, validate,
};
pub use prompt::{PromptTemplate, build_prompt};
pub use solution::{Difficulty, MathSolution, SolveErrorKind, SolveResult, Topic};
