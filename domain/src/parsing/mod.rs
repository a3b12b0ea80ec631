//! Response parsing pipeline.
//!
//! Raw model text flows through three pure steps:
//!
//! 1. [`extract`]: isolate the candidate JSON object
//! 2. [`repair`]: fix bare backslashes, raw control characters, trailing commas
//! 3. [`schema`]: parse and validate into a [`MathSolution`](crate::MathSolution)

pub mod extract;
pub mod repair;
pub mod schema;

pub use extract::{ExtractionError, ExtractionStrategy, ResponseExtractor, extract_json};
pub use repair::{RepairPolicy, repair_json};
pub use schema::{FieldViolation, ParseError, SchemaError, ValidationError, validate};
