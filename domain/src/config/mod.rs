//! Configuration value objects for the domain layer
//!
//! Issues found while validating configuration, shared by the loader
//! and the binary.

pub mod validation;

pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
