//! Presentation layer for math-solver
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters and the web front end.

pub mod cli;
pub mod output;
pub mod progress;
pub mod web;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
pub use web::{AppState, router, serve};
