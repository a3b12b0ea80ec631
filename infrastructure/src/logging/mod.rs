//! Logging infrastructure for failed solves.
//!
//! Provides [`JsonlSolveLogger`], a JSONL file writer that implements
//! the [`SolveLogger`](solver_application::SolveLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlSolveLogger;
