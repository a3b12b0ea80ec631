//! Port for structured failure diagnostics.
//!
//! Defines the [`SolveLogger`] trait for recording failed solves together
//! with the raw model response, so malformed replies can be inspected later.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full raw
//! payloads in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured solve event for logging.
pub struct SolveEvent {
    /// Event type identifier (e.g., "solve_failed", "transcription_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl SolveEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging solve events to a structured log.
///
/// `log` is synchronous and non-fallible; logging failures are ignored so
/// they never change the outcome of a request.
pub trait SolveLogger: Send + Sync {
    /// Record a solve event.
    fn log(&self, event: SolveEvent);
}

/// No-op implementation for tests and when the failure log is disabled.
pub struct NoSolveLogger;

impl SolveLogger for NoSolveLogger {
    fn log(&self, _event: SolveEvent) {}
}
