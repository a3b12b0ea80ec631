//! Progress notification port
//!
//! Defines the interface for reporting progress while a question is solved.

use std::fmt;

/// Stages of one solve request, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStage {
    /// Extracting question text from an uploaded image
    Transcribe,
    /// Waiting for the model to answer
    Generate,
    /// Extracting and validating the JSON solution
    Parse,
}

impl SolveStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolveStage::Transcribe => "transcribe",
            SolveStage::Generate => "generate",
            SolveStage::Parse => "parse",
        }
    }
}

impl fmt::Display for SolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates during a solve
///
/// Implementations live in the presentation layer (console spinner) or are
/// no-ops (web handlers).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: SolveStage);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: SolveStage, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: SolveStage) {}
    fn on_stage_complete(&self, _stage: SolveStage, _success: bool) {}
}
