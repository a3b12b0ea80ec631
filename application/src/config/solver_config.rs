//! Solver parameters for the solve pipeline.
//!
//! [`SolverConfig`] groups the static parameters that control how a
//! question is gated and how model replies are parsed. It is built once at
//! startup and shared read-only across requests.

use serde::{Deserialize, Serialize};
use solver_domain::{ExtractionStrategy, MIN_QUESTION_LENGTH, RepairPolicy, ResponseExtractor};

/// Solve pipeline parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Minimum characters a question must have before it is sent to the model.
    pub min_question_length: usize,
    /// How the JSON object is located in the raw reply.
    pub extraction: ExtractionStrategy,
    /// When the backslash repair pass runs.
    pub repair: RepairPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_question_length: MIN_QUESTION_LENGTH,
            extraction: ExtractionStrategy::default(),
            repair: RepairPolicy::default(),
        }
    }
}

impl SolverConfig {
    // ==================== Builder Methods ====================

    pub fn with_min_question_length(mut self, min: usize) -> Self {
        self.min_question_length = min;
        self
    }

    pub fn with_extraction(mut self, strategy: ExtractionStrategy) -> Self {
        self.extraction = strategy;
        self
    }

    pub fn with_repair(mut self, policy: RepairPolicy) -> Self {
        self.repair = policy;
        self
    }

    /// Extractor configured with this strategy and repair policy
    pub fn extractor(&self) -> ResponseExtractor {
        ResponseExtractor::new(self.extraction, self.repair)
    }
}
