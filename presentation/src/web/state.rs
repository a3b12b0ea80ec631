//! Shared state for the web handlers

use solver_application::{LlmGateway, SolveLogger, SolveSubmissionUseCase, SolverConfig};
use std::sync::Arc;

/// Read-only state built once at startup and cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub(crate) submissions: Arc<SolveSubmissionUseCase<dyn LlmGateway>>,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        config: SolverConfig,
        logger: Arc<dyn SolveLogger>,
    ) -> Self {
        Self {
            submissions: Arc::new(SolveSubmissionUseCase::with_logger(gateway, config, logger)),
        }
    }
}
