//! Infrastructure layer for math-solver
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileGeminiConfig, FileLoggingConfig, FileServerConfig,
    FileSolverConfig,
};
pub use gemini::{GeminiGateway, GeminiSettings};
pub use logging::JsonlSolveLogger;
