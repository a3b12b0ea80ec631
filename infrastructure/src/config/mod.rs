//! Configuration file loading for math-solver
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Well-known environment variables: `GEMINI_API_KEY`, `PORT`, `DEBUG`
//! 2. `MATH_SOLVER_*` environment variables (`__` separates sections)
//! 3. `--config <path>` specified file
//! 4. Project root: `./math-solver.toml`
//! 5. XDG config: `$XDG_CONFIG_HOME/math-solver/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGeminiConfig, FileLoggingConfig, FileServerConfig, FileSolverConfig,
};
pub use loader::ConfigLoader;
