//! Application-level configuration.
//!
//! - [`SolverConfig`]: question gate and response parsing parameters

pub mod solver_config;

pub use solver_config::SolverConfig;
