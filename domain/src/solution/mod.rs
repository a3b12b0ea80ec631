//! Solution domain
//!
//! The validated [`MathSolution`] and the [`SolveResult`] outcome that
//! presentation renders.

pub mod entities;
pub mod result;

pub use entities::{Difficulty, MathSolution, Topic};
pub use result::{SolveErrorKind, SolveResult};
