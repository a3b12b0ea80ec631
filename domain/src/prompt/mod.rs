//! Prompt domain
//!
//! Templates for the solve and transcription calls.

mod template;

pub use template::{PromptTemplate, build_prompt};
