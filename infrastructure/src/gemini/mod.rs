//! Gemini adapter
//!
//! Implements the [`LlmGateway`](solver_application::LlmGateway) port over the
//! Generative Language REST API. Uploaded images are decoded locally before
//! they are sent inline as base64.

mod gateway;
mod upload;
mod types;

pub use gateway::{GeminiGateway, GeminiSettings};
