//! Shared mocks for use case tests

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::solve_logger::{SolveEvent, SolveLogger};
use async_trait::async_trait;
use serde_json::Value;
use solver_domain::ImageFormat;
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) const VALID_REPLY: &str = r#"{
  "question": "Find the derivative of f(x) = x^3",
  "solution_steps": ["Step 1: Apply the power rule", "Step 2: Simplify"],
  "final_answer": "f'(x) = 3x^2",
  "difficulty_level": "Easy",
  "topic": "Calculus"
}"#;

/// Gateway that replays queued replies and records every call
pub(crate) struct MockGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    fallback: Result<String, GatewayError>,
    prompts: Mutex<Vec<String>>,
    formats: Mutex<Vec<ImageFormat>>,
}

impl MockGateway {
    pub(crate) fn with_replies(replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            fallback: Err(GatewayError::Other("No more responses".to_string())),
            prompts: Mutex::new(Vec::new()),
            formats: Mutex::new(Vec::new()),
        }
    }

    /// Answer every call with `reply`
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            fallback: Ok(reply.to_string()),
            ..Self::with_replies(Vec::new())
        }
    }

    /// Fail every call with `error`
    pub(crate) fn failing(error: GatewayError) -> Self {
        Self {
            fallback: Err(error),
            ..Self::with_replies(Vec::new())
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub(crate) fn image_formats(&self) -> Vec<ImageFormat> {
        self.formats.lock().unwrap().clone()
    }

    fn next_reply(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn generate_json(&self, prompt: &str) -> Result<String, GatewayError> {
        self.next_reply(prompt)
    }

    async fn generate_from_image(
        &self,
        prompt: &str,
        _image: &[u8],
        format: ImageFormat,
    ) -> Result<String, GatewayError> {
        self.formats.lock().unwrap().push(format);
        self.next_reply(prompt)
    }
}

/// Logger that keeps every event in memory
#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<(&'static str, Value)>>,
}

impl RecordingLogger {
    pub(crate) fn events(&self) -> Vec<(&'static str, Value)> {
        self.events.lock().unwrap().clone()
    }
}

impl SolveLogger for RecordingLogger {
    fn log(&self, event: SolveEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}
