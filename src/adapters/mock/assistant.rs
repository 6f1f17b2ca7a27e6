//! Scripted assistant for testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::AssistantError;
use crate::models::Message;
use crate::traits::AssistantClient;

/// A recorded completion request.
#[derive(Debug, Clone)]
pub struct RecordedCompletion {
    pub system: String,
    pub history: Vec<Message>,
}

/// Assistant that replies from a queue.
///
/// Replies are consumed in order; once the queue is empty every request gets
/// the default reply.
///
/// # Example
///
/// ```ignore
/// let assistant = MockAssistant::new();
/// assistant.push_reply("Try <command>ls -la</command>");
/// assistant.push_error(AssistantError::EmptyResponse);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockAssistant {
    replies: Arc<Mutex<VecDeque<Result<String, AssistantError>>>>,
    requests: Arc<Mutex<Vec<RecordedCompletion>>>,
}

impl MockAssistant {
    pub const DEFAULT_REPLY: &'static str = "ok";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn push_error(&self, err: AssistantError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<RecordedCompletion> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AssistantClient for MockAssistant {
    async fn complete(&self, system: &str, history: &[Message]) -> Result<String, AssistantError> {
        self.requests.lock().unwrap().push(RecordedCompletion {
            system: system.to_string(),
            history: history.to_vec(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::DEFAULT_REPLY.to_string()))
    }
}
