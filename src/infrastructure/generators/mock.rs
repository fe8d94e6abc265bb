//! Mock generator for testing.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::Generator;

/// One scripted reply for a model.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this response text.
    Text(String),
    /// Simulate a transport failure.
    TransportError(String),
}

/// A recorded generator invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Model id the loop asked for.
    pub model: String,
    /// Full prompt text.
    pub prompt: String,
}

/// Mock generator with per-model scripted reply queues.
///
/// When a model's queue runs dry the default reply is returned, which
/// deliberately contains no fenced block.
pub struct MockGenerator {
    replies: RwLock<HashMap<String, VecDeque<MockReply>>>,
    default_reply: String,
    calls: RwLock<Vec<RecordedCall>>,
}

impl MockGenerator {
    /// Create a mock whose default reply has no extractable fence.
    pub fn new() -> Self {
        Self {
            replies: RwLock::new(HashMap::new()),
            default_reply: "I could not produce any code this time.".to_string(),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Queue a text reply for a model.
    pub async fn push_text(&self, model: &str, text: impl Into<String>) {
        self.push_reply(model, MockReply::Text(text.into())).await;
    }

    /// Queue a transport error for a model.
    pub async fn push_error(&self, model: &str, message: impl Into<String>) {
        self.push_reply(model, MockReply::TransportError(message.into()))
            .await;
    }

    /// Queue an arbitrary reply for a model.
    pub async fn push_reply(&self, model: &str, reply: MockReply) {
        let mut replies = self.replies.write().await;
        replies.entry(model.to_string()).or_default().push_back(reply);
    }

    /// All recorded calls, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Number of calls routed to a model.
    pub async fn call_count_for(&self, model: &str) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|call| call.model == model)
            .count()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> DomainResult<String> {
        self.calls.write().await.push(RecordedCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
        });

        let reply = {
            let mut replies = self.replies.write().await;
            replies.get_mut(model).and_then(VecDeque::pop_front)
        };

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::TransportError(message)) => {
                Err(DomainError::GeneratorUnavailable(message))
            }
            None => Ok(self.default_reply.clone()),
        }
    }
}
