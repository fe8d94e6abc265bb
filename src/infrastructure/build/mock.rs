//! Mock build runner for testing.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::BuildRunner;

/// One scripted build invocation result.
#[derive(Debug, Clone)]
pub enum MockBuildReply {
    /// Raw build output text.
    Output(String),
    /// Simulate an unspawnable tool.
    TransportError(String),
}

/// Mock build runner with a scripted output queue.
///
/// When the queue runs dry the default output is returned.
pub struct MockBuildRunner {
    replies: RwLock<VecDeque<MockBuildReply>>,
    default_output: String,
    invocations: RwLock<Vec<PathBuf>>,
}

impl MockBuildRunner {
    /// Create a mock that keeps returning `default_output`.
    pub fn new(default_output: impl Into<String>) -> Self {
        Self {
            replies: RwLock::new(VecDeque::new()),
            default_output: default_output.into(),
            invocations: RwLock::new(Vec::new()),
        }
    }

    /// Queue one build output.
    pub async fn push_output(&self, output: impl Into<String>) {
        self.replies
            .write()
            .await
            .push_back(MockBuildReply::Output(output.into()));
    }

    /// Queue one transport failure.
    pub async fn push_error(&self, message: impl Into<String>) {
        self.replies
            .write()
            .await
            .push_back(MockBuildReply::TransportError(message.into()));
    }

    /// Number of build invocations so far.
    pub async fn invocation_count(&self) -> usize {
        self.invocations.read().await.len()
    }
}

#[async_trait]
impl BuildRunner for MockBuildRunner {
    async fn run_build_and_tests(&self, project_root: &Path) -> DomainResult<String> {
        self.invocations
            .write()
            .await
            .push(project_root.to_path_buf());

        let reply = self.replies.write().await.pop_front();
        match reply {
            Some(MockBuildReply::Output(output)) => Ok(output),
            Some(MockBuildReply::TransportError(message)) => {
                Err(DomainError::BuildToolUnavailable(message))
            }
            None => Ok(self.default_output.clone()),
        }
    }
}
