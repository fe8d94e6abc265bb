//! Ports: the two external collaborators of the convergence loop.
//!
//! Both are long, synchronous waits from the loop's perspective. The loop
//! imposes no internal timeout; adapters may carry their own transport
//! timeouts. Transport failures surface as `Err` values which the loop
//! logs and treats as "no actionable output this round" -- they are never
//! fatal to a run.

use std::path::Path;

use async_trait::async_trait;

use super::errors::DomainResult;

/// Text-generation service.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Send `prompt` to `model` and return the raw response text.
    async fn generate(&self, model: &str, prompt: &str) -> DomainResult<String>;
}

/// Build/test tool.
#[async_trait]
pub trait BuildRunner: Send + Sync {
    /// Run the full build and test suite for the project at `project_root`
    /// and return the combined raw output.
    async fn run_build_and_tests(&self, project_root: &Path) -> DomainResult<String>;
}
