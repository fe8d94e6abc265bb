//! Maven build-runner adapter.
//!
//! Spawns the configured build tool in the project root and captures its
//! combined output. The loop decides what the output means; this adapter
//! only reports what the tool printed.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::BuildConfig;
use crate::domain::ports::BuildRunner;

/// Build runner that shells out to a Maven-style CLI.
pub struct MavenBuildRunner {
    config: BuildConfig,
}

impl MavenBuildRunner {
    /// Create a runner from the build configuration.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BuildRunner for MavenBuildRunner {
    async fn run_build_and_tests(&self, project_root: &Path) -> DomainResult<String> {
        debug!(
            binary = %self.config.binary_path,
            root = %project_root.display(),
            "invoking build tool"
        );

        let output = Command::new(&self.config.binary_path)
            .args(&self.config.args)
            .current_dir(project_root)
            .output()
            .await
            .map_err(|err| {
                DomainError::BuildToolUnavailable(format!(
                    "{}: {err}",
                    self.config.binary_path
                ))
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}
