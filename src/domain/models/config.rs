//! Configuration model.
//!
//! Every value the loop controller needs at run time lives here and is
//! injected explicitly; there are no compiled-in tool paths, markers or
//! model identifiers.

use serde::{Deserialize, Serialize};

/// Top-level configuration, merged by the figment loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text-generation service settings.
    pub generator: GeneratorConfig,
    /// Build tool invocation settings.
    pub build: BuildConfig,
    /// Iteration and escalation budgets.
    pub policy: PolicyConfig,
    /// Manifest merge settings.
    pub manifest: ManifestConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Settings for the Ollama generator endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Model used for the per-iteration fix rounds.
    pub primary_model: String,
    /// Higher-capability model used once the iteration budget is exhausted.
    pub fallback_model: String,
    /// HTTP timeout in seconds. Generation is a long, synchronous wait.
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            primary_model: "deepseek-coder-v2:16b".to_string(),
            fallback_model: "deepseek-r1:70b".to_string(),
            timeout_secs: 600,
        }
    }
}

/// Settings for the build tool subprocess.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Binary to spawn, resolved via PATH if not absolute.
    pub binary_path: String,
    /// Arguments passed to every invocation.
    pub args: Vec<String>,
    /// Literal substring in the tool output that signals a fully passing
    /// test run. Case-sensitive.
    pub success_marker: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            binary_path: "mvn".to_string(),
            args: vec!["-Dstyle.color=never".to_string(), "test".to_string()],
            success_marker: "BUILD SUCCESS".to_string(),
        }
    }
}

/// Iteration and escalation budgets for the convergence loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Outer retry envelope around the iteration loop.
    pub cycles: u32,
    /// Iterations per cycle before escalating to the fallback model.
    pub iterations_per_cycle: u32,
    /// Fallback generation attempts per escalation.
    pub fallback_attempts: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            cycles: 2,
            iterations_per_cycle: 30,
            fallback_attempts: 1,
        }
    }
}

/// Settings for manifest dependency merging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Dependency groups the merger is allowed to add. Everything else in a
    /// generated fragment is dropped and logged.
    pub allowed_groups: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            allowed_groups: vec!["org.junit.jupiter".to_string()],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter level when RUST_LOG is unset.
    pub level: String,
    /// Output format: `pretty` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
