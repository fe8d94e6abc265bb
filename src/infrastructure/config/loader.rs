//! Configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid cycles: {0}. Must be between 1 and 10")]
    InvalidCycles(u32),

    #[error("Invalid iterations_per_cycle: {0}. Must be between 1 and 500")]
    InvalidIterations(u32),

    #[error("Invalid fallback_attempts: {0}. Cannot be 0")]
    InvalidFallbackAttempts(u32),

    #[error("Success marker cannot be empty")]
    EmptySuccessMarker,

    #[error("Build tool binary path cannot be empty")]
    EmptyBinaryPath,

    #[error("Generator base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Generator model id cannot be empty")]
    EmptyModelId,

    #[error("Invalid generator timeout: {0}. Must be positive")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .greenloop/config.yaml (project config, created by init)
    /// 3. .greenloop/local.yaml (project local overrides, optional)
    /// 4. Environment variables (GREENLOOP_* prefix, highest priority)
    ///
    /// Configuration is project-local so different projects on one machine
    /// can target different build tools and models.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".greenloop/config.yaml"))
            .merge(Yaml::file(".greenloop/local.yaml"))
            .merge(Env::prefixed("GREENLOOP_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.policy.cycles == 0 || config.policy.cycles > 10 {
            return Err(ConfigError::InvalidCycles(config.policy.cycles));
        }
        if config.policy.iterations_per_cycle == 0 || config.policy.iterations_per_cycle > 500 {
            return Err(ConfigError::InvalidIterations(
                config.policy.iterations_per_cycle,
            ));
        }
        if config.policy.fallback_attempts == 0 {
            return Err(ConfigError::InvalidFallbackAttempts(
                config.policy.fallback_attempts,
            ));
        }

        if config.build.success_marker.is_empty() {
            return Err(ConfigError::EmptySuccessMarker);
        }
        if config.build.binary_path.is_empty() {
            return Err(ConfigError::EmptyBinaryPath);
        }

        if config.generator.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if config.generator.primary_model.is_empty() || config.generator.fallback_model.is_empty()
        {
            return Err(ConfigError::EmptyModelId);
        }
        if config.generator.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.generator.timeout_secs));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }
        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
