//! Implementation of the `greenloop init` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokio::fs;

use crate::cli::output::{output, CommandOutput};

/// Starter configuration, documenting every default.
const CONFIG_TEMPLATE: &str = r#"# greenloop configuration.
# Every value shown here is the default; uncomment to override.
# Environment variables win over this file: GREENLOOP_POLICY__CYCLES=3 etc.

generator:
  base_url: "http://localhost:11434"
  primary_model: "deepseek-coder-v2:16b"
  fallback_model: "deepseek-r1:70b"
  # timeout_secs: 600

build:
  binary_path: "mvn"
  args: ["-Dstyle.color=never", "test"]
  success_marker: "BUILD SUCCESS"

policy:
  cycles: 2
  iterations_per_cycle: 30
  fallback_attempts: 1

manifest:
  # Only dependencies from these groups are ever merged into pom.xml.
  allowed_groups: ["org.junit.jupiter"]

logging:
  level: "info"
  format: "pretty"
"#;

/// Arguments for `greenloop init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
struct InitOutput {
    success: bool,
    message: String,
    config_path: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        format!("{}\n  {}", self.message, self.config_path.display())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Execute `greenloop init`.
pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let config_dir = args.path.join(".greenloop");
    let config_path = config_dir.join("config.yaml");

    if config_path.exists() && !args.force {
        output(
            &InitOutput {
                success: false,
                message: "Already initialized. Use --force to overwrite.".to_string(),
                config_path,
            },
            json_mode,
        );
        return Ok(());
    }

    fs::create_dir_all(&config_dir)
        .await
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;
    fs::write(&config_path, CONFIG_TEMPLATE)
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    output(
        &InitOutput {
            success: true,
            message: "Configuration written to:".to_string(),
            config_path,
        },
        json_mode,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ConfigLoader;

    #[tokio::test]
    async fn template_round_trips_through_the_loader() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            force: false,
            path: dir.path().to_path_buf(),
        };
        execute(args, true).await.unwrap();

        let config =
            ConfigLoader::load_from_file(dir.path().join(".greenloop/config.yaml")).unwrap();
        assert_eq!(config.policy.cycles, 2);
        assert_eq!(config.build.success_marker, "BUILD SUCCESS");
    }

    #[tokio::test]
    async fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".greenloop/config.yaml");
        std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        std::fs::write(&config_path, "policy:\n  cycles: 3\n").unwrap();

        let args = InitArgs {
            force: false,
            path: dir.path().to_path_buf(),
        };
        execute(args, true).await.unwrap();

        let kept = std::fs::read_to_string(&config_path).unwrap();
        assert!(kept.contains("cycles: 3"));
    }
}
