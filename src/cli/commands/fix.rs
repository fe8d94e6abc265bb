//! Implementation of the `greenloop fix` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use tokio::fs;

use crate::application::ConvergenceLoop;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, GenerationTarget};
use crate::infrastructure::build::MavenBuildRunner;
use crate::infrastructure::generators::OllamaGenerator;

/// Arguments for `greenloop fix`.
#[derive(Args, Debug)]
pub struct FixArgs {
    /// Simple name of the class under repair (positional argument)
    pub class_name: String,

    /// Dotted package the class belongs to
    #[arg(short, long)]
    pub package: Option<String>,

    /// Inline specification text
    #[arg(short, long, conflicts_with = "spec_file")]
    pub spec: Option<String>,

    /// Path to a file containing the specification
    #[arg(long)]
    pub spec_file: Option<PathBuf>,

    /// Maven project root
    #[arg(short = 'C', long, default_value = ".")]
    pub project_root: PathBuf,
}

#[derive(Debug, serde::Serialize)]
struct FixOutput {
    run_id: uuid::Uuid,
    class_name: String,
    succeeded: bool,
    cycles_run: u32,
    duration_ms: i64,
}

impl CommandOutput for FixOutput {
    fn to_human(&self) -> String {
        if self.succeeded {
            format!(
                "All tests green for {} after {} cycle(s) in {} ms",
                self.class_name, self.cycles_run, self.duration_ms
            )
        } else {
            format!(
                "Budget exhausted after {} cycle(s) in {} ms; tests for {} still failing",
                self.cycles_run, self.duration_ms, self.class_name
            )
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Execute `greenloop fix` with an already-loaded configuration.
///
/// Exhaustion is an expected terminal outcome: the command reports it and
/// exits zero, leaving the on-disk state for inspection.
pub async fn execute(args: FixArgs, config: Config, json_mode: bool) -> Result<()> {
    let specification = match (args.spec, args.spec_file) {
        (Some(spec), None) => spec,
        (None, Some(path)) => fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read spec file {}", path.display()))?,
        _ => bail!("provide a specification with --spec or --spec-file"),
    };

    let target = GenerationTarget::new(args.class_name, args.package, specification)?;

    let generator = Arc::new(OllamaGenerator::new(&config.generator)?);
    let build = Arc::new(MavenBuildRunner::new(config.build.clone()));
    let controller = ConvergenceLoop::new(generator, build, config);

    let report = controller
        .run_full_process(&target, &args.project_root)
        .await;

    output(
        &FixOutput {
            run_id: report.run_id,
            class_name: target.class_name,
            succeeded: report.succeeded,
            cycles_run: report.cycles_run,
            duration_ms: report.duration_ms(),
        },
        json_mode,
    );
    Ok(())
}
