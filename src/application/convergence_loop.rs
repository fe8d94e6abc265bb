//! The convergence loop controller.
//!
//! Top-level state machine of a repair run: cycles of bounded iterations,
//! each iteration running the build tool, classifying the failure, and
//! either merging generated dependencies into the manifest or rewriting
//! the unit from a generated fenced block. Convergence is verified
//! empirically by re-running the real build tool every iteration; no
//! in-memory diff or patch history is kept. The only state carried across
//! iterations is the on-disk unit file and manifest.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::models::{BuildResult, Config, FailureCategory, GenerationTarget, RunReport};
use crate::domain::ports::{BuildRunner, Generator};
use crate::services::manifest_merger::MergeOutcome;
use crate::services::{classifier, extractor, manifest_merger, prompts};
use crate::infrastructure::workspace;

/// Drives a full repair run against one generation target.
///
/// Generic over its two external collaborators so tests can inject fakes
/// satisfying the same port contracts.
pub struct ConvergenceLoop<G: Generator, B: BuildRunner> {
    generator: Arc<G>,
    build: Arc<B>,
    config: Config,
}

impl<G: Generator, B: BuildRunner> ConvergenceLoop<G, B> {
    /// Create a loop controller with explicit collaborators and config.
    pub fn new(generator: Arc<G>, build: Arc<B>, config: Config) -> Self {
        Self {
            generator,
            build,
            config,
        }
    }

    /// Run up to the configured number of cycles against the target.
    ///
    /// A later cycle starts from the current on-disk state; failed edits
    /// from an earlier cycle persist. Exhausting all cycles is a terminal,
    /// non-fatal outcome reported in the returned `RunReport`.
    pub async fn run_full_process(
        &self,
        target: &GenerationTarget,
        project_root: &Path,
    ) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, class = %target.class_name, "starting repair run");

        let mut succeeded = false;
        let mut cycles_run = 0;
        for cycle in 1..=self.config.policy.cycles {
            cycles_run = cycle;
            info!(cycle, "starting cycle");

            if self.run_cycle(target, project_root, cycle).await {
                info!(cycle, "all tests green");
                succeeded = true;
                break;
            }

            warn!(cycle, "cycle did not converge");
        }

        let report = RunReport {
            run_id,
            succeeded,
            cycles_run,
            started_at,
            finished_at: Utc::now(),
        };

        if report.succeeded {
            info!(duration_ms = report.duration_ms(), "run converged");
        } else {
            warn!(
                duration_ms = report.duration_ms(),
                "budget exhausted, tests still failing"
            );
        }
        report
    }

    /// Run one cycle of bounded iterations; true means the tests went green.
    async fn run_cycle(
        &self,
        target: &GenerationTarget,
        project_root: &Path,
        cycle: u32,
    ) -> bool {
        let test_source = workspace::load_test_source(project_root, target).await;
        let mut last_output = String::new();

        for iteration in 1..=self.config.policy.iterations_per_cycle {
            info!(cycle, iteration, "starting iteration");

            last_output = self.run_build(project_root).await;
            let unit_exists = workspace::unit_exists(project_root, target);

            match classifier::classify(
                &last_output,
                &self.config.build.success_marker,
                unit_exists,
            ) {
                FailureCategory::NoFailure => {
                    info!(cycle, iteration, "success marker present");
                    return true;
                }
                FailureCategory::DependencyResolutionFailure => {
                    info!("dependency resolution failure detected");
                    if self.dependency_round(project_root, &last_output).await {
                        // The dependency round and the source round are
                        // mutually exclusive within one iteration.
                        continue;
                    }
                    self.source_round(target, project_root, &test_source, &last_output)
                        .await;
                }
                FailureCategory::OtherFailure => {
                    debug!(output_bytes = last_output.len(), "test failures detected");
                    self.source_round(target, project_root, &test_source, &last_output)
                        .await;
                }
            }
        }

        warn!(
            cycle,
            model = %self.config.generator.fallback_model,
            "iteration budget exhausted, escalating to fallback model"
        );
        self.escalate(target, project_root, &test_source, &last_output)
            .await
    }

    /// One manifest-fix round. True means a merge was applied and the
    /// iteration should move straight to the next build.
    async fn dependency_round(&self, project_root: &Path, build_output: &str) -> bool {
        let prompt = prompts::manifest_fix_prompt(build_output);
        let Some(response) = self
            .generate(&self.config.generator.primary_model, &prompt)
            .await
        else {
            return false;
        };

        let Some(fragment) = extractor::extract_fenced_block(&response, "xml") else {
            warn!("no xml fence in manifest-fix response");
            return false;
        };

        let manifest = match workspace::read_manifest(project_root).await {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!(error = %err, "could not read manifest");
                return false;
            }
        };

        match manifest_merger::merge(&manifest, &fragment, &self.config.manifest.allowed_groups) {
            Ok(MergeOutcome::Applied {
                manifest: merged,
                added,
                replaced,
            }) => match workspace::write_manifest(project_root, &merged).await {
                Ok(()) => {
                    info!(added, replaced, "manifest updated, re-running tests");
                    true
                }
                Err(err) => {
                    warn!(error = %err, "could not write manifest");
                    false
                }
            },
            Ok(MergeOutcome::NoChange) => {
                info!("no usable dependencies in fragment, falling through");
                false
            }
            Err(err) => {
                warn!(error = %err, "manifest merge aborted");
                false
            }
        }
    }

    /// One primary-fix round. An unusable response leaves the unit
    /// untouched; the loop continues either way.
    async fn source_round(
        &self,
        target: &GenerationTarget,
        project_root: &Path,
        test_source: &str,
        build_output: &str,
    ) {
        let prompt = prompts::primary_fix_prompt(target, test_source, build_output);
        let Some(response) = self
            .generate(&self.config.generator.primary_model, &prompt)
            .await
        else {
            return;
        };

        let Some(source) = extractor::extract_fenced_block(&response, "java") else {
            warn!("no java fence in fix response, unit left unchanged");
            return;
        };

        match workspace::write_unit(project_root, target, &source).await {
            Ok(path) => info!(path = %path.display(), "unit rewritten, re-running tests"),
            Err(err) => warn!(error = %err, "could not write unit"),
        }
    }

    /// Escalation: the fallback model gets a bounded number of attempts,
    /// each followed by at most one build run. No further iteration occurs.
    async fn escalate(
        &self,
        target: &GenerationTarget,
        project_root: &Path,
        test_source: &str,
        build_output: &str,
    ) -> bool {
        for attempt in 1..=self.config.policy.fallback_attempts {
            info!(attempt, "fallback attempt");

            let prompt = prompts::fallback_fix_prompt(target, test_source, build_output);
            let Some(response) = self
                .generate(&self.config.generator.fallback_model, &prompt)
                .await
            else {
                continue;
            };

            let Some(source) = extractor::extract_fenced_block(&response, "java") else {
                warn!(attempt, "fallback model returned no java fence");
                continue;
            };

            if let Err(err) = workspace::write_unit(project_root, target, &source).await {
                warn!(error = %err, "could not write fallback unit");
                continue;
            }

            let result = BuildResult::from_output(
                self.run_build(project_root).await,
                &self.config.build.success_marker,
            );
            if result.passed {
                info!(attempt, "fallback attempt went green");
                return true;
            }
            warn!(attempt, "fallback attempt did not go green");
        }
        false
    }

    /// Invoke the build tool, treating a transport failure as a non-green
    /// build output so classification still works.
    async fn run_build(&self, project_root: &Path) -> String {
        match self.build.run_build_and_tests(project_root).await {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "build tool invocation failed");
                format!("Error running build tool: {err}")
            }
        }
    }

    /// Invoke the generator, treating a transport failure as no output
    /// for this round.
    async fn generate(&self, model: &str, prompt: &str) -> Option<String> {
        debug!(model, prompt_bytes = prompt.len(), "prompting generator");
        match self.generator.generate(model, prompt).await {
            Ok(response) => {
                debug!(model, response_bytes = response.len(), "generator responded");
                Some(response)
            }
            Err(err) => {
                warn!(model, error = %err, "generator call failed");
                None
            }
        }
    }
}
