//! Build pipeline orchestration.
//!
//! Runs the planned phases strictly in order on the calling thread. The first
//! failing phase stops the build; later phases never start.

use crate::build::{plan, BuildContext, BuildResult, Phase, PhaseResult};
use crate::clean::CleanError;
use crate::exec::{CommandRunner, CommandSpec, RunError};
use crate::site::{self, SiteError};
use crate::styles::{generate_styles, StyleError};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

/// Failure inside a single phase.
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error(transparent)]
    Clean(#[from] CleanError),
    #[error(transparent)]
    Command(#[from] RunError),
    #[error(transparent)]
    Styles(#[from] StyleError),
    #[error(transparent)]
    Site(#[from] SiteError),
}

/// Error during build execution.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A phase failed; `result` holds every phase up to and including it
    #[error("{phase} phase failed: {source}")]
    PhaseFailed {
        phase: Phase,
        #[source]
        source: PhaseError,
        result: BuildResult,
    },
}

impl BuildError {
    /// The phase that stopped the build.
    pub fn phase(&self) -> Phase {
        match self {
            BuildError::PhaseFailed { phase, .. } => *phase,
        }
    }

    /// Outcome of the phases that ran, ending with the failed one.
    pub fn result(&self) -> &BuildResult {
        match self {
            BuildError::PhaseFailed { result, .. } => result,
        }
    }
}

/// One planned phase as shown by `build --dry-run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPhase {
    pub phase: Phase,
    pub enabled: bool,
}

/// What a build would do, without doing it.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub project: String,
    pub root: PathBuf,
    pub out: PathBuf,
    pub clean: Vec<PathBuf>,
    pub phases: Vec<PlannedPhase>,
}

/// Build pipeline for executing builds.
pub struct BuildPipeline {
    /// Build context
    context: BuildContext,
    /// Whether to do a dry run (don't actually build)
    dry_run: bool,
}

impl BuildPipeline {
    /// Create a new build pipeline.
    pub fn new(context: BuildContext) -> Self {
        Self { context, dry_run: false }
    }

    /// Set dry-run mode (don't actually build).
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// The phases a full build runs, in order.
    pub fn plan(&self) -> Vec<Phase> {
        plan()
    }

    /// Describe the full build for display.
    pub fn describe(&self) -> BuildPlan {
        let ctx = &self.context;
        let config = ctx.config();
        BuildPlan {
            project: config.project.name.clone(),
            root: ctx.project_root().to_path_buf(),
            out: ctx.out_dir(),
            clean: ctx.clean_dirs(),
            phases: self
                .plan()
                .into_iter()
                .map(|phase| PlannedPhase { phase, enabled: phase.is_enabled(config) })
                .collect(),
        }
    }

    /// Run the full build: clean, install, styles, generate.
    pub fn run(&self, runner: &mut dyn CommandRunner) -> Result<BuildResult, BuildError> {
        self.run_phases(&self.plan(), runner)
    }

    /// Run the given phases in order, stopping at the first failure.
    ///
    /// Phases disabled in the configuration are recorded as skipped.
    pub fn run_phases(
        &self,
        phases: &[Phase],
        runner: &mut dyn CommandRunner,
    ) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let mut result = BuildResult::new();
        let config = self.context.config();

        tracing::debug!(
            "build plan: {}",
            phases.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> ")
        );

        for &phase in phases {
            if self.dry_run {
                result.add_result(PhaseResult::skipped(phase));
                continue;
            }
            if !phase.is_enabled(config) {
                tracing::info!(%phase, "phase disabled, skipping");
                result.add_result(PhaseResult::skipped(phase).with_detail("disabled"));
                continue;
            }

            let phase_start = Instant::now();
            tracing::info!(%phase, "starting phase");

            match self.execute_phase(phase, runner) {
                Ok(detail) => {
                    let duration = phase_start.elapsed();
                    tracing::info!(%phase, ?duration, "phase done");
                    let mut phase_result = PhaseResult::success(phase, duration);
                    if let Some(detail) = detail {
                        phase_result = phase_result.with_detail(detail);
                    }
                    result.add_result(phase_result);
                }
                Err(source) => {
                    tracing::error!(%phase, error = %source, "phase failed");
                    result.add_result(PhaseResult::failed(
                        phase,
                        source.to_string(),
                        phase_start.elapsed(),
                    ));
                    result.total_duration = start.elapsed();
                    return Err(BuildError::PhaseFailed { phase, source, result });
                }
            }
        }

        result.total_duration = start.elapsed();
        Ok(result)
    }

    /// Execute a single phase, returning an optional note for the summary.
    fn execute_phase(
        &self,
        phase: Phase,
        runner: &mut dyn CommandRunner,
    ) -> Result<Option<String>, PhaseError> {
        let ctx = &self.context;
        let config = ctx.config();

        match phase {
            Phase::Clean => {
                let report = ctx.clean()?;
                Ok(Some(format!("removed {} directories", report.removed_count())))
            }
            Phase::Install => {
                let spec = CommandSpec::from_argv(&config.install.command)?
                    .in_dir(ctx.project_root());
                runner.run(&spec)?;
                Ok(None)
            }
            Phase::Styles => {
                let output = generate_styles(ctx, runner)?;
                Ok(Some(format!("wrote {}", output.display())))
            }
            Phase::Generate => {
                if config.program.is_builtin() {
                    let report = site::generate(ctx)?;
                    Ok(Some(report.summary()))
                } else {
                    let spec = CommandSpec::from_argv(&config.program.command)?
                        .in_dir(ctx.project_root());
                    runner.run(&spec)?;
                    Ok(None)
                }
            }
        }
    }
}
