//! Source formatting.
//!
//! Two formatters run over disjoint file sets: the Rust formatter over the
//! crate sources, and a web formatter over HTML/JS/CSS/JSON/Markdown. Each is
//! independent: either can run alone, and a failure in one does not stop the
//! other from running.

use crate::build::BuildContext;
use crate::exec::{CommandRunner, CommandSpec, RunError};
use thiserror::Error;

/// Which formatter to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum FormatTarget {
    /// Rust sources (`cargo fmt`)
    Rust,
    /// Web text files (`prettier`)
    Web,
}

impl FormatTarget {
    pub const ALL: [FormatTarget; 2] = [FormatTarget::Rust, FormatTarget::Web];
}

impl std::fmt::Display for FormatTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatTarget::Rust => write!(f, "rust"),
            FormatTarget::Web => write!(f, "web"),
        }
    }
}

/// One or more formatters failed.
#[derive(Debug, Error)]
#[error("formatting failed:\n{}", .failures.iter().map(|(t, e)| format!("  - {}: {}", t, e)).collect::<Vec<_>>().join("\n"))]
pub struct FormatError {
    pub failures: Vec<(FormatTarget, RunError)>,
}

/// Command line for one formatter.
///
/// In check mode the formatter only reports files that would change.
pub fn format_command(
    ctx: &BuildContext,
    target: FormatTarget,
    check: bool,
) -> Result<CommandSpec, RunError> {
    let format = &ctx.config().format;
    let spec = match target {
        FormatTarget::Rust => {
            let spec = CommandSpec::from_argv(&format.rust)?;
            if check {
                spec.arg("--check")
            } else {
                spec
            }
        }
        FormatTarget::Web => CommandSpec::from_argv(&format.web)?
            .arg(if check { "--check" } else { "--write" })
            .args(format.web_patterns.iter().cloned()),
    };
    Ok(spec.in_dir(ctx.project_root()))
}

/// Run the selected formatters, each regardless of the others' outcome.
///
/// Returns the targets that ran successfully.
pub fn format(
    ctx: &BuildContext,
    targets: &[FormatTarget],
    check: bool,
    runner: &mut dyn CommandRunner,
) -> Result<Vec<FormatTarget>, FormatError> {
    let mut done = Vec::new();
    let mut failures = Vec::new();

    for &target in targets {
        let outcome = format_command(ctx, target, check).and_then(|spec| runner.run(&spec));
        match outcome {
            Ok(()) => {
                tracing::info!(%target, check, "formatter finished");
                done.push(target);
            }
            Err(e) => {
                tracing::warn!(%target, error = %e, "formatter failed");
                failures.push((target, e));
            }
        }
    }

    if failures.is_empty() {
        Ok(done)
    } else {
        Err(FormatError { failures })
    }
}
