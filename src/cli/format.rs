//! Format command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{load_context, EXIT_ERROR, EXIT_SUCCESS};
use crate::config::CliOverrides;
use crate::exec::ProcessRunner;
use crate::format::{format, FormatTarget};

/// Run the format command
pub fn run_format(
    config: Option<&Path>,
    only: Option<FormatTarget>,
    check: bool,
) -> ExitCode {
    let context = match load_context(config, &CliOverrides::default()) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let targets = match only {
        Some(target) => vec![target],
        None => FormatTarget::ALL.to_vec(),
    };

    match format(&context, &targets, check, &mut ProcessRunner) {
        Ok(done) => {
            let names: Vec<_> = done.iter().map(ToString::to_string).collect();
            let verb = if check { "Checked" } else { "Formatted" };
            println!("{}: {}", verb, names.join(", "));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
