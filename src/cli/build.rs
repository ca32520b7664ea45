//! Build command implementations (build, clean, generate)

use std::path::Path;
use std::process::ExitCode;

use super::{load_context, EXIT_ERROR, EXIT_SUCCESS};
use crate::build::BuildPipeline;
use crate::config::CliOverrides;
use crate::exec::ProcessRunner;

/// Run the build command
pub fn run_build(
    config: Option<&Path>,
    overrides: &CliOverrides,
    verbose: bool,
    dry_run: bool,
    json: bool,
    watch: bool,
) -> ExitCode {
    let context = match load_context(config, overrides) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    let pipeline = BuildPipeline::new(context).with_dry_run(dry_run);
    let mut runner = ProcessRunner;

    if dry_run {
        let plan = pipeline.describe();
        if json {
            match serde_json::to_string_pretty(&plan) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(EXIT_ERROR);
                }
            }
        } else {
            println!("Dry run - would build:");
            println!("  Project: {} ({})", plan.project, plan.root.display());
            println!("  Output: {}", plan.out.display());
            println!("  Phases:");
            for planned in &plan.phases {
                if planned.enabled {
                    println!("    - {}", planned.phase);
                } else {
                    println!("    - {} (disabled)", planned.phase);
                }
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    if watch {
        return match crate::watch::watch_and_rebuild(&pipeline, &mut runner) {
            Ok(()) => ExitCode::from(EXIT_SUCCESS),
            Err(e) => {
                eprintln!("Watch error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    match pipeline.run(&mut runner) {
        Ok(result) => {
            if verbose {
                for phase in &result.phases {
                    match &phase.detail {
                        Some(detail) => println!("  {} ({}): {}", phase.phase, phase.status, detail),
                        None => println!("  {} ({})", phase.phase, phase.status),
                    }
                }
            }
            println!("{}", result.summary());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Build error: {}", e);
            eprintln!("{}", e.result().summary());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run the clean command
pub fn run_clean(config: Option<&Path>, verbose: bool) -> ExitCode {
    let context = match load_context(config, &CliOverrides::default()) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    match context.clean() {
        Ok(report) => {
            for path in &report.removed {
                println!("Removed {}", path.display());
            }
            if verbose {
                for path in &report.absent {
                    println!("Already absent {}", path.display());
                }
            }
            if report.removed.is_empty() {
                println!("Nothing to clean");
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run the generate command (site generator only, no clean)
pub fn run_generate(config: Option<&Path>, overrides: &CliOverrides) -> ExitCode {
    let context = match load_context(config, overrides) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    match crate::site::generate(&context) {
        Ok(report) => {
            println!("Generated {} into {}", report.summary(), context.out_dir().display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
