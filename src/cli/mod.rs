//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod build;
mod format;
mod init;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::build::BuildContext;
use crate::config::{apply_cli_overrides, find_config, load_config, CliOverrides, StyleEngine};
use crate::format::FormatTarget;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;

/// sitekit - build driver and static blog generator
#[derive(Parser)]
#[command(name = "sitekit")]
#[command(about = "sitekit - clean, install, style and generate a static blog")]
#[command(version)]
pub struct Cli {
    /// Path to site.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean, install dependencies, generate the stylesheet and run the site generator
    Build {
        /// Override output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Minify the generated stylesheet
        #[arg(long)]
        minify: bool,

        /// Skip the dependency installation phase
        #[arg(long)]
        skip_install: bool,

        /// Stylesheet engine: tailwind or lightningcss
        #[arg(long)]
        engine: Option<StyleEngine>,

        /// Show the phases that would run without running them
        #[arg(long)]
        dry_run: bool,

        /// With --dry-run, print the plan as JSON
        #[arg(long, requires = "dry_run")]
        json: bool,

        /// Watch sources and rebuild on change
        #[arg(short, long, conflicts_with = "dry_run")]
        watch: bool,
    },

    /// Remove the output directories
    Clean,

    /// Reformat Rust sources and web files
    Format {
        /// Run only one formatter
        #[arg(long, value_enum)]
        only: Option<FormatTarget>,

        /// Check formatting without writing (exit 1 if changes needed)
        #[arg(long)]
        check: bool,
    },

    /// Run only the site generator
    Generate {
        /// Override output directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Initialize a new site project
    Init {
        /// Project directory (default: current directory)
        path: Option<PathBuf>,

        /// Project name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },
}

/// Load configuration, apply CLI overrides and resolve the project root.
///
/// The project root is the directory holding site.toml, or the current
/// directory when no config exists. The merged configuration is validated
/// again, so an override can never point a clean at the project itself.
pub(crate) fn load_context(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<BuildContext, ExitCode> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let found = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config(),
    };

    let (mut config, project_root) = match found {
        Some(path) => {
            tracing::debug!(config = %path.display(), "using config");
            let config = load_config(Some(&path)).map_err(|e| {
                eprintln!("Error loading config: {}", e);
                ExitCode::from(EXIT_ERROR)
            })?;
            let root = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => cwd.join(parent),
                _ => cwd.clone(),
            };
            (config, root)
        }
        None => {
            tracing::debug!("no site.toml found, using defaults");
            (crate::config::default_config(), cwd)
        }
    };

    apply_cli_overrides(&mut config, overrides).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })?;
    Ok(BuildContext::new(config, project_root))
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::logging::init_cli_logger(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Build { out, minify, skip_install, engine, dry_run, json, watch } => {
            let overrides = CliOverrides {
                out,
                minify: minify.then_some(true),
                skip_install,
                engine,
            };
            build::run_build(config, &overrides, cli.verbose, dry_run, json, watch)
        }
        Commands::Clean => build::run_clean(config, cli.verbose),
        Commands::Format { only, check } => format::run_format(config, only, check),
        Commands::Generate { out } => {
            let overrides = CliOverrides { out, ..Default::default() };
            build::run_generate(config, &overrides)
        }
        Commands::Init { path, name } => init::run_init(path.as_deref(), name.as_deref()),
    }
}
