//! Stylesheet generation.
//!
//! The source stylesheet is turned into `<out>/<styles.output>` either by the
//! external Tailwind CLI or in-process with lightningcss.

use crate::build::BuildContext;
use crate::config::StyleEngine;
use crate::exec::{CommandRunner, CommandSpec, RunError};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error generating the stylesheet
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("stylesheet input not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSS error in {}: {message}", .path.display())]
    Css { path: PathBuf, message: String },
    #[error(transparent)]
    Command(#[from] RunError),
}

/// Produce the output stylesheet with the configured engine.
///
/// Returns the path of the generated stylesheet.
pub fn generate_styles(
    ctx: &BuildContext,
    runner: &mut dyn CommandRunner,
) -> Result<PathBuf, StyleError> {
    let styles = &ctx.config().styles;
    let input = ctx.styles_input();
    let output = ctx.styles_output();

    match styles.engine {
        StyleEngine::Tailwind => {
            let spec = tailwind_command(ctx, &input, &output)?;
            runner.run(&spec)?;
        }
        StyleEngine::Lightningcss => {
            let source = match fs::read_to_string(&input) {
                Ok(source) => source,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(StyleError::MissingInput(input));
                }
                Err(source) => return Err(StyleError::Read { path: input, source }),
            };
            let css = process_css(&source, styles.minify)
                .map_err(|message| StyleError::Css { path: input.clone(), message })?;

            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)
                    .map_err(|source| StyleError::Write { path: output.clone(), source })?;
            }
            fs::write(&output, css)
                .map_err(|source| StyleError::Write { path: output.clone(), source })?;
            tracing::info!(output = %output.display(), minify = styles.minify, "wrote stylesheet");
        }
    }

    Ok(output)
}

/// Tailwind invocation: `<command> -i <input> -o <output> [--minify]`.
pub fn tailwind_command(
    ctx: &BuildContext,
    input: &Path,
    output: &Path,
) -> Result<CommandSpec, RunError> {
    let styles = &ctx.config().styles;
    let mut spec = CommandSpec::from_argv(&styles.command)?
        .arg("-i")
        .arg(input.display().to_string())
        .arg("-o")
        .arg(output.display().to_string())
        .in_dir(ctx.project_root());
    if styles.minify {
        spec = spec.arg("--minify");
    }
    Ok(spec)
}

/// Parse and re-print a stylesheet, optionally minified.
pub fn process_css(source: &str, minify: bool) -> Result<String, String> {
    let mut sheet =
        StyleSheet::parse(source, ParserOptions::default()).map_err(|e| e.to_string())?;

    if minify {
        sheet.minify(MinifyOptions::default()).map_err(|e| e.to_string())?;
    }

    let printed = sheet
        .to_css(PrinterOptions { minify, ..PrinterOptions::default() })
        .map_err(|e| e.to_string())?;
    Ok(printed.code)
}
