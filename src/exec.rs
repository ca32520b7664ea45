//! External command execution.
//!
//! Every external tool the driver touches (package manager, Tailwind,
//! formatters, an external primary program) goes through [`CommandRunner`],
//! so tests can substitute a recorder for the real process runner.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Failure of an external command.
#[derive(Debug, Error)]
pub enum RunError {
    /// An empty argv was configured
    #[error("empty command")]
    EmptyCommand,
    /// The process could not be started
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The process exited unsuccessfully
    #[error("`{command}` {}", describe_exit(.code))]
    Failed { command: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// A single external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory (inherits the current directory when `None`)
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), cwd: None }
    }

    /// Build a command from a configured argv (`["npm", "install"]`).
    pub fn from_argv(argv: &[String]) -> Result<Self, RunError> {
        let (program, args) = argv.split_first().ok_or(RunError::EmptyCommand)?;
        Ok(Self { program: program.clone(), args: args.to_vec(), cwd: None })
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run in the given directory.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs external commands to completion.
pub trait CommandRunner {
    /// Run the command, returning an error on spawn failure or non-zero exit.
    fn run(&mut self, spec: &CommandSpec) -> Result<(), RunError>;
}

/// Runs commands as child processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<(), RunError> {
        tracing::info!(command = %spec, "running");

        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        if let Some(dir) = &spec.cwd {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .map_err(|source| RunError::Spawn { command: spec.to_string(), source })?;

        if status.success() {
            Ok(())
        } else {
            Err(RunError::Failed { command: spec.to_string(), code: status.code() })
        }
    }
}

/// Records invocations instead of running them.
///
/// Commands whose program appears in `failing` report a non-zero exit.
#[derive(Debug, Default, Clone)]
pub struct RecordingRunner {
    pub calls: Vec<CommandSpec>,
    pub failing: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command whose program or first argument matches `name` fail.
    pub fn fail_on(mut self, name: impl Into<String>) -> Self {
        self.failing.push(name.into());
        self
    }

    /// Rendered command lines in invocation order.
    pub fn lines(&self) -> Vec<String> {
        self.calls.iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<(), RunError> {
        self.calls.push(spec.clone());
        let matches = |name: &String| {
            spec.program == *name || spec.args.first().is_some_and(|a| a == name)
        };
        if self.failing.iter().any(matches) {
            return Err(RunError::Failed { command: spec.to_string(), code: Some(1) });
        }
        Ok(())
    }
}
