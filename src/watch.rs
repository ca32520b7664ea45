//! Watch mode for automatic rebuilds on file changes
//!
//! Provides file system watching with debouncing for `sitekit build --watch`.
//! After an initial full build, each change re-runs only the styles and
//! generate phases.

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;
use thiserror::Error;

use crate::build::{rebuild_plan, BuildError, BuildPipeline, BuildResult};
use crate::exec::CommandRunner;

/// Error during watch mode
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize file watcher
    #[error("Failed to initialize file watcher: {0}")]
    WatcherInit(notify::Error),
    /// Failed to add watch path
    #[error("Failed to watch {}: {source}", .path.display())]
    WatchPath {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
    /// Channel receive error
    #[error("Watch channel error: {0}")]
    ChannelError(String),
    /// Nothing to watch
    #[error("none of the source paths exist")]
    NothingToWatch,
}

/// A path to watch and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchPath {
    pub path: PathBuf,
    pub recursive: bool,
    /// Only changes to this entry of `path` count
    pub file_name: Option<OsString>,
}

impl WatchPath {
    fn dir(path: PathBuf) -> Self {
        Self { path, recursive: true, file_name: None }
    }

    /// Watch a single file through its parent directory, so editors that save
    /// by renaming a new file over the old one keep triggering events.
    fn file(path: &Path) -> Option<Self> {
        let parent = path.parent()?.to_path_buf();
        let file_name = path.file_name()?.to_os_string();
        Some(Self { path: parent, recursive: false, file_name: Some(file_name) })
    }

    /// Whether a change at `changed` belongs to this watch.
    pub fn matches(&self, changed: &Path) -> bool {
        match &self.file_name {
            Some(name) => {
                changed.parent() == Some(self.path.as_path())
                    && changed.file_name() == Some(name.as_os_str())
            }
            None => changed.starts_with(&self.path),
        }
    }
}

/// Existing source locations: posts, drafts, public, and the stylesheet input.
pub fn watch_paths(pipeline: &BuildPipeline) -> Vec<WatchPath> {
    let ctx = pipeline.context();
    let mut paths = Vec::new();

    for dir in [ctx.posts_dir(), ctx.drafts_dir(), ctx.public_dir()] {
        if dir.is_dir() {
            paths.push(WatchPath::dir(dir));
        }
    }

    let styles = ctx.styles_input();
    if ctx.config().styles.enabled && styles.is_file() {
        paths.extend(WatchPath::file(&styles));
    }

    paths
}

/// Whether a changed path should trigger a rebuild.
///
/// Changes inside the output directory are ignored so the generator's own
/// writes never retrigger it; editor swap and backup files are ignored too.
/// Anything else must fall under one of the `watched` paths.
pub fn is_relevant_change(path: &Path, out_dir: &Path, watched: &[WatchPath]) -> bool {
    if path.starts_with(out_dir) || !watched.iter().any(|w| w.matches(path)) {
        return false;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    !(name.ends_with('~')
        || name.ends_with(".swp")
        || name.ends_with(".swx")
        || name.starts_with(".#")
        || name == ".DS_Store")
}

/// Clear the terminal screen
fn clear_screen() {
    // ANSI escape code to clear screen and move cursor to top-left
    print!("\x1B[2J\x1B[1;1H");
}

/// Format duration for display
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

fn print_outcome(outcome: &Result<BuildResult, BuildError>) {
    match outcome {
        Ok(result) => {
            println!("Rebuilt in {}", format_duration(result.total_duration));
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", e.result().summary());
        }
    }
}

/// Build once, then watch for changes and rebuild until interrupted.
///
/// A failed build is reported and watching continues; only watcher setup and
/// channel errors end the loop.
pub fn watch_and_rebuild(
    pipeline: &BuildPipeline,
    runner: &mut dyn CommandRunner,
) -> Result<(), WatchError> {
    let ctx = pipeline.context();
    let out_dir = ctx.out_dir();
    let watch_config = &ctx.config().watch;

    let paths = watch_paths(pipeline);
    if paths.is_empty() {
        return Err(WatchError::NothingToWatch);
    }

    let (tx, rx) = channel();
    let debounce_duration = Duration::from_millis(watch_config.debounce_ms as u64);
    let mut debouncer = new_debouncer(debounce_duration, tx).map_err(WatchError::WatcherInit)?;

    for watch in &paths {
        let mode =
            if watch.recursive { RecursiveMode::Recursive } else { RecursiveMode::NonRecursive };
        debouncer
            .watcher()
            .watch(&watch.path, mode)
            .map_err(|source| WatchError::WatchPath { path: watch.path.clone(), source })?;
        tracing::debug!(path = %watch.path.display(), "watching");
    }

    if watch_config.clear_screen {
        clear_screen();
    }
    println!("Building...");
    print_outcome(&pipeline.run(runner));
    println!("Watching {} paths for changes (Ctrl+C to stop)...", paths.len());

    let phases = rebuild_plan();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        matches!(e.kind, DebouncedEventKind::Any)
                            && is_relevant_change(&e.path, &out_dir, &paths)
                    })
                    .collect();

                if changed.is_empty() {
                    continue;
                }

                if watch_config.clear_screen {
                    clear_screen();
                }
                for event in &changed {
                    println!("Changed: {}", event.path.display());
                }

                println!("Rebuilding...");
                print_outcome(&pipeline.run_phases(&phases, runner));
                println!("Watching {} paths for changes...", paths.len());
            }
            Ok(Err(error)) => {
                // Non-fatal: report and keep watching
                tracing::warn!("watch error: {:?}", error);
            }
            Err(e) => {
                return Err(WatchError::ChannelError(e.to_string()));
            }
        }
    }
}
