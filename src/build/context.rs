//! Build context containing configuration and paths for a build.

use crate::clean::{clean_within, CleanError, CleanReport};
use crate::config::{resolve_path, SiteConfig};
use std::path::{Path, PathBuf};

/// Build context containing configuration and paths for a build operation.
///
/// Every relative path in `site.toml` is resolved against the project root
/// (the directory holding `site.toml`), never against the process cwd.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The loaded configuration
    config: SiteConfig,
    /// Project root directory (where site.toml is located)
    project_root: PathBuf,
}

impl BuildContext {
    /// Create a new build context.
    pub fn new(config: SiteConfig, project_root: PathBuf) -> Self {
        Self { config, project_root }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve a path relative to the project root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        resolve_path(&self.project_root, path)
    }

    /// Output directory (absolute).
    pub fn out_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.project.out)
    }

    /// Directories removed by the clean phase (absolute).
    pub fn clean_dirs(&self) -> Vec<PathBuf> {
        self.config.clean_targets().iter().map(|p| self.resolve_path(p)).collect()
    }

    /// Remove every clean target, refusing any that would take the project root.
    pub fn clean(&self) -> Result<CleanReport, CleanError> {
        clean_within(&self.project_root, &self.clean_dirs())
    }

    /// Source stylesheet.
    pub fn styles_input(&self) -> PathBuf {
        self.resolve_path(&self.config.styles.input)
    }

    /// Generated stylesheet inside the output directory.
    pub fn styles_output(&self) -> PathBuf {
        self.out_dir().join(&self.config.styles.output)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.site.public)
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.site.posts)
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.site.drafts)
    }
}
