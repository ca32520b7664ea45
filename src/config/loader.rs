//! Configuration loading and discovery for `site.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{
    FormatSection, InstallConfig, ProgramConfig, ProjectConfig, SiteConfig, SiteSection,
    StyleEngine, StylesConfig, WatchConfig,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "site.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse site.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Force stylesheet minification on
    pub minify: Option<bool>,
    /// Skip the dependency installation phase
    pub skip_install: bool,
    /// Override stylesheet engine
    pub engine: Option<StyleEngine>,
}

/// Find site.toml by walking up from the current working directory.
///
/// # Returns
/// - `Some(path)` if a site.toml file is found
/// - `None` if no config file is found
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find site.toml by walking up from a specific directory.
///
/// This is the internal implementation that allows specifying the start directory,
/// useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a site.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns a default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("blog/site.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SiteConfig = toml::from_str(&contents)?;
    check_config(&config)?;

    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Create a default configuration when no site.toml is found.
///
/// The project name is taken from the current directory name.
pub fn default_config() -> SiteConfig {
    let project_name = env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "site".to_string());

    default_config_named(&project_name)
}

/// Default configuration with an explicit project name.
pub fn default_config_named(name: &str) -> SiteConfig {
    SiteConfig {
        project: ProjectConfig {
            name: name.to_string(),
            out: PathBuf::from("out"),
            clean_extra: Vec::new(),
        },
        install: InstallConfig::default(),
        styles: StylesConfig::default(),
        program: ProgramConfig::default(),
        site: SiteSection::default(),
        format: FormatSection::default(),
        watch: WatchConfig::default(),
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut SiteConfig, overrides: &CliOverrides) {
    if let Some(ref out) = overrides.out {
        config.project.out = out.clone();
    }

    if let Some(minify) = overrides.minify {
        config.styles.minify = minify;
    }

    if overrides.skip_install {
        config.install.enabled = false;
    }

    if let Some(engine) = overrides.engine {
        config.styles.engine = engine;
    }
}

/// Validate a configuration, collecting every problem into one error.
pub fn check_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// Merge CLI overrides, then validate the result.
///
/// Overrides are held to the same rules as the file, so `--out .` is
/// rejected just like `out = "."`.
pub fn apply_cli_overrides(
    config: &mut SiteConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    merge_cli_overrides(config, overrides);
    check_config(config)
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
