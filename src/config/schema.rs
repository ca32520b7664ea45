//! Configuration schema types for `site.toml`
//!
//! Defines the structure and validation rules for a sitekit project.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Engine used to produce the output stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StyleEngine {
    /// External Tailwind CLI
    #[default]
    Tailwind,
    /// In-process parse and print with lightningcss
    Lightningcss,
}

impl std::fmt::Display for StyleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleEngine::Tailwind => write!(f, "tailwind"),
            StyleEngine::Lightningcss => write!(f, "lightningcss"),
        }
    }
}

impl std::str::FromStr for StyleEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tailwind" => Ok(StyleEngine::Tailwind),
            "lightningcss" => Ok(StyleEngine::Lightningcss),
            other => Err(format!("unknown style engine '{}' (expected tailwind or lightningcss)", other)),
        }
    }
}

/// Project metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
    /// Build output directory
    #[serde(default = "default_out")]
    pub out: PathBuf,
    /// Extra disposable directories removed by `clean` (e.g. `dist`)
    #[serde(default)]
    pub clean_extra: Vec<PathBuf>,
}

fn default_out() -> PathBuf {
    PathBuf::from("out")
}

/// Dependency installation step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_install_command")]
    pub command: Vec<String>,
}

fn default_install_command() -> Vec<String> {
    vec!["npm".to_string(), "install".to_string()]
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self { enabled: true, command: default_install_command() }
    }
}

/// Stylesheet generation step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylesConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub engine: StyleEngine,
    /// Source stylesheet, relative to the project root
    #[serde(default = "default_styles_file")]
    pub input: PathBuf,
    /// Output stylesheet, relative to the output directory
    #[serde(default = "default_styles_file")]
    pub output: PathBuf,
    #[serde(default)]
    pub minify: bool,
    /// Tailwind invocation (input/output/minify flags are appended)
    #[serde(default = "default_tailwind_command")]
    pub command: Vec<String>,
}

fn default_styles_file() -> PathBuf {
    PathBuf::from("styles.css")
}

fn default_tailwind_command() -> Vec<String> {
    vec!["npx".to_string(), "tailwindcss".to_string()]
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            engine: StyleEngine::default(),
            input: default_styles_file(),
            output: default_styles_file(),
            minify: false,
            command: default_tailwind_command(),
        }
    }
}

/// Primary program run as the last build phase
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProgramConfig {
    /// External command; empty runs the built-in site generator
    #[serde(default)]
    pub command: Vec<String>,
}

impl ProgramConfig {
    /// Whether the built-in generator handles the generate phase.
    pub fn is_builtin(&self) -> bool {
        self.command.is_empty()
    }
}

/// Site generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    /// Absolute origin prepended to post paths (no trailing slash)
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Prefix for page titles
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_drafts_description")]
    pub drafts_description: String,
    /// Static files copied verbatim into the output directory
    #[serde(default = "default_public")]
    pub public: PathBuf,
    #[serde(default = "default_posts")]
    pub posts: PathBuf,
    #[serde(default = "default_drafts")]
    pub drafts: PathBuf,
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

fn default_origin() -> String {
    "https://example.com".to_string()
}

fn default_title() -> String {
    "blog".to_string()
}

fn default_description() -> String {
    "Notes and articles".to_string()
}

fn default_drafts_description() -> String {
    "Currently unfinished drafts".to_string()
}

fn default_public() -> PathBuf {
    PathBuf::from("public")
}

fn default_posts() -> PathBuf {
    PathBuf::from("posts")
}

fn default_drafts() -> PathBuf {
    PathBuf::from("drafts")
}

fn default_words_per_minute() -> u32 {
    200
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            title: default_title(),
            description: default_description(),
            drafts_description: default_drafts_description(),
            public: default_public(),
            posts: default_posts(),
            drafts: default_drafts(),
            words_per_minute: default_words_per_minute(),
        }
    }
}

/// Formatter invocations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatSection {
    #[serde(default = "default_rust_formatter")]
    pub rust: Vec<String>,
    #[serde(default = "default_web_formatter")]
    pub web: Vec<String>,
    /// Glob patterns handed to the web formatter
    #[serde(default = "default_web_patterns")]
    pub web_patterns: Vec<String>,
}

fn default_rust_formatter() -> Vec<String> {
    vec!["cargo".to_string(), "fmt".to_string()]
}

fn default_web_formatter() -> Vec<String> {
    vec!["npx".to_string(), "prettier".to_string()]
}

fn default_web_patterns() -> Vec<String> {
    vec!["**/*.{html,js,css,json,md}".to_string()]
}

impl Default for FormatSection {
    fn default() -> Self {
        Self {
            rust: default_rust_formatter(),
            web: default_web_formatter(),
            web_patterns: default_web_patterns(),
        }
    }
}

/// Watch mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce delay in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    /// Clear terminal between rebuilds
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

fn default_debounce_ms() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 100, clear_screen: true }
    }
}

/// Complete site.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Project metadata (required)
    pub project: ProjectConfig,
    #[serde(default)]
    pub install: InstallConfig,
    #[serde(default)]
    pub styles: StylesConfig,
    #[serde(default)]
    pub program: ProgramConfig,
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub format: FormatSection,
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "styles.command")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "site.toml: '{}' {}", self.field, self.message)
    }
}

/// Whether `path` is safe to delete recursively during a clean.
///
/// Rejects paths that resolve to the project root or above it: `""`, `"."`,
/// `"./"`, `"/"` and anything with a `..` component.
pub fn is_disposable_dir(path: &Path) -> bool {
    let mut has_name = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => has_name = true,
            Component::ParentDir => return false,
            _ => {}
        }
    }
    has_name
}

impl SiteConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: &str| {
            errors.push(ConfigValidationError {
                field: field.to_string(),
                message: message.to_string(),
            });
        };

        if self.project.name.is_empty() {
            push("project.name", "must be a non-empty string");
        }

        if !is_disposable_dir(&self.project.out) {
            push("project.out", "must name a dedicated directory inside the project");
        }
        for (i, extra) in self.project.clean_extra.iter().enumerate() {
            if !is_disposable_dir(extra) {
                push(
                    &format!("project.clean_extra[{}]", i),
                    "must name a dedicated directory inside the project",
                );
            }
        }

        if self.install.enabled && self.install.command.is_empty() {
            push("install.command", "must not be empty when install is enabled");
        }

        if self.styles.enabled {
            if self.styles.input.as_os_str().is_empty() {
                push("styles.input", "must be a non-empty path");
            }
            if self.styles.output.as_os_str().is_empty() {
                push("styles.output", "must be a non-empty path");
            }
            if self.styles.engine == StyleEngine::Tailwind && self.styles.command.is_empty() {
                push("styles.command", "must not be empty for the tailwind engine");
            }
        }

        if self.site.words_per_minute == 0 {
            push("site.words_per_minute", "must be a positive integer");
        }

        if self.format.rust.is_empty() {
            push("format.rust", "must not be empty");
        }
        if self.format.web.is_empty() {
            push("format.web", "must not be empty");
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Every directory `clean` removes, output directory first.
    pub fn clean_targets(&self) -> Vec<PathBuf> {
        let mut targets = vec![self.project.out.clone()];
        for extra in &self.project.clean_extra {
            if !targets.contains(extra) {
                targets.push(extra.clone());
            }
        }
        targets
    }
}
