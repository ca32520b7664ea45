//! Build driver integration tests
//!
//! Exercises the build, clean and format tasks end to end against a
//! temporary project, with external tools replaced by a recording runner.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use sitekit::build::{BuildContext, BuildPipeline, BuildStatus, Phase};
use sitekit::clean::CleanError;
use sitekit::config::{
    apply_cli_overrides, default_config_named, load_config, CliOverrides, ConfigError, SiteConfig,
    StyleEngine, CONFIG_FILE,
};
use sitekit::exec::RecordingRunner;
use sitekit::format::{format, FormatTarget};

// ============================================================================
// Test Utilities
// ============================================================================

fn write_file(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_project(config: SiteConfig) -> (TempDir, BuildContext) {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "posts/first.md",
        "---\ntitle: First\nsummary: The first post\ncover:\n  image: /first.png\ndate: 2024-02-01\ntags: [intro]\n---\nHello *world*\n",
    );
    write_file(temp.path(), "styles.css", "body { color: #ff0000; }\n");
    let ctx = BuildContext::new(config, temp.path().to_path_buf());
    (temp, ctx)
}

// ============================================================================
// Build
// ============================================================================

#[test]
fn test_build_removes_stale_output_first() {
    let (temp, ctx) = create_project(default_config_named("blog"));
    write_file(temp.path(), "out/stale.html", "old");

    let mut runner = RecordingRunner::new();
    let result = BuildPipeline::new(ctx).run(&mut runner).unwrap();

    assert!(result.is_success());
    assert_eq!(result.phases[0].phase, Phase::Clean);
    assert!(!temp.path().join("out/stale.html").exists());
    assert!(temp.path().join("out/posts/first/index.html").exists());
    assert!(temp.path().join("out/blog/index.html").exists());
}

#[test]
fn test_build_runs_install_before_styles() {
    let (_temp, ctx) = create_project(default_config_named("blog"));
    let mut runner = RecordingRunner::new();

    BuildPipeline::new(ctx).run(&mut runner).unwrap();

    let lines = runner.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "npm install");
    assert!(lines[1].starts_with("npx tailwindcss -i "));
}

#[test]
fn test_build_halts_when_install_fails() {
    let (temp, ctx) = create_project(default_config_named("blog"));
    let mut runner = RecordingRunner::new().fail_on("npm");

    let err = BuildPipeline::new(ctx).run(&mut runner).unwrap_err();

    assert_eq!(err.phase(), Phase::Install);
    assert_eq!(runner.calls.len(), 1);
    assert!(!temp.path().join("out/blog").exists());
}

#[test]
fn test_build_halts_when_stylesheet_fails() {
    let (temp, ctx) = create_project(default_config_named("blog"));
    let mut runner = RecordingRunner::new().fail_on("tailwindcss");

    let err = BuildPipeline::new(ctx).run(&mut runner).unwrap_err();

    assert_eq!(err.phase(), Phase::Styles);
    assert!(!temp.path().join("out/posts").exists());
}

#[test]
fn test_build_with_lightningcss_writes_minified_stylesheet() {
    let mut config = default_config_named("blog");
    config.install.enabled = false;
    config.styles.engine = StyleEngine::Lightningcss;
    config.styles.minify = true;
    let (temp, ctx) = create_project(config);
    let mut runner = RecordingRunner::new();

    BuildPipeline::new(ctx).run(&mut runner).unwrap();

    assert!(runner.calls.is_empty());
    let css = fs::read_to_string(temp.path().join("out/styles.css")).unwrap();
    assert!(css.contains("color:red"));
    assert!(!css.contains(' '));
}

#[test]
fn test_build_with_external_program() {
    let mut config = default_config_named("blog");
    config.program.command = vec!["cargo".to_string(), "run".to_string()];
    let (temp, ctx) = create_project(config);
    let mut runner = RecordingRunner::new();

    BuildPipeline::new(ctx).run(&mut runner).unwrap();

    assert_eq!(runner.lines().last().map(String::as_str), Some("cargo run"));
    assert_eq!(runner.calls.last().unwrap().cwd.as_deref(), Some(temp.path()));
    assert!(!temp.path().join("out/blog").exists());
}

#[test]
fn test_build_halts_when_external_program_fails() {
    let mut config = default_config_named("blog");
    config.program.command = vec!["cargo".to_string(), "run".to_string()];
    let (_temp, ctx) = create_project(config);
    let mut runner = RecordingRunner::new().fail_on("cargo");

    let err = BuildPipeline::new(ctx).run(&mut runner).unwrap_err();

    assert_eq!(err.phase(), Phase::Generate);
    let last = err.result().phases.last().unwrap();
    assert_eq!(last.phase, Phase::Generate);
    assert!(matches!(last.status, BuildStatus::Failed(_)));
    assert!(err.result().summary().starts_with("Build failed"));
}

#[test]
fn test_disabled_styles_phase_is_skipped() {
    let mut config = default_config_named("blog");
    config.styles.enabled = false;
    let (temp, ctx) = create_project(config);
    let mut runner = RecordingRunner::new();

    let result = BuildPipeline::new(ctx).run(&mut runner).unwrap();

    let styles = result.phases.iter().find(|p| p.phase == Phase::Styles).unwrap();
    assert_eq!(styles.status, BuildStatus::Skipped);
    assert_eq!(runner.lines(), vec!["npm install"]);
    assert!(!temp.path().join("out/styles.css").exists());
    assert!(temp.path().join("out/blog/index.html").exists());
}

#[test]
fn test_dry_run_plan_as_json() {
    let mut config = default_config_named("blog");
    config.install.enabled = false;
    config.project.clean_extra = vec!["dist".into()];
    let (temp, ctx) = create_project(config);

    let plan = BuildPipeline::new(ctx).with_dry_run(true).describe();
    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["project"], "blog");
    assert_eq!(json["out"], temp.path().join("out").to_str().unwrap());
    assert_eq!(json["clean"].as_array().unwrap().len(), 2);
    assert_eq!(
        json["phases"],
        serde_json::json!([
            { "phase": "clean", "enabled": true },
            { "phase": "install", "enabled": false },
            { "phase": "styles", "enabled": true },
            { "phase": "generate", "enabled": true },
        ])
    );
}

#[test]
fn test_dry_run_touches_nothing() {
    let (temp, ctx) = create_project(default_config_named("blog"));
    write_file(temp.path(), "out/keep.html", "keep");
    let mut runner = RecordingRunner::new();

    let result = BuildPipeline::new(ctx).with_dry_run(true).run(&mut runner).unwrap();

    assert_eq!(result.skipped_count(), 4);
    assert!(runner.calls.is_empty());
    assert!(temp.path().join("out/keep.html").exists());
}

// ============================================================================
// Clean
// ============================================================================

#[test]
fn test_clean_twice_is_idempotent() {
    let mut config = default_config_named("blog");
    config.project.clean_extra = vec!["dist".into()];
    let (temp, ctx) = create_project(config);
    write_file(temp.path(), "out/index.html", "x");
    write_file(temp.path(), "dist/bundle.js", "x");

    let first = ctx.clean().unwrap();
    let second = ctx.clean().unwrap();

    assert_eq!(first.removed_count(), 2);
    assert_eq!(second.removed_count(), 0);
    assert_eq!(second.absent.len(), 2);
    assert!(!temp.path().join("out").exists());
    assert!(!temp.path().join("dist").exists());
    assert!(temp.path().join("posts/first.md").exists());
}

#[test]
fn test_out_override_cannot_target_project_root() {
    let (temp, _ctx) = create_project(default_config_named("blog"));
    let mut config = default_config_named("blog");

    let overrides = CliOverrides { out: Some(".".into()), ..Default::default() };
    let result = apply_cli_overrides(&mut config, &overrides);

    assert!(matches!(result, Err(ConfigError::Validation(_))));
    assert!(temp.path().join("posts/first.md").exists());
}

#[test]
fn test_clean_extra_project_root_rejected_in_config() {
    let (temp, _ctx) = create_project(default_config_named("blog"));
    write_file(temp.path(), CONFIG_FILE, "[project]\nname = \"blog\"\nclean_extra = [\".\"]\n");

    let result = load_config(Some(&temp.path().join(CONFIG_FILE)));

    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn test_clean_refuses_absolute_project_root() {
    let mut config = default_config_named("blog");
    let (temp, _) = create_project(default_config_named("blog"));
    config.project.clean_extra = vec![temp.path().to_path_buf()];
    let ctx = BuildContext::new(config, temp.path().to_path_buf());
    let mut runner = RecordingRunner::new();

    assert!(matches!(ctx.clean(), Err(CleanError::ContainsRoot { .. })));
    let err = BuildPipeline::new(ctx).run(&mut runner).unwrap_err();

    assert_eq!(err.phase(), Phase::Clean);
    assert!(runner.calls.is_empty());
    assert!(temp.path().join("posts/first.md").exists());
}

// ============================================================================
// Format
// ============================================================================

#[test]
fn test_format_runs_both_formatters() {
    let (_temp, ctx) = create_project(default_config_named("blog"));
    let mut runner = RecordingRunner::new();

    let done = format(&ctx, &FormatTarget::ALL, false, &mut runner).unwrap();

    assert_eq!(done, vec![FormatTarget::Rust, FormatTarget::Web]);
    let lines = runner.lines();
    assert_eq!(lines[0], "cargo fmt");
    assert!(lines[1].starts_with("npx prettier --write"));
}

#[test]
fn test_format_failure_does_not_block_other_formatter() {
    let (_temp, ctx) = create_project(default_config_named("blog"));
    let mut runner = RecordingRunner::new().fail_on("cargo");

    let err = format(&ctx, &FormatTarget::ALL, false, &mut runner).unwrap_err();

    assert_eq!(runner.calls.len(), 2);
    assert_eq!(err.failures.len(), 1);
    assert_eq!(err.failures[0].0, FormatTarget::Rust);
}

#[test]
fn test_format_single_target() {
    let (_temp, ctx) = create_project(default_config_named("blog"));
    let mut runner = RecordingRunner::new();

    format(&ctx, &[FormatTarget::Web], true, &mut runner).unwrap();

    assert_eq!(runner.calls.len(), 1);
    assert!(runner.lines()[0].starts_with("npx prettier --check"));
}
