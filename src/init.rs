//! Project initialization for sitekit
//!
//! Writes a starter `site.toml` with the source directories and a first post.

use crate::config::{default_config_named, CONFIG_FILE};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error during project initialization
#[derive(Debug, Error)]
pub enum InitError {
    /// site.toml already present
    #[error("{} already exists", .0.display())]
    AlreadyInitialized(PathBuf),
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

const STARTER_POST: &str = "---
title: Hello, world
summary: The first post on this site.
cover:
  image: /images/cover.png
date: 2024-01-01
tags: [meta]
---

Welcome! Edit `posts/hello.md` and run `sitekit build`.
";

const STARTER_STYLES: &str = "@tailwind base;
@tailwind components;
@tailwind utilities;
";

const GITIGNORE: &str = "/out\n/dist\n/node_modules\n";

fn create_dir(path: &Path) -> Result<(), InitError> {
    fs::create_dir_all(path).map_err(|source| InitError::CreateDir { path: path.to_path_buf(), source })
}

/// Write `content` unless the file already exists.
fn write_new(path: &Path, content: &str) -> Result<bool, InitError> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, content)
        .map_err(|source| InitError::WriteFile { path: path.to_path_buf(), source })?;
    Ok(true)
}

/// Initialize a new site project in `path`.
///
/// Existing files other than `site.toml` are left untouched.
///
/// # Returns
/// The files that were created.
pub fn init_project(path: &Path, name: &str) -> Result<Vec<PathBuf>, InitError> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        return Err(InitError::AlreadyInitialized(config_path));
    }

    let config = default_config_named(name);
    for dir in [&config.site.posts, &config.site.drafts, &config.site.public] {
        create_dir(&path.join(dir))?;
    }

    let mut created = Vec::new();
    let files = [
        (config_path.clone(), toml::to_string_pretty(&config)?),
        (path.join(&config.site.posts).join("hello.md"), STARTER_POST.to_string()),
        (path.join(&config.styles.input), STARTER_STYLES.to_string()),
        (path.join(".gitignore"), GITIGNORE.to_string()),
    ];
    for (file, content) in files {
        if write_new(&file, &content)? {
            created.push(file);
        }
    }

    tracing::info!(path = %path.display(), files = created.len(), "initialized project");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_loadable_config() {
        let temp = TempDir::new().unwrap();
        let created = init_project(temp.path(), "my-blog").unwrap();

        assert_eq!(created.len(), 4);
        let config = load_config(Some(&temp.path().join(CONFIG_FILE))).unwrap();
        assert_eq!(config.project.name, "my-blog");
        assert!(temp.path().join("posts/hello.md").exists());
        assert!(temp.path().join("drafts").is_dir());
        assert!(temp.path().join("public").is_dir());
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "[project]\nname = \"x\"\n").unwrap();

        let result = init_project(temp.path(), "x");
        assert!(matches!(result, Err(InitError::AlreadyInitialized(_))));
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("styles.css"), "body{}").unwrap();

        let created = init_project(temp.path(), "x").unwrap();

        assert!(!created.contains(&temp.path().join("styles.css")));
        assert_eq!(fs::read_to_string(temp.path().join("styles.css")).unwrap(), "body{}");
    }

    #[test]
    fn test_starter_post_parses() {
        let (matter, _) = crate::site::post::parse_front_matter(STARTER_POST).unwrap();
        assert_eq!(matter.title, "Hello, world");
    }
}
