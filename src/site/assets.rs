//! Source discovery and static asset copying.

use super::SiteError;
use glob::{glob, Pattern};
use std::fs;
use std::path::{Path, PathBuf};

/// All paths under `dir` matching `suffix_pattern` (e.g. `**/*.md`), sorted.
///
/// A missing directory yields an empty list.
pub fn discover(dir: &Path, suffix_pattern: &str) -> Result<Vec<PathBuf>, SiteError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let base = Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/{}", base, suffix_pattern);
    let paths = glob(&pattern)
        .map_err(|e| SiteError::InvalidPattern { pattern: pattern.clone(), reason: e.to_string() })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => tracing::warn!("error reading path: {}", e),
        }
    }

    files.sort();
    Ok(files)
}

/// Markdown sources under `dir`, recursively.
pub fn discover_markdown(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    discover(dir, "**/*.md")
}

/// Copy every file under `src` into `dst`, preserving relative layout.
///
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    let files = discover(src, "**/*")?;
    fs::create_dir_all(dst).map_err(|e| SiteError::io(dst, e))?;

    for file in &files {
        let relative = file.strip_prefix(src).map_err(|_| SiteError::InvalidPath(file.clone()))?;
        let target = dst.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
        }
        fs::copy(file, &target).map_err(|e| SiteError::io(file, e))?;
    }

    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_markdown_recursive_sorted() {
        let temp = TempDir::new().unwrap();
        let posts = temp.path().join("posts");
        fs::create_dir_all(posts.join("2024")).unwrap();
        fs::write(posts.join("b.md"), "").unwrap();
        fs::write(posts.join("a.md"), "").unwrap();
        fs::write(posts.join("2024/c.md"), "").unwrap();
        fs::write(posts.join("notes.txt"), "").unwrap();

        let found = discover_markdown(&posts).unwrap();
        assert_eq!(found, vec![posts.join("2024/c.md"), posts.join("a.md"), posts.join("b.md")]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let temp = TempDir::new().unwrap();
        assert!(discover_markdown(&temp.path().join("drafts")).unwrap().is_empty());
    }

    #[test]
    fn test_discover_dir_with_glob_chars() {
        let temp = TempDir::new().unwrap();
        let posts = temp.path().join("[posts]");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("a.md"), "").unwrap();
        assert_eq!(discover_markdown(&posts).unwrap().len(), 1);
    }

    #[test]
    fn test_copy_tree() {
        let temp = TempDir::new().unwrap();
        let public = temp.path().join("public");
        fs::create_dir_all(public.join("images")).unwrap();
        fs::write(public.join("favicon.ico"), "ico").unwrap();
        fs::write(public.join("images/cover.png"), "png").unwrap();

        let out = temp.path().join("out");
        let copied = copy_tree(&public, &out).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(out.join("favicon.ico")).unwrap(), "ico");
        assert_eq!(fs::read_to_string(out.join("images/cover.png")).unwrap(), "png");
    }
}
