//! Removal of generated output directories.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error removing an output directory.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The target is the project root or one of its ancestors
    #[error("refusing to remove {}: it contains the project root", .path.display())]
    ContainsRoot { path: PathBuf },
}

/// What happened to each requested path.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    /// Paths that did not exist
    pub absent: Vec<PathBuf>,
}

impl CleanReport {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Recursively delete each path.
///
/// Absent paths are recorded in the report, not treated as errors, so running
/// this twice in a row succeeds both times and ends in the same state.
pub fn clean_dirs(paths: &[PathBuf]) -> Result<CleanReport, CleanError> {
    let mut report = CleanReport::default();

    for path in paths {
        if remove_path(path)? {
            tracing::info!(path = %path.display(), "removed");
            report.removed.push(path.clone());
        } else {
            tracing::debug!(path = %path.display(), "already absent");
            report.absent.push(path.clone());
        }
    }

    Ok(report)
}

/// Like [`clean_dirs`], but first refuses any target that would take `root`
/// with it. Nothing is removed when a target is refused.
pub fn clean_within(root: &Path, paths: &[PathBuf]) -> Result<CleanReport, CleanError> {
    let root = fs::canonicalize(root)
        .map_err(|source| CleanError::Remove { path: root.to_path_buf(), source })?;

    for path in paths {
        // Removing a symlink never touches what it points at
        let is_link = fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink());
        if is_link {
            continue;
        }
        if let Ok(target) = fs::canonicalize(path) {
            if root.starts_with(&target) {
                return Err(CleanError::ContainsRoot { path: path.clone() });
            }
        }
    }

    clean_dirs(paths)
}

/// Remove a directory tree or single file. Returns `false` when nothing was there.
fn remove_path(path: &Path) -> Result<bool, CleanError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(source) => return Err(CleanError::Remove { path: path.to_path_buf(), source }),
    };

    let result = if metadata.is_dir() { fs::remove_dir_all(path) } else { fs::remove_file(path) };

    match result {
        Ok(()) => Ok(true),
        // Lost a race with another remover; the end state is the same.
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(CleanError::Remove { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_nested_tree() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(out.join("posts/hello")).unwrap();
        fs::write(out.join("posts/hello/index.html"), "<html>").unwrap();

        let report = clean_dirs(&[out.clone()]).unwrap();
        assert!(!out.exists());
        assert_eq!(report.removed, vec![out]);
        assert!(report.absent.is_empty());
    }

    #[test]
    fn test_clean_absent_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let dist = temp.path().join("dist");

        let report = clean_dirs(&[dist.clone()]).unwrap();
        assert_eq!(report.removed_count(), 0);
        assert_eq!(report.absent, vec![dist]);
    }

    #[test]
    fn test_clean_twice_same_end_state() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let dist = temp.path().join("dist");
        fs::create_dir_all(&out).unwrap();

        let first = clean_dirs(&[out.clone(), dist.clone()]).unwrap();
        let second = clean_dirs(&[out.clone(), dist.clone()]).unwrap();

        assert_eq!(first.removed, vec![out.clone()]);
        assert_eq!(second.removed_count(), 0);
        assert_eq!(second.absent, vec![out.clone(), dist.clone()]);
        assert!(!out.exists() && !dist.exists());
    }

    #[test]
    fn test_clean_removes_plain_file() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        fs::write(&out, "not a directory").unwrap();

        let report = clean_dirs(&[out.clone()]).unwrap();
        assert_eq!(report.removed_count(), 1);
        assert!(!out.exists());
    }

    #[test]
    fn test_clean_within_refuses_project_root() {
        let temp = TempDir::new().unwrap();
        let posts = temp.path().join("posts");
        let out = temp.path().join("out");
        fs::create_dir_all(&posts).unwrap();
        fs::create_dir_all(&out).unwrap();

        let targets = vec![out.clone(), temp.path().to_path_buf()];
        let result = clean_within(temp.path(), &targets);

        assert!(matches!(result, Err(CleanError::ContainsRoot { .. })));
        assert!(posts.exists());
        assert!(out.exists());
    }

    #[test]
    fn test_clean_within_refuses_ancestor() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("site");
        fs::create_dir_all(&root).unwrap();

        let result = clean_within(&root, &[temp.path().to_path_buf()]);

        assert!(matches!(result, Err(CleanError::ContainsRoot { .. })));
        assert!(root.exists());
    }

    #[test]
    fn test_clean_within_removes_output() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(&out).unwrap();

        let report = clean_within(temp.path(), &[out.clone(), temp.path().join("dist")]).unwrap();
        assert_eq!(report.removed, vec![out]);
    }

    #[test]
    fn test_clean_leaves_siblings() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let posts = temp.path().join("posts");
        fs::create_dir_all(&out).unwrap();
        fs::create_dir_all(&posts).unwrap();

        clean_dirs(&[out]).unwrap();
        assert!(posts.exists());
    }
}
