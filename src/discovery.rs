// src/discovery.rs
use crate::error::{MetricsError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Directories never descended into.
pub const PRUNE_DIRS: &[&str] = &[
    ".git",
    "target",
    "node_modules",
    "__pycache__",
    ".venv",
    "results",
    "test_analysis_output",
];

/// Runs the suite file discovery pipeline.
///
/// A file path is returned as-is if it is a `.robot` or `.json` file. A
/// directory is walked for `*.robot` and `*.suite.json` files. Results are
/// sorted so runs over an unchanged tree see the same order.
///
/// # Errors
/// Returns error if `root` does not exist, or if it yields no suite files.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>> {
    let meta = std::fs::metadata(root).map_err(|source| MetricsError::Io {
        source,
        path: root.to_path_buf(),
    })?;

    let mut files = if meta.is_file() {
        if is_explicit_suite_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        }
    } else {
        walk_filesystem(root)
    };

    if files.is_empty() {
        return Err(MetricsError::NoSuites {
            root: root.to_path_buf(),
        });
    }

    files.sort();
    debug!(root = %root.display(), files = files.len(), "discovered suite files");
    Ok(files)
}

fn walk_filesystem(root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_prune(&e.file_name().to_string_lossy()));

    let (paths, error_count) = accumulate_walker(walker);
    if error_count > 0 {
        warn!("encountered {error_count} errors during file walk");
    }
    paths
}

fn accumulate_walker<I>(walker: I) -> (Vec<PathBuf>, usize)
where
    I: Iterator<Item = walkdir::Result<walkdir::DirEntry>>,
{
    let mut paths = Vec::new();
    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && is_suite_file(entry.path()) {
                    paths.push(entry.into_path());
                }
            }
            Err(e) => {
                let err = MetricsError::from(e);
                debug!(error = %err, "skipping unreadable entry");
                errors += 1;
            }
        }
    }
    (paths, errors)
}

fn should_prune(name: &str) -> bool {
    PRUNE_DIRS.contains(&name)
}

fn is_suite_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    name.ends_with(".robot") || name.ends_with(".suite.json")
}

fn is_explicit_suite_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("robot") || ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_walk_finds_suites_and_prunes() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("suites/nested")).unwrap();
        fs::create_dir_all(root.join("results")).unwrap();
        fs::write(root.join("suites/b.robot"), "").unwrap();
        fs::write(root.join("suites/nested/a.robot"), "").unwrap();
        fs::write(root.join("suites/cart.suite.json"), "[]").unwrap();
        fs::write(root.join("suites/package.json"), "{}").unwrap();
        fs::write(root.join("results/output.robot"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();

        let files = discover(root).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            names,
            vec!["suites/b.robot", "suites/cart.suite.json", "suites/nested/a.robot"]
        );
    }

    #[test]
    fn test_explicit_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("records.json");
        fs::write(&file, "[]").unwrap();
        assert_eq!(discover(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_empty_tree_is_no_suites() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            discover(dir.path()),
            Err(MetricsError::NoSuites { .. })
        ));
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            discover(&dir.path().join("missing")),
            Err(MetricsError::Io { .. })
        ));
    }
}
