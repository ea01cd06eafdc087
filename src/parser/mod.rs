// src/parser/mod.rs
//! Loading suite files into parser records.
//!
//! Two on-disk forms are accepted:
//! - `.robot` plain-text suites, read by [`robot::parse`]
//! - `.json` files holding one suite record or an array of them

pub mod robot;

use crate::error::{MetricsError, Result};
use crate::model::SuiteRecord;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum SuiteFile {
    Many(Vec<SuiteRecord>),
    One(SuiteRecord),
}

/// Loads every suite record from `path`, naming a `.robot` suite after the
/// file alone.
///
/// # Errors
/// Returns error if the file cannot be read or is not a valid suite file.
pub fn load_file(path: &Path) -> Result<Vec<SuiteRecord>> {
    read_suites(path, &suite_name(path))
}

/// Loads all files in order, concatenating their records.
///
/// `.robot` suites are named by their path below `root`, so
/// `api/smoke.robot` and `ui/smoke.robot` become `Api.Smoke` and `Ui.Smoke`.
///
/// # Errors
/// Returns the first load error encountered.
pub fn load_all(root: &Path, paths: &[PathBuf]) -> Result<Vec<SuiteRecord>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(read_suites(path, &qualified_suite_name(root, path))?);
    }
    Ok(records)
}

fn read_suites(path: &Path, name: &str) -> Result<Vec<SuiteRecord>> {
    let content = fs::read_to_string(path).map_err(|source| MetricsError::Io {
        source,
        path: path.to_path_buf(),
    })?;

    let records = if is_json(path) {
        parse_json(&content, path)?
    } else {
        robot::parse(&content, name, path)?.into_iter().collect()
    };

    debug!(path = %path.display(), suites = records.len(), "loaded suite file");
    Ok(records)
}

/// Parses JSON suite records.
///
/// # Errors
/// Returns [`MetricsError::Json`] if the content is not a suite record or an
/// array of suite records.
pub fn parse_json(content: &str, path: &Path) -> Result<Vec<SuiteRecord>> {
    let file: SuiteFile = serde_json::from_str(content).map_err(|source| MetricsError::Json {
        source,
        path: path.to_path_buf(),
    })?;
    Ok(match file {
        SuiteFile::Many(records) => records,
        SuiteFile::One(record) => vec![record],
    })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Derives a suite name from a file name the way Robot Framework does.
///
/// `01__user_login.robot` becomes `User Login`: a numeric ordering prefix is
/// dropped, underscores become spaces, and all-lowercase names are
/// title-cased.
#[must_use]
pub fn suite_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    display_name(&stem)
}

/// Suite name qualified by the directories between `root` and `path`,
/// joined with `.` as Robot Framework names nested suites.
///
/// Falls back to [`suite_name`] when `path` is not below `root`.
#[must_use]
pub fn qualified_suite_name(root: &Path, path: &Path) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return suite_name(path);
    };

    let mut parts: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| match c {
            Component::Normal(dir) => Some(display_name(&dir.to_string_lossy())),
            _ => None,
        })
        .filter(|name| !name.is_empty())
        .collect();
    parts.push(suite_name(path));
    parts.join(".")
}

fn display_name(raw: &str) -> String {
    let raw = match raw.split_once("__") {
        Some((prefix, rest)) if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) => {
            rest
        }
        _ => raw,
    };

    let spaced = raw.replace('_', " ");
    let spaced = spaced.trim();
    if spaced.chars().any(char::is_uppercase) {
        return spaced.to_string();
    }

    spaced
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
