use super::types::AnalysisReport;
use crate::error::{MetricsError, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Formats the report as pretty-printed JSON for machine consumption.
///
/// Every map in the report is ordered, so identical reports render to
/// identical bytes.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_json(report: &AnalysisReport) -> Result<String> {
    let mut out = serde_json::to_string_pretty(report).map_err(|source| MetricsError::Json {
        source,
        path: "<report>".into(),
    })?;
    out.push('\n');
    Ok(out)
}

/// Writes the JSON report to `path`, creating parent directories.
///
/// # Errors
/// Returns error if serialization or the write fails.
pub fn write_json(report: &AnalysisReport, path: &Path) -> Result<()> {
    let io_err = |source| MetricsError::Io {
        source,
        path: path.to_path_buf(),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, format_json(report)?).map_err(io_err)?;
    info!(path = %path.display(), "report written");
    Ok(())
}
