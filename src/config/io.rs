// src/config/io.rs
//! Locating and reading `robometrics.toml`.

use super::{Config, CONFIG_FILE};
use crate::error::{MetricsError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads configuration.
///
/// An explicit path must exist. Without one, `robometrics.toml` in the
/// current directory is used when present, otherwise defaults apply.
///
/// # Errors
/// Returns error if the file cannot be read, is not valid TOML, or holds
/// out-of-range values.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_file(path),
        None => {
            let local = Path::new(CONFIG_FILE);
            if local.is_file() {
                load_file(local)
            } else {
                debug!("no {CONFIG_FILE} found, using defaults");
                Ok(Config::new())
            }
        }
    }
}

/// Loads and validates a specific configuration file.
///
/// # Errors
/// Returns error if the file cannot be read or parsed.
pub fn load_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|source| MetricsError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    let config = Config::parse_toml(&content)
        .map_err(|e| MetricsError::Config(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
