// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Malformed input in suite #{index} ('{suite}'): {problem}")]
    MalformedInput {
        index: usize,
        suite: String,
        problem: Malformation,
    },

    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Parse error in {path} at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid suite JSON in {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No test suites found under {root}")]
    NoSuites { root: PathBuf },
}

/// What exactly was wrong with a rejected suite record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformation {
    #[error("suite name is empty")]
    EmptySuiteName,

    #[error("another suite with this name was already loaded")]
    DuplicateSuite,

    #[error("test #{position} has an empty name")]
    EmptyTestName { position: usize },

    #[error("test '{test}' is defined more than once")]
    DuplicateTest { test: String },

    #[error("step #{step} of test '{test}' has an empty keyword")]
    EmptyKeyword { test: String, step: usize },
}

impl MetricsError {
    /// True for errors caused by the input rather than by the tool itself.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. }
                | Self::Parse { .. }
                | Self::Json { .. }
                | Self::Config(_)
                | Self::NoSuites { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MetricsError>;

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for MetricsError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map_or_else(|| PathBuf::from("<unknown>"), PathBuf::from);
        let source = e
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        MetricsError::Io { source, path }
    }
}

impl From<toml::de::Error> for MetricsError {
    fn from(e: toml::de::Error) -> Self {
        MetricsError::Config(e.to_string())
    }
}
