// src/exit.rs
//! Standardized process exit codes for `robometrics`.
//!
//! Provides a stable contract for scripts and automation.

use crate::error::MetricsError;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum RobometricsExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, serialization).
    Error = 1,
    /// Input validation failed (malformed suites, parse errors, bad config, nothing found).
    InvalidInput = 2,
    /// An analyzer produced inconsistent output. Always a bug.
    InternalError = 3,
}

impl RobometricsExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for a failed run.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<MetricsError>() {
            Some(MetricsError::InternalConsistency(_)) => Self::InternalError,
            Some(e) if e.is_input_error() => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for RobometricsExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
