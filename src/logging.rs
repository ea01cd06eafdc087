//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding per-module log directives.
pub const LOG_ENV: &str = "ROBOMETRICS_LOG";

/// Initialize logging to stderr.
///
/// Reads `ROBOMETRICS_LOG` for directives, e.g.
/// `ROBOMETRICS_LOG=robometrics_core::analysis=debug`. Falls back to `info`
/// for this crate, or `debug` when `verbose` is set.
///
/// Calling it more than once is a no-op.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            "robometrics_core=debug"
        } else {
            "robometrics_core=info"
        };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose),
            )
            .with(filter)
            .init();
    });
}
