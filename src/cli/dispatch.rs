//! Routes parsed subcommands to their handlers.

use super::{
    args::{AnalyzeArgs, Commands},
    handlers::{handle_analyze, handle_config},
};
use crate::exit::RobometricsExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<RobometricsExit> {
    match command {
        Commands::Analyze {
            path,
            threshold,
            precision,
            within_suite,
            normalize_keywords,
            sequential,
            format,
            output,
            config,
            skip_malformed,
            verbose,
        } => handle_analyze(&AnalyzeArgs {
            path,
            threshold,
            precision,
            within_suite,
            normalize_keywords,
            sequential,
            format,
            output,
            config,
            skip_malformed,
            verbose,
        }),
        Commands::Config { config } => handle_config(config.as_deref()),
    }
}
