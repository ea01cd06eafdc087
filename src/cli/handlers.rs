// src/cli/handlers.rs
use crate::analysis;
use crate::cli::args::AnalyzeArgs;
use crate::config::{self, Config, RedundancyScope};
use crate::discovery;
use crate::exit::RobometricsExit;
use crate::logging;
use crate::parser;
use crate::report::{self, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tracing::{info, warn};

/// Handles the analyze command.
///
/// # Errors
/// Returns error if discovery, loading, building or analysis fails.
pub fn handle_analyze(args: &AnalyzeArgs) -> Result<RobometricsExit> {
    logging::init_tracing(args.verbose);

    let config = effective_config(args)?;
    let files = discovery::discover(&args.path)?;
    let records = parser::load_all(&args.path, &files)?;
    info!(files = files.len(), suites = records.len(), "suites loaded");

    let report = if args.skip_malformed {
        analysis::run_lenient(records, &config)?
    } else {
        analysis::run(records, &config)?
    };
    if !report.rejected_suites.is_empty() {
        warn!(
            skipped = report.rejected_suites.len(),
            "malformed suites skipped"
        );
    }

    match args.format {
        OutputFormat::Json => print!("{}", report::format_json(&report)?),
        OutputFormat::Terminal => {
            print!("{}", report::format_terminal(&report, config.report.top_tests));
        }
    }

    if let Some(path) = &args.output {
        report::write_json(&report, path)?;
        if args.format == OutputFormat::Terminal {
            println!("{} {}", "📄 Report written to".green(), path.display());
        }
    }

    Ok(RobometricsExit::Success)
}

/// Handles the config command.
///
/// # Errors
/// Returns error if the configuration cannot be loaded or rendered.
pub fn handle_config(explicit: Option<&Path>) -> Result<RobometricsExit> {
    let config = config::io::load(explicit)?;
    print!("{}", config.to_toml()?);
    Ok(RobometricsExit::Success)
}

/// Loads the configuration file and applies command line overrides.
///
/// # Errors
/// Returns error if the file is invalid or an override is out of range.
pub fn effective_config(args: &AnalyzeArgs) -> Result<Config> {
    let mut config = config::io::load(args.config.as_deref())?;
    let analysis = &mut config.analysis;

    if let Some(threshold) = args.threshold {
        analysis.similarity_threshold = threshold;
    }
    if let Some(precision) = args.precision {
        analysis.precision = precision;
    }
    if args.within_suite {
        analysis.redundancy_scope = RedundancyScope::WithinSuite;
    }
    analysis.normalize_keywords |= args.normalize_keywords;
    if args.sequential {
        analysis.parallel = false;
    }

    config.validate()?;
    Ok(config)
}
