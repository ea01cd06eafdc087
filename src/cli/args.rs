use crate::report::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "robometrics",
    version,
    about = "Complexity, redundancy and keyword usage metrics for Robot Framework suites"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a suite file or a directory of suites
    Analyze {
        /// `.robot` / `.json` file or directory to walk
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
        /// Minimum Jaccard similarity for a pair to be reported
        #[arg(long, short)]
        threshold: Option<f64>,
        /// Decimal digits kept in scores
        #[arg(long)]
        precision: Option<u32>,
        /// Only compare tests that share a suite
        #[arg(long)]
        within_suite: bool,
        /// Ignore case, spaces and underscores in keyword names
        #[arg(long)]
        normalize_keywords: bool,
        /// Run the analyzers on the current thread
        #[arg(long)]
        sequential: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
        format: OutputFormat,
        /// Also write the JSON report to this file
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Configuration file (defaults to ./robometrics.toml)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Skip malformed suites instead of failing
        #[arg(long)]
        skip_malformed: bool,
        #[arg(long, short)]
        verbose: bool,
    },
    /// Print the effective configuration as TOML
    Config {
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

/// Arguments for the analyze command (used by handlers)
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    pub path: PathBuf,
    pub threshold: Option<f64>,
    pub precision: Option<u32>,
    pub within_suite: bool,
    pub normalize_keywords: bool,
    pub sequential: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub skip_malformed: bool,
    pub verbose: bool,
}
