pub mod analysis;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod logging;
pub mod model;
pub mod parser;
pub mod report;

pub use analysis::{analyze, run};
pub use config::Config;
pub use error::{MetricsError, Result};
pub use report::AnalysisReport;
