// src/report/mod.rs
//! Report assembly and rendering.

pub mod assembler;
pub mod json;
pub mod terminal;
pub mod types;

pub use assembler::{assemble, Components};
pub use json::{format_json, write_json};
pub use terminal::format_terminal;
pub use types::{
    AnalysisReport, KeywordPatterns, RejectedSuite, Settings, SuiteOutline, Summary,
};

use crate::analysis::{ComplexityEntry, SimilarityPair};
use std::cmp::Ordering;

/// Output format for the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// Complexity entries, most complex first. Ties fall back to step count,
/// then to the test identifier.
#[must_use]
pub fn ranked_complexity(report: &AnalysisReport) -> Vec<&ComplexityEntry> {
    let mut ranked: Vec<_> = report.complexity_analysis.iter().collect();
    ranked.sort_by(|a, b| {
        b.entropy_score
            .partial_cmp(&a.entropy_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.step_count.cmp(&a.step_count))
            .then_with(|| (&a.suite, &a.test).cmp(&(&b.suite, &b.test)))
    });
    ranked
}

/// Redundant pairs, most similar first. Ties keep identifier order.
#[must_use]
pub fn ranked_redundancy(report: &AnalysisReport) -> Vec<&SimilarityPair> {
    let mut ranked: Vec<_> = report.redundancy_analysis.iter().collect();
    // Stable sort: equal scores stay in identifier order.
    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}
