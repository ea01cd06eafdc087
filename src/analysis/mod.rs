// src/analysis/mod.rs
//! Analysis engine for keyword-driven test suites.
//!
//! Three independent passes read the same immutable model:
//! - **Complexity**: Shannon entropy of each test's keyword distribution
//! - **Redundancy**: Jaccard similarity between the keyword sets of test pairs
//! - **Usage**: Per-keyword call counts and the tests calling them
//!
//! Their outputs are joined by [`crate::report::assemble`].

pub mod complexity;
pub mod redundancy;
pub mod union_find;
pub mod usage;

pub use complexity::ComplexityEntry;
pub use redundancy::SimilarityPair;
pub use usage::{KeywordUsage, KeywordUsageIndex};

use crate::config::Config;
use crate::error::Result;
use crate::model::{self, Suite, SuiteRecord};
use crate::report::{self, AnalysisReport, Components, RejectedSuite};
use std::borrow::Cow;
use std::time::Instant;
use tracing::info;

/// Builds the model from parser records and analyzes it.
///
/// # Errors
/// Returns error if the records are malformed, the configuration is out of
/// range, or the assembled report is internally inconsistent.
pub fn run(records: Vec<SuiteRecord>, config: &Config) -> Result<AnalysisReport> {
    let suites = model::build(records)?;
    analyze(&suites, config)
}

/// Like [`run`], but malformed suites are skipped instead of failing the run.
///
/// Each skipped suite is listed in the report's `rejected_suites`.
///
/// # Errors
/// Returns error if the configuration is out of range or the assembled
/// report is internally inconsistent.
pub fn run_lenient(records: Vec<SuiteRecord>, config: &Config) -> Result<AnalysisReport> {
    let (suites, rejected) = model::build_lenient(records);
    let mut report = analyze(&suites, config)?;
    report.rejected_suites = rejected.iter().filter_map(RejectedSuite::from_error).collect();
    Ok(report)
}

/// Analyzes an already-built model.
///
/// # Errors
/// Returns error if the configuration is out of range or the assembled
/// report is internally inconsistent.
pub fn analyze(suites: &[Suite], config: &Config) -> Result<AnalysisReport> {
    config.validate()?;
    let start = Instant::now();
    let settings = &config.analysis;

    let (complexity, (redundancy, usage)) = if settings.parallel {
        rayon::join(
            || complexity::score_all(suites, settings),
            || {
                rayon::join(
                    || redundancy::detect(suites, settings),
                    || usage::aggregate(suites, settings),
                )
            },
        )
    } else {
        (
            complexity::score_all(suites, settings),
            (
                redundancy::detect(suites, settings),
                usage::aggregate(suites, settings),
            ),
        )
    };
    let clusters = redundancy::clusters(&redundancy);

    let report = report::assemble(
        suites,
        Components {
            complexity,
            redundancy,
            clusters,
            usage,
        },
        config,
    )?;

    info!(
        suites = report.summary.total_suites,
        tests = report.summary.total_tests,
        keywords = report.summary.total_keywords,
        redundant_pairs = report.redundancy_analysis.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(report)
}

/// The identity a keyword is compared by.
///
/// Without normalization this is the name itself. With it, case, spaces and
/// underscores are ignored, matching how Robot Framework resolves keywords.
/// A name made only of ignored characters keeps its raw form.
#[must_use]
pub fn keyword_identity(keyword: &str, normalize: bool) -> Cow<'_, str> {
    if !normalize {
        return Cow::Borrowed(keyword);
    }
    let normalized: String = keyword
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect();
    if normalized.is_empty() {
        Cow::Borrowed(keyword)
    } else {
        Cow::Owned(normalized)
    }
}

/// Rounds half away from zero to `precision` decimal digits.
#[must_use]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = (0..precision).fold(1.0_f64, |f, _| f * 10.0);
    let rounded = (value * factor).round() / factor;
    // Collapse -0.0 so serialized output never shows a signed zero.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
