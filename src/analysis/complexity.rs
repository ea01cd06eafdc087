// src/analysis/complexity.rs
//! Entropy-based complexity scoring.
//!
//! A test's score is the Shannon entropy (base 2) of the distribution of
//! keywords over its steps. Repeating one keyword carries no information and
//! scores 0; `n` distinct keywords score `log2(n)`.

use super::{keyword_identity, round_to};
use crate::config::AnalysisConfig;
use crate::model::{self, Suite, Test};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complexity of a single test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityEntry {
    pub test: String,
    pub suite: String,
    pub entropy_score: f64,
    pub step_count: usize,
}

/// Scores every test, in suite-then-test order.
#[must_use]
pub fn score_all(suites: &[Suite], config: &AnalysisConfig) -> Vec<ComplexityEntry> {
    model::iter_tests(suites)
        .map(|(id, test)| ComplexityEntry {
            entropy_score: round_to(entropy(test, config.normalize_keywords), config.precision),
            step_count: test.step_count(),
            test: id.test,
            suite: id.suite,
        })
        .collect()
}

/// Unrounded Shannon entropy of the test's keyword distribution.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn entropy(test: &Test, normalize: bool) -> f64 {
    let total = test.step_count();
    if total == 0 {
        return 0.0;
    }

    // Ordered map: the summation order must not depend on hashing.
    let mut counts: BTreeMap<_, usize> = BTreeMap::new();
    for step in test.steps() {
        *counts
            .entry(keyword_identity(step.keyword(), normalize))
            .or_default() += 1;
    }

    let total = total as f64;
    counts.values().fold(0.0, |h, &count| {
        let p = count as f64 / total;
        h - p * p.log2()
    })
}
