// src/report/types.rs
//! The analysis report and its sections.
//!
//! Field names and nesting are the JSON contract consumed downstream:
//! `summary`, `complexity_analysis`, `redundancy_analysis` and
//! `keyword_usage` must keep their shape. The remaining sections are additive.

use crate::analysis::usage::KeywordCount;
use crate::analysis::{ComplexityEntry, KeywordUsageIndex, SimilarityPair};
use crate::config::RedundancyScope;
use crate::error::MetricsError;
use crate::model::TestRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub settings: Settings,
    pub complexity_analysis: Vec<ComplexityEntry>,
    pub redundancy_analysis: Vec<SimilarityPair>,
    pub keyword_usage: KeywordUsageIndex,
    pub keyword_patterns: KeywordPatterns,
    pub suite_structure: Vec<SuiteOutline>,
    pub redundancy_clusters: Vec<Vec<TestRef>>,
    /// Suites skipped as malformed in lenient runs. Empty otherwise.
    #[serde(default)]
    pub rejected_suites: Vec<RejectedSuite>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_suites: usize,
    pub total_tests: usize,
    pub total_keywords: usize,
}

/// The engine settings the report was produced with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub similarity_threshold: f64,
    pub precision: u32,
    pub redundancy_scope: RedundancyScope,
    pub normalize_keywords: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeywordPatterns {
    pub most_used: Vec<KeywordCount>,
    pub single_use: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteOutline {
    pub suite: String,
    pub tests: Vec<String>,
}

/// A suite left out of the analysis, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedSuite {
    /// Position of the suite among the loaded records.
    pub index: usize,
    pub suite: String,
    pub reason: String,
}

impl RejectedSuite {
    /// Extracts the rejection from a builder error. `None` for other errors.
    #[must_use]
    pub fn from_error(err: &MetricsError) -> Option<Self> {
        match err {
            MetricsError::MalformedInput {
                index,
                suite,
                problem,
            } => Some(Self {
                index: *index,
                suite: suite.clone(),
                reason: problem.to_string(),
            }),
            _ => None,
        }
    }
}
