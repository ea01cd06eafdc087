// src/report/assembler.rs
//! Composes analyzer outputs into an [`AnalysisReport`].
//!
//! Pure composition: values and ordering produced upstream are passed through
//! untouched. The only work done here is cross-checking that every output
//! refers to tests that exist in the model.

use super::types::{AnalysisReport, KeywordPatterns, Settings, SuiteOutline, Summary};
use crate::analysis::{ComplexityEntry, KeywordUsageIndex, SimilarityPair};
use crate::config::Config;
use crate::error::{MetricsError, Result};
use crate::model::{self, Suite, TestRef};
use std::collections::HashSet;

/// Outputs of the three analysis passes, ready for assembly.
#[derive(Debug, Clone, Default)]
pub struct Components {
    pub complexity: Vec<ComplexityEntry>,
    pub redundancy: Vec<SimilarityPair>,
    pub clusters: Vec<Vec<TestRef>>,
    pub usage: KeywordUsageIndex,
}

/// Assembles the final report.
///
/// # Errors
/// Returns [`MetricsError::InternalConsistency`] if any component references
/// a test missing from the model, or disagrees with it on counts. This
/// indicates a defect in an analyzer, never bad input.
pub fn assemble(suites: &[Suite], parts: Components, config: &Config) -> Result<AnalysisReport> {
    let known: HashSet<TestRef> = model::iter_tests(suites).map(|(id, _)| id).collect();
    let total_tests = model::total_tests(suites);
    if known.len() != total_tests {
        return Err(inconsistent(format!(
            "model has {total_tests} tests but only {} distinct identifiers",
            known.len()
        )));
    }

    check_complexity(&parts.complexity, &known, total_tests)?;
    check_redundancy(&parts.redundancy, &known)?;
    check_usage(&parts.usage, &known)?;
    for member in parts.clusters.iter().flatten() {
        ensure_known(&known, member, "redundancy cluster")?;
    }

    let analysis = &config.analysis;
    Ok(AnalysisReport {
        summary: Summary {
            total_suites: suites.len(),
            total_tests,
            total_keywords: parts.usage.len(),
        },
        settings: Settings {
            similarity_threshold: analysis.similarity_threshold,
            precision: analysis.precision,
            redundancy_scope: analysis.redundancy_scope,
            normalize_keywords: analysis.normalize_keywords,
        },
        keyword_patterns: KeywordPatterns {
            most_used: parts.usage.most_used(config.report.top_keywords),
            single_use: parts.usage.single_use(),
        },
        suite_structure: suites
            .iter()
            .map(|suite| SuiteOutline {
                suite: suite.name().to_string(),
                tests: suite.tests().iter().map(|t| t.name().to_string()).collect(),
            })
            .collect(),
        complexity_analysis: parts.complexity,
        redundancy_analysis: parts.redundancy,
        keyword_usage: parts.usage,
        redundancy_clusters: parts.clusters,
        rejected_suites: Vec::new(),
    })
}

fn check_complexity(
    entries: &[ComplexityEntry],
    known: &HashSet<TestRef>,
    total_tests: usize,
) -> Result<()> {
    if entries.len() != total_tests {
        return Err(inconsistent(format!(
            "{} complexity entries for {total_tests} tests",
            entries.len()
        )));
    }
    for entry in entries {
        ensure_known(known, &TestRef::new(&entry.suite, &entry.test), "complexity entry")?;
        if !entry.entropy_score.is_finite() || entry.entropy_score < 0.0 {
            return Err(inconsistent(format!(
                "entropy score {} for {}::{}",
                entry.entropy_score, entry.suite, entry.test
            )));
        }
    }
    Ok(())
}

fn check_redundancy(pairs: &[SimilarityPair], known: &HashSet<TestRef>) -> Result<()> {
    for pair in pairs {
        let (first, second) = (pair.first(), pair.second());
        ensure_known(known, &first, "similarity pair")?;
        ensure_known(known, &second, "similarity pair")?;
        if first >= second {
            return Err(inconsistent(format!(
                "similarity pair ({first}, {second}) is not strictly ordered"
            )));
        }
        if !(0.0..=1.0).contains(&pair.similarity) {
            return Err(inconsistent(format!(
                "similarity {} for ({first}, {second}) is outside [0, 1]",
                pair.similarity
            )));
        }
    }
    Ok(())
}

fn check_usage(usage: &KeywordUsageIndex, known: &HashSet<TestRef>) -> Result<()> {
    for (keyword, entry) in usage {
        if entry.tests.is_empty() || entry.count < entry.tests.len() {
            return Err(inconsistent(format!(
                "keyword '{keyword}' has {} calls across {} tests",
                entry.count,
                entry.tests.len()
            )));
        }
        for id in &entry.tests {
            ensure_known(known, id, "keyword usage")?;
        }
    }
    Ok(())
}

fn ensure_known(known: &HashSet<TestRef>, id: &TestRef, what: &str) -> Result<()> {
    if known.contains(id) {
        Ok(())
    } else {
        Err(inconsistent(format!("{what} references unknown test {id}")))
    }
}

fn inconsistent(message: String) -> MetricsError {
    MetricsError::InternalConsistency(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{build, StepRecord, SuiteRecord, TestRecord};

    fn suites() -> Vec<Suite> {
        build(vec![SuiteRecord {
            name: "S".into(),
            tests: vec![
                TestRecord { name: "a".into(), steps: vec![StepRecord::new("K")] },
                TestRecord { name: "b".into(), steps: vec![StepRecord::new("K")] },
            ],
        }])
        .unwrap()
    }

    fn entry(test: &str) -> ComplexityEntry {
        ComplexityEntry {
            test: test.into(),
            suite: "S".into(),
            entropy_score: 0.0,
            step_count: 1,
        }
    }

    fn pair(test1: &str, test2: &str) -> SimilarityPair {
        SimilarityPair {
            test1: test1.into(),
            test2: test2.into(),
            similarity: 1.0,
            suite1: "S".into(),
            suite2: "S".into(),
        }
    }

    #[test]
    fn test_assembles_consistent_parts() {
        let parts = Components {
            complexity: vec![entry("a"), entry("b")],
            redundancy: vec![pair("a", "b")],
            ..Components::default()
        };
        let report = assemble(&suites(), parts, &Config::default()).unwrap();
        assert_eq!(report.summary.total_suites, 1);
        assert_eq!(report.summary.total_tests, 2);
        assert_eq!(report.summary.total_keywords, 0);
        assert_eq!(report.suite_structure[0].tests, vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_test_in_pair_is_internal_error() {
        let parts = Components {
            complexity: vec![entry("a"), entry("b")],
            redundancy: vec![pair("a", "ghost")],
            ..Components::default()
        };
        let err = assemble(&suites(), parts, &Config::default()).unwrap_err();
        assert!(matches!(err, MetricsError::InternalConsistency(_)));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_reversed_pair_is_internal_error() {
        let parts = Components {
            complexity: vec![entry("a"), entry("b")],
            redundancy: vec![pair("b", "a")],
            ..Components::default()
        };
        assert!(assemble(&suites(), parts, &Config::default()).is_err());
    }

    #[test]
    fn test_missing_complexity_entry_is_internal_error() {
        let parts = Components {
            complexity: vec![entry("a")],
            ..Components::default()
        };
        assert!(matches!(
            assemble(&suites(), parts, &Config::default()),
            Err(MetricsError::InternalConsistency(_))
        ));
    }
}
