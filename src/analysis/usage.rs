// src/analysis/usage.rs
//! Keyword usage aggregation across the whole collection.

use super::keyword_identity;
use crate::config::AnalysisConfig;
use crate::model::{self, Suite, TestRef};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

/// How often one keyword is called, and by which tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordUsage {
    pub count: usize,
    pub tests: BTreeSet<TestRef>,
}

/// Keyword name to usage, ordered by keyword name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordUsageIndex {
    keywords: BTreeMap<String, KeywordUsage>,
}

/// A keyword with its invocation count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

impl KeywordUsageIndex {
    /// Number of distinct keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&KeywordUsage> {
        self.keywords.get(keyword)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, KeywordUsage> {
        self.keywords.iter()
    }

    /// Total invocations across all keywords.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.keywords.values().map(|u| u.count).sum()
    }

    /// The `n` most called keywords, ties broken by name.
    #[must_use]
    pub fn most_used(&self, n: usize) -> Vec<KeywordCount> {
        let mut ranked: Vec<_> = self.keywords.iter().collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(n)
            .map(|(keyword, usage)| KeywordCount {
                keyword: keyword.clone(),
                count: usage.count,
            })
            .collect()
    }

    /// Keywords called exactly once in the whole collection.
    #[must_use]
    pub fn single_use(&self) -> Vec<String> {
        self.keywords
            .iter()
            .filter(|(_, usage)| usage.count == 1)
            .map(|(keyword, _)| keyword.clone())
            .collect()
    }
}

impl<'a> IntoIterator for &'a KeywordUsageIndex {
    type Item = (&'a String, &'a KeywordUsage);
    type IntoIter = btree_map::Iter<'a, String, KeywordUsage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Tallies every step of every test in one pass.
#[must_use]
pub fn aggregate(suites: &[Suite], config: &AnalysisConfig) -> KeywordUsageIndex {
    let mut keywords: BTreeMap<String, KeywordUsage> = BTreeMap::new();

    for (id, test) in model::iter_tests(suites) {
        for step in test.steps() {
            let key = keyword_identity(step.keyword(), config.normalize_keywords);
            let usage = keywords.entry(key.into_owned()).or_default();
            usage.count += 1;
            if !usage.tests.contains(&id) {
                usage.tests.insert(id.clone());
            }
        }
    }

    KeywordUsageIndex { keywords }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{build, StepRecord, SuiteRecord, TestRecord};

    fn suites() -> Vec<Suite> {
        let test = |name: &str, keywords: &[&str]| TestRecord {
            name: name.into(),
            steps: keywords.iter().map(|k| StepRecord::new(*k)).collect(),
        };
        build(vec![
            SuiteRecord {
                name: "Login".into(),
                tests: vec![
                    test("a", &["Open", "Type", "Type", "Submit"]),
                    test("b", &["Open", "Submit"]),
                ],
            },
            SuiteRecord {
                name: "Cart".into(),
                tests: vec![test("c", &["Open", "Add"]), test("empty", &[])],
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_counts_and_membership() {
        let index = aggregate(&suites(), &AnalysisConfig::default());
        assert_eq!(index.len(), 4);

        let open = index.get("Open").unwrap();
        assert_eq!(open.count, 3);
        assert_eq!(open.tests.len(), 3);

        let typed = index.get("Type").unwrap();
        assert_eq!(typed.count, 2);
        assert_eq!(
            typed.tests.iter().collect::<Vec<_>>(),
            vec![&TestRef::new("Login", "a")]
        );
    }

    #[test]
    fn test_count_equals_sum_of_per_test_occurrences() {
        let suites = suites();
        let index = aggregate(&suites, &AnalysisConfig::default());
        for (keyword, usage) in &index {
            let expected: usize = model::iter_tests(&suites)
                .map(|(_, t)| t.steps().iter().filter(|s| s.keyword() == keyword).count())
                .sum();
            assert_eq!(usage.count, expected, "keyword {keyword}");
        }
        assert_eq!(index.total_calls(), 8);
    }

    #[test]
    fn test_empty_collection_yields_empty_index() {
        let index = aggregate(&[], &AnalysisConfig::default());
        assert!(index.is_empty());
        assert!(index.most_used(10).is_empty());
    }

    #[test]
    fn test_most_used_and_single_use() {
        let index = aggregate(&suites(), &AnalysisConfig::default());
        let top: Vec<_> = index
            .most_used(2)
            .into_iter()
            .map(|k| (k.keyword, k.count))
            .collect();
        assert_eq!(top, vec![("Open".to_string(), 3), ("Submit".to_string(), 2)]);
        assert_eq!(index.single_use(), vec!["Add".to_string()]);
    }
}
