// src/analysis/redundancy.rs
//! Redundancy detection via Jaccard similarity over keyword sets.
//!
//! Each test is reduced to the set of distinct keywords it calls (call
//! multiplicity is ignored). Every unordered pair of tests is scored and the
//! pairs at or above the threshold are kept.

use super::union_find::UnionFind;
use super::{keyword_identity, round_to};
use crate::config::{AnalysisConfig, RedundancyScope};
use crate::model::{self, Suite, Test, TestRef};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Two tests whose keyword usage overlaps at or above the threshold.
///
/// `(suite1, test1)` is always the lexicographically smaller identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub test1: String,
    pub test2: String,
    pub similarity: f64,
    pub suite1: String,
    pub suite2: String,
}

impl SimilarityPair {
    #[must_use]
    pub fn first(&self) -> TestRef {
        TestRef::new(&self.suite1, &self.test1)
    }

    #[must_use]
    pub fn second(&self) -> TestRef {
        TestRef::new(&self.suite2, &self.test2)
    }
}

type KeywordSet<'a> = BTreeSet<Cow<'a, str>>;

struct Entry<'a> {
    id: TestRef,
    keywords: KeywordSet<'a>,
}

/// Tests sharing a keyword, by keyword. Postings are ascending entry indices.
struct PostingIndex<'a> {
    postings: HashMap<&'a str, Vec<usize>>,
}

impl<'a> PostingIndex<'a> {
    fn build(entries: &'a [Entry<'a>]) -> Self {
        let mut postings: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            for keyword in &entry.keywords {
                postings.entry(keyword.as_ref()).or_default().push(i);
            }
        }
        Self { postings }
    }

    /// Indices `j > i` of entries sharing at least one keyword with entry `i`.
    fn partners(&self, entries: &[Entry<'_>], i: usize) -> BTreeSet<usize> {
        let mut found = BTreeSet::new();
        for keyword in &entries[i].keywords {
            if let Some(list) = self.postings.get(keyword.as_ref()) {
                let start = list.partition_point(|&j| j <= i);
                found.extend(&list[start..]);
            }
        }
        found
    }
}

/// Finds all test pairs with similarity `>= config.similarity_threshold`.
///
/// Pairs come out ordered by `(first identifier, second identifier)`.
#[must_use]
pub fn detect(suites: &[Suite], config: &AnalysisConfig) -> Vec<SimilarityPair> {
    let mut entries: Vec<Entry<'_>> = model::iter_tests(suites)
        .map(|(id, test)| Entry {
            id,
            keywords: keyword_set(test, config.normalize_keywords),
        })
        .collect();
    entries.sort_by(|a, b| a.id.cmp(&b.id));

    // Disjoint pairs score 0 and can only qualify at a zero threshold.
    let index = (config.similarity_threshold > 0.0).then(|| PostingIndex::build(&entries));

    let scan = |i: usize| -> Vec<SimilarityPair> {
        let candidates: Vec<usize> = match &index {
            Some(index) => index.partners(&entries, i).into_iter().collect(),
            None => (i + 1..entries.len()).collect(),
        };
        candidates
            .into_iter()
            .filter_map(|j| compare(&entries[i], &entries[j], config))
            .collect()
    };

    let pairs: Vec<SimilarityPair> = if config.parallel {
        (0..entries.len()).into_par_iter().flat_map_iter(&scan).collect()
    } else {
        (0..entries.len()).flat_map(&scan).collect()
    };

    debug!(
        tests = entries.len(),
        pruned = index.is_some(),
        pairs = pairs.len(),
        "redundancy detection finished"
    );
    pairs
}

fn compare(a: &Entry<'_>, b: &Entry<'_>, config: &AnalysisConfig) -> Option<SimilarityPair> {
    if config.redundancy_scope == RedundancyScope::WithinSuite && a.id.suite != b.id.suite {
        return None;
    }
    let similarity = jaccard(&a.keywords, &b.keywords);
    if similarity < config.similarity_threshold {
        return None;
    }
    Some(SimilarityPair {
        test1: a.id.test.clone(),
        test2: b.id.test.clone(),
        similarity: round_to(similarity, config.precision),
        suite1: a.id.suite.clone(),
        suite2: b.id.suite.clone(),
    })
}

/// The distinct keywords a test calls.
#[must_use]
pub fn keyword_set(test: &Test, normalize: bool) -> BTreeSet<Cow<'_, str>> {
    test.steps()
        .iter()
        .map(|step| keyword_identity(step.keyword(), normalize))
        .collect()
}

/// `|a ∩ b| / |a ∪ b|`, defined as 0 when both sets are empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Groups tests connected through redundant pairs.
///
/// Members of each group are sorted; groups are ordered by their first member.
#[must_use]
pub fn clusters(pairs: &[SimilarityPair]) -> Vec<Vec<TestRef>> {
    let ids: BTreeSet<TestRef> = pairs
        .iter()
        .flat_map(|p| [p.first(), p.second()])
        .collect();
    let ids: Vec<TestRef> = ids.into_iter().collect();
    let position: HashMap<&TestRef, usize> = ids.iter().enumerate().map(|(i, id)| (id, i)).collect();

    let mut uf = UnionFind::new(ids.len());
    for pair in pairs {
        if let (Some(&a), Some(&b)) = (position.get(&pair.first()), position.get(&pair.second())) {
            uf.union(a, b);
        }
    }

    let mut groups: BTreeMap<usize, Vec<TestRef>> = BTreeMap::new();
    for (i, id) in ids.iter().enumerate() {
        groups.entry(uf.find(i)).or_default().push(id.clone());
    }

    let mut groups: Vec<Vec<TestRef>> = groups.into_values().collect();
    groups.sort();
    groups
}
