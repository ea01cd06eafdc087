// src/model/builder.rs
//! Turns parser records into validated model entities.

use super::types::{Step, StepRecord, Suite, SuiteRecord, Test, TestRecord};
use crate::error::{Malformation, MetricsError, Result};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Builds the structural model, failing on the first malformed suite.
///
/// Suites, tests and steps keep their input order.
///
/// # Errors
/// Returns [`MetricsError::MalformedInput`] if a suite name is empty or
/// repeated, a test name is empty or repeated within its suite, or a keyword
/// name is empty.
pub fn build(records: Vec<SuiteRecord>) -> Result<Vec<Suite>> {
    let mut names = HashSet::with_capacity(records.len());
    let suites = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| build_suite(index, record, &mut names))
        .collect::<Result<Vec<_>>>()?;

    debug!(suites = suites.len(), "built structural model");
    Ok(suites)
}

/// Builds the structural model, skipping malformed suites.
///
/// Every rejected suite is returned alongside the accepted ones so the caller
/// can report which suite failed and why.
#[must_use]
pub fn build_lenient(records: Vec<SuiteRecord>) -> (Vec<Suite>, Vec<MetricsError>) {
    let mut names = HashSet::with_capacity(records.len());
    let mut suites = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match build_suite(index, record, &mut names) {
            Ok(suite) => suites.push(suite),
            Err(e) => {
                warn!(error = %e, "skipping malformed suite");
                rejected.push(e);
            }
        }
    }

    debug!(
        suites = suites.len(),
        rejected = rejected.len(),
        "built structural model (lenient)"
    );
    (suites, rejected)
}

/// Validates one suite. `names` holds the suites accepted so far; a suite is
/// only added to it once fully valid.
fn build_suite(index: usize, record: SuiteRecord, names: &mut HashSet<String>) -> Result<Suite> {
    let SuiteRecord { name, tests } = record;
    let malformed = |problem| MetricsError::MalformedInput {
        index,
        suite: name.clone(),
        problem,
    };

    if name.trim().is_empty() {
        return Err(malformed(Malformation::EmptySuiteName));
    }
    // Suite names qualify test identifiers across the collection.
    if names.contains(&name) {
        return Err(malformed(Malformation::DuplicateSuite));
    }

    let mut seen = HashSet::with_capacity(tests.len());
    let mut built = Vec::with_capacity(tests.len());

    for (position, test) in tests.into_iter().enumerate() {
        if test.name.trim().is_empty() {
            return Err(malformed(Malformation::EmptyTestName { position }));
        }
        // Case-sensitive: "Login" and "login" are distinct tests.
        if !seen.insert(test.name.clone()) {
            return Err(malformed(Malformation::DuplicateTest { test: test.name }));
        }
        built.push(build_test(test).map_err(malformed)?);
    }

    names.insert(name.clone());
    Ok(Suite::new(name, built))
}

fn build_test(record: TestRecord) -> std::result::Result<Test, Malformation> {
    let TestRecord { name, steps } = record;

    let steps = steps
        .into_iter()
        .enumerate()
        .map(|(step, StepRecord { keyword, args })| {
            if keyword.trim().is_empty() {
                Err(Malformation::EmptyKeyword {
                    test: name.clone(),
                    step,
                })
            } else {
                Ok(Step::new(keyword, args))
            }
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Test::new(name, steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite(name: &str, tests: Vec<TestRecord>) -> SuiteRecord {
        SuiteRecord {
            name: name.to_string(),
            tests,
        }
    }

    fn test(name: &str, keywords: &[&str]) -> TestRecord {
        TestRecord {
            name: name.to_string(),
            steps: keywords.iter().map(|k| StepRecord::new(*k)).collect(),
        }
    }

    #[test]
    fn test_preserves_order() {
        let records = vec![
            suite("B", vec![test("z", &["K2", "K1"]), test("a", &[])]),
            suite("A", vec![test("m", &["K3"])]),
        ];
        let suites = build(records).unwrap();

        let names: Vec<_> = suites.iter().map(Suite::name).collect();
        assert_eq!(names, vec!["B", "A"]);

        let tests: Vec<_> = suites[0].tests().iter().map(Test::name).collect();
        assert_eq!(tests, vec!["z", "a"]);

        let keywords: Vec<_> = suites[0].tests()[0]
            .steps()
            .iter()
            .map(Step::keyword)
            .collect();
        assert_eq!(keywords, vec!["K2", "K1"]);
    }

    #[test]
    fn test_keeps_arguments_verbatim() {
        let records = vec![suite(
            "S",
            vec![TestRecord {
                name: "t".into(),
                steps: vec![StepRecord::with_args("Input Text", ["id=user", "${USER}"])],
            }],
        )];
        let suites = build(records).unwrap();
        let step = &suites[0].tests()[0].steps()[0];
        assert_eq!(step.args(), ["id=user", "${USER}"]);
    }

    #[test]
    fn test_rejects_empty_suite_name() {
        let err = build(vec![suite("  ", vec![])]).unwrap_err();
        assert!(matches!(
            err,
            MetricsError::MalformedInput {
                index: 0,
                problem: Malformation::EmptySuiteName,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_duplicate_test_names() {
        let records = vec![suite("S", vec![test("t", &["A"]), test("t", &["B"])])];
        let err = build(records).unwrap_err();
        match err {
            MetricsError::MalformedInput { suite, problem, .. } => {
                assert_eq!(suite, "S");
                assert_eq!(problem, Malformation::DuplicateTest { test: "t".into() });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_test_names_are_case_sensitive() {
        let records = vec![suite("S", vec![test("Login", &["A"]), test("login", &["B"])])];
        assert!(build(records).is_ok());
    }

    #[test]
    fn test_rejects_empty_keyword() {
        let records = vec![suite("S", vec![test("t", &["A", ""])])];
        let err = build(records).unwrap_err();
        assert!(matches!(
            err,
            MetricsError::MalformedInput {
                problem: Malformation::EmptyKeyword { step: 1, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_test_name() {
        let records = vec![suite("S", vec![test("ok", &[]), test("", &[])])];
        let err = build(records).unwrap_err();
        assert!(matches!(
            err,
            MetricsError::MalformedInput {
                problem: Malformation::EmptyTestName { position: 1 },
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_duplicate_suite_names() {
        let records = vec![suite("S", vec![]), suite("S", vec![test("t", &[])])];
        let err = build(records).unwrap_err();
        assert!(matches!(
            err,
            MetricsError::MalformedInput {
                index: 1,
                problem: Malformation::DuplicateSuite,
                ..
            }
        ));
    }

    #[test]
    fn test_lenient_skips_only_bad_suites() {
        let records = vec![
            suite("Good", vec![test("t", &["A"])]),
            suite("Bad", vec![test("t", &["A"]), test("t", &["A"])]),
            suite("Also Good", vec![]),
        ];
        let (suites, rejected) = build_lenient(records);
        assert_eq!(suites.len(), 2);
        assert_eq!(rejected.len(), 1);
        assert!(rejected[0].to_string().contains("'Bad'"));
    }

    #[test]
    fn test_empty_collection_is_valid() {
        assert!(build(Vec::new()).unwrap().is_empty());
    }
}
