// tests/integration_pipeline.rs
//! End-to-end tests of the analysis engine over in-memory suite records.

use robometrics_core::config::{AnalysisConfig, Config};
use robometrics_core::error::MetricsError;
use robometrics_core::model::{self, StepRecord, SuiteRecord, TestRecord};
use robometrics_core::report;

// --- Helpers ---

fn test(name: &str, keywords: &[&str]) -> TestRecord {
    TestRecord {
        name: name.to_string(),
        steps: keywords.iter().map(|k| StepRecord::new(*k)).collect(),
    }
}

fn suite(name: &str, tests: Vec<TestRecord>) -> SuiteRecord {
    SuiteRecord {
        name: name.to_string(),
        tests,
    }
}

fn collection() -> Vec<SuiteRecord> {
    vec![
        suite(
            "Login",
            vec![
                test("test_login", &["OpenBrowser", "EnterCreds", "Submit"]),
                test(
                    "test_login_with_sso",
                    &["OpenBrowser", "EnterCreds", "ClickSSO", "Submit"],
                ),
                test("test_repeated_clicks", &["Click", "Click", "Click", "Verify"]),
            ],
        ),
        suite(
            "Checkout",
            vec![
                test("test_pay", &["OpenBrowser", "AddItem", "Pay"]),
                test("test_pay_again", &["Pay", "AddItem", "OpenBrowser", "Pay"]),
                test("test_placeholder", &[]),
            ],
        ),
    ]
}

fn with_threshold(threshold: f64) -> Config {
    AnalysisConfig::default()
        .with_threshold(threshold)
        .into_config()
}

// --- Scenarios ---

#[test]
fn test_full_report_shape() {
    let report = robometrics_core::run(collection(), &Config::default()).unwrap();

    assert_eq!(report.summary.total_suites, 2);
    assert_eq!(report.summary.total_tests, 6);
    assert_eq!(report.summary.total_keywords, 8);
    assert_eq!(report.complexity_analysis.len(), 6);

    // Model order, not score order.
    let first = &report.complexity_analysis[0];
    assert_eq!((first.suite.as_str(), first.test.as_str()), ("Login", "test_login"));

    let clicks = &report.complexity_analysis[2];
    assert_eq!(clicks.step_count, 4);
    assert!((clicks.entropy_score - 0.81).abs() < 1e-9);

    let placeholder = &report.complexity_analysis[5];
    assert_eq!(placeholder.step_count, 0);
    assert!(placeholder.entropy_score.abs() < f64::EPSILON);
}

#[test]
fn test_login_pair_depends_on_threshold() {
    let strict = robometrics_core::run(collection(), &with_threshold(0.8)).unwrap();
    assert!(!strict
        .redundancy_analysis
        .iter()
        .any(|p| p.test1 == "test_login" && p.test2 == "test_login_with_sso"));

    let loose = robometrics_core::run(collection(), &with_threshold(0.7)).unwrap();
    let pair = loose
        .redundancy_analysis
        .iter()
        .find(|p| p.test1 == "test_login" && p.test2 == "test_login_with_sso")
        .unwrap();
    assert!((pair.similarity - 0.75).abs() < f64::EPSILON);
}

#[test]
fn test_identical_keyword_sets_are_fully_redundant() {
    let report = robometrics_core::run(collection(), &Config::default()).unwrap();
    let pair = report
        .redundancy_analysis
        .iter()
        .find(|p| p.suite1 == "Checkout" && p.test1 == "test_pay")
        .unwrap();
    assert_eq!(pair.test2, "test_pay_again");
    assert!((pair.similarity - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_raising_threshold_never_adds_pairs() {
    let mut previous: Option<Vec<(String, String, String, String)>> = None;
    for step in 0..=10 {
        let threshold = f64::from(step) / 10.0;
        let report = robometrics_core::run(collection(), &with_threshold(threshold)).unwrap();
        let current: Vec<_> = report
            .redundancy_analysis
            .iter()
            .map(|p| {
                (
                    p.suite1.clone(),
                    p.test1.clone(),
                    p.suite2.clone(),
                    p.test2.clone(),
                )
            })
            .collect();
        if let Some(prev) = &previous {
            assert!(
                current.iter().all(|pair| prev.contains(pair)),
                "threshold {threshold} added a pair"
            );
        }
        previous = Some(current);
    }
}

#[test]
fn test_zero_threshold_reports_every_pair() {
    let report = robometrics_core::run(collection(), &with_threshold(0.0)).unwrap();
    // 6 tests -> 15 unordered pairs, including the empty placeholder.
    assert_eq!(report.redundancy_analysis.len(), 15);
}

#[test]
fn test_usage_counts_match_step_occurrences() {
    let report = robometrics_core::run(collection(), &Config::default()).unwrap();
    let suites = model::build(collection()).unwrap();

    for (keyword, usage) in &report.keyword_usage {
        let expected: usize = model::iter_tests(&suites)
            .map(|(_, t)| t.steps().iter().filter(|s| s.keyword() == keyword).count())
            .sum();
        assert_eq!(usage.count, expected, "keyword {keyword}");
    }

    let open = report.keyword_usage.get("OpenBrowser").unwrap();
    assert_eq!(open.count, 4);
    assert_eq!(open.tests.len(), 4);
    assert_eq!(report.keyword_patterns.most_used[0].keyword, "OpenBrowser");
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let first = report::format_json(&robometrics_core::run(collection(), &Config::default()).unwrap())
        .unwrap();
    let second =
        report::format_json(&robometrics_core::run(collection(), &Config::default()).unwrap())
            .unwrap();
    assert_eq!(first, second);

    let sequential = AnalysisConfig::default().sequential().into_config();
    let third =
        report::format_json(&robometrics_core::run(collection(), &sequential).unwrap()).unwrap();
    assert_eq!(first, third);
}

#[test]
fn test_input_order_does_not_change_pairs() {
    let mut reversed = collection();
    reversed.reverse();
    for record in &mut reversed {
        record.tests.reverse();
    }
    let a = robometrics_core::run(collection(), &with_threshold(0.5)).unwrap();
    let b = robometrics_core::run(reversed, &with_threshold(0.5)).unwrap();
    assert_eq!(a.redundancy_analysis, b.redundancy_analysis);
    assert_eq!(a.keyword_usage, b.keyword_usage);
}

#[test]
fn test_malformed_input_fails_whole_run() {
    let mut records = collection();
    records[1].tests.push(test("test_pay", &["Pay"]));

    let err = robometrics_core::run(records, &Config::default()).unwrap_err();
    assert!(matches!(err, MetricsError::MalformedInput { index: 1, .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_invalid_threshold_is_config_error() {
    let err = robometrics_core::run(collection(), &with_threshold(2.0)).unwrap_err();
    assert!(matches!(err, MetricsError::Config(_)));
}

#[test]
fn test_empty_collection() {
    let report = robometrics_core::run(Vec::new(), &Config::default()).unwrap();
    assert_eq!(report.summary.total_suites, 0);
    assert!(report.complexity_analysis.is_empty());
    assert!(report.redundancy_analysis.is_empty());
    assert!(report.keyword_usage.is_empty());
}
