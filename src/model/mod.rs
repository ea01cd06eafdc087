// src/model/mod.rs
//! The in-memory structural model: suites, tests and steps.

pub mod builder;
pub mod types;

pub use builder::{build, build_lenient};
pub use types::{Step, StepRecord, Suite, SuiteRecord, Test, TestRecord, TestRef};

/// Total number of tests across all suites.
#[must_use]
pub fn total_tests(suites: &[Suite]) -> usize {
    suites.iter().map(|s| s.tests().len()).sum()
}

/// Iterates every test in suite-then-test order, paired with its identifier.
pub fn iter_tests(suites: &[Suite]) -> impl Iterator<Item = (TestRef, &Test)> + '_ {
    suites
        .iter()
        .flat_map(|suite| suite.tests().iter().map(move |test| (TestRef::of(suite, test), test)))
}
