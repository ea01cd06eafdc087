// src/model/types.rs
//! Structural model of a suite collection.
//!
//! Two layers live here: the loose *records* handed over by a suite-file
//! parser, and the validated [`Suite`] / [`Test`] / [`Step`] entities the
//! analyzers read. Entities are only constructed by the builder and expose
//! read-only accessors.

use serde::{Deserialize, Serialize};

/// A suite as produced by an external parser, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteRecord {
    pub name: String,
    #[serde(default)]
    pub tests: Vec<TestRecord>,
}

/// A test as produced by an external parser, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
}

/// One keyword call as produced by an external parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub keyword: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl StepRecord {
    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args<I, S>(keyword: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keyword: keyword.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// A validated, immutable suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    name: String,
    tests: Vec<Test>,
}

impl Suite {
    pub(crate) fn new(name: String, tests: Vec<Test>) -> Self {
        Self { name, tests }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tests(&self) -> &[Test] {
        &self.tests
    }
}

/// A validated test. May have zero steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Test {
    name: String,
    steps: Vec<Step>,
}

impl Test {
    pub(crate) fn new(name: String, steps: Vec<Step>) -> Self {
        Self { name, steps }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

/// A single keyword invocation. Arguments are carried but never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    keyword: String,
    args: Vec<String>,
}

impl Step {
    pub(crate) fn new(keyword: String, args: Vec<String>) -> Self {
        Self { keyword, args }
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Identifies a test across the whole collection.
///
/// Ordering is lexicographic by suite name, then test name. Every
/// deterministic ordering in the report is derived from this.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TestRef {
    pub suite: String,
    pub test: String,
}

impl TestRef {
    #[must_use]
    pub fn new(suite: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            test: test.into(),
        }
    }

    #[must_use]
    pub fn of(suite: &Suite, test: &Test) -> Self {
        Self::new(suite.name(), test.name())
    }
}

impl std::fmt::Display for TestRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.suite, self.test)
    }
}
