use serde::{Deserialize, Serialize};

/// Which test pairs the redundancy detector compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedundancyScope {
    /// Every pair of tests in the collection.
    #[default]
    CrossSuite,
    /// Only pairs whose tests share a suite.
    WithinSuite,
}

/// Settings consumed by the analysis engine. Fixed for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,
    /// Decimal digits kept when rounding entropy and similarity scores.
    #[serde(default = "default_precision")]
    pub precision: u32,
    #[serde(default)]
    pub redundancy_scope: RedundancyScope,
    /// Compare keywords the way Robot Framework resolves them
    /// (case, spaces and underscores ignored).
    #[serde(default)]
    pub normalize_keywords: bool,
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_threshold(),
            precision: default_precision(),
            redundancy_scope: RedundancyScope::default(),
            normalize_keywords: false,
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: RedundancyScope) -> Self {
        self.redundancy_scope = scope;
        self
    }

    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Wraps the engine settings in a [`Config`] with default report settings.
    #[must_use]
    pub fn into_config(self) -> Config {
        Config {
            analysis: self,
            ..Config::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,
    #[serde(default = "default_top_tests")]
    pub top_tests: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_keywords: default_top_keywords(),
            top_tests: default_top_tests(),
        }
    }
}

/// Contents of `robometrics.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

const fn default_true() -> bool { true }
const fn default_threshold() -> f64 { 0.8 }
const fn default_precision() -> u32 { 2 }
const fn default_top_keywords() -> usize { 10 }
const fn default_top_tests() -> usize { 10 }
