// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::types::{AnalysisConfig, Config, RedundancyScope, ReportConfig};
use crate::error::{MetricsError, Result};

/// Name of the project-local configuration file.
pub const CONFIG_FILE: &str = "robometrics.toml";

/// Upper bound for rounding precision; beyond this f64 rounding is noise.
pub const MAX_PRECISION: u32 = 10;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns [`MetricsError::Config`] if a value is out of range.
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()
    }

    /// Parses TOML content on top of the defaults.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or a value is out of range.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MetricsError::Config(e.to_string()))
    }
}

impl AnalysisConfig {
    /// Validates the engine settings.
    ///
    /// # Errors
    /// Returns [`MetricsError::Config`] if the threshold is outside `[0, 1]`
    /// or the precision exceeds [`MAX_PRECISION`].
    pub fn validate(&self) -> Result<()> {
        let t = self.similarity_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(MetricsError::Config(format!(
                "similarity_threshold must be within [0, 1], got {t}"
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(MetricsError::Config(format!(
                "precision must be at most {MAX_PRECISION}, got {}",
                self.precision
            )));
        }
        Ok(())
    }
}
