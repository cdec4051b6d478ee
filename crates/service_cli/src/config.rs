//! Run configuration.
//!
//! Loaded from a TOML file. Every section and key is optional; absent keys
//! take the library defaults.
//!
//! ```toml
//! runs = 100
//! failure_policy = "skip"
//! log_level = "info"
//! threads = 8
//!
//! [countries]
//! start = 0
//! stop = 50
//!
//! [sampling]
//! sample_size = 1000
//! max_rejection_passes = 10000
//! bound_policy = "fail"
//!
//! [integrator]
//! bins = 100
//! ```

use burden_paf::{FailurePolicy, IntegratorConfig, MediationConfig};
use burden_sampling::SamplingConfig;
use serde::Deserialize;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// Configuration path used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "burden.toml";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Slice `start..stop` of the input country list; `stop` defaults to the end.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CountryRange {
    /// First country index.
    pub start: usize,
    /// One past the last country index.
    pub stop: Option<usize>,
}

impl CountryRange {
    /// Selects the configured countries, clamping `stop` to the list length.
    ///
    /// Returns `None` if the selection is empty.
    pub fn select<'a>(&self, countries: &'a [String]) -> Option<&'a [String]> {
        let stop = self.stop.unwrap_or(countries.len()).min(countries.len());
        if self.start >= stop {
            return None;
        }
        Some(&countries[self.start..stop])
    }
}

/// Configuration of a batch run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Exposure synthesis.
    pub sampling: SamplingConfig,
    /// Histogram resolution.
    pub integrator: IntegratorConfig,
    /// Mediation triples and derivative exemptions.
    pub mediation: MediationConfig,
    /// Countries processed.
    pub countries: CountryRange,
    /// Number of runs; runs `0..runs` are processed for every country.
    pub runs: u64,
    /// Skip or abort on a failed unit.
    pub failure_policy: FailurePolicy,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
    /// Worker threads; all cores when absent.
    pub threads: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            integrator: IntegratorConfig::default(),
            mediation: MediationConfig::default(),
            countries: CountryRange::default(),
            runs: 1,
            failure_policy: FailurePolicy::default(),
            log_level: "info".to_string(),
            threads: None,
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path`, or the defaults if `path` is the default location and
    /// does not exist.
    pub fn resolve(path: &str) -> Result<Self, ConfigError> {
        let file = Path::new(path);
        if !file.exists() {
            if path == DEFAULT_CONFIG_PATH {
                return Ok(Self::default());
            }
            return Err(ConfigError::Io(format!("{} does not exist", path)));
        }
        let config = Self::load(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.sampling.validate() {
            errors.push(e.to_string());
        }

        if self.integrator.bins < 2 {
            errors.push(format!("integrator.bins must be at least 2, got {}", self.integrator.bins));
        }

        if self.runs == 0 {
            errors.push("runs must be greater than 0".to_string());
        }

        if let Some(stop) = self.countries.stop {
            if stop <= self.countries.start {
                errors.push(format!(
                    "countries.stop ({}) must exceed countries.start ({})",
                    stop, self.countries.start
                ));
            }
        }

        if self.threads == Some(0) {
            errors.push("threads must be greater than 0".to_string());
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Run indices processed for each country.
    pub fn run_range(&self) -> Range<u64> {
        0..self.runs
    }

    /// Worker thread count.
    pub fn worker_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
