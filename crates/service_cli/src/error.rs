//! CLI error types.

use burden_core::types::LookupError;
use burden_models::calibration::CalibrationError;
use burden_models::distributions::DistributionError;
use burden_models::projection::ProjectionError;
use burden_paf::UnitError;
use burden_sampling::SamplingError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type.
///
/// # Variants
/// - `FileNotFound`: An input or configuration path does not exist
/// - `InvalidArgument`: A command-line argument is inconsistent
/// - `Config`: The TOML configuration failed to load or validate
/// - `Json`: An input bundle could not be parsed or a result written
/// - `Lookup`: A name in the input bundle is not in the registry
/// - `Calibration`: A cell could not be calibrated
/// - `Distribution`: Ensemble weights are invalid
/// - `Projection`: A demand projection failed
/// - `Sampling`: The sampling configuration is invalid
/// - `Unit`: A (country, run) unit failed under the abort policy
/// - `ThreadPool`: The worker pool could not be built
#[derive(Error, Debug)]
pub enum CliError {
    /// Path does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Inconsistent command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON input or output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown name or missing table entry.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Calibration failure.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// Invalid ensemble weights.
    #[error(transparent)]
    Distribution(#[from] DistributionError),

    /// Projection failure.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// Invalid sampling configuration.
    #[error(transparent)]
    Sampling(#[from] SamplingError),

    /// A unit failed and the batch was aborted.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Worker pool construction failed.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl CliError {
    /// An unrecognised value for a named option.
    pub fn unknown_option(option: &str, value: &str, valid: &[&str]) -> Self {
        CliError::InvalidArgument(format!(
            "unknown {} '{}' (valid: {})",
            option,
            value,
            valid.join(", ")
        ))
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_option_lists_valid_values() {
        let err = CliError::unknown_option("pipeline", "average", &["baseline", "shift"]);
        assert_eq!(
            err.to_string(),
            "Invalid argument: unknown pipeline 'average' (valid: baseline, shift)"
        );
    }

    #[test]
    fn test_lookup_is_transparent() {
        let err: CliError = LookupError::missing("tmrel", "Diet low in fruits").into();
        assert!(!err.to_string().starts_with("Lookup"));
    }
}
