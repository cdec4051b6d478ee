//! Error types for exposure synthesis.

use burden_core::types::LookupError;
use burden_models::calibration::CalibrationError;
use burden_models::distributions::DistributionError;
use thiserror::Error;

/// Exposure synthesis errors.
///
/// # Variants
/// - `SamplingDivergence`: Rejection passes exhausted with samples still out of bounds
/// - `Distribution`: A drawn family has invalid parameters or weights
/// - `Calibration`: Parameter recovery failed for a cell
/// - `Lookup`: Missing ensemble weights for a risk
/// - `InvalidConfig`: Sampling configuration out of range
///
/// # Examples
/// ```
/// use burden_sampling::SamplingError;
///
/// let err = SamplingError::SamplingDivergence { out_of_bounds: 3, passes: 10 };
/// assert!(err.to_string().contains("3 samples"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplingError {
    /// Rejection loop hit its cap.
    #[error("Rejection sampling diverged: {out_of_bounds} samples out of bounds after {passes} passes")]
    SamplingDivergence {
        /// Samples still outside the bounds
        out_of_bounds: usize,
        /// Passes performed
        passes: usize,
    },

    /// Family sampler could not be built.
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    /// Cell calibration failed.
    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    /// Required input missing.
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Configuration value out of range.
    #[error("Invalid sampling configuration '{name}': {value}")]
    InvalidConfig {
        /// Parameter name
        name: &'static str,
        /// Description of the problem
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use burden_models::distributions::Family;

    #[test]
    fn test_display() {
        let err = SamplingError::InvalidConfig {
            name: "sample_size",
            value: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid sampling configuration 'sample_size': must be positive"
        );
    }

    #[test]
    fn test_from_distribution_error() {
        let err: SamplingError = DistributionError::InvalidParameter {
            family: Family::Beta,
            name: "a",
            value: f64::NAN,
        }
        .into();
        assert!(matches!(err, SamplingError::Distribution(_)));
    }
}
