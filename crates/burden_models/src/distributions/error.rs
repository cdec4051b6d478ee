//! Error types for distribution construction and sampling.

use super::Family;
use thiserror::Error;

/// Distribution errors.
///
/// # Variants
/// - `InvalidParameter`: A family parameter is non-finite or outside its domain
/// - `InvalidWeights`: Ensemble weights are negative, non-finite or sum to zero
/// - `UnknownFamily`: A weight column name matches no family
///
/// # Examples
/// ```
/// use burden_models::distributions::{DistributionError, Family};
///
/// let err = DistributionError::InvalidParameter {
///     family: Family::Gamma,
///     name: "shape",
///     value: -1.0,
/// };
/// assert_eq!(format!("{}", err), "Invalid gamma parameter shape = -1");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DistributionError {
    /// Family parameter outside its domain.
    #[error("Invalid {family} parameter {name} = {value}")]
    InvalidParameter {
        /// Family the parameter belongs to
        family: Family,
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Ensemble weights cannot be normalised.
    #[error("Invalid ensemble weights: {message}")]
    InvalidWeights {
        /// Description of the problem
        message: String,
    },

    /// Weight column name not recognised.
    #[error("Unknown distribution family column: {0}")]
    UnknownFamily(String),
}
