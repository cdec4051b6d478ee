//! Calibration error types.

use crate::distributions::Family;
use burden_core::types::SolverError;
use thiserror::Error;

/// Calibration error type.
///
/// # Examples
/// ```
/// use burden_models::calibration::CalibrationError;
/// use burden_models::distributions::Family;
///
/// let err = CalibrationError::NonConvergence {
///     family: Family::Fisk,
///     mean: 2.0,
///     sd: 1.0,
///     tried: vec!["nelder-mead".into()],
/// };
/// assert!(format!("{}", err).starts_with("fisk parameters did not converge"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Every fallback method missed the acceptance tolerance.
    #[error(
        "{family} parameters did not converge (mean: {mean}, sd: {sd}, tried: {})",
        tried.join(", ")
    )]
    NonConvergence {
        /// Family being fitted
        family: Family,
        /// Target mean
        mean: f64,
        /// Target standard deviation
        sd: f64,
        /// Methods tried, in order
        tried: Vec<String>,
    },

    /// Moments outside the domain a family can be fitted to.
    #[error("Invalid moments: mean = {mean}, sd = {sd}")]
    InvalidMoments {
        /// Mean
        mean: f64,
        /// Standard deviation
        sd: f64,
    },

    /// Bounds are not finite and ordered.
    #[error("Invalid bounds: [{lower}, {upper}]")]
    InvalidBounds {
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// Relative bounds do not bracket the mean.
    #[error("Bounds [{xmin}, {xmax}] x mean exclude the mean itself")]
    BoundsExcludeMean {
        /// Lower-bound multiplier
        xmin: f64,
        /// Upper-bound multiplier
        xmax: f64,
    },

    /// Minimiser setup failed.
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

impl CalibrationError {
    /// Maps a fallback-chain failure for `family` to a calibration error.
    pub(crate) fn from_chain(err: SolverError, family: Family, mean: f64, sd: f64) -> Self {
        match err {
            SolverError::MethodsExhausted { tried } => CalibrationError::NonConvergence {
                family,
                mean,
                sd,
                tried,
            },
            other => CalibrationError::Solver(other),
        }
    }
}
