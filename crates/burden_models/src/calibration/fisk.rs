//! Fisk (log-logistic) moment matching.
//!
//! For shape β > 1 the Fisk mean is `α·(π/β)/sin(π/β) = α/sinc(1/β)`.
//! The shape is found from the coefficient of variation through the
//! one-dimensional problem
//!
//! ```text
//! min_β (sinc(1/β) − (1 + σ²/μ²)/2)²,   β ∈ [1e-15, π]
//! ```
//!
//! with `α = μ·sinc(1/β)`.

use super::CalibrationError;
use crate::distributions::Family;
use burden_core::math::solvers::{Interval, MinimiserChain};
use burden_core::math::special::sinc;
use std::f64::consts::PI;
use tracing::debug;

/// Relative tolerance on the implied mean.
pub const FISK_MEAN_TOLERANCE: f64 = 0.05;

/// Search interval lower end for β.
pub const FISK_SHAPE_MIN: f64 = 1e-15;

/// Fitted Fisk parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiskFit {
    /// Scale α.
    pub alpha: f64,
    /// Shape β.
    pub beta: f64,
}

impl FiskFit {
    /// Mean implied by the fitted parameters.
    pub fn implied_mean(&self) -> f64 {
        let b = PI / self.beta;
        self.alpha * b / b.sin()
    }
}

/// Moment-matching objective in β.
#[inline]
pub fn fisk_objective(beta: f64, mean: f64, variance: f64) -> f64 {
    let d = sinc(1.0 / beta) - (1.0 + variance / (mean * mean)) / 2.0;
    d * d
}

/// Fisk parameter solver.
///
/// # Example
///
/// ```
/// use burden_models::calibration::FiskSolver;
///
/// let fit = FiskSolver::default().fit(10.0, 5.0).unwrap();
/// assert!((fit.implied_mean() - 10.0).abs() < 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FiskSolver {
    chain: MinimiserChain,
}

impl FiskSolver {
    /// Solver using the given fallback chain.
    pub fn new(chain: MinimiserChain) -> Self {
        Self { chain }
    }

    /// Fit α and β to `mean` and `sd`.
    ///
    /// When `mean < sd` the variance is capped at `(0.999·mean)²`.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::InvalidMoments` unless `mean > 0` and `sd > 0`
    /// - `CalibrationError::NonConvergence` if no method meets the 5% mean tolerance
    pub fn fit(&self, mean: f64, sd: f64) -> Result<FiskFit, CalibrationError> {
        if !(mean > 0.0 && sd > 0.0 && mean.is_finite() && sd.is_finite()) {
            return Err(CalibrationError::InvalidMoments { mean, sd });
        }
        let variance = if mean < sd {
            let capped = 0.999 * mean;
            capped * capped
        } else {
            sd * sd
        };

        let interval = Interval::new(FISK_SHAPE_MIN, PI)?;
        let to_fit = |beta: f64| FiskFit {
            alpha: mean * sinc(1.0 / beta),
            beta,
        };
        let accept = |fit: &FiskFit| {
            let implied = fit.implied_mean();
            implied.is_finite() && (mean - implied).abs() < FISK_MEAN_TOLERANCE * mean
        };

        let min = self
            .chain
            .minimise(
                |beta| fisk_objective(beta, mean, variance),
                PI / 2.0,
                interval,
                |m| accept(&to_fit(m.x)),
            )
            .map_err(|e| CalibrationError::from_chain(e, Family::Fisk, mean, sd))?;

        let fit = to_fit(min.x);
        debug!(mean, sd, alpha = fit.alpha, beta = fit.beta, "Fisk parameters fitted");
        Ok(fit)
    }
}
