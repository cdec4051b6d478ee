//! Shared machinery for the two-parameter shape/scale families fitted by
//! mean-to-SD ratio: closed forms at the extremes of the ratio, numerical
//! minimisation in between and whenever a closed form misses.

use super::CalibrationError;
use crate::distributions::Family;
use burden_core::math::solvers::{Interval, MinimiserChain};
use burden_core::types::SolverError;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Mean-to-SD ratio at or below which the low-ratio closed form applies.
pub const LOW_RATIO_THRESHOLD: f64 = 1.0 / 8.0;

/// Relative tolerance on the implied mean for shape/scale families.
pub const SHAPE_SCALE_MEAN_TOLERANCE: f64 = 0.01;

/// Which parameter recovery a mean-to-SD ratio selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RatioRegime {
    /// Ratio at or above the family's high threshold.
    High,
    /// Ratio at or below [`LOW_RATIO_THRESHOLD`].
    Low,
    /// Everything else: numerical minimisation.
    Middle,
}

/// Fitted shape `k` and rate-like parameter `λ`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeScaleFit {
    /// Shape k.
    pub k: f64,
    /// λ as defined by the family.
    pub lambda: f64,
}

impl ShapeScaleFit {
    /// Reciprocal of λ, the inverse-Weibull scale.
    #[inline]
    pub fn scale(&self) -> f64 {
        1.0 / self.lambda
    }
}

/// A shape/scale family recoverable from its coefficient of variation.
pub trait ShapeScaleModel {
    /// Family this model fits.
    const FAMILY: Family;

    /// Ratio at or above which the high-ratio closed form applies.
    const HIGH_RATIO_THRESHOLD: f64;

    /// Closed form for large mean-to-SD ratios.
    fn closed_form_high(mean: f64, sd: f64) -> ShapeScaleFit;

    /// Closed form for ratios at or below 1/8.
    fn closed_form_low(mean: f64, sd: f64) -> ShapeScaleFit;

    /// Non-negative moment-matching objective in the shape `k`.
    fn objective(k: f64, mean: f64, variance: f64) -> f64;

    /// Starting shape for the numerical search.
    fn start(mean: f64, sd: f64) -> f64;

    /// Search interval for the shape.
    fn shape_interval() -> Result<Interval, SolverError>;

    /// λ that reproduces `mean` for shape `k`.
    fn lambda_for(k: f64, mean: f64) -> f64;

    /// Mean implied by a fit.
    fn implied_mean(fit: &ShapeScaleFit) -> f64;

    /// Regime selected by a mean-to-SD ratio.
    fn regime(ratio: f64) -> RatioRegime {
        if ratio >= Self::HIGH_RATIO_THRESHOLD {
            RatioRegime::High
        } else if ratio <= LOW_RATIO_THRESHOLD {
            RatioRegime::Low
        } else {
            RatioRegime::Middle
        }
    }
}

/// Solver for a [`ShapeScaleModel`].
#[derive(Debug, Clone)]
pub struct ShapeScaleSolver<M> {
    chain: MinimiserChain,
    _model: PhantomData<M>,
}

impl<M: ShapeScaleModel> Default for ShapeScaleSolver<M> {
    fn default() -> Self {
        Self::new(MinimiserChain::default())
    }
}

impl<M: ShapeScaleModel> ShapeScaleSolver<M> {
    /// Solver using the given fallback chain.
    pub fn new(chain: MinimiserChain) -> Self {
        Self {
            chain,
            _model: PhantomData,
        }
    }

    /// Whether a fit's implied mean is finite and within 1% of `mean`.
    pub fn accepts(fit: &ShapeScaleFit, mean: f64) -> bool {
        let implied = M::implied_mean(fit);
        implied.is_finite() && (mean - implied).abs() < SHAPE_SCALE_MEAN_TOLERANCE * mean
    }

    /// Numerical fit through the fallback chain.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::InvalidMoments` unless `mean > 0` and `sd > 0`
    /// - `CalibrationError::NonConvergence` if every method misses the tolerance
    pub fn fit_numerical(&self, mean: f64, sd: f64) -> Result<ShapeScaleFit, CalibrationError> {
        check_moments(mean, sd)?;
        let variance = sd * sd;
        let interval = M::shape_interval()?;
        let to_fit = |k: f64| ShapeScaleFit {
            k,
            lambda: M::lambda_for(k, mean),
        };

        let min = self
            .chain
            .minimise(
                |k| M::objective(k, mean, variance),
                interval.clamp(M::start(mean, sd)),
                interval,
                |m| Self::accepts(&to_fit(m.x), mean),
            )
            .map_err(|e| CalibrationError::from_chain(e, M::FAMILY, mean, sd))?;
        Ok(to_fit(min.x))
    }

    /// Fit one cell, choosing the regime from its own ratio.
    ///
    /// # Errors
    ///
    /// Same as [`fit_numerical`](Self::fit_numerical).
    pub fn fit(&self, mean: f64, sd: f64) -> Result<ShapeScaleFit, CalibrationError> {
        check_moments(mean, sd)?;
        let regime = M::regime(mean / sd);
        let mut fits = self.fit_partition(&[(mean, sd)], regime)?;
        fits.pop().ok_or(CalibrationError::InvalidMoments { mean, sd })
    }

    /// Fit a batch of `(mean, sd)` cells that share a regime.
    ///
    /// Closed-form regimes are evaluated for the whole batch; if any cell
    /// misses the mean tolerance, every cell of the batch is refitted
    /// numerically.
    ///
    /// # Errors
    ///
    /// Same as [`fit_numerical`](Self::fit_numerical).
    pub fn fit_partition(
        &self,
        cells: &[(f64, f64)],
        regime: RatioRegime,
    ) -> Result<Vec<ShapeScaleFit>, CalibrationError> {
        let closed_form: fn(f64, f64) -> ShapeScaleFit = match regime {
            RatioRegime::High => M::closed_form_high,
            RatioRegime::Low => M::closed_form_low,
            RatioRegime::Middle => return self.fit_all_numerically(cells),
        };

        let fits: Vec<ShapeScaleFit> = cells.iter().map(|&(m, s)| closed_form(m, s)).collect();
        let all_accepted = fits
            .iter()
            .zip(cells)
            .all(|(fit, &(mean, _))| Self::accepts(fit, mean));

        if all_accepted {
            debug!(family = %M::FAMILY, ?regime, cells = cells.len(), "Closed-form parameters accepted");
            Ok(fits)
        } else {
            warn!(family = %M::FAMILY, ?regime, cells = cells.len(), "Closed form missed tolerance, refitting numerically");
            self.fit_all_numerically(cells)
        }
    }

    fn fit_all_numerically(&self, cells: &[(f64, f64)]) -> Result<Vec<ShapeScaleFit>, CalibrationError> {
        cells
            .iter()
            .map(|&(mean, sd)| self.fit_numerical(mean, sd))
            .collect()
    }
}

fn check_moments(mean: f64, sd: f64) -> Result<(), CalibrationError> {
    if mean > 0.0 && sd > 0.0 && mean.is_finite() && sd.is_finite() {
        Ok(())
    } else {
        Err(CalibrationError::InvalidMoments { mean, sd })
    }
}
