//! Inverse-Weibull (Fréchet) moment matching.
//!
//! With shape k > 2 and rate λ (scale `1/λ`), `E[X] = Γ(1−1/k)/λ` and
//! `1 + cv² = Γ(1−2/k)/Γ(1−1/k)²`. The variance is infinite for k ≤ 2, so
//! the shape search is restricted to `(2, 100]`.

use super::shape_scale::{ShapeScaleFit, ShapeScaleModel, ShapeScaleSolver};
use crate::distributions::Family;
use burden_core::math::solvers::Interval;
use burden_core::math::special::{gamma, ln_gamma};
use burden_core::types::SolverError;

/// Inverse-Weibull shape search interval.
pub const INV_WEIBULL_SHAPE_RANGE: (f64, f64) = (2.0 + 1e-9, 1e2);

/// Mean-to-SD ratio of an inverse Weibull with shape `x`.
fn ratio_at_shape(x: f64) -> f64 {
    let g1 = gamma(1.0 - 1.0 / x);
    g1 / (gamma(1.0 - 2.0 / x) - g1 * g1).sqrt()
}

/// `1 / (1 + cv²)` of an inverse Weibull with shape `x`.
fn inverse_second_moment_ratio(x: f64) -> f64 {
    let g1 = gamma(1.0 - 1.0 / x);
    g1 * g1 / gamma(1.0 - 2.0 / x)
}

/// Inverse-Weibull model for [`ShapeScaleSolver`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InvWeibullModel;

/// Inverse-Weibull parameter solver.
///
/// # Example
///
/// ```
/// use burden_models::calibration::InvWeibullSolver;
///
/// let fit = InvWeibullSolver::default().fit(10.0, 5.0).unwrap();
/// assert!(fit.k > 2.0);
/// let implied = burden_core::math::special::gamma(1.0 - 1.0 / fit.k) / fit.lambda;
/// assert!((implied - 10.0).abs() < 0.1);
/// ```
pub type InvWeibullSolver = ShapeScaleSolver<InvWeibullModel>;

impl ShapeScaleModel for InvWeibullModel {
    const FAMILY: Family = Family::InverseWeibull;
    const HIGH_RATIO_THRESHOLD: f64 = 4.5;

    fn closed_form_high(mean: f64, sd: f64) -> ShapeScaleFit {
        let y = mean / sd;
        let (g7, g100) = (ratio_at_shape(7.0), ratio_at_shape(100.0));
        let c = (100.0 * g7 - 7.0 * g100) / 93.0;
        let k = 93.0 * (y - c) / (g100 - g7);
        ShapeScaleFit {
            k,
            lambda: Self::lambda_for(k, mean),
        }
    }

    fn closed_form_low(mean: f64, sd: f64) -> ShapeScaleFit {
        let m = inverse_second_moment_ratio(2.01) / 0.01;
        let y = mean / sd;
        let k = (1.0 / (1.0 + 1.0 / (y * y)) + 2.0 * m) / m;
        ShapeScaleFit {
            k,
            lambda: Self::lambda_for(k, mean),
        }
    }

    fn objective(k: f64, mean: f64, variance: f64) -> f64 {
        if k <= 2.0 {
            return f64::INFINITY;
        }
        let ratio = (ln_gamma(1.0 - 2.0 / k) - 2.0 * ln_gamma(1.0 - 1.0 / k)).exp();
        (ratio - 1.0 - variance / (mean * mean)).abs()
    }

    fn start(_mean: f64, _sd: f64) -> f64 {
        2.5
    }

    fn shape_interval() -> Result<Interval, SolverError> {
        Interval::new(INV_WEIBULL_SHAPE_RANGE.0, INV_WEIBULL_SHAPE_RANGE.1)
    }

    fn lambda_for(k: f64, mean: f64) -> f64 {
        gamma(1.0 - 1.0 / k) / mean
    }

    fn implied_mean(fit: &ShapeScaleFit) -> f64 {
        gamma(1.0 - 1.0 / fit.k) / fit.lambda
    }
}
