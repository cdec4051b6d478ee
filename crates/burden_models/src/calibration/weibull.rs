//! Weibull moment matching.
//!
//! With shape k and scale λ, `E[X] = λΓ(1+1/k)` and
//! `1 + cv² = Γ(1+2/k)/Γ(1+1/k)²`. The mean-to-SD ratio `y` selects:
//!
//! - `y ≥ 1`: linear interpolation of `y(k)` between k = 1 and k = 100
//! - `y ≤ 1/8`: linear interpolation of `ln(1 + cv²)` in `1/k` between 4 and 20
//! - otherwise: numerical minimisation of `|Γ(1+2/k)/Γ(1+1/k)² − 1 − cv²|`

use super::shape_scale::{ShapeScaleFit, ShapeScaleModel, ShapeScaleSolver};
use crate::distributions::Family;
use burden_core::math::solvers::Interval;
use burden_core::math::special::{gamma, ln_gamma};
use burden_core::types::SolverError;

/// Weibull shape search interval.
pub const WEIBULL_SHAPE_RANGE: (f64, f64) = (1e-2, 1e2);

/// Mean-to-SD ratio of a Weibull with shape `x`.
fn ratio_at_shape(x: f64) -> f64 {
    let g1 = gamma(1.0 / x + 1.0);
    g1 / (gamma(2.0 / x + 1.0) - g1 * g1).sqrt()
}

/// `ln(1 + cv²)` of a Weibull with shape `1/x`.
fn log_second_moment_ratio(x: f64) -> f64 {
    ln_gamma(1.0 + 2.0 * x) - 2.0 * ln_gamma(1.0 + x)
}

/// Weibull model for [`ShapeScaleSolver`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WeibullModel;

/// Weibull parameter solver.
///
/// # Example
///
/// ```
/// use burden_models::calibration::WeibullSolver;
///
/// let fit = WeibullSolver::default().fit(100.0, 20.0).unwrap();
/// let implied = fit.lambda * burden_core::math::special::gamma(1.0 + 1.0 / fit.k);
/// assert!((implied - 100.0).abs() < 1.0);
/// ```
pub type WeibullSolver = ShapeScaleSolver<WeibullModel>;

impl ShapeScaleModel for WeibullModel {
    const FAMILY: Family = Family::Weibull;
    const HIGH_RATIO_THRESHOLD: f64 = 1.0;

    fn closed_form_high(mean: f64, sd: f64) -> ShapeScaleFit {
        let y = mean / sd;
        let m = (ratio_at_shape(100.0) - 1.0) / 99.0;
        let k = (y + m - 1.0) / m;
        ShapeScaleFit {
            k,
            lambda: Self::lambda_for(k, mean),
        }
    }

    fn closed_form_low(mean: f64, sd: f64) -> ShapeScaleFit {
        let m = (log_second_moment_ratio(20.0) - log_second_moment_ratio(4.0)) / 16.0;
        let c = (5.0 * log_second_moment_ratio(4.0) - log_second_moment_ratio(20.0)) / 4.0;
        let y = mean / sd;
        let k = m / ((1.0 + 1.0 / (y * y)).ln() - c);
        ShapeScaleFit {
            k,
            lambda: Self::lambda_for(k, mean),
        }
    }

    fn objective(k: f64, mean: f64, variance: f64) -> f64 {
        let ratio = (ln_gamma(1.0 + 2.0 / k) - 2.0 * ln_gamma(1.0 + 1.0 / k)).exp();
        (ratio - 1.0 - variance / (mean * mean)).abs()
    }

    fn start(mean: f64, sd: f64) -> f64 {
        mean / sd
    }

    fn shape_interval() -> Result<Interval, SolverError> {
        Interval::new(WEIBULL_SHAPE_RANGE.0, WEIBULL_SHAPE_RANGE.1)
    }

    fn lambda_for(k: f64, mean: f64) -> f64 {
        mean / gamma(1.0 + 1.0 / k)
    }

    fn implied_mean(fit: &ShapeScaleFit) -> f64 {
        fit.lambda * gamma(1.0 + 1.0 / fit.k)
    }
}
