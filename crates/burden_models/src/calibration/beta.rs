//! Closed-form Beta moment matching on a widened support.
//!
//! The support `[l, u]` is widened until the requested variance is
//! attainable, then the standard moment equations are solved on `[0, 1]`.
//! Three regimes, with `v = σ²`:
//!
//! | Regime | Condition | Support |
//! |---|---|---|
//! | widened | `(μ−l)(u−μ) ≤ v < μ(u+l−μ)` | `[l − δ, u + δ]`, δ from a quadratic, plus ε |
//! | lower pinned | `v ≥ (μ−l)(u−μ)` and `v ≥ μ(u+l−μ)` | `[0, v/μ + μ + ε]` |
//! | epsilon | `v < (μ−l)(u−μ)` | `[l − ε, u + ε]` |

use tracing::{debug, warn};

/// Widening applied on top of every support adjustment.
pub const BETA_EPSILON: f64 = 1e-10;

/// Floor for the fitted shape parameters.
pub const BETA_SHAPE_FLOOR: f64 = 1e-12;

/// Which support adjustment applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BetaRegime {
    /// Bounds widened symmetrically by δ + ε.
    Widened,
    /// Lower bound set to zero, upper recomputed.
    LowerPinned,
    /// Bounds widened by ε only.
    Epsilon,
}

/// Fitted Beta parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaFit {
    /// First shape.
    pub a: f64,
    /// Second shape.
    pub b: f64,
    /// Lower end of the widened support.
    pub lower: f64,
    /// Upper end of the widened support.
    pub upper: f64,
    /// Regime used.
    pub regime: BetaRegime,
}

/// Regime for mean `mean`, variance `variance` and support `[lower, upper]`.
pub fn beta_regime(mean: f64, variance: f64, lower: f64, upper: f64) -> BetaRegime {
    let band_low = (mean - lower) * (upper - mean);
    let band_high = mean * (upper + lower - mean);
    if variance < band_low {
        BetaRegime::Epsilon
    } else if variance < band_high {
        BetaRegime::Widened
    } else {
        BetaRegime::LowerPinned
    }
}

/// Half-width by which `[lower, upper]` must grow so that the variance is
/// attainable: the positive root of `δ² + (u−l)δ − (v − (μ−l)(u−μ)) = 0`.
pub fn beta_widening(mean: f64, variance: f64, lower: f64, upper: f64) -> f64 {
    let half = 0.5 * (upper - lower);
    -half + (half * half + variance - (mean - lower) * (upper - mean)).sqrt()
}

/// Fit Beta shapes and support for one cell.
///
/// Never fails: a NaN shape is logged as a data-quality warning and
/// returned as is.
///
/// # Example
///
/// ```
/// use burden_models::calibration::{fit_beta, BetaRegime};
///
/// let fit = fit_beta(100.0, 10.0, 50.0, 300.0);
/// assert_eq!(fit.regime, BetaRegime::Epsilon);
/// let implied = fit.lower + (fit.upper - fit.lower) * fit.a / (fit.a + fit.b);
/// assert!((implied - 100.0).abs() < 1e-9);
/// ```
pub fn fit_beta(mean: f64, sd: f64, lower: f64, upper: f64) -> BetaFit {
    let vr = sd * sd;
    let regime = beta_regime(mean, vr, lower, upper);
    let (l, u) = match regime {
        BetaRegime::Widened => {
            let delta = beta_widening(mean, vr, lower, upper) + BETA_EPSILON;
            (lower - delta, upper + delta)
        }
        BetaRegime::LowerPinned => (0.0, vr / mean + mean + BETA_EPSILON),
        BetaRegime::Epsilon => (lower - BETA_EPSILON, upper + BETA_EPSILON),
    };
    debug!(?regime, mean, sd, lower = l, upper = u, "Beta support selected");

    let width = u - l;
    let mu_beta = (mean - l) / width;
    let vr_beta = vr / (width * width);
    let a = (mu_beta * mu_beta * (1.0 - mu_beta) / vr_beta - mu_beta).abs();
    let b = (mu_beta * (1.0 - mu_beta) * (1.0 - mu_beta) / vr_beta - 1.0 + mu_beta).abs();

    if a.is_nan() || b.is_nan() {
        warn!(mean, sd, lower, upper, "Beta shape parameters are NaN");
    }

    BetaFit {
        a: floor_shape(a),
        b: floor_shape(b),
        lower: l,
        upper: u,
        regime,
    }
}

#[inline]
fn floor_shape(value: f64) -> f64 {
    if value <= BETA_SHAPE_FLOOR {
        BETA_SHAPE_FLOOR
    } else {
        value
    }
}
