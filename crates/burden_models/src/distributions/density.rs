//! Analytic means and densities, and the ensemble mixture density.

use super::{DistributionParameterSet, EnsembleWeights, Family, FamilyParameters};
use burden_core::math::special::{gamma, ln_gamma, EULER_GAMMA};
use std::f64::consts::PI;

fn gamma_pdf(x: f64, scale: f64, shape: f64) -> f64 {
    if x < 0.0 {
        return 0.0;
    }
    if x == 0.0 {
        return match shape {
            s if s < 1.0 => f64::INFINITY,
            s if s == 1.0 => 1.0 / scale,
            _ => 0.0,
        };
    }
    let z = x / scale;
    ((shape - 1.0) * z.ln() - z - ln_gamma(shape)).exp() / scale
}

fn gumbel_pdf(x: f64, loc: f64, scale: f64) -> f64 {
    let z = (x - loc) / scale;
    (-(z + (-z).exp())).exp() / scale
}

impl FamilyParameters {
    /// Analytic mean. Infinite where the moment does not exist.
    ///
    /// # Example
    ///
    /// ```
    /// use burden_models::distributions::FamilyParameters;
    ///
    /// let w = FamilyParameters::Weibull { scale: 2.0, shape: 1.0 };
    /// assert!((w.mean() - 2.0).abs() < 1e-12);
    /// let f = FamilyParameters::Fisk { scale: 1.0, shape: 0.9 };
    /// assert!(f.mean().is_infinite());
    /// ```
    pub fn mean(&self) -> f64 {
        match *self {
            FamilyParameters::Exponential { scale } => scale,
            FamilyParameters::Gamma { scale, shape } => scale * shape,
            FamilyParameters::Fisk { scale, shape } => {
                if shape <= 1.0 {
                    return f64::INFINITY;
                }
                let b = PI / shape;
                scale * b / b.sin()
            }
            FamilyParameters::Gumbel { loc, scale } => loc + EULER_GAMMA * scale,
            FamilyParameters::Weibull { scale, shape } => scale * gamma(1.0 + 1.0 / shape),
            FamilyParameters::LogNormal { scale, s } => scale * (0.5 * s * s).exp(),
            FamilyParameters::Normal { loc, .. } => loc,
            FamilyParameters::Beta { loc, scale, a, b } => loc + scale * a / (a + b),
            FamilyParameters::MirroredGamma {
                upper,
                scale,
                shape,
            } => upper - scale * shape,
            FamilyParameters::MirroredGumbel { upper, loc, scale } => {
                upper - (loc + EULER_GAMMA * scale)
            }
            FamilyParameters::InverseGamma { scale, shape } => {
                if shape <= 1.0 {
                    return f64::INFINITY;
                }
                scale / (shape - 1.0)
            }
            FamilyParameters::InverseWeibull { scale, shape } => {
                if shape <= 1.0 {
                    return f64::INFINITY;
                }
                scale * gamma(1.0 - 1.0 / shape)
            }
        }
    }

    /// Probability density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        match *self {
            FamilyParameters::Exponential { scale } => {
                if x < 0.0 {
                    0.0
                } else {
                    (-x / scale).exp() / scale
                }
            }
            FamilyParameters::Gamma { scale, shape } => gamma_pdf(x, scale, shape),
            FamilyParameters::Fisk { scale, shape } => {
                if x <= 0.0 {
                    return 0.0;
                }
                let z = x / scale;
                let zc = z.powf(shape);
                (shape / scale) * z.powf(shape - 1.0) / ((1.0 + zc) * (1.0 + zc))
            }
            FamilyParameters::Gumbel { loc, scale } => gumbel_pdf(x, loc, scale),
            FamilyParameters::Weibull { scale, shape } => {
                if x < 0.0 {
                    return 0.0;
                }
                let z = x / scale;
                (shape / scale) * z.powf(shape - 1.0) * (-z.powf(shape)).exp()
            }
            FamilyParameters::LogNormal { scale, s } => {
                if x <= 0.0 {
                    return 0.0;
                }
                let y = (x / scale).ln() / s;
                (-0.5 * y * y).exp() / (x * s * (2.0 * PI).sqrt())
            }
            FamilyParameters::Normal { loc, scale } => {
                let y = (x - loc) / scale;
                (-0.5 * y * y).exp() / (scale * (2.0 * PI).sqrt())
            }
            FamilyParameters::Beta { loc, scale, a, b } => {
                let y = (x - loc) / scale;
                if !(0.0..=1.0).contains(&y) {
                    return 0.0;
                }
                let ln_beta = ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b);
                ((a - 1.0) * y.ln() + (b - 1.0) * (1.0 - y).ln() - ln_beta).exp() / scale
            }
            FamilyParameters::MirroredGamma {
                upper,
                scale,
                shape,
            } => gamma_pdf(upper - x, scale, shape),
            FamilyParameters::MirroredGumbel { upper, loc, scale } => {
                gumbel_pdf(upper - x, loc, scale)
            }
            FamilyParameters::InverseGamma { scale, shape } => {
                if x <= 0.0 {
                    return 0.0;
                }
                let z = x / scale;
                ((-shape - 1.0) * z.ln() - 1.0 / z - ln_gamma(shape)).exp() / scale
            }
            FamilyParameters::InverseWeibull { scale, shape } => {
                if x <= 0.0 {
                    return 0.0;
                }
                let z = x / scale;
                shape * z.powf(-shape - 1.0) * (-z.powf(-shape)).exp() / scale
            }
        }
    }
}

/// Ensemble-weighted density of one exposure cell.
///
/// # Example
///
/// ```
/// use burden_models::calibration::FamilyVariables;
/// use burden_models::distributions::{
///     DistributionParameterSet, EnsembleWeights, Family, MixtureDensity,
/// };
///
/// let vars = FamilyVariables { upper: 300.0, lower: 50.0, ..Default::default() };
/// let params = DistributionParameterSet::from_moments(100.0, 10.0, &vars);
/// let mixture = MixtureDensity::new(params, EnsembleWeights::single(Family::Normal));
/// let peak = 1.0 / (10.0 * (2.0 * std::f64::consts::PI).sqrt());
/// assert!((mixture.pdf(100.0) - peak).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureDensity {
    parameters: DistributionParameterSet,
    weights: EnsembleWeights,
}

impl MixtureDensity {
    /// Creates a mixture density.
    pub fn new(parameters: DistributionParameterSet, weights: EnsembleWeights) -> Self {
        Self {
            parameters,
            weights,
        }
    }

    /// Weighted sum of family densities at `x`; zero-weight families are skipped.
    pub fn pdf(&self, x: f64) -> f64 {
        self.weights
            .active()
            .map(|f| self.weights.weight(f) * self.parameters.family(f).pdf(x))
            .sum()
    }

    /// Per-family densities at `x`, in ensemble order, unweighted.
    pub fn family_pdfs(&self, x: f64) -> [f64; Family::COUNT] {
        let mut out = [0.0; Family::COUNT];
        for family in Family::ALL {
            out[family.index()] = self.parameters.family(family).pdf(x);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use burden_core::math::integration::{linspace, simpson};

    fn integrate(p: FamilyParameters, lo: f64, hi: f64) -> f64 {
        let x = linspace(lo, hi, 20_001);
        let y: Vec<f64> = x.iter().map(|&v| p.pdf(v)).collect();
        simpson(&y, &x).unwrap()
    }

    #[test]
    fn test_densities_integrate_to_one() {
        let cases = [
            (FamilyParameters::Exponential { scale: 2.0 }, 0.0, 80.0),
            (FamilyParameters::Gamma { scale: 1.5, shape: 3.0 }, 0.0, 80.0),
            (FamilyParameters::Fisk { scale: 5.0, shape: 6.0 }, 0.0, 400.0),
            (FamilyParameters::Gumbel { loc: 1.0, scale: 2.0 }, -20.0, 60.0),
            (FamilyParameters::Weibull { scale: 3.0, shape: 2.0 }, 0.0, 30.0),
            (FamilyParameters::LogNormal { scale: 2.0, s: 0.4 }, 0.0, 40.0),
            (FamilyParameters::Normal { loc: 0.0, scale: 1.0 }, -10.0, 10.0),
            (FamilyParameters::Beta { loc: 2.0, scale: 3.0, a: 2.0, b: 4.0 }, 2.0, 5.0),
            (
                FamilyParameters::MirroredGamma { upper: 50.0, scale: 1.0, shape: 4.0 },
                0.0,
                50.0,
            ),
            (
                FamilyParameters::MirroredGumbel { upper: 50.0, loc: 5.0, scale: 1.0 },
                20.0,
                60.0,
            ),
            (FamilyParameters::InverseGamma { scale: 4.0, shape: 6.0 }, 0.0, 60.0),
            (FamilyParameters::InverseWeibull { scale: 3.0, shape: 7.0 }, 0.0, 60.0),
        ];
        for (p, lo, hi) in cases {
            assert_relative_eq!(integrate(p, lo, hi), 1.0, epsilon = 2e-3);
        }
    }

    #[test]
    fn test_means_of_mirrored_families() {
        let p = FamilyParameters::MirroredGamma {
            upper: 10.0,
            scale: 2.0,
            shape: 3.0,
        };
        assert_relative_eq!(p.mean(), 4.0);
        assert_eq!(p.family(), Family::MirroredGamma);
    }

    #[test]
    fn test_mixture_is_weighted_sum() {
        use crate::calibration::FamilyVariables;

        let vars = FamilyVariables {
            upper: 300.0,
            lower: 50.0,
            ..Default::default()
        };
        let params = DistributionParameterSet::from_moments(100.0, 10.0, &vars);
        let mut raw = [0.0; 12];
        raw[Family::Normal.index()] = 1.0;
        raw[Family::Gamma.index()] = 1.0;
        let mixture = MixtureDensity::new(params, EnsembleWeights::new(raw).unwrap());
        let x = 95.0;
        let pdfs = mixture.family_pdfs(x);
        let expected = 0.5 * pdfs[Family::Normal.index()] + 0.5 * pdfs[Family::Gamma.index()];
        assert_relative_eq!(mixture.pdf(x), expected, max_relative = 1e-12);
    }
}
