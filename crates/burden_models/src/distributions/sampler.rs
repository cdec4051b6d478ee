//! Random variate generation for each family.
//!
//! Families with a direct `rand_distr` counterpart wrap it; Fisk, Gumbel,
//! inverse-gamma and inverse-Weibull are drawn by transformation of a
//! uniform or gamma variate.

use super::{DistributionError, Family, FamilyParameters};
use rand::distributions::{Distribution, Open01};
use rand::Rng;
use rand_distr::{Beta, Exp, Gamma, LogNormal, Normal, Weibull};

fn invalid(family: Family, name: &'static str, value: f64) -> DistributionError {
    DistributionError::InvalidParameter {
        family,
        name,
        value,
    }
}

fn positive(family: Family, name: &'static str, value: f64) -> Result<f64, DistributionError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(family, name, value))
    }
}

fn non_negative(family: Family, name: &'static str, value: f64) -> Result<f64, DistributionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid(family, name, value))
    }
}

fn finite(family: Family, name: &'static str, value: f64) -> Result<f64, DistributionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(family, name, value))
    }
}

/// Sampler for one family, built from validated parameters.
#[derive(Debug, Clone)]
pub enum FamilySampler {
    /// Exponential.
    Exponential(Exp<f64>),
    /// Gamma.
    Gamma(Gamma<f64>),
    /// Fisk by inverse CDF.
    Fisk {
        /// Scale
        scale: f64,
        /// Shape
        shape: f64,
    },
    /// Gumbel by inverse CDF.
    Gumbel {
        /// Location
        loc: f64,
        /// Scale
        scale: f64,
    },
    /// Weibull.
    Weibull(Weibull<f64>),
    /// Log-normal.
    LogNormal(LogNormal<f64>),
    /// Normal.
    Normal(Normal<f64>),
    /// Beta on `[loc, loc + scale]`.
    Beta {
        /// Support start
        loc: f64,
        /// Support width
        scale: f64,
        /// Standard Beta
        inner: Beta<f64>,
    },
    /// `upper − Gamma`.
    MirroredGamma {
        /// Reflection point
        upper: f64,
        /// Unreflected gamma
        inner: Gamma<f64>,
    },
    /// `upper − Gumbel`.
    MirroredGumbel {
        /// Reflection point
        upper: f64,
        /// Gumbel location
        loc: f64,
        /// Gumbel scale
        scale: f64,
    },
    /// `scale / Gamma(shape, 1)`.
    InverseGamma {
        /// Scale
        scale: f64,
        /// Unit-scale gamma
        inner: Gamma<f64>,
    },
    /// Inverse Weibull by inverse CDF.
    InverseWeibull {
        /// Scale
        scale: f64,
        /// Shape
        shape: f64,
    },
}

impl FamilyParameters {
    /// The family these parameters belong to.
    pub fn family(&self) -> Family {
        match self {
            FamilyParameters::Exponential { .. } => Family::Exponential,
            FamilyParameters::Gamma { .. } => Family::Gamma,
            FamilyParameters::Fisk { .. } => Family::Fisk,
            FamilyParameters::Gumbel { .. } => Family::Gumbel,
            FamilyParameters::Weibull { .. } => Family::Weibull,
            FamilyParameters::LogNormal { .. } => Family::LogNormal,
            FamilyParameters::Normal { .. } => Family::Normal,
            FamilyParameters::Beta { .. } => Family::Beta,
            FamilyParameters::MirroredGamma { .. } => Family::MirroredGamma,
            FamilyParameters::MirroredGumbel { .. } => Family::MirroredGumbel,
            FamilyParameters::InverseGamma { .. } => Family::InverseGamma,
            FamilyParameters::InverseWeibull { .. } => Family::InverseWeibull,
        }
    }

    /// Validates the parameters and builds a sampler.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError::InvalidParameter` naming the first
    /// parameter outside its domain.
    ///
    /// # Example
    ///
    /// ```
    /// use burden_models::distributions::FamilyParameters;
    /// use rand::distributions::Distribution;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let params = FamilyParameters::Fisk { scale: 2.0, shape: 4.0 };
    /// let sampler = params.sampler().unwrap();
    /// let mut rng = StdRng::seed_from_u64(1);
    /// assert!(sampler.sample(&mut rng) > 0.0);
    ///
    /// assert!(FamilyParameters::Gamma { scale: 1.0, shape: -2.0 }.sampler().is_err());
    /// ```
    pub fn sampler(&self) -> Result<FamilySampler, DistributionError> {
        let family = self.family();
        let sampler = match *self {
            FamilyParameters::Exponential { scale } => {
                let scale = positive(family, "scale", scale)?;
                FamilySampler::Exponential(
                    Exp::new(1.0 / scale).map_err(|_| invalid(family, "scale", scale))?,
                )
            }
            FamilyParameters::Gamma { scale, shape } => {
                let scale = positive(family, "scale", scale)?;
                let shape = positive(family, "shape", shape)?;
                FamilySampler::Gamma(
                    Gamma::new(shape, scale).map_err(|_| invalid(family, "shape", shape))?,
                )
            }
            FamilyParameters::Fisk { scale, shape } => FamilySampler::Fisk {
                scale: positive(family, "scale", scale)?,
                shape: positive(family, "shape", shape)?,
            },
            FamilyParameters::Gumbel { loc, scale } => FamilySampler::Gumbel {
                loc: finite(family, "loc", loc)?,
                scale: positive(family, "scale", scale)?,
            },
            FamilyParameters::Weibull { scale, shape } => {
                let scale = positive(family, "scale", scale)?;
                let shape = positive(family, "shape", shape)?;
                FamilySampler::Weibull(
                    Weibull::new(scale, shape)
                        .map_err(|_| invalid(family, "shape", shape))?,
                )
            }
            FamilyParameters::LogNormal { scale, s } => {
                let scale = positive(family, "scale", scale)?;
                let s = non_negative(family, "s", s)?;
                FamilySampler::LogNormal(
                    LogNormal::new(scale.ln(), s).map_err(|_| invalid(family, "s", s))?,
                )
            }
            FamilyParameters::Normal { loc, scale } => {
                let loc = finite(family, "loc", loc)?;
                let scale = non_negative(family, "scale", scale)?;
                FamilySampler::Normal(
                    Normal::new(loc, scale).map_err(|_| invalid(family, "scale", scale))?,
                )
            }
            FamilyParameters::Beta { loc, scale, a, b } => {
                let loc = finite(family, "loc", loc)?;
                let scale = positive(family, "scale", scale)?;
                let a = positive(family, "a", a)?;
                let b = positive(family, "b", b)?;
                FamilySampler::Beta {
                    loc,
                    scale,
                    inner: Beta::new(a, b).map_err(|_| invalid(family, "a", a))?,
                }
            }
            FamilyParameters::MirroredGamma {
                upper,
                scale,
                shape,
            } => {
                let upper = finite(family, "upper", upper)?;
                let scale = positive(family, "scale", scale)?;
                let shape = positive(family, "shape", shape)?;
                FamilySampler::MirroredGamma {
                    upper,
                    inner: Gamma::new(shape, scale)
                        .map_err(|_| invalid(family, "shape", shape))?,
                }
            }
            FamilyParameters::MirroredGumbel { upper, loc, scale } => {
                FamilySampler::MirroredGumbel {
                    upper: finite(family, "upper", upper)?,
                    loc: finite(family, "loc", loc)?,
                    scale: positive(family, "scale", scale)?,
                }
            }
            FamilyParameters::InverseGamma { scale, shape } => {
                let scale = positive(family, "scale", scale)?;
                let shape = positive(family, "shape", shape)?;
                FamilySampler::InverseGamma {
                    scale,
                    inner: Gamma::new(shape, 1.0)
                        .map_err(|_| invalid(family, "shape", shape))?,
                }
            }
            FamilyParameters::InverseWeibull { scale, shape } => FamilySampler::InverseWeibull {
                scale: positive(family, "scale", scale)?,
                shape: positive(family, "shape", shape)?,
            },
        };
        Ok(sampler)
    }
}

#[inline]
fn gumbel_draw<R: Rng + ?Sized>(rng: &mut R, loc: f64, scale: f64) -> f64 {
    let u: f64 = rng.sample(Open01);
    loc - scale * (-u.ln()).ln()
}

impl Distribution<f64> for FamilySampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            FamilySampler::Exponential(d) => d.sample(rng),
            FamilySampler::Gamma(d) => d.sample(rng),
            FamilySampler::Fisk { scale, shape } => {
                let u: f64 = rng.sample(Open01);
                scale * (u / (1.0 - u)).powf(1.0 / shape)
            }
            FamilySampler::Gumbel { loc, scale } => gumbel_draw(rng, *loc, *scale),
            FamilySampler::Weibull(d) => d.sample(rng),
            FamilySampler::LogNormal(d) => d.sample(rng),
            FamilySampler::Normal(d) => d.sample(rng),
            FamilySampler::Beta { loc, scale, inner } => loc + scale * inner.sample(rng),
            FamilySampler::MirroredGamma { upper, inner } => upper - inner.sample(rng),
            FamilySampler::MirroredGumbel { upper, loc, scale } => {
                upper - gumbel_draw(rng, *loc, *scale)
            }
            FamilySampler::InverseGamma { scale, inner } => scale / inner.sample(rng),
            FamilySampler::InverseWeibull { scale, shape } => {
                let u: f64 = rng.sample(Open01);
                scale * (-u.ln()).powf(-1.0 / shape)
            }
        }
    }
}
