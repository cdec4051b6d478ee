//! The 27-entry parameter set of one exposure cell.
//!
//! Entries 0–24 are the scale/shape/location arguments of the twelve
//! families, 25 and 26 the cell's (unwidened) lower and upper bounds.
//! The set is derived once from the cell moments and the calibrated
//! family variables and never mutated afterwards.

use super::Family;
use crate::calibration::FamilyVariables;
use burden_core::math::special::EULER_GAMMA;
use std::f64::consts::PI;

/// Number of entries in a parameter set.
pub const PARAMETER_COUNT: usize = 27;

/// (family name, argument name) of every entry, in order.
pub const PARAMETER_NAMES: [(&str, &str); PARAMETER_COUNT] = [
    ("expon", "scale"),
    ("gamma", "scale"),
    ("gamma", "a"),
    ("fisk", "scale"),
    ("fisk", "c"),
    ("gumbel_r", "scale"),
    ("gumbel_r", "loc"),
    ("weibull_min", "scale"),
    ("weibull_min", "c"),
    ("lognorm", "scale"),
    ("lognorm", "s"),
    ("norm", "scale"),
    ("norm", "loc"),
    ("beta", "scale"),
    ("beta", "loc"),
    ("beta", "a"),
    ("beta", "b"),
    ("mirrored_gamma", "scale"),
    ("mirrored_gamma", "a"),
    ("mirrored_gumbel_r", "scale"),
    ("mirrored_gumbel_r", "loc"),
    ("invgamma", "scale"),
    ("invgamma", "a"),
    ("invweibull", "scale"),
    ("invweibull", "c"),
    ("lower", "l"),
    ("upper", "u"),
];

/// Typed view of one family's parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FamilyParameters {
    /// Exponential with the given scale (mean).
    Exponential {
        /// Scale
        scale: f64,
    },
    /// Gamma.
    Gamma {
        /// Scale θ
        scale: f64,
        /// Shape a
        shape: f64,
    },
    /// Fisk (log-logistic).
    Fisk {
        /// Scale α
        scale: f64,
        /// Shape β
        shape: f64,
    },
    /// Right-skewed Gumbel.
    Gumbel {
        /// Location
        loc: f64,
        /// Scale
        scale: f64,
    },
    /// Weibull.
    Weibull {
        /// Scale λ
        scale: f64,
        /// Shape k
        shape: f64,
    },
    /// Log-normal with `ln X ~ N(ln scale, s²)`.
    LogNormal {
        /// Median `e^μ`
        scale: f64,
        /// Log-scale standard deviation
        s: f64,
    },
    /// Normal.
    Normal {
        /// Mean
        loc: f64,
        /// Standard deviation
        scale: f64,
    },
    /// Beta on `[loc, loc + scale]`.
    Beta {
        /// Support start
        loc: f64,
        /// Support width
        scale: f64,
        /// First shape
        a: f64,
        /// Second shape
        b: f64,
    },
    /// Gamma draw `g` reported as `upper − g`.
    MirroredGamma {
        /// Reflection point
        upper: f64,
        /// Scale θ
        scale: f64,
        /// Shape a
        shape: f64,
    },
    /// Gumbel draw `g` reported as `upper − g`.
    MirroredGumbel {
        /// Reflection point
        upper: f64,
        /// Location
        loc: f64,
        /// Scale
        scale: f64,
    },
    /// Inverse gamma.
    InverseGamma {
        /// Scale
        scale: f64,
        /// Shape a
        shape: f64,
    },
    /// Inverse Weibull (Fréchet).
    InverseWeibull {
        /// Scale
        scale: f64,
        /// Shape c
        shape: f64,
    },
}

/// Parameters of all twelve families for one exposure cell.
///
/// # Example
///
/// ```
/// use burden_models::calibration::FamilyVariables;
/// use burden_models::distributions::{DistributionParameterSet, Family, FamilyParameters};
///
/// let vars = FamilyVariables {
///     upper: 300.0,
///     lower: 50.0,
///     ..FamilyVariables::default()
/// };
/// let params = DistributionParameterSet::from_moments(100.0, 10.0, &vars);
/// assert_eq!(params.values()[0], 100.0);
/// assert_eq!(
///     params.family(Family::Gamma),
///     FamilyParameters::Gamma { scale: 1.0, shape: 100.0 }
/// );
/// assert_eq!((params.lower(), params.upper()), (50.0, 300.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionParameterSet {
    values: [f64; PARAMETER_COUNT],
}

impl DistributionParameterSet {
    /// Derives the full parameter set from mean, standard deviation and the
    /// calibrated family variables.
    pub fn from_moments(mean: f64, sd: f64, vars: &FamilyVariables) -> Self {
        let vr = sd * sd;
        let u = vars.upper;
        let l = vars.lower;
        let gumbel_scale = 6.0_f64.sqrt() / PI * sd;
        let gumbel_shift = gumbel_scale * EULER_GAMMA;

        let values = [
            // expon
            mean,
            // gamma
            vr / mean,
            mean * mean / vr,
            // fisk
            vars.alpha_fisk,
            vars.beta_fisk,
            // gumbel_r
            gumbel_scale,
            mean - gumbel_shift,
            // weibull_min
            vars.lambda_weibull,
            vars.k_weibull,
            // lognorm
            mean * mean / (mean * mean + vr).sqrt(),
            (1.0 + vr / (mean * mean)).ln().sqrt(),
            // norm
            sd,
            mean,
            // beta
            vars.upper_beta - vars.lower_beta,
            vars.lower_beta,
            vars.a_beta,
            vars.b_beta,
            // mirrored gamma
            vr / (u - mean),
            (u - mean) * (u - mean) / vr,
            // mirrored gumbel_r
            gumbel_scale,
            u - mean - gumbel_shift,
            // invgamma
            mean * (mean * mean / vr + 1.0),
            mean * mean / vr + 2.0,
            // invweibull
            1.0 / vars.lambda_invweibull,
            vars.k_invweibull,
            // bounds
            l,
            u,
        ];
        Self { values }
    }

    /// Builds a set from raw values in [`PARAMETER_NAMES`] order.
    pub fn from_values(values: [f64; PARAMETER_COUNT]) -> Self {
        Self { values }
    }

    /// Raw values in [`PARAMETER_NAMES`] order.
    #[inline]
    pub fn values(&self) -> &[f64; PARAMETER_COUNT] {
        &self.values
    }

    /// Lower exposure bound.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.values[25]
    }

    /// Upper exposure bound.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.values[26]
    }

    /// Typed parameters of one family.
    pub fn family(&self, family: Family) -> FamilyParameters {
        let v = &self.values;
        match family {
            Family::Exponential => FamilyParameters::Exponential { scale: v[0] },
            Family::Gamma => FamilyParameters::Gamma {
                scale: v[1],
                shape: v[2],
            },
            Family::Fisk => FamilyParameters::Fisk {
                scale: v[3],
                shape: v[4],
            },
            Family::Gumbel => FamilyParameters::Gumbel {
                scale: v[5],
                loc: v[6],
            },
            Family::Weibull => FamilyParameters::Weibull {
                scale: v[7],
                shape: v[8],
            },
            Family::LogNormal => FamilyParameters::LogNormal {
                scale: v[9],
                s: v[10],
            },
            Family::Normal => FamilyParameters::Normal {
                scale: v[11],
                loc: v[12],
            },
            Family::Beta => FamilyParameters::Beta {
                scale: v[13],
                loc: v[14],
                a: v[15],
                b: v[16],
            },
            Family::MirroredGamma => FamilyParameters::MirroredGamma {
                upper: v[26],
                scale: v[17],
                shape: v[18],
            },
            Family::MirroredGumbel => FamilyParameters::MirroredGumbel {
                upper: v[26],
                scale: v[19],
                loc: v[20],
            },
            Family::InverseGamma => FamilyParameters::InverseGamma {
                scale: v[21],
                shape: v[22],
            },
            Family::InverseWeibull => FamilyParameters::InverseWeibull {
                scale: v[23],
                shape: v[24],
            },
        }
    }
}
