//! The fixed ensemble of twelve exposure distribution families.

use std::fmt;

/// Distribution family of the exposure ensemble.
///
/// Order matches the ensemble weight columns
/// `exp, gamma, llogis, gumbel, weibull, lnorm, norm, betasr, mgamma,
/// mgumbel, invgamma, invweibull`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Family {
    /// Exponential.
    Exponential,
    /// Gamma.
    Gamma,
    /// Fisk (log-logistic).
    Fisk,
    /// Gumbel (right-skewed).
    Gumbel,
    /// Weibull.
    Weibull,
    /// Log-normal.
    LogNormal,
    /// Normal.
    Normal,
    /// Four-parameter Beta on a widened support.
    Beta,
    /// Gamma reflected about the upper bound.
    MirroredGamma,
    /// Gumbel reflected about the upper bound.
    MirroredGumbel,
    /// Inverse gamma.
    InverseGamma,
    /// Inverse Weibull (Fréchet).
    InverseWeibull,
}

impl Family {
    /// Number of families in the ensemble.
    pub const COUNT: usize = 12;

    /// All families in ensemble order.
    pub const ALL: [Family; 12] = [
        Family::Exponential,
        Family::Gamma,
        Family::Fisk,
        Family::Gumbel,
        Family::Weibull,
        Family::LogNormal,
        Family::Normal,
        Family::Beta,
        Family::MirroredGamma,
        Family::MirroredGumbel,
        Family::InverseGamma,
        Family::InverseWeibull,
    ];

    /// Position in ensemble order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Family at position `index` in ensemble order.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Column name of this family in an ensemble weight table.
    pub fn weight_column(self) -> &'static str {
        match self {
            Family::Exponential => "exp",
            Family::Gamma => "gamma",
            Family::Fisk => "llogis",
            Family::Gumbel => "gumbel",
            Family::Weibull => "weibull",
            Family::LogNormal => "lnorm",
            Family::Normal => "norm",
            Family::Beta => "betasr",
            Family::MirroredGamma => "mgamma",
            Family::MirroredGumbel => "mgumbel",
            Family::InverseGamma => "invgamma",
            Family::InverseWeibull => "invweibull",
        }
    }

    /// Family whose weight column is `column`.
    pub fn from_weight_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.weight_column() == column)
    }

    /// Conventional distribution name.
    pub fn name(self) -> &'static str {
        match self {
            Family::Exponential => "expon",
            Family::Gamma => "gamma",
            Family::Fisk => "fisk",
            Family::Gumbel => "gumbel_r",
            Family::Weibull => "weibull_min",
            Family::LogNormal => "lognorm",
            Family::Normal => "norm",
            Family::Beta => "beta",
            Family::MirroredGamma => "mirrored_gamma",
            Family::MirroredGumbel => "mirrored_gumbel_r",
            Family::InverseGamma => "invgamma",
            Family::InverseWeibull => "invweibull",
        }
    }

    /// Whether draws are reflected as `upper − draw`.
    #[inline]
    pub fn is_mirrored(self) -> bool {
        matches!(self, Family::MirroredGamma | Family::MirroredGumbel)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_order_matches_all() {
        for (i, family) in Family::ALL.iter().enumerate() {
            assert_eq!(family.index(), i);
            assert_eq!(Family::from_index(i), Some(*family));
        }
        assert_eq!(Family::from_index(12), None);
    }

    #[test]
    fn test_weight_columns_round_trip() {
        for family in Family::ALL {
            assert_eq!(Family::from_weight_column(family.weight_column()), Some(family));
        }
        assert_eq!(Family::from_weight_column("cauchy"), None);
    }

    #[test]
    fn test_mirrored_families() {
        let mirrored: Vec<usize> = Family::ALL
            .iter()
            .filter(|f| f.is_mirrored())
            .map(|f| f.index())
            .collect();
        assert_eq!(mirrored, vec![8, 9]);
    }
}
