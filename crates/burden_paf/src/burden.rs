//! DALY attribution from joint PAFs.

use crate::error::PafError;
use crate::tables::BurdenTotals;

/// Morbidity and mortality values of one quantity (PAF, derivative, change).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomePair {
    /// Applied to YLDs.
    pub morbidity: f64,
    /// Applied to YLLs.
    pub mortality: f64,
}

impl OutcomePair {
    /// Creates a pair.
    #[inline]
    pub fn new(morbidity: f64, mortality: f64) -> Self {
        Self {
            morbidity,
            mortality,
        }
    }

    /// The same value in both slots.
    #[inline]
    pub fn shared(value: f64) -> Self {
        Self::new(value, value)
    }
}

/// Attributable DALYs, `morbidity · YLD + mortality · YLL`.
///
/// # Errors
///
/// Returns `PafError::DegenerateBurden` if the result is NaN.
///
/// # Example
///
/// ```
/// use burden_paf::burden::{attributable_dalys, OutcomePair};
/// use burden_paf::tables::BurdenTotals;
///
/// let totals = BurdenTotals { yld: 100.0, yll: 300.0 };
/// let dalys = attributable_dalys(OutcomePair::new(0.1, 0.2), totals).unwrap();
/// assert!((dalys - 70.0).abs() < 1e-12);
/// ```
pub fn attributable_dalys(fractions: OutcomePair, totals: BurdenTotals) -> Result<f64, PafError> {
    let dalys = fractions.morbidity * totals.yld + fractions.mortality * totals.yll;
    if dalys.is_nan() {
        return Err(PafError::DegenerateBurden {
            morbidity: fractions.morbidity,
            mortality: fractions.mortality,
        });
    }
    Ok(dalys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_pair() {
        let p = OutcomePair::shared(0.3);
        assert_eq!(p.morbidity, p.mortality);
    }

    #[test]
    fn test_nan_is_degenerate() {
        let totals = BurdenTotals { yld: 1.0, yll: 1.0 };
        let err = attributable_dalys(OutcomePair::new(f64::NAN, 0.1), totals).unwrap_err();
        assert!(matches!(err, PafError::DegenerateBurden { .. }));
    }

    #[test]
    fn test_zero_fractions_zero_burden() {
        let totals = BurdenTotals {
            yld: 1e6,
            yll: 2e6,
        };
        assert_eq!(attributable_dalys(OutcomePair::default(), totals).unwrap(), 0.0);
    }
}
