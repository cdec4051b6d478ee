//! Exposure cells: summary statistics of intake for one (risk, age, sex).

use crate::calibration::CalibrationError;
use burden_core::types::{AgeId, RiskId, SexId};

/// Key of an exposure cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellKey {
    /// Dietary risk.
    pub risk: RiskId,
    /// Age group.
    pub age: AgeId,
    /// Sex.
    pub sex: SexId,
}

impl CellKey {
    /// Creates a key.
    pub fn new(risk: RiskId, age: AgeId, sex: SexId) -> Self {
        Self { risk, age, sex }
    }
}

/// Exposure bounds expressed as multiples of the mean.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelativeBounds {
    /// Lower-bound multiplier.
    pub xmin: f64,
    /// Upper-bound multiplier.
    pub xmax: f64,
}

impl RelativeBounds {
    /// Creates relative bounds.
    pub fn new(xmin: f64, xmax: f64) -> Self {
        Self { xmin, xmax }
    }

    /// Validate the multipliers.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::InvalidBounds` unless both multipliers are
    ///   finite and `xmin < xmax`
    /// - `CalibrationError::BoundsExcludeMean` unless `xmin ≤ 1 ≤ xmax`
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if !(self.xmin.is_finite() && self.xmax.is_finite() && self.xmin < self.xmax) {
            return Err(CalibrationError::InvalidBounds {
                lower: self.xmin,
                upper: self.xmax,
            });
        }
        // rejection sampling around the mean never terminates otherwise
        if !(self.xmin <= 1.0 && 1.0 <= self.xmax) {
            return Err(CalibrationError::BoundsExcludeMean {
                xmin: self.xmin,
                xmax: self.xmax,
            });
        }
        Ok(())
    }
}

/// Summary statistics of intake for one (risk, age group, sex) cell.
///
/// Invariants: `mean > 0`, `sd ≥ 0`, `upper > lower`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExposureCell {
    /// Cell key.
    pub key: CellKey,
    /// Mean intake.
    pub mean: f64,
    /// Standard deviation of intake.
    pub sd: f64,
    /// Bounds relative to the mean.
    pub bounds: RelativeBounds,
}

impl ExposureCell {
    /// Creates a validated cell.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::InvalidMoments` if `mean ≤ 0`, `sd < 0` or either is not finite
    /// - `CalibrationError::InvalidBounds` if the bounds are not ordered
    /// - `CalibrationError::BoundsExcludeMean` if the bounds do not bracket the mean
    ///
    /// # Example
    ///
    /// ```
    /// use burden_core::types::{AgeId, RiskId, SexId};
    /// use burden_models::exposure::{CellKey, ExposureCell, RelativeBounds};
    ///
    /// let key = CellKey::new(RiskId(3), AgeId(2), SexId(1));
    /// let cell = ExposureCell::new(key, 80.0, 20.0, RelativeBounds::new(0.1, 4.0)).unwrap();
    /// assert_eq!(cell.lower(), 8.0);
    /// assert_eq!(cell.upper(), 320.0);
    /// assert!(ExposureCell::new(key, -1.0, 20.0, RelativeBounds::new(0.1, 4.0)).is_err());
    /// ```
    pub fn new(
        key: CellKey,
        mean: f64,
        sd: f64,
        bounds: RelativeBounds,
    ) -> Result<Self, CalibrationError> {
        let cell = Self {
            key,
            mean,
            sd,
            bounds,
        };
        cell.validate()?;
        Ok(cell)
    }

    /// Check the cell invariants.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if !(self.mean.is_finite() && self.sd.is_finite() && self.mean > 0.0 && self.sd >= 0.0) {
            return Err(CalibrationError::InvalidMoments {
                mean: self.mean,
                sd: self.sd,
            });
        }
        self.bounds.validate()
    }

    /// Absolute lower bound, `xmin · mean`.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.bounds.xmin * self.mean
    }

    /// Absolute upper bound, `xmax · mean`.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.bounds.xmax * self.mean
    }

    /// Variance, `sd²`.
    #[inline]
    pub fn variance(&self) -> f64 {
        self.sd * self.sd
    }

    /// Mean-to-SD ratio that selects the Weibull closed-form regimes.
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.mean / self.sd
    }

    /// The same cell with a different mean, bounds still relative.
    ///
    /// # Errors
    ///
    /// Returns `CalibrationError::InvalidMoments` if the new mean is not positive.
    pub fn with_mean(&self, mean: f64) -> Result<Self, CalibrationError> {
        Self::new(self.key, mean, self.sd, self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> CellKey {
        CellKey::new(RiskId(0), AgeId(0), SexId(0))
    }

    #[test]
    fn test_bounds_scale_with_mean() {
        let cell = ExposureCell::new(key(), 50.0, 5.0, RelativeBounds::new(0.5, 3.0)).unwrap();
        assert_eq!(cell.lower(), 25.0);
        assert_eq!(cell.upper(), 150.0);
        assert_eq!(cell.variance(), 25.0);
        assert_eq!(cell.ratio(), 10.0);
    }

    #[test]
    fn test_invalid_cells_rejected() {
        let b = RelativeBounds::new(0.5, 3.0);
        assert!(matches!(
            ExposureCell::new(key(), 0.0, 1.0, b),
            Err(CalibrationError::InvalidMoments { .. })
        ));
        assert!(ExposureCell::new(key(), 1.0, -1.0, b).is_err());
        assert!(ExposureCell::new(key(), f64::NAN, 1.0, b).is_err());
        assert!(matches!(
            ExposureCell::new(key(), 1.0, 1.0, RelativeBounds::new(2.0, 2.0)),
            Err(CalibrationError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_bounds_must_bracket_mean() {
        for (xmin, xmax) in [(1.5, 3.0), (0.1, 0.9)] {
            let err = ExposureCell::new(key(), 10.0, 2.0, RelativeBounds::new(xmin, xmax)).unwrap_err();
            assert_eq!(err, CalibrationError::BoundsExcludeMean { xmin, xmax });
            assert!(err.to_string().contains("exclude the mean"));
        }
        // touching the mean is allowed
        assert!(RelativeBounds::new(1.0, 2.0).validate().is_ok());
        assert!(RelativeBounds::new(0.5, 1.0).validate().is_ok());
    }

    #[test]
    fn test_zero_sd_is_a_valid_cell() {
        assert!(ExposureCell::new(key(), 1.0, 0.0, RelativeBounds::new(0.5, 2.0)).is_ok());
    }

    #[test]
    fn test_with_mean_keeps_relative_bounds() {
        let cell = ExposureCell::new(key(), 10.0, 2.0, RelativeBounds::new(0.5, 3.0)).unwrap();
        let scaled = cell.with_mean(20.0).unwrap();
        assert_eq!(scaled.upper(), 60.0);
        assert!(cell.with_mean(0.0).is_err());
    }
}
