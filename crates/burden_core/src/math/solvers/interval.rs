//! Closed search interval shared by the bounded minimisers.

use crate::types::SolverError;

/// Closed interval `[lower, upper]` a minimiser is confined to.
///
/// # Example
///
/// ```
/// use burden_core::math::solvers::Interval;
///
/// let interval = Interval::new(1e-15, std::f64::consts::PI).unwrap();
/// assert_eq!(interval.clamp(4.0), std::f64::consts::PI);
/// assert!(Interval::new(2.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Interval {
    /// Creates an interval, validating that both ends are finite and ordered.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::InvalidBounds` otherwise.
    pub fn new(lower: f64, upper: f64) -> Result<Self, SolverError> {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(SolverError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Lower end.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper end.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Interval width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Projects `x` onto the interval. NaN maps to the midpoint.
    #[inline]
    pub fn clamp(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.5 * (self.lower + self.upper);
        }
        x.clamp(self.lower, self.upper)
    }

    /// Whether `x` lies inside the interval.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }
}

/// Objective value with NaN mapped to `+∞`, so comparisons stay total.
#[inline]
pub(crate) fn finite_or_inf(value: f64) -> f64 {
    if value.is_nan() {
        f64::INFINITY
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_validation() {
        assert!(Interval::new(0.0, 1.0).is_ok());
        assert!(matches!(
            Interval::new(1.0, 1.0),
            Err(SolverError::InvalidBounds { .. })
        ));
        assert!(Interval::new(0.0, f64::INFINITY).is_err());
        assert!(Interval::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_interval_clamp_and_contains() {
        let iv = Interval::new(-1.0, 3.0).unwrap();
        assert_eq!(iv.clamp(-5.0), -1.0);
        assert_eq!(iv.clamp(2.0), 2.0);
        assert_eq!(iv.clamp(f64::NAN), 1.0);
        assert!(iv.contains(3.0));
        assert!(!iv.contains(3.1));
        assert_eq!(iv.width(), 4.0);
    }

    #[test]
    fn test_finite_or_inf() {
        assert_eq!(finite_or_inf(f64::NAN), f64::INFINITY);
        assert_eq!(finite_or_inf(2.5), 2.5);
    }
}
