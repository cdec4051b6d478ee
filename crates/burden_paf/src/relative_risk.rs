//! Log-linear dose-response relative risk.
//!
//! Risk rises by a factor `rf` per `unit` of intake away from the TMREL, on
//! one side only:
//!
//! - [`Direction::Low`]: too little intake is harmful,
//!   `RR(x) = rf^((TMREL − x)/unit)` for `x < TMREL`, else 1
//! - [`Direction::High`]: too much intake is harmful,
//!   `RR(x) = rf^((x − TMREL)/unit)` for `x > TMREL`, else 1

use std::fmt;

/// Side of the TMREL on which exposure carries risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Intake below the TMREL raises risk.
    Low,
    /// Intake above the TMREL raises risk.
    High,
}

impl Direction {
    /// Maps a "risk is low intake" flag to a direction.
    #[inline]
    pub fn from_low_flag(low: bool) -> Self {
        if low {
            Direction::Low
        } else {
            Direction::High
        }
    }

    /// Lower-case label.
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Low => "low",
            Direction::High => "high",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Relative-risk curve of one (risk, disease, age group) for one run.
///
/// # Example
///
/// ```
/// use burden_paf::relative_risk::{Direction, RelativeRisk};
///
/// let rr = RelativeRisk::new(10.0, 1.5, 2.0, Direction::Low);
/// assert_eq!(rr.rr(12.0), 1.0);
/// assert!((rr.rr(6.0) - 1.5_f64.powi(2)).abs() < 1e-12);
/// assert_eq!(rr.derivative(12.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeRisk {
    /// Theoretical minimum risk exposure level.
    pub tmrel: f64,
    /// Risk factor per unit of exposure.
    pub rf: f64,
    /// Exposure unit the risk factor refers to.
    pub unit: f64,
    /// Harmful side of the TMREL.
    pub direction: Direction,
}

impl RelativeRisk {
    /// Creates a curve.
    pub fn new(tmrel: f64, rf: f64, unit: f64, direction: Direction) -> Self {
        Self {
            tmrel,
            rf,
            unit,
            direction,
        }
    }

    /// Signed distance into the harmful side in units, `None` on the safe side.
    #[inline]
    fn excess(&self, x: f64) -> Option<f64> {
        match self.direction {
            Direction::Low if x < self.tmrel => Some((self.tmrel - x) / self.unit),
            Direction::High if x > self.tmrel => Some((x - self.tmrel) / self.unit),
            _ => None,
        }
    }

    /// Relative risk at exposure `x`.
    #[inline]
    pub fn rr(&self, x: f64) -> f64 {
        match self.excess(x) {
            Some(e) => self.rf.powf(e),
            None => 1.0,
        }
    }

    /// Derivative of the relative risk with respect to exposure.
    ///
    /// Zero on the safe side, `∓(ln rf / unit) · RR(x)` on the harmful side
    /// (negative for [`Direction::Low`]).
    #[inline]
    pub fn derivative(&self, x: f64) -> f64 {
        match self.excess(x) {
            Some(e) => {
                let slope = self.rf.ln() / self.unit * self.rf.powf(e);
                match self.direction {
                    Direction::Low => -slope,
                    Direction::High => slope,
                }
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_high_direction() {
        let rr = RelativeRisk::new(0.0, 2.0, 1.0, Direction::High);
        assert_eq!(rr.rr(0.0), 1.0);
        assert_eq!(rr.rr(-3.0), 1.0);
        assert_relative_eq!(rr.rr(3.0), 8.0, max_relative = 1e-14);
    }

    #[test]
    fn test_low_direction_tmrel_is_safe() {
        let rr = RelativeRisk::new(25.0, 1.2, 5.0, Direction::Low);
        assert_eq!(rr.rr(25.0), 1.0);
        assert_eq!(rr.rr(40.0), 1.0);
        assert_relative_eq!(rr.rr(15.0), 1.44, max_relative = 1e-14);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        for direction in [Direction::Low, Direction::High] {
            let rr = RelativeRisk::new(10.0, 1.3, 4.0, direction);
            for &x in &[2.0, 7.5, 12.0, 18.0] {
                let h = 1e-6;
                let fd = (rr.rr(x + h) - rr.rr(x - h)) / (2.0 * h);
                assert_relative_eq!(rr.derivative(x), fd, max_relative = 1e-6, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_derivative_sign() {
        let low = RelativeRisk::new(10.0, 2.0, 1.0, Direction::Low);
        let high = RelativeRisk::new(10.0, 2.0, 1.0, Direction::High);
        assert!(low.derivative(5.0) < 0.0);
        assert!(high.derivative(15.0) > 0.0);
        assert_eq!(low.derivative(15.0), 0.0);
        assert_eq!(high.derivative(5.0), 0.0);
    }

    #[test]
    fn test_direction_from_flag() {
        assert_eq!(Direction::from_low_flag(true), Direction::Low);
        assert_eq!(Direction::from_low_flag(false).to_string(), "high");
    }
}
