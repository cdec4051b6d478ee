//! Tolerances shared by the minimisers of a fallback chain.

use crate::types::SolverError;

/// Stopping rules for every method in a [`MinimiserChain`](super::MinimiserChain).
///
/// A method stops once its bracket or simplex is narrower than
/// `x_tolerance * (1 + |x|)`, or when the objective improves by less than
/// `f_tolerance` between iterations. Methods that have not converged
/// after `max_iterations` return `SolverError::MaxIterationsExceeded`.
///
/// # Example
///
/// ```
/// use burden_core::math::solvers::SolverConfig;
///
/// let config = SolverConfig::new(1e-12, 200).unwrap();
/// assert_eq!(config.max_iterations, 200);
/// assert!(SolverConfig::new(0.0, 200).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Relative tolerance on the abscissa.
    pub x_tolerance: f64,
    /// Absolute tolerance on successive objective values.
    pub f_tolerance: f64,
    /// Iteration limit per method.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            x_tolerance: 1e-10,
            f_tolerance: 1e-10,
            max_iterations: 500,
        }
    }
}

impl SolverConfig {
    /// Config with the given abscissa tolerance and iteration limit.
    ///
    /// # Errors
    ///
    /// `SolverError::InvalidConfig` unless the tolerance is positive and
    /// finite and at least one iteration is allowed.
    pub fn new(x_tolerance: f64, max_iterations: usize) -> Result<Self, SolverError> {
        Self {
            x_tolerance,
            max_iterations,
            ..Self::default()
        }
        .validated()
    }

    /// Replaces the objective tolerance.
    pub fn with_f_tolerance(mut self, f_tolerance: f64) -> Result<Self, SolverError> {
        self.f_tolerance = f_tolerance;
        self.validated()
    }

    /// Checks every field, returning the config unchanged when usable.
    pub fn validated(self) -> Result<Self, SolverError> {
        if !(self.x_tolerance.is_finite() && self.x_tolerance > 0.0) {
            return Err(SolverError::InvalidConfig(format!(
                "x_tolerance must be positive, got {}",
                self.x_tolerance
            )));
        }
        if !(self.f_tolerance.is_finite() && self.f_tolerance >= 0.0) {
            return Err(SolverError::InvalidConfig(format!(
                "f_tolerance must be non-negative, got {}",
                self.f_tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}
