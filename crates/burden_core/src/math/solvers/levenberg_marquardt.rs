//! Levenberg-Marquardt minimisation of a non-negative scalar objective.
//!
//! The objective `f(x) ≥ 0` is treated as a residual, `r(x) = f(x)`, so the
//! sum of squares `r²` shares its minimisers, and the damped Gauss-Newton update
//!
//! ```text
//! (J² + λ) δ = −J r
//! x_{n+1} = x_n + δ
//! ```
//!
//! is iterated with a forward-difference Jacobian `J = dr/dx`. Steps are
//! projected onto the search interval; `λ` shrinks on accepted steps and
//! grows on rejected ones.

use super::interval::finite_or_inf;
use super::{Interval, Minimum, SolverConfig};
use crate::types::SolverError;

/// Damping schedule for the Levenberg-Marquardt minimiser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LMDamping {
    /// Initial damping factor.
    pub initial_lambda: f64,
    /// Factor to increase lambda on rejected step.
    pub lambda_up: f64,
    /// Factor to decrease lambda on accepted step.
    pub lambda_down: f64,
    /// Minimum damping factor.
    pub min_lambda: f64,
    /// Maximum damping factor.
    pub max_lambda: f64,
}

impl Default for LMDamping {
    fn default() -> Self {
        Self {
            initial_lambda: 1e-3,
            lambda_up: 10.0,
            lambda_down: 0.1,
            min_lambda: 1e-10,
            max_lambda: 1e10,
        }
    }
}

/// Scalar Levenberg-Marquardt minimiser.
///
/// # Example
///
/// ```
/// use burden_core::math::solvers::{Interval, LevenbergMarquardtMinimiser, SolverConfig};
///
/// let solver = LevenbergMarquardtMinimiser::new(SolverConfig::default());
/// let interval = Interval::new(0.0, 10.0).unwrap();
/// let min = solver.minimise(|x| (x * x - 2.0).abs(), 1.0, interval).unwrap();
/// assert!((min.x - 2.0_f64.sqrt()).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct LevenbergMarquardtMinimiser {
    config: SolverConfig,
    damping: LMDamping,
}

impl LevenbergMarquardtMinimiser {
    /// Create a new minimiser with the default damping schedule.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            damping: LMDamping::default(),
        }
    }

    /// Override the damping schedule.
    pub fn with_damping(mut self, damping: LMDamping) -> Self {
        self.damping = damping;
        self
    }

    /// Minimise `f` starting from `x0` inside `interval`.
    ///
    /// Negative objective values are treated as zero residual.
    ///
    /// # Errors
    ///
    /// - `SolverError::NumericalInstability` if the objective is non-finite at the start
    /// - `SolverError::MaxIterationsExceeded` if no convergence criterion is met
    pub fn minimise<F>(&self, f: F, x0: f64, interval: Interval) -> Result<Minimum, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let residual = |x: f64| finite_or_inf(f(x)).max(0.0);
        let (x_tol, f_tol) = (self.config.x_tolerance, self.config.f_tolerance);
        let damping = &self.damping;

        let mut x = interval.clamp(x0);
        let mut r = residual(x);
        if !r.is_finite() {
            return Err(SolverError::NumericalInstability(format!(
                "Levenberg-Marquardt objective is not finite at start point {}",
                x
            )));
        }
        let mut lambda = damping.initial_lambda;

        for iteration in 0..self.config.max_iterations {
            if r < f_tol {
                return Ok(Minimum::new(x, r, iteration));
            }

            // Forward difference, stepping inwards at the upper bound
            let mut h = 1e-8 * x.abs().max(1.0);
            if x + h > interval.upper() {
                h = -h;
            }
            let jacobian = (residual(x + h) - r) / h;
            if !jacobian.is_finite() {
                lambda = (lambda * damping.lambda_up).min(damping.max_lambda);
                if lambda >= damping.max_lambda {
                    return Ok(Minimum::new(x, r, iteration));
                }
                continue;
            }

            let delta = -jacobian * r / (jacobian * jacobian + lambda);
            let trial = interval.clamp(x + delta);
            if (trial - x).abs() <= x_tol * (1.0 + x.abs()) {
                return Ok(Minimum::new(x, r, iteration));
            }

            let trial_r = residual(trial);
            if trial_r < r {
                x = trial;
                r = trial_r;
                lambda = (lambda * damping.lambda_down).max(damping.min_lambda);
            } else {
                lambda = (lambda * damping.lambda_up).min(damping.max_lambda);
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lm_zero_residual_problem() {
        let solver = LevenbergMarquardtMinimiser::new(SolverConfig::default());
        let iv = Interval::new(0.0, 10.0).unwrap();
        let min = solver.minimise(|x| (x.ln() - 1.0).abs(), 1.0, iv).unwrap();
        assert_relative_eq!(min.x, std::f64::consts::E, epsilon = 1e-6);
    }

    #[test]
    fn test_lm_respects_bounds() {
        let solver = LevenbergMarquardtMinimiser::new(SolverConfig::default());
        let iv = Interval::new(0.0, 1.0).unwrap();
        let min = solver.minimise(|x| (x - 5.0).powi(2), 0.5, iv).unwrap();
        assert!(iv.contains(min.x));
        assert_relative_eq!(min.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_lm_non_finite_start() {
        let solver = LevenbergMarquardtMinimiser::new(SolverConfig::default());
        let iv = Interval::new(0.0, 1.0).unwrap();
        assert!(matches!(
            solver.minimise(|_| f64::INFINITY, 0.5, iv),
            Err(SolverError::NumericalInstability(_))
        ));
    }

    #[test]
    fn test_damping_default() {
        let d = LMDamping::default();
        assert!(d.lambda_up > 1.0 && d.lambda_down < 1.0);
        assert!(d.min_lambda < d.initial_lambda && d.initial_lambda < d.max_lambda);
    }
}
