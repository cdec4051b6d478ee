//! Nelder-Mead simplex minimisation in one dimension.
//!
//! The simplex is a pair of points. Reflection, expansion, contraction and
//! shrink steps follow the standard coefficients (1, 2, ½, ½). Every trial
//! point is projected onto the search interval before evaluation.

use super::interval::finite_or_inf;
use super::{Interval, Minimum, SolverConfig};
use crate::types::SolverError;

/// One-dimensional Nelder-Mead minimiser.
///
/// # Example
///
/// ```
/// use burden_core::math::solvers::{Interval, NelderMeadMinimiser, SolverConfig};
///
/// let solver = NelderMeadMinimiser::new(SolverConfig::default());
/// let interval = Interval::new(0.0, 10.0).unwrap();
/// let min = solver.minimise(|x| (x - 3.0).powi(2), 1.0, interval).unwrap();
/// assert!((min.x - 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct NelderMeadMinimiser {
    config: SolverConfig,
}

impl NelderMeadMinimiser {
    /// Create a new minimiser with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Minimise `f` starting from `x0` inside `interval`.
    ///
    /// # Errors
    ///
    /// - `SolverError::MaxIterationsExceeded` if the simplex does not collapse in time
    /// - `SolverError::NumericalInstability` if no finite objective value is found
    pub fn minimise<F>(&self, f: F, x0: f64, interval: Interval) -> Result<Minimum, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let eval = |x: f64| -> (f64, f64) {
            let x = interval.clamp(x);
            (x, finite_or_inf(f(x)))
        };

        let x0 = interval.clamp(x0);
        let step = if x0 != 0.0 { 0.05 * x0 } else { 0.00025 };
        let mut best = eval(x0);
        let mut worst = eval(x0 + step);
        if worst.0 == best.0 {
            worst = eval(x0 - step);
        }

        let (x_tol, f_tol) = (self.config.x_tolerance, self.config.f_tolerance);
        for iteration in 0..self.config.max_iterations {
            if worst.1 < best.1 {
                std::mem::swap(&mut best, &mut worst);
            }

            let x_spread = (worst.0 - best.0).abs();
            let f_spread = (worst.1 - best.1).abs();
            if x_spread <= x_tol * (1.0 + best.0.abs()) && (f_spread <= f_tol || !worst.1.is_finite()) {
                return finish(best, iteration);
            }

            let centre = best.0;
            let reflected = eval(2.0 * centre - worst.0);

            if reflected.1 < best.1 {
                let expanded = eval(3.0 * centre - 2.0 * worst.0);
                worst = if expanded.1 < reflected.1 {
                    expanded
                } else {
                    reflected
                };
                continue;
            }

            if reflected.1 < worst.1 {
                let contracted = eval(centre + 0.5 * (reflected.0 - centre));
                if contracted.1 <= reflected.1 {
                    worst = contracted;
                    continue;
                }
            } else {
                let contracted = eval(centre - 0.5 * (centre - worst.0));
                if contracted.1 < worst.1 {
                    worst = contracted;
                    continue;
                }
            }

            // Shrink towards the best vertex
            worst = eval(best.0 + 0.5 * (worst.0 - best.0));
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}

fn finish(best: (f64, f64), iterations: usize) -> Result<Minimum, SolverError> {
    if !best.1.is_finite() {
        return Err(SolverError::NumericalInstability(
            "Nelder-Mead found no finite objective value".to_string(),
        ));
    }
    Ok(Minimum::new(best.0, best.1, iterations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solver() -> NelderMeadMinimiser {
        NelderMeadMinimiser::new(SolverConfig::default())
    }

    #[test]
    fn test_quadratic_minimum() {
        let iv = Interval::new(-10.0, 10.0).unwrap();
        let min = solver().minimise(|x| (x + 2.5).powi(2) + 1.0, 4.0, iv).unwrap();
        assert_relative_eq!(min.x, -2.5, epsilon = 1e-6);
        assert_relative_eq!(min.value, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_minimum_on_boundary() {
        let iv = Interval::new(1.0, 5.0).unwrap();
        let min = solver().minimise(|x| x, 3.0, iv).unwrap();
        assert_relative_eq!(min.x, 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_start_at_zero_uses_absolute_step() {
        let iv = Interval::new(-1.0, 1.0).unwrap();
        let min = solver().minimise(|x| (x - 0.3).powi(2), 0.0, iv).unwrap();
        assert_relative_eq!(min.x, 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_all_nan_objective_fails() {
        let iv = Interval::new(0.0, 1.0).unwrap();
        assert!(solver().minimise(|_| f64::NAN, 0.5, iv).is_err());
    }

    #[test]
    fn test_iteration_limit() {
        let tight = NelderMeadMinimiser::new(SolverConfig::new(1e-15, 3).unwrap());
        let iv = Interval::new(-100.0, 100.0).unwrap();
        assert!(matches!(
            tight.minimise(|x| (x - 50.0).powi(2), 1.0, iv),
            Err(SolverError::MaxIterationsExceeded { iterations: 3 })
        ));
    }
}
