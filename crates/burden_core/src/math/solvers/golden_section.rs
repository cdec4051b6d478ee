//! Golden-section search on a closed interval.

use super::interval::finite_or_inf;
use super::{Interval, Minimum, SolverConfig};
use crate::types::SolverError;

const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Golden-section minimiser.
///
/// Assumes the objective is unimodal on the interval; otherwise converges
/// to some local minimum.
#[derive(Debug, Clone)]
pub struct GoldenSectionMinimiser {
    config: SolverConfig,
}

impl GoldenSectionMinimiser {
    /// Create a new minimiser with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Minimise `f` over `interval`.
    ///
    /// # Errors
    ///
    /// - `SolverError::MaxIterationsExceeded` if the bracket does not shrink in time
    /// - `SolverError::NumericalInstability` if no finite objective value is found
    pub fn minimise<F>(&self, f: F, interval: Interval) -> Result<Minimum, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let eval = |x: f64| finite_or_inf(f(x));
        let (mut a, mut b) = (interval.lower(), interval.upper());
        let mut c = b - INV_PHI * (b - a);
        let mut d = a + INV_PHI * (b - a);
        let mut fc = eval(c);
        let mut fd = eval(d);

        for iteration in 0..self.config.max_iterations {
            let mid = 0.5 * (a + b);
            if (b - a) <= self.config.x_tolerance * (1.0 + mid.abs()) {
                let (x, value) = if fc <= fd { (c, fc) } else { (d, fd) };
                if !value.is_finite() {
                    return Err(SolverError::NumericalInstability(
                        "Golden-section search found no finite objective value".to_string(),
                    ));
                }
                return Ok(Minimum::new(x, value, iteration));
            }

            if fc <= fd {
                b = d;
                d = c;
                fd = fc;
                c = b - INV_PHI * (b - a);
                fc = eval(c);
            } else {
                a = c;
                c = d;
                fc = fd;
                d = a + INV_PHI * (b - a);
                fd = eval(d);
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}
