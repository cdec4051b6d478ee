//! Exhaustive grid search with a golden-section polish.

use super::golden_section::GoldenSectionMinimiser;
use super::interval::finite_or_inf;
use super::{Interval, Minimum, SolverConfig};
use crate::math::integration::linspace;
use crate::types::SolverError;

/// Default number of grid points.
pub const DEFAULT_GRID_POINTS: usize = 401;

/// Evaluates the objective on an even grid, then refines inside the cells
/// adjacent to the best grid point.
///
/// Slow but insensitive to the starting point, which makes it the last
/// resort of a fallback chain.
#[derive(Debug, Clone)]
pub struct GridSearchMinimiser {
    config: SolverConfig,
    points: usize,
}

impl GridSearchMinimiser {
    /// Create a new minimiser with [`DEFAULT_GRID_POINTS`] grid points.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            points: DEFAULT_GRID_POINTS,
        }
    }

    /// Override the number of grid points (at least 3).
    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points.max(3);
        self
    }

    /// Minimise `f` over `interval`.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::NumericalInstability` if the objective is
    /// non-finite at every grid point.
    pub fn minimise<F>(&self, f: F, interval: Interval) -> Result<Minimum, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let grid = linspace(interval.lower(), interval.upper(), self.points);
        let (best_idx, best_value) = grid
            .iter()
            .map(|&x| finite_or_inf(f(x)))
            .enumerate()
            .fold((0, f64::INFINITY), |acc, (i, v)| if v < acc.1 { (i, v) } else { acc });

        if !best_value.is_finite() {
            return Err(SolverError::NumericalInstability(
                "Grid search found no finite objective value".to_string(),
            ));
        }

        let grid_best = Minimum::new(grid[best_idx], best_value, self.points);
        let lo = grid[best_idx.saturating_sub(1)];
        let hi = grid[(best_idx + 1).min(self.points - 1)];
        let polished = Interval::new(lo, hi)
            .and_then(|cell| GoldenSectionMinimiser::new(self.config).minimise(&f, cell));

        match polished {
            Ok(min) if min.value < grid_best.value => Ok(Minimum::new(
                min.x,
                min.value,
                self.points + min.iterations,
            )),
            _ => Ok(grid_best),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_finds_global_minimum_of_multimodal() {
        // Two wells; the deeper one is at x = 8
        let f = |x: f64| ((x - 2.0).powi(2) * (x - 8.0).powi(2)) - 0.5 * x;
        let solver = GridSearchMinimiser::new(SolverConfig::default());
        let iv = Interval::new(0.0, 10.0).unwrap();
        let min = solver.minimise(f, iv).unwrap();
        assert!((min.x - 8.0).abs() < 0.1);
    }

    #[test]
    fn test_grid_polish_improves_precision() {
        let solver = GridSearchMinimiser::new(SolverConfig::default()).with_points(11);
        let iv = Interval::new(0.0, 1.0).unwrap();
        let min = solver.minimise(|x| (x - 0.337).powi(2), iv).unwrap();
        assert_relative_eq!(min.x, 0.337, epsilon = 1e-6);
    }

    #[test]
    fn test_grid_skips_nan_region() {
        let solver = GridSearchMinimiser::new(SolverConfig::default());
        let iv = Interval::new(0.0, 4.0).unwrap();
        let f = |x: f64| if x < 2.0 { f64::NAN } else { (x - 3.0).powi(2) };
        let min = solver.minimise(f, iv).unwrap();
        assert_relative_eq!(min.x, 3.0, epsilon = 1e-6);
    }
}
