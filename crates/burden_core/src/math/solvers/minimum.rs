//! Result type shared by all scalar minimisers.

/// Location and value of a minimum found by a scalar minimiser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimum {
    /// Abscissa of the minimum.
    pub x: f64,
    /// Objective value at `x`.
    pub value: f64,
    /// Iterations spent.
    pub iterations: usize,
}

impl Minimum {
    /// Creates a new result.
    pub fn new(x: f64, value: f64, iterations: usize) -> Self {
        Self {
            x,
            value,
            iterations,
        }
    }
}
