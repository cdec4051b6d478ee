//! Brent's bounded scalar minimisation.
//!
//! Combines golden-section steps with successive parabolic interpolation.
//! The starting point is ignored: the search always begins at the golden
//! point of the interval.

use super::interval::finite_or_inf;
use super::{Interval, Minimum, SolverConfig};
use crate::types::SolverError;

const GOLDEN: f64 = 0.381_966_011_250_105_1;

/// Bounded Brent minimiser.
///
/// # Example
///
/// ```
/// use burden_core::math::solvers::{BrentMinimiser, Interval, SolverConfig};
///
/// let solver = BrentMinimiser::new(SolverConfig::default());
/// let interval = Interval::new(0.0, 4.0).unwrap();
/// let min = solver.minimise(|x| (x - 1.0).powi(2), interval).unwrap();
/// assert!((min.x - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct BrentMinimiser {
    config: SolverConfig,
}

impl BrentMinimiser {
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
        let sqrt_eps = f64::EPSILON.sqrt();
        let xatol = self.config.x_tolerance;
        let eval = |x: f64| finite_or_inf(f(x));

        let (mut a, mut b) = (interval.lower(), interval.upper());
        let mut x = a + GOLDEN * (b - a);
        let (mut w, mut v) = (x, x);
        let mut fx = eval(x);
        let (mut fw, mut fv) = (fx, fx);
        let (mut d, mut e) = (0.0_f64, 0.0_f64);

        for iteration in 0..self.config.max_iterations {
            let xm = 0.5 * (a + b);
            let tol1 = sqrt_eps * x.abs() + xatol / 3.0;
            let tol2 = 2.0 * tol1;

            if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
                if !fx.is_finite() {
                    return Err(SolverError::NumericalInstability(
                        "Brent found no finite objective value".to_string(),
                    ));
                }
                return Ok(Minimum::new(x, fx, iteration));
            }

            let mut golden_step = true;
            if e.abs() > tol1 && fx.is_finite() && fw.is_finite() && fv.is_finite() {
                let r = (x - w) * (fx - fv);
                let mut q = (x - v) * (fx - fw);
                let mut p = (x - v) * q - (x - w) * r;
                q = 2.0 * (q - r);
                if q > 0.0 {
                    p = -p;
                }
                q = q.abs();
                let e_prev = e;
                e = d;

                if p.abs() < (0.5 * q * e_prev).abs() && p > q * (a - x) && p < q * (b - x) {
                    d = p / q;
                    let u = x + d;
                    if (u - a) < tol2 || (b - u) < tol2 {
                        d = tol1.copysign(xm - x);
                    }
                    golden_step = false;
                }
            }
            if golden_step {
                e = if x >= xm { a - x } else { b - x };
                d = GOLDEN * e;
            }

            let u = if d.abs() >= tol1 {
                x + d
            } else {
                x + tol1.copysign(d)
            };
            let fu = eval(u);

            if fu <= fx {
                if u >= x {
                    a = x;
                } else {
                    b = x;
                }
                v = w;
                fv = fw;
                w = x;
                fw = fx;
                x = u;
                fx = fu;
            } else {
                if u < x {
                    a = u;
                } else {
                    b = u;
                }
                if fu <= fw || w == x {
                    v = w;
                    fv = fw;
                    w = u;
                    fw = fu;
                } else if fu <= fv || v == x || v == w {
                    v = u;
                    fv = fu;
                }
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}
