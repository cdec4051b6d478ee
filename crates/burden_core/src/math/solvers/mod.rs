//! Bounded scalar minimisers for moment-matching calibration.
//!
//! ## Available Minimisers
//!
//! - [`NelderMeadMinimiser`]: Simplex search from a starting point
//! - [`BrentMinimiser`]: Golden-section plus parabolic interpolation
//! - [`LevenbergMarquardtMinimiser`]: Damped Gauss-Newton on the objective as a residual
//! - [`GoldenSectionMinimiser`]: Derivative-free bracket reduction
//! - [`GridSearchMinimiser`]: Exhaustive grid with local polish
//!
//! [`MinimiserChain`] runs them in a fixed order until a caller-supplied
//! acceptance test passes, returning `SolverError::MethodsExhausted` when
//! none does.
//!
//! ## Configuration
//!
//! All minimisers use [`SolverConfig`] for configuring:
//! - `x_tolerance`: Relative tolerance on the abscissa (default: 1e-10)
//! - `f_tolerance`: Tolerance on objective values (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 500)
//!
//! ## Examples
//!
//! ```
//! use burden_core::math::solvers::{GoldenSectionMinimiser, Interval, SolverConfig};
//!
//! let solver = GoldenSectionMinimiser::new(SolverConfig::default());
//! let interval = Interval::new(0.0, std::f64::consts::PI).unwrap();
//! let min = solver.minimise(|x| -x.sin(), interval).unwrap();
//! assert!((min.x - std::f64::consts::FRAC_PI_2).abs() < 1e-6);
//! ```

mod brent_min;
mod chain;
mod config;
mod golden_section;
mod grid;
mod interval;
mod levenberg_marquardt;
mod minimum;
mod nelder_mead;

// Re-export public types at module level
pub use brent_min::BrentMinimiser;
pub use chain::{MinimisationMethod, MinimiserChain};
pub use config::SolverConfig;
pub use golden_section::GoldenSectionMinimiser;
pub use grid::{GridSearchMinimiser, DEFAULT_GRID_POINTS};
pub use interval::Interval;
pub use levenberg_marquardt::{LMDamping, LevenbergMarquardtMinimiser};
pub use minimum::Minimum;
pub use nelder_mead::NelderMeadMinimiser;
