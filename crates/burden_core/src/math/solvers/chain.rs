//! Fixed-order fallback over several scalar minimisers.
//!
//! Each method is run in turn; the first result that satisfies the caller's
//! acceptance test wins. A method that errors or whose result is rejected is
//! logged and the next one is tried.

use super::{
    BrentMinimiser, GoldenSectionMinimiser, GridSearchMinimiser, Interval,
    LevenbergMarquardtMinimiser, Minimum, NelderMeadMinimiser, SolverConfig,
};
use crate::types::SolverError;
use tracing::{debug, warn};

/// Scalar minimisation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MinimisationMethod {
    /// Nelder-Mead simplex from the starting point.
    NelderMead,
    /// Brent's bounded method over the whole interval.
    BoundedBrent,
    /// Levenberg-Marquardt on the objective as a residual.
    LevenbergMarquardt,
    /// Golden-section search over the whole interval.
    GoldenSection,
    /// Grid search with a local polish.
    GridSearch,
}

impl MinimisationMethod {
    /// All methods in default fallback order.
    pub const ALL: [MinimisationMethod; 5] = [
        MinimisationMethod::NelderMead,
        MinimisationMethod::BoundedBrent,
        MinimisationMethod::LevenbergMarquardt,
        MinimisationMethod::GoldenSection,
        MinimisationMethod::GridSearch,
    ];

    /// Short method name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            MinimisationMethod::NelderMead => "nelder-mead",
            MinimisationMethod::BoundedBrent => "bounded-brent",
            MinimisationMethod::LevenbergMarquardt => "levenberg-marquardt",
            MinimisationMethod::GoldenSection => "golden-section",
            MinimisationMethod::GridSearch => "grid-search",
        }
    }

    /// Run this method.
    pub fn minimise<F>(
        &self,
        f: F,
        x0: f64,
        interval: Interval,
        config: SolverConfig,
    ) -> Result<Minimum, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        match self {
            MinimisationMethod::NelderMead => {
                NelderMeadMinimiser::new(config).minimise(f, x0, interval)
            }
            MinimisationMethod::BoundedBrent => BrentMinimiser::new(config).minimise(f, interval),
            MinimisationMethod::LevenbergMarquardt => {
                LevenbergMarquardtMinimiser::new(config).minimise(f, x0, interval)
            }
            MinimisationMethod::GoldenSection => {
                GoldenSectionMinimiser::new(config).minimise(f, interval)
            }
            MinimisationMethod::GridSearch => {
                GridSearchMinimiser::new(config).minimise(f, interval)
            }
        }
    }
}

impl std::fmt::Display for MinimisationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of minimisers tried until one result is accepted.
///
/// # Example
///
/// ```
/// use burden_core::math::solvers::{Interval, MinimiserChain, SolverConfig};
///
/// let chain = MinimiserChain::new(SolverConfig::default());
/// let interval = Interval::new(0.0, 5.0).unwrap();
/// let min = chain
///     .minimise(|x| (x - 2.0).powi(2), 1.0, interval, |m| m.value < 1e-8)
///     .unwrap();
/// assert!((min.x - 2.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct MinimiserChain {
    methods: Vec<MinimisationMethod>,
    config: SolverConfig,
}

impl Default for MinimiserChain {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl MinimiserChain {
    /// Chain over every method in default order.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            methods: MinimisationMethod::ALL.to_vec(),
            config,
        }
    }

    /// Chain over a caller-chosen method order.
    pub fn with_methods(methods: Vec<MinimisationMethod>, config: SolverConfig) -> Self {
        Self { methods, config }
    }

    /// Methods in the order they will be tried.
    pub fn methods(&self) -> &[MinimisationMethod] {
        &self.methods
    }

    /// Run methods in order until `accept` approves a result.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::MethodsExhausted` listing every method tried
    /// when no result is accepted.
    pub fn minimise<F, A>(
        &self,
        f: F,
        x0: f64,
        interval: Interval,
        accept: A,
    ) -> Result<Minimum, SolverError>
    where
        F: Fn(f64) -> f64,
        A: Fn(&Minimum) -> bool,
    {
        let mut tried = Vec::with_capacity(self.methods.len());
        for method in &self.methods {
            tried.push(method.name().to_string());
            match method.minimise(&f, x0, interval, self.config) {
                Ok(min) if accept(&min) => {
                    debug!(method = method.name(), x = min.x, value = min.value, "Minimiser accepted");
                    return Ok(min);
                }
                Ok(min) => {
                    warn!(method = method.name(), x = min.x, value = min.value, "Minimiser result rejected");
                }
                Err(e) => {
                    warn!(method = method.name(), error = %e, "Minimiser failed");
                }
            }
        }
        Err(SolverError::MethodsExhausted { tried })
    }
}
