//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from scalar minimisers and the fallback chain
//! - `IntegrationError`: Errors from histogram construction and quadrature
//! - `LookupError`: Missing names or table entries (never silently defaulted)

use thiserror::Error;

/// Minimiser errors.
///
/// Provides structured error handling for scalar minimisation with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `MaxIterationsExceeded`: Method failed to converge within its iteration limit
/// - `InvalidBounds`: Search interval is empty or not finite where required
/// - `NumericalInstability`: Objective returned no finite value to work with
/// - `MethodsExhausted`: Every method in a fallback chain failed acceptance
/// - `InvalidConfig`: Solver tolerances or iteration limit are unusable
///
/// # Examples
/// ```
/// use burden_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Method failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Search interval is unusable.
    #[error("Invalid bounds: [{lower}, {upper}]")]
    InvalidBounds {
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// All methods of a fallback chain were tried without an accepted result.
    #[error("All minimisation methods exhausted: {}", tried.join(", "))]
    MethodsExhausted {
        /// Names of the methods tried, in order
        tried: Vec<String>,
    },

    /// Solver configuration rejected by validation.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),
}

/// Histogram and quadrature errors.
///
/// # Examples
/// ```
/// use burden_core::types::IntegrationError;
///
/// let err = IntegrationError::InsufficientPoints { got: 1, need: 2 };
/// assert!(format!("{}", err).contains("need at least 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntegrationError {
    /// Not enough points to build a histogram or integrate.
    #[error("Insufficient points: got {got}, need at least {need}")]
    InsufficientPoints {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Abscissae and ordinates have different lengths.
    #[error("Length mismatch: x has {x} points, y has {y}")]
    LengthMismatch {
        /// Length of x
        x: usize,
        /// Length of y
        y: usize,
    },

    /// Sample contains a non-finite value.
    #[error("Non-finite sample value at index {index}")]
    NonFinite {
        /// Index of the first offending value
        index: usize,
    },
}

/// Missing required input.
///
/// Raised whenever a name is not part of a registry or a keyed table has no
/// entry for the requested key.
///
/// # Examples
/// ```
/// use burden_core::types::LookupError;
///
/// let err = LookupError::UnknownName { kind: "risk", name: "Diet high in kale".to_string() };
/// assert_eq!(format!("{}", err), "Unknown risk: Diet high in kale");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Name is not registered.
    #[error("Unknown {kind}: {name}")]
    UnknownName {
        /// Dimension the name was looked up in
        kind: &'static str,
        /// The name that was not found
        name: String,
    },

    /// Keyed table has no entry.
    #[error("Missing entry in {table} for key {key}")]
    MissingEntry {
        /// Table name
        table: &'static str,
        /// Rendered key
        key: String,
    },
}

impl LookupError {
    /// Creates a missing-entry error, rendering the key with `Debug`.
    pub fn missing(table: &'static str, key: impl std::fmt::Debug) -> Self {
        LookupError::MissingEntry {
            table,
            key: format!("{:?}", key),
        }
    }
}
