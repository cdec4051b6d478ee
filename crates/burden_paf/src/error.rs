//! Error types for PAF integration, mediation and DALY attribution.

use burden_core::types::{IntegrationError, LookupError};
use thiserror::Error;

/// Attributable-fraction errors.
///
/// # Variants
/// - `DegenerateIntegral`: PAF ratio is NaN (zero or sign-losing denominator)
/// - `DegenerateBurden`: Attributable DALYs are NaN
/// - `ShapeMismatch`: A PAF vector does not have one entry per risk
/// - `IndexOutOfRange`: A risk or disease id lies outside the mediation tensor
/// - `Lookup`: Required table entry missing
/// - `Integration`: Histogram or quadrature failed
///
/// # Examples
/// ```
/// use burden_paf::PafError;
///
/// let err = PafError::DegenerateIntegral { numerator: 0.0, denominator: 0.0 };
/// assert!(err.to_string().contains("0/0"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PafError {
    /// Numerator over denominator gave NaN.
    #[error("Degenerate PAF integral: {numerator}/{denominator}")]
    DegenerateIntegral {
        /// Integral of `(RR − 1) · density`
        numerator: f64,
        /// Integral of `RR · density`
        denominator: f64,
    },

    /// Joint PAFs combined with burden totals gave NaN.
    #[error("Degenerate attributable burden: morbidity PAF {morbidity}, mortality PAF {mortality}")]
    DegenerateBurden {
        /// Joint morbidity PAF (or derivative)
        morbidity: f64,
        /// Joint mortality PAF (or derivative)
        mortality: f64,
    },

    /// Vector length differs from the number of risks.
    #[error("Shape mismatch: expected {expected} risks, got {got}")]
    ShapeMismatch {
        /// Number of risks in the tensor
        expected: usize,
        /// Length supplied
        got: usize,
    },

    /// Risk or disease id outside the tensor's dimensions.
    #[error("Index out of range: {axis} {index}, tensor has {size}")]
    IndexOutOfRange {
        /// `"risk"` or `"disease"`
        axis: &'static str,
        /// Offending id
        index: usize,
        /// Size of that axis
        size: usize,
    },

    /// Required input missing.
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Histogram or quadrature failure.
    #[error("Integration error: {0}")]
    Integration(#[from] IntegrationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PafError::ShapeMismatch {
            expected: 15,
            got: 3,
        };
        assert_eq!(err.to_string(), "Shape mismatch: expected 15 risks, got 3");

        let err = PafError::IndexOutOfRange {
            axis: "disease",
            index: 3,
            size: 2,
        };
        assert_eq!(err.to_string(), "Index out of range: disease 3, tensor has 2");
    }

    #[test]
    fn test_from_lookup() {
        let err: PafError = LookupError::missing("tmrel", 4).into();
        assert!(matches!(err, PafError::Lookup(_)));
        assert_eq!(err.to_string(), "Lookup error: Missing entry in tmrel for key 4");
    }
}
