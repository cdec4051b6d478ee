//! Empirical densities and quadrature.
//!
//! This module provides the two numerical pieces needed to integrate a
//! dose-response curve against a sampled exposure distribution:
//!
//! - [`DensityHistogram`]: equal-width, density-normalised histogram
//! - [`simpson`]: composite Simpson's rule on (possibly irregular) abscissae,
//!   with the Cartwright correction when the number of intervals is odd
//!
//! # Example
//!
//! ```
//! use burden_core::math::integration::simpson;
//!
//! // ∫₀¹ x² dx = 1/3
//! let x: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
//! let y: Vec<f64> = x.iter().map(|v| v * v).collect();
//! let area = simpson(&y, &x).unwrap();
//! assert!((area - 1.0 / 3.0).abs() < 1e-12);
//! ```

use crate::types::IntegrationError;

/// Returns `n` evenly spaced points over `[start, stop]`, endpoints included.
///
/// The final point is set to `stop` exactly.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            points[n - 1] = stop;
            points
        }
    }
}

/// Equal-width histogram normalised to a probability density.
///
/// Bin edges span `[min, max]` of the sample. When every value is identical
/// the range is widened to `[v − 0.5, v + 0.5]`. The last bin is closed on
/// the right, so the sample maximum is always counted.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityHistogram {
    edges: Vec<f64>,
    density: Vec<f64>,
}

impl DensityHistogram {
    /// Builds a density histogram with `bins` equal-width bins.
    ///
    /// # Errors
    ///
    /// - `IntegrationError::InsufficientPoints` if the sample is empty or `bins == 0`
    /// - `IntegrationError::NonFinite` if the sample contains NaN or infinity
    pub fn from_samples(samples: &[f64], bins: usize) -> Result<Self, IntegrationError> {
        if samples.is_empty() || bins == 0 {
            return Err(IntegrationError::InsufficientPoints {
                got: samples.len().min(bins),
                need: 1,
            });
        }
        if let Some(index) = samples.iter().position(|v| !v.is_finite()) {
            return Err(IntegrationError::NonFinite { index });
        }

        let (mut first, mut last) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if first == last {
            first -= 0.5;
            last += 0.5;
        }

        let edges = linspace(first, last, bins + 1);
        let norm = bins as f64 / (last - first);
        let mut counts = vec![0usize; bins];

        for &v in samples {
            let mut idx = (((v - first) * norm) as usize).min(bins - 1);
            // Floating-point rounding can land one bin off
            if v < edges[idx] && idx > 0 {
                idx -= 1;
            } else if idx + 1 < bins && v >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        let total = samples.len() as f64;
        let density = counts
            .iter()
            .zip(edges.windows(2))
            .map(|(&c, w)| c as f64 / (total * (w[1] - w[0])))
            .collect();

        Ok(Self { edges, density })
    }

    /// Bin edges (`bins + 1` values).
    #[inline]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Density value per bin.
    #[inline]
    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Number of bins.
    #[inline]
    pub fn bins(&self) -> usize {
        self.density.len()
    }

    /// Bin centres, the midpoint of each pair of adjacent edges.
    pub fn centres(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }
}

/// Composite Simpson's rule for samples `y` at abscissae `x`.
///
/// Handles non-uniform spacing. With an odd number of intervals the first
/// `n − 2` intervals use Simpson's rule and the final interval uses the
/// Cartwright correction. Two points fall back to the trapezoidal rule.
///
/// # Errors
///
/// - `IntegrationError::LengthMismatch` if `x` and `y` differ in length
/// - `IntegrationError::InsufficientPoints` if fewer than two points are given
pub fn simpson(y: &[f64], x: &[f64]) -> Result<f64, IntegrationError> {
    if y.len() != x.len() {
        return Err(IntegrationError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    let n = y.len();
    if n < 2 {
        return Err(IntegrationError::InsufficientPoints { got: n, need: 2 });
    }
    if n == 2 {
        return Ok(0.5 * (x[1] - x[0]) * (y[0] + y[1]));
    }
    if n % 2 == 1 {
        return Ok(basic_simpson(y, x, n));
    }

    let h0 = x[n - 2] - x[n - 3];
    let h1 = x[n - 1] - x[n - 2];
    let alpha = (2.0 * h1 * h1 + 3.0 * h0 * h1) / (6.0 * (h1 + h0));
    let beta = (h1 * h1 + 3.0 * h0 * h1) / (6.0 * h0);
    let eta = h1 * h1 * h1 / (6.0 * h0 * (h0 + h1));

    let tail = alpha * y[n - 1] + beta * y[n - 2] - eta * y[n - 3];
    Ok(basic_simpson(y, x, n - 1) + tail)
}

/// Simpson's rule over the first `len` points, `len` odd.
fn basic_simpson(y: &[f64], x: &[f64], len: usize) -> f64 {
    let mut total = 0.0;
    let mut i = 0;
    while i + 2 < len {
        let h0 = x[i + 1] - x[i];
        let h1 = x[i + 2] - x[i + 1];
        let hsum = h0 + h1;
        let hprod = h0 * h1;
        let ratio = h0 / h1;
        total += hsum / 6.0
            * (y[i] * (2.0 - 1.0 / ratio) + y[i + 1] * (hsum * hsum / hprod) + y[i + 2] * (2.0 - ratio));
        i += 2;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        let pts = linspace(1.0, 2.0, 11);
        assert_eq!(pts.len(), 11);
        assert_eq!(pts[0], 1.0);
        assert_eq!(pts[10], 2.0);
        assert_relative_eq!(pts[5], 1.5, max_relative = 1e-15);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_simpson_exact_for_cubic_odd_points() {
        let x = linspace(0.0, 2.0, 21);
        let y: Vec<f64> = x.iter().map(|v| v * v * v - v).collect();
        // ∫₀² (x³ − x) dx = 4 − 2 = 2
        assert_relative_eq!(simpson(&y, &x).unwrap(), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_simpson_even_points_uses_correction() {
        let x = linspace(0.0, 1.0, 100);
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();
        assert_relative_eq!(simpson(&y, &x).unwrap(), 1.0 / 3.0, max_relative = 1e-10);
    }

    #[test]
    fn test_simpson_irregular_spacing() {
        let x = vec![0.0, 0.1, 0.3, 0.6, 1.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        assert_relative_eq!(simpson(&y, &x).unwrap(), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_simpson_two_points_trapezoid() {
        let area = simpson(&[1.0, 3.0], &[0.0, 2.0]).unwrap();
        assert_relative_eq!(area, 4.0);
    }

    #[test]
    fn test_simpson_errors() {
        assert!(matches!(
            simpson(&[1.0], &[0.0]),
            Err(IntegrationError::InsufficientPoints { got: 1, need: 2 })
        ));
        assert!(matches!(
            simpson(&[1.0, 2.0], &[0.0]),
            Err(IntegrationError::LengthMismatch { x: 1, y: 2 })
        ));
    }

    #[test]
    fn test_histogram_density_integrates_to_one() {
        let sample: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin()).collect();
        let hist = DensityHistogram::from_samples(&sample, 100).unwrap();
        let mass: f64 = hist
            .density()
            .iter()
            .zip(hist.edges().windows(2))
            .map(|(d, w)| d * (w[1] - w[0]))
            .sum();
        assert_relative_eq!(mass, 1.0, max_relative = 1e-12);
        assert_eq!(hist.bins(), 100);
        assert_eq!(hist.edges().len(), 101);
    }

    #[test]
    fn test_histogram_counts_maximum_in_last_bin() {
        let sample = vec![0.0, 0.5, 1.0, 1.0];
        let hist = DensityHistogram::from_samples(&sample, 4).unwrap();
        // width 0.25, last bin holds both 1.0 values
        assert_relative_eq!(hist.density()[3], 2.0 / (4.0 * 0.25));
        assert_relative_eq!(hist.density()[0], 1.0 / (4.0 * 0.25));
        assert_relative_eq!(hist.density()[2], 1.0 / (4.0 * 0.25));
    }

    #[test]
    fn test_histogram_constant_sample_widened() {
        let hist = DensityHistogram::from_samples(&[7.0; 10], 10).unwrap();
        assert_relative_eq!(hist.edges()[0], 6.5);
        assert_relative_eq!(hist.edges()[10], 7.5);
    }

    #[test]
    fn test_histogram_centres() {
        let hist = DensityHistogram::from_samples(&[0.0, 2.0], 2).unwrap();
        assert_eq!(hist.centres(), vec![0.5, 1.5]);
    }

    #[test]
    fn test_histogram_rejects_non_finite() {
        assert!(matches!(
            DensityHistogram::from_samples(&[1.0, f64::NAN], 10),
            Err(IntegrationError::NonFinite { index: 1 })
        ));
        assert!(DensityHistogram::from_samples(&[], 10).is_err());
    }
}
