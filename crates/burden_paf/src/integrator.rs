//! PAF integration against an empirical exposure density.
//!
//! The exposure sample is binned into an equal-width density histogram and
//! the relative-risk curve is evaluated at the bin centres:
//!
//! ```text
//! PAF = ∫ (RR(x) − 1) h(x) dx / ∫ RR(x) h(x) dx
//! ```
//!
//! Both integrals use Simpson's rule over the bin centres. Two variants share
//! the same machinery:
//!
//! - **Derivative**: `RR` replaced by `RR′` in numerator and denominator
//! - **Shifted**: `RR` evaluated at `centre + h` while the density weights and
//!   abscissae stay those of the unshifted sample
//!
//! A NaN ratio is never substituted; it surfaces as
//! [`PafError::DegenerateIntegral`].

use crate::error::PafError;
use crate::relative_risk::RelativeRisk;
use burden_core::math::integration::{simpson, DensityHistogram};

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 100;

/// Histogram resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IntegratorConfig {
    /// Number of equal-width bins.
    pub bins: usize,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
        }
    }
}

/// Integrates relative-risk curves against exposure samples.
///
/// # Example
///
/// ```
/// use burden_paf::integrator::PafIntegrator;
/// use burden_paf::relative_risk::{Direction, RelativeRisk};
///
/// let sample: Vec<f64> = (0..1000).map(|i| 20.0 + i as f64 / 100.0).collect();
/// let rr = RelativeRisk::new(10.0, 1.5, 1.0, Direction::Low);
///
/// // Every draw is above the TMREL of a "low" risk
/// assert_eq!(PafIntegrator::default().paf(&sample, &rr).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PafIntegrator {
    config: IntegratorConfig,
}

impl PafIntegrator {
    /// Creates an integrator.
    pub fn new(config: IntegratorConfig) -> Self {
        Self { config }
    }

    /// Configuration.
    #[inline]
    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Density histogram of an exposure sample.
    ///
    /// Built once per cell and reused across diseases.
    pub fn histogram(&self, samples: &[f64]) -> Result<DensityHistogram, PafError> {
        Ok(DensityHistogram::from_samples(samples, self.config.bins)?)
    }

    /// PAF of `samples` under `rr`.
    pub fn paf(&self, samples: &[f64], rr: &RelativeRisk) -> Result<f64, PafError> {
        self.paf_from_histogram(&self.histogram(samples)?, rr)
    }

    /// PAF derivative of `samples` under `rr`.
    pub fn paf_derivative(&self, samples: &[f64], rr: &RelativeRisk) -> Result<f64, PafError> {
        self.paf_derivative_from_histogram(&self.histogram(samples)?, rr)
    }

    /// PAF of `samples` after a uniform intake shift `h`.
    pub fn paf_shifted(&self, samples: &[f64], rr: &RelativeRisk, h: f64) -> Result<f64, PafError> {
        self.paf_shifted_from_histogram(&self.histogram(samples)?, rr, h)
    }

    /// PAF over a prebuilt histogram.
    ///
    /// # Errors
    ///
    /// - `PafError::DegenerateIntegral` if the ratio is NaN
    /// - `PafError::Integration` if the histogram has fewer than two bins
    pub fn paf_from_histogram(
        &self,
        hist: &DensityHistogram,
        rr: &RelativeRisk,
    ) -> Result<f64, PafError> {
        let centres = hist.centres();
        let values: Vec<f64> = centres.iter().map(|&x| rr.rr(x)).collect();
        attributable_ratio(hist.density(), &centres, &values)
    }

    /// PAF derivative over a prebuilt histogram.
    pub fn paf_derivative_from_histogram(
        &self,
        hist: &DensityHistogram,
        rr: &RelativeRisk,
    ) -> Result<f64, PafError> {
        let centres = hist.centres();
        let values: Vec<f64> = centres.iter().map(|&x| rr.derivative(x)).collect();
        attributable_ratio(hist.density(), &centres, &values)
    }

    /// Shifted PAF over a prebuilt histogram.
    pub fn paf_shifted_from_histogram(
        &self,
        hist: &DensityHistogram,
        rr: &RelativeRisk,
        h: f64,
    ) -> Result<f64, PafError> {
        let centres = hist.centres();
        let values: Vec<f64> = centres.iter().map(|&x| rr.rr(x + h)).collect();
        attributable_ratio(hist.density(), &centres, &values)
    }
}

/// `∫(v − 1)·h / ∫v·h` by Simpson's rule over `centres`.
fn attributable_ratio(density: &[f64], centres: &[f64], values: &[f64]) -> Result<f64, PafError> {
    let excess: Vec<f64> = values
        .iter()
        .zip(density)
        .map(|(v, h)| (v - 1.0) * h)
        .collect();
    let total: Vec<f64> = values.iter().zip(density).map(|(v, h)| v * h).collect();

    let numerator = simpson(&excess, centres)?;
    let denominator = simpson(&total, centres)?;
    let paf = numerator / denominator;
    if paf.is_nan() {
        return Err(PafError::DegenerateIntegral {
            numerator,
            denominator,
        });
    }
    Ok(paf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relative_risk::Direction;
    use approx::assert_relative_eq;
    use burden_core::math::integration::linspace;

    fn uniform(lo: f64, hi: f64, n: usize) -> Vec<f64> {
        linspace(lo, hi, n)
    }

    #[test]
    fn test_uniform_high_golden_value() {
        let sample = uniform(5.0, 15.0, 10_001);
        let rr = RelativeRisk::new(0.0, 2.0, 1.0, Direction::High);
        let paf = PafIntegrator::default().paf(&sample, &rr).unwrap();
        let ln2 = std::f64::consts::LN_2;
        let expected = 1.0 - 10.0 * ln2 / (2f64.powi(15) - 2f64.powi(5));
        assert!((paf - expected).abs() < 1e-4);
    }

    #[test]
    fn test_zero_when_all_draws_safe() {
        let sample = uniform(0.0, 5.0, 500);
        let rr = RelativeRisk::new(10.0, 3.0, 1.0, Direction::High);
        let integrator = PafIntegrator::default();
        assert_eq!(integrator.paf(&sample, &rr).unwrap(), 0.0);
    }

    #[test]
    fn test_protective_paf_in_unit_interval() {
        let sample = uniform(0.0, 20.0, 2000);
        let rr = RelativeRisk::new(15.0, 1.1, 1.0, Direction::Low);
        let paf = PafIntegrator::default().paf(&sample, &rr).unwrap();
        assert!(paf > 0.0 && paf < 1.0);
    }

    #[test]
    fn test_shift_towards_tmrel_reduces_paf() {
        let sample = uniform(0.0, 20.0, 2000);
        let rr = RelativeRisk::new(15.0, 1.1, 1.0, Direction::Low);
        let integrator = PafIntegrator::default();
        let base = integrator.paf(&sample, &rr).unwrap();
        let shifted = integrator.paf_shifted(&sample, &rr, 5.0).unwrap();
        assert!(shifted < base);
        assert_relative_eq!(
            integrator.paf_shifted(&sample, &rr, 0.0).unwrap(),
            base,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_shift_past_tmrel_gives_zero() {
        let sample = uniform(0.0, 20.0, 2000);
        let rr = RelativeRisk::new(15.0, 1.1, 1.0, Direction::Low);
        let paf = PafIntegrator::default().paf_shifted(&sample, &rr, 100.0).unwrap();
        assert_eq!(paf, 0.0);
    }

    #[test]
    fn test_derivative_uses_rr_prime_ratio() {
        let sample = uniform(5.0, 15.0, 10_001);
        let rr = RelativeRisk::new(0.0, 2.0, 1.0, Direction::High);
        let integrator = PafIntegrator::default();
        let hist = integrator.histogram(&sample).unwrap();
        let centres = hist.centres();
        let values: Vec<f64> = centres.iter().map(|&x| rr.derivative(x)).collect();
        let expected = attributable_ratio(hist.density(), &centres, &values).unwrap();
        assert_eq!(integrator.paf_derivative(&sample, &rr).unwrap(), expected);
        // RR′ = ln2 · RR here, so the ratio is 1 − ∫h / (ln2 ∫RR h)
        let paf = integrator.paf(&sample, &rr).unwrap();
        let ln2 = std::f64::consts::LN_2;
        assert_relative_eq!(expected, 1.0 - (1.0 - paf) / ln2, max_relative = 1e-10);
    }

    #[test]
    fn test_derivative_on_safe_side_is_negative_infinity() {
        // RR′ ≡ 0 gives −∫h / 0; only NaN is degenerate
        let sample = uniform(0.0, 5.0, 500);
        let rr = RelativeRisk::new(10.0, 3.0, 1.0, Direction::High);
        let d = PafIntegrator::default().paf_derivative(&sample, &rr).unwrap();
        assert_eq!(d, f64::NEG_INFINITY);
    }

    #[test]
    fn test_nan_ratio_is_degenerate() {
        let sample = uniform(5.0, 15.0, 500);
        let rr = RelativeRisk::new(0.0, f64::NAN, 1.0, Direction::High);
        let err = PafIntegrator::default().paf(&sample, &rr).unwrap_err();
        assert!(matches!(err, PafError::DegenerateIntegral { .. }));
    }

    #[test]
    fn test_bins_configurable() {
        let integrator = PafIntegrator::new(IntegratorConfig { bins: 10 });
        let hist = integrator.histogram(&uniform(0.0, 1.0, 100)).unwrap();
        assert_eq!(hist.bins(), 10);
        assert_eq!(integrator.config().bins, 10);
    }

    #[test]
    fn test_empty_sample_is_integration_error() {
        let rr = RelativeRisk::new(0.0, 2.0, 1.0, Direction::High);
        let err = PafIntegrator::default().paf(&[], &rr).unwrap_err();
        assert!(matches!(err, PafError::Integration(_)));
    }
}
