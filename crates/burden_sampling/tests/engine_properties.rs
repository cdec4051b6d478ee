//! Integration tests for calibrated exposure synthesis.

use approx::assert_relative_eq;
use burden_core::types::{AgeId, RiskId, SexId};
use burden_models::distributions::{EnsembleWeights, Family, WeightTable};
use burden_models::exposure::{CellKey, ExposureCell, RelativeBounds};
use burden_sampling::{DistributionEngine, SamplingConfig, SamplingError};
use proptest::prelude::*;

fn cell(risk: usize, age: usize, mean: f64, sd: f64, bounds: (f64, f64)) -> ExposureCell {
    let key = CellKey::new(RiskId(risk), AgeId(age), SexId(0));
    ExposureCell::new(key, mean, sd, RelativeBounds::new(bounds.0, bounds.1)).unwrap()
}

fn full_ensemble() -> EnsembleWeights {
    // Weights in the shape of a typical fitted ensemble
    EnsembleWeights::new([
        0.02, 0.1, 0.05, 0.08, 0.1, 0.2, 0.15, 0.1, 0.05, 0.05, 0.05, 0.05,
    ])
    .unwrap()
}

#[test]
fn test_normal_scenario_moments() {
    let c = cell(0, 0, 100.0, 10.0, (0.5, 3.0));
    let weights: WeightTable = vec![(RiskId(0), EnsembleWeights::single(Family::Normal))]
        .into_iter()
        .collect();
    let engine = DistributionEngine::new(SamplingConfig::default());
    for run in 0..5 {
        let set = engine.synthesize_all(&[c], &weights, run).unwrap();
        let dist = set.get(c.key).unwrap();
        assert_eq!(dist.len(), 1000);
        assert!((dist.sample_mean() - 100.0).abs() < 0.6, "run {} mean {}", run, dist.sample_mean());
        assert!((dist.sample_sd() - 10.0).abs() < 0.6, "run {} sd {}", run, dist.sample_sd());
    }
}

#[test]
fn test_full_ensemble_respects_bounds_and_is_deterministic() {
    let cells = vec![
        cell(0, 0, 100.0, 10.0, (0.5, 3.0)),
        cell(0, 1, 20.0, 30.0, (0.1, 5.0)),
        cell(1, 0, 3.0, 1.0, (0.2, 4.0)),
    ];
    let weights: WeightTable = vec![(RiskId(0), full_ensemble()), (RiskId(1), full_ensemble())]
        .into_iter()
        .collect();
    let engine = DistributionEngine::new(SamplingConfig::default());
    let a = engine.synthesize_all(&cells, &weights, 3).unwrap();
    let b = engine.synthesize_all(&cells, &weights, 3).unwrap();
    assert_eq!(a, b);
    for c in &cells {
        let d = a.get(c.key).unwrap();
        let (lo, hi) = (c.lower(), c.upper());
        assert!(d.samples().iter().all(|&x| x >= lo && x <= hi));
        assert_relative_eq!(d.parameters().lower(), lo);
    }
}

#[test]
fn test_missing_weights_is_lookup_error() {
    let c = cell(7, 0, 10.0, 2.0, (0.5, 3.0));
    let err = DistributionEngine::new(SamplingConfig::default())
        .synthesize_all(&[c], &WeightTable::default(), 0)
        .unwrap_err();
    assert!(matches!(err, SamplingError::Lookup(_)));
}

#[test]
fn test_zero_sd_cell_is_calibration_error() {
    let c = cell(0, 0, 10.0, 0.0, (0.5, 3.0));
    let weights: WeightTable = vec![(RiskId(0), full_ensemble())].into_iter().collect();
    let err = DistributionEngine::new(SamplingConfig::default())
        .synthesize_all(&[c], &weights, 0)
        .unwrap_err();
    assert!(matches!(err, SamplingError::Calibration(_)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Every sample of every run lies inside the cell bounds and the sample
    /// has the configured size.
    #[test]
    fn prop_samples_within_bounds(
        mean in 1.0f64..200.0,
        ratio in 0.5f64..10.0,
        run in 0u64..1000,
        size in 10usize..500,
    ) {
        let c = cell(0, 0, mean, mean / ratio, (0.3, 3.0));
        let weights: WeightTable = vec![(RiskId(0), full_ensemble())].into_iter().collect();
        let config = SamplingConfig::builder().sample_size(size).build().unwrap();
        let set = DistributionEngine::new(config).synthesize_all(&[c], &weights, run).unwrap();
        let d = set.get(c.key).unwrap();
        prop_assert_eq!(d.len(), size);
        prop_assert!(d.samples().iter().all(|&x| x >= c.lower() && x <= c.upper()));
    }
}
