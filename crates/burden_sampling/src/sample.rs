//! Synthesised exposure samples.

use burden_core::types::LookupError;
use burden_models::distributions::{DistributionParameterSet, EnsembleWeights, MixtureDensity};
use burden_models::exposure::CellKey;
use std::collections::BTreeMap;

/// Bounded intake sample of one cell, with the parameters it was drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureDistribution {
    key: CellKey,
    parameters: DistributionParameterSet,
    weights: EnsembleWeights,
    samples: Vec<f64>,
}

impl ExposureDistribution {
    /// Creates a distribution record.
    pub fn new(
        key: CellKey,
        parameters: DistributionParameterSet,
        weights: EnsembleWeights,
        samples: Vec<f64>,
    ) -> Self {
        Self {
            key,
            parameters,
            weights,
            samples,
        }
    }

    /// Cell key.
    #[inline]
    pub fn key(&self) -> CellKey {
        self.key
    }

    /// Drawn values.
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Full parameter set of the cell.
    #[inline]
    pub fn parameters(&self) -> &DistributionParameterSet {
        &self.parameters
    }

    /// Ensemble weights used for the draw.
    #[inline]
    pub fn weights(&self) -> &EnsembleWeights {
        &self.weights
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Arithmetic mean of the samples, NaN when empty.
    pub fn sample_mean(&self) -> f64 {
        if self.samples.is_empty() {
            return f64::NAN;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Population standard deviation of the samples, NaN when empty.
    pub fn sample_sd(&self) -> f64 {
        let mean = self.sample_mean();
        let ss: f64 = self.samples.iter().map(|x| (x - mean).powi(2)).sum();
        (ss / self.samples.len() as f64).sqrt()
    }

    /// Analytic ensemble density of the cell.
    pub fn density(&self) -> MixtureDensity {
        MixtureDensity::new(self.parameters, self.weights)
    }
}

/// All synthesised cells of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureSet {
    run: u64,
    distributions: BTreeMap<CellKey, ExposureDistribution>,
}

impl ExposureSet {
    /// Empty set for `run`.
    pub fn new(run: u64) -> Self {
        Self {
            run,
            distributions: BTreeMap::new(),
        }
    }

    /// Run index the samples were seeded with.
    #[inline]
    pub fn run(&self) -> u64 {
        self.run
    }

    /// Insert a cell, replacing any earlier one with the same key.
    pub fn insert(&mut self, distribution: ExposureDistribution) {
        self.distributions.insert(distribution.key, distribution);
    }

    /// Distribution of a cell.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::MissingEntry` if the cell was not synthesised.
    pub fn get(&self, key: CellKey) -> Result<&ExposureDistribution, LookupError> {
        self.distributions
            .get(&key)
            .ok_or_else(|| LookupError::missing("exposure distributions", key))
    }

    /// Cells in key order.
    pub fn iter(&self) -> impl Iterator<Item = &ExposureDistribution> {
        self.distributions.values()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }
}
