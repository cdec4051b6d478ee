//! Bounded mixture sampling over the distribution ensemble.
//!
//! For one cell the engine:
//!
//! 1. Reseeds the generator with the run index.
//! 2. Draws a pool of `sample_size` values from every family with positive
//!    weight (mirrored families already reflected about the upper bound).
//! 3. Picks a family per sample from the ensemble weights and takes that
//!    family's pool value at the same position.
//! 4. Replaces every sample outside `[lower, upper]` with the pool value of
//!    a freshly drawn family at a random position, pass after pass, until
//!    all samples are in bounds or the pass cap is reached.

use crate::config::{BoundPolicy, SamplingConfig};
use crate::error::SamplingError;
use crate::rng::ExposureRng;
use crate::sample::{ExposureDistribution, ExposureSet};
use burden_models::calibration::VariableBuilder;
use burden_models::distributions::{DistributionParameterSet, EnsembleWeights, Family, WeightTable};
use burden_models::exposure::ExposureCell;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Exposure synthesis engine.
#[derive(Debug, Clone, Default)]
pub struct DistributionEngine {
    config: SamplingConfig,
    builder: VariableBuilder,
}

impl DistributionEngine {
    /// Engine with the default calibration chain.
    pub fn new(config: SamplingConfig) -> Self {
        Self {
            config,
            builder: VariableBuilder::default(),
        }
    }

    /// Engine with a caller-supplied variable builder.
    pub fn with_builder(config: SamplingConfig, builder: VariableBuilder) -> Self {
        Self { config, builder }
    }

    /// Configuration in use.
    #[inline]
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Draw a bounded mixture sample for one cell.
    ///
    /// # Errors
    ///
    /// - `SamplingError::InvalidConfig` if the configuration does not validate
    /// - `SamplingError::Distribution` if a family with positive weight has invalid parameters
    /// - `SamplingError::SamplingDivergence` if samples remain out of bounds
    ///   after the pass cap under [`BoundPolicy::Fail`]
    ///
    /// # Example
    ///
    /// ```
    /// use burden_models::calibration::FamilyVariables;
    /// use burden_models::distributions::{DistributionParameterSet, EnsembleWeights, Family};
    /// use burden_sampling::{DistributionEngine, SamplingConfig};
    ///
    /// let vars = FamilyVariables { upper: 300.0, lower: 50.0, ..Default::default() };
    /// let params = DistributionParameterSet::from_moments(100.0, 10.0, &vars);
    /// let engine = DistributionEngine::new(SamplingConfig::default());
    /// let a = engine.synthesize(&params, &EnsembleWeights::single(Family::Gamma), 7).unwrap();
    /// let b = engine.synthesize(&params, &EnsembleWeights::single(Family::Gamma), 7).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn synthesize(
        &self,
        parameters: &DistributionParameterSet,
        weights: &EnsembleWeights,
        run: u64,
    ) -> Result<Vec<f64>, SamplingError> {
        self.config.validate()?;
        let n = self.config.sample_size();
        let mut rng = ExposureRng::from_seed(run);

        let mut pool: Vec<Vec<f64>> = vec![Vec::new(); Family::COUNT];
        for family in weights.active() {
            let sampler = parameters.family(family).sampler()?;
            let column = &mut pool[family.index()];
            column.resize(n, 0.0);
            rng.fill_from(&sampler, column);
        }

        let categorical = weights.categorical()?;
        let pick = |family: usize, index: usize| -> f64 {
            pool[family].get(index).copied().unwrap_or(f64::NAN)
        };
        let mut samples: Vec<f64> = (0..n).map(|i| pick(rng.choose(&categorical), i)).collect();

        let (lower, upper) = (parameters.lower(), parameters.upper());
        let in_bounds = |v: f64| v >= lower && v <= upper;

        let mut passes = 0;
        loop {
            let rejected: Vec<usize> = (0..n).filter(|&i| !in_bounds(samples[i])).collect();
            if rejected.is_empty() {
                debug!(run, passes, "Exposure sample within bounds");
                return Ok(samples);
            }
            if passes == self.config.max_rejection_passes() {
                return self.resolve_divergence(samples, rejected.len(), passes, lower, upper);
            }
            for i in rejected {
                let family = rng.choose(&categorical);
                samples[i] = pick(family, rng.gen_index(n));
            }
            passes += 1;
        }
    }

    fn resolve_divergence(
        &self,
        mut samples: Vec<f64>,
        out_of_bounds: usize,
        passes: usize,
        lower: f64,
        upper: f64,
    ) -> Result<Vec<f64>, SamplingError> {
        match self.config.bound_policy() {
            BoundPolicy::Fail => Err(SamplingError::SamplingDivergence {
                out_of_bounds,
                passes,
            }),
            BoundPolicy::Clamp => {
                if samples.iter().any(|v| v.is_nan()) {
                    return Err(SamplingError::SamplingDivergence {
                        out_of_bounds,
                        passes,
                    });
                }
                warn!(out_of_bounds, passes, lower, upper, "Clamping samples to exposure bounds");
                for v in samples.iter_mut() {
                    *v = v.clamp(lower, upper);
                }
                Ok(samples)
            }
        }
    }

    /// Calibrate and synthesise every cell for one run.
    ///
    /// Cells are processed in parallel; each is reseeded with `run`, so the
    /// result does not depend on scheduling.
    ///
    /// # Errors
    ///
    /// - `SamplingError::Calibration` if any cell cannot be calibrated
    /// - `SamplingError::Lookup` if a cell's risk has no ensemble weights
    /// - any error of [`synthesize`](Self::synthesize)
    pub fn synthesize_all(
        &self,
        cells: &[ExposureCell],
        weights: &WeightTable,
        run: u64,
    ) -> Result<ExposureSet, SamplingError> {
        self.config.validate()?;
        let parameters = self.builder.parameter_sets(cells)?;

        let distributions: Vec<ExposureDistribution> = cells
            .par_iter()
            .zip(parameters.par_iter())
            .map(|(cell, params)| -> Result<ExposureDistribution, SamplingError> {
                let w = weights.get(cell.key.risk)?;
                let samples = self.synthesize(params, w, run)?;
                Ok(ExposureDistribution::new(cell.key, *params, *w, samples))
            })
            .collect::<Result<_, _>>()?;

        let mut set = ExposureSet::new(run);
        for distribution in distributions {
            set.insert(distribution);
        }
        info!(run, cells = set.len(), "Exposure distributions synthesised");
        Ok(set)
    }
}
