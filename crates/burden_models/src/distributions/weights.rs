//! Per-risk mixture weights over the twelve families.

use super::{DistributionError, Family};
use burden_core::types::{LookupError, RiskId};
use rand::distributions::WeightedIndex;
use std::collections::HashMap;

/// Normalised ensemble weights, one per family in ensemble order.
///
/// # Example
///
/// ```
/// use burden_models::distributions::{EnsembleWeights, Family};
///
/// let mut raw = [0.0; 12];
/// raw[Family::Normal.index()] = 3.0;
/// raw[Family::Gamma.index()] = 1.0;
/// let weights = EnsembleWeights::new(raw).unwrap();
/// assert_eq!(weights.weight(Family::Normal), 0.75);
/// assert_eq!(weights.active().count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnsembleWeights {
    weights: [f64; Family::COUNT],
}

impl EnsembleWeights {
    /// Normalises raw weights by their sum.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError::InvalidWeights` if any weight is negative
    /// or non-finite, or if they sum to zero.
    pub fn new(raw: [f64; Family::COUNT]) -> Result<Self, DistributionError> {
        if let Some(family) = Family::ALL
            .into_iter()
            .find(|f| !(raw[f.index()].is_finite() && raw[f.index()] >= 0.0))
        {
            return Err(DistributionError::InvalidWeights {
                message: format!("{} weight is {}", family.weight_column(), raw[family.index()]),
            });
        }
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return Err(DistributionError::InvalidWeights {
                message: "weights sum to zero".to_string(),
            });
        }
        let mut weights = raw;
        weights.iter_mut().for_each(|w| *w /= total);
        Ok(Self { weights })
    }

    /// All weight on a single family.
    pub fn single(family: Family) -> Self {
        let mut weights = [0.0; Family::COUNT];
        weights[family.index()] = 1.0;
        Self { weights }
    }

    /// Builds weights from `(column name, weight)` pairs.
    ///
    /// Every one of the twelve columns must be present.
    ///
    /// # Errors
    ///
    /// - `DistributionError::UnknownFamily` for an unrecognised column
    /// - `DistributionError::InvalidWeights` for a missing column or invalid values
    pub fn from_columns<'a, I>(columns: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut raw = [f64::NAN; Family::COUNT];
        for (column, weight) in columns {
            let family = Family::from_weight_column(column)
                .ok_or_else(|| DistributionError::UnknownFamily(column.to_string()))?;
            raw[family.index()] = weight;
        }
        if let Some(missing) = Family::ALL.into_iter().find(|f| raw[f.index()].is_nan()) {
            return Err(DistributionError::InvalidWeights {
                message: format!("missing {} column", missing.weight_column()),
            });
        }
        Self::new(raw)
    }

    /// Weight of one family.
    #[inline]
    pub fn weight(&self, family: Family) -> f64 {
        self.weights[family.index()]
    }

    /// Weights in ensemble order.
    #[inline]
    pub fn as_array(&self) -> &[f64; Family::COUNT] {
        &self.weights
    }

    /// Families with a positive weight.
    pub fn active(&self) -> impl Iterator<Item = Family> + '_ {
        Family::ALL.into_iter().filter(|f| self.weights[f.index()] > 0.0)
    }

    /// Categorical distribution over family indices.
    ///
    /// # Errors
    ///
    /// Returns `DistributionError::InvalidWeights` if the weights cannot form
    /// a categorical distribution.
    pub fn categorical(&self) -> Result<WeightedIndex<f64>, DistributionError> {
        WeightedIndex::new(self.weights.iter().copied()).map_err(|e| {
            DistributionError::InvalidWeights {
                message: e.to_string(),
            }
        })
    }
}

/// Ensemble weights keyed by risk.
///
/// A risk without weights is a lookup failure, never a default mixture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    weights: HashMap<RiskId, EnsembleWeights>,
}

impl WeightTable {
    /// Insert or replace the weights of a risk.
    pub fn insert(&mut self, risk: RiskId, weights: EnsembleWeights) {
        self.weights.insert(risk, weights);
    }

    /// Weights of a risk.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::MissingEntry` if the risk has no weights.
    pub fn get(&self, risk: RiskId) -> Result<&EnsembleWeights, LookupError> {
        self.weights
            .get(&risk)
            .ok_or_else(|| LookupError::missing("ensemble weights", risk))
    }

    /// Number of risks with weights.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl FromIterator<(RiskId, EnsembleWeights)> for WeightTable {
    fn from_iter<I: IntoIterator<Item = (RiskId, EnsembleWeights)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}
