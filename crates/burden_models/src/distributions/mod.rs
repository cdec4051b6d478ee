//! The exposure distribution ensemble.
//!
//! This module provides:
//! - [`Family`]: The twelve families, in ensemble order
//! - [`DistributionParameterSet`]: All 27 family parameters of one cell
//! - [`FamilyParameters`]: Typed view of one family's parameters, with
//!   sampling ([`FamilySampler`]), analytic mean and density
//! - [`EnsembleWeights`]: Normalised per-risk mixture weights, keyed by risk
//!   in a [`WeightTable`]
//! - [`MixtureDensity`]: Ensemble-weighted density of one cell
//! - [`DistributionError`]: Invalid parameters or weights

mod density;
mod error;
mod family;
mod parameters;
mod sampler;
mod weights;

pub use density::MixtureDensity;
pub use error::DistributionError;
pub use family::Family;
pub use parameters::{DistributionParameterSet, FamilyParameters, PARAMETER_COUNT, PARAMETER_NAMES};
pub use sampler::FamilySampler;
pub use weights::{EnsembleWeights, WeightTable};
