//! # Burden Sampling (E: Engine Layer)
//!
//! ## Engine Layer Role
//!
//! burden_sampling turns calibrated exposure cells into empirical intake
//! samples:
//! - Seeded random number generation, reseeded with the run index for every
//!   cell (`rng`)
//! - Mixture sampling over the ensemble with bounded rejection (`engine`)
//! - Sample size, rejection cap and out-of-bounds policy (`config`)
//! - Samples keyed by cell, with their parameters and mixture density (`sample`)
//!
//! ## Usage Example
//!
//! ```rust
//! use burden_core::types::{AgeId, RiskId, SexId};
//! use burden_models::distributions::{EnsembleWeights, Family, WeightTable};
//! use burden_models::exposure::{CellKey, ExposureCell, RelativeBounds};
//! use burden_sampling::{DistributionEngine, SamplingConfig};
//!
//! let key = CellKey::new(RiskId(0), AgeId(0), SexId(0));
//! let cell = ExposureCell::new(key, 100.0, 10.0, RelativeBounds::new(0.5, 3.0)).unwrap();
//! let weights: WeightTable = vec![(RiskId(0), EnsembleWeights::single(Family::Normal))]
//!     .into_iter()
//!     .collect();
//!
//! let engine = DistributionEngine::new(SamplingConfig::default());
//! let set = engine.synthesize_all(&[cell], &weights, 0).unwrap();
//! let dist = set.get(key).unwrap();
//! assert_eq!(dist.len(), 1000);
//! assert!(dist.samples().iter().all(|&x| (50.0..=300.0).contains(&x)));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod engine;
pub mod error;
pub mod rng;
pub mod sample;

pub use config::{BoundPolicy, SamplingConfig, SamplingConfigBuilder};
pub use engine::DistributionEngine;
pub use error::SamplingError;
pub use rng::ExposureRng;
pub use sample::{ExposureDistribution, ExposureSet};
