//! # Burden PAF (A: Aggregation Layer)
//!
//! ## Aggregation Layer Role
//!
//! burden_paf turns exposure samples into attributable burden:
//! - Log-linear dose-response curves and their derivatives (`relative_risk`)
//! - PAF, PAF derivative and shifted PAF over a density histogram (`integrator`)
//! - Mediation tensor, single-risk views, joint PAF, joint-PAF derivative and
//!   proportional split (`mediation`)
//! - Keyed input tables that fail on missing entries (`tables`)
//! - DALY attribution from joint PAFs (`burden`)
//! - Parallel (country, run) batch driver for the baseline, unilateral-shift
//!   and marginal pipelines (`driver`)
//!
//! ## Usage Example
//!
//! ```rust
//! use burden_core::types::{DiseaseId, Registry};
//! use burden_paf::integrator::PafIntegrator;
//! use burden_paf::mediation::{MediationAggregator, MediationConfig};
//! use burden_paf::relative_risk::{Direction, RelativeRisk};
//!
//! let sample: Vec<f64> = (0..1000).map(|i| i as f64 / 10.0).collect();
//! let integrator = PafIntegrator::default();
//! let sodium = RelativeRisk::new(30.0, 1.1, 10.0, Direction::High);
//! let paf = integrator.paf(&sample, &sodium).unwrap();
//! assert!(paf > 0.0 && paf < 1.0);
//!
//! let registry = Registry::gbd_diet();
//! let aggregator = MediationAggregator::from_config(&registry, &MediationConfig::default()).unwrap();
//! let mut pafs = vec![0.0; 15];
//! pafs[11] = paf;
//! let joint = aggregator.joint_paf(&pafs, DiseaseId(4)).unwrap();
//! assert!((joint - paf).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod burden;
pub mod driver;
pub mod error;
pub mod integrator;
pub mod mediation;
pub mod relative_risk;
pub mod tables;

pub use driver::{BatchDriver, BatchReport, FailurePolicy, Pipeline, PipelineInputs, UnitError, UnitResult};
pub use error::PafError;
pub use integrator::{IntegratorConfig, PafIntegrator};
pub use mediation::{MediationAggregator, MediationConfig, MediationTensor, MediationView};
pub use relative_risk::{Direction, RelativeRisk};
