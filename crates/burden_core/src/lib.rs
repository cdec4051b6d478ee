//! # burden_core: Numerical Foundation for Dietary-Risk Burden Estimation
//!
//! ## Foundation Layer Role
//!
//! burden_core is the bottom layer of the workspace, providing:
//! - Scalar minimisers and the fixed-order fallback chain (`math::solvers`)
//! - Density histograms and Simpson quadrature (`math::integration`)
//! - Gamma, log-gamma and normalised sinc (`math::special`)
//! - Typed name registries for risks, diseases, age groups and sexes (`types::registry`)
//! - Error types: `SolverError`, `IntegrationError`, `LookupError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! This layer has no dependencies on other burden_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - tracing: Diagnostics for fallback solver attempts
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use burden_core::math::integration::{simpson, DensityHistogram};
//! use burden_core::types::Registry;
//!
//! // Density histogram of a sample, integrated over its bin centres
//! let sample: Vec<f64> = (0..1000).map(|i| i as f64 / 999.0).collect();
//! let hist = DensityHistogram::from_samples(&sample, 100).unwrap();
//! let mass = simpson(hist.density(), &hist.centres()).unwrap();
//! assert!((mass - 0.99).abs() < 1e-2);
//!
//! // Typed registry lookups
//! let registry = Registry::gbd_diet();
//! let milk = registry.risk("Diet low in milk").unwrap();
//! assert_eq!(registry.risk_name(milk), "Diet low in milk");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for registries and error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
