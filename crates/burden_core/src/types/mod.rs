//! Core types.
//!
//! This module provides:
//! - `registry`: Typed name registries for risks, diseases, age groups and sexes
//! - `error`: Structured error types for minimisation, integration and lookups
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Registry`], [`RiskId`], [`DiseaseId`], [`AgeId`], [`SexId`], [`Dimensions`] from `registry`
//! - [`SolverError`], [`IntegrationError`], [`LookupError`] from `error`

pub mod error;
pub mod registry;

// Re-export commonly used types at module level
pub use error::{IntegrationError, LookupError, SolverError};
pub use registry::{AgeId, Dimensions, DiseaseId, Registry, RiskId, SexId};
