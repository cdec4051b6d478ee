//! Mathematical building blocks.
//!
//! - [`solvers`]: Scalar minimisation methods and the fallback chain
//! - [`integration`]: Density histograms and Simpson's rule
//! - [`special`]: Gamma function family and normalised sinc

pub mod integration;
pub mod solvers;
pub mod special;
