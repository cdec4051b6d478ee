//! Moment-matching parameter recovery.
//!
//! - [`fit_beta`]: closed-form Beta on a widened support
//! - [`FiskSolver`]: Fisk shape by numerical minimisation
//! - [`WeibullSolver`] / [`InvWeibullSolver`]: closed forms by ratio regime
//!   with numerical fallback
//! - [`VariableBuilder`]: all of the above for a batch of exposure cells

mod beta;
mod error;
mod fisk;
mod inv_weibull;
mod shape_scale;
mod variables;
mod weibull;

pub use beta::{beta_regime, beta_widening, fit_beta, BetaFit, BetaRegime, BETA_EPSILON, BETA_SHAPE_FLOOR};
pub use error::CalibrationError;
pub use fisk::{fisk_objective, FiskFit, FiskSolver, FISK_MEAN_TOLERANCE, FISK_SHAPE_MIN};
pub use inv_weibull::{InvWeibullModel, InvWeibullSolver, INV_WEIBULL_SHAPE_RANGE};
pub use shape_scale::{
    RatioRegime, ShapeScaleFit, ShapeScaleModel, ShapeScaleSolver, LOW_RATIO_THRESHOLD,
    SHAPE_SCALE_MEAN_TOLERANCE,
};
pub use variables::{FamilyVariables, VariableBuilder};
pub use weibull::{WeibullModel, WeibullSolver, WEIBULL_SHAPE_RANGE};
