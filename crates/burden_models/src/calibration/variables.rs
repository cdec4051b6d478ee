//! Batch derivation of the calibrated family variables.

use super::beta::fit_beta;
use super::shape_scale::{RatioRegime, ShapeScaleFit, ShapeScaleModel, ShapeScaleSolver};
use super::{CalibrationError, FiskSolver, InvWeibullModel, WeibullModel};
use crate::distributions::DistributionParameterSet;
use crate::exposure::ExposureCell;
use burden_core::math::solvers::MinimiserChain;
use tracing::{debug, info};

/// Calibrated variables of one cell that the closed-form parameter entries
/// cannot supply themselves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FamilyVariables {
    /// Fisk scale α.
    pub alpha_fisk: f64,
    /// Fisk shape β.
    pub beta_fisk: f64,
    /// Weibull shape.
    pub k_weibull: f64,
    /// Weibull scale.
    pub lambda_weibull: f64,
    /// Inverse-Weibull shape.
    pub k_invweibull: f64,
    /// Inverse-Weibull rate (scale is its reciprocal).
    pub lambda_invweibull: f64,
    /// Beta first shape.
    pub a_beta: f64,
    /// Beta second shape.
    pub b_beta: f64,
    /// Absolute upper bound of the cell.
    pub upper: f64,
    /// Absolute lower bound of the cell.
    pub lower: f64,
    /// Widened Beta support end.
    pub upper_beta: f64,
    /// Widened Beta support start.
    pub lower_beta: f64,
}

/// Derives [`FamilyVariables`] for a batch of exposure cells.
///
/// Beta and Fisk are fitted cell by cell. Weibull and inverse-Weibull cells
/// are split into ratio partitions, each fitted as one batch so that a
/// closed-form miss refits the whole partition numerically.
#[derive(Debug, Clone, Default)]
pub struct VariableBuilder {
    fisk: FiskSolver,
    weibull: ShapeScaleSolver<WeibullModel>,
    inv_weibull: ShapeScaleSolver<InvWeibullModel>,
}

impl VariableBuilder {
    /// Builder whose numerical fallbacks all use `chain`.
    pub fn new(chain: MinimiserChain) -> Self {
        Self {
            fisk: FiskSolver::new(chain.clone()),
            weibull: ShapeScaleSolver::new(chain.clone()),
            inv_weibull: ShapeScaleSolver::new(chain),
        }
    }

    /// Calibrate every cell, preserving input order.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::InvalidMoments` for a cell with `sd = 0` or invalid moments
    /// - `CalibrationError::InvalidBounds` for a cell whose bounds are not ordered
    /// - `CalibrationError::NonConvergence` when a numerical fit is exhausted
    pub fn build(&self, cells: &[ExposureCell]) -> Result<Vec<FamilyVariables>, CalibrationError> {
        for cell in cells {
            cell.validate()?;
            if cell.sd <= 0.0 {
                return Err(CalibrationError::InvalidMoments {
                    mean: cell.mean,
                    sd: cell.sd,
                });
            }
        }

        let mut variables: Vec<FamilyVariables> = cells
            .iter()
            .map(|cell| {
                let beta = fit_beta(cell.mean, cell.sd, cell.lower(), cell.upper());
                FamilyVariables {
                    a_beta: beta.a,
                    b_beta: beta.b,
                    upper_beta: beta.upper,
                    lower_beta: beta.lower,
                    upper: cell.upper(),
                    lower: cell.lower(),
                    ..FamilyVariables::default()
                }
            })
            .collect();

        for (index, fit) in fit_partitioned(&self.weibull, cells)? {
            variables[index].k_weibull = fit.k;
            variables[index].lambda_weibull = fit.lambda;
        }
        for (index, fit) in fit_partitioned(&self.inv_weibull, cells)? {
            variables[index].k_invweibull = fit.k;
            variables[index].lambda_invweibull = fit.lambda;
        }

        for (vars, cell) in variables.iter_mut().zip(cells) {
            let fit = self.fisk.fit(cell.mean, cell.sd)?;
            vars.alpha_fisk = fit.alpha;
            vars.beta_fisk = fit.beta;
        }

        info!(cells = cells.len(), "Family variables calibrated");
        Ok(variables)
    }

    /// Calibrate every cell and assemble its full parameter set.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn parameter_sets(
        &self,
        cells: &[ExposureCell],
    ) -> Result<Vec<DistributionParameterSet>, CalibrationError> {
        let variables = self.build(cells)?;
        Ok(cells
            .iter()
            .zip(&variables)
            .map(|(cell, vars)| DistributionParameterSet::from_moments(cell.mean, cell.sd, vars))
            .collect())
    }
}

/// Fit each ratio partition of `cells` as one batch, returning
/// `(cell index, fit)` pairs.
fn fit_partitioned<M: ShapeScaleModel>(
    solver: &ShapeScaleSolver<M>,
    cells: &[ExposureCell],
) -> Result<Vec<(usize, ShapeScaleFit)>, CalibrationError> {
    let mut fitted = Vec::with_capacity(cells.len());
    for regime in [RatioRegime::High, RatioRegime::Low, RatioRegime::Middle] {
        let indices: Vec<usize> = (0..cells.len())
            .filter(|&i| M::regime(cells[i].ratio()) == regime)
            .collect();
        if indices.is_empty() {
            continue;
        }
        let moments: Vec<(f64, f64)> = indices.iter().map(|&i| (cells[i].mean, cells[i].sd)).collect();
        debug!(family = %M::FAMILY, ?regime, cells = indices.len(), "Fitting ratio partition");
        let fits = solver.fit_partition(&moments, regime)?;
        fitted.extend(indices.into_iter().zip(fits));
    }
    Ok(fitted)
}
