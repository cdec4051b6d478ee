//! Fit command implementation
//!
//! Calibrates the ensemble parameter set of every exposure cell in a bundle
//! and optionally tabulates each cell's mixture density.

use crate::input::InputBundle;
use crate::Result;
use burden_core::math::integration::linspace;
use burden_models::calibration::VariableBuilder;
use burden_models::distributions::{MixtureDensity, PARAMETER_NAMES};
use serde::Serialize;
use tracing::info;

/// Calibrated parameters of one cell.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FittedCell {
    /// Country.
    pub country: String,
    /// Run index.
    pub run: u64,
    /// Risk name.
    pub risk: String,
    /// Age-group label.
    pub age: String,
    /// Sex label.
    pub sex: String,
    /// Parameter values, in the order of `parameter_names`.
    pub parameters: Vec<f64>,
    /// `(x, pdf(x))` pairs across the cell's bounds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub density: Vec<(f64, f64)>,
}

/// JSON document written by the fit command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FitOutput {
    /// `family_parameter` labels.
    pub parameter_names: Vec<String>,
    /// Calibrated cells.
    pub cells: Vec<FittedCell>,
}

/// Calibrates every cell of the bundle; with `density_points > 0` the
/// ensemble density is evaluated on that many points per cell.
pub fn fit(bundle: &InputBundle, density_points: usize) -> Result<FitOutput> {
    let registry = bundle.registry();
    let builder = VariableBuilder::default();
    let weights = if density_points > 0 {
        Some(bundle.weight_table(&registry)?)
    } else {
        None
    };

    let mut fitted = Vec::with_capacity(bundle.exposures.len());
    for ((country, run), cells) in bundle.exposure_cells(&registry)? {
        let parameter_sets = builder.parameter_sets(&cells)?;
        for (cell, parameters) in cells.iter().zip(parameter_sets) {
            let density = match &weights {
                Some(table) => {
                    let mixture = MixtureDensity::new(parameters, *table.get(cell.key.risk)?);
                    linspace(parameters.lower(), parameters.upper(), density_points)
                        .into_iter()
                        .map(|x| (x, mixture.pdf(x)))
                        .collect()
                }
                None => Vec::new(),
            };
            fitted.push(FittedCell {
                country: country.clone(),
                run,
                risk: registry.risk_name(cell.key.risk).to_string(),
                age: registry.age_name(cell.key.age).to_string(),
                sex: registry.sex_name(cell.key.sex).to_string(),
                parameters: parameters.values().to_vec(),
                density,
            });
        }
    }

    info!(cells = fitted.len(), "Cells calibrated");
    Ok(FitOutput {
        parameter_names: PARAMETER_NAMES
            .iter()
            .map(|(family, name)| format!("{}_{}", family, name))
            .collect(),
        cells: fitted,
    })
}

/// Execute the fit command
pub fn run(input: &str, output: Option<&str>, density_points: usize) -> Result<()> {
    info!("Starting calibration");
    let bundle = InputBundle::load(input)?;
    let document = fit(&bundle, density_points)?;

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(file, &document)?;
            info!(path, "Parameters written");
        }
        None => println!("{}", serde_json::to_string_pretty(&document)?),
    }
    Ok(())
}
