//! JSON input bundle.
//!
//! Rows refer to risks, diseases, age groups and sexes by name. Conversion
//! resolves every name against the registry and fails on the first unknown
//! one, so a typo never becomes a silently empty table.

use crate::error::Result;
use burden_core::types::{AgeId, Registry, SexId};
use burden_models::distributions::{EnsembleWeights, WeightTable};
use burden_models::exposure::{CellKey, ExposureCell, RelativeBounds};
use burden_models::projection::{DemandProportions, ProportionRow};
use burden_paf::relative_risk::Direction;
use burden_paf::tables::{
    BurdenKey, BurdenTotals, DoseResponse, Outcome, RiskFactorKey, ShiftKey,
};
use burden_paf::PipelineInputs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::CliError;

/// Name lists of a custom registry.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RegistryNames {
    /// Risk names, in tensor order.
    pub risks: Vec<String>,
    /// Disease names.
    pub diseases: Vec<String>,
    /// Age-group labels.
    pub ages: Vec<String>,
    /// Sex labels.
    pub sexes: Vec<String>,
}

/// Summary statistics of one exposure cell.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExposureRow {
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
    /// Mean intake.
    pub mean: f64,
    /// Standard deviation.
    pub sd: f64,
    /// Lower bound as a multiple of the mean.
    pub xmin: f64,
    /// Upper bound as a multiple of the mean.
    pub xmax: f64,
}

/// Ensemble weights of one risk, keyed by weight column.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WeightRow {
    /// Risk name.
    pub risk: String,
    /// `exp`, `gamma`, ... `betasr` columns.
    pub weights: BTreeMap<String, f64>,
}

/// TMREL draw.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TmrelRow {
    /// Risk name.
    pub risk: String,
    /// Run index.
    pub run: u64,
    /// Theoretical minimum-risk exposure level.
    pub tmrel: f64,
}

/// Relative-risk factor draws of one (risk, disease, age, run).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RiskFactorRow {
    /// Risk name.
    pub risk: String,
    /// Disease name.
    pub disease: String,
    /// Age-group label.
    pub age: String,
    /// Run index.
    pub run: u64,
    /// Morbidity risk factor.
    #[serde(default)]
    pub morbidity: Option<f64>,
    /// Mortality risk factor.
    #[serde(default)]
    pub mortality: Option<f64>,
}

/// Dose-response metadata of one (risk, disease, outcome) link.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DoseResponseRow {
    /// Risk name.
    pub risk: String,
    /// Disease name.
    pub disease: String,
    /// `Morbidity`, `Mortality` or `Both`.
    pub outcome: Outcome,
    /// Exposure unit of the risk factor.
    pub unit: f64,
    /// `low` or `high`.
    pub direction: Direction,
}

/// YLD and YLL totals.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BurdenRow {
    /// Country.
    pub country: String,
    /// Age-group label.
    pub age: String,
    /// Sex label.
    pub sex: String,
    /// Disease name.
    pub disease: String,
    /// Years lived with disability.
    pub yld: f64,
    /// Years of life lost.
    pub yll: f64,
}

/// Intake shift of one scenario cell.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ShiftRow {
    /// Scenario label.
    pub scenario: String,
    /// Projection year.
    pub year: u32,
    /// Country.
    pub country: String,
    /// Age-group label.
    pub age: String,
    /// Sex label.
    pub sex: String,
    /// Risk name.
    pub risk: String,
    /// Run index.
    pub run: u64,
    /// Intake offset.
    pub shift: f64,
}

/// Every table a batch run reads.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputBundle {
    /// Custom registry; the dietary reference registry when absent.
    pub registry: Option<RegistryNames>,
    /// Countries in processing order.
    pub countries: Vec<String>,
    /// Exposure cells.
    pub exposures: Vec<ExposureRow>,
    /// Ensemble weights.
    pub weights: Vec<WeightRow>,
    /// TMREL draws.
    pub tmrel: Vec<TmrelRow>,
    /// Risk-factor draws.
    pub risk_factors: Vec<RiskFactorRow>,
    /// Dose-response metadata.
    pub dose_response: Vec<DoseResponseRow>,
    /// Burden totals.
    pub burden: Vec<BurdenRow>,
    /// Intake shifts.
    pub shifts: Vec<ShiftRow>,
    /// Demand-scenario proportions.
    pub proportions: Vec<ProportionRow>,
}

impl InputBundle {
    /// Read a bundle from a JSON file.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(CliError::FileNotFound(path.to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let bundle: Self = serde_json::from_str(&content)?;
        info!(
            path,
            countries = bundle.countries.len(),
            cells = bundle.exposures.len(),
            "Input bundle loaded"
        );
        Ok(bundle)
    }

    /// Registry the bundle's names resolve against.
    pub fn registry(&self) -> Registry {
        match &self.registry {
            Some(names) => Registry::new(
                names.risks.iter().map(String::as_str),
                names.diseases.iter().map(String::as_str),
                names.ages.iter().map(String::as_str),
                names.sexes.iter().map(String::as_str),
            ),
            None => Registry::gbd_diet(),
        }
    }

    /// Exposure cells grouped by (country, run), in row order.
    pub fn exposure_cells(&self, registry: &Registry) -> Result<BTreeMap<(String, u64), Vec<ExposureCell>>> {
        let mut grouped: BTreeMap<(String, u64), Vec<ExposureCell>> = BTreeMap::new();
        for row in &self.exposures {
            let key = CellKey::new(registry.risk(&row.risk)?, registry.age(&row.age)?, registry.sex(&row.sex)?);
            let cell = ExposureCell::new(key, row.mean, row.sd, RelativeBounds::new(row.xmin, row.xmax))?;
            grouped.entry((row.country.clone(), row.run)).or_default().push(cell);
        }
        Ok(grouped)
    }

    /// Demand-scenario proportion table.
    pub fn demand_proportions(&self) -> DemandProportions {
        self.proportions.iter().cloned().collect()
    }

    /// Resolves every row into typed pipeline tables.
    ///
    /// With `projection_year`, each exposure mean is first scaled by its
    /// risk's demand proportion for that year.
    pub fn pipeline_inputs(&self, registry: &Registry, projection_year: Option<u32>) -> Result<PipelineInputs> {
        let mut inputs = PipelineInputs::default();

        let proportions = projection_year.map(|year| (year, self.demand_proportions()));
        for ((country, run), cells) in self.exposure_cells(registry)? {
            let cells = match &proportions {
                Some((year, table)) => cells
                    .iter()
                    .map(|cell| table.project_cell(&country, *year, registry.risk_name(cell.key.risk), cell))
                    .collect::<std::result::Result<Vec<_>, _>>()?,
                None => cells,
            };
            inputs.exposures.insert(country, run, cells);
        }

        inputs.weights = self.weight_table(registry)?;

        let tables = &mut inputs.dose_response;
        for row in &self.tmrel {
            tables.tmrel.insert(registry.risk(&row.risk)?, row.run, row.tmrel);
        }
        for row in &self.risk_factors {
            let key = RiskFactorKey {
                risk: registry.risk(&row.risk)?,
                disease: registry.disease(&row.disease)?,
                age: registry.age(&row.age)?,
                run: row.run,
            };
            if let Some(rf) = row.morbidity {
                tables.risk_factors.insert_morbidity(key, rf);
            }
            if let Some(rf) = row.mortality {
                tables.risk_factors.insert_mortality(key, rf);
            }
        }
        for row in &self.dose_response {
            tables.metadata.insert(
                registry.risk(&row.risk)?,
                registry.disease(&row.disease)?,
                row.outcome,
                DoseResponse {
                    unit: row.unit,
                    direction: row.direction,
                },
            );
        }

        for row in &self.burden {
            let key = BurdenKey {
                country: row.country.clone(),
                age: registry.age(&row.age)?,
                sex: registry.sex(&row.sex)?,
                disease: registry.disease(&row.disease)?,
            };
            inputs.burden.insert(
                key,
                BurdenTotals {
                    yld: row.yld,
                    yll: row.yll,
                },
            );
        }

        for row in &self.shifts {
            let (age, sex): (AgeId, SexId) = (registry.age(&row.age)?, registry.sex(&row.sex)?);
            let key = ShiftKey {
                scenario: row.scenario.clone(),
                year: row.year,
                country: row.country.clone(),
                age,
                sex,
                risk: registry.risk(&row.risk)?,
            };
            inputs.shifts.insert(key, row.run, row.shift);
        }

        debug!(
            weights = inputs.weights.len(),
            shifts = inputs.shifts.len(),
            "Pipeline inputs resolved"
        );
        Ok(inputs)
    }

    /// Ensemble weights keyed by risk.
    pub fn weight_table(&self, registry: &Registry) -> Result<WeightTable> {
        let mut table = WeightTable::default();
        for row in &self.weights {
            let weights = EnsembleWeights::from_columns(row.weights.iter().map(|(c, w)| (c.as_str(), *w)))?;
            table.insert(registry.risk(&row.risk)?, weights);
        }
        Ok(table)
    }
}

/// Two-country bundle on a two-risk registry; only Chile has exposure cells.
#[cfg(test)]
pub(crate) const BUNDLE: &str = r#"{
    "registry": {
        "risks": ["Diet high in sodium", "Diet low in fruits"],
        "diseases": ["Ischemic heart disease"],
        "ages": ["25 to 29", "80 to 84"],
        "sexes": ["Female"]
    },
    "countries": ["Chile", "Ghana"],
    "exposures": [
        {"country": "Chile", "run": 0, "risk": "Diet high in sodium", "age": "25 to 29", "sex": "Female",
         "mean": 4.0, "sd": 1.0, "xmin": 0.2, "xmax": 3.0},
        {"country": "Chile", "run": 0, "risk": "Diet high in sodium", "age": "80 to 84", "sex": "Female",
         "mean": 3.5, "sd": 1.0, "xmin": 0.2, "xmax": 3.0},
        {"country": "Chile", "run": 0, "risk": "Diet low in fruits", "age": "25 to 29", "sex": "Female",
         "mean": 120.0, "sd": 30.0, "xmin": 0.1, "xmax": 4.0},
        {"country": "Chile", "run": 0, "risk": "Diet low in fruits", "age": "80 to 84", "sex": "Female",
         "mean": 140.0, "sd": 30.0, "xmin": 0.1, "xmax": 4.0}
    ],
    "weights": [
        {"risk": "Diet high in sodium", "weights": {"exp": 0.0, "gamma": 0.0, "llogis": 0.0, "gumbel": 0.0,
         "weibull": 0.0, "lnorm": 0.0, "norm": 1.0, "betasr": 0.0, "mgamma": 0.0, "mgumbel": 0.0,
         "invgamma": 0.0, "invweibull": 0.0}},
        {"risk": "Diet low in fruits", "weights": {"exp": 0.0, "gamma": 0.0, "llogis": 0.0, "gumbel": 0.0,
         "weibull": 0.0, "lnorm": 0.5, "norm": 0.5, "betasr": 0.0, "mgamma": 0.0, "mgumbel": 0.0,
         "invgamma": 0.0, "invweibull": 0.0}}
    ],
    "tmrel": [
        {"risk": "Diet high in sodium", "run": 0, "tmrel": 3.0},
        {"risk": "Diet low in fruits", "run": 0, "tmrel": 200.0}
    ],
    "risk_factors": [
        {"risk": "Diet high in sodium", "disease": "Ischemic heart disease", "age": "25 to 29", "run": 0,
         "morbidity": 1.1, "mortality": 1.2},
        {"risk": "Diet high in sodium", "disease": "Ischemic heart disease", "age": "80 to 84", "run": 0,
         "morbidity": 1.1, "mortality": 1.15},
        {"risk": "Diet low in fruits", "disease": "Ischemic heart disease", "age": "25 to 29", "run": 0,
         "mortality": 1.05},
        {"risk": "Diet low in fruits", "disease": "Ischemic heart disease", "age": "80 to 84", "run": 0,
         "mortality": 1.04}
    ],
    "dose_response": [
        {"risk": "Diet high in sodium", "disease": "Ischemic heart disease", "outcome": "Both",
         "unit": 1.0, "direction": "high"},
        {"risk": "Diet low in fruits", "disease": "Ischemic heart disease", "outcome": "Both",
         "unit": 100.0, "direction": "low"}
    ],
    "burden": [
        {"country": "Chile", "age": "25 to 29", "sex": "Female", "disease": "Ischemic heart disease",
         "yld": 10.0, "yll": 20.0},
        {"country": "Chile", "age": "80 to 84", "sex": "Female", "disease": "Ischemic heart disease",
         "yld": 40.0, "yll": 90.0}
    ],
    "shifts": [
        {"scenario": "SSP1", "year": 2030, "country": "Chile", "age": "25 to 29", "sex": "Female",
         "risk": "Diet high in sodium", "run": 0, "shift": -0.5}
    ],
    "proportions": [
        {"country": "Chile", "year": 2030, "category": "empty", "proportion": 0.5},
        {"country": "Chile", "year": 2030, "category": "plant", "proportion": 0.5}
    ]
}"#;
