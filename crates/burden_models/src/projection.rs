//! Demand-scenario projection of baseline mean intakes.
//!
//! Every dietary risk belongs to one demand category. A scenario supplies,
//! per (country, year, category), the proportion of baseline demand; the
//! projected mean and its bounds are the baseline values times that
//! proportion.

use crate::calibration::CalibrationError;
use crate::exposure::ExposureCell;
use burden_core::types::LookupError;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Years for which demand scenarios are projected.
pub const PROJECTION_YEARS: [u32; 7] = [2020, 2025, 2030, 2035, 2040, 2045, 2050];

/// Demand category a dietary risk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DemandCategory {
    /// Animal-source foods.
    Animal,
    /// Empty calories.
    Empty,
    /// Vegetables, fruits and nuts.
    Plant,
    /// Fatty-acid adjustment factor.
    FattyAcids,
}

impl DemandCategory {
    /// All categories.
    pub const ALL: [DemandCategory; 4] = [
        DemandCategory::Animal,
        DemandCategory::Empty,
        DemandCategory::Plant,
        DemandCategory::FattyAcids,
    ];

    /// Category of a dietary risk.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::UnknownName` for a risk with no category.
    ///
    /// # Example
    ///
    /// ```
    /// use burden_models::projection::DemandCategory;
    ///
    /// assert_eq!(DemandCategory::for_risk("Diet low in milk").unwrap(), DemandCategory::Animal);
    /// assert!(DemandCategory::for_risk("Diet high in kale").is_err());
    /// ```
    pub fn for_risk(risk: &str) -> Result<Self, LookupError> {
        let category = match risk {
            "Diet high in red meat" | "Diet low in milk" | "Diet low in calcium" => Self::Animal,
            "Diet high in processed meat"
            | "Diet high in sodium"
            | "Diet high in sugar-sweetened beverages"
            | "Diet high in trans fatty acids" => Self::Empty,
            "Diet low in fiber"
            | "Diet low in fruits"
            | "Diet low in whole grains"
            | "Diet low in legumes"
            | "Diet low in nuts and seeds"
            | "Diet low in vegetables" => Self::Plant,
            "Diet low in seafood omega-3 fatty acids" | "Diet low in polyunsaturated fatty acids" => {
                Self::FattyAcids
            }
            other => {
                return Err(LookupError::UnknownName {
                    kind: "demand category risk",
                    name: other.to_string(),
                })
            }
        };
        Ok(category)
    }

    /// Short name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Animal => "animal",
            Self::Empty => "empty",
            Self::Plant => "plant",
            Self::FattyAcids => "fatty_acids",
        }
    }
}

impl fmt::Display for DemandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a demand-scenario proportion table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProportionRow {
    /// Country code.
    pub country: String,
    /// Projection year.
    pub year: u32,
    /// Demand category.
    pub category: DemandCategory,
    /// Proportion of baseline demand.
    pub proportion: f64,
}

/// Projection errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// No proportion for the requested key, or unknown risk.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The projected cell is not a valid exposure cell.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// Baseline mean and bounds after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedIntake {
    /// Projected mean.
    pub mean: f64,
    /// Projected lower bound.
    pub lower: f64,
    /// Projected upper bound.
    pub upper: f64,
}

/// Demand proportions keyed by (country, year, category).
///
/// # Example
///
/// ```
/// use burden_models::projection::{DemandCategory, DemandProportions};
///
/// let mut table = DemandProportions::default();
/// table.insert("FRA", 2030, DemandCategory::Plant, 1.2);
/// let p = table.project("FRA", 2030, "Diet low in fruits", 100.0, 20.0, 300.0).unwrap();
/// assert!((p.mean - 120.0).abs() < 1e-12);
/// assert!(table.project("FRA", 2035, "Diet low in fruits", 100.0, 20.0, 300.0).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemandProportions {
    table: HashMap<(String, u32, DemandCategory), f64>,
}

impl DemandProportions {
    /// Insert or replace one proportion.
    pub fn insert(&mut self, country: impl Into<String>, year: u32, category: DemandCategory, proportion: f64) {
        self.table.insert((country.into(), year, category), proportion);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Proportion for a key.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::MissingEntry` if the key is absent.
    pub fn proportion(&self, country: &str, year: u32, category: DemandCategory) -> Result<f64, LookupError> {
        self.table
            .get(&(country.to_string(), year, category))
            .copied()
            .ok_or_else(|| LookupError::missing("demand proportions", (country, year, category)))
    }

    /// Scale a baseline mean and its bounds by the risk's demand proportion.
    ///
    /// # Errors
    ///
    /// Returns a `LookupError` for an unknown risk or a missing proportion.
    pub fn project(
        &self,
        country: &str,
        year: u32,
        risk: &str,
        mean: f64,
        lower: f64,
        upper: f64,
    ) -> Result<ProjectedIntake, LookupError> {
        let p = self.proportion(country, year, DemandCategory::for_risk(risk)?)?;
        Ok(ProjectedIntake {
            mean: mean * p,
            lower: lower * p,
            upper: upper * p,
        })
    }

    /// Project an exposure cell; its relative bounds follow the new mean.
    ///
    /// # Errors
    ///
    /// - `ProjectionError::Lookup` for an unknown risk or missing proportion
    /// - `ProjectionError::Calibration` if the projected mean is not positive
    pub fn project_cell(
        &self,
        country: &str,
        year: u32,
        risk: &str,
        cell: &ExposureCell,
    ) -> Result<ExposureCell, ProjectionError> {
        let p = self.proportion(country, year, DemandCategory::for_risk(risk)?)?;
        Ok(cell.with_mean(cell.mean * p)?)
    }
}

impl FromIterator<ProportionRow> for DemandProportions {
    fn from_iter<I: IntoIterator<Item = ProportionRow>>(iter: I) -> Self {
        let mut table = Self::default();
        for row in iter {
            table.insert(row.country, row.year, row.category, row.proportion);
        }
        table
    }
}
