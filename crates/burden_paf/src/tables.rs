//! Keyed input tables for the PAF pipelines.
//!
//! Every table is a typed map; a missing key is a [`LookupError`], never a
//! default value.

use crate::relative_risk::{Direction, RelativeRisk};
use burden_core::types::{AgeId, DiseaseId, LookupError, RiskId, SexId};
use burden_models::exposure::ExposureCell;
use std::collections::HashMap;
use std::fmt;

/// Burden component a PAF applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Years lived with disability.
    Morbidity,
    /// Years of life lost.
    Mortality,
    /// One PAF shared by both components.
    Both,
}

impl Outcome {
    /// Label used in input tables.
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Morbidity => "Morbidity",
            Outcome::Mortality => "Mortality",
            Outcome::Both => "Both",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// TMREL per (risk, run).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TmrelTable {
    entries: HashMap<(RiskId, u64), f64>,
}

impl TmrelTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the TMREL of a risk for a run.
    pub fn insert(&mut self, risk: RiskId, run: u64, tmrel: f64) {
        self.entries.insert((risk, run), tmrel);
    }

    /// TMREL of a risk for a run.
    pub fn get(&self, risk: RiskId, run: u64) -> Result<f64, LookupError> {
        self.entries
            .get(&(risk, run))
            .copied()
            .ok_or_else(|| LookupError::missing("tmrel", (risk, run)))
    }
}

/// Key of a relative-risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RiskFactorKey {
    /// Risk.
    pub risk: RiskId,
    /// Disease.
    pub disease: DiseaseId,
    /// Age group.
    pub age: AgeId,
    /// Run index.
    pub run: u64,
}

/// Risk factors per (risk, disease, age, run), one map per burden component.
///
/// `Both` reads the mortality map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskFactorTables {
    morbidity: HashMap<RiskFactorKey, f64>,
    mortality: HashMap<RiskFactorKey, f64>,
}

impl RiskFactorTables {
    /// Empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a morbidity risk factor.
    pub fn insert_morbidity(&mut self, key: RiskFactorKey, rf: f64) {
        self.morbidity.insert(key, rf);
    }

    /// Sets a mortality risk factor.
    pub fn insert_mortality(&mut self, key: RiskFactorKey, rf: f64) {
        self.mortality.insert(key, rf);
    }

    /// Risk factor for `outcome`.
    pub fn get(&self, outcome: Outcome, key: RiskFactorKey) -> Result<f64, LookupError> {
        let (table, name) = match outcome {
            Outcome::Morbidity => (&self.morbidity, "morbidity risk factors"),
            Outcome::Mortality | Outcome::Both => (&self.mortality, "mortality risk factors"),
        };
        table
            .get(&key)
            .copied()
            .ok_or_else(|| LookupError::missing(name, key))
    }
}

/// Unit and harmful side of a (risk, disease, outcome) dose response.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoseResponse {
    /// Exposure unit of the risk factor.
    pub unit: f64,
    /// Harmful side of the TMREL.
    pub direction: Direction,
}

/// Dose-response metadata per (risk, disease, outcome).
///
/// A risk is linked to a disease exactly when some outcome entry exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskMetadataTable {
    entries: HashMap<(RiskId, DiseaseId, Outcome), DoseResponse>,
}

impl RiskMetadataTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the metadata of a (risk, disease, outcome).
    pub fn insert(&mut self, risk: RiskId, disease: DiseaseId, outcome: Outcome, dose: DoseResponse) {
        self.entries.insert((risk, disease, outcome), dose);
    }

    /// How a linked pair is computed: [`Outcome::Both`] when a shared entry
    /// exists, otherwise the first separate outcome present.
    ///
    /// `None` when the risk does not affect the disease.
    pub fn linked_outcome(&self, risk: RiskId, disease: DiseaseId) -> Option<Outcome> {
        [Outcome::Both, Outcome::Morbidity, Outcome::Mortality]
            .into_iter()
            .find(|&o| self.entries.contains_key(&(risk, disease, o)))
    }

    /// Metadata of a (risk, disease, outcome).
    pub fn get(&self, risk: RiskId, disease: DiseaseId, outcome: Outcome) -> Result<DoseResponse, LookupError> {
        self.entries
            .get(&(risk, disease, outcome))
            .copied()
            .ok_or_else(|| LookupError::missing("risk metadata", (risk, disease, outcome)))
    }
}

/// Key of a burden total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BurdenKey {
    /// Country name.
    pub country: String,
    /// Age group.
    pub age: AgeId,
    /// Sex.
    pub sex: SexId,
    /// Disease.
    pub disease: DiseaseId,
}

/// YLD and YLL totals of one (country, age, sex, disease).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BurdenTotals {
    /// Years lived with disability.
    pub yld: f64,
    /// Years of life lost.
    pub yll: f64,
}

/// Burden totals per (country, age, sex, disease).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BurdenTable {
    entries: HashMap<BurdenKey, BurdenTotals>,
}

impl BurdenTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the totals of a key.
    pub fn insert(&mut self, key: BurdenKey, totals: BurdenTotals) {
        self.entries.insert(key, totals);
    }

    /// Totals of a (country, age, sex, disease).
    pub fn get(&self, country: &str, age: AgeId, sex: SexId, disease: DiseaseId) -> Result<BurdenTotals, LookupError> {
        let key = BurdenKey {
            country: country.to_string(),
            age,
            sex,
            disease,
        };
        self.entries
            .get(&key)
            .copied()
            .ok_or_else(|| LookupError::missing("burden totals", key))
    }
}

/// Key of an intake shift.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShiftKey {
    /// Demand scenario name.
    pub scenario: String,
    /// Projection year.
    pub year: u32,
    /// Country name.
    pub country: String,
    /// Age group.
    pub age: AgeId,
    /// Sex.
    pub sex: SexId,
    /// Risk.
    pub risk: RiskId,
}

/// Uniform intake shifts per (scenario, year, country, age, sex, risk, run).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftTable {
    entries: HashMap<(ShiftKey, u64), f64>,
}

impl ShiftTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a shift.
    pub fn insert(&mut self, key: ShiftKey, run: u64, shift: f64) {
        self.entries.insert((key, run), shift);
    }

    /// Shift of a key for a run.
    pub fn get(&self, key: &ShiftKey, run: u64) -> Result<f64, LookupError> {
        self.entries
            .get(&(key.clone(), run))
            .copied()
            .ok_or_else(|| LookupError::missing("intake shifts", (key, run)))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Exposure cells per (country, run).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureTable {
    entries: HashMap<(String, u64), Vec<ExposureCell>>,
}

impl ExposureTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cells of a (country, run).
    pub fn insert(&mut self, country: impl Into<String>, run: u64, cells: Vec<ExposureCell>) {
        self.entries.insert((country.into(), run), cells);
    }

    /// Cells of a (country, run).
    pub fn cells(&self, country: &str, run: u64) -> Result<&[ExposureCell], LookupError> {
        self.entries
            .get(&(country.to_string(), run))
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::missing("exposure cells", (country, run)))
    }
}

/// Risk-side tables needed to build a relative-risk curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoseResponseTables {
    /// TMREL per (risk, run).
    pub tmrel: TmrelTable,
    /// Risk factors per (risk, disease, age, run).
    pub risk_factors: RiskFactorTables,
    /// Unit and direction per (risk, disease, outcome).
    pub metadata: RiskMetadataTable,
}

impl DoseResponseTables {
    /// Relative-risk curve of a (risk, disease, age, outcome) for a run.
    ///
    /// # Example
    ///
    /// ```
    /// use burden_core::types::{AgeId, DiseaseId, RiskId};
    /// use burden_paf::relative_risk::Direction;
    /// use burden_paf::tables::{DoseResponse, DoseResponseTables, Outcome, RiskFactorKey};
    ///
    /// let (risk, disease, age) = (RiskId(0), DiseaseId(2), AgeId(1));
    /// let mut tables = DoseResponseTables::default();
    /// tables.tmrel.insert(risk, 0, 1000.0);
    /// tables.metadata.insert(risk, disease, Outcome::Both,
    ///     DoseResponse { unit: 100.0, direction: Direction::Low });
    /// tables.risk_factors.insert_mortality(RiskFactorKey { risk, disease, age, run: 0 }, 1.1);
    ///
    /// let rr = tables.relative_risk(risk, disease, age, Outcome::Both, 0).unwrap();
    /// assert_eq!(rr.tmrel, 1000.0);
    /// assert!(tables.relative_risk(risk, disease, age, Outcome::Morbidity, 0).is_err());
    /// ```
    pub fn relative_risk(
        &self,
        risk: RiskId,
        disease: DiseaseId,
        age: AgeId,
        outcome: Outcome,
        run: u64,
    ) -> Result<RelativeRisk, LookupError> {
        let tmrel = self.tmrel.get(risk, run)?;
        let dose = self.metadata.get(risk, disease, outcome)?;
        let rf = self.risk_factors.get(
            outcome,
            RiskFactorKey {
                risk,
                disease,
                age,
                run,
            },
        )?;
        Ok(RelativeRisk::new(tmrel, rf, dose.unit, dose.direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmrel_missing_is_error() {
        let mut t = TmrelTable::new();
        t.insert(RiskId(2), 0, 5.0);
        assert_eq!(t.get(RiskId(2), 0).unwrap(), 5.0);
        assert!(matches!(
            t.get(RiskId(2), 1),
            Err(LookupError::MissingEntry { table: "tmrel", .. })
        ));
    }

    #[test]
    fn test_linked_outcome_prefers_both() {
        let mut m = RiskMetadataTable::new();
        let dose = DoseResponse {
            unit: 1.0,
            direction: Direction::High,
        };
        m.insert(RiskId(0), DiseaseId(0), Outcome::Mortality, dose);
        m.insert(RiskId(0), DiseaseId(0), Outcome::Morbidity, dose);
        m.insert(RiskId(1), DiseaseId(0), Outcome::Both, dose);
        m.insert(RiskId(1), DiseaseId(0), Outcome::Morbidity, dose);
        assert_eq!(m.linked_outcome(RiskId(0), DiseaseId(0)), Some(Outcome::Morbidity));
        assert_eq!(m.linked_outcome(RiskId(1), DiseaseId(0)), Some(Outcome::Both));
        assert_eq!(m.linked_outcome(RiskId(2), DiseaseId(0)), None);
    }

    #[test]
    fn test_both_reads_mortality_factors() {
        let key = RiskFactorKey {
            risk: RiskId(0),
            disease: DiseaseId(0),
            age: AgeId(0),
            run: 3,
        };
        let mut rf = RiskFactorTables::new();
        rf.insert_morbidity(key, 1.2);
        rf.insert_mortality(key, 1.5);
        assert_eq!(rf.get(Outcome::Morbidity, key).unwrap(), 1.2);
        assert_eq!(rf.get(Outcome::Both, key).unwrap(), 1.5);
    }

    #[test]
    fn test_burden_and_shift_lookup() {
        let mut burden = BurdenTable::new();
        let key = BurdenKey {
            country: "Kenya".to_string(),
            age: AgeId(1),
            sex: SexId(0),
            disease: DiseaseId(4),
        };
        burden.insert(key, BurdenTotals { yld: 2.0, yll: 3.0 });
        assert_eq!(burden.get("Kenya", AgeId(1), SexId(0), DiseaseId(4)).unwrap().yll, 3.0);
        assert!(burden.get("Peru", AgeId(1), SexId(0), DiseaseId(4)).is_err());

        let mut shifts = ShiftTable::new();
        let skey = ShiftKey {
            scenario: "SSP2".to_string(),
            year: 2030,
            country: "Kenya".to_string(),
            age: AgeId(1),
            sex: SexId(0),
            risk: RiskId(3),
        };
        shifts.insert(skey.clone(), 0, 12.5);
        assert_eq!(shifts.get(&skey, 0).unwrap(), 12.5);
        assert!(shifts.get(&skey, 1).is_err());
        assert_eq!(shifts.len(), 1);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Both.to_string(), "Both");
    }
}
