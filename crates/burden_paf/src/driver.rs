//! Batch driver over (country, run) units.
//!
//! A unit synthesises the exposure samples of one country for one run,
//! integrates every linked (risk, disease, age, sex) PAF and aggregates the
//! result into attributable DALYs. Units share nothing mutable: each returns
//! an immutable [`UnitResult`] and the batch is merged by
//! [`BatchReport::from_units`].
//!
//! # Pipelines
//!
//! - [`Pipeline::Baseline`]: joint PAF over all risks with the full mediation
//!   tensor, split back onto risks in proportion to their individual joint
//!   PAFs
//! - [`Pipeline::UnilateralShift`]: per risk, the individual PAF under a
//!   mediation view and its change when only that risk's intake is shifted
//! - [`Pipeline::Marginal`]: per risk, the DALY derivative from the joint-PAF
//!   derivative, for all ages and for ages below a limit

use crate::burden::{attributable_dalys, OutcomePair};
use crate::error::PafError;
use crate::integrator::PafIntegrator;
use crate::mediation::{proportional_split, MediationAggregator, MediationTensor, MediationView};
use crate::tables::{BurdenTable, DoseResponseTables, ExposureTable, Outcome, ShiftKey, ShiftTable};
use burden_core::math::integration::DensityHistogram;
use burden_core::types::{AgeId, DiseaseId, LookupError, Registry, RiskId, SexId};
use burden_models::distributions::WeightTable;
use burden_models::exposure::CellKey;
use burden_sampling::{DistributionEngine, SamplingError};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::ops::Range;
use thiserror::Error;
use tracing::{error, info};

/// Age limit of the marginal pipeline's restricted sum.
pub const DEFAULT_AGE_LIMIT: u32 = 70;

/// Where a unit failed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnitCoordinates {
    /// Country name.
    pub country: String,
    /// Run index.
    pub run: u64,
    /// Risk being evaluated, if any.
    pub risk: Option<RiskId>,
    /// Disease being evaluated, if any.
    pub disease: Option<DiseaseId>,
}

impl UnitCoordinates {
    /// Coordinates of a whole unit.
    pub fn unit(country: &str, run: u64) -> Self {
        Self {
            country: country.to_string(),
            run,
            risk: None,
            disease: None,
        }
    }

    /// Narrowed to a (risk, disease).
    pub fn at(&self, risk: RiskId, disease: DiseaseId) -> Self {
        Self {
            risk: Some(risk),
            disease: Some(disease),
            ..self.clone()
        }
    }

    /// Attaches these coordinates to a failure.
    pub fn fail(&self, failure: impl Into<UnitFailure>) -> UnitError {
        UnitError {
            coordinates: self.clone(),
            failure: failure.into(),
        }
    }
}

impl fmt::Display for UnitCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(country {}, run {}", self.country, self.run)?;
        if let Some(risk) = self.risk {
            write!(f, ", risk {}", risk)?;
        }
        if let Some(disease) = self.disease {
            write!(f, ", disease {}", disease)?;
        }
        f.write_str(")")
    }
}

/// Underlying cause of a unit failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitFailure {
    /// Exposure synthesis failed.
    #[error(transparent)]
    Sampling(#[from] SamplingError),

    /// PAF integration, mediation or lookup failed.
    #[error(transparent)]
    Paf(#[from] PafError),
}

impl From<LookupError> for UnitFailure {
    fn from(err: LookupError) -> Self {
        UnitFailure::Paf(PafError::Lookup(err))
    }
}

/// Failure of one (country, run) unit.
///
/// # Examples
/// ```
/// use burden_paf::driver::UnitCoordinates;
/// use burden_paf::PafError;
///
/// let err = UnitCoordinates::unit("Kenya", 7)
///     .fail(PafError::DegenerateIntegral { numerator: 1.0, denominator: 0.0 });
/// assert!(err.to_string().starts_with("Unit (country Kenya, run 7) failed"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unit {coordinates} failed: {failure}")]
pub struct UnitError {
    /// Where it failed.
    pub coordinates: UnitCoordinates,
    /// Why it failed.
    #[source]
    pub failure: UnitFailure,
}

/// What the batch does when a unit fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FailurePolicy {
    /// Log the failure and keep the other units.
    Skip,
    /// Return the first failure.
    #[default]
    Abort,
}

/// Which quantity the units compute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Pipeline {
    /// Attributable DALYs under the full tensor.
    Baseline,
    /// Individual DALYs and their change under a scenario intake shift.
    UnilateralShift {
        /// Demand scenario name.
        scenario: String,
        /// Projection year.
        year: u32,
        /// Individual PAF view.
        view: MediationView,
    },
    /// DALY derivatives per risk.
    Marginal {
        /// Upper age limit (exclusive) of the restricted sum.
        age_limit: u32,
    },
}

impl Pipeline {
    /// Marginal pipeline with the default age limit.
    pub fn marginal() -> Self {
        Pipeline::Marginal {
            age_limit: DEFAULT_AGE_LIMIT,
        }
    }

    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Pipeline::Baseline => "baseline",
            Pipeline::UnilateralShift { .. } => "unilateral_shift",
            Pipeline::Marginal { .. } => "marginal",
        }
    }
}

/// Individual DALYs of a risk and their change under a shift.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShiftBurden {
    /// DALYs attributable before the shift.
    pub baseline: f64,
    /// Change in attributable DALYs.
    pub change: f64,
}

impl ShiftBurden {
    /// DALYs after the shift.
    #[inline]
    pub fn shifted(&self) -> f64 {
        self.baseline + self.change
    }
}

/// DALY derivative of a risk.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarginalBurden {
    /// Summed over all age groups.
    pub all_ages: f64,
    /// Summed over age groups below the limit.
    pub below_limit: f64,
}

/// Per-unit quantities, indexed by risk.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum UnitOutcome {
    /// Baseline attribution.
    Baseline {
        /// Attributable DALYs over all diseases, ages and sexes.
        total: f64,
        /// Proportional share of `total` per risk.
        per_risk: Vec<f64>,
    },
    /// Unilateral shift.
    UnilateralShift {
        /// Per risk.
        per_risk: Vec<ShiftBurden>,
    },
    /// Marginal DALYs.
    Marginal {
        /// Per risk.
        per_risk: Vec<MarginalBurden>,
    },
}

impl UnitOutcome {
    /// Headline value per risk: baseline share, shifted DALYs or all-age
    /// derivative.
    pub fn risk_values(&self) -> Vec<f64> {
        match self {
            UnitOutcome::Baseline { per_risk, .. } => per_risk.clone(),
            UnitOutcome::UnilateralShift { per_risk } => {
                per_risk.iter().map(ShiftBurden::shifted).collect()
            }
            UnitOutcome::Marginal { per_risk } => per_risk.iter().map(|m| m.all_ages).collect(),
        }
    }
}

/// Result of one (country, run) unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnitResult {
    /// Country name.
    pub country: String,
    /// Run index.
    pub run: u64,
    /// Computed quantities.
    pub outcome: UnitOutcome,
}

/// Merged results of a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    results: Vec<UnitResult>,
    failures: Vec<UnitError>,
}

impl BatchReport {
    /// Merges unit outcomes, ordered by (country, run).
    pub fn from_units(units: impl IntoIterator<Item = Result<UnitResult, UnitError>>) -> Self {
        let mut report = units
            .into_iter()
            .fold(Self::default(), |mut acc, unit| {
                match unit {
                    Ok(result) => acc.results.push(result),
                    Err(err) => acc.failures.push(err),
                }
                acc
            });
        report
            .results
            .sort_by(|a, b| (a.country.as_str(), a.run).cmp(&(b.country.as_str(), b.run)));
        report.failures.sort_by(|a, b| {
            (a.coordinates.country.as_str(), a.coordinates.run)
                .cmp(&(b.coordinates.country.as_str(), b.coordinates.run))
        });
        report
    }

    /// Successful units.
    pub fn results(&self) -> &[UnitResult] {
        &self.results
    }

    /// Skipped units.
    pub fn failures(&self) -> &[UnitError] {
        &self.failures
    }

    /// Whether every unit succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Mean headline value per (country, risk) over the successful runs.
    pub fn risk_means(&self) -> BTreeMap<(String, RiskId), f64> {
        let mut sums: BTreeMap<(String, RiskId), (f64, usize)> = BTreeMap::new();
        for result in &self.results {
            for (r, value) in result.outcome.risk_values().into_iter().enumerate() {
                let entry = sums.entry((result.country.clone(), RiskId(r))).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }
        sums.into_iter()
            .map(|(key, (sum, n))| (key, sum / n as f64))
            .collect()
    }
}

/// Everything a unit reads.
#[derive(Debug, Clone, Default)]
pub struct PipelineInputs {
    /// Exposure cells per (country, run).
    pub exposures: ExposureTable,
    /// Ensemble weights per risk.
    pub weights: WeightTable,
    /// TMREL, risk factors and dose-response metadata.
    pub dose_response: DoseResponseTables,
    /// YLD and YLL totals.
    pub burden: BurdenTable,
    /// Intake shifts for the unilateral-shift pipeline.
    pub shifts: ShiftTable,
}

/// How a per-risk PAF is evaluated.
#[derive(Debug, Clone, Copy)]
enum PafKind {
    Level,
    Derivative,
    Shifted(f64),
}

/// Morbidity and mortality PAF vectors of one (disease, age, sex), indexed by risk.
struct OutcomeVectors {
    morbidity: Vec<f64>,
    mortality: Vec<f64>,
}

impl OutcomeVectors {
    fn from_pairs(pairs: &[OutcomePair]) -> Self {
        Self {
            morbidity: pairs.iter().map(|p| p.morbidity).collect(),
            mortality: pairs.iter().map(|p| p.mortality).collect(),
        }
    }
}

/// Read-only state of one running unit.
struct UnitContext<'a> {
    inputs: &'a PipelineInputs,
    coordinates: UnitCoordinates,
    histograms: HashMap<CellKey, DensityHistogram>,
}

impl UnitContext<'_> {
    fn histogram(&self, key: CellKey) -> Result<&DensityHistogram, LookupError> {
        self.histograms
            .get(&key)
            .ok_or_else(|| LookupError::missing("exposure distributions", key))
    }
}

/// Runs pipelines over (country, run) units in parallel.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    registry: Registry,
    engine: DistributionEngine,
    integrator: PafIntegrator,
    aggregator: MediationAggregator,
    policy: FailurePolicy,
}

impl BatchDriver {
    /// Creates a driver.
    pub fn new(
        registry: Registry,
        engine: DistributionEngine,
        integrator: PafIntegrator,
        aggregator: MediationAggregator,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            registry,
            engine,
            integrator,
            aggregator,
            policy,
        }
    }

    /// Registry the tables are keyed against.
    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Failure policy.
    #[inline]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Runs every (country, run) unit of `countries × runs`.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Abort`], the first failing unit in
    /// (country, run) order. Under [`FailurePolicy::Skip`] failures are kept
    /// in the report and this never fails.
    pub fn run_batch(
        &self,
        inputs: &PipelineInputs,
        pipeline: &Pipeline,
        countries: &[String],
        runs: Range<u64>,
    ) -> Result<BatchReport, UnitError> {
        let units: Vec<(&str, u64)> = countries
            .iter()
            .flat_map(|c| runs.clone().map(move |run| (c.as_str(), run)))
            .collect();
        info!(
            pipeline = pipeline.name(),
            units = units.len(),
            "Batch started"
        );

        let outcomes: Vec<Result<UnitResult, UnitError>> = units
            .par_iter()
            .map(|&(country, run)| self.run_unit(inputs, pipeline, country, run))
            .collect();

        let report = BatchReport::from_units(outcomes);
        for failure in report.failures() {
            error!(%failure, "Unit failed");
        }
        if self.policy == FailurePolicy::Abort {
            if let Some(first) = report.failures.first() {
                return Err(first.clone());
            }
        }
        info!(
            succeeded = report.results().len(),
            failed = report.failures().len(),
            "Batch finished"
        );
        Ok(report)
    }

    /// Runs one (country, run) unit.
    pub fn run_unit(
        &self,
        inputs: &PipelineInputs,
        pipeline: &Pipeline,
        country: &str,
        run: u64,
    ) -> Result<UnitResult, UnitError> {
        let coordinates = UnitCoordinates::unit(country, run);
        info!(country, run, pipeline = pipeline.name(), "Unit started");

        let cells = inputs
            .exposures
            .cells(country, run)
            .map_err(|e| coordinates.fail(e))?;
        let set = self
            .engine
            .synthesize_all(cells, &inputs.weights, run)
            .map_err(|e| coordinates.fail(e))?;
        let histograms = set
            .iter()
            .map(|d| Ok((d.key(), self.integrator.histogram(d.samples())?)))
            .collect::<Result<HashMap<_, _>, PafError>>()
            .map_err(|e| coordinates.fail(e))?;

        let ctx = UnitContext {
            inputs,
            coordinates,
            histograms,
        };
        let outcome = match pipeline {
            Pipeline::Baseline => self.baseline(&ctx)?,
            Pipeline::UnilateralShift {
                scenario,
                year,
                view,
            } => self.unilateral_shift(&ctx, scenario, *year, *view)?,
            Pipeline::Marginal { age_limit } => self.marginal(&ctx, *age_limit)?,
        };

        info!(country, run, "Unit finished");
        Ok(UnitResult {
            country: country.to_string(),
            run,
            outcome,
        })
    }

    /// PAF pair of one risk; zero when the risk does not affect the disease.
    fn outcome_paf(
        &self,
        ctx: &UnitContext<'_>,
        risk: RiskId,
        disease: DiseaseId,
        age: AgeId,
        sex: SexId,
        kind: PafKind,
    ) -> Result<OutcomePair, UnitError> {
        let coords = ctx.coordinates.at(risk, disease);
        let tables = &ctx.inputs.dose_response;
        let Some(linked) = tables.metadata.linked_outcome(risk, disease) else {
            return Ok(OutcomePair::default());
        };
        let hist = ctx
            .histogram(CellKey::new(risk, age, sex))
            .map_err(|e| coords.fail(e))?;

        let evaluate = |outcome: Outcome| -> Result<f64, PafError> {
            let rr = tables.relative_risk(risk, disease, age, outcome, ctx.coordinates.run)?;
            match kind {
                PafKind::Level => self.integrator.paf_from_histogram(hist, &rr),
                PafKind::Derivative => self.integrator.paf_derivative_from_histogram(hist, &rr),
                PafKind::Shifted(h) => self.integrator.paf_shifted_from_histogram(hist, &rr, h),
            }
        };

        let pair = match linked {
            Outcome::Both => evaluate(Outcome::Both).map(OutcomePair::shared),
            Outcome::Morbidity | Outcome::Mortality => {
                evaluate(Outcome::Morbidity).and_then(|morb| {
                    evaluate(Outcome::Mortality).map(|mort| OutcomePair::new(morb, mort))
                })
            }
        };
        pair.map_err(|e| coords.fail(e))
    }

    /// Level PAFs of every risk for one (disease, age, sex).
    fn level_pafs(
        &self,
        ctx: &UnitContext<'_>,
        disease: DiseaseId,
        age: AgeId,
        sex: SexId,
    ) -> Result<OutcomeVectors, UnitError> {
        let pairs = self
            .registry
            .risk_ids()
            .map(|risk| self.outcome_paf(ctx, risk, disease, age, sex, PafKind::Level))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OutcomeVectors::from_pairs(&pairs))
    }

    fn is_linked(&self, ctx: &UnitContext<'_>, risk: RiskId, disease: DiseaseId) -> bool {
        ctx.inputs
            .dose_response
            .metadata
            .linked_outcome(risk, disease)
            .is_some()
    }

    fn joint_pair(
        tensor: &MediationTensor,
        pafs: &OutcomeVectors,
        disease: DiseaseId,
    ) -> Result<OutcomePair, PafError> {
        Ok(OutcomePair::new(
            tensor.joint_paf(&pafs.morbidity, disease)?,
            tensor.joint_paf(&pafs.mortality, disease)?,
        ))
    }

    fn baseline(&self, ctx: &UnitContext<'_>) -> Result<UnitOutcome, UnitError> {
        let risks = self.registry.dimensions().risks;
        let views: Vec<MediationTensor> = self
            .registry
            .risk_ids()
            .map(|r| self.aggregator.tensor().joint_view(r))
            .collect::<Result<_, _>>()
            .map_err(|e| ctx.coordinates.fail(e))?;
        let mut total = 0.0;
        let mut per_risk = vec![0.0; risks];

        for disease in self.registry.disease_ids() {
            let fail = |e: PafError| {
                UnitCoordinates {
                    disease: Some(disease),
                    ..ctx.coordinates.clone()
                }
                .fail(e)
            };
            for age in self.registry.age_ids() {
                for sex in self.registry.sex_ids() {
                    let pafs = self.level_pafs(ctx, disease, age, sex)?;
                    let totals = ctx
                        .inputs
                        .burden
                        .get(&ctx.coordinates.country, age, sex, disease)
                        .map_err(|e| fail(e.into()))?;
                    let joint = Self::joint_pair(self.aggregator.tensor(), &pafs, disease).map_err(fail)?;
                    total += attributable_dalys(joint, totals).map_err(fail)?;

                    let individual = views
                        .iter()
                        .map(|view| Self::joint_pair(view, &pafs, disease))
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(fail)?;
                    let individual = OutcomeVectors::from_pairs(&individual);
                    let morb = proportional_split(&individual.morbidity, joint.morbidity);
                    let mort = proportional_split(&individual.mortality, joint.mortality);
                    for (r, share) in per_risk.iter_mut().enumerate() {
                        *share += attributable_dalys(OutcomePair::new(morb[r], mort[r]), totals)
                            .map_err(|e| ctx.coordinates.at(RiskId(r), disease).fail(e))?;
                    }
                }
            }
        }
        Ok(UnitOutcome::Baseline { total, per_risk })
    }

    fn unilateral_shift(
        &self,
        ctx: &UnitContext<'_>,
        scenario: &str,
        year: u32,
        view: MediationView,
    ) -> Result<UnitOutcome, UnitError> {
        let views: Vec<MediationTensor> = self
            .registry
            .risk_ids()
            .map(|r| self.aggregator.tensor().view(view, r))
            .collect::<Result<_, _>>()
            .map_err(|e| ctx.coordinates.fail(e))?;
        let mut per_risk = vec![ShiftBurden::default(); views.len()];
        let country = ctx.coordinates.country.as_str();
        let run = ctx.coordinates.run;

        for disease in self.registry.disease_ids() {
            for age in self.registry.age_ids() {
                for sex in self.registry.sex_ids() {
                    let pafs = self.level_pafs(ctx, disease, age, sex)?;
                    let totals = ctx
                        .inputs
                        .burden
                        .get(country, age, sex, disease)
                        .map_err(|e| ctx.coordinates.fail(e))?;

                    for risk in self.registry.risk_ids() {
                        if !self.is_linked(ctx, risk, disease) {
                            continue;
                        }
                        let coords = ctx.coordinates.at(risk, disease);
                        let key = ShiftKey {
                            scenario: scenario.to_string(),
                            year,
                            country: country.to_string(),
                            age,
                            sex,
                            risk,
                        };
                        let h = ctx.inputs.shifts.get(&key, run).map_err(|e| coords.fail(e))?;
                        let shifted =
                            self.outcome_paf(ctx, risk, disease, age, sex, PafKind::Shifted(h))?;

                        let tensor = &views[risk.0];
                        let step = || -> Result<(f64, f64), PafError> {
                            let individual = Self::joint_pair(tensor, &pafs, disease)?;
                            let change = OutcomePair::new(
                                tensor.change(&pafs.morbidity, risk, shifted.morbidity, disease)?,
                                tensor.change(&pafs.mortality, risk, shifted.mortality, disease)?,
                            );
                            Ok((
                                attributable_dalys(individual, totals)?,
                                attributable_dalys(change, totals)?,
                            ))
                        };
                        let (baseline, change) = step().map_err(|e| coords.fail(e))?;
                        per_risk[risk.0].baseline += baseline;
                        per_risk[risk.0].change += change;
                    }
                }
            }
        }
        Ok(UnitOutcome::UnilateralShift { per_risk })
    }

    fn marginal(&self, ctx: &UnitContext<'_>, age_limit: u32) -> Result<UnitOutcome, UnitError> {
        let young: BTreeSet<AgeId> = self.registry.ages_below(age_limit).into_iter().collect();
        let risks = self.registry.dimensions().risks;
        let mut per_risk = vec![MarginalBurden::default(); risks];

        for disease in self.registry.disease_ids() {
            for age in self.registry.age_ids() {
                for sex in self.registry.sex_ids() {
                    let pafs = self.level_pafs(ctx, disease, age, sex)?;
                    let derivative_pairs = self
                        .registry
                        .risk_ids()
                        .map(|risk| self.outcome_paf(ctx, risk, disease, age, sex, PafKind::Derivative))
                        .collect::<Result<Vec<_>, _>>()?;
                    let derivatives = OutcomeVectors::from_pairs(&derivative_pairs);
                    let totals = ctx
                        .inputs
                        .burden
                        .get(&ctx.coordinates.country, age, sex, disease)
                        .map_err(|e| ctx.coordinates.fail(e))?;

                    for risk in self.registry.risk_ids() {
                        if !self.is_linked(ctx, risk, disease) {
                            continue;
                        }
                        let step = || -> Result<f64, PafError> {
                            let joint = OutcomePair::new(
                                self.aggregator.joint_derivative(
                                    &pafs.morbidity,
                                    &derivatives.morbidity,
                                    risk,
                                    disease,
                                )?,
                                self.aggregator.joint_derivative(
                                    &pafs.mortality,
                                    &derivatives.mortality,
                                    risk,
                                    disease,
                                )?,
                            );
                            attributable_dalys(joint, totals)
                        };
                        let dalys = step().map_err(|e| ctx.coordinates.at(risk, disease).fail(e))?;
                        per_risk[risk.0].all_ages += dalys;
                        if young.contains(&age) {
                            per_risk[risk.0].below_limit += dalys;
                        }
                    }
                }
            }
        }
        Ok(UnitOutcome::Marginal { per_risk })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_display() {
        let c = UnitCoordinates::unit("Peru", 2).at(RiskId(3), DiseaseId(4));
        assert_eq!(c.to_string(), "(country Peru, run 2, risk 3, disease 4)");
    }

    #[test]
    fn test_report_orders_units() {
        let unit = |country: &str, run| UnitResult {
            country: country.to_string(),
            run,
            outcome: UnitOutcome::Baseline {
                total: run as f64,
                per_risk: vec![run as f64],
            },
        };
        let report = BatchReport::from_units(vec![
            Ok(unit("Peru", 1)),
            Err(UnitCoordinates::unit("Chad", 0).fail(LookupError::missing("tmrel", 0))),
            Ok(unit("Kenya", 3)),
            Ok(unit("Peru", 0)),
        ]);
        let order: Vec<(&str, u64)> = report
            .results()
            .iter()
            .map(|r| (r.country.as_str(), r.run))
            .collect();
        assert_eq!(order, vec![("Kenya", 3), ("Peru", 0), ("Peru", 1)]);
        assert!(!report.is_complete());
        assert_eq!(report.risk_means()[&("Peru".to_string(), RiskId(0))], 0.5);
    }

    #[test]
    fn test_shift_burden_total() {
        let s = ShiftBurden {
            baseline: 10.0,
            change: -2.5,
        };
        assert_eq!(s.shifted(), 7.5);
        let outcome = UnitOutcome::UnilateralShift { per_risk: vec![s] };
        assert_eq!(outcome.risk_values(), vec![7.5]);
    }

    #[test]
    fn test_default_policy_aborts() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Abort);
        assert_eq!(Pipeline::marginal(), Pipeline::Marginal { age_limit: 70 });
    }
}
