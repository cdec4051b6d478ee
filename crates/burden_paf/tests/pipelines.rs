//! End-to-end tests of the batch driver on a small registry.

use approx::assert_relative_eq;
use burden_core::types::{AgeId, DiseaseId, Registry, RiskId, SexId};
use burden_models::distributions::{EnsembleWeights, Family};
use burden_models::exposure::{CellKey, ExposureCell, RelativeBounds};
use burden_paf::driver::{UnitFailure, UnitOutcome};
use burden_paf::mediation::{MediationAggregator, MediationConfig, MediationTensor, MediationView};
use burden_paf::relative_risk::Direction;
use burden_paf::tables::{
    BurdenKey, BurdenTotals, DoseResponse, Outcome, RiskFactorKey, ShiftKey,
};
use burden_paf::{BatchDriver, FailurePolicy, PafError, PafIntegrator, Pipeline, PipelineInputs};
use burden_sampling::{DistributionEngine, SamplingConfig};

const SODIUM: RiskId = RiskId(0);
const FRUITS: RiskId = RiskId(1);
const IHD: DiseaseId = DiseaseId(0);
const STOMACH: DiseaseId = DiseaseId(1);
const COUNTRIES: [&str; 2] = ["Kenya", "Peru"];

fn registry(ages: [&str; 2]) -> Registry {
    Registry::new(
        ["Diet high in sodium", "Diet low in fruits"],
        ["Ischemic heart disease", "Stomach cancer"],
        ages,
        ["Female"],
    )
}

fn inputs(registry: &Registry, runs: u64) -> PipelineInputs {
    let mut inputs = PipelineInputs::default();
    for risk in registry.risk_ids() {
        inputs.weights.insert(risk, EnsembleWeights::single(Family::Normal));
    }

    for country in COUNTRIES {
        for run in 0..runs {
            let mut cells = Vec::new();
            for risk in registry.risk_ids() {
                for age in registry.age_ids() {
                    let mean = 90.0 + 10.0 * risk.0 as f64 + 5.0 * age.0 as f64;
                    let key = CellKey::new(risk, age, SexId(0));
                    cells.push(ExposureCell::new(key, mean, 12.0, RelativeBounds::new(0.3, 3.0)).unwrap());
                }
            }
            inputs.exposures.insert(country, run, cells);

            for age in registry.age_ids() {
                for disease in registry.disease_ids() {
                    let key = BurdenKey {
                        country: country.to_string(),
                        age,
                        sex: SexId(0),
                        disease,
                    };
                    inputs.burden.insert(key, BurdenTotals { yld: 100.0, yll: 200.0 });
                }
            }
        }
    }

    let tables = &mut inputs.dose_response;
    for run in 0..runs {
        tables.tmrel.insert(SODIUM, run, 80.0);
        tables.tmrel.insert(FRUITS, run, 120.0);
        for age in registry.age_ids() {
            for (risk, disease, rf) in [(SODIUM, IHD, 1.2), (SODIUM, STOMACH, 1.15), (FRUITS, IHD, 1.1)] {
                let key = RiskFactorKey { risk, disease, age, run };
                tables.risk_factors.insert_morbidity(key, rf);
                tables.risk_factors.insert_mortality(key, rf + 0.05);
            }
        }
    }
    let high = DoseResponse { unit: 10.0, direction: Direction::High };
    let low = DoseResponse { unit: 20.0, direction: Direction::Low };
    tables.metadata.insert(SODIUM, IHD, Outcome::Both, high);
    tables.metadata.insert(SODIUM, STOMACH, Outcome::Morbidity, high);
    tables.metadata.insert(SODIUM, STOMACH, Outcome::Mortality, high);
    tables.metadata.insert(FRUITS, IHD, Outcome::Both, low);
    inputs
}

fn driver(registry: Registry, policy: FailurePolicy) -> BatchDriver {
    let aggregator = MediationAggregator::new(
        MediationTensor::zeros(registry.dimensions().risks, registry.dimensions().diseases),
        Vec::new(),
    );
    BatchDriver::new(
        registry,
        DistributionEngine::new(SamplingConfig::default()),
        PafIntegrator::default(),
        aggregator,
        policy,
    )
}

fn countries() -> Vec<String> {
    COUNTRIES.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_baseline_shares_sum_to_total() {
    let reg = registry(["25 to 29", "75 to 79"]);
    let inputs = inputs(&reg, 2);
    let report = driver(reg, FailurePolicy::Abort)
        .run_batch(&inputs, &Pipeline::Baseline, &countries(), 0..2)
        .unwrap();
    assert_eq!(report.results().len(), 4);
    for result in report.results() {
        let UnitOutcome::Baseline { total, per_risk } = &result.outcome else {
            panic!("wrong outcome kind");
        };
        assert!(*total > 0.0);
        assert_relative_eq!(per_risk.iter().sum::<f64>(), *total, max_relative = 1e-10);
    }
}

#[test]
fn test_unit_is_deterministic() {
    let reg = registry(["25 to 29", "75 to 79"]);
    let inputs = inputs(&reg, 1);
    let d = driver(reg, FailurePolicy::Abort);
    let a = d.run_unit(&inputs, &Pipeline::Baseline, "Kenya", 0).unwrap();
    let b = d.run_unit(&inputs, &Pipeline::Baseline, "Kenya", 0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_missing_burden_aborts_with_coordinates() {
    let reg = registry(["25 to 29", "75 to 79"]);
    let mut inputs = inputs(&reg, 1);
    inputs.burden = Default::default();
    let err = driver(reg, FailurePolicy::Abort)
        .run_batch(&inputs, &Pipeline::Baseline, &countries(), 0..1)
        .unwrap_err();
    assert_eq!(err.coordinates.country, "Kenya");
    assert_eq!(err.coordinates.run, 0);
    assert_eq!(err.coordinates.disease, Some(IHD));
    assert!(matches!(err.failure, UnitFailure::Paf(PafError::Lookup(_))));
}

#[test]
fn test_skip_policy_keeps_healthy_units() {
    let reg = registry(["25 to 29", "75 to 79"]);
    let mut inputs = inputs(&reg, 1);
    // Peru has no exposure cells for run 0
    let kenya = inputs.exposures.cells("Kenya", 0).unwrap().to_vec();
    inputs.exposures = Default::default();
    inputs.exposures.insert("Kenya", 0, kenya);

    let report = driver(reg, FailurePolicy::Skip)
        .run_batch(&inputs, &Pipeline::Baseline, &countries(), 0..1)
        .unwrap();
    assert_eq!(report.results().len(), 1);
    assert_eq!(report.failures().len(), 1);
    assert_eq!(report.failures()[0].coordinates.country, "Peru");
    assert!(!report.is_complete());
}

fn with_shifts(reg: &Registry, inputs: &mut PipelineInputs, h: f64) {
    for country in COUNTRIES {
        for age in reg.age_ids() {
            for risk in reg.risk_ids() {
                let key = ShiftKey {
                    scenario: "SSP2".to_string(),
                    year: 2030,
                    country: country.to_string(),
                    age,
                    sex: SexId(0),
                    risk,
                };
                inputs.shifts.insert(key, 0, h);
            }
        }
    }
}

fn shift_pipeline(view: MediationView) -> Pipeline {
    Pipeline::UnilateralShift {
        scenario: "SSP2".to_string(),
        year: 2030,
        view,
    }
}

#[test]
fn test_zero_shift_gives_zero_change() {
    let reg = registry(["25 to 29", "75 to 79"]);
    let mut inputs = inputs(&reg, 1);
    with_shifts(&reg, &mut inputs, 0.0);
    let result = driver(reg, FailurePolicy::Abort)
        .run_unit(&inputs, &shift_pipeline(MediationView::Joint), "Peru", 0)
        .unwrap();
    let UnitOutcome::UnilateralShift { per_risk } = result.outcome else {
        panic!("wrong outcome kind");
    };
    for burden in per_risk {
        assert_eq!(burden.change, 0.0);
        assert!(burden.baseline > 0.0);
    }
}

#[test]
fn test_shift_towards_tmrel_lowers_burden() {
    let reg = registry(["25 to 29", "75 to 79"]);
    let mut inputs = inputs(&reg, 1);
    with_shifts(&reg, &mut inputs, 0.0);
    // sodium intake down, fruit intake up
    for age in reg.age_ids() {
        for (risk, h) in [(SODIUM, -15.0), (FRUITS, 15.0)] {
            let key = ShiftKey {
                scenario: "SSP2".to_string(),
                year: 2030,
                country: "Kenya".to_string(),
                age,
                sex: SexId(0),
                risk,
            };
            inputs.shifts.insert(key, 0, h);
        }
    }
    let result = driver(reg, FailurePolicy::Abort)
        .run_unit(&inputs, &shift_pipeline(MediationView::NonJoint), "Kenya", 0)
        .unwrap();
    let UnitOutcome::UnilateralShift { per_risk } = result.outcome else {
        panic!("wrong outcome kind");
    };
    for burden in per_risk {
        assert!(burden.change < 0.0);
        assert!(burden.shifted() >= 0.0);
    }
}

#[test]
fn test_missing_shift_is_lookup_failure() {
    let reg = registry(["25 to 29", "75 to 79"]);
    let inputs = inputs(&reg, 1);
    let err = driver(reg, FailurePolicy::Abort)
        .run_unit(&inputs, &shift_pipeline(MediationView::Joint), "Kenya", 0)
        .unwrap_err();
    assert_eq!(err.coordinates.risk, Some(SODIUM));
    assert!(err.to_string().contains("intake shifts"));
}

fn marginal(ages: [&str; 2]) -> Vec<(f64, f64)> {
    let reg = registry(ages);
    let inputs = inputs(&reg, 1);
    let result = driver(reg, FailurePolicy::Abort)
        .run_unit(&inputs, &Pipeline::marginal(), "Kenya", 0)
        .unwrap();
    let UnitOutcome::Marginal { per_risk } = result.outcome else {
        panic!("wrong outcome kind");
    };
    per_risk.iter().map(|m| (m.all_ages, m.below_limit)).collect()
}

#[test]
fn test_marginal_age_restriction() {
    for (all, below) in marginal(["25 to 29", "30 to 34"]) {
        assert!(all.is_finite());
        assert_eq!(all, below);
    }
    for (all, below) in marginal(["70 to 74", "95 plus"]) {
        assert!(all.is_finite());
        assert_eq!(below, 0.0);
    }
}

#[test]
fn test_default_mediation_resolves_against_full_registry() {
    let reg = Registry::gbd_diet();
    let aggregator = MediationAggregator::from_config(&reg, &MediationConfig::default()).unwrap();
    let fiber = reg.risk("Diet low in fiber").unwrap();
    let ihd = reg.disease("Ischemic heart disease").unwrap();
    assert_eq!(aggregator.tensor().row_factor(fiber, ihd).unwrap(), 0.0);
    assert!(aggregator.is_exempt(fiber));
    assert_eq!(AgeId(0), reg.age("25 to 29").unwrap());
}
