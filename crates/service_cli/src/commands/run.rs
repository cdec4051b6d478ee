//! Run command implementation
//!
//! Runs one pipeline over every configured (country, run) unit of an input
//! bundle and writes the merged report as JSON.

use crate::config::RunConfig;
use crate::input::InputBundle;
use crate::{CliError, Result};
use burden_core::types::Registry;
use burden_paf::driver::{UnitResult, DEFAULT_AGE_LIMIT};
use burden_paf::{
    BatchDriver, BatchReport, MediationAggregator, MediationView, PafIntegrator, Pipeline,
};
use burden_sampling::DistributionEngine;
use serde::Serialize;
use tracing::{info, warn};

/// Pipeline selection from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineArgs {
    /// `baseline`, `shift` or `marginal`.
    pub pipeline: String,
    /// Scenario label of the shift table.
    pub scenario: Option<String>,
    /// Year of the shift table.
    pub year: Option<u32>,
    /// `joint` or `non-joint`.
    pub view: String,
    /// Upper age limit of the marginal pipeline's restricted sum.
    pub age_limit: Option<u32>,
}

impl PipelineArgs {
    /// Resolves the arguments into a pipeline.
    pub fn pipeline(&self) -> Result<Pipeline> {
        match self.pipeline.as_str() {
            "baseline" => Ok(Pipeline::Baseline),
            "shift" | "unilateral-shift" => {
                let scenario = self.scenario.clone().ok_or_else(|| {
                    CliError::InvalidArgument("the shift pipeline needs --scenario".to_string())
                })?;
                let year = self.year.ok_or_else(|| {
                    CliError::InvalidArgument("the shift pipeline needs --year".to_string())
                })?;
                Ok(Pipeline::UnilateralShift {
                    scenario,
                    year,
                    view: parse_view(&self.view)?,
                })
            }
            "marginal" => Ok(Pipeline::Marginal {
                age_limit: self.age_limit.unwrap_or(DEFAULT_AGE_LIMIT),
            }),
            other => Err(CliError::unknown_option(
                "pipeline",
                other,
                &["baseline", "shift", "marginal"],
            )),
        }
    }
}

fn parse_view(value: &str) -> Result<MediationView> {
    match value {
        "joint" => Ok(MediationView::Joint),
        "non-joint" | "non_joint" => Ok(MediationView::NonJoint),
        other => Err(CliError::unknown_option("view", other, &["joint", "non-joint"])),
    }
}

/// Mean of a risk's headline value over the successful runs of a country.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiskMean {
    /// Country.
    pub country: String,
    /// Risk name.
    pub risk: String,
    /// Mean value.
    pub mean: f64,
}

/// A skipped unit.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailureRow {
    /// Country.
    pub country: String,
    /// Run index.
    pub run: u64,
    /// Risk name, if the failure is tied to one.
    pub risk: Option<String>,
    /// Disease name, if the failure is tied to one.
    pub disease: Option<String>,
    /// Error message.
    pub message: String,
}

/// JSON document written by the run command.
#[derive(Debug, Serialize)]
pub struct RunOutput<'a> {
    /// Pipeline that produced the results.
    pub pipeline: &'a Pipeline,
    /// Risk names in the order of every per-risk vector.
    pub risks: Vec<String>,
    /// Per-unit results.
    pub results: &'a [UnitResult],
    /// Per-country means over runs.
    pub risk_means: Vec<RiskMean>,
    /// Skipped units.
    pub failures: Vec<FailureRow>,
}

impl<'a> RunOutput<'a> {
    /// Labels a report with registry names.
    pub fn new(pipeline: &'a Pipeline, registry: &Registry, report: &'a BatchReport) -> Self {
        let risk_means = report
            .risk_means()
            .into_iter()
            .map(|((country, risk), mean)| RiskMean {
                country,
                risk: registry.risk_name(risk).to_string(),
                mean,
            })
            .collect();
        let failures = report
            .failures()
            .iter()
            .map(|err| FailureRow {
                country: err.coordinates.country.clone(),
                run: err.coordinates.run,
                risk: err.coordinates.risk.map(|r| registry.risk_name(r).to_string()),
                disease: err.coordinates.disease.map(|d| registry.disease_name(d).to_string()),
                message: err.failure.to_string(),
            })
            .collect();
        Self {
            pipeline,
            risks: registry.risk_ids().map(|r| registry.risk_name(r).to_string()).collect(),
            results: report.results(),
            risk_means,
            failures,
        }
    }
}

/// Builds the driver and runs the batch on a pool of the configured size.
pub fn execute(
    config: &RunConfig,
    bundle: &InputBundle,
    pipeline: &Pipeline,
    projection_year: Option<u32>,
) -> Result<(Registry, BatchReport)> {
    config.validate()?;
    let registry = bundle.registry();
    let inputs = bundle.pipeline_inputs(&registry, projection_year)?;
    let countries = config.countries.select(&bundle.countries).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "country range {}..{:?} selects none of the {} input countries",
            config.countries.start,
            config.countries.stop,
            bundle.countries.len()
        ))
    })?;

    let aggregator = MediationAggregator::from_config(&registry, &config.mediation)?;
    let driver = BatchDriver::new(
        registry,
        DistributionEngine::new(config.sampling.clone()),
        PafIntegrator::new(config.integrator),
        aggregator,
        config.failure_policy,
    );

    let threads = config.worker_threads();
    info!(
        pipeline = pipeline.name(),
        countries = countries.len(),
        runs = config.runs,
        threads,
        "Starting batch"
    );
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let report = pool.install(|| driver.run_batch(&inputs, pipeline, countries, config.run_range()))?;

    if !report.is_complete() {
        warn!(skipped = report.failures().len(), "Some units were skipped");
    }
    Ok((driver.registry().clone(), report))
}

/// Execute the run command
pub fn run(
    config: &RunConfig,
    input: &str,
    output: Option<&str>,
    args: &PipelineArgs,
    projection_year: Option<u32>,
) -> Result<()> {
    let pipeline = args.pipeline()?;
    let bundle = InputBundle::load(input)?;
    let (registry, report) = execute(config, &bundle, &pipeline, projection_year)?;

    let document = RunOutput::new(&pipeline, &registry, &report);
    match output {
        Some(path) => {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(file, &document)?;
            info!(path, units = report.results().len(), "Results written");
        }
        None => println!("{}", serde_json::to_string_pretty(&document)?),
    }
    Ok(())
}
