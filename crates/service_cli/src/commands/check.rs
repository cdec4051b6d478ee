//! Check command implementation
//!
//! Validates the configuration and, when given, resolves an input bundle
//! without running any unit.

use crate::config::RunConfig;
use crate::input::InputBundle;
use crate::Result;
use burden_paf::MediationAggregator;
use tracing::info;

/// Execute the check command
pub fn run(config: &RunConfig, input: Option<&str>) -> Result<()> {
    info!("Checking configuration");
    config.validate()?;

    println!("burden {}", env!("CARGO_PKG_VERSION"));
    println!("  worker threads:   {}", config.worker_threads());
    println!("  runs:             {}", config.runs);
    println!("  sample size:      {}", config.sampling.sample_size());
    println!("  histogram bins:   {}", config.integrator.bins);
    println!("  failure policy:   {:?}", config.failure_policy);

    if let Some(path) = input {
        let bundle = InputBundle::load(path)?;
        let registry = bundle.registry();
        let dims = registry.dimensions();
        let inputs = bundle.pipeline_inputs(&registry, None)?;
        MediationAggregator::from_config(&registry, &config.mediation)?;
        let selected = config.countries.select(&bundle.countries).map_or(0, <[String]>::len);

        println!(
            "  registry:         {} risks, {} diseases, {} ages, {} sexes",
            dims.risks, dims.diseases, dims.ages, dims.sexes
        );
        println!("  countries:        {} of {}", selected, bundle.countries.len());
        println!("  weighted risks:   {}", inputs.weights.len());
        println!("  intake shifts:    {}", inputs.shifts.len());
    }

    println!("Configuration OK");
    Ok(())
}
