//! Burden CLI - Command Line Operations for Dietary Burden Attribution
//!
//! This is the operational entry point for the diet-burden libraries.
//!
//! # Commands
//!
//! - `burden run --input <file> --pipeline baseline` - Attribute DALYs per (country, run)
//! - `burden fit --input <file>` - Calibrate ensemble parameters of exposure cells
//! - `burden check` - Validate configuration and inputs
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the sampling engine,
//! the PAF integrator and the mediation aggregator into a batch driver and
//! handles configuration, input bundles and output.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod input;

pub use error::{CliError, Result};

use commands::run::PipelineArgs;
use config::{RunConfig, DEFAULT_CONFIG_PATH};

/// Dietary burden attribution CLI
#[derive(Parser)]
#[command(name = "burden")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a pipeline over every configured (country, run) unit
    Run {
        /// Path to the JSON input bundle
        #[arg(short, long)]
        input: String,

        /// Pipeline (baseline, shift, marginal)
        #[arg(short, long, default_value = "baseline")]
        pipeline: String,

        /// Scenario of the intake shift table (shift pipeline)
        #[arg(short, long)]
        scenario: Option<String>,

        /// Year of the intake shift table (shift pipeline)
        #[arg(short, long)]
        year: Option<u32>,

        /// Mediation view of the individual PAFs (joint, non-joint)
        #[arg(long, default_value = "joint")]
        view: String,

        /// Upper age limit of the restricted marginal sum
        #[arg(long)]
        age_limit: Option<u32>,

        /// Project exposure means to this demand-scenario year first
        #[arg(long)]
        project_year: Option<u32>,

        /// Output file (stdout when absent)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Calibrate ensemble parameters of every exposure cell
    Fit {
        /// Path to the JSON input bundle
        #[arg(short, long)]
        input: String,

        /// Points per cell at which to tabulate the mixture density
        #[arg(short, long, default_value = "0")]
        density_points: usize,

        /// Output file (stdout when absent)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check configuration and, optionally, an input bundle
    Check {
        /// Path to the JSON input bundle
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RunConfig::resolve(&cli.config)?;

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run {
            input,
            pipeline,
            scenario,
            year,
            view,
            age_limit,
            project_year,
            output,
        } => {
            let args = PipelineArgs {
                pipeline,
                scenario,
                year,
                view,
                age_limit,
            };
            commands::run::run(&config, &input, output.as_deref(), &args, project_year)
        }
        Commands::Fit {
            input,
            density_points,
            output,
        } => commands::fit::run(&input, output.as_deref(), density_points),
        Commands::Check { input } => commands::check::run(&config, input.as_deref()),
    }
}
