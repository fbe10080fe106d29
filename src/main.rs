//! Ising Monte Carlo command-line interface
//!
//! Reads a YAML description of lattice sizes and temperatures, runs every
//! combination as an independent Metropolis run and logs the final state.

use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use ising_mc::ising::{energy, run_ensemble};
use tracing::{debug, info};

mod config;
mod io;

use config::{Args, Config};
use io::{report_outcome, setup_output};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_output(args.output.as_ref());

    info!("Reading configuration from: {}", args.config_file);
    let config = Config::from_file(&args.config_file)?
        .with_defaults()
        .with_overrides(&args);
    config.validate()?;
    info!("Configuration loaded:\n{:?}", config);

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .wrap_err("Failed to configure worker threads")?;
    }

    let specs = config.to_run_specs();
    let start = Instant::now();
    let outcomes = run_ensemble(&specs)?;

    for outcome in &outcomes {
        debug!(
            "L={} T={:.4}: final E/N from lattice = {:+.4}",
            outcome.spec.size,
            outcome.spec.temperature,
            energy::energy_per_site(&outcome.lattice)
        );
        report_outcome(outcome);
    }
    info!(
        "Finished {} runs in {:.2?}",
        outcomes.len(),
        start.elapsed()
    );

    Ok(())
}
