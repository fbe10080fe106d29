//! Configuration management for Ising runs
//!
//! A YAML file describes the grid of lattice sizes and temperatures to
//! sample; command-line arguments can override the cycle count, the base
//! seed and the worker thread count.

use std::fs;
use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{ensure, Result, WrapErr};
use ising_mc::{InitialState, RunSpec};
use serde::{Deserialize, Serialize};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "ising_mc")]
#[command(about = "Metropolis Monte Carlo sampler for the 2D Ising model", long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "ising.yaml")]
    pub config_file: String,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Monte Carlo cycles per run (overrides config file)
    #[arg(long)]
    pub cycles: Option<usize>,

    /// Base random seed (overrides config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of worker threads for independent runs
    #[arg(long)]
    pub threads: Option<usize>,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Side lengths L of the lattices to simulate
    pub lattice_sizes: Vec<usize>,

    /// Temperatures in units of J/k_B
    pub temperatures: TemperatureConfig,

    /// Monte Carlo cycles per run
    #[serde(default)]
    pub num_cycles: Option<usize>,

    /// Starting configuration of each lattice
    #[serde(default)]
    pub initial_state: Option<InitialState>,

    /// Base seed; each run derives its own stream from it
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Either an explicit list of temperatures or an evenly spaced range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemperatureConfig {
    List(Vec<f64>),
    Range { start: f64, stop: f64, step: f64 },
}

impl TemperatureConfig {
    /// Number of grid points a range spans, before any bound is applied
    fn range_len(start: f64, stop: f64, step: f64) -> f64 {
        ((stop - start) / step + 1e-9).floor() + 1.0
    }

    /// Expand into the list of temperatures. A range includes `stop` when it
    /// lies on the grid (up to rounding) and is capped at
    /// [`MAX_TEMPERATURES`] points; `Config::validate` rejects longer ones.
    pub fn values(&self) -> Vec<f64> {
        match self {
            TemperatureConfig::List(values) => values.clone(),
            TemperatureConfig::Range { start, stop, step } => {
                let len = Self::range_len(*start, *stop, *step);
                let count = if len.is_finite() && len > 0.0 {
                    (len as usize).min(MAX_TEMPERATURES)
                } else {
                    0
                };
                (0..count).map(|k| start + k as f64 * step).collect()
            }
        }
    }
}

/// Upper bound on the number of temperatures a range may expand to
pub const MAX_TEMPERATURES: usize = 100_000;

const DEFAULT_NUM_CYCLES: usize = 100_000;
const DEFAULT_SEED: u64 = 2025;

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Unable to read configuration file: {}", path.display()))?;
        serde_yml::from_str::<Config>(&content).wrap_err("Failed to parse configuration file")
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply default values to any missing fields
    pub fn with_defaults(mut self) -> Self {
        if self.num_cycles.is_none() {
            self.num_cycles = Some(DEFAULT_NUM_CYCLES);
        }
        if self.initial_state.is_none() {
            self.initial_state = Some(InitialState::Ordered);
        }
        if self.seed.is_none() {
            self.seed = Some(DEFAULT_SEED);
        }
        self
    }

    /// Command-line values win over the file
    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(cycles) = args.cycles {
            self.num_cycles = Some(cycles);
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        self
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.lattice_sizes.is_empty(), "At least one lattice size is required");
        ensure!(
            self.lattice_sizes.iter().all(|&l| l > 0),
            "Lattice sizes must be positive"
        );

        if let TemperatureConfig::Range { start, stop, step } = self.temperatures {
            ensure!(
                start.is_finite() && stop.is_finite() && step.is_finite(),
                "Temperature range bounds must be finite"
            );
            ensure!(step > 0.0, "Temperature step must be positive");
            ensure!(stop >= start, "Temperature range stop must not be below start");
            let len = TemperatureConfig::range_len(start, stop, step);
            ensure!(
                len <= MAX_TEMPERATURES as f64,
                "Temperature range spans {len} values, at most {MAX_TEMPERATURES} are allowed"
            );
        }
        let temperatures = self.temperatures.values();
        ensure!(!temperatures.is_empty(), "At least one temperature is required");
        ensure!(
            temperatures.iter().all(|t| t.is_finite() && *t > 0.0),
            "Temperatures must be positive"
        );

        ensure!(
            self.num_cycles.map_or(true, |n| n > 0),
            "Number of Monte Carlo cycles must be positive"
        );
        Ok(())
    }

    /// Expand the size × temperature grid into independent runs, sizes outermost
    pub fn to_run_specs(&self) -> Vec<RunSpec> {
        let num_cycles = self.num_cycles.unwrap_or(DEFAULT_NUM_CYCLES);
        let initial_state = self.initial_state.unwrap_or(InitialState::Ordered);
        let base_seed = self.seed.unwrap_or(DEFAULT_SEED);
        let temperatures = self.temperatures.values();

        self.lattice_sizes
            .iter()
            .flat_map(|&size| temperatures.iter().map(move |&t| (size, t)))
            .enumerate()
            .map(|(k, (size, temperature))| RunSpec {
                size,
                initial_state,
                temperature,
                num_cycles,
                seed: derive_seed(base_seed, k as u64),
            })
            .collect()
    }
}

/// Decorrelate per-run seeds with a golden-ratio stride
fn derive_seed(base: u64, index: u64) -> u64 {
    base.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
