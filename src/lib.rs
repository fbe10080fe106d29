//! Metropolis Monte Carlo sampling of the 2D Ising model
//!
//! The [`ising`] module holds the sampling engine: periodic lattice, initial
//! energy, Boltzmann acceptance table, sweep loop and per-cycle records.

pub mod error;
pub mod ising;

pub use error::{IsingError, Result};
pub use ising::{
    build_lattice, run, InitialState, Lattice, MetropolisSampler, ObservableRecord, RunSpec,
};
