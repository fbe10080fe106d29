//! Error types for lattice construction and sampling runs

use thiserror::Error;

/// Configuration errors reported before any sampling starts
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IsingError {
    #[error("lattice size must be > 0")]
    InvalidLatticeSize,

    #[error("lattice size {0} is too large for 64-bit observables")]
    LatticeTooLarge(usize),

    #[error("number of Monte Carlo cycles must be > 0")]
    InvalidCycleCount,

    #[error("temperature must be a finite positive number, got {0}")]
    InvalidTemperature(f64),

    #[error("invalid spin grid: {0}")]
    InvalidSpin(String),

    #[error("accepted-flip counter would overflow after {0} more cycles")]
    CounterOverflow(usize),
}

pub type Result<T> = std::result::Result<T, IsingError>;
