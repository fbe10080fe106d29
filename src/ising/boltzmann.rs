use crate::error::{IsingError, Result};

/// Energy changes a single spin flip can produce on a square lattice
pub const FLIP_DELTAS: [i32; 5] = [-8, -4, 0, 4, 8];

const OFFSET: i32 = 8;
const SLOTS: usize = 2 * OFFSET as usize + 1;

/// Precomputed Metropolis acceptance weights w(ΔE) = exp(-ΔE / T)
///
/// Indexed by ΔE + 8; only the five reachable deltas are filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct BoltzmannTable {
    temperature: f64,
    weights: [f64; SLOTS],
}

impl BoltzmannTable {
    pub fn new(temperature: f64) -> Result<Self> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(IsingError::InvalidTemperature(temperature));
        }

        let mut weights = [0.0; SLOTS];
        for delta in FLIP_DELTAS {
            weights[(delta + OFFSET) as usize] = (-f64::from(delta) / temperature).exp();
        }

        Ok(Self {
            temperature,
            weights,
        })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Acceptance weight for a flip with energy change `delta`
    #[inline]
    pub fn weight(&self, delta: i32) -> f64 {
        debug_assert!(
            FLIP_DELTAS.contains(&delta),
            "unreachable flip energy change {delta}"
        );
        self.weights[(delta + OFFSET) as usize]
    }

    /// Metropolis test: accept when the uniform draw `r` in [0, 1) is ≤ w(ΔE).
    ///
    /// Since w ≥ 1 for ΔE ≤ 0, energy-lowering moves always pass.
    #[inline]
    pub fn accepts(&self, delta: i32, r: f64) -> bool {
        r <= self.weight(delta)
    }
}
