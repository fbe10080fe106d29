use serde::{Deserialize, Serialize};

use super::sampler::RunState;

/// Running totals at the end of one Monte Carlo cycle
///
/// These are the raw sums a caller needs for ⟨E⟩, ⟨M⟩, ⟨E²⟩, ⟨M²⟩ and ⟨|M|⟩;
/// no averaging or per-spin normalization happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservableRecord {
    pub energy: i64,
    pub magnetization: i64,
    pub energy_squared: i64,
    pub magnetization_squared: i64,
    pub abs_magnetization: i64,
    /// Accepted flips since the run state was last reset
    pub accepted: u64,
}

impl ObservableRecord {
    /// Snapshot of a run state. Squares cannot overflow because the lattice
    /// size is capped at construction.
    pub fn from_state(state: &RunState) -> Self {
        let energy = state.energy();
        let magnetization = state.magnetization();
        Self {
            energy,
            magnetization,
            energy_squared: energy * energy,
            magnetization_squared: magnetization * magnetization,
            abs_magnetization: magnetization.abs(),
            accepted: state.accepted(),
        }
    }
}

/// Append-only per-cycle recorder
#[derive(Debug, Clone, Default)]
pub struct ObservableAccumulator {
    records: Vec<ObservableRecord>,
}

impl ObservableAccumulator {
    pub fn with_capacity(num_cycles: usize) -> Self {
        Self {
            records: Vec::with_capacity(num_cycles),
        }
    }

    pub fn record(&mut self, state: &RunState) {
        self.records.push(ObservableRecord::from_state(state));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ObservableRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ObservableRecord> {
        self.records
    }
}
