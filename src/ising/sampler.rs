use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;

use super::boltzmann::BoltzmannTable;
use super::energy::initial_energy_magnetization;
use super::lattice::Lattice;
use super::observables::{ObservableAccumulator, ObservableRecord};
use crate::error::{IsingError, Result};

/// Running totals carried across the sweeps of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    energy: i64,
    magnetization: i64,
    accepted: u64,
}

impl RunState {
    /// Fresh state for a lattice: E₀, M₀ from a full pass, no accepted flips
    pub fn from_lattice(lattice: &Lattice) -> Self {
        let (energy, magnetization) = initial_energy_magnetization(lattice);
        Self {
            energy,
            magnetization,
            accepted: 0,
        }
    }

    pub fn energy(&self) -> i64 {
        self.energy
    }

    pub fn magnetization(&self) -> i64 {
        self.magnetization
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Recompute E and M from the lattice and zero the accepted counter
    pub fn reset(&mut self, lattice: &Lattice) {
        *self = Self::from_lattice(lattice);
    }

    #[inline]
    fn apply_flip(&mut self, delta: i32, new_spin: i8) {
        self.energy += i64::from(delta);
        self.magnetization += 2 * i64::from(new_spin);
        self.accepted += 1;
    }
}

/// How a cancellable run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Cancelled,
}

/// Single-spin-flip Metropolis sampler
///
/// Borrows the lattice mutably for as long as it lives. Temperature changes
/// keep the lattice and the running totals; call [`MetropolisSampler::reset`]
/// to start the counters over.
#[derive(Debug)]
pub struct MetropolisSampler<'a> {
    lattice: &'a mut Lattice,
    table: BoltzmannTable,
    state: RunState,
}

/// Run `num_cycles` Metropolis sweeps at `temperature` on a lattice and
/// return one record per sweep. The running totals start fresh from the
/// lattice as passed in; the lattice is left in its final state.
pub fn run<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    num_cycles: usize,
    temperature: f64,
    rng: &mut R,
) -> Result<Vec<ObservableRecord>> {
    MetropolisSampler::new(lattice, temperature)?.run(num_cycles, rng)
}

impl<'a> MetropolisSampler<'a> {
    pub fn new(lattice: &'a mut Lattice, temperature: f64) -> Result<Self> {
        let table = BoltzmannTable::new(temperature)?;
        let state = RunState::from_lattice(lattice);
        Ok(Self {
            lattice,
            table,
            state,
        })
    }

    pub fn lattice(&self) -> &Lattice {
        &*self.lattice
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn table(&self) -> &BoltzmannTable {
        &self.table
    }

    pub fn temperature(&self) -> f64 {
        self.table.temperature()
    }

    /// Rebuild the acceptance table. Lattice, E, M and the accepted counter
    /// carry over unchanged.
    pub fn set_temperature(&mut self, temperature: f64) -> Result<()> {
        self.table = BoltzmannTable::new(temperature)?;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state.reset(self.lattice);
    }

    /// One Monte Carlo cycle: L² trial flips at uniformly drawn sites
    /// (with replacement).
    pub fn sweep<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let size = self.lattice.size();

        for _ in 0..self.lattice.num_sites() {
            let ix = rng.gen_range(0..size);
            let iy = rng.gen_range(0..size);

            let delta = self.lattice.flip_delta(ix, iy);
            let r: f64 = rng.gen();

            if self.table.accepts(delta, r) {
                let new_spin = self.lattice.flip(ix, iy);
                self.state.apply_flip(delta, new_spin);
            }
        }
    }

    /// Perform `num_cycles` sweeps, recording the running totals after each
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        num_cycles: usize,
        rng: &mut R,
    ) -> Result<Vec<ObservableRecord>> {
        self.check_cycles(num_cycles)?;

        let mut acc = ObservableAccumulator::with_capacity(num_cycles);
        for _ in 0..num_cycles {
            self.sweep(rng);
            acc.record(&self.state);
        }
        Ok(acc.into_records())
    }

    /// Like [`MetropolisSampler::run`], but checks `cancel` before every
    /// cycle. On cancellation the records of the cycles already completed
    /// are returned.
    pub fn run_cancellable<R: Rng + ?Sized>(
        &mut self,
        num_cycles: usize,
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> Result<(Vec<ObservableRecord>, RunStatus)> {
        self.check_cycles(num_cycles)?;

        let mut acc = ObservableAccumulator::with_capacity(num_cycles);
        for _ in 0..num_cycles {
            if cancel.load(Ordering::Relaxed) {
                return Ok((acc.into_records(), RunStatus::Cancelled));
            }
            self.sweep(rng);
            acc.record(&self.state);
        }
        Ok((acc.into_records(), RunStatus::Completed))
    }

    fn check_cycles(&self, num_cycles: usize) -> Result<()> {
        if num_cycles == 0 {
            return Err(IsingError::InvalidCycleCount);
        }

        // Worst case every trial is accepted
        let fits = (num_cycles as u64)
            .checked_mul(self.lattice.num_sites() as u64)
            .and_then(|trials| self.state.accepted.checked_add(trials))
            .is_some();
        if !fits {
            return Err(IsingError::CounterOverflow(num_cycles));
        }
        Ok(())
    }
}
