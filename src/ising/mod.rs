pub mod analysis;
pub mod boltzmann;
pub mod energy;
pub mod ensemble;
pub mod lattice;
pub mod observables;
pub mod sampler;

pub use boltzmann::{BoltzmannTable, FLIP_DELTAS};
pub use energy::initial_energy_magnetization;
pub use ensemble::{run_ensemble, run_single, RunOutcome, RunSpec};
pub use lattice::{build_lattice, InitialState, Lattice, MAX_LATTICE_SIZE};
pub use observables::{ObservableAccumulator, ObservableRecord};
pub use sampler::{run, MetropolisSampler, RunState, RunStatus};
