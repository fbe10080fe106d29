use approx::assert_abs_diff_eq;
use ising_mc::ising::analysis::TwoByTwo;
use ising_mc::ising::{run_ensemble, RunSpec};
use ising_mc::{build_lattice, run, InitialState, Lattice, MetropolisSampler, ObservableRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mean_per_spin(
    records: &[ObservableRecord],
    sites: usize,
    field: fn(&ObservableRecord) -> i64,
) -> f64 {
    let total: f64 = records.iter().map(|r| field(r) as f64).sum();
    total / records.len() as f64 / sites as f64
}

#[test]
fn test_two_by_two_converges_to_exact_values() {
    let mut lattice = Lattice::ordered(2).unwrap();
    let mut rng = StdRng::seed_from_u64(2017);
    let records = run(&mut lattice, 1_000_000, 1.0, &mut rng).unwrap();
    assert_eq!(records.len(), 1_000_000);

    let exact = TwoByTwo::at(1.0);
    let mean_energy = mean_per_spin(&records, 4, |r| r.energy);
    let mean_abs_mag = mean_per_spin(&records, 4, |r| r.abs_magnetization);

    assert_abs_diff_eq!(mean_energy, exact.mean_energy, epsilon = 1e-2);
    assert_abs_diff_eq!(mean_abs_mag, exact.mean_abs_magnetization, epsilon = 1e-2);
}

#[test]
fn test_identical_inputs_reproduce_records() {
    let simulate = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut lattice = build_lattice(20, InitialState::Random, &mut rng).unwrap();
        run(&mut lattice, 200, 2.4, &mut rng).unwrap()
    };

    assert_eq!(simulate(42), simulate(42));
    assert_ne!(simulate(42), simulate(43));
}

#[test]
fn test_ordered_start_at_low_temperature_stays_magnetized() {
    let mut lattice = Lattice::ordered(20).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let records = run(&mut lattice, 2_000, 1.0, &mut rng).unwrap();

    let mean_abs_mag = mean_per_spin(&records, 400, |r| r.abs_magnetization);
    assert!(mean_abs_mag > 0.99, "mean |M| per spin = {mean_abs_mag}");
}

#[test]
fn test_high_temperature_disorders_lattice() {
    let mut lattice = Lattice::ordered(20).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let records = run(&mut lattice, 2_000, 10.0, &mut rng).unwrap();

    // Skip the relaxation away from the ordered start
    let mean_abs_mag = mean_per_spin(&records[500..], 400, |r| r.abs_magnetization);
    assert!(mean_abs_mag < 0.2, "mean |M| per spin = {mean_abs_mag}");
}

#[test]
fn test_ensemble_over_temperatures() {
    let temperatures = [1.0, 2.4, 4.0];
    let specs: Vec<RunSpec> = temperatures
        .iter()
        .enumerate()
        .map(|(k, &temperature)| RunSpec {
            size: 10,
            initial_state: InitialState::Ordered,
            temperature,
            num_cycles: 500,
            seed: k as u64,
        })
        .collect();

    let outcomes = run_ensemble(&specs).unwrap();
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| o.records.len() == 500));

    // Acceptance grows with temperature
    let ratios: Vec<f64> = outcomes.iter().map(|o| o.acceptance_ratio()).collect();
    assert!(ratios[0] < ratios[1] && ratios[1] < ratios[2], "{ratios:?}");
}

#[test]
fn test_temperature_chain_keeps_lattice_unless_reset() {
    let mut lattice = Lattice::ordered(8).unwrap();
    let mut rng = StdRng::seed_from_u64(77);
    let mut sampler = MetropolisSampler::new(&mut lattice, 1.5).unwrap();

    let cold = sampler.run(100, &mut rng).unwrap();
    sampler.set_temperature(3.0).unwrap();
    let hot = sampler.run(100, &mut rng).unwrap();
    assert!(hot[0].accepted > cold[99].accepted);

    sampler.reset();
    let restarted = sampler.run(1, &mut rng).unwrap();
    assert!(restarted[0].accepted <= 64);
}
