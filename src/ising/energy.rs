use itertools::iproduct;

use super::lattice::Lattice;

/// Total energy and magnetization (E₀, M₀) of a lattice in units of J = 1.
///
/// Each bond is counted once by pairing every site only with its left
/// (i-1, j) and upper (i, j-1) neighbor, both wrapped periodically.
pub fn initial_energy_magnetization(lattice: &Lattice) -> (i64, i64) {
    let size = lattice.size();

    let energy: i64 = iproduct!(0..size, 0..size)
        .map(|(i, j)| {
            let spin = i64::from(lattice.spin(i, j));
            let left = i64::from(lattice.spin(lattice.prev(i), j));
            let above = i64::from(lattice.spin(i, lattice.prev(j)));
            -spin * (left + above)
        })
        .sum();

    (energy, lattice.magnetization())
}

/// Energy per site for a lattice, mostly useful in tests and logs
pub fn energy_per_site(lattice: &Lattice) -> f64 {
    let (energy, _) = initial_energy_magnetization(lattice);
    energy as f64 / lattice.num_sites() as f64
}
