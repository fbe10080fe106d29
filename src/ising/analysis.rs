//! Closed-form reference values for checking sampler output
//!
//! All quantities are per spin, in units where J = k_B = 1.

/// Critical temperature of the infinite 2D lattice (Onsager)
/// T_c = 2 / ln(1 + √2) ≈ 2.269
pub fn critical_temperature() -> f64 {
    2.0 / (1.0 + 2.0_f64.sqrt()).ln()
}

/// Ground-state energy per site (all spins aligned): four bonds shared by two sites
pub fn energy_per_site_at_zero_temp() -> f64 {
    -2.0
}

/// Exact thermal averages for the periodic 2×2 lattice.
///
/// The 16 microstates collapse to energies ±8 (two states each) and 0
/// (twelve states), so the partition function is Z = 4(3 + cosh 8β).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoByTwo {
    pub mean_energy: f64,
    pub mean_abs_magnetization: f64,
    pub specific_heat: f64,
    pub susceptibility: f64,
}

impl TwoByTwo {
    pub fn at(temperature: f64) -> Self {
        let beta = 1.0 / temperature;
        let c = (8.0 * beta).cosh();
        let s = (8.0 * beta).sinh();
        let denom = 3.0 + c;
        let spins = 4.0;

        let mean_energy = -8.0 * s / denom;
        let mean_energy_sq = 64.0 * c / denom;
        let mean_abs_mag = (2.0 * (8.0 * beta).exp() + 4.0) / denom;
        // ⟨M⟩ = 0 by symmetry
        let mean_mag_sq = 8.0 * ((8.0 * beta).exp() + 1.0) / denom;

        Self {
            mean_energy: mean_energy / spins,
            mean_abs_magnetization: mean_abs_mag / spins,
            specific_heat: (mean_energy_sq - mean_energy * mean_energy)
                / (temperature * temperature)
                / spins,
            susceptibility: mean_mag_sq / temperature / spins,
        }
    }
}
