use std::fmt;

use nalgebra::DMatrix;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{IsingError, Result};

/// Largest supported side length. Keeps E², M² (≤ 4·L⁴) inside an `i64`.
pub const MAX_LATTICE_SIZE: usize = 1 << 15;

/// Initial spin configuration of a fresh lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialState {
    /// All spins +1
    Ordered,
    /// Each spin drawn independently and uniformly from {-1, +1}
    Random,
}

/// Square L×L lattice of Ising spins with periodic boundary conditions
///
/// Spins are stored contiguously in a `DMatrix<i8>`, every cell is either
/// +1 or -1, and the side length never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    size: usize,
    spins: DMatrix<i8>,
}

/// Build a lattice of side `size` in the requested initial state.
///
/// `rng` is only consumed for [`InitialState::Random`].
pub fn build_lattice<R: Rng + ?Sized>(
    size: usize,
    initial: InitialState,
    rng: &mut R,
) -> Result<Lattice> {
    Lattice::new(size, initial, rng)
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(IsingError::InvalidLatticeSize);
    }
    if size > MAX_LATTICE_SIZE {
        return Err(IsingError::LatticeTooLarge(size));
    }
    Ok(())
}

impl Lattice {
    /// Create a new lattice with either all spins up or a random configuration
    pub fn new<R: Rng + ?Sized>(size: usize, initial: InitialState, rng: &mut R) -> Result<Self> {
        check_size(size)?;

        let spins = match initial {
            InitialState::Ordered => DMatrix::from_element(size, size, 1i8),
            InitialState::Random => {
                DMatrix::from_fn(size, size, |_, _| if rng.gen_bool(0.5) { 1 } else { -1 })
            }
        };

        Ok(Self { size, spins })
    }

    /// Create an all-up lattice; never touches a random stream
    pub fn ordered(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            size,
            spins: DMatrix::from_element(size, size, 1i8),
        })
    }

    /// Wrap an explicit spin grid. The grid must be square and hold only ±1.
    pub fn from_spins(spins: DMatrix<i8>) -> Result<Self> {
        if spins.nrows() != spins.ncols() {
            return Err(IsingError::InvalidSpin(format!(
                "grid is {}x{}, expected a square lattice",
                spins.nrows(),
                spins.ncols()
            )));
        }
        let size = spins.nrows();
        check_size(size)?;

        if let Some(bad) = spins.iter().find(|&&s| s != 1 && s != -1) {
            return Err(IsingError::InvalidSpin(format!(
                "spin value {} is not +1 or -1",
                bad
            )));
        }

        Ok(Self { size, spins })
    }

    /// Side length L
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites L²
    #[inline]
    pub fn num_sites(&self) -> usize {
        self.size * self.size
    }

    #[inline]
    pub fn spin(&self, i: usize, j: usize) -> i8 {
        self.spins[(i, j)]
    }

    /// Spin at an arbitrary (possibly out-of-range) coordinate, wrapped onto the torus
    pub fn get_spin(&self, i: isize, j: isize) -> i8 {
        let n = self.size as isize;
        self.spins[(i.rem_euclid(n) as usize, j.rem_euclid(n) as usize)]
    }

    /// Read-only view of the spin grid
    pub fn spins(&self) -> &DMatrix<i8> {
        &self.spins
    }

    #[inline]
    pub(crate) fn prev(&self, i: usize) -> usize {
        if i == 0 {
            self.size - 1
        } else {
            i - 1
        }
    }

    #[inline]
    pub(crate) fn next(&self, i: usize) -> usize {
        if i + 1 == self.size {
            0
        } else {
            i + 1
        }
    }

    /// Sum of the four nearest-neighbor spins of (i, j) with periodic wrapping
    #[inline]
    pub fn neighbor_sum(&self, i: usize, j: usize) -> i32 {
        let left = self.spins[(self.prev(i), j)];
        let right = self.spins[(self.next(i), j)];
        let above = self.spins[(i, self.prev(j))];
        let below = self.spins[(i, self.next(j))];

        i32::from(left) + i32::from(right) + i32::from(above) + i32::from(below)
    }

    /// Energy change ΔE = 2·s·(Σ neighbors) if the spin at (i, j) were flipped
    ///
    /// On a 1×1 torus every neighbor is the site itself, so both bonds keep
    /// s·s = 1 through a flip and ΔE is 0.
    #[inline]
    pub fn flip_delta(&self, i: usize, j: usize) -> i32 {
        if self.size == 1 {
            return 0;
        }
        2 * i32::from(self.spins[(i, j)]) * self.neighbor_sum(i, j)
    }

    /// Flip the spin at (i, j) and return its new value
    #[inline]
    pub fn flip(&mut self, i: usize, j: usize) -> i8 {
        let spin = &mut self.spins[(i, j)];
        *spin = -*spin;
        *spin
    }

    /// Total magnetization Σ s
    pub fn magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| i64::from(s)).sum()
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size {
            for j in 0..self.size {
                write!(f, "{:2}", if self.spins[(i, j)] == 1 { "↑" } else { "↓" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
