// Definitions that are used throughout all modules

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Integer offset of a unit cell (one component per lattice axis).
pub type Offset = DVector<i64>;

/// Real coordinate vector (fractional inside a unit cell, Cartesian after embedding).
pub type Coordinate = DVector<f64>;

/// Integer spanning matrix of a supercell; column `m` is the m-th spanning vector.
pub type Span = DMatrix<i64>;

/// Real matrix whose columns are the basis vectors of a lattice.
pub type BasisMatrix = DMatrix<f64>;

/// Treatment of bonds that cross the supercell boundary along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Boundary {
    /// Crossing bonds are dropped.
    Open,
    /// Crossing bonds wrap around.
    #[default]
    Periodic,
}

impl Boundary {
    /// The same boundary mode for each of `dim` axes.
    pub fn uniform(self, dim: usize) -> Vec<Boundary> {
        vec![self; dim]
    }

    pub fn is_open(self) -> bool {
        self == Boundary::Open
    }
}
