use log::debug;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::config::SINGULAR_TOLERANCE;
use crate::error::LatticeError;
use crate::interfaces::{BasisMatrix, Coordinate};

/// Spanning vectors (columns) embedding one lattice translation unit in real space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BasisData")]
pub struct Basis {
    name: String,
    basis_vectors: BasisMatrix,
}

#[derive(Deserialize)]
struct BasisData {
    name: String,
    basis_vectors: BasisMatrix,
}

impl TryFrom<BasisData> for Basis {
    type Error = LatticeError;

    fn try_from(data: BasisData) -> Result<Self, Self::Error> {
        Basis::new(data.name, data.basis_vectors)
    }
}

impl Basis {
    pub fn new(name: impl Into<String>, basis_vectors: BasisMatrix) -> Result<Self, LatticeError> {
        // Run tests on the matrix to decide whether a basis can be constructed
        if !basis_vectors.is_square() {
            return Err(LatticeError::NonSquareMatrix {
                rows: basis_vectors.nrows(),
                cols: basis_vectors.ncols(),
            });
        }

        // Linearly non-dependent (also catches zero vectors). |det| never exceeds the
        // product of the column norms, so the ratio is independent of the length scale.
        let determinant = determinant(&basis_vectors);
        let scale: f64 = basis_vectors.column_iter().map(|v| v.norm()).product();
        if determinant.abs() <= SINGULAR_TOLERANCE * scale {
            return Err(LatticeError::SingularMatrix { determinant });
        }

        let name = name.into();
        debug!(
            "basis '{}': dimension {}, volume {}",
            name,
            basis_vectors.nrows(),
            determinant.abs()
        );
        Ok(Basis {
            name,
            basis_vectors,
        })
    }

    /// Cartesian unit vectors in `dim` dimensions.
    pub fn simple(dim: usize) -> Self {
        Basis {
            name: "simple hypercubic".to_string(),
            basis_vectors: DMatrix::identity(dim, dim),
        }
    }

    /// Builds a basis from a row-major slice of `dim * dim` entries.
    pub fn from_row_slice(
        name: impl Into<String>,
        dim: usize,
        entries: &[f64],
    ) -> Result<Self, LatticeError> {
        if entries.len() != dim * dim {
            return Err(LatticeError::DimensionMismatch {
                expected: dim * dim,
                found: entries.len(),
            });
        }
        Self::new(name, DMatrix::from_row_slice(dim, dim, entries))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> usize {
        self.basis_vectors.nrows()
    }

    pub fn basis_vectors(&self) -> &BasisMatrix {
        &self.basis_vectors
    }

    /// Volume of one translation unit, `|det(B)|`.
    pub fn volume(&self) -> f64 {
        determinant(&self.basis_vectors).abs()
    }

    /// Maps a point given in lattice (fractional) units to Cartesian coordinates.
    ///
    /// # Panics
    /// Panics if `fractional` does not have `self.dimension()` components.
    pub fn to_cartesian(&self, fractional: &Coordinate) -> Coordinate {
        assert_eq!(
            fractional.len(),
            self.dimension(),
            "coordinate dimension must match the basis"
        );
        &self.basis_vectors * fractional
    }
}

/// Determinant with the empty matrix treated as the identity.
pub(crate) fn determinant(matrix: &DMatrix<f64>) -> f64 {
    if matrix.nrows() == 0 {
        1.0
    } else {
        matrix.determinant()
    }
}
