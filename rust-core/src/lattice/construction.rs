use nalgebra::DMatrix;

use crate::error::LatticeError;
use crate::interfaces::{Coordinate, Offset, Span};

/// Standard construction utilities for shapes and vectors

/// Diagonal spanning matrix with `lengths[m]` unit cells along axis `m`
pub fn extent(lengths: &[usize]) -> Span {
    let dim = lengths.len();
    DMatrix::from_fn(dim, dim, |i, j| if i == j { lengths[i] as i64 } else { 0 })
}

/// Spanning matrix from its rows; `rows[m][n]` is component `m` of spanning vector `n`
pub fn span_from_rows(rows: &[&[i64]]) -> Result<Span, LatticeError> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, |row| row.len());
    if let Some(row) = rows.iter().find(|row| row.len() != ncols) {
        return Err(LatticeError::DimensionMismatch {
            expected: ncols,
            found: row.len(),
        });
    }
    Ok(DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

/// Unit-cell offset from its components
pub fn offset(components: &[i64]) -> Offset {
    Offset::from_vec(components.to_vec())
}

/// Coordinate vector from its components
pub fn coordinate(components: &[f64]) -> Coordinate {
    Coordinate::from_vec(components.to_vec())
}
