use log::{debug, error};
use nalgebra::DMatrix;

use crate::config::{DETERMINANT_TOLERANCE, FOLD_TOLERANCE};
use crate::error::LatticeError;
use crate::interfaces::{Offset, Span};
use crate::lattice::basis::determinant;
use crate::lattice::construction::extent;

/// A finite periodic tiling of unit cells spanned by the columns of an integer matrix.
///
/// The integer points `p` with `S⁻¹ p ∈ [0, 1)^d` form the fundamental domain; each of
/// them is a cell of the supercell and carries a canonical index in `0..num_cells`.
/// Indices follow the scan order of a dense linear coordinate ("lcoord") over the
/// axis-aligned bounding box of the domain, first axis fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct Supercell {
    dimension: usize,
    num_cells: usize,
    span: Span,
    /// `S⁻¹`, used for every membership test.
    inverse: DMatrix<f64>,
    nmin: Offset,
    nmax: Offset,
    /// Number of integer points per axis in `[nmin, nmax]`.
    box_extent: Vec<usize>,
    lcoord_to_index: Vec<Option<usize>>,
    index_to_lcoord: Vec<usize>,
}

impl Supercell {
    /// Builds the supercell spanned by the columns of `span`.
    ///
    /// Fails with [`LatticeError::NonSquareMatrix`], [`LatticeError::DimensionTooLarge`] or
    /// [`LatticeError::SingularMatrix`] for invalid input. [`LatticeError::Internal`] means
    /// the floating point determinant of the span is not integral (an ill-conditioned
    /// span) or the numerically determined fundamental domain does not contain exactly
    /// `|det(span)|` points.
    pub fn new(span: Span) -> Result<Self, LatticeError> {
        if !span.is_square() {
            return Err(LatticeError::NonSquareMatrix {
                rows: span.nrows(),
                cols: span.ncols(),
            });
        }
        let dimension = span.nrows();
        let num_corners = u32::try_from(dimension)
            .ok()
            .and_then(|d| 1usize.checked_shl(d))
            .ok_or(LatticeError::DimensionTooLarge {
                dimension,
                max: usize::BITS as usize - 1,
            })?;

        // 1) Number of cells from the determinant, which must be integral
        let span_f = span.map(|v| v as f64);
        let det = determinant(&span_f);
        let volume = det.abs().round();
        if (det.abs() - volume).abs() > DETERMINANT_TOLERANCE {
            error!("determinant {} of an integer span is not integral", det);
            return Err(LatticeError::internal(format!(
                "determinant {} of an integer span is not integral",
                det
            )));
        }
        if volume == 0.0 {
            return Err(LatticeError::SingularMatrix { determinant: det });
        }
        let num_cells = volume as usize;

        // 2) Real inverse for the membership tests
        let inverse = if dimension == 0 {
            DMatrix::zeros(0, 0)
        } else {
            span_f
                .try_inverse()
                .ok_or(LatticeError::SingularMatrix { determinant: det })?
        };

        // 3) Bounding box from the 2^d corners, i.e. all subset sums of the columns
        let mut nmin = Offset::zeros(dimension);
        let mut nmax = Offset::zeros(dimension);
        for corner in 0..num_corners {
            for m in 0..dimension {
                let v: i64 = (0..dimension)
                    .filter(|n| (corner >> n) & 1 == 1)
                    .map(|n| span[(m, n)])
                    .sum();
                nmin[m] = nmin[m].min(v);
                nmax[m] = nmax[m].max(v);
            }
        }
        let box_extent: Vec<usize> = (0..dimension)
            .map(|m| (nmax[m] - nmin[m] + 1) as usize)
            .collect();
        let num_lcoords: usize = box_extent.iter().product();

        let mut supercell = Supercell {
            dimension,
            num_cells,
            span,
            inverse,
            nmin,
            nmax,
            box_extent,
            lcoord_to_index: vec![None; num_lcoords],
            index_to_lcoord: Vec::with_capacity(num_cells),
        };

        // 4) Enumerate the fundamental domain in lcoord order
        for lc in 0..num_lcoords {
            if supercell.contains(&supercell.lcoord_to_offset(lc)) {
                supercell.lcoord_to_index[lc] = Some(supercell.index_to_lcoord.len());
                supercell.index_to_lcoord.push(lc);
            }
        }

        if supercell.index_to_lcoord.len() != num_cells {
            error!(
                "supercell enumeration accepted {} points, expected {}",
                supercell.index_to_lcoord.len(),
                num_cells
            );
            return Err(LatticeError::internal(format!(
                "supercell enumeration accepted {} points, expected {}",
                supercell.index_to_lcoord.len(),
                num_cells
            )));
        }

        debug!(
            "supercell: dimension {}, {} cells, bounding box {:?}..={:?}",
            dimension,
            num_cells,
            supercell.nmin.as_slice(),
            supercell.nmax.as_slice()
        );
        Ok(supercell)
    }

    /// `length` unit cells along every one of `dimension` axes.
    pub fn uniform(dimension: usize, length: usize) -> Result<Self, LatticeError> {
        Self::new(extent(&vec![length; dimension]))
    }

    /// Rectangular supercell with `lengths[m]` cells along axis `m`.
    pub fn from_extent(lengths: &[usize]) -> Result<Self, LatticeError> {
        Self::new(extent(lengths))
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Inclusive per-axis bounds of the box enclosing the fundamental domain.
    pub fn bounding_box(&self) -> (&Offset, &Offset) {
        (&self.nmin, &self.nmax)
    }

    /// Number of linear coordinates, i.e. integer points in the bounding box.
    pub fn num_lcoords(&self) -> usize {
        self.lcoord_to_index.len()
    }

    /// Fundamental-domain point of the cell with canonical index `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.num_cells()`.
    pub fn offset(&self, index: usize) -> Offset {
        self.lcoord_to_offset(self.index_to_lcoord(index))
    }

    /// Whether `point` belongs to the fundamental domain.
    pub fn contains(&self, point: &Offset) -> bool {
        assert_eq!(point.len(), self.dimension, "offset dimension must match the supercell");
        (0..self.dimension).all(|m| {
            let f = self.fractional_component(point, m);
            f >= -FOLD_TOLERANCE && f < 1.0 - FOLD_TOLERANCE
        })
    }

    pub fn lcoord_to_index(&self, lc: usize) -> Option<usize> {
        self.lcoord_to_index.get(lc).copied().flatten()
    }

    /// # Panics
    /// Panics if `index >= self.num_cells()`.
    pub fn index_to_lcoord(&self, index: usize) -> usize {
        self.index_to_lcoord[index]
    }

    pub fn lcoord_to_offset(&self, lc: usize) -> Offset {
        let mut rest = lc;
        let mut point = Offset::zeros(self.dimension);
        for m in 0..self.dimension {
            point[m] = (rest % self.box_extent[m]) as i64 + self.nmin[m];
            rest /= self.box_extent[m];
        }
        point
    }

    /// Linear coordinate of `point`, or `None` if it lies outside the bounding box.
    pub fn offset_to_lcoord(&self, point: &Offset) -> Option<usize> {
        if point.len() != self.dimension {
            return None;
        }
        let mut lc = 0usize;
        for m in (0..self.dimension).rev() {
            if point[m] < self.nmin[m] || point[m] > self.nmax[m] {
                return None;
            }
            lc = lc * self.box_extent[m] + (point[m] - self.nmin[m]) as usize;
        }
        Some(lc)
    }

    /// Resolves the cell reached from cell `index` by the unit-cell translation `offset`.
    ///
    /// Returns the canonical index of that cell inside the supercell together with the
    /// crossing vector: component `m` is the signed number of spanning vectors `s_m`
    /// that were subtracted to bring the cell back into the fundamental domain.
    ///
    /// # Panics
    /// Panics if `index >= self.num_cells()` or if `offset` does not have
    /// `self.dimension()` components.
    pub fn fold(&self, index: usize, offset: &Offset) -> (usize, Offset) {
        assert_eq!(offset.len(), self.dimension, "offset dimension must match the supercell");
        let mut cell = self.offset(index) + offset;
        let mut crossing = Offset::zeros(self.dimension);

        // S⁻¹ s_m = e_m, so each correction moves only its own fractional component;
        // the outer loop absorbs rounding in the floating point inverse.
        loop {
            let mut stable = true;
            for m in 0..self.dimension {
                let f = self.fractional_component(&cell, m);
                let shift = (f + FOLD_TOLERANCE).floor() as i64;
                if shift != 0 {
                    stable = false;
                    for k in 0..self.dimension {
                        cell[k] -= shift * self.span[(k, m)];
                    }
                    crossing[m] += shift;
                }
            }
            if stable {
                break;
            }
        }

        let target = self
            .offset_to_lcoord(&cell)
            .and_then(|lc| self.lcoord_to_index(lc))
            .expect("a folded cell always lies in the fundamental domain");
        (target, crossing)
    }

    /// Component `m` of `S⁻¹ point`.
    fn fractional_component(&self, point: &Offset, m: usize) -> f64 {
        (0..self.dimension)
            .map(|k| self.inverse[(m, k)] * point[k] as f64)
            .sum()
    }
}
