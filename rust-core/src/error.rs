use thiserror::Error;

/// Errors raised while building bases, unit cells, supercells and graphs.
///
/// Everything except [`LatticeError::Internal`] is caused by inconsistent input
/// and can be corrected by the caller. `Internal` marks a numerical or
/// algorithmic defect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    #[error("matrix must be square, got {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },

    #[error("matrix is singular (determinant {determinant})")]
    SingularMatrix { determinant: f64 },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("coordinate component {axis} = {value} lies outside [0, 1)")]
    CoordinateOutOfRange { axis: usize, value: f64 },

    #[error("site index {index} out of range (number of sites: {num_sites})")]
    SiteIndexOutOfRange { index: usize, num_sites: usize },

    #[error("self loop at site {site} is not allowed")]
    SelfLoop { site: usize },

    #[error("dimension {dimension} exceeds the supported maximum {max}")]
    DimensionTooLarge { dimension: usize, max: usize },

    #[error("neighbor lists of site {site} do not match the bonds")]
    NeighborMismatch { site: usize },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl LatticeError {
    /// `true` for internal-consistency failures, `false` for invalid input.
    pub fn is_internal(&self) -> bool {
        matches!(self, LatticeError::Internal { .. })
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        LatticeError::Internal {
            message: message.into(),
        }
    }
}
