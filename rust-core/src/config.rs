// Constants

// Tolerances
pub const FOLD_TOLERANCE: f64 = 1e-8; // Fundamental-domain membership and folding
pub const DETERMINANT_TOLERANCE: f64 = 1e-6; // Distance of det(span) from the nearest integer
pub const SINGULAR_TOLERANCE: f64 = 1e-10; // |det| relative to the product of basis vector lengths; at or below is a zero-volume cell
pub const COORDINATE_TOLERANCE: f64 = 1e-10; // For comparisons of embedded coordinates
