#[cfg(test)]
mod _tests_basis {
    use super::super::basis::Basis;
    use super::super::construction::coordinate;
    use crate::config::COORDINATE_TOLERANCE;
    use crate::error::LatticeError;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    #[test]
    fn test_simple_basis() {
        let basis = Basis::simple(3);
        assert_eq!(basis.name(), "simple hypercubic");
        assert_eq!(basis.dimension(), 3);
        assert_eq!(basis.basis_vectors(), &DMatrix::identity(3, 3));
        assert_relative_eq!(basis.volume(), 1.0);
    }

    #[test]
    fn test_zero_dimensional_basis() {
        let basis = Basis::simple(0);
        assert_eq!(basis.dimension(), 0);
        assert_relative_eq!(basis.volume(), 1.0);
        assert!(basis.to_cartesian(&coordinate(&[])).is_empty());
    }

    #[test]
    fn test_rectangular_volume() {
        let basis = Basis::from_row_slice("rectangular", 2, &[1.0, 0.0, 0.0, 1.5]).unwrap();
        assert_eq!(basis.name(), "rectangular");
        assert_eq!(basis.dimension(), 2);
        assert_relative_eq!(basis.volume(), 1.5, epsilon = COORDINATE_TOLERANCE);
    }

    #[test]
    fn test_volume_is_absolute_determinant() {
        // Left-handed triangular basis
        let basis = Basis::from_row_slice("triangular", 2, &[0.5, 1.0, 3.0_f64.sqrt() / 2.0, 0.0])
            .unwrap();
        assert_relative_eq!(basis.volume(), 3.0_f64.sqrt() / 2.0, epsilon = COORDINATE_TOLERANCE);
    }

    #[test]
    fn test_to_cartesian() {
        let basis = Basis::from_row_slice("oblique", 2, &[2.0, 1.0, 0.0, 3.0]).unwrap();
        let position = basis.to_cartesian(&coordinate(&[1.0, 0.5]));
        assert_relative_eq!(position[0], 2.5, epsilon = COORDINATE_TOLERANCE);
        assert_relative_eq!(position[1], 1.5, epsilon = COORDINATE_TOLERANCE);
    }

    #[test]
    fn test_rejects_non_square_matrix() {
        let matrix = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(
            Basis::new("broken", matrix),
            Err(LatticeError::NonSquareMatrix { rows: 2, cols: 3 })
        );
        assert_eq!(
            Basis::from_row_slice("short", 2, &[1.0, 0.0, 0.0]),
            Err(LatticeError::DimensionMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_rejects_zero_volume() {
        let result = Basis::from_row_slice("collinear", 2, &[1.0, 2.0, 1.0, 2.0]);
        assert!(matches!(result, Err(LatticeError::SingularMatrix { .. })));
    }

    #[test]
    fn test_accepts_small_length_scale() {
        let basis = Basis::new("fine cubic", DMatrix::<f64>::identity(3, 3) * 1e-4).unwrap();
        assert_relative_eq!(basis.volume(), 1e-12, max_relative = 1e-9);
    }

    #[test]
    fn test_rejects_nearly_collinear_vectors() {
        let result = Basis::from_row_slice("sliver", 2, &[1.0, 1.0, 0.0, 1e-12]);
        assert!(matches!(result, Err(LatticeError::SingularMatrix { .. })));
    }

    #[test]
    fn test_serde_round_trip() {
        let basis = Basis::from_row_slice("oblique", 2, &[2.0, 1.0, 0.0, 3.0]).unwrap();
        let restored: Basis = serde_json::from_str(&serde_json::to_string(&basis).unwrap()).unwrap();
        assert_eq!(restored, basis);
    }

    #[test]
    fn test_deserialize_rejects_invalid_matrices() {
        let singular = r#"{"name":"flat","basis_vectors":[[0.0,0.0,0.0,0.0],2,2]}"#;
        let err = serde_json::from_str::<Basis>(singular).unwrap_err().to_string();
        assert!(err.contains("matrix is singular"), "{}", err);

        let non_square = r#"{"name":"wide","basis_vectors":[[1.0,0.0,0.0,1.0,0.0,0.0],2,3]}"#;
        let err = serde_json::from_str::<Basis>(non_square).unwrap_err().to_string();
        assert!(err.contains("matrix must be square, got 2x3"), "{}", err);
    }
}
