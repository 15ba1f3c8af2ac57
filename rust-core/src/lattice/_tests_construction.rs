#[cfg(test)]
mod _tests_construction {
    use super::super::construction::*;
    use crate::error::LatticeError;

    fn volume(span: &crate::interfaces::Span) -> i64 {
        span.map(|v| v as f64).determinant().round() as i64
    }

    #[test]
    fn test_extent() {
        let cases: [(&[usize], i64, i64); 5] = [
            (&[3], 3, 3),
            (&[3, 5], 15, 8),
            (&[3, 2, 4], 24, 9),
            (&[3, 2, 4, 5], 120, 14),
            (&[3, 2, 4, 5, 1], 120, 15),
        ];
        for (lengths, expected_volume, expected_trace) in cases {
            let span = extent(lengths);
            assert_eq!(span.nrows(), lengths.len());
            assert_eq!(volume(&span), expected_volume);
            assert_eq!(span.trace(), expected_trace);
        }
    }

    #[test]
    fn test_span_from_rows() {
        let span = span_from_rows(&[&[4, -1], &[1, 3]]).unwrap();
        assert_eq!(span[(0, 1)], -1);
        assert_eq!(span[(1, 0)], 1);
        // Columns are the spanning vectors
        assert_eq!(span.column(0).iter().copied().collect::<Vec<_>>(), vec![4, 1]);
        assert_eq!(
            span_from_rows(&[&[1, 0], &[0]]),
            Err(LatticeError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_vector_helpers() {
        let os = offset(&[1, -2, 3]);
        assert_eq!(os.len(), 3);
        assert_eq!(os[1], -2);
        let pos = coordinate(&[0.25, 0.5]);
        assert_eq!(pos.len(), 2);
        assert_eq!(pos[0], 0.25);
    }
}
