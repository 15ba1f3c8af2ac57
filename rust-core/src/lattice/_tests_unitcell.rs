#[cfg(test)]
mod _tests_unitcell {
    use super::super::construction::{coordinate, offset};
    use super::super::unitcell::UnitCell;
    use crate::error::LatticeError;

    #[test]
    fn test_simple_unitcell() {
        let cell = UnitCell::simple(2);
        assert_eq!(cell.dimension(), 2);
        assert_eq!(cell.num_sites(), 1);
        assert_eq!(cell.num_bonds(), 2);
        assert_eq!(cell.bond(0).target_offset, offset(&[1, 0]));
        assert_eq!(cell.bond(1).target_offset, offset(&[0, 1]));
        for bond in cell.bonds() {
            assert_eq!((bond.source, bond.target), (0, 0));
        }
        // Each bond touches the single site twice
        assert_eq!(cell.max_neighbors(), 4);
    }

    #[test]
    fn test_hand_built_unitcell() {
        let mut cell = UnitCell::new(2);
        let s0 = cell.add_site(coordinate(&[0.0, 0.0]), 0).unwrap();
        let s1 = cell.add_site(coordinate(&[0.5, 0.25]), 1).unwrap();
        assert_eq!((s0, s1), (0, 1));
        let b0 = cell.add_bond(s0, s1, offset(&[0, 0]), 0).unwrap();
        let b1 = cell.add_bond(s1, s0, offset(&[1, 0]), 1).unwrap();
        assert_eq!((b0, b1), (0, 1));

        assert_eq!(cell.site(s1).site_type, 1);
        assert_eq!(cell.site(s0).neighbors, vec![1, 1]);
        assert_eq!(cell.site(s0).neighbor_bonds, vec![0, 1]);
        assert_eq!(cell.site(s1).neighbors, vec![0, 0]);
        assert_eq!(cell.bond(b1).bond_type, 1);
        assert_eq!(cell.max_neighbors(), 2);
    }

    #[test]
    fn test_empty_unitcell_has_no_neighbors() {
        assert_eq!(UnitCell::new(3).max_neighbors(), 0);
    }

    #[test]
    fn test_add_site_validation() {
        let mut cell = UnitCell::new(2);
        assert_eq!(
            cell.add_site(coordinate(&[0.0]), 0),
            Err(LatticeError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            cell.add_site(coordinate(&[0.0, 1.0]), 0),
            Err(LatticeError::CoordinateOutOfRange {
                axis: 1,
                value: 1.0
            })
        );
        assert_eq!(
            cell.add_site(coordinate(&[-0.1, 0.5]), 0),
            Err(LatticeError::CoordinateOutOfRange {
                axis: 0,
                value: -0.1
            })
        );
        assert_eq!(cell.num_sites(), 0);
    }

    #[test]
    fn test_add_bond_validation() {
        let mut cell = UnitCell::new(2);
        cell.add_site(coordinate(&[0.0, 0.0]), 0).unwrap();
        assert_eq!(
            cell.add_bond(0, 1, offset(&[1, 0]), 0),
            Err(LatticeError::SiteIndexOutOfRange {
                index: 1,
                num_sites: 1
            })
        );
        assert_eq!(
            cell.add_bond(0, 0, offset(&[1, 0, 0]), 0),
            Err(LatticeError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(cell.num_bonds(), 0);
        assert!(cell.site(0).neighbors.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cell = UnitCell::simple(3);
        cell.add_site(coordinate(&[0.5, 0.5, 0.5]), 2).unwrap();
        cell.add_bond(0, 1, offset(&[0, 0, 0]), 1).unwrap();
        let json = serde_json::to_string(&cell).unwrap();
        let restored: UnitCell = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cell);
    }

    fn corrupted(cell: &UnitCell, edit: impl FnOnce(&mut serde_json::Value)) -> String {
        let mut value = serde_json::to_value(cell).unwrap();
        edit(&mut value);
        serde_json::from_value::<UnitCell>(value).unwrap_err().to_string()
    }

    #[test]
    fn test_deserialize_rejects_invalid_cells() {
        let cell = UnitCell::simple(1);

        let err = corrupted(&cell, |v| v["bonds"][0]["target"] = 5.into());
        assert!(err.contains("site index 5 out of range"), "{}", err);

        // Coordinate storage is serialized as [entries, rows, cols]
        let err = corrupted(&cell, |v| v["sites"][0]["coordinate"][0][0] = 1.5.into());
        assert!(err.contains("lies outside [0, 1)"), "{}", err);

        let err = corrupted(&cell, |v| v["sites"][0]["neighbor_bonds"] = serde_json::json!([]));
        assert!(err.contains("neighbor lists of site 0"), "{}", err);
    }
}
