use serde::{Deserialize, Serialize};

use crate::error::LatticeError;
use crate::interfaces::{Coordinate, Offset};

/// A site of the unit cell, placed at fractional coordinates in `[0, 1)^d`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCellSite {
    pub coordinate: Coordinate,
    pub site_type: i32,
    /// Unit-cell sites reached by the bonds in `neighbor_bonds`, in insertion order.
    pub neighbors: Vec<usize>,
    pub neighbor_bonds: Vec<usize>,
}

/// A template bond from `source` in the home cell to `target` in the cell at `target_offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCellBond {
    pub source: usize,
    pub target: usize,
    pub target_offset: Offset,
    pub bond_type: i32,
}

/// Periodic motif of sites and bonds, independent of any geometric embedding.
///
/// Deserialization replays `add_site` and `add_bond`, so a deserialized cell obeys the
/// same invariants as one built through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UnitCellData")]
pub struct UnitCell {
    dimension: usize,
    sites: Vec<UnitCellSite>,
    bonds: Vec<UnitCellBond>,
}

/// Serialized form of a [`UnitCell`], checked before it becomes one.
#[derive(Deserialize)]
struct UnitCellData {
    dimension: usize,
    sites: Vec<UnitCellSite>,
    bonds: Vec<UnitCellBond>,
}

impl TryFrom<UnitCellData> for UnitCell {
    type Error = LatticeError;

    fn try_from(data: UnitCellData) -> Result<Self, Self::Error> {
        let mut cell = UnitCell::new(data.dimension);
        for site in &data.sites {
            cell.add_site(site.coordinate.clone(), site.site_type)?;
        }
        for bond in data.bonds {
            cell.add_bond(bond.source, bond.target, bond.target_offset, bond.bond_type)?;
        }
        // Neighbor lists are redundant with the bonds and must agree with them
        for (index, (rebuilt, given)) in cell.sites.iter().zip(&data.sites).enumerate() {
            if rebuilt.neighbors != given.neighbors || rebuilt.neighbor_bonds != given.neighbor_bonds {
                return Err(LatticeError::NeighborMismatch { site: index });
            }
        }
        Ok(cell)
    }
}

impl UnitCell {
    /// Creates an empty unit cell for a `dimension`-dimensional lattice.
    pub fn new(dimension: usize) -> Self {
        UnitCell {
            dimension,
            sites: Vec::new(),
            bonds: Vec::new(),
        }
    }

    /// Single site at the origin with one bond along every axis.
    pub fn simple(dimension: usize) -> Self {
        let mut cell = UnitCell::new(dimension);
        cell.sites.push(UnitCellSite {
            coordinate: Coordinate::zeros(dimension),
            site_type: 0,
            neighbors: Vec::new(),
            neighbor_bonds: Vec::new(),
        });
        for axis in 0..dimension {
            let mut target_offset = Offset::zeros(dimension);
            target_offset[axis] = 1;
            cell.push_bond(0, 0, target_offset, 0);
        }
        cell
    }

    /// Appends a site and returns its index.
    pub fn add_site(&mut self, coordinate: Coordinate, site_type: i32) -> Result<usize, LatticeError> {
        if coordinate.len() != self.dimension {
            return Err(LatticeError::DimensionMismatch {
                expected: self.dimension,
                found: coordinate.len(),
            });
        }
        if let Some((axis, &value)) = coordinate
            .iter()
            .enumerate()
            .find(|&(_, &x)| !(0.0..1.0).contains(&x))
        {
            return Err(LatticeError::CoordinateOutOfRange { axis, value });
        }

        let index = self.sites.len();
        self.sites.push(UnitCellSite {
            coordinate,
            site_type,
            neighbors: Vec::new(),
            neighbor_bonds: Vec::new(),
        });
        Ok(index)
    }

    /// Appends a bond and returns its index. `source == target` is allowed here; a
    /// bond may connect a site to its own image in another cell.
    pub fn add_bond(
        &mut self,
        source: usize,
        target: usize,
        target_offset: Offset,
        bond_type: i32,
    ) -> Result<usize, LatticeError> {
        for index in [source, target] {
            if index >= self.sites.len() {
                return Err(LatticeError::SiteIndexOutOfRange {
                    index,
                    num_sites: self.sites.len(),
                });
            }
        }
        if target_offset.len() != self.dimension {
            return Err(LatticeError::DimensionMismatch {
                expected: self.dimension,
                found: target_offset.len(),
            });
        }
        Ok(self.push_bond(source, target, target_offset, bond_type))
    }

    fn push_bond(&mut self, source: usize, target: usize, target_offset: Offset, bond_type: i32) -> usize {
        let index = self.bonds.len();
        self.bonds.push(UnitCellBond {
            source,
            target,
            target_offset,
            bond_type,
        });
        self.sites[source].neighbors.push(target);
        self.sites[source].neighbor_bonds.push(index);
        self.sites[target].neighbors.push(source);
        self.sites[target].neighbor_bonds.push(index);
        index
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn num_bonds(&self) -> usize {
        self.bonds.len()
    }

    pub fn site(&self, index: usize) -> &UnitCellSite {
        &self.sites[index]
    }

    pub fn bond(&self, index: usize) -> &UnitCellBond {
        &self.bonds[index]
    }

    pub fn sites(&self) -> &[UnitCellSite] {
        &self.sites
    }

    pub fn bonds(&self) -> &[UnitCellBond] {
        &self.bonds
    }

    /// Largest number of bond endpoints attached to a single site.
    pub fn max_neighbors(&self) -> usize {
        self.sites
            .iter()
            .map(|site| site.neighbor_bonds.len())
            .max()
            .unwrap_or(0)
    }
}
