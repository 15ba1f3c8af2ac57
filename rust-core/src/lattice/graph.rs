use std::fmt;
use std::io;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::LatticeError;
use crate::interfaces::{Boundary, Coordinate, Span};
use crate::lattice::basis::Basis;
use crate::lattice::supercell::Supercell;
use crate::lattice::unitcell::UnitCell;

/// Policy switches for bond insertion.
///
/// Parallel bonds are always kept: two template bonds that fold onto the same pair
/// of sites, as on a periodic axis of length 2, yield two bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Keep bonds whose two endpoints resolve to the same site, such as a
    /// nearest-neighbor bond wrapping around a periodic axis of length 1.
    pub allow_self_loops: bool,
}

/// A site of the finite graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub site_type: i32,
    /// Cartesian position; empty for dimensionless graphs.
    pub coordinate: Coordinate,
    pub neighbors: Vec<usize>,
    pub neighbor_bonds: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    pub source: usize,
    pub target: usize,
    pub bond_type: i32,
}

/// Finite lattice graph: sites with coordinates and neighbor lists, and bonds.
///
/// Neighbor lists are symmetric: if bond `b` joins `s` and `t`, then `t` and `b` are
/// recorded at `s` and `s` and `b` at `t`, in the order the bonds were added.
/// Deserialization replays `add_site` and `add_bond` under the stored config and
/// rejects neighbor lists that disagree with the bonds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphData")]
pub struct Graph {
    dimension: usize,
    config: GraphConfig,
    sites: Vec<Site>,
    bonds: Vec<Bond>,
}

#[derive(Deserialize)]
struct GraphData {
    dimension: usize,
    config: GraphConfig,
    sites: Vec<Site>,
    bonds: Vec<Bond>,
}

impl TryFrom<GraphData> for Graph {
    type Error = LatticeError;

    fn try_from(data: GraphData) -> Result<Self, Self::Error> {
        let mut graph = Graph::with_config(data.dimension, data.config);
        for site in &data.sites {
            graph.add_site(site.coordinate.clone(), site.site_type)?;
        }
        for bond in &data.bonds {
            graph.add_bond(bond.source, bond.target, bond.bond_type)?;
        }
        for (s, (rebuilt, given)) in graph.sites.iter().zip(&data.sites).enumerate() {
            if rebuilt.neighbors != given.neighbors || rebuilt.neighbor_bonds != given.neighbor_bonds {
                return Err(LatticeError::NeighborMismatch { site: s });
            }
        }
        Ok(graph)
    }
}

impl Graph {
    /// Empty graph whose sites carry `dimension`-component coordinates.
    pub fn new(dimension: usize) -> Self {
        Self::with_config(dimension, GraphConfig::default())
    }

    pub fn with_config(dimension: usize, config: GraphConfig) -> Self {
        Graph {
            dimension,
            config,
            sites: Vec::new(),
            bonds: Vec::new(),
        }
    }

    /// Realizes `cell` embedded by `basis` on every cell of `supercell`.
    ///
    /// `boundary[m]` decides whether bonds crossing the supercell boundary along axis
    /// `m` wrap around or are dropped. Sites are ordered by (cell, unit-cell site) and
    /// bonds by (cell, unit-cell bond); dropped bonds leave no gaps.
    pub fn assemble(
        basis: &Basis,
        cell: &UnitCell,
        supercell: &Supercell,
        boundary: &[Boundary],
    ) -> Result<Self, LatticeError> {
        Self::assemble_with_config(basis, cell, supercell, boundary, GraphConfig::default())
    }

    pub fn assemble_with_config(
        basis: &Basis,
        cell: &UnitCell,
        supercell: &Supercell,
        boundary: &[Boundary],
        config: GraphConfig,
    ) -> Result<Self, LatticeError> {
        let dim = cell.dimension();
        for found in [supercell.dimension(), boundary.len(), basis.dimension()] {
            if found != dim {
                return Err(LatticeError::DimensionMismatch { expected: dim, found });
            }
        }

        let mut graph = Graph::with_config(dim, config);
        let sites_per_cell = cell.num_sites();

        // 1) Sites: one copy of the motif per supercell cell
        for c in 0..supercell.num_cells() {
            let cell_offset = supercell.offset(c).map(|v| v as f64);
            for site in cell.sites() {
                let position = basis.to_cartesian(&(&cell_offset + &site.coordinate));
                graph.push_site(position, site.site_type);
            }
        }

        // 2) Bonds: fold every template bond into the supercell
        for c in 0..supercell.num_cells() {
            for (u, bond) in cell.bonds().iter().enumerate() {
                let source = c * sites_per_cell + bond.source;
                let (target_cell, crossing) = supercell.fold(c, &bond.target_offset);
                if let Some(axis) = (0..dim).find(|&m| boundary[m].is_open() && crossing[m] != 0) {
                    trace!("cell {} bond {}: crosses open boundary along axis {}", c, u, axis);
                    continue;
                }
                let target = target_cell * sites_per_cell + bond.target;
                if source == target && !config.allow_self_loops {
                    trace!("cell {} bond {}: self loop at site {} dropped", c, u, source);
                    continue;
                }
                graph.push_bond(source, target, bond.bond_type);
            }
        }

        debug!(
            "graph: dimension {}, {} sites, {} bonds",
            graph.dimension,
            graph.num_sites(),
            graph.num_bonds()
        );
        Ok(graph)
    }

    /// `length` cells along every axis, with one boundary mode for all axes.
    pub fn from_length(
        basis: &Basis,
        cell: &UnitCell,
        length: usize,
        boundary: Boundary,
    ) -> Result<Self, LatticeError> {
        let supercell = Supercell::uniform(cell.dimension(), length)?;
        Self::assemble(basis, cell, &supercell, &boundary.uniform(cell.dimension()))
    }

    pub fn from_span(
        basis: &Basis,
        cell: &UnitCell,
        span: Span,
        boundary: &[Boundary],
    ) -> Result<Self, LatticeError> {
        let supercell = Supercell::new(span)?;
        Self::assemble(basis, cell, &supercell, boundary)
    }

    /// Periodic hypercubic lattice of `length^dim` sites.
    pub fn simple(dim: usize, length: usize) -> Result<Self, LatticeError> {
        Self::simple_with_boundary(dim, length, Boundary::Periodic)
    }

    pub fn simple_with_boundary(
        dim: usize,
        length: usize,
        boundary: Boundary,
    ) -> Result<Self, LatticeError> {
        Self::from_length(&Basis::simple(dim), &UnitCell::simple(dim), length, boundary)
    }

    /// Complete graph on `num_sites` dimensionless sites.
    pub fn fully_connected(num_sites: usize) -> Self {
        let mut graph = Graph::new(0);
        for _ in 0..num_sites {
            graph.push_site(Coordinate::zeros(0), 0);
        }
        for s in 0..num_sites {
            for t in (s + 1)..num_sites {
                graph.push_bond(s, t, 0);
            }
        }
        graph
    }

    /// Appends a site and returns its index.
    pub fn add_site(&mut self, coordinate: Coordinate, site_type: i32) -> Result<usize, LatticeError> {
        if coordinate.len() != self.dimension {
            return Err(LatticeError::DimensionMismatch {
                expected: self.dimension,
                found: coordinate.len(),
            });
        }
        Ok(self.push_site(coordinate, site_type))
    }

    /// Appends a bond between existing sites and returns its index.
    pub fn add_bond(&mut self, source: usize, target: usize, bond_type: i32) -> Result<usize, LatticeError> {
        for index in [source, target] {
            if index >= self.sites.len() {
                return Err(LatticeError::SiteIndexOutOfRange {
                    index,
                    num_sites: self.sites.len(),
                });
            }
        }
        if source == target && !self.config.allow_self_loops {
            return Err(LatticeError::SelfLoop { site: source });
        }
        Ok(self.push_bond(source, target, bond_type))
    }

    fn push_site(&mut self, coordinate: Coordinate, site_type: i32) -> usize {
        let index = self.sites.len();
        self.sites.push(Site {
            site_type,
            coordinate,
            neighbors: Vec::new(),
            neighbor_bonds: Vec::new(),
        });
        index
    }

    fn push_bond(&mut self, source: usize, target: usize, bond_type: i32) -> usize {
        let index = self.bonds.len();
        self.bonds.push(Bond {
            source,
            target,
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

    pub fn config(&self) -> GraphConfig {
        self.config
    }

    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn num_bonds(&self) -> usize {
        self.bonds.len()
    }

    pub fn site(&self, s: usize) -> &Site {
        &self.sites[s]
    }

    pub fn bond(&self, b: usize) -> &Bond {
        &self.bonds[b]
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn site_type(&self, s: usize) -> i32 {
        self.sites[s].site_type
    }

    pub fn coordinate(&self, s: usize) -> &Coordinate {
        &self.sites[s].coordinate
    }

    pub fn num_neighbors(&self, s: usize) -> usize {
        self.sites[s].neighbors.len()
    }

    /// `k`-th neighbor site of `s`.
    pub fn neighbor(&self, s: usize, k: usize) -> usize {
        self.sites[s].neighbors[k]
    }

    /// Bond leading to the `k`-th neighbor of `s`.
    pub fn neighbor_bond(&self, s: usize, k: usize) -> usize {
        self.sites[s].neighbor_bonds[k]
    }

    pub fn neighbors(&self, s: usize) -> &[usize] {
        &self.sites[s].neighbors
    }

    pub fn neighbor_bonds(&self, s: usize) -> &[usize] {
        &self.sites[s].neighbor_bonds
    }

    pub fn bond_type(&self, b: usize) -> i32 {
        self.bonds[b].bond_type
    }

    pub fn source(&self, b: usize) -> usize {
        self.bonds[b].source
    }

    pub fn target(&self, b: usize) -> usize {
        self.bonds[b].target
    }

    /// `(source, target)` of bond `b`.
    pub fn bond_sites(&self, b: usize) -> (usize, usize) {
        (self.bonds[b].source, self.bonds[b].target)
    }

    pub fn max_neighbors(&self) -> usize {
        self.sites
            .iter()
            .map(|site| site.neighbors.len())
            .max()
            .unwrap_or(0)
    }

    /// Writes the diagnostic dump produced by the `Display` implementation.
    pub fn print<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

fn join<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dimension: {}", self.dimension)?;
        writeln!(f, "number of sites: {}", self.num_sites())?;
        writeln!(f, "number of bonds: {}", self.num_bonds())?;
        for (s, site) in self.sites.iter().enumerate() {
            writeln!(
                f,
                "site: {} type: {} ( {} ) neighbors[ {} ] neighbor_bonds[ {} ]",
                s,
                site.site_type,
                join(site.coordinate.iter()),
                join(&site.neighbors),
                join(&site.neighbor_bonds)
            )?;
        }
        Ok(())
    }
}
