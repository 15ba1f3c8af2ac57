// Lattice module: Contains the unit cell, supercell and graph assembly pipeline
// This module turns a periodic motif into a finite site/bond structure for lattice-model simulations

// ======================== MODULE DECLARATIONS ========================
pub mod basis;
pub mod coloring;
pub mod construction;
pub mod graph;
pub mod supercell;
pub mod unitcell;

// Test modules
mod _tests_basis;
mod _tests_construction;
mod _tests_unitcell;

// ======================== GEOMETRIC EMBEDDING ========================
pub use basis::Basis; // struct - named square matrix of real basis vectors (columns)
// Basis impl methods:
//   new(name, matrix: DMatrix<f64>) -> Result<Self, LatticeError>    - validates squareness and non-zero volume
//   simple(dim: usize) -> Self                                       - Cartesian unit vectors
//   from_row_slice(name, dim, entries: &[f64]) -> Result<Self, ..>   - builds from row-major entries
//   name(&self) -> &str                                              - basis name
//   dimension(&self) -> usize                                        - number of spatial dimensions
//   basis_vectors(&self) -> &DMatrix<f64>                            - basis matrix
//   volume(&self) -> f64                                             - |det(B)|
//   to_cartesian(&self, fractional: &Coordinate) -> Coordinate       - B * fractional

// ======================== PERIODIC TEMPLATE ========================
pub use unitcell::{
    UnitCell,     // struct - sites in fractional coordinates and bonds with target cell offsets
    UnitCellBond, // struct - (source, target, target_offset, bond_type)
    UnitCellSite, // struct - fractional coordinate, type and neighbor bookkeeping
};
// UnitCell impl methods:
//   new(dimension: usize) -> Self                                    - empty unit cell
//   simple(dimension: usize) -> Self                                 - one site, one bond per axis
//   add_site(&mut self, coordinate, site_type) -> Result<usize, ..>  - coordinate must lie in [0, 1)^d
//   add_bond(&mut self, source, target, offset, bond_type) -> Result<usize, ..> - indices and offset checked
//   dimension / num_sites / num_bonds / site / bond / sites / bonds  - accessors
//   max_neighbors(&self) -> usize                                    - max bond-endpoint multiplicity

// ======================== SUPERCELL FOLDING ========================
pub use supercell::Supercell; // struct - integer tiling with canonical cell enumeration
// Supercell impl methods:
//   new(span: Span) -> Result<Self, LatticeError>                    - enumerates the fundamental domain
//   uniform(dimension, length) -> Result<Self, ..>                   - length * identity
//   from_extent(lengths: &[usize]) -> Result<Self, ..>               - diagonal span
//   dimension / num_cells / span / bounding_box / num_lcoords        - accessors
//   offset(&self, index) -> Offset                                   - fundamental-domain point of a cell
//   contains(&self, point: &Offset) -> bool                          - S⁻¹ p ∈ [-ε, 1-ε)^d
//   lcoord_to_index / index_to_lcoord / lcoord_to_offset / offset_to_lcoord - enumeration tables
//   fold(&self, index, offset: &Offset) -> (usize, Offset)           - target cell and crossing vector

// ======================== GRAPH ASSEMBLY ========================
pub use graph::{
    Bond,        // struct - (source, target, bond_type)
    Graph,       // struct - finite sites/bonds with symmetric neighbor lists
    GraphConfig, // struct - bond insertion policy (allow_self_loops)
    Site,        // struct - type, coordinate, neighbors, neighbor_bonds
};
// Graph impl methods:
//   new(dimension) / with_config(dimension, config) -> Self          - empty graph for hand-built input
//   assemble(basis, cell, supercell, boundary: &[Boundary]) -> Result<Self, ..> - the assembly pipeline
//   assemble_with_config(.., config: GraphConfig) -> Result<Self, ..>
//   from_length(basis, cell, length, Boundary) / from_span(basis, cell, span, &[Boundary])
//   simple(dim, length) / simple_with_boundary(dim, length, Boundary) - hypercubic lattice
//   fully_connected(num_sites) -> Self                               - complete graph, no embedding
//   add_site / add_bond                                              - validated appends
//   site_type / coordinate / num_neighbors / neighbor / neighbor_bond / neighbors / neighbor_bonds
//   bond_type / source / target / bond_sites / max_neighbors
//   print(&self, out: &mut impl Write)                               - diagnostic dump (also Display)

// ======================== GRAPH ANALYSIS ========================
pub use coloring::two_coloring; // fn(graph: &Graph) -> Option<Vec<u8>> - bipartite coloring

// ======================== CONSTRUCTION UTILITIES ========================
pub use construction::{
    coordinate,     // fn(&[f64]) -> Coordinate - dense coordinate vector
    extent,         // fn(&[usize]) -> Span - diagonal spanning matrix
    offset,         // fn(&[i64]) -> Offset - dense offset vector
    span_from_rows, // fn(&[&[i64]]) -> Result<Span, LatticeError> - spanning matrix from rows
};
