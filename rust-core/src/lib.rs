//! Lattice graph construction library
//!
//! This library builds finite graphs of crystallographic lattices for lattice-model
//! simulations. A [`lattice::UnitCell`] motif is embedded with a [`lattice::Basis`],
//! tiled by an integer [`lattice::Supercell`] and assembled into a [`lattice::Graph`]
//! with periodic or open boundaries chosen per axis.

pub mod config;
pub mod error;
pub mod interfaces;
pub mod lattice;

pub use error::LatticeError;
pub use interfaces::{Boundary, Coordinate, Offset, Span};

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, LatticeError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
