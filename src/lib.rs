#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)] // lattice math is bounded well inside i32
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::similar_names)] // ijk math is full of near-identical names
#![allow(clippy::must_use_candidate)]

//! `icogrid` is a discrete global grid system that tiles the sphere
//! with hexagonal cells (and twelve pentagons) in sixteen resolutions
//! of aperture-7 refinement over an icosahedron.
//!
//! The crate implements the bidirectional pipeline between spherical
//! coordinates, gnomonic face-plane coordinates, and 64-bit packed
//! hierarchical cell indexes:
//!
//! ```
//! use icogrid::{cell_to_boundary, cell_to_geo, geo_to_cell, latlng_from_degs};
//!
//! let geo = latlng_from_degs(37.345, -121.976);
//! let cell = geo_to_cell(geo, 5).unwrap();
//! let center = cell_to_geo(cell).unwrap();
//! let boundary = cell_to_boundary(cell).unwrap();
//! assert_eq!(geo_to_cell(center, 5).unwrap(), cell);
//! assert_eq!(boundary.num_verts, 6);
//! ```
//!
//! Everything is pure computation over `Copy` values; there is no
//! shared mutable state and all lookup tables are compile-time
//! constants, so calls may run concurrently without coordination.

pub mod base_cells;
pub mod constants;
pub mod coords;
pub mod geo;
pub mod hierarchy;
pub mod index;
pub mod indexing;
pub mod math;
pub mod projection;
pub mod types;

pub use constants::{MAX_CELL_BNDRY_VERTS, MAX_RES, NUM_BASE_CELLS, NUM_PENTAGONS};
pub use geo::{
  degs_to_rads, great_circle_distance_km, great_circle_distance_m, great_circle_distance_rads, latlng_from_degs,
  rads_to_degs, triangle_area_rads2,
};
pub use hierarchy::{cell_to_center_child, cell_to_children, cell_to_children_size, cell_to_parent, pentagons};
pub use index::res0_cells;
pub use indexing::{cell_to_boundary, cell_to_geo, geo_to_cell};
pub use types::{CellBoundary, CellIndex, CoordIjk, Direction, FaceIjk, GridError, LatLng, Vec2d, Vec3d, NULL_CELL};
