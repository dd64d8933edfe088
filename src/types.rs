//! Core value types of the grid system.
//!
//! Everything here is a plain `Copy` value; the whole pipeline is a DAG
//! of pure functions over these types, with no shared mutable state.

use crate::constants::MAX_CELL_BNDRY_VERTS;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};
use thiserror::Error;

/// A 64-bit packed cell index.
///
/// Bit layout, high bit first: 1 reserved bit (zero), 4 mode bits,
/// 3 reserved bits (zero), 4 resolution bits, 7 base cell bits, and
/// fifteen 3-bit resolution digits. Digits finer than the index's own
/// resolution are set to 7.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellIndex(pub u64);

/// The reserved NULL index. Never a valid cell.
pub const NULL_CELL: CellIndex = CellIndex(0);

/// Spherical coordinates in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLng {
  /// Latitude in radians.
  pub lat: f64,
  /// Longitude in radians.
  pub lng: f64,
}

/// The boundary of a cell as an ordered list of vertices in
/// counter-clockwise order.
///
/// Hexagons have 6 topological vertices and pentagons 5; crossing an
/// icosahedron edge introduces additional synthetic vertices, up to a
/// total of [`MAX_CELL_BNDRY_VERTS`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellBoundary {
  /// Number of valid entries in `verts`.
  pub num_verts: usize,
  /// Boundary vertices; entries past `num_verts` are not significant.
  pub verts: [LatLng; MAX_CELL_BNDRY_VERTS],
}

impl CellBoundary {
  /// The valid vertices as a slice.
  #[must_use]
  pub fn verts(&self) -> &[LatLng] {
    &self.verts[..self.num_verts]
  }

  pub(crate) fn push(&mut self, v: LatLng) {
    if self.num_verts < MAX_CELL_BNDRY_VERTS {
      self.verts[self.num_verts] = v;
      self.num_verts += 1;
    }
  }
}

/// Failure kinds surfaced by the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
  /// Resolution argument was outside `[0, 15]`.
  #[error("resolution out of range [0, 15]")]
  ResolutionDomain,
  /// Latitude or longitude argument was not finite or out of range.
  #[error("latitude or longitude out of range")]
  CoordinateDomain,
  /// The cell index argument was not a valid cell.
  #[error("invalid cell index")]
  InvalidCell,
  /// Resolution arguments were incompatible (e.g. parent finer than child).
  #[error("incompatible resolutions")]
  ResolutionMismatch,
  /// A string form could not be parsed as a cell index.
  #[error("unparseable cell index string")]
  ParseFailed,
}

/// Signed integer coordinates on the triangular lattice of a face,
/// using three axes spaced 120 degrees apart.
///
/// The triple is redundant: a position is *normalized* when its minimum
/// component is zero, and every position has exactly one normalized
/// form. All operations take and return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordIjk {
  pub i: i32,
  pub j: i32,
  pub k: i32,
}

/// An icosahedron face number (0–19) paired with [`CoordIjk`]
/// coordinates in that face's face-centered system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceIjk {
  /// Icosahedron face number, 0–19.
  pub face: i32,
  /// Lattice coordinates on that face.
  pub coord: CoordIjk,
}

impl FaceIjk {
  #[inline]
  #[must_use]
  pub(crate) const fn new(face: i32, coord: CoordIjk) -> Self {
    Self { face, coord }
  }
}

/// A point in a face-local plane. The i-axis lies at azimuth 0, the
/// j-axis at +60° and the k-axis at +120°.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2d {
  pub x: f64,
  pub y: f64,
}

/// A point in 3-space, used for unit-sphere geometry.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3d {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

/// One of the seven cell digits (center plus six axial directions), or
/// the invalid sentinel (7).
///
/// The K digit is the "deleted subsequence" under pentagons: no valid
/// index has K as the leading non-zero digit of a pentagonal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Default)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum Direction {
  /// No movement: the center digit.
  #[default]
  Center = 0,
  /// The k-axis direction.
  K = 1,
  /// The j-axis direction.
  J = 2,
  /// j+k: between the j and k axes.
  Jk = 3,
  /// The i-axis direction.
  I = 4,
  /// i+k: between the i and k axes.
  Ik = 5,
  /// i+j: between the i and j axes.
  Ij = 6,
  /// Sentinel for an unused or unrepresentable digit.
  Invalid = 7,
}

impl Direction {
  /// All seven valid digits, in digit order.
  pub(crate) const VALID: [Direction; 7] = [
    Direction::Center,
    Direction::K,
    Direction::J,
    Direction::Jk,
    Direction::I,
    Direction::Ik,
    Direction::Ij,
  ];

  /// The digit for a raw 3-bit field value.
  #[inline]
  #[must_use]
  pub(crate) const fn from_bits(bits: u64) -> Direction {
    match bits & 0x7 {
      0 => Direction::Center,
      1 => Direction::K,
      2 => Direction::J,
      3 => Direction::Jk,
      4 => Direction::I,
      5 => Direction::Ik,
      6 => Direction::Ij,
      _ => Direction::Invalid,
    }
  }

  /// Rotate the digit 60 degrees counter-clockwise.
  #[inline]
  #[must_use]
  pub(crate) const fn rotate60_ccw(self) -> Direction {
    match self {
      Direction::K => Direction::Ik,
      Direction::Ik => Direction::I,
      Direction::I => Direction::Ij,
      Direction::Ij => Direction::J,
      Direction::J => Direction::Jk,
      Direction::Jk => Direction::K,
      other => other,
    }
  }

  /// Rotate the digit 60 degrees clockwise.
  #[inline]
  #[must_use]
  pub(crate) const fn rotate60_cw(self) -> Direction {
    match self {
      Direction::K => Direction::Jk,
      Direction::Jk => Direction::J,
      Direction::J => Direction::Ij,
      Direction::Ij => Direction::I,
      Direction::I => Direction::Ik,
      Direction::Ik => Direction::K,
      other => other,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn direction_rotations_are_inverse() {
    for d in Direction::VALID {
      assert_eq!(d.rotate60_ccw().rotate60_cw(), d);
      assert_eq!(d.rotate60_cw().rotate60_ccw(), d);
    }
  }

  #[test]
  fn direction_six_rotations_identity() {
    for d in Direction::VALID {
      let mut r = d;
      for _ in 0..6 {
        r = r.rotate60_ccw();
      }
      assert_eq!(r, d, "six CCW rotations must be the identity");
    }
  }

  #[test]
  fn direction_from_bits_covers_all_fields() {
    for bits in 0..8u64 {
      assert_eq!(Direction::from_bits(bits) as u64, bits);
    }
  }

  #[test]
  fn boundary_push_saturates() {
    let mut b = CellBoundary::default();
    for _ in 0..(MAX_CELL_BNDRY_VERTS + 3) {
      b.push(LatLng::default());
    }
    assert_eq!(b.num_verts, MAX_CELL_BNDRY_VERTS);
  }
}
