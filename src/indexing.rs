//! The top-level indexing pipeline: spherical coordinates to cell
//! index, cell index to center point, and cell index to boundary.

use crate::constants::{EPSILON_RAD, MAX_RES, M_PI_2, NUM_HEX_VERTS, NUM_PENT_VERTS};
use crate::coords::face_ijk::{cell_boundary, pent_boundary};
use crate::index::{cell_to_face_ijk, face_ijk_to_cell};
use crate::projection::{face_ijk_to_geo, geo_to_face_ijk};
use crate::types::{CellBoundary, CellIndex, GridError, LatLng, NULL_CELL};

/// Indexes the cell containing `geo` at resolution `res`.
///
/// # Errors
///
/// `ResolutionDomain` when `res` is outside `[0, 15]`;
/// `CoordinateDomain` when `geo` is not finite or the latitude is
/// beyond the poles.
pub fn geo_to_cell(geo: LatLng, res: i32) -> Result<CellIndex, GridError> {
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResolutionDomain);
  }
  if !(geo.lat.is_finite() && geo.lng.is_finite()) || geo.lat.abs() > M_PI_2 + EPSILON_RAD {
    return Err(GridError::CoordinateDomain);
  }

  let fijk = geo_to_face_ijk(geo, res);
  match face_ijk_to_cell(fijk, res) {
    NULL_CELL => Err(GridError::CoordinateDomain),
    cell => Ok(cell),
  }
}

/// The center point of a cell.
///
/// # Errors
///
/// `InvalidCell` when `cell` is not a valid cell index.
pub fn cell_to_geo(cell: CellIndex) -> Result<LatLng, GridError> {
  if !cell.is_valid_cell() {
    return Err(GridError::InvalidCell);
  }
  let fijk = cell_to_face_ijk(cell)?;
  Ok(face_ijk_to_geo(fijk, cell.resolution()))
}

/// The boundary of a cell in counter-clockwise order: 6 vertices for a
/// hexagon and 5 for a pentagon, plus a synthetic vertex wherever an
/// edge crosses an icosahedron edge.
///
/// # Errors
///
/// `InvalidCell` when `cell` is not a valid cell index.
pub fn cell_to_boundary(cell: CellIndex) -> Result<CellBoundary, GridError> {
  if !cell.is_valid_cell() {
    return Err(GridError::InvalidCell);
  }
  let fijk = cell_to_face_ijk(cell)?;
  let res = cell.resolution();

  let boundary = if cell.is_pentagon() {
    pent_boundary(fijk, res, 0, NUM_PENT_VERTS)
  } else {
    cell_boundary(fijk, res, 0, NUM_HEX_VERTS)
  };
  Ok(boundary)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::{MAX_CELL_BNDRY_VERTS, M_PI};
  use crate::geo::latlng_from_degs;
  use crate::types::Direction;

  #[test]
  fn rejects_out_of_range_resolution() {
    let geo = latlng_from_degs(37.77, -122.4);
    assert_eq!(geo_to_cell(geo, -1), Err(GridError::ResolutionDomain));
    assert_eq!(geo_to_cell(geo, 16), Err(GridError::ResolutionDomain));
  }

  #[test]
  fn rejects_bad_coordinates() {
    assert_eq!(
      geo_to_cell(latlng_from_degs(100.0, 0.0), 5),
      Err(GridError::CoordinateDomain)
    );
    assert_eq!(
      geo_to_cell(LatLng { lat: f64::NAN, lng: 0.0 }, 5),
      Err(GridError::CoordinateDomain)
    );
    assert_eq!(
      geo_to_cell(LatLng { lat: 0.0, lng: f64::INFINITY }, 5),
      Err(GridError::CoordinateDomain)
    );
  }

  #[test]
  fn longitude_wraps() {
    // Longitudes beyond +-pi normalize through the azimuth math.
    let a = geo_to_cell(LatLng { lat: 0.3, lng: 0.5 }, 6).unwrap();
    let b = geo_to_cell(
      LatLng {
        lat: 0.3,
        lng: 0.5 + 2.0 * M_PI,
      },
      6,
    )
    .unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn rejects_invalid_cells() {
    assert_eq!(cell_to_geo(NULL_CELL), Err(GridError::InvalidCell));
    assert_eq!(cell_to_boundary(NULL_CELL), Err(GridError::InvalidCell));

    let edge_mode = CellIndex(0x85283473fffffff).with_mode(2);
    assert_eq!(cell_to_geo(edge_mode), Err(GridError::InvalidCell));
    assert_eq!(cell_to_boundary(edge_mode), Err(GridError::InvalidCell));
  }

  #[test]
  fn center_reindexes_to_same_cell() {
    let geo = latlng_from_degs(37.779, -122.419);
    for res in 0..=10 {
      let cell = geo_to_cell(geo, res).unwrap();
      assert!(cell.is_valid_cell());
      assert_eq!(cell.resolution(), res);

      let center = cell_to_geo(cell).unwrap();
      assert_eq!(geo_to_cell(center, res).unwrap(), cell, "center must re-index to itself at res {res}");
    }
  }

  #[test]
  fn boundary_counts_are_in_range() {
    let geo = latlng_from_degs(37.779, -122.419);
    for res in 0..=9 {
      let cell = geo_to_cell(geo, res).unwrap();
      let boundary = cell_to_boundary(cell).unwrap();
      let base = if cell.is_pentagon() { NUM_PENT_VERTS } else { NUM_HEX_VERTS };
      assert!(
        (base..=MAX_CELL_BNDRY_VERTS).contains(&boundary.num_verts),
        "res {res}: {} verts",
        boundary.num_verts
      );
      for v in boundary.verts() {
        assert!(v.lat.is_finite() && v.lng.is_finite());
        assert!(v.lat.abs() <= M_PI_2 + EPSILON_RAD);
      }
    }
  }

  #[test]
  fn pentagon_boundary_at_res0_has_five_verts() {
    // Base cell 14 is a non-polar pentagon; res 0 is Class II, so no
    // synthetic vertices appear.
    let pent = CellIndex::init(0, 14, Direction::Center);
    let boundary = cell_to_boundary(pent).unwrap();
    assert_eq!(boundary.num_verts, NUM_PENT_VERTS);
  }
}
