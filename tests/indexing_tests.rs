//! End-to-end pipeline tests against known index values.

use icogrid::constants::MAX_EDGE_LENGTH_RADS;
use icogrid::{
  cell_to_boundary, cell_to_geo, geo_to_cell, great_circle_distance_rads, latlng_from_degs, rads_to_degs, CellIndex,
  GridError, LatLng,
};

#[test]
fn equator_prime_meridian_res0_is_pentagon_58() {
  let cell = geo_to_cell(LatLng { lat: 0.0, lng: 0.0 }, 0).unwrap();
  assert_eq!(cell, CellIndex(0x8075fffffffffff));
  assert_eq!(cell.base_cell(), 58);
  assert!(cell.is_pentagon());
}

#[test]
fn known_cells_at_known_points() {
  // (20, 123) at res 2.
  let cell = geo_to_cell(latlng_from_degs(20.0, 123.0), 2).unwrap();
  assert_eq!(cell, CellIndex(0x824b9ffffffffff));

  // San Francisco City Hall at res 5 and 10.
  let sf = latlng_from_degs(37.779265, -122.419277);
  assert_eq!(geo_to_cell(sf, 5).unwrap(), CellIndex(0x85283083fffffff));
  assert_eq!(geo_to_cell(sf, 10).unwrap(), CellIndex(0x8a2830828767fff));
}

#[test]
fn poles_index_to_expected_cells() {
  let north = latlng_from_degs(90.0, 0.0);
  assert_eq!(geo_to_cell(north, 0).unwrap(), CellIndex(0x8001fffffffffff));
  assert_eq!(geo_to_cell(north, 3).unwrap(), CellIndex(0x830326fffffffff));

  // The south pole lands in polar pentagon base cell 117.
  let south = latlng_from_degs(-90.0, 0.0);
  let cell = geo_to_cell(south, 0).unwrap();
  assert_eq!(cell.base_cell(), 117);
  assert!(cell.is_pentagon());
  assert_eq!(geo_to_cell(south, 4).unwrap(), CellIndex(0x84f2939ffffffff));
}

#[test]
fn california_res5_center() {
  let center = cell_to_geo(CellIndex(0x85283473fffffff)).unwrap();
  assert!((rads_to_degs(center.lat) - 37.345).abs() < 1e-2);
  assert!((rads_to_degs(center.lng) - -121.976).abs() < 1e-2);
  // The center must re-index to the same cell.
  assert_eq!(geo_to_cell(center, 5).unwrap(), CellIndex(0x85283473fffffff));
}

#[test]
fn known_center_point() {
  let center = cell_to_geo(CellIndex(0x8928342e20fffff)).unwrap();
  assert!((rads_to_degs(center.lat) - 37.5012466151).abs() < 1e-9);
  assert!((rads_to_degs(center.lng) - -122.5003039349).abs() < 1e-9);
}

#[test]
fn california_res5_boundary_is_a_hexagon() {
  let cell = CellIndex(0x85283473fffffff);
  let boundary = cell_to_boundary(cell).unwrap();
  assert_eq!(boundary.num_verts, 6);

  // Every vertex stays near the center (the circumradius of a cell is
  // on the order of its edge length).
  let center = cell_to_geo(cell).unwrap();
  let limit = 2.0 * MAX_EDGE_LENGTH_RADS[5];
  for v in boundary.verts() {
    let d = great_circle_distance_rads(center, *v);
    assert!(d < limit, "vertex {d} rads from center exceeds {limit}");
  }
}

#[test]
fn pentagon_base_cell_boundary_has_five_verts() {
  let boundary = cell_to_boundary(CellIndex(0x801dfffffffffff)).unwrap();
  assert_eq!(boundary.num_verts, 5);
}

#[test]
fn fine_resolution_field_accessors() {
  let cell = CellIndex(0x8f283473fffffff);
  assert!(cell.is_valid_cell());
  assert_eq!(cell.resolution(), 15);
  assert_eq!(cell.base_cell(), 20);
}

#[test]
fn roundtrip_across_the_globe() {
  for res in [0, 1, 2, 5, 8] {
    for lat_deg in (-80..=80).step_by(20) {
      for lng_deg in (-170..=170).step_by(35) {
        let geo = latlng_from_degs(f64::from(lat_deg), f64::from(lng_deg));
        let cell = geo_to_cell(geo, res).unwrap();
        assert!(cell.is_valid_cell(), "({lat_deg},{lng_deg}) res {res}");

        let center = cell_to_geo(cell).unwrap();
        let again = geo_to_cell(center, res).unwrap();
        assert_eq!(again, cell, "roundtrip at ({lat_deg},{lng_deg}) res {res}");
      }
    }
  }
}

#[test]
fn boundary_edges_are_short() {
  // Consecutive boundary vertices span at most twice the maximum edge
  // length for the resolution.
  for res in [0, 1, 2, 3, 6] {
    for lat_deg in [-60, -15, 0, 40, 75] {
      for lng_deg in [-150, -60, 0, 90, 165] {
        let geo = latlng_from_degs(f64::from(lat_deg), f64::from(lng_deg));
        let cell = geo_to_cell(geo, res).unwrap();
        let boundary = cell_to_boundary(cell).unwrap();
        let limit = 2.0 * MAX_EDGE_LENGTH_RADS[res as usize];

        let verts = boundary.verts();
        for w in 0..verts.len() {
          let a = verts[w];
          let b = verts[(w + 1) % verts.len()];
          let d = great_circle_distance_rads(a, b);
          assert!(
            d <= limit,
            "res {res} at ({lat_deg},{lng_deg}): edge {w} spans {d} > {limit}"
          );
        }
      }
    }
  }
}

#[test]
fn class_iii_pentagons_have_distortion_vertices() {
  // At odd resolutions every pentagon edge crosses an icosahedron
  // edge, doubling the vertex count.
  for pent in icogrid::pentagons(1).unwrap() {
    let boundary = cell_to_boundary(pent).unwrap();
    assert_eq!(boundary.num_verts, 10, "pentagon {pent} at res 1");
  }
  for pent in icogrid::pentagons(2).unwrap() {
    let boundary = cell_to_boundary(pent).unwrap();
    assert_eq!(boundary.num_verts, 5, "pentagon {pent} at res 2");
  }
}

#[test]
fn null_cell_is_rejected_everywhere() {
  assert_eq!(cell_to_geo(icogrid::NULL_CELL), Err(GridError::InvalidCell));
  assert_eq!(cell_to_boundary(icogrid::NULL_CELL), Err(GridError::InvalidCell));
}

#[test]
fn canonical_string_form() {
  let cell = CellIndex(0x8075fffffffffff);
  assert_eq!(cell.to_string(), "8075fffffffffff");
  assert_eq!("8075fffffffffff".parse::<CellIndex>().unwrap(), cell);
  // Leading zeros are preserved to width 15.
  assert_eq!(format!("{}", CellIndex(0xff)).len(), 15);
}
