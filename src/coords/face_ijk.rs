//! Face-qualified grid coordinates: overage adjustment across
//! icosahedron faces, substrate vertex generation, and cell boundary
//! construction.
//!
//! A cell belongs to a home face, but its lattice coordinates can land
//! outside that face's triangle ("overage"). The face-neighbor table
//! carries, for each face and each of its three edge quadrants, the
//! adjacent face plus the translation and number of 60° CCW rotations
//! aligning the two coordinate systems.

use crate::constants::{MAX_RES, M_SQRT3_2, NUM_HEX_VERTS, NUM_ICOSA_FACES, NUM_PENT_VERTS};
use crate::index::is_class_iii;
use crate::math::vec2d::intersect;
use crate::projection::hex2d_to_geo;
use crate::types::{CellBoundary, CoordIjk, FaceIjk, Vec2d};

/// Result of an overage adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Overage {
  /// The coordinates lie inside the home face.
  None,
  /// The coordinates lie exactly on a shared face edge (substrate
  /// grids only).
  FaceEdge,
  /// The coordinates were moved onto a new face.
  NewFace,
}

// Quadrant indexes into a face's neighbor record.
pub(crate) const IJ: usize = 1;
pub(crate) const KI: usize = 2;
pub(crate) const JK: usize = 3;

/// Orientation of an adjacent face's coordinate system relative to the
/// current face.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FaceOrient {
  /// The neighboring face.
  pub(crate) face: i32,
  /// Res 0 translation relative to the primary face.
  pub(crate) translate: CoordIjk,
  /// Number of 60 degree CCW rotations relative to the primary face.
  pub(crate) ccw_rot60: i32,
}

const fn orient(face: i32, i: i32, j: i32, k: i32, ccw_rot60: i32) -> FaceOrient {
  FaceOrient {
    face,
    translate: CoordIjk::new(i, j, k),
    ccw_rot60,
  }
}

/// For each face: itself, then its ij, ki and jk quadrant neighbors.
#[rustfmt::skip]
pub(crate) const FACE_NEIGHBORS: [[FaceOrient; 4]; NUM_ICOSA_FACES as usize] = [
  [orient(0, 0, 0, 0, 0), orient(4, 2, 0, 2, 1), orient(1, 2, 2, 0, 5), orient(5, 0, 2, 2, 3)],    // face 0
  [orient(1, 0, 0, 0, 0), orient(0, 2, 0, 2, 1), orient(2, 2, 2, 0, 5), orient(6, 0, 2, 2, 3)],    // face 1
  [orient(2, 0, 0, 0, 0), orient(1, 2, 0, 2, 1), orient(3, 2, 2, 0, 5), orient(7, 0, 2, 2, 3)],    // face 2
  [orient(3, 0, 0, 0, 0), orient(2, 2, 0, 2, 1), orient(4, 2, 2, 0, 5), orient(8, 0, 2, 2, 3)],    // face 3
  [orient(4, 0, 0, 0, 0), orient(3, 2, 0, 2, 1), orient(0, 2, 2, 0, 5), orient(9, 0, 2, 2, 3)],    // face 4
  [orient(5, 0, 0, 0, 0), orient(10, 2, 2, 0, 3), orient(14, 2, 0, 2, 3), orient(0, 0, 2, 2, 3)],  // face 5
  [orient(6, 0, 0, 0, 0), orient(11, 2, 2, 0, 3), orient(10, 2, 0, 2, 3), orient(1, 0, 2, 2, 3)],  // face 6
  [orient(7, 0, 0, 0, 0), orient(12, 2, 2, 0, 3), orient(11, 2, 0, 2, 3), orient(2, 0, 2, 2, 3)],  // face 7
  [orient(8, 0, 0, 0, 0), orient(13, 2, 2, 0, 3), orient(12, 2, 0, 2, 3), orient(3, 0, 2, 2, 3)],  // face 8
  [orient(9, 0, 0, 0, 0), orient(14, 2, 2, 0, 3), orient(13, 2, 0, 2, 3), orient(4, 0, 2, 2, 3)],  // face 9
  [orient(10, 0, 0, 0, 0), orient(5, 2, 2, 0, 3), orient(6, 2, 0, 2, 3), orient(15, 0, 2, 2, 3)],  // face 10
  [orient(11, 0, 0, 0, 0), orient(6, 2, 2, 0, 3), orient(7, 2, 0, 2, 3), orient(16, 0, 2, 2, 3)],  // face 11
  [orient(12, 0, 0, 0, 0), orient(7, 2, 2, 0, 3), orient(8, 2, 0, 2, 3), orient(17, 0, 2, 2, 3)],  // face 12
  [orient(13, 0, 0, 0, 0), orient(8, 2, 2, 0, 3), orient(9, 2, 0, 2, 3), orient(18, 0, 2, 2, 3)],  // face 13
  [orient(14, 0, 0, 0, 0), orient(9, 2, 2, 0, 3), orient(5, 2, 0, 2, 3), orient(19, 0, 2, 2, 3)],  // face 14
  [orient(15, 0, 0, 0, 0), orient(16, 2, 0, 2, 1), orient(19, 2, 2, 0, 5), orient(10, 0, 2, 2, 3)],// face 15
  [orient(16, 0, 0, 0, 0), orient(17, 2, 0, 2, 1), orient(15, 2, 2, 0, 5), orient(11, 0, 2, 2, 3)],// face 16
  [orient(17, 0, 0, 0, 0), orient(18, 2, 0, 2, 1), orient(16, 2, 2, 0, 5), orient(12, 0, 2, 2, 3)],// face 17
  [orient(18, 0, 0, 0, 0), orient(19, 2, 0, 2, 1), orient(17, 2, 2, 0, 5), orient(13, 0, 2, 2, 3)],// face 18
  [orient(19, 0, 0, 0, 0), orient(15, 2, 0, 2, 1), orient(18, 2, 2, 0, 5), orient(14, 0, 2, 2, 3)],// face 19
];

/// Direction from an origin face to a destination face, in the origin
/// face's coordinate system, or -1 when the faces are not adjacent.
/// Derived from [`FACE_NEIGHBORS`] so the two tables cannot drift.
pub(crate) const ADJACENT_FACE_DIR: [[i32; NUM_ICOSA_FACES as usize]; NUM_ICOSA_FACES as usize] = {
  let mut dirs = [[-1i32; NUM_ICOSA_FACES as usize]; NUM_ICOSA_FACES as usize];
  let mut f = 0;
  while f < NUM_ICOSA_FACES as usize {
    dirs[f][f] = 0;
    let mut quadrant = 1;
    while quadrant < 4 {
      dirs[f][FACE_NEIGHBORS[f][quadrant].face as usize] = quadrant as i32;
      quadrant += 1;
    }
    f += 1;
  }
  dirs
};

/// Maximum lattice dimension (i + j + k bound) of a face triangle,
/// indexed by Class II resolution. Class III resolutions (odd indexes,
/// -1) are never looked up: overage always works on a Class II grid,
/// which for a Class III cell is the next finer resolution — hence the
/// extra slot at index 16.
#[rustfmt::skip]
pub(crate) const MAX_DIM_BY_CII_RES: [i32; (MAX_RES + 2) as usize] = [
  2, -1, 14, -1, 98, -1, 686, -1, 4802, -1,
  33_614, -1, 235_298, -1, 1_647_086, -1, 11_529_602,
];

/// Grid-unit scale per Class II resolution (7^(res/2)); same indexing
/// rules as [`MAX_DIM_BY_CII_RES`].
#[rustfmt::skip]
pub(crate) const UNIT_SCALE_BY_CII_RES: [i32; (MAX_RES + 2) as usize] = [
  1, -1, 7, -1, 49, -1, 343, -1, 2401, -1,
  16_807, -1, 117_649, -1, 823_543, -1, 5_764_801,
];

/// Reconciles coordinates that may lie outside their home face onto
/// the correct face.
///
/// `res` must be a Class II resolution. `pent_leading_4` flags a
/// pentagonal cell whose leading non-zero digit is on the i axis, which
/// must have the deleted K subsequence rotated out before crossing the
/// KI edge. `substrate` marks coordinates on the ×3 substrate grid.
///
/// A single application suffices off the substrate grid; substrate
/// callers iterate via [`adjust_pent_vert_overage`].
#[must_use]
pub(crate) fn adjust_overage_class_ii(
  fijk: FaceIjk,
  res: i32,
  pent_leading_4: bool,
  substrate: bool,
) -> (FaceIjk, Overage) {
  let mut max_dim = MAX_DIM_BY_CII_RES[res as usize];
  if substrate {
    max_dim *= 3;
  }

  let mut ijk = fijk.coord;
  let sum = ijk.i + ijk.j + ijk.k;

  if substrate && sum == max_dim {
    return (fijk, Overage::FaceEdge);
  }
  if sum <= max_dim {
    return (fijk, Overage::None);
  }

  let face_orient = if ijk.k > 0 {
    if ijk.j > 0 {
      &FACE_NEIGHBORS[fijk.face as usize][JK]
    } else {
      if pent_leading_4 {
        // Rotate out the deleted K subsequence: pivot about the vertex
        // on the i axis.
        let origin = CoordIjk::new(max_dim, 0, 0);
        ijk = ijk.sub(origin).rotate60_cw().add(origin);
      }
      &FACE_NEIGHBORS[fijk.face as usize][KI]
    }
  } else {
    &FACE_NEIGHBORS[fijk.face as usize][IJ]
  };

  for _ in 0..face_orient.ccw_rot60 {
    ijk = ijk.rotate60_ccw();
  }

  let mut unit_scale = UNIT_SCALE_BY_CII_RES[res as usize];
  if substrate {
    unit_scale *= 3;
  }
  ijk = ijk.add(face_orient.translate.scale(unit_scale)).normalize();

  let overage = if substrate && ijk.i + ijk.j + ijk.k == max_dim {
    Overage::FaceEdge
  } else {
    Overage::NewFace
  };
  (FaceIjk::new(face_orient.face, ijk), overage)
}

/// Repeats the overage adjustment for a pentagonal substrate vertex
/// until it stops landing on yet another face.
#[must_use]
pub(crate) fn adjust_pent_vert_overage(fijk: FaceIjk, res: i32) -> (FaceIjk, Overage) {
  let mut current = fijk;
  loop {
    let (adjusted, overage) = adjust_overage_class_ii(current, res, false, true);
    current = adjusted;
    if overage != Overage::NewFace {
      return (current, overage);
    }
  }
}

// Vertex offsets on the Class II substrate grid, CCW.
#[rustfmt::skip]
const HEX_VERTS_CII: [CoordIjk; NUM_HEX_VERTS] = [
  CoordIjk::new(2, 1, 0), CoordIjk::new(1, 2, 0), CoordIjk::new(0, 2, 1),
  CoordIjk::new(0, 1, 2), CoordIjk::new(1, 0, 2), CoordIjk::new(2, 0, 1),
];
// Vertex offsets for a Class III cell, on the next finer Class II
// substrate, CCW.
#[rustfmt::skip]
const HEX_VERTS_CIII: [CoordIjk; NUM_HEX_VERTS] = [
  CoordIjk::new(5, 4, 0), CoordIjk::new(1, 5, 0), CoordIjk::new(0, 5, 4),
  CoordIjk::new(0, 1, 5), CoordIjk::new(4, 0, 5), CoordIjk::new(5, 0, 1),
];
#[rustfmt::skip]
const PENT_VERTS_CII: [CoordIjk; NUM_PENT_VERTS] = [
  CoordIjk::new(2, 1, 0), CoordIjk::new(1, 2, 0), CoordIjk::new(0, 2, 1),
  CoordIjk::new(0, 1, 2), CoordIjk::new(1, 0, 2),
];
#[rustfmt::skip]
const PENT_VERTS_CIII: [CoordIjk; NUM_PENT_VERTS] = [
  CoordIjk::new(5, 4, 0), CoordIjk::new(1, 5, 0), CoordIjk::new(0, 5, 4),
  CoordIjk::new(0, 1, 5), CoordIjk::new(4, 0, 5),
];

/// Carries a cell center onto the vertex substrate: aperture 3
/// followed by its reverse (a ×3 scale with no net rotation), then for
/// Class III resolutions one clockwise aperture-7 step onto the next
/// finer Class II grid.
///
/// Returns the substrate center and the substrate's (Class II)
/// resolution.
fn substrate_center(center: FaceIjk, res: i32) -> (FaceIjk, i32) {
  let mut coord = center.coord.down_ap3().down_ap3r();
  let mut adj_res = res;
  if is_class_iii(res) {
    coord = coord.down_ap7r();
    adj_res += 1;
  }
  (FaceIjk::new(center.face, coord), adj_res)
}

/// The six cell vertices as substrate coordinates on the center's
/// face, plus the substrate center and resolution.
pub(crate) fn cell_verts(center: FaceIjk, res: i32) -> (FaceIjk, i32, [FaceIjk; NUM_HEX_VERTS]) {
  let offsets = if is_class_iii(res) { &HEX_VERTS_CIII } else { &HEX_VERTS_CII };
  let (sub, adj_res) = substrate_center(center, res);
  let verts = offsets.map(|o| FaceIjk::new(sub.face, sub.coord.add(o).normalize()));
  (sub, adj_res, verts)
}

/// The five pentagon vertices as substrate coordinates on the center's
/// face, plus the substrate center and resolution.
pub(crate) fn pent_verts(center: FaceIjk, res: i32) -> (FaceIjk, i32, [FaceIjk; NUM_PENT_VERTS]) {
  let offsets = if is_class_iii(res) { &PENT_VERTS_CIII } else { &PENT_VERTS_CII };
  let (sub, adj_res) = substrate_center(center, res);
  let verts = offsets.map(|o| FaceIjk::new(sub.face, sub.coord.add(o).normalize()));
  (sub, adj_res, verts)
}

/// The face-plane endpoints of the icosahedron edge separating
/// `center_face` from `other_face`, on the substrate grid at `adj_res`.
fn face_edge(center_face: i32, other_face: i32, adj_res: i32) -> (Vec2d, Vec2d) {
  let max_dim = f64::from(MAX_DIM_BY_CII_RES[adj_res as usize]);
  let v0 = Vec2d::new(3.0 * max_dim, 0.0);
  let v1 = Vec2d::new(-1.5 * max_dim, 3.0 * M_SQRT3_2 * max_dim);
  let v2 = Vec2d::new(-1.5 * max_dim, -3.0 * M_SQRT3_2 * max_dim);

  match ADJACENT_FACE_DIR[center_face as usize][other_face as usize] {
    d if d == IJ as i32 => (v0, v1),
    d if d == JK as i32 => (v1, v2),
    d => {
      // A boundary crossing between non-adjacent faces means the
      // lookup tables are corrupt.
      debug_assert!(d == KI as i32, "boundary crossed between non-adjacent faces");
      (v2, v0)
    }
  }
}

/// The boundary of the hexagonal cell centered at `h`, walking
/// `length` vertices starting from vertex `start`.
///
/// On Class III resolutions a cell edge can cross an icosahedron edge;
/// each half of such an edge projects through a different face plane,
/// so the crossing point is emitted as a synthetic vertex. A crossing
/// that coincides with a cell vertex is suppressed. Class II cells
/// place vertices on the face edge and never need synthetic ones.
pub(crate) fn cell_boundary(h: FaceIjk, res: i32, start: usize, length: usize) -> CellBoundary {
  let (center, adj_res, verts) = cell_verts(h, res);

  // One extra loop step tests the closing edge for a crossing.
  let extra = usize::from(length == NUM_HEX_VERTS);

  let mut g = CellBoundary::default();
  let mut last_face = -1;
  let mut last_overage = Overage::None;

  for vert in start..start + length + extra {
    let v = vert % NUM_HEX_VERTS;

    let (fijk, overage) = adjust_overage_class_ii(verts[v], adj_res, false, true);

    if is_class_iii(res) && vert > start && fijk.face != last_face && last_overage != Overage::FaceEdge {
      // Intersect the edge between the two original (pre-adjustment)
      // vertices with the face edge, in the center face's plane.
      let last_v = (v + NUM_HEX_VERTS - 1) % NUM_HEX_VERTS;
      let orig0 = verts[last_v].coord.to_hex2d();
      let orig1 = verts[v].coord.to_hex2d();

      let other_face = if last_face == center.face { fijk.face } else { last_face };
      let (edge0, edge1) = face_edge(center.face, other_face, adj_res);

      let inter = intersect(orig0, orig1, edge0, edge1);
      // A crossing exactly at a cell vertex means both adjacent edge
      // halves already lie on single faces.
      let at_vertex = orig0.exactly_equals(inter) || orig1.exactly_equals(inter);
      if !at_vertex {
        g.push(hex2d_to_geo(inter, center.face, adj_res, true));
      }
    }

    if vert < start + length {
      g.push(hex2d_to_geo(fijk.coord.to_hex2d(), fijk.face, adj_res, true));
    }

    last_face = fijk.face;
    last_overage = overage;
  }
  g
}

/// The boundary of the pentagonal cell centered at `h`.
///
/// Every Class III pentagon edge crosses an icosahedron edge, so a
/// synthetic vertex is always emitted between consecutive vertices
/// (no coincidence suppression). The crossing is measured and
/// projected on the pentagon's original home face, like the hexagon
/// case; the current vertex is pulled into that face's frame through
/// the face-neighbor record before intersecting.
pub(crate) fn pent_boundary(h: FaceIjk, res: i32, start: usize, length: usize) -> CellBoundary {
  let (center, adj_res, verts) = pent_verts(h, res);

  let extra = usize::from(length == NUM_PENT_VERTS);

  let mut g = CellBoundary::default();
  let mut last_fijk = FaceIjk::default();

  for vert in start..start + length + extra {
    let v = vert % NUM_PENT_VERTS;

    let (fijk, _) = adjust_pent_vert_overage(verts[v], adj_res);

    if is_class_iii(res) && vert > start {
      let other_face = if last_fijk.face == center.face { fijk.face } else { last_fijk.face };

      // Translate the current vertex into the crossed edge's frame on
      // the home face.
      let edge_dir = ADJACENT_FACE_DIR[center.face as usize][other_face as usize];
      let face_orient = &FACE_NEIGHBORS[center.face as usize][edge_dir as usize];

      let mut ijk = fijk.coord;
      for _ in 0..face_orient.ccw_rot60 {
        ijk = ijk.rotate60_ccw();
      }
      let trans = face_orient
        .translate
        .scale(UNIT_SCALE_BY_CII_RES[adj_res as usize] * 3);
      let orig1 = ijk.add(trans).normalize().to_hex2d();
      let orig0 = last_fijk.coord.to_hex2d();

      let (edge0, edge1) = face_edge(center.face, other_face, adj_res);
      let inter = intersect(orig0, orig1, edge0, edge1);
      g.push(hex2d_to_geo(inter, center.face, adj_res, true));
    }

    if vert < start + length {
      g.push(hex2d_to_geo(fijk.coord.to_hex2d(), fijk.face, adj_res, true));
    }

    last_fijk = fijk;
  }
  g
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn adjacent_face_dir_is_consistent_with_neighbors() {
    for f in 0..NUM_ICOSA_FACES as usize {
      assert_eq!(ADJACENT_FACE_DIR[f][f], 0);
      let mut adjacent = 0;
      for g in 0..NUM_ICOSA_FACES as usize {
        let d = ADJACENT_FACE_DIR[f][g];
        if f != g && d != -1 {
          adjacent += 1;
          assert_eq!(FACE_NEIGHBORS[f][d as usize].face, g as i32);
        }
      }
      assert_eq!(adjacent, 3, "every face has exactly three edge neighbors");
    }
  }

  #[test]
  fn adjacency_is_symmetric() {
    for f in 0..NUM_ICOSA_FACES as usize {
      for g in 0..NUM_ICOSA_FACES as usize {
        let fg = ADJACENT_FACE_DIR[f][g] != -1;
        let gf = ADJACENT_FACE_DIR[g][f] != -1;
        assert_eq!(fg, gf, "adjacency between faces {f} and {g} must be symmetric");
      }
    }
  }

  #[test]
  fn unit_scale_is_powers_of_seven() {
    for r in (0..=16).step_by(2) {
      let expected = 7i32.pow((r / 2) as u32);
      assert_eq!(UNIT_SCALE_BY_CII_RES[r], expected);
    }
  }

  #[test]
  fn max_dim_is_twice_unit_scale() {
    for r in (0..=16).step_by(2) {
      assert_eq!(MAX_DIM_BY_CII_RES[r], 2 * UNIT_SCALE_BY_CII_RES[r]);
    }
  }

  #[test]
  fn no_overage_inside_face() {
    for res in [0, 2, 4] {
      let fijk = FaceIjk::new(7, CoordIjk::new(1, 0, 0));
      let (adjusted, overage) = adjust_overage_class_ii(fijk, res, false, false);
      assert_eq!(overage, Overage::None);
      assert_eq!(adjusted, fijk);
    }
  }

  #[test]
  fn overage_bounds_coordinates() {
    // Points one unit past each face edge: after a single
    // non-substrate adjustment the coordinate sum is back within the
    // face triangle.
    for res in [0, 2, 4] {
      let max_dim = MAX_DIM_BY_CII_RES[res as usize];
      let half = max_dim / 2;
      let over = [
        CoordIjk::new(0, half + 1, half),  // jk edge
        CoordIjk::new(half, 0, half + 1),  // ki edge
        CoordIjk::new(half + 1, half, 0),  // ij edge
      ];
      for ijk in over {
        let fijk = FaceIjk::new(3, ijk);
        let (adjusted, overage) = adjust_overage_class_ii(fijk, res, false, false);
        assert_eq!(overage, Overage::NewFace);
        assert_ne!(adjusted.face, 3, "an adjusted cell must land on a neighbor face");
        let c = adjusted.coord;
        assert!(
          c.i + c.j + c.k <= max_dim,
          "res {res}: {ijk:?} adjusted to {c:?} exceeds {max_dim}"
        );
      }
    }
  }

  #[test]
  fn pent_vert_overage_terminates_off_new_face() {
    let max_dim = MAX_DIM_BY_CII_RES[2] * 3;
    let fijk = FaceIjk::new(0, CoordIjk::new(max_dim + 5, 0, 2).normalize());
    let (adjusted, overage) = adjust_pent_vert_overage(fijk, 2);
    assert_ne!(overage, Overage::NewFace);
    let c = adjusted.coord;
    assert!(c.i + c.j + c.k <= max_dim);
  }

  #[test]
  fn substrate_center_scales_by_three() {
    let center = FaceIjk::new(2, CoordIjk::new(1, 0, 0));
    let (sub, adj_res) = substrate_center(center, 0);
    assert_eq!(adj_res, 0);
    assert_eq!(sub.coord, CoordIjk::new(3, 0, 0));
    assert_eq!(sub.face, 2);
  }

  #[test]
  fn substrate_center_class_iii_drops_to_finer_class_ii() {
    let center = FaceIjk::new(2, CoordIjk::new(1, 0, 0));
    let (_, adj_res) = substrate_center(center, 1);
    assert_eq!(adj_res, 2);
  }

  #[test]
  fn hex_cell_at_face_center_has_six_plain_verts() {
    // A cell well inside its face: no overage, no synthetic vertices.
    let center = FaceIjk::new(0, CoordIjk::new(0, 0, 0));
    let b = cell_boundary(center, 0, 0, NUM_HEX_VERTS);
    assert_eq!(b.num_verts, NUM_HEX_VERTS);
  }

  #[test]
  fn vertex_offsets_are_normalized() {
    for v in HEX_VERTS_CII.iter().chain(HEX_VERTS_CIII.iter()) {
      assert_eq!(v.normalize(), *v);
    }
    for (cii, ciii) in PENT_VERTS_CII.iter().zip(PENT_VERTS_CIII.iter()) {
      assert_eq!(cii.normalize(), *cii);
      assert_eq!(ciii.normalize(), *ciii);
    }
  }
}
