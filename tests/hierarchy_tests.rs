//! Parent/child invariants over the public hierarchy operations.

use icogrid::{
  cell_to_center_child, cell_to_children, cell_to_children_size, cell_to_parent, geo_to_cell, latlng_from_degs,
  pentagons, res0_cells, CellIndex, GridError,
};

#[test]
fn base_cell_census() {
  let cells = res0_cells();
  assert_eq!(cells.len(), 122);
  assert_eq!(cells.iter().filter(|c| c.is_pentagon()).count(), 12);
}

#[test]
fn every_cell_has_exactly_one_parent() {
  for res in [1, 3, 6] {
    for lat in [-70, -20, 10, 55] {
      for lng in [-120, -30, 60, 150] {
        let cell = geo_to_cell(latlng_from_degs(f64::from(lat), f64::from(lng)), res).unwrap();
        let parent = cell_to_parent(cell, res - 1).unwrap();
        assert!(parent.is_valid_cell());

        // The cell appears in its parent's child list exactly once,
        // and in no sibling parent's list.
        let children = cell_to_children(parent, res).unwrap();
        assert_eq!(children.iter().filter(|&&c| c == cell).count(), 1);
      }
    }
  }
}

#[test]
fn child_counts_follow_aperture_seven() {
  let hex = geo_to_cell(latlng_from_degs(35.0, 139.0), 3).unwrap();
  assert!(!hex.is_pentagon());
  assert_eq!(cell_to_children_size(hex, 3).unwrap(), 1);
  assert_eq!(cell_to_children_size(hex, 4).unwrap(), 7);
  assert_eq!(cell_to_children_size(hex, 5).unwrap(), 49);
  assert_eq!(cell_to_children(hex, 4).unwrap().len(), 7);

  let pent = pentagons(0).unwrap()[0];
  assert_eq!(cell_to_children_size(pent, 1).unwrap(), 6);
  assert_eq!(cell_to_children_size(pent, 2).unwrap(), 36);
  assert_eq!(cell_to_children(pent, 1).unwrap().len(), 6);
}

#[test]
fn children_partition_into_valid_distinct_cells() {
  let parent = geo_to_cell(latlng_from_degs(-5.0, 25.0), 2).unwrap();
  let mut children = cell_to_children(parent, 4).unwrap();
  assert_eq!(children.len(), 49);
  for child in &children {
    assert!(child.is_valid_cell());
    assert_eq!(cell_to_parent(*child, 2).unwrap(), parent);
  }
  children.sort_unstable();
  children.dedup();
  assert_eq!(children.len(), 49, "children must be distinct");
}

#[test]
fn pentagon_children_skip_the_deleted_axis() {
  for pent in pentagons(0).unwrap() {
    let children = cell_to_children(pent, 1).unwrap();
    assert_eq!(children.len(), 6);
    for child in &children {
      assert!(child.is_valid_cell());
    }
    assert_eq!(children.iter().filter(|c| c.is_pentagon()).count(), 1);
  }
}

#[test]
fn center_child_is_among_children() {
  let cell = geo_to_cell(latlng_from_degs(48.8, 2.3), 4).unwrap();
  let center = cell_to_center_child(cell, 6).unwrap();
  let children = cell_to_children(cell, 6).unwrap();
  assert!(children.contains(&center));
}

#[test]
fn hierarchy_domain_errors() {
  let cell = geo_to_cell(latlng_from_degs(0.0, 10.0), 5).unwrap();
  assert_eq!(cell_to_parent(cell, 6), Err(GridError::ResolutionMismatch));
  assert_eq!(cell_to_center_child(cell, 4), Err(GridError::ResolutionMismatch));
  assert_eq!(cell_to_children(cell, 4), Err(GridError::ResolutionMismatch));
  assert_eq!(cell_to_parent(CellIndex(0), 0), Err(GridError::InvalidCell));
  assert_eq!(pentagons(16), Err(GridError::ResolutionDomain));
}
