//! Parent/child relationships under aperture-7 refinement.
//!
//! A cell's parent at a coarser resolution is obtained by truncating
//! its digit path; its children extend the path by one digit each.
//! Pentagons skip the deleted K digit, so a pentagonal cell has six
//! direct children instead of seven (and its center child is again a
//! pentagon).

use crate::base_cells::is_base_cell_pentagon;
use crate::constants::MAX_RES;
use crate::index::base_cell_to_cell;
use crate::types::{CellIndex, Direction, GridError};

fn ipow7(exp: i64) -> i64 {
  7i64.pow(exp as u32)
}

/// The parent of `cell` at `parent_res`.
///
/// # Errors
///
/// `InvalidCell` for an invalid index; `ResolutionDomain` for a
/// resolution outside `[0, 15]`; `ResolutionMismatch` when the
/// requested parent is finer than the cell.
pub fn cell_to_parent(cell: CellIndex, parent_res: i32) -> Result<CellIndex, GridError> {
  if !cell.is_valid_cell() {
    return Err(GridError::InvalidCell);
  }
  let child_res = cell.resolution();
  if !(0..=MAX_RES).contains(&parent_res) {
    return Err(GridError::ResolutionDomain);
  }
  if parent_res > child_res {
    return Err(GridError::ResolutionMismatch);
  }
  if parent_res == child_res {
    return Ok(cell);
  }

  let mut parent = cell.with_resolution(parent_res);
  for r in (parent_res + 1)..=child_res {
    parent = parent.with_digit(r, Direction::Invalid);
  }
  Ok(parent)
}

/// The center child of `cell` at `child_res`: the digit path extended
/// with center digits.
///
/// # Errors
///
/// `InvalidCell` for an invalid index; `ResolutionDomain` for a
/// resolution outside `[0, 15]`; `ResolutionMismatch` when the
/// requested child is coarser than the cell.
pub fn cell_to_center_child(cell: CellIndex, child_res: i32) -> Result<CellIndex, GridError> {
  if !cell.is_valid_cell() {
    return Err(GridError::InvalidCell);
  }
  if !(0..=MAX_RES).contains(&child_res) {
    return Err(GridError::ResolutionDomain);
  }
  let parent_res = cell.resolution();
  if child_res < parent_res {
    return Err(GridError::ResolutionMismatch);
  }

  let mut child = cell.with_resolution(child_res);
  for r in (parent_res + 1)..=child_res {
    child = child.with_digit(r, Direction::Center);
  }
  Ok(child)
}

/// The number of children `cell` has at `child_res`. A pentagon's
/// subtree is smaller because every pentagonal cell in it drops its K
/// child.
///
/// # Errors
///
/// Same domain errors as [`cell_to_center_child`].
pub fn cell_to_children_size(cell: CellIndex, child_res: i32) -> Result<i64, GridError> {
  if !cell.is_valid_cell() {
    return Err(GridError::InvalidCell);
  }
  if !(0..=MAX_RES).contains(&child_res) {
    return Err(GridError::ResolutionDomain);
  }
  let n = child_res - cell.resolution();
  if n < 0 {
    return Err(GridError::ResolutionMismatch);
  }

  if cell.is_pentagon() {
    // One pentagonal center path plus five hexagonal subtrees per
    // level: 1 + 5 * (7^n - 1) / 6.
    Ok(1 + 5 * (ipow7(i64::from(n)) - 1) / 6)
  } else {
    Ok(ipow7(i64::from(n)))
  }
}

/// All children of `cell` at `child_res`, in digit order.
///
/// # Errors
///
/// Same domain errors as [`cell_to_children_size`].
pub fn cell_to_children(cell: CellIndex, child_res: i32) -> Result<Vec<CellIndex>, GridError> {
  let size = cell_to_children_size(cell, child_res)?;
  let mut out = Vec::with_capacity(size as usize);
  collect_children(cell, child_res, &mut out);
  debug_assert_eq!(out.len() as i64, size);
  Ok(out)
}

fn collect_children(cell: CellIndex, child_res: i32, out: &mut Vec<CellIndex>) {
  let res = cell.resolution();
  if res == child_res {
    out.push(cell);
    return;
  }

  let skip_k = cell.is_pentagon();
  for digit in Direction::VALID {
    if skip_k && digit == Direction::K {
      continue;
    }
    collect_children(direct_child(cell, digit), child_res, out);
  }
}

/// The direct child of `cell` one resolution finer along `digit`.
fn direct_child(cell: CellIndex, digit: Direction) -> CellIndex {
  let child_res = cell.resolution() + 1;
  cell.with_resolution(child_res).with_digit(child_res, digit)
}

/// The twelve pentagonal cells at a resolution, in base cell order.
///
/// # Errors
///
/// `ResolutionDomain` for a resolution outside `[0, 15]`.
pub fn pentagons(res: i32) -> Result<Vec<CellIndex>, GridError> {
  if !(0..=MAX_RES).contains(&res) {
    return Err(GridError::ResolutionDomain);
  }
  let mut out = Vec::with_capacity(12);
  for base_cell in 0..crate::constants::NUM_BASE_CELLS {
    if is_base_cell_pentagon(base_cell) {
      out.push(cell_to_center_child(base_cell_to_cell(base_cell), res)?);
    }
  }
  Ok(out)
}
