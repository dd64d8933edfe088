//! The 64-bit packed cell index: bit-field accessors, digit
//! rotations, validity, and the conversions to and from face
//! coordinates.

use std::fmt;
use std::str::FromStr;

use crate::base_cells::{
  base_cell_at, base_cell_home, base_cell_is_cw_offset, is_base_cell_pentagon, MAX_FACE_COORD,
};
use crate::constants::{
  BASE_CELL_MASK, BASE_CELL_OFFSET, CELL_MODE, DIGIT_MASK, HIGH_BIT_MASK, INDEX_INIT, MAX_RES, MODE_MASK, MODE_OFFSET,
  NUM_BASE_CELLS, PER_DIGIT_OFFSET, RESERVED_MASK, RESERVED_OFFSET, RES_MASK, RES_OFFSET,
};
use crate::coords::face_ijk::{adjust_overage_class_ii, Overage};
use crate::types::{CellIndex, Direction, FaceIjk, GridError, NULL_CELL};

/// Whether a resolution uses the Class III (rotated) axis orientation.
/// Odd resolutions are Class III, even are Class II.
#[inline]
#[must_use]
pub(crate) const fn is_class_iii(res: i32) -> bool {
  res % 2 == 1
}

impl CellIndex {
  /// The index mode field.
  #[inline]
  #[must_use]
  pub(crate) const fn mode(self) -> u8 {
    ((self.0 & MODE_MASK) >> MODE_OFFSET) as u8
  }

  #[inline]
  #[must_use]
  pub(crate) const fn with_mode(self, mode: u8) -> CellIndex {
    CellIndex((self.0 & !MODE_MASK) | ((mode as u64) << MODE_OFFSET))
  }

  /// The resolution of the cell, 0–15.
  #[inline]
  #[must_use]
  pub const fn resolution(self) -> i32 {
    ((self.0 & RES_MASK) >> RES_OFFSET) as i32
  }

  #[inline]
  #[must_use]
  pub(crate) const fn with_resolution(self, res: i32) -> CellIndex {
    CellIndex((self.0 & !RES_MASK) | ((res as u64) << RES_OFFSET))
  }

  /// The base cell number, 0–121 for a valid cell.
  #[inline]
  #[must_use]
  pub const fn base_cell(self) -> i32 {
    ((self.0 & BASE_CELL_MASK) >> BASE_CELL_OFFSET) as i32
  }

  #[inline]
  #[must_use]
  pub(crate) const fn with_base_cell(self, base_cell: i32) -> CellIndex {
    CellIndex((self.0 & !BASE_CELL_MASK) | ((base_cell as u64) << BASE_CELL_OFFSET))
  }

  /// The reserved bits; zero on a valid cell.
  #[inline]
  #[must_use]
  pub(crate) const fn reserved(self) -> u8 {
    ((self.0 & RESERVED_MASK) >> RESERVED_OFFSET) as u8
  }

  /// The reserved high bit; zero on a valid cell.
  #[inline]
  #[must_use]
  pub(crate) const fn high_bit(self) -> u8 {
    ((self.0 & HIGH_BIT_MASK) >> 63) as u8
  }

  /// The digit at resolution `r`, `1 <= r <= 15`.
  #[inline]
  #[must_use]
  pub(crate) const fn digit(self, r: i32) -> Direction {
    Direction::from_bits(self.0 >> ((MAX_RES - r) as u64 * PER_DIGIT_OFFSET as u64))
  }

  #[inline]
  #[must_use]
  pub(crate) const fn with_digit(self, r: i32, digit: Direction) -> CellIndex {
    let shift = (MAX_RES - r) as u64 * PER_DIGIT_OFFSET as u64;
    CellIndex((self.0 & !(DIGIT_MASK << shift)) | ((digit as u64) << shift))
  }

  /// A cell index at `res` under `base_cell` with every resolution
  /// digit set to `digit`.
  #[must_use]
  pub(crate) fn init(res: i32, base_cell: i32, digit: Direction) -> CellIndex {
    let mut h = CellIndex(INDEX_INIT)
      .with_mode(CELL_MODE)
      .with_resolution(res)
      .with_base_cell(base_cell);
    for r in 1..=res {
      h = h.with_digit(r, digit);
    }
    h
  }

  /// The coarsest non-center digit, or `Center` when all digits are
  /// center (the cell sits on its base cell's center axis).
  #[must_use]
  pub(crate) fn leading_non_zero_digit(self) -> Direction {
    for r in 1..=self.resolution() {
      let digit = self.digit(r);
      if digit != Direction::Center {
        return digit;
      }
    }
    Direction::Center
  }

  /// Rotates the cell 60 degrees counter-clockwise by permuting every
  /// digit.
  #[must_use]
  pub(crate) fn rotate60_ccw(self) -> CellIndex {
    let mut h = self;
    let res = h.resolution();
    for r in 1..=res {
      h = h.with_digit(r, h.digit(r).rotate60_ccw());
    }
    h
  }

  /// Rotates the cell 60 degrees clockwise by permuting every digit.
  #[must_use]
  pub(crate) fn rotate60_cw(self) -> CellIndex {
    let mut h = self;
    let res = h.resolution();
    for r in 1..=res {
      h = h.with_digit(r, h.digit(r).rotate60_cw());
    }
    h
  }

  /// Rotates the cell 60 degrees counter-clockwise about a pentagonal
  /// center, applying an extra rotation when the leading digit lands
  /// on the deleted K axis.
  #[must_use]
  pub(crate) fn rotate_pent60_ccw(self) -> CellIndex {
    let mut h = self;
    let res = h.resolution();
    let mut found_first_non_zero = false;
    for r in 1..=res {
      h = h.with_digit(r, h.digit(r).rotate60_ccw());

      if !found_first_non_zero && h.digit(r) != Direction::Center {
        found_first_non_zero = true;
        if h.leading_non_zero_digit() == Direction::K {
          h = h.rotate60_ccw();
        }
      }
    }
    h
  }

  /// Clockwise counterpart of [`CellIndex::rotate_pent60_ccw`].
  #[must_use]
  pub(crate) fn rotate_pent60_cw(self) -> CellIndex {
    let mut h = self;
    let res = h.resolution();
    let mut found_first_non_zero = false;
    for r in 1..=res {
      h = h.with_digit(r, h.digit(r).rotate60_cw());

      if !found_first_non_zero && h.digit(r) != Direction::Center {
        found_first_non_zero = true;
        if h.leading_non_zero_digit() == Direction::K {
          h = h.rotate60_cw();
        }
      }
    }
    h
  }

  /// Whether this index is a well-formed cell: mode and reserved
  /// fields correct, base cell in range, used digits valid, unused
  /// digits blanked, and no leading K digit under a pentagon.
  #[must_use]
  pub fn is_valid_cell(self) -> bool {
    if self.high_bit() != 0 || self.mode() != CELL_MODE || self.reserved() != 0 {
      return false;
    }

    let base_cell = self.base_cell();
    if !(0..NUM_BASE_CELLS).contains(&base_cell) {
      return false;
    }

    let res = self.resolution();
    for r in 1..=res {
      if self.digit(r) == Direction::Invalid {
        return false;
      }
    }
    for r in (res + 1)..=MAX_RES {
      if self.digit(r) != Direction::Invalid {
        return false;
      }
    }

    if is_base_cell_pentagon(base_cell) && self.leading_non_zero_digit() == Direction::K {
      return false;
    }

    true
  }

  /// Whether this index is a pentagonal cell: a pentagon base cell
  /// with a purely centered digit path.
  #[must_use]
  pub fn is_pentagon(self) -> bool {
    self.is_valid_cell()
      && is_base_cell_pentagon(self.base_cell())
      && self.leading_non_zero_digit() == Direction::Center
  }

  /// Whether this cell's resolution uses the Class III orientation.
  #[must_use]
  pub fn is_res_class_iii(self) -> bool {
    is_class_iii(self.resolution())
  }
}

/// Renders the canonical textual form: 15 lowercase hex digits with
/// leading zeros preserved.
impl fmt::Display for CellIndex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:015x}", self.0)
  }
}

impl FromStr for CellIndex {
  type Err = GridError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    u64::from_str_radix(s, 16).map(CellIndex).map_err(|_| GridError::ParseFailed)
  }
}

/// The res 0 cell index for a base cell number.
#[must_use]
pub(crate) fn base_cell_to_cell(base_cell: i32) -> CellIndex {
  if (0..NUM_BASE_CELLS).contains(&base_cell) {
    CellIndex::init(0, base_cell, Direction::Center)
  } else {
    NULL_CELL
  }
}

/// All 122 res 0 cells in base cell order.
#[must_use]
pub fn res0_cells() -> Vec<CellIndex> {
  (0..NUM_BASE_CELLS).map(base_cell_to_cell).collect()
}

/// Encodes face coordinates at `res` into a cell index, or
/// [`NULL_CELL`] when the coordinates do not identify a cell (out of
/// range for any base cell).
pub(crate) fn face_ijk_to_cell(fijk: FaceIjk, res: i32) -> CellIndex {
  let mut h = CellIndex(INDEX_INIT).with_mode(CELL_MODE).with_resolution(res);

  if res == 0 {
    let Some((base_cell, _)) = base_cell_at(fijk) else {
      return NULL_CELL;
    };
    return h.with_base_cell(base_cell);
  }

  // Walk from the finest resolution up to the base cell, recording at
  // each step which child the previous coordinates were.
  let mut coord = fijk.coord;
  for r in (1..=res).rev() {
    let last = coord;
    let last_center;
    if is_class_iii(r) {
      coord = coord.up_ap7();
      last_center = coord.down_ap7();
    } else {
      coord = coord.up_ap7r();
      last_center = coord.down_ap7r();
    }

    let digit = last.sub(last_center).normalize().unit_digit();
    if digit == Direction::Invalid {
      return NULL_CELL;
    }
    h = h.with_digit(r, digit);
  }

  let bc_fijk = FaceIjk::new(fijk.face, coord);
  if coord.i > MAX_FACE_COORD || coord.j > MAX_FACE_COORD || coord.k > MAX_FACE_COORD {
    return NULL_CELL;
  }
  let Some((base_cell, num_rots)) = base_cell_at(bc_fijk) else {
    return NULL_CELL;
  };
  h = h.with_base_cell(base_cell);

  if is_base_cell_pentagon(base_cell) {
    // The deleted K subsequence must be rotated out; the direction
    // depends on which side of the pentagon this face sits.
    if h.leading_non_zero_digit() == Direction::K {
      h = if base_cell_is_cw_offset(base_cell, bc_fijk.face) {
        h.rotate60_cw()
      } else {
        h.rotate60_ccw()
      };
    }
    for _ in 0..num_rots {
      h = h.rotate_pent60_ccw();
    }
  } else {
    for _ in 0..num_rots {
      h = h.rotate60_ccw();
    }
  }

  h
}

/// Applies a cell's digits to its base cell's home coordinates,
/// yielding the cell's position as if the whole path stayed on the
/// home face. Returns the position and whether overage onto another
/// face is possible at all.
fn to_face_ijk_on_home_face(h: CellIndex, home: FaceIjk) -> (FaceIjk, bool) {
  let res = h.resolution();
  let mut coord = home.coord;

  // A hexagon anchored at its face center can never leave the face.
  let home_is_center = coord.i == 0 && coord.j == 0 && coord.k == 0;
  let possible_overage = is_base_cell_pentagon(h.base_cell()) || (res != 0 && !home_is_center);

  for r in 1..=res {
    if is_class_iii(r) {
      coord = coord.down_ap7();
    } else {
      coord = coord.down_ap7r();
    }
    coord = coord.neighbor(h.digit(r));
  }

  (FaceIjk::new(home.face, coord), possible_overage)
}

/// Decodes a cell index into face coordinates at its own resolution,
/// applying overage adjustment so the result lies within its face.
pub(crate) fn cell_to_face_ijk(h: CellIndex) -> Result<FaceIjk, GridError> {
  let base_cell = h.base_cell();
  if !(0..NUM_BASE_CELLS).contains(&base_cell) {
    return Err(GridError::InvalidCell);
  }

  // All of pentagon sub-sequence 5 is adjusted to avoid the deleted
  // K axis (part of sub-sequence 4 is handled below).
  let mut h = h;
  if is_base_cell_pentagon(base_cell) && h.leading_non_zero_digit() == Direction::Ik {
    h = h.rotate60_cw();
  }

  let (mut fijk, possible_overage) = to_face_ijk_on_home_face(h, base_cell_home(base_cell));
  if !possible_overage {
    return Ok(fijk);
  }

  let orig_coord = fijk.coord;

  // Overage always works on a Class II grid; drop a Class III cell
  // into the next finer Class II grid first.
  let res = h.resolution();
  let mut adj_res = res;
  if is_class_iii(res) {
    fijk.coord = fijk.coord.down_ap7r();
    adj_res += 1;
  }

  let pent_leading_4 = is_base_cell_pentagon(base_cell) && h.leading_non_zero_digit() == Direction::I;

  let (adjusted, overage) = adjust_overage_class_ii(fijk, adj_res, pent_leading_4, false);
  fijk = adjusted;

  if overage != Overage::None {
    // A pentagon can overflow across more than one face.
    if is_base_cell_pentagon(base_cell) {
      loop {
        let (again, next_overage) = adjust_overage_class_ii(fijk, adj_res, false, false);
        fijk = again;
        if next_overage == Overage::None {
          break;
        }
      }
    }
    if adj_res != res {
      fijk.coord = fijk.coord.up_ap7r();
    }
  } else if adj_res != res {
    fijk.coord = orig_coord;
  }

  Ok(fijk)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::CoordIjk;

  #[test]
  fn bit_fields_roundtrip() {
    let mut h = CellIndex(0);
    for mode in 0..=15 {
      h = h.with_mode(mode);
      assert_eq!(h.mode(), mode);
    }
    for res in 0..=MAX_RES {
      h = h.with_resolution(res);
      assert_eq!(h.resolution(), res);
    }
    for base_cell in 0..NUM_BASE_CELLS {
      h = h.with_base_cell(base_cell);
      assert_eq!(h.base_cell(), base_cell);
    }
    h = h.with_resolution(MAX_RES);
    for r in 1..=MAX_RES {
      for digit in Direction::VALID {
        h = h.with_digit(r, digit);
        assert_eq!(h.digit(r), digit);
      }
    }
  }

  #[test]
  fn init_sets_digits_and_blanks_the_tail() {
    let h = CellIndex::init(5, 12, Direction::K);
    assert_eq!(h.resolution(), 5);
    assert_eq!(h.base_cell(), 12);
    assert_eq!(h.mode(), CELL_MODE);
    for r in 1..=5 {
      assert_eq!(h.digit(r), Direction::K);
    }
    for r in 6..=MAX_RES {
      assert_eq!(h.digit(r), Direction::Invalid);
    }
    assert_eq!(h.0, 0x85184927fffffff);
  }

  #[test]
  fn leading_non_zero_digit_scans_coarse_to_fine() {
    let h = CellIndex::init(5, 0, Direction::Center);
    assert_eq!(h.leading_non_zero_digit(), Direction::Center);
    let h = h.with_digit(3, Direction::J);
    assert_eq!(h.leading_non_zero_digit(), Direction::J);
    let h = h.with_digit(1, Direction::Ik);
    assert_eq!(h.leading_non_zero_digit(), Direction::Ik);
  }

  #[test]
  fn index_rotations_permute_digits() {
    let h_i = CellIndex::init(1, 0, Direction::I);
    assert_eq!(h_i.rotate60_ccw(), CellIndex::init(1, 0, Direction::Ij));
    assert_eq!(h_i.rotate60_cw(), CellIndex::init(1, 0, Direction::Ik));

    let mut h = h_i;
    for _ in 0..6 {
      h = h.rotate60_ccw();
    }
    assert_eq!(h, h_i, "six CCW rotations are the identity");
  }

  #[test]
  fn pent_rotation_skips_the_deleted_axis() {
    // Rotating a J child CCW about a pentagon gives the Jk child; no K
    // correction fires because Jk is not the deleted axis.
    let h_j = CellIndex::init(1, 14, Direction::J);
    assert_eq!(h_j.rotate_pent60_ccw(), CellIndex::init(1, 14, Direction::Jk));

    // Rotating the Jk child CCW would land on K; the extra rotation
    // carries it through to Ik.
    let h_jk = CellIndex::init(1, 14, Direction::Jk);
    assert_eq!(h_jk.rotate_pent60_ccw(), CellIndex::init(1, 14, Direction::Ik));
  }

  #[test]
  fn validity_checks_mode_and_digits() {
    let valid = CellIndex(0x85283473fffffff);
    assert!(valid.is_valid_cell());

    assert!(!NULL_CELL.is_valid_cell(), "NULL is not a cell");
    assert!(!valid.with_mode(0).is_valid_cell(), "mode 0 is invalid");
    assert!(!valid.with_mode(2).is_valid_cell(), "edge mode is not a cell");
    assert!(!valid.with_base_cell(122).is_valid_cell(), "base cell out of range");
    assert!(
      !valid.with_digit(3, Direction::Invalid).is_valid_cell(),
      "used digit slots must hold valid digits"
    );
    assert!(
      !valid.with_digit(9, Direction::Center).is_valid_cell(),
      "unused digit slots must stay blanked"
    );
    assert!(!CellIndex(valid.0 | HIGH_BIT_MASK).is_valid_cell(), "high bit must be zero");
  }

  #[test]
  fn pentagon_leading_k_is_invalid() {
    // Base cell 4 is a pentagon; a leading K digit walks into the
    // deleted subsequence.
    let h = CellIndex::init(1, 4, Direction::K);
    assert!(!h.is_valid_cell());
    let h = CellIndex::init(1, 4, Direction::J);
    assert!(h.is_valid_cell());
  }

  #[test]
  fn pentagon_predicate_requires_centered_path() {
    assert!(base_cell_to_cell(4).is_pentagon());
    assert!(!base_cell_to_cell(0).is_pentagon());
    assert!(!CellIndex::init(2, 4, Direction::J).is_pentagon());
    assert!(CellIndex::init(2, 4, Direction::Center).is_pentagon());
  }

  #[test]
  fn res0_enumeration() {
    let cells = res0_cells();
    assert_eq!(cells.len(), NUM_BASE_CELLS as usize);
    for (b, cell) in cells.iter().enumerate() {
      assert!(cell.is_valid_cell());
      assert_eq!(cell.resolution(), 0);
      assert_eq!(cell.base_cell(), b as i32);
    }
    assert_eq!(cells.iter().filter(|c| c.is_pentagon()).count(), 12);
  }

  #[test]
  fn display_is_fifteen_lowercase_hex_digits() {
    assert_eq!(CellIndex(0x8075fffffffffff).to_string(), "8075fffffffffff");
    assert_eq!(CellIndex(0x1).to_string(), "000000000000001");
    assert_eq!("8075fffffffffff".parse::<CellIndex>(), Ok(CellIndex(0x8075fffffffffff)));
    assert_eq!("zzz".parse::<CellIndex>(), Err(GridError::ParseFailed));
    assert_eq!("".parse::<CellIndex>(), Err(GridError::ParseFailed));
  }

  #[test]
  fn display_roundtrips() {
    for cell in res0_cells() {
      assert_eq!(cell.to_string().parse::<CellIndex>(), Ok(cell));
      assert_eq!(cell.to_string().len(), 15);
    }
  }

  #[test]
  fn face_ijk_res0_roundtrip() {
    // Base cell 16's home is the center of face 0.
    let fijk = FaceIjk::new(0, CoordIjk::new(0, 0, 0));
    let h = face_ijk_to_cell(fijk, 0);
    assert_ne!(h, NULL_CELL);
    assert_eq!(h.base_cell(), 16);
    assert_eq!(cell_to_face_ijk(h).unwrap(), fijk);
  }

  #[test]
  fn face_ijk_out_of_range_is_null() {
    let fijk = FaceIjk::new(0, CoordIjk::new(3, 0, 0));
    assert_eq!(face_ijk_to_cell(fijk, 0), NULL_CELL);
  }

  #[test]
  fn pentagon_home_decodes_to_home_face() {
    // Base cell 4's home is face 0 at (2, 0, 0).
    let h = base_cell_to_cell(4);
    let fijk = cell_to_face_ijk(h).unwrap();
    assert_eq!(fijk, FaceIjk::new(0, CoordIjk::new(2, 0, 0)));
  }
}
