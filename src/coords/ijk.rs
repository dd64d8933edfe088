//! Operations on [`CoordIjk`] lattice coordinates.
//!
//! Every operation returns a new value. Rotations and aperture
//! transforms are expressed by substituting the images of the three
//! unit axes and renormalizing, which keeps each transform a small
//! integer linear map.

use crate::constants::{M_ONESEVENTH, M_RSIN60, M_SQRT3_2};
use crate::types::{CoordIjk, Direction, Vec2d};

/// Unit vectors for the seven cell digits, in digit order.
#[rustfmt::skip]
pub(crate) const UNIT_VECS: [CoordIjk; 7] = [
  CoordIjk::new(0, 0, 0), // Center
  CoordIjk::new(0, 0, 1), // K
  CoordIjk::new(0, 1, 0), // J
  CoordIjk::new(0, 1, 1), // Jk
  CoordIjk::new(1, 0, 0), // I
  CoordIjk::new(1, 0, 1), // Ik
  CoordIjk::new(1, 1, 0), // Ij
];

impl CoordIjk {
  #[inline]
  #[must_use]
  pub(crate) const fn new(i: i32, j: i32, k: i32) -> Self {
    Self { i, j, k }
  }

  /// Component-wise sum.
  #[inline]
  #[must_use]
  pub(crate) const fn add(self, other: CoordIjk) -> CoordIjk {
    CoordIjk::new(self.i + other.i, self.j + other.j, self.k + other.k)
  }

  /// Component-wise difference.
  #[inline]
  #[must_use]
  pub(crate) const fn sub(self, other: CoordIjk) -> CoordIjk {
    CoordIjk::new(self.i - other.i, self.j - other.j, self.k - other.k)
  }

  /// Uniform scaling.
  #[inline]
  #[must_use]
  pub(crate) const fn scale(self, factor: i32) -> CoordIjk {
    CoordIjk::new(self.i * factor, self.j * factor, self.k * factor)
  }

  /// The unique normalized form: minimum component zero, all
  /// components non-negative.
  #[must_use]
  pub(crate) fn normalize(self) -> CoordIjk {
    let Self { mut i, mut j, mut k } = self;

    if i < 0 {
      j -= i;
      k -= i;
      i = 0;
    }
    if j < 0 {
      i -= j;
      k -= j;
      j = 0;
    }
    if k < 0 {
      i -= k;
      j -= k;
      k = 0;
    }

    let min = i.min(j).min(k);
    if min > 0 {
      i -= min;
      j -= min;
      k -= min;
    }
    CoordIjk::new(i, j, k)
  }

  /// The digit matching this coordinate, which must normalize to one
  /// of the seven unit vectors; anything else yields
  /// [`Direction::Invalid`].
  #[must_use]
  pub(crate) fn unit_digit(self) -> Direction {
    let c = self.normalize();
    for d in Direction::VALID {
      if UNIT_VECS[d as usize] == c {
        return d;
      }
    }
    Direction::Invalid
  }

  /// The normalized neighbor one step along `digit`.
  #[inline]
  #[must_use]
  pub(crate) fn neighbor(self, digit: Direction) -> CoordIjk {
    match digit {
      Direction::Center | Direction::Invalid => self,
      d => self.add(UNIT_VECS[d as usize]).normalize(),
    }
  }

  /// Applies the linear map sending the unit axes to `iv`, `jv`, `kv`,
  /// then normalizes.
  #[inline]
  #[must_use]
  fn map_axes(self, iv: CoordIjk, jv: CoordIjk, kv: CoordIjk) -> CoordIjk {
    iv.scale(self.i).add(jv.scale(self.j)).add(kv.scale(self.k)).normalize()
  }

  /// Rotation 60 degrees counter-clockwise.
  #[inline]
  #[must_use]
  pub(crate) fn rotate60_ccw(self) -> CoordIjk {
    self.map_axes(
      CoordIjk::new(1, 1, 0), // i -> ij
      CoordIjk::new(0, 1, 1), // j -> jk
      CoordIjk::new(1, 0, 1), // k -> ik
    )
  }

  /// Rotation 60 degrees clockwise.
  #[inline]
  #[must_use]
  pub(crate) fn rotate60_cw(self) -> CoordIjk {
    self.map_axes(
      CoordIjk::new(1, 0, 1), // i -> ik
      CoordIjk::new(1, 1, 0), // j -> ij
      CoordIjk::new(0, 1, 1), // k -> jk
    )
  }

  /// The center of this cell one aperture-7 resolution finer, with the
  /// counter-clockwise (Class III) axis alignment.
  #[inline]
  #[must_use]
  pub(crate) fn down_ap7(self) -> CoordIjk {
    self.map_axes(CoordIjk::new(3, 0, 1), CoordIjk::new(1, 3, 0), CoordIjk::new(0, 1, 3))
  }

  /// The center of this cell one aperture-7 resolution finer, with the
  /// clockwise (Class II) axis alignment.
  #[inline]
  #[must_use]
  pub(crate) fn down_ap7r(self) -> CoordIjk {
    self.map_axes(CoordIjk::new(3, 1, 0), CoordIjk::new(0, 3, 1), CoordIjk::new(1, 0, 3))
  }

  /// The containing cell one aperture-7 resolution coarser, with the
  /// counter-clockwise (Class III) axis alignment. Inverse of
  /// [`CoordIjk::down_ap7`] on cell centers.
  #[must_use]
  pub(crate) fn up_ap7(self) -> CoordIjk {
    let i = self.i - self.k;
    let j = self.j - self.k;

    CoordIjk::new(
      lround(f64::from(3 * i - j) * M_ONESEVENTH),
      lround(f64::from(i + 2 * j) * M_ONESEVENTH),
      0,
    )
    .normalize()
  }

  /// The containing cell one aperture-7 resolution coarser, with the
  /// clockwise (Class II) axis alignment. Inverse of
  /// [`CoordIjk::down_ap7r`] on cell centers.
  #[must_use]
  pub(crate) fn up_ap7r(self) -> CoordIjk {
    let i = self.i - self.k;
    let j = self.j - self.k;

    CoordIjk::new(
      lround(f64::from(2 * i + j) * M_ONESEVENTH),
      lround(f64::from(3 * j - i) * M_ONESEVENTH),
      0,
    )
    .normalize()
  }

  /// The same position on the aperture-3 substrate grid one step
  /// finer, counter-clockwise alignment.
  #[inline]
  #[must_use]
  pub(crate) fn down_ap3(self) -> CoordIjk {
    self.map_axes(CoordIjk::new(2, 0, 1), CoordIjk::new(1, 2, 0), CoordIjk::new(0, 1, 2))
  }

  /// The same position on the aperture-3 substrate grid one step
  /// finer, clockwise alignment.
  #[inline]
  #[must_use]
  pub(crate) fn down_ap3r(self) -> CoordIjk {
    self.map_axes(CoordIjk::new(2, 1, 0), CoordIjk::new(0, 2, 1), CoordIjk::new(1, 0, 2))
  }

  /// The face-plane position of this cell center.
  ///
  /// For a normalized triple, `x = i - j/2 - k/2` and
  /// `y = (j - k) * sqrt(3)/2`.
  #[inline]
  #[must_use]
  pub(crate) fn to_hex2d(self) -> Vec2d {
    let i = f64::from(self.i - self.k);
    let j = f64::from(self.j - self.k);
    Vec2d::new(i - 0.5 * j, j * M_SQRT3_2)
  }

  /// The normalized coordinates of the cell containing a face-plane
  /// position (hexagon quantization, from DGGRID).
  #[must_use]
  pub(crate) fn from_hex2d(v: Vec2d) -> CoordIjk {
    let a1 = v.x.abs();
    let a2 = v.y.abs();

    // reverse the conversion to fractional axial coordinates
    let x2 = a2 * M_RSIN60;
    let x1 = a1 + x2 / 2.0;

    let m1 = x1 as i32;
    let m2 = x2 as i32;

    let r1 = x1 - f64::from(m1);
    let r2 = x2 - f64::from(m2);

    let mut i;
    let mut j;

    if r1 < 0.5 {
      if r1 < 1.0 / 3.0 {
        i = m1;
        j = if r2 < (1.0 + r1) / 2.0 { m2 } else { m2 + 1 };
      } else {
        j = if r2 < (1.0 - r1) { m2 } else { m2 + 1 };
        i = if (1.0 - r1) <= r2 && r2 < (2.0 * r1) { m1 + 1 } else { m1 };
      }
    } else if r1 < 2.0 / 3.0 {
      j = if r2 < (1.0 - r1) { m2 } else { m2 + 1 };
      i = if (2.0 * r1 - 1.0) < r2 && r2 < (1.0 - r1) { m1 } else { m1 + 1 };
    } else {
      i = m1 + 1;
      j = if r2 < (r1 / 2.0) { m2 } else { m2 + 1 };
    }

    // fold across the axes if necessary
    if v.x < 0.0 {
      if (j % 2) == 0 {
        let axis_i = j / 2;
        let diff = i - axis_i;
        i -= 2 * diff;
      } else {
        let axis_i = (j + 1) / 2;
        let diff = i - axis_i;
        i -= 2 * diff + 1;
      }
    }

    if v.y < 0.0 {
      i -= (2 * j + 1) / 2;
      j = -j;
    }

    CoordIjk::new(i, j, 0).normalize()
  }
}

/// Round to the nearest integer, ties away from zero.
#[inline]
fn lround(v: f64) -> i32 {
  v.round() as i32
}
