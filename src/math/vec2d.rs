//! Plane geometry on face-local coordinates.

use crate::types::Vec2d;

impl Vec2d {
  #[inline]
  #[must_use]
  pub(crate) const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  /// Vector magnitude.
  #[inline]
  #[must_use]
  pub(crate) fn mag(self) -> f64 {
    (self.x * self.x + self.y * self.y).sqrt()
  }

  /// Exact component equality.
  ///
  /// Synthetic boundary vertices are suppressed only when the
  /// intersection reproduces an endpoint bit-for-bit; both sides of
  /// that comparison come from identical computations, so exact
  /// equality is the intended test.
  #[inline]
  #[must_use]
  pub(crate) fn exactly_equals(self, other: Vec2d) -> bool {
    self.x == other.x && self.y == other.y
  }
}

/// Intersection of the line through `p0`/`p1` with the line through
/// `p2`/`p3`.
///
/// Callers guarantee the lines are not parallel: the segment endpoints
/// come from the face-neighbor tables, whose symmetry makes a parallel
/// pair unreachable.
#[inline]
#[must_use]
pub(crate) fn intersect(p0: Vec2d, p1: Vec2d, p2: Vec2d, p3: Vec2d) -> Vec2d {
  let s1 = Vec2d::new(p1.x - p0.x, p1.y - p0.y);
  let s2 = Vec2d::new(p3.x - p2.x, p3.y - p2.y);

  let denom = -s2.x * s1.y + s1.x * s2.y;
  debug_assert!(denom != 0.0, "face edge intersection with parallel lines");

  let t = (s2.x * (p0.y - p2.y) - s2.y * (p0.x - p2.x)) / denom;

  Vec2d::new(p0.x + t * s1.x, p0.y + t * s1.y)
}
