//! Unit-sphere point geometry.

use crate::types::{LatLng, Vec3d};

#[inline]
fn square(x: f64) -> f64 {
  x * x
}

impl Vec3d {
  /// Squared Euclidean distance to `other`.
  #[inline]
  #[must_use]
  pub(crate) fn square_dist(self, other: Vec3d) -> f64 {
    square(self.x - other.x) + square(self.y - other.y) + square(self.z - other.z)
  }

  /// The point on the unit sphere under the given spherical coordinates.
  #[inline]
  #[must_use]
  pub(crate) fn from_geo(geo: LatLng) -> Vec3d {
    let r = geo.lat.cos();
    Vec3d {
      x: geo.lng.cos() * r,
      y: geo.lng.sin() * r,
      z: geo.lat.sin(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::M_PI_2;
  use approx::assert_relative_eq;

  #[test]
  fn from_geo_lands_on_unit_sphere() {
    let origin = Vec3d::default();
    for &(lat, lng) in &[(0.0, 0.0), (M_PI_2, 0.0), (-M_PI_2, 0.0), (0.7, -2.1), (-1.2, 2.9)] {
      let p = Vec3d::from_geo(LatLng { lat, lng });
      assert_relative_eq!(origin.square_dist(p), 1.0, max_relative = 1e-14);
    }
  }

  #[test]
  fn square_dist_known_points() {
    let a = Vec3d { x: 0.0, y: 0.0, z: 0.0 };
    let b = Vec3d { x: 1.0, y: 0.0, z: 0.0 };
    let c = Vec3d { x: 0.0, y: 1.0, z: 1.0 };
    assert_relative_eq!(a.square_dist(a), 0.0);
    assert_relative_eq!(a.square_dist(b), 1.0);
    assert_relative_eq!(a.square_dist(c), 2.0);
  }

  #[test]
  fn equator_and_pole_are_orthogonal() {
    let equator = Vec3d::from_geo(LatLng { lat: 0.0, lng: 0.0 });
    let pole = Vec3d::from_geo(LatLng { lat: M_PI_2, lng: 0.0 });
    assert_relative_eq!(equator.square_dist(pole), 2.0, max_relative = 1e-14);
  }
}
