//! Spherical geometry on lat/lng pairs: azimuths, great-circle steps
//! and distances, and spherical triangle areas.
//!
//! All angles are radians unless a name says otherwise.

use crate::constants::{EARTH_RADIUS_KM, EPSILON_RAD, M_180_PI, M_2PI, M_PI, M_PI_180, M_PI_2};
use crate::types::LatLng;

/// Converts degrees to radians.
#[inline]
#[must_use]
pub fn degs_to_rads(degrees: f64) -> f64 {
  degrees * M_PI_180
}

/// Converts radians to degrees.
#[inline]
#[must_use]
pub fn rads_to_degs(radians: f64) -> f64 {
  radians * M_180_PI
}

/// Builds spherical coordinates from a degree pair.
#[inline]
#[must_use]
pub fn latlng_from_degs(lat_degs: f64, lng_degs: f64) -> LatLng {
  LatLng {
    lat: degs_to_rads(lat_degs),
    lng: degs_to_rads(lng_degs),
  }
}

/// Normalizes an angle into `[0, 2*pi)`.
#[inline]
#[must_use]
pub(crate) fn pos_angle_rads(rads: f64) -> f64 {
  let mut tmp = if rads < 0.0 { rads + M_2PI } else { rads };
  if tmp >= M_2PI {
    tmp -= M_2PI;
  }
  tmp
}

/// Constrains a longitude to `[-pi, pi]`.
#[inline]
#[must_use]
pub(crate) fn constrain_lng(mut lng: f64) -> f64 {
  while lng > M_PI {
    lng -= M_2PI;
  }
  while lng < -M_PI {
    lng += M_2PI;
  }
  lng
}

/// Whether two coordinates agree to within `threshold` on both axes.
#[inline]
#[must_use]
pub fn geo_almost_equal_threshold(p1: LatLng, p2: LatLng, threshold: f64) -> bool {
  (p1.lat - p2.lat).abs() < threshold && (p1.lng - p2.lng).abs() < threshold
}

/// Whether two coordinates agree to within the geographic epsilon
/// (about 0.1 mm on the Earth's surface).
#[inline]
#[must_use]
pub fn geo_almost_equal(p1: LatLng, p2: LatLng) -> bool {
  geo_almost_equal_threshold(p1, p2, EPSILON_RAD)
}

/// Azimuth from `p1` to `p2`.
#[inline]
#[must_use]
pub(crate) fn azimuth_rads(p1: LatLng, p2: LatLng) -> f64 {
  ((p2.lng - p1.lng).sin() * p2.lat.cos())
    .atan2(p1.lat.cos() * p2.lat.sin() - p1.lat.sin() * p2.lat.cos() * (p2.lng - p1.lng).cos())
}

/// The point at the given azimuth and great-circle distance from `p1`.
///
/// Distances shorter than the geographic epsilon return `p1` itself;
/// points that land within epsilon of a pole snap to the pole with
/// longitude 0.
#[must_use]
pub(crate) fn az_distance_rads(p1: LatLng, az: f64, distance: f64) -> LatLng {
  if distance < EPSILON_RAD {
    return p1;
  }

  let az = pos_angle_rads(az);
  let mut p2 = LatLng::default();

  if az < EPSILON_RAD || (az - M_PI).abs() < EPSILON_RAD {
    // Due north or south: the longitude survives unless we hit a pole.
    p2.lat = if az < EPSILON_RAD { p1.lat + distance } else { p1.lat - distance };

    if (p2.lat - M_PI_2).abs() < EPSILON_RAD {
      p2.lat = M_PI_2;
      p2.lng = 0.0;
    } else if (p2.lat + M_PI_2).abs() < EPSILON_RAD {
      p2.lat = -M_PI_2;
      p2.lng = 0.0;
    } else {
      p2.lng = constrain_lng(p1.lng);
    }
  } else {
    let sin_lat = (p1.lat.sin() * distance.cos() + p1.lat.cos() * distance.sin() * az.cos()).clamp(-1.0, 1.0);
    p2.lat = sin_lat.asin();

    if (p2.lat - M_PI_2).abs() < EPSILON_RAD {
      p2.lat = M_PI_2;
      p2.lng = 0.0;
    } else if (p2.lat + M_PI_2).abs() < EPSILON_RAD {
      p2.lat = -M_PI_2;
      p2.lng = 0.0;
    } else {
      let inv_cos_lat2 = 1.0 / p2.lat.cos();
      let sin_lng = (az.sin() * distance.sin() * inv_cos_lat2).clamp(-1.0, 1.0);
      let cos_lng = ((distance.cos() - p1.lat.sin() * p2.lat.sin()) / p1.lat.cos() * inv_cos_lat2).clamp(-1.0, 1.0);
      p2.lng = constrain_lng(p1.lng + sin_lng.atan2(cos_lng));
    }
  }
  p2
}

/// Great-circle distance between two points, in radians, via the
/// haversine formula.
#[must_use]
pub fn great_circle_distance_rads(a: LatLng, b: LatLng) -> f64 {
  let sin_lat = ((b.lat - a.lat) * 0.5).sin();
  let sin_lng = ((b.lng - a.lng) * 0.5).sin();
  let h = (sin_lat * sin_lat + a.lat.cos() * b.lat.cos() * sin_lng * sin_lng).clamp(0.0, 1.0);
  2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Great-circle distance in kilometers.
#[must_use]
pub fn great_circle_distance_km(a: LatLng, b: LatLng) -> f64 {
  great_circle_distance_rads(a, b) * EARTH_RADIUS_KM
}

/// Great-circle distance in meters.
#[must_use]
pub fn great_circle_distance_m(a: LatLng, b: LatLng) -> f64 {
  great_circle_distance_km(a, b) * 1000.0
}

/// Area in square radians of the spherical triangle with the given
/// great-circle edge lengths, by L'Huilier's formula.
#[must_use]
pub(crate) fn triangle_edge_lengths_to_area(a: f64, b: f64, c: f64) -> f64 {
  let mut s = (a + b + c) / 2.0;

  let a = (s - a) / 2.0;
  let b = (s - b) / 2.0;
  let c = (s - c) / 2.0;
  s /= 2.0;

  4.0 * (s.tan() * a.tan() * b.tan() * c.tan()).sqrt().atan()
}

/// Area in square radians of the spherical triangle `abc`.
#[must_use]
pub fn triangle_area_rads2(a: LatLng, b: LatLng, c: LatLng) -> f64 {
  triangle_edge_lengths_to_area(
    great_circle_distance_rads(a, b),
    great_circle_distance_rads(b, c),
    great_circle_distance_rads(c, a),
  )
}
