//! Planar and 3-space vector helpers.

pub(crate) mod vec2d;
pub(crate) mod vec3d;
