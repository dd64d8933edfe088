//! Grid coordinate systems: the triangular lattice on a face and the
//! face-qualified coordinates across the icosahedron.

pub(crate) mod face_ijk;
pub(crate) mod ijk;
