//! Robust geometric predicates and the plane primitive shared by the repair
//! and decomposition algorithms.
//!
//! Every combinatorial decision (which side of a plane a point lies on, whether
//! two triangles are coplanar, whether a polygon corner is convex) is taken with
//! adaptive-precision arithmetic so that it is exact for the floating-point
//! coordinates it is given. Constructions (intersection points) are still
//! computed with floating-point arithmetic.

pub use self::plane::Plane;
pub use self::predicates::{
    is_affinely_dependent_triangle, orient2d, orient3d, orientation3d, tetrahedron_signed_volume,
    triangle_area, Sign,
};

mod plane;
mod predicates;
