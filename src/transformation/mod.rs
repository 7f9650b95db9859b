//! Transformation, simplification and decomposition of meshes.

pub use self::convex_decomposition::{
    exact_convex_decomposition, ConvexCell, DecompositionError,
};
pub use self::convex_hull3::{
    check_convex_hull, convex_hull_volume, simplify_hull, try_convex_hull, ConvexHullError,
};
pub use self::ear_clipping::{newell_normal, plane_basis, triangulate_ear_clipping, triangulate_polygon};

/// Exact decomposition of a closed solid into convex cells.
pub mod convex_decomposition;
mod convex_hull3;
pub(crate) mod convex_hull_utils;
mod ear_clipping;
/// Approximate convex decomposition using the VHACD algorithm.
pub mod vhacd;
/// Voxelization of a 3D triangle mesh.
pub mod voxelization;
