//! Approximate convex decomposition of a closed triangle mesh.
//!
//! The volume bounded by the mesh is voxelized, then recursively split by
//! axis-aligned planes until every part is close enough to its convex hull.
//! The hulls of the parts are finally merged and simplified to fit the
//! requested hull and vertex budgets.

pub use self::parameters::{PrimitiveMode, VHACDParameters};
pub use self::vhacd::VHACD;

pub(crate) use self::cut_plane::CutPlane;

mod cut_plane;
mod parameters;
mod primitive_set;
mod vhacd;
