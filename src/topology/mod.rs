//! Polygon meshes with half-edge topology, and their conversion from and to triangle meshes.

pub use self::conversion::{mesh_to_polygon_mesh, polygon_mesh_to_mesh};
pub use self::error::TopologyError;
pub use self::orient::orient_polygon_soup;
pub use self::polygon_mesh::{HalfEdge, Polygon, PolygonMesh, BORDER_FACE};
pub(crate) use self::union_find::{union_find, IntKey};

mod conversion;
mod error;
mod orient;
mod polygon_mesh;
mod union_find;
