//! The triangle mesh data model.

pub use self::mesh::{Mesh, MeshError};

mod mesh;
