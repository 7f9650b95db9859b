use super::RepairError;
use crate::shape::Mesh;
use crate::topology::{polygon_mesh_to_mesh, PolygonMesh};

/// A closed polygon mesh with a valid half-edge structure.
#[derive(Clone, Debug)]
pub struct Polyhedron {
    mesh: PolygonMesh,
}

impl Polyhedron {
    /// Checks that `mesh` is a valid closed surface.
    pub fn from_polygon_mesh(mesh: PolygonMesh) -> Result<Self, RepairError> {
        if !mesh.is_valid() {
            return Err(RepairError::NotValid);
        }

        if !mesh.is_closed() {
            return Err(RepairError::NotClosed);
        }

        Ok(Polyhedron { mesh })
    }

    /// The boundary of this polyhedron.
    #[inline]
    pub fn as_polygon_mesh(&self) -> &PolygonMesh {
        &self.mesh
    }

    /// Consumes this polyhedron and returns its boundary.
    #[inline]
    pub fn into_polygon_mesh(self) -> PolygonMesh {
        self.mesh
    }

    /// Triangulates this polyhedron into a mesh with normals and bounds.
    pub fn to_mesh(&self) -> Mesh {
        polygon_mesh_to_mesh(&self.mesh)
    }
}
