/// Indicates an inconsistency while building a [`PolygonMesh`](super::PolygonMesh).
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TopologyError {
    /// The mesh has no face left once degenerate faces are removed.
    #[error("the mesh does not contain any non-degenerate face.")]
    Empty,
    /// Found a polygon with less than three vertices, or with repeated vertices.
    #[error("the polygon {0} has less than three distinct vertices.")]
    DegeneratePolygon(u32),
    /// Two faces sharing an edge traverse it in the same direction.
    #[error("the faces {face1} and {face2} sharing the edge {edge:?} have opposite orientations.")]
    InconsistentOrientation {
        /// The first face.
        face1: u32,
        /// The second face, with an orientation opposite to the first face.
        face2: u32,
        /// The directed edge traversed by both faces.
        edge: (u32, u32),
    },
    /// An edge is shared by more than two faces.
    #[error("the edge {0:?} is shared by more than two faces.")]
    NonManifoldEdge((u32, u32)),
    /// The half-edge links are inconsistent, or a vertex has more than one umbrella.
    #[error("the half-edge structure is invalid.")]
    InvalidHalfEdgeStructure,
}
