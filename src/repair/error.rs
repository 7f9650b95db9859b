use crate::topology::TopologyError;

/// Indicates why a mesh could not be repaired into a solid.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum RepairError {
    /// The triangle soup could not be converted into a polygon mesh.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),
    /// A vertex or an edge of the repaired mesh is not manifold.
    #[error("the repaired mesh is not a valid polyhedral surface.")]
    NotValid,
    /// The repaired mesh still has border edges.
    #[error("the repaired mesh is not closed.")]
    NotClosed,
    /// A shell of the repaired mesh, or the whole solid, does not enclose any volume.
    #[error("the repaired mesh does not enclose a volume.")]
    ZeroVolume,
    /// The boundary of the repaired mesh intersects itself.
    #[error("the repaired mesh intersects itself.")]
    SelfIntersecting,
}
