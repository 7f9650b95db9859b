//! Repair of triangle soups into closed, consistently oriented solids.
//!
//! The repair runs the following steps:
//! 1. conversion of the soup into an oriented polygon mesh,
//! 2. stitching of coincident borders,
//! 3. capping of the remaining holes,
//! 4. validity and closure checks,
//! 5. conversion into a [`Solid`] and back,
//! 6. triangulation of the result.
//!
//! Any failure rejects the mesh with a [`RepairError`].

pub use self::error::RepairError;
pub use self::holes::fill_holes;
pub use self::parameters::{RepairFlags, RepairParameters};
pub use self::polyhedron::Polyhedron;
pub use self::solid::{winding_number, PlanarRegion, Solid};
pub use self::stitch::stitch_borders;
pub use self::triangle_intersection::{has_self_intersections, triangles_intersect};

use crate::shape::Mesh;
use crate::topology::mesh_to_polygon_mesh;

mod error;
mod holes;
mod parameters;
mod polyhedron;
mod solid;
mod stitch;
mod triangle_intersection;

fn repair_to_polyhedron(mesh: &Mesh, params: &RepairParameters) -> Result<Polyhedron, RepairError> {
    let mut polygon_mesh = mesh_to_polygon_mesh(mesh)?;

    if params.flags.contains(RepairFlags::STITCH_BORDERS) {
        let num_stitched = stitch_borders(&mut polygon_mesh, params.stitch_tolerance);
        log::debug!("Stitched edges: {}", num_stitched);
    }

    if params.flags.contains(RepairFlags::FILL_HOLES) {
        let num_filled = fill_holes(&mut polygon_mesh)?;
        log::debug!("Filled holes: {}", num_filled);
    }

    Polyhedron::from_polygon_mesh(polygon_mesh)
}

/// Repairs a triangle soup into the boundary of a solid.
///
/// The output is a new, closed, outward-oriented triangle mesh with normals
/// and bounds. The input is not modified.
pub fn repair_mesh(mesh: &Mesh, params: &RepairParameters) -> Result<Mesh, RepairError> {
    let polyhedron = repair_to_polyhedron(mesh, params)?;

    let polyhedron = if params.flags.contains(RepairFlags::ENFORCE_SOLIDITY) {
        Solid::from_polyhedron(&polyhedron)?.to_polyhedron()?
    } else {
        polyhedron
    };

    let result = polyhedron.to_mesh();
    log::debug!(
        "Repaired mesh: {} vertices, {} triangles.",
        result.num_vertices(),
        result.num_triangles()
    );
    Ok(result)
}

/// Repairs a triangle soup and returns the solid it bounds.
///
/// The solid is always built, regardless of [`RepairFlags::ENFORCE_SOLIDITY`].
pub fn repair_to_solid(mesh: &Mesh, params: &RepairParameters) -> Result<Solid, RepairError> {
    let polyhedron = repair_to_polyhedron(mesh, params)?;
    Solid::from_polyhedron(&polyhedron)
}
