use super::{orient_polygon_soup, Polygon, PolygonMesh, TopologyError};
use crate::math::{Point, Real};
use crate::shape::Mesh;
use crate::transformation::triangulate_polygon;
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::{self, HashablePartialEq};

/// Converts a triangle soup into a consistently oriented polygon mesh.
///
/// Vertices with bit-identical coordinates are welded, triangles with repeated
/// corners are dropped, and the soup is oriented with [`orient_polygon_soup`]
/// (splitting non-manifold vertices). The orientation result itself is not
/// treated as an error: the conversion only fails if the resulting half-edge
/// structure is invalid or empty.
pub fn mesh_to_polygon_mesh(mesh: &Mesh) -> Result<PolygonMesh, TopologyError> {
    let mut points = Vec::new();
    let mut welded: HashMap<HashablePartialEq<Point<Real>>, u32> = HashMap::default();
    let remap: Vec<u32> = mesh
        .vertices()
        .iter()
        .map(|pt| match welded.entry(HashablePartialEq::new(*pt)) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                points.push(*pt);
                *e.insert(points.len() as u32 - 1)
            }
        })
        .collect();

    let mut polygons: Vec<Polygon> = mesh
        .triangles()
        .map(|tri| tri.map(|i| remap[i as usize]))
        .filter(|t| t[0] != t[1] && t[1] != t[2] && t[2] != t[0])
        .map(|t| Polygon::from_slice(&t))
        .collect();

    if polygons.is_empty() {
        return Err(TopologyError::Empty);
    }

    log::debug!(
        "Converting a mesh with {} vertices ({} after welding) and {} triangles ({} non-degenerate).",
        mesh.num_vertices(),
        points.len(),
        mesh.num_triangles(),
        polygons.len()
    );

    if !orient_polygon_soup(&mut points, &mut polygons) {
        log::debug!("The polygon soup could not be oriented without modifications.");
    }

    utils::remove_unused_polygon_points(&mut points, &mut polygons);

    let result = PolygonMesh::new(points, polygons)?;

    if !result.is_valid() {
        return Err(TopologyError::InvalidHalfEdgeStructure);
    }

    Ok(result)
}

/// Converts a polygon mesh into a triangle mesh.
///
/// Every face is triangulated by ear clipping in its own plane (with a fan
/// fallback), unreferenced vertices are removed, and the normals and bounds of
/// the output are computed.
pub fn polygon_mesh_to_mesh(mesh: &PolygonMesh) -> Mesh {
    let mut points = mesh.points().to_vec();
    let mut triangles: Vec<[u32; 3]> = mesh
        .polygons()
        .iter()
        .flat_map(|poly| triangulate_polygon(&points, poly))
        .collect();

    utils::remove_unused_points(&mut points, &mut triangles);
    Mesh::from_trusted_parts(points, &triangles)
}
