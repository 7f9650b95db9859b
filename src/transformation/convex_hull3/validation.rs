use super::{ConvexHullError, TriangleFacet};
use crate::math::{Point, Real};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::SortedPair;

/// Checks that the links between the facet `ifacet` and its neighbors are consistent.
pub fn check_facet_links(ifacet: usize, facets: &[TriangleFacet]) -> Result<(), ConvexHullError> {
    let facet = &facets[ifacet];

    for i in 0..3 {
        let adj_facet = &facets[facet.adj[i]];

        if !adj_facet.valid
            || adj_facet.adj[facet.indirect_adj_id[i]] != ifacet
            || adj_facet.indirect_adj_id[facet.indirect_adj_id[i]] != i
            || adj_facet.first_point_from_edge(facet.indirect_adj_id[i])
                != facet.second_point_from_edge(i)
            || adj_facet.second_point_from_edge(facet.indirect_adj_id[i])
                != facet.first_point_from_edge(i)
        {
            return Err(ConvexHullError::InternalError("inconsistent facet adjacency."));
        }
    }

    Ok(())
}

/// Checks if a convex-hull is properly formed.
///
/// The hull must have no duplicate vertices, no degenerate triangle, every edge
/// must be shared by exactly two triangles, and its Euler characteristic must be 2.
pub fn check_convex_hull(
    points: &[Point<Real>],
    triangles: &[[u32; 3]],
) -> Result<(), ConvexHullError> {
    struct EdgeData {
        adjacent_triangles: [usize; 2],
    }

    let mut edges = HashMap::<SortedPair<u32>, EdgeData>::new();

    for i in 0..points.len() {
        for j in i + 1..points.len() {
            if points[i] == points[j] {
                return Err(ConvexHullError::DuplicatePoints(i, j));
            }
        }
    }

    for (itri, tri) in triangles.iter().enumerate() {
        if tri[0] == tri[1] || tri[0] == tri[2] || tri[1] == tri[2] {
            return Err(ConvexHullError::InternalError("degenerate hull triangle."));
        }

        for i in 0..3 {
            let ivtx1 = tri[i];
            let ivtx2 = tri[(i + 1) % 3];
            let edge_key = SortedPair::new(ivtx1, ivtx2);

            match edges.entry(edge_key) {
                Entry::Vacant(e) => {
                    let _ = e.insert(EdgeData {
                        adjacent_triangles: [itri, usize::MAX],
                    });
                }
                Entry::Occupied(mut e) => {
                    if e.get().adjacent_triangles[1] != usize::MAX {
                        return Err(ConvexHullError::TJunction(itri, ivtx1, ivtx2));
                    }

                    e.get_mut().adjacent_triangles[1] = itri;
                }
            }
        }
    }

    if edges
        .values()
        .any(|edge| edge.adjacent_triangles[1] == usize::MAX)
    {
        return Err(ConvexHullError::UnfinishedTriangle);
    }

    // Euler characteristic of a sphere.
    if points.len() + triangles.len() != edges.len() + 2 {
        return Err(ConvexHullError::InternalError(
            "the hull is not homeomorphic to a sphere.",
        ));
    }

    Ok(())
}
