use super::{try_get_initial_mesh, ConvexHullError, TriangleFacet};
use crate::math::{Point, Real};
use crate::transformation::convex_hull_utils::{
    indexed_support_point_id, indexed_support_point_nth, normalize,
};
use crate::utils;

/// Computes the convex hull of a set of 3d points.
///
/// Returns the hull vertices (a subset of the input points) and its
/// counter-clockwise (seen from outside) triangles.
///
/// Fails with [`ConvexHullError::IncompleteInput`] on fewer than 4 points, and
/// with [`ConvexHullError::Degenerate`] if the points are coplanar, collinear or
/// all identical.
pub fn try_convex_hull(
    points: &[Point<Real>],
) -> Result<(Vec<Point<Real>>, Vec<[u32; 3]>), ConvexHullError> {
    if points.len() < 4 {
        return Err(ConvexHullError::IncompleteInput);
    }

    if points.iter().any(|pt| pt.iter().any(|x| !x.is_finite())) {
        return Err(ConvexHullError::MissingSupportPoint);
    }

    let mut normalized_points = points.to_vec();
    let _ = normalize(&mut normalized_points[..]);

    let mut undecidable_points = Vec::new();
    let mut silhouette_loop_facets_and_idx = Vec::new();
    let mut removed_facets = Vec::new();

    let mut triangles = try_get_initial_mesh(&mut normalized_points, &mut undecidable_points)?;

    let mut i = 0;
    while i != triangles.len() {
        silhouette_loop_facets_and_idx.clear();

        if !triangles[i].valid || triangles[i].affinely_dependent {
            i += 1;
            continue;
        }

        let pt_id = indexed_support_point_id(
            &triangles[i].normal,
            &normalized_points,
            triangles[i].visible_points.iter().copied(),
        );

        if let Some(point) = pt_id {
            triangles[i].valid = false;

            removed_facets.clear();
            removed_facets.push(i);

            for j in 0usize..3 {
                compute_silhouette(
                    triangles[i].adj[j],
                    triangles[i].indirect_adj_id[j],
                    point,
                    &mut silhouette_loop_facets_and_idx,
                    &normalized_points,
                    &mut removed_facets,
                    &mut triangles,
                );
            }

            // In some degenerate cases (because of float rounding problems), the silhouette may:
            // 1. Contain self-intersections (i.e. a single vertex is used by more than two edges).
            // 2. Contain multiple disjoint (but nested) loops.
            fix_silhouette_topology(
                &normalized_points,
                &mut silhouette_loop_facets_and_idx,
                &mut removed_facets,
                &mut triangles,
            )?;

            if silhouette_loop_facets_and_idx.is_empty() {
                // Due to inaccuracies, the silhouette could not be computed
                // (the point seems to be visible from… every triangle).
                let any_valid = triangles[i + 1..]
                    .iter()
                    .any(|t| t.valid && !t.affinely_dependent);

                if any_valid {
                    return Err(ConvexHullError::InternalError(
                        "could not compute the silhouette of a visible point.",
                    ));
                }

                triangles[i].valid = true;
                break;
            }

            attach_and_push_facets(
                &silhouette_loop_facets_and_idx,
                point,
                &normalized_points,
                &mut triangles,
                &removed_facets,
                &mut undecidable_points,
            )?;
        }

        i += 1;
    }

    let mut idx: Vec<[u32; 3]> = triangles
        .iter()
        .filter(|facet| facet.valid)
        .map(|facet| facet.pts.map(|i| i as u32))
        .collect();

    let mut points = points.to_vec();
    utils::remove_unused_points(&mut points, &mut idx);

    if points.is_empty() || idx.is_empty() {
        return Err(ConvexHullError::InternalError("empty output mesh."));
    }

    Ok((points, idx))
}

/// The volume enclosed by a closed, outward-oriented triangle mesh.
pub fn convex_hull_volume(points: &[Point<Real>], triangles: &[[u32; 3]]) -> Real {
    let mut volume = 0.0;
    let origin = utils::center(points);

    for tri in triangles {
        let a = points[tri[0] as usize] - origin;
        let b = points[tri[1] as usize] - origin;
        let c = points[tri[2] as usize] - origin;
        volume += a.dot(&b.cross(&c));
    }

    volume / 6.0
}

fn compute_silhouette(
    facet: usize,
    indirect_id: usize,
    point: usize,
    out_facets_and_idx: &mut Vec<(usize, usize)>,
    points: &[Point<Real>],
    removed_facets: &mut Vec<usize>,
    triangles: &mut [TriangleFacet],
) {
    if triangles[facet].valid {
        if !triangles[facet].order_independent_can_be_seen_by_point(point, points) {
            out_facets_and_idx.push((facet, indirect_id));
        } else {
            triangles[facet].valid = false; // The facet must be removed from the convex hull.
            removed_facets.push(facet);

            compute_silhouette(
                triangles[facet].adj[(indirect_id + 1) % 3],
                triangles[facet].indirect_adj_id[(indirect_id + 1) % 3],
                point,
                out_facets_and_idx,
                points,
                removed_facets,
                triangles,
            );

            compute_silhouette(
                triangles[facet].adj[(indirect_id + 2) % 3],
                triangles[facet].indirect_adj_id[(indirect_id + 2) % 3],
                point,
                out_facets_and_idx,
                points,
                removed_facets,
                triangles,
            );
        }
    }
}

fn fix_silhouette_topology(
    points: &[Point<Real>],
    out_facets_and_idx: &mut Vec<(usize, usize)>,
    removed_facets: &mut Vec<usize>,
    triangles: &mut [TriangleFacet],
) -> Result<(), ConvexHullError> {
    let mut workspace = vec![0; points.len()];
    let mut needs_fixing = false;

    // NOTE: we work with the second_point_from_edge instead
    // of the first one, because when we traverse the silhouette
    // we see the second edge point before the first.
    for (facet, adj_id) in &*out_facets_and_idx {
        let p = triangles[*facet].second_point_from_edge(*adj_id);
        workspace[p] += 1;

        if workspace[p] > 1 {
            needs_fixing = true;
        }
    }

    // We detected a topological problem, i.e., we have
    // multiple loops.
    if needs_fixing {
        // First, we need to know which loop is the one we
        // need to keep.
        let mut loop_start = 0;
        for (facet, adj_id) in &*out_facets_and_idx {
            let p1 = points[triangles[*facet].second_point_from_edge(*adj_id)];
            let p2 = points[triangles[*facet].first_point_from_edge(*adj_id)];
            let supp = indexed_support_point_nth(
                &(p2 - p1),
                points,
                out_facets_and_idx
                    .iter()
                    .map(|(f, ai)| triangles[*f].second_point_from_edge(*ai)),
            )
            .ok_or(ConvexHullError::MissingSupportPoint)?;
            let selected = &out_facets_and_idx[supp];
            if workspace[triangles[selected.0].second_point_from_edge(selected.1)] == 1 {
                // This is a valid point to start with.
                loop_start = supp;
                break;
            }
        }

        let mut removing = None;
        let old_facets_and_idx = core::mem::take(out_facets_and_idx);

        for i in 0..old_facets_and_idx.len() {
            let facet_id = (loop_start + i) % old_facets_and_idx.len();
            let (facet, adj_id) = old_facets_and_idx[facet_id];
            let p1 = triangles[facet].second_point_from_edge(adj_id);

            match removing {
                Some(p) if p == p1 => removing = None,
                None if workspace[p1] > 1 => removing = Some(p1),
                _ => {}
            }

            if removing.is_some() {
                if triangles[facet].valid {
                    triangles[facet].valid = false;
                    removed_facets.push(facet);
                }
            } else {
                out_facets_and_idx.push((facet, adj_id));
            }
        }
    }

    Ok(())
}

fn attach_and_push_facets(
    silhouette_loop_facets_and_idx: &[(usize, usize)],
    point: usize,
    points: &[Point<Real>],
    triangles: &mut Vec<TriangleFacet>,
    removed_facets: &[usize],
    undecidable: &mut Vec<usize>,
) -> Result<(), ConvexHullError> {
    // The silhouette is built to be in CCW order.
    let mut new_facets = Vec::with_capacity(silhouette_loop_facets_and_idx.len());

    for (adj_facet, indirect_id) in silhouette_loop_facets_and_idx {
        let facet = TriangleFacet::new(
            point,
            triangles[*adj_facet].second_point_from_edge(*indirect_id),
            triangles[*adj_facet].first_point_from_edge(*indirect_id),
            points,
        );
        new_facets.push(facet);
    }

    // Link the facets together.
    let num_new = silhouette_loop_facets_and_idx.len();
    for i in 0..num_new {
        let prev_facet = if i == 0 {
            triangles.len() + num_new - 1
        } else {
            triangles.len() + i - 1
        };

        let (middle_facet, middle_id) = silhouette_loop_facets_and_idx[i];
        let next_facet = triangles.len() + (i + 1) % num_new;

        new_facets[i].set_facets_adjacency(prev_facet, middle_facet, next_facet, 2, middle_id, 0);

        // Check that we are not overwriting a valid link.
        if triangles[triangles[middle_facet].adj[middle_id]].valid {
            return Err(ConvexHullError::InternalError(
                "attempted to overwrite a valid facet link.",
            ));
        }

        triangles[middle_facet].adj[middle_id] = triangles.len() + i; // The future id of curr_facet.
        triangles[middle_facet].indirect_adj_id[middle_id] = 1;
    }

    // Assign to each facets some of the points which can see it.
    for curr_facet in removed_facets {
        for visible_point in &triangles[*curr_facet].visible_points {
            if points[*visible_point] == points[point] {
                continue;
            }

            let mut furthest = usize::MAX;
            let mut furthest_dist = 0.0;

            for (i, curr_facet) in new_facets.iter().enumerate() {
                if !curr_facet.affinely_dependent {
                    let distance = curr_facet.distance_to_point(*visible_point, points);

                    if distance > furthest_dist {
                        furthest = i;
                        furthest_dist = distance;
                    }
                }
            }

            if furthest != usize::MAX && new_facets[furthest].can_see_point(*visible_point, points)
            {
                new_facets[furthest].add_visible_point(*visible_point, points);
            }

            // If none of the facet can be seen from the point, it is implicitly
            // deleted because it won't be referenced by any facet.
        }
    }

    // Try to assign collinear points to one of the new facets.
    let mut i = 0;

    while i != undecidable.len() {
        let mut furthest = usize::MAX;
        let mut furthest_dist = 0.0;
        let undecidable_point = undecidable[i];

        for (j, curr_facet) in new_facets.iter().enumerate() {
            if curr_facet.can_see_point(undecidable_point, points) {
                let distance = curr_facet.distance_to_point(undecidable_point, points);

                if distance > furthest_dist {
                    furthest = j;
                    furthest_dist = distance;
                }
            }
        }

        if furthest != usize::MAX {
            new_facets[furthest].add_visible_point(undecidable_point, points);
            let _ = undecidable.swap_remove(i);
        } else {
            i += 1;
        }
    }

    triangles.append(&mut new_facets);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{convex_hull_volume, try_convex_hull};
    use crate::math::Point;
    use crate::transformation::{check_convex_hull, ConvexHullError};

    fn cube_points() -> Vec<Point<f64>> {
        let mut pts = Vec::new();
        for i in 0..8 {
            pts.push(Point::new(
                (i & 1) as f64,
                ((i >> 1) & 1) as f64,
                ((i >> 2) & 1) as f64,
            ));
        }
        pts
    }

    #[test]
    fn cube_hull() {
        let mut pts = cube_points();
        // Interior points and duplicates must not appear in the output.
        pts.push(Point::new(0.5, 0.5, 0.5));
        pts.push(Point::new(1.0, 1.0, 1.0));

        let (vertices, triangles) = try_convex_hull(&pts).unwrap();
        assert_eq!(vertices.len(), 8);
        assert_eq!(triangles.len(), 12);
        check_convex_hull(&vertices, &triangles).unwrap();
        assert_relative_eq!(convex_hull_volume(&vertices, &triangles), 1.0, epsilon = 1.0e-9);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(try_convex_hull(&[]), Err(ConvexHullError::IncompleteInput));
        assert_eq!(
            try_convex_hull(&cube_points()[..3]),
            Err(ConvexHullError::IncompleteInput)
        );

        let square = [
            Point::new(0.0, 0.0, 2.0),
            Point::new(1.0, 0.0, 2.0),
            Point::new(1.0, 1.0, 2.0),
            Point::new(0.0, 1.0, 2.0),
            Point::new(0.5, 0.5, 2.0),
        ];
        assert_eq!(
            try_convex_hull(&square),
            Err(ConvexHullError::Degenerate { dimension: 2 })
        );

        let same = [Point::new(1.0, 2.0, 3.0); 6];
        assert_eq!(
            try_convex_hull(&same),
            Err(ConvexHullError::Degenerate { dimension: 0 })
        );
    }

    #[test]
    fn nan_input() {
        let mut pts = cube_points();
        pts[3].y = f64::NAN;
        assert_eq!(try_convex_hull(&pts), Err(ConvexHullError::MissingSupportPoint));
    }
}
