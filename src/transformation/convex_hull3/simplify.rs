use super::{try_convex_hull, ConvexHullError};
use crate::kernel::triangle_area;
use crate::math::{Point, Real};

/// Computes the convex hull of `points` with at most `max_vertices` vertices.
///
/// When the full hull has too many vertices, a subset is selected greedily: starting
/// from a large initial tetrahedron, the hull vertex furthest outside of the hull of
/// the current selection is added until the budget is reached. The result is always
/// contained in the exact hull. A budget smaller than 4 is treated as 4.
pub fn simplify_hull(
    points: &[Point<Real>],
    max_vertices: usize,
) -> Result<(Vec<Point<Real>>, Vec<[u32; 3]>), ConvexHullError> {
    let max_vertices = max_vertices.max(4);
    let (vertices, triangles) = try_convex_hull(points)?;

    if vertices.len() <= max_vertices {
        return Ok((vertices, triangles));
    }

    let mut selected = initial_tetrahedron(&vertices)?;
    let mut in_selection = vec![false; vertices.len()];
    for i in &selected {
        in_selection[*i] = true;
    }

    let mut selection: Vec<_> = selected.iter().map(|i| vertices[*i]).collect();
    let (mut hull_pts, mut hull_tris) = try_convex_hull(&selection)?;

    while selected.len() < max_vertices {
        let mut furthest = None;
        let mut furthest_dist = 0.0;

        for (i, pt) in vertices.iter().enumerate() {
            if in_selection[i] {
                continue;
            }

            let dist = distance_outside(&hull_pts, &hull_tris, pt);

            if dist > furthest_dist {
                furthest_dist = dist;
                furthest = Some(i);
            }
        }

        let Some(best) = furthest else {
            break;
        };

        in_selection[best] = true;
        selected.push(best);
        selection.push(vertices[best]);

        let (pts, tris) = try_convex_hull(&selection)?;
        hull_pts = pts;
        hull_tris = tris;
    }

    log::debug!(
        "Simplified convex hull from {} to {} vertices.",
        vertices.len(),
        hull_pts.len()
    );

    Ok((hull_pts, hull_tris))
}

// Largest signed distance from `pt` to the supporting planes of an outward-oriented hull.
fn distance_outside(points: &[Point<Real>], triangles: &[[u32; 3]], pt: &Point<Real>) -> Real {
    let mut result = -Real::MAX;

    for tri in triangles {
        let a = points[tri[0] as usize];
        let b = points[tri[1] as usize];
        let c = points[tri[2] as usize];

        if let Some(n) = (b - a).cross(&(c - a)).try_normalize(0.0) {
            result = result.max(n.dot(&(pt - a)));
        }
    }

    result
}

fn initial_tetrahedron(points: &[Point<Real>]) -> Result<Vec<usize>, ConvexHullError> {
    let mut extremes = [0; 6];

    for (i, pt) in points.iter().enumerate() {
        for k in 0..3 {
            if pt[k] < points[extremes[k * 2]][k] {
                extremes[k * 2] = i;
            }
            if pt[k] > points[extremes[k * 2 + 1]][k] {
                extremes[k * 2 + 1] = i;
            }
        }
    }

    // The two most distant extreme points.
    let mut p1 = extremes[0];
    let mut p2 = extremes[1];
    let mut best = 0.0;
    for i in extremes {
        for j in extremes {
            let dist = na::distance_squared(&points[i], &points[j]);
            if dist > best {
                best = dist;
                p1 = i;
                p2 = j;
            }
        }
    }

    let p3 = (0..points.len())
        .max_by(|a, b| {
            triangle_area(&points[p1], &points[p2], &points[*a])
                .total_cmp(&triangle_area(&points[p1], &points[p2], &points[*b]))
        })
        .ok_or(ConvexHullError::MissingSupportPoint)?;

    let n = (points[p2] - points[p1]).cross(&(points[p3] - points[p1]));
    let p4 = (0..points.len())
        .max_by(|a, b| {
            n.dot(&(points[*a] - points[p1]))
                .abs()
                .total_cmp(&n.dot(&(points[*b] - points[p1])).abs())
        })
        .ok_or(ConvexHullError::MissingSupportPoint)?;

    let result = vec![p1, p2, p3, p4];
    for i in 0..4 {
        for j in i + 1..4 {
            if result[i] == result[j] {
                return Err(ConvexHullError::Degenerate { dimension: 2 });
            }
        }
    }

    Ok(result)
}
