use crate::bounding_volume::Aabb;
use crate::kernel::{orient3d, orientation3d, Sign};
use crate::math::{Point, Real};
use smallvec::SmallVec;

/// Tests whether two triangles of a closed surface intersect anywhere else than along
/// the vertices and edges they share.
///
/// All the decisions are made with exact orientation predicates. Intersections
/// between coplanar triangles that do not share an edge are not detected.
pub fn triangles_intersect(points: &[Point<Real>], t1: [u32; 3], t2: [u32; 3]) -> bool {
    let pt = |i: u32| &points[i as usize];
    let shared: SmallVec<[(usize, usize); 3]> = (0..3)
        .flat_map(|k1| (0..3).map(move |k2| (k1, k2)))
        .filter(|(k1, k2)| t1[*k1] == t2[*k2])
        .collect();

    match shared.len() {
        3 => true,
        2 => {
            // Adjacent triangles only intersect if they are folded onto each other.
            let o1 = t1[3 - shared[0].0 - shared[1].0];
            let o2 = t2[3 - shared[0].1 - shared[1].1];

            if orient3d(pt(t1[0]), pt(t1[1]), pt(t1[2]), pt(o2)) != 0.0 {
                return false;
            }

            let e0 = pt(t1[shared[0].0]);
            let axis = pt(t1[shared[1].0]) - e0;
            let n1 = axis.cross(&(pt(o1) - e0));
            let n2 = axis.cross(&(pt(o2) - e0));
            n1.dot(&n2) > 0.0
        }
        1 => {
            let (k1, k2) = shared[0];
            let (p1, q1) = (t1[(k1 + 1) % 3], t1[(k1 + 2) % 3]);
            let (p2, q2) = (t2[(k2 + 1) % 3], t2[(k2 + 2) % 3]);

            segment_crosses_triangle(points, t1, pt(p2), pt(q2))
                || segment_crosses_triangle(points, t2, pt(p1), pt(q1))
        }
        _ => (0..3).any(|k| {
            segment_crosses_triangle(points, t2, pt(t1[k]), pt(t1[(k + 1) % 3]))
                || segment_crosses_triangle(points, t1, pt(t2[k]), pt(t2[(k + 1) % 3]))
        }),
    }
}

/// Does the segment `[p, q]` touch the triangle `tri`? Coplanar configurations are ignored.
fn segment_crosses_triangle(
    points: &[Point<Real>],
    tri: [u32; 3],
    p: &Point<Real>,
    q: &Point<Real>,
) -> bool {
    let [a, b, c] = tri.map(|i| &points[i as usize]);
    let sp = orientation3d(a, b, c, p);
    let sq = orientation3d(a, b, c, q);

    if sp == sq {
        // Both on the same side, or both on the plane.
        return false;
    }

    let signs = [
        orientation3d(p, q, a, b),
        orientation3d(p, q, b, c),
        orientation3d(p, q, c, a),
    ];

    !(signs.contains(&Sign::Positive) && signs.contains(&Sign::Negative))
}

/// Tests if any two triangles of a closed triangle mesh intersect each other.
///
/// Candidate pairs are found with a sweep along the `x` axis over the triangle
/// bounding boxes.
pub fn has_self_intersections(points: &[Point<Real>], triangles: &[[u32; 3]]) -> bool {
    let aabbs: Vec<Aabb> = triangles
        .iter()
        .map(|tri| Aabb::from_points(tri.iter().map(|i| &points[*i as usize])))
        .collect();
    let mut order: Vec<usize> = (0..triangles.len()).collect();
    order.sort_by(|a, b| aabbs[*a].mins.x.total_cmp(&aabbs[*b].mins.x));

    for (k, i) in order.iter().enumerate() {
        for j in &order[k + 1..] {
            if aabbs[*j].mins.x > aabbs[*i].maxs.x {
                break;
            }

            if aabbs[*i].intersects(&aabbs[*j])
                && triangles_intersect(points, triangles[*i], triangles[*j])
            {
                log::debug!("Triangles {} and {} intersect.", i, j);
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod test {
    use super::triangles_intersect;
    use crate::math::Point;

    fn points() -> Vec<Point<f64>> {
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
            // A triangle piercing the first one.
            Point::new(0.5, 0.5, -1.0),
            Point::new(0.5, 0.5, 1.0),
            Point::new(3.0, 3.0, 0.0),
            // A triangle above the first one.
            Point::new(0.0, 0.0, 1.0),
            Point::new(2.0, 0.0, 1.0),
            Point::new(0.0, 2.0, 1.0),
            // Folded onto the first one.
            Point::new(1.0, -1.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn disjoint_and_piercing_triangles() {
        let pts = points();
        assert!(triangles_intersect(&pts, [0, 1, 2], [3, 4, 5]));
        assert!(!triangles_intersect(&pts, [0, 1, 2], [6, 7, 8]));
    }

    #[test]
    fn adjacent_triangles() {
        let pts = points();
        // Sharing the edge (0, 1), on the other side: no intersection.
        assert!(!triangles_intersect(&pts, [0, 1, 2], [1, 0, 9]));
        // Sharing the edge (0, 1), folded back onto the first triangle.
        assert!(triangles_intersect(&pts, [0, 1, 2], [1, 0, 10]));
        // Sharing a vertex only.
        assert!(!triangles_intersect(&pts, [0, 1, 2], [0, 6, 8]));
        assert!(triangles_intersect(&pts, [0, 1, 2], [1, 3, 4]));
    }
}
