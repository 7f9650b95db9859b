use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// Tests if a triangle intersects an AABB, using the separating axis theorem.
///
/// The tested axes are the three AABB face normals, the triangle normal, and the
/// nine cross products between the AABB axes and the triangle edges.
pub(crate) fn triangle_aabb_overlap(aabb: &Aabb, triangle: &[Point<Real>; 3]) -> bool {
    let center = aabb.center();
    let half_extents = aabb.half_extents();
    let v = [
        triangle[0] - center,
        triangle[1] - center,
        triangle[2] - center,
    ];

    for k in 0..3 {
        let min = v[0][k].min(v[1][k]).min(v[2][k]);
        let max = v[0][k].max(v[1][k]).max(v[2][k]);

        if min > half_extents[k] || max < -half_extents[k] {
            return false;
        }
    }

    let edges = [v[1] - v[0], v[2] - v[1], v[0] - v[2]];

    for edge in &edges {
        for k in 0..3 {
            let axis = Vector::ith(k, 1.0).cross(edge);

            if is_separating_axis(&axis, &v, &half_extents) {
                return false;
            }
        }
    }

    let normal = edges[0].cross(&edges[1]);
    !is_separating_axis(&normal, &v, &half_extents)
}

fn is_separating_axis(axis: &Vector<Real>, v: &[Vector<Real>; 3], half_extents: &Vector<Real>) -> bool {
    let p0 = axis.dot(&v[0]);
    let p1 = axis.dot(&v[1]);
    let p2 = axis.dot(&v[2]);
    let radius = half_extents.dot(&axis.abs());

    p0.min(p1).min(p2) > radius || p0.max(p1).max(p2) < -radius
}
