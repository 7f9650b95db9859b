//! Ear-clipping algorithm for creating a triangle mesh from a simple polygon.
//! Based on <https://github.com/ivanfratric/polypartition>, contributed by embotech AG.

use crate::math::{Point, Real, Vector};
use crate::utils::{corner_direction, is_point_in_triangle, Orientation};
use na::Point2;

#[derive(Clone, Default)]
struct VertexInfo {
    is_active: bool,
    is_ear: bool,
    pointiness: Real,
    p_prev: usize,
    p_next: usize,
}

fn update_vertex(idx: usize, vertex_info: &mut VertexInfo, points: &[Point2<Real>]) -> bool {
    let p = points[idx];
    let p1 = points[vertex_info.p_prev];
    let p3 = points[vertex_info.p_next];

    let vec1 = (p1 - p).normalize();
    let vec3 = (p3 - p).normalize();
    vertex_info.pointiness = vec1.dot(&vec3);
    if vertex_info.pointiness.is_nan() {
        return false;
    }

    // A point is considered an ear when it is convex and no other points are
    // inside the triangle spanned by it and its two neighbors.
    let mut error = false;
    vertex_info.is_ear = corner_direction(&p1, &p, &p3) == Orientation::Ccw
        && (0..points.len())
            .filter(|&i| i != vertex_info.p_prev && i != idx && i != vertex_info.p_next)
            .all(|i| {
                if let Some(is) = is_point_in_triangle(&points[i], &p1, &p, &p3) {
                    !is
                } else {
                    error = true;
                    true
                }
            });
    !error
}

/// Triangulates a simple, counter-clockwise 2D polygon.
///
/// Returns `None` if the polygon is not simple, is clockwise, or has fewer than
/// three vertices.
pub fn triangulate_ear_clipping(vertices: &[Point2<Real>]) -> Option<Vec<[u32; 3]>> {
    let n_vertices = vertices.len();

    if n_vertices < 3 {
        return None;
    }

    let mut vertex_info = vec![VertexInfo::default(); n_vertices];

    let success = vertex_info.iter_mut().enumerate().all(|(i, info)| {
        info.is_active = true;
        info.p_prev = if i == 0 { n_vertices - 1 } else { i - 1 };
        info.p_next = if i == n_vertices - 1 { 0 } else { i + 1 };
        update_vertex(i, info, vertices)
    });
    if !success {
        return None;
    }

    let mut output_indices = Vec::with_capacity(n_vertices - 2);

    for i in 0..n_vertices - 3 {
        // Search through all active ears and pick out the pointiest.
        let (ear_i, _) = vertex_info
            .iter()
            .enumerate()
            .filter(|(_, info)| info.is_active && info.is_ear)
            .max_by(|(_, info1), (_, info2)| info1.pointiness.total_cmp(&info2.pointiness))?;

        vertex_info[ear_i].is_active = false;

        let VertexInfo { p_prev, p_next, .. } = vertex_info[ear_i];
        output_indices.push([p_prev as u32, ear_i as u32, p_next as u32]);

        vertex_info[p_prev].p_next = p_next;
        vertex_info[p_next].p_prev = p_prev;

        // Only three vertices remain and those are guaranteed to be convex so
        // there is no point in updating the remaining vertex information.
        if i == n_vertices - 4 {
            break;
        };

        if !update_vertex(p_prev, &mut vertex_info[p_prev], vertices)
            || !update_vertex(p_next, &mut vertex_info[p_next], vertices)
        {
            return None;
        }
    }

    let (i, info) = vertex_info
        .iter()
        .enumerate()
        .find(|(_, info)| info.is_active)?;
    output_indices.push([info.p_prev as u32, i as u32, info.p_next as u32]);

    Some(output_indices)
}

/// The (non-normalized) Newell normal of a 3D polygon.
///
/// Its direction is the one from which the polygon appears counter-clockwise.
pub fn newell_normal(points: &[Point<Real>], polygon: &[u32]) -> Vector<Real> {
    let mut normal = Vector::zeros();

    for (k, curr) in polygon.iter().enumerate() {
        let next = polygon[(k + 1) % polygon.len()];
        let a = points[*curr as usize];
        let b = points[next as usize];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }

    normal
}

/// Triangulates a (possibly non-convex) planar 3D polygon given as indices into `points`.
///
/// The polygon is projected onto the plane orthogonal to its Newell normal and
/// triangulated by ear clipping. If ear clipping fails (self-intersecting or
/// degenerate polygon), a triangle fan is used instead. The output triangles
/// index `points` directly and keep the winding of the input polygon.
pub fn triangulate_polygon(points: &[Point<Real>], polygon: &[u32]) -> Vec<[u32; 3]> {
    match polygon.len() {
        0..=2 => return Vec::new(),
        3 => return vec![[polygon[0], polygon[1], polygon[2]]],
        _ => {}
    }

    let fan = || {
        (1..polygon.len() - 1)
            .map(|i| [polygon[0], polygon[i], polygon[i + 1]])
            .collect()
    };

    let normal = match newell_normal(points, polygon).try_normalize(0.0) {
        Some(n) => n,
        None => return fan(),
    };

    let (u, v) = plane_basis(&normal);
    let projected: Vec<_> = polygon
        .iter()
        .map(|i| {
            let pt = points[*i as usize].coords;
            Point2::new(pt.dot(&u), pt.dot(&v))
        })
        .collect();

    match triangulate_ear_clipping(&projected) {
        Some(triangles) => triangles
            .into_iter()
            .map(|t| t.map(|i| polygon[i as usize]))
            .collect(),
        None => fan(),
    }
}

/// Two unit vectors `u` and `v` such that `(u, v, normal)` is a right-handed orthonormal basis.
pub fn plane_basis(normal: &Vector<Real>) -> (Vector<Real>, Vector<Real>) {
    let imin = normal.iamin();
    let u = normal.cross(&Vector::ith(imin, 1.0)).normalize();
    let v = normal.cross(&u);
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_ccw() {
        let vertices = vec![Point2::new(0., 0.), Point2::new(1., 0.), Point2::new(1., 1.)];
        let triangles = triangulate_ear_clipping(&vertices);
        assert_eq!(triangles.unwrap(), vec![[2, 0, 1]]);
    }

    #[test]
    fn square_ccw() {
        let vertices = vec![
            Point2::new(0., 0.), // 0
            Point2::new(1., 0.), // 1
            Point2::new(1., 1.), // 2
            Point2::new(0., 1.), // 3
        ];
        let triangles = triangulate_ear_clipping(&vertices);
        assert_eq!(triangles.unwrap(), vec![[2, 3, 0], [2, 0, 1]]);
    }

    #[test]
    fn square_cw_fails() {
        let vertices = vec![
            Point2::new(0., 0.),
            Point2::new(0., 1.),
            Point2::new(1., 1.),
            Point2::new(1., 0.),
        ];
        assert!(triangulate_ear_clipping(&vertices).is_none());
    }

    #[test]
    fn non_convex_3d_polygon_keeps_winding() {
        // An L-shaped polygon in the plane x = 1, counter-clockwise around +x.
        let points = vec![
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 2.0, 0.0),
            Point::new(1.0, 2.0, 1.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(1.0, 1.0, 2.0),
            Point::new(1.0, 0.0, 2.0),
        ];
        let polygon = [0, 1, 2, 3, 4, 5];
        let triangles = triangulate_polygon(&points, &polygon);

        assert_eq!(triangles.len(), 4);
        let mut area = 0.0;
        for t in &triangles {
            let [a, b, c] = t.map(|i| points[i as usize]);
            let n = (b - a).cross(&(c - a));
            assert!(n.x > 0.0);
            area += n.norm() / 2.0;
        }
        assert_relative_eq!(area, 3.0, epsilon = 1.0e-12);
    }

    #[test]
    fn newell_normal_of_square() {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(2.0, 2.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        ];
        let n = newell_normal(&points, &[0, 1, 2, 3]);
        assert_relative_eq!(n, Vector::new(0.0, 0.0, 8.0));
    }
}
