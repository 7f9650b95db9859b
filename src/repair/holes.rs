use crate::topology::{Polygon, PolygonMesh, TopologyError};
use crate::transformation::triangulate_polygon;

/// Caps every border loop of `mesh` with a triangulated patch.
///
/// Each loop is triangulated by ear clipping in the plane of its Newell normal,
/// with a triangle fan as fallback, and the cap is wound consistently with the
/// faces around the hole. The result is not guaranteed to have minimal area.
///
/// Returns the number of capped loops. On error, `mesh` is left untouched.
pub fn fill_holes(mesh: &mut PolygonMesh) -> Result<usize, TopologyError> {
    let loops = mesh.border_loops();

    if loops.is_empty() {
        return Ok(0);
    }

    let points = mesh.points().to_vec();
    let mut polygons = mesh.polygons().to_vec();
    let mut num_filled = 0;

    for border_loop in &loops {
        let cap = triangulate_polygon(&points, border_loop);

        if !cap.is_empty() {
            polygons.extend(cap.iter().map(|tri| Polygon::from_slice(tri)));
            num_filled += 1;
        }
    }

    *mesh = PolygonMesh::new(points, polygons)?;
    Ok(num_filled)
}

#[cfg(test)]
mod test {
    use super::fill_holes;
    use crate::math::Point;
    use crate::topology::{Polygon, PolygonMesh};
    use smallvec::smallvec;

    #[test]
    fn open_box_is_capped() {
        let points = (0..8)
            .map(|i| Point::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
            .collect();
        let polygons: Vec<Polygon> = vec![
            smallvec![0, 2, 3, 1],
            smallvec![0, 1, 5, 4],
            smallvec![2, 6, 7, 3],
            smallvec![0, 4, 6, 2],
            smallvec![1, 3, 7, 5],
        ];
        let mut mesh = PolygonMesh::new(points, polygons).unwrap();

        assert_eq!(fill_holes(&mut mesh), Ok(1));
        assert!(mesh.is_valid());
        assert!(mesh.is_closed());
        assert_eq!(mesh.num_faces(), 7);

        // The cap faces upward, like the missing face.
        assert!(mesh.face_normal(5).z > 0.0);
        assert!(mesh.face_normal(6).z > 0.0);

        // Nothing left to fill.
        assert_eq!(fill_holes(&mut mesh), Ok(0));
    }
}
