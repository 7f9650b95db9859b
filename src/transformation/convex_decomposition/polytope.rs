use crate::kernel::{tetrahedron_signed_volume, Plane, Sign};
use crate::math::{Point, Real};
use crate::topology::Polygon;
use crate::utils::hashmap::HashMap;
use crate::utils::{self, SortedPair};

/// A convex polytope given by its vertices and outward-oriented polygonal faces.
#[derive(Clone, Debug)]
pub struct ConvexPolytope {
    vertices: Vec<Point<Real>>,
    faces: Vec<Polygon>,
}

impl ConvexPolytope {
    /// Creates the polytope bounded by a closed convex triangle mesh oriented outward.
    pub fn from_convex_mesh(vertices: Vec<Point<Real>>, triangles: &[[u32; 3]]) -> Self {
        let faces = triangles.iter().map(|t| Polygon::from_slice(t)).collect();
        ConvexPolytope { vertices, faces }
    }

    /// The vertices of this polytope.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The faces of this polytope.
    #[inline]
    pub fn faces(&self) -> &[Polygon] {
        &self.faces
    }

    /// The volume of this polytope.
    pub fn volume(&self) -> Real {
        let centroid = self.centroid();
        let mut volume = 0.0;

        for face in &self.faces {
            let a = &self.vertices[face[0] as usize];

            for k in 1..face.len() - 1 {
                let b = &self.vertices[face[k] as usize];
                let c = &self.vertices[face[k + 1] as usize];
                // The centroid is below every outward-oriented face.
                volume -= tetrahedron_signed_volume(a, b, c, &centroid);
            }
        }

        volume
    }

    /// The mean of the vertices of this polytope. It is inside of the polytope.
    pub fn centroid(&self) -> Point<Real> {
        utils::center(&self.vertices)
    }

    /// Splits this polytope by a plane.
    ///
    /// Returns the parts on the positive and negative sides of the plane. Vertices
    /// closer than `tolerance` to the plane are considered to lie on it. Parts with
    /// a volume smaller than `min_volume` are discarded.
    pub fn split(
        &self,
        plane: &Plane,
        tolerance: Real,
        min_volume: Real,
    ) -> (Option<ConvexPolytope>, Option<ConvexPolytope>) {
        let sides: Vec<Sign> = self
            .vertices
            .iter()
            .map(|pt| plane.side_with_tolerance(pt, tolerance))
            .collect();

        if !sides.contains(&Sign::Negative) {
            return (Some(self.clone()), None);
        }

        if !sides.contains(&Sign::Positive) {
            return (None, Some(self.clone()));
        }

        let mut vertices = self.vertices.clone();
        let mut cut_vertices: HashMap<SortedPair<u32>, u32> = HashMap::default();
        let mut cap = Vec::new();
        let mut pos_faces = Vec::new();
        let mut neg_faces = Vec::new();

        for (vid, side) in sides.iter().enumerate() {
            if *side == Sign::Zero {
                cap.push(vid as u32);
            }
        }

        for face in &self.faces {
            let mut pos = Polygon::new();
            let mut neg = Polygon::new();

            for k in 0..face.len() {
                let v = face[k];
                let w = face[(k + 1) % face.len()];
                let (sv, sw) = (sides[v as usize], sides[w as usize]);

                if sv != Sign::Negative {
                    pos.push(v);
                }

                if sv != Sign::Positive {
                    neg.push(v);
                }

                if (sv == Sign::Positive && sw == Sign::Negative)
                    || (sv == Sign::Negative && sw == Sign::Positive)
                {
                    let key = SortedPair::new(v, w);
                    let cut = *cut_vertices.entry(key).or_insert_with(|| {
                        let (a, b) = *key;
                        vertices.push(plane.intersect_segment(&vertices[a as usize], &vertices[b as usize]));
                        cap.push(vertices.len() as u32 - 1);
                        vertices.len() as u32 - 1
                    });
                    pos.push(cut);
                    neg.push(cut);
                }
            }

            if pos.len() >= 3 {
                pos_faces.push(pos);
            }

            if neg.len() >= 3 {
                neg_faces.push(neg);
            }
        }

        if cap.len() >= 3 {
            let (u, v) = plane.basis();
            let center = utils::center(&cap.iter().map(|i| vertices[*i as usize]).collect::<Vec<_>>());
            let angle = |i: &u32| {
                let dir = vertices[*i as usize] - center;
                dir.dot(&v).atan2(dir.dot(&u))
            };

            cap.sort_by(|a, b| angle(a).total_cmp(&angle(b)));

            // Counter-clockwise around the plane normal: outward for the negative part.
            neg_faces.push(Polygon::from_slice(&cap));
            cap.reverse();
            pos_faces.push(Polygon::from_vec(cap));
        }

        let make_part = |faces: Vec<Polygon>| {
            let mut faces = faces;
            let mut vertices = vertices.clone();
            utils::remove_unused_polygon_points(&mut vertices, &mut faces);
            let part = ConvexPolytope { vertices, faces };
            (part.faces.len() >= 4 && part.volume() > min_volume).then_some(part)
        };

        (make_part(pos_faces), make_part(neg_faces))
    }
}

#[cfg(test)]
mod test {
    use super::ConvexPolytope;
    use crate::kernel::Plane;
    use crate::math::Point;
    use crate::transformation::try_convex_hull;

    fn unit_cube() -> ConvexPolytope {
        let points: Vec<_> = (0..8)
            .map(|i| Point::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
            .collect();
        let (vertices, triangles) = try_convex_hull(&points).unwrap();
        ConvexPolytope::from_convex_mesh(vertices, &triangles)
    }

    #[test]
    fn cube_split_in_halves() {
        let cube = unit_cube();
        assert_relative_eq!(cube.volume(), 1.0, epsilon = 1.0e-12);

        let plane = Plane::from_points(
            Point::new(0.0, 0.0, 0.25),
            Point::new(1.0, 0.0, 0.25),
            Point::new(0.0, 1.0, 0.25),
        )
        .unwrap();
        let (above, below) = cube.split(&plane, 1.0e-9, 0.0);
        let (above, below) = (above.unwrap(), below.unwrap());

        assert_relative_eq!(above.volume(), 0.75, epsilon = 1.0e-12);
        assert_relative_eq!(below.volume(), 0.25, epsilon = 1.0e-12);
        assert!(below.vertices().iter().all(|pt| pt.z <= 0.25 + 1.0e-12));
        assert!(above.centroid().z > 0.25);
    }

    #[test]
    fn split_by_a_supporting_plane() {
        let cube = unit_cube();
        let top = Plane::from_points(
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
        )
        .unwrap();
        let (above, below) = cube.split(&top, 1.0e-9, 0.0);

        assert!(above.is_none());
        assert_eq!(below.unwrap().vertices().len(), 8);
    }
}
