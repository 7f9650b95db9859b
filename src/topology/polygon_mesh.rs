use super::TopologyError;
use crate::math::{Point, Real, Vector};
use crate::transformation::newell_normal;
use crate::utils::hashmap::HashMap;
use crate::utils::SortedPair;
use smallvec::SmallVec;

/// A polygonal face, given as the indices of its vertices in counter-clockwise order.
pub type Polygon = SmallVec<[u32; 4]>;

/// The face index carried by border half-edges.
pub const BORDER_FACE: u32 = u32::MAX;

/// A half-edge of a [`PolygonMesh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HalfEdge {
    /// The half-edge with opposite direction on the adjacent face (or on the border).
    pub twin: u32,
    /// The next half-edge on the same face (or on the same border loop).
    pub next: u32,
    /// The previous half-edge on the same face (or on the same border loop).
    pub prev: u32,
    /// The first vertex of this edge.
    pub vertex: u32,
    /// The face associated to this half-edge, or [`BORDER_FACE`].
    pub face: u32,
}

impl HalfEdge {
    /// Is this half-edge part of a border loop?
    #[inline]
    pub fn is_border(&self) -> bool {
        self.face == BORDER_FACE
    }
}

/// A polygonal surface mesh with its half-edge topology.
///
/// Every edge of the mesh is represented by two twin half-edges. Edges adjacent
/// to a single face have a border half-edge as twin, and border half-edges are
/// linked into loops around each hole.
#[derive(Clone, Debug, Default)]
pub struct PolygonMesh {
    points: Vec<Point<Real>>,
    polygons: Vec<Polygon>,
    half_edges: Vec<HalfEdge>,
    face_half_edges: Vec<u32>,
    vertex_half_edges: Vec<u32>,
}

impl PolygonMesh {
    /// Builds the half-edge topology of a set of polygons.
    ///
    /// This fails if the polygons are empty, degenerate, share an edge between
    /// more than two of them, or are not consistently oriented. A successful
    /// construction does not imply [`PolygonMesh::is_valid`], which also checks
    /// the neighborhood of every vertex.
    pub fn new(points: Vec<Point<Real>>, polygons: Vec<Polygon>) -> Result<Self, TopologyError> {
        if polygons.is_empty() {
            return Err(TopologyError::Empty);
        }

        let mut result = PolygonMesh {
            points,
            polygons,
            ..Default::default()
        };
        result.compute_topology()?;
        Ok(result)
    }

    fn compute_topology(&mut self) -> Result<(), TopologyError> {
        let num_points = self.points.len() as u32;
        let mut edge_count: HashMap<SortedPair<u32>, u32> = HashMap::default();

        for (fid, poly) in self.polygons.iter().enumerate() {
            let degenerate = poly.len() < 3
                || poly.iter().any(|i| *i >= num_points)
                || poly
                    .iter()
                    .enumerate()
                    .any(|(k, i)| poly[k + 1..].contains(i));

            if degenerate {
                return Err(TopologyError::DegeneratePolygon(fid as u32));
            }

            for (a, b) in polygon_edges(poly) {
                let key = SortedPair::new(a, b);
                let count = edge_count.entry(key).or_insert(0);
                *count += 1;

                if *count > 2 {
                    return Err(TopologyError::NonManifoldEdge(*key));
                }
            }
        }

        self.half_edges.clear();
        self.face_half_edges.clear();

        let mut half_edge_map: HashMap<(u32, u32), u32> = HashMap::default();

        // First, create the half-edges of each face.
        for (fid, poly) in self.polygons.iter().enumerate() {
            let base_id = self.half_edges.len() as u32;
            let n = poly.len() as u32;

            for (k, (a, b)) in polygon_edges(poly).enumerate() {
                let k = k as u32;
                self.half_edges.push(HalfEdge {
                    // Unknown yet.
                    twin: u32::MAX,
                    next: base_id + (k + 1) % n,
                    prev: base_id + (k + n - 1) % n,
                    vertex: a,
                    face: fid as u32,
                });

                if let Some(existing) = half_edge_map.insert((a, b), base_id + k) {
                    return Err(TopologyError::InconsistentOrientation {
                        face1: self.half_edges[existing as usize].face,
                        face2: fid as u32,
                        edge: (a, b),
                    });
                }
            }

            self.face_half_edges.push(base_id);
        }

        // Second, identify twins, or create border half-edges.
        let num_interior = self.half_edges.len();

        for i in 0..num_interior {
            if self.half_edges[i].twin != u32::MAX {
                continue;
            }

            let a = self.half_edges[i].vertex;
            let b = self.half_edges[self.half_edges[i].next as usize].vertex;

            if let Some(j) = half_edge_map.get(&(b, a)) {
                self.half_edges[i].twin = *j;
                self.half_edges[*j as usize].twin = i as u32;
            } else {
                let border_id = self.half_edges.len() as u32;
                self.half_edges.push(HalfEdge {
                    twin: i as u32,
                    next: u32::MAX,
                    prev: u32::MAX,
                    vertex: b,
                    face: BORDER_FACE,
                });
                self.half_edges[i].twin = border_id;
            }
        }

        // Third, link the border half-edges by rotating around their end vertex.
        for border_id in num_interior..self.half_edges.len() {
            let mut curr = self.half_edges[border_id].twin;
            let mut found = false;

            for _ in 0..num_interior {
                let prev = self.half_edges[curr as usize].prev;
                let outgoing = self.half_edges[prev as usize].twin;

                if self.half_edges[outgoing as usize].is_border() {
                    self.half_edges[border_id].next = outgoing;
                    self.half_edges[outgoing as usize].prev = border_id as u32;
                    found = true;
                    break;
                }

                curr = outgoing;
            }

            if !found {
                return Err(TopologyError::InvalidHalfEdgeStructure);
            }
        }

        // A border half-edge is preferred as the vertex representative.
        self.vertex_half_edges = vec![u32::MAX; self.points.len()];
        for (i, he) in self.half_edges.iter().enumerate() {
            let repr = &mut self.vertex_half_edges[he.vertex as usize];
            if *repr == u32::MAX || he.is_border() {
                *repr = i as u32;
            }
        }

        Ok(())
    }

    /// The vertices of this mesh.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The faces of this mesh.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// The half-edges of this mesh. Border half-edges come after every face half-edge.
    #[inline]
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// The half-edge starting at the first vertex of the face `fid`.
    #[inline]
    pub fn face_half_edge(&self, fid: u32) -> u32 {
        self.face_half_edges[fid as usize]
    }

    /// A half-edge starting at the vertex `vid`, if the vertex is not isolated.
    ///
    /// If the vertex is on the border, this is its outgoing border half-edge.
    pub fn vertex_half_edge(&self, vid: u32) -> Option<u32> {
        let he = self.vertex_half_edges[vid as usize];
        (he != u32::MAX).then_some(he)
    }

    /// The number of vertices of this mesh.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    /// The number of faces of this mesh.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.polygons.len()
    }

    /// The number of edges adjacent to a single face.
    pub fn num_border_edges(&self) -> usize {
        self.half_edges.iter().filter(|he| he.is_border()).count()
    }

    /// Does this mesh have no border?
    pub fn is_closed(&self) -> bool {
        self.half_edges.iter().all(|he| !he.is_border())
    }

    /// Are all the faces of this mesh triangles?
    pub fn is_triangle_mesh(&self) -> bool {
        self.polygons.iter().all(|poly| poly.len() == 3)
    }

    /// The (non-normalized) Newell normal of the face `fid`.
    pub fn face_normal(&self, fid: u32) -> Vector<Real> {
        newell_normal(&self.points, &self.polygons[fid as usize])
    }

    /// Checks the consistency of the half-edge structure.
    ///
    /// Beyond the link consistency, this requires the faces around each vertex
    /// to form a single fan (closed, or open on the border).
    pub fn is_valid(&self) -> bool {
        let len = self.half_edges.len() as u32;

        for (i, he) in self.half_edges.iter().enumerate() {
            let i = i as u32;

            if he.twin >= len || he.next >= len || he.prev >= len || he.twin == i {
                return false;
            }

            let twin = &self.half_edges[he.twin as usize];
            let next = &self.half_edges[he.next as usize];

            if twin.twin != i
                || next.prev != i
                || self.half_edges[he.prev as usize].next != i
                || twin.vertex != next.vertex
                || next.face != he.face
                || (he.is_border() && twin.is_border())
            {
                return false;
            }
        }

        for (fid, poly) in self.polygons.iter().enumerate() {
            let mut curr = self.face_half_edges[fid];

            for vid in poly {
                let he = &self.half_edges[curr as usize];
                if he.vertex != *vid || he.face != fid as u32 {
                    return false;
                }
                curr = he.next;
            }

            if curr != self.face_half_edges[fid] {
                return false;
            }
        }

        let mut num_outgoing = vec![0usize; self.points.len()];
        for he in &self.half_edges {
            num_outgoing[he.vertex as usize] += 1;
        }

        for (vid, start) in self.vertex_half_edges.iter().enumerate() {
            if *start == u32::MAX {
                continue;
            }

            let mut curr = *start;
            let mut num_visited = 0;

            loop {
                num_visited += 1;

                if num_visited > num_outgoing[vid] {
                    return false;
                }

                let prev = self.half_edges[curr as usize].prev;
                curr = self.half_edges[prev as usize].twin;

                if curr == *start {
                    break;
                }
            }

            if num_visited != num_outgoing[vid] {
                return false;
            }
        }

        true
    }

    /// The vertex loops bounding the holes of this mesh.
    ///
    /// A loop traverses its vertices in the direction of its border half-edges, so a
    /// polygon built from it is oriented consistently with the adjacent faces.
    pub fn border_loops(&self) -> Vec<Vec<u32>> {
        let mut visited = vec![false; self.half_edges.len()];
        let mut result = Vec::new();

        for (i, he) in self.half_edges.iter().enumerate() {
            if !he.is_border() || visited[i] {
                continue;
            }

            let mut border_loop = Vec::new();
            let mut curr = i as u32;

            while !visited[curr as usize] {
                visited[curr as usize] = true;
                border_loop.push(self.half_edges[curr as usize].vertex);
                curr = self.half_edges[curr as usize].next;
            }

            result.push(border_loop);
        }

        result
    }

    /// Consumes this mesh and returns its vertices and faces.
    pub fn into_parts(self) -> (Vec<Point<Real>>, Vec<Polygon>) {
        (self.points, self.polygons)
    }
}

fn polygon_edges(poly: &[u32]) -> impl Iterator<Item = (u32, u32)> + '_ {
    (0..poly.len()).map(move |k| (poly[k], poly[(k + 1) % poly.len()]))
}

#[cfg(test)]
mod test {
    use super::{Polygon, PolygonMesh};
    use crate::math::Point;
    use crate::topology::TopologyError;
    use smallvec::smallvec;

    fn cube_quads() -> (Vec<Point<f64>>, Vec<Polygon>) {
        let points = (0..8)
            .map(|i| Point::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
            .collect();
        let polygons = vec![
            smallvec![0, 2, 3, 1], // z = 0
            smallvec![4, 5, 7, 6], // z = 1
            smallvec![0, 1, 5, 4], // y = 0
            smallvec![2, 6, 7, 3], // y = 1
            smallvec![0, 4, 6, 2], // x = 0
            smallvec![1, 3, 7, 5], // x = 1
        ];
        (points, polygons)
    }

    #[test]
    fn closed_cube() {
        let (points, polygons) = cube_quads();
        let mesh = PolygonMesh::new(points, polygons).unwrap();

        assert!(mesh.is_valid());
        assert!(mesh.is_closed());
        assert!(!mesh.is_triangle_mesh());
        assert_eq!(mesh.half_edges().len(), 24);
        assert!(mesh.border_loops().is_empty());
        assert!(mesh.face_normal(0).z < 0.0);
        assert!(mesh.face_normal(1).z > 0.0);
    }

    #[test]
    fn open_box_has_one_border_loop() {
        let (points, mut polygons) = cube_quads();
        let _ = polygons.remove(1);
        let mesh = PolygonMesh::new(points, polygons).unwrap();

        assert!(mesh.is_valid());
        assert!(!mesh.is_closed());
        assert_eq!(mesh.num_border_edges(), 4);

        let loops = mesh.border_loops();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);

        // The cap built from the loop has the orientation of the removed face.
        let mut cap = loops[0].clone();
        while cap[0] != 4 {
            cap.rotate_left(1);
        }
        assert_eq!(cap, vec![4, 5, 7, 6]);
    }

    #[test]
    fn topology_errors() {
        let (points, mut polygons) = cube_quads();
        polygons[1].reverse();
        assert!(matches!(
            PolygonMesh::new(points.clone(), polygons),
            Err(TopologyError::InconsistentOrientation { .. })
        ));

        let fin: Vec<Polygon> = vec![smallvec![0, 1, 2], smallvec![1, 0, 3], smallvec![0, 1, 4]];
        assert_eq!(
            PolygonMesh::new(points.clone(), fin).err(),
            Some(TopologyError::NonManifoldEdge((0, 1)))
        );

        let degenerate: Vec<Polygon> = vec![smallvec![0, 1, 1]];
        assert_eq!(
            PolygonMesh::new(points.clone(), degenerate).err(),
            Some(TopologyError::DegeneratePolygon(0))
        );
        assert_eq!(
            PolygonMesh::new(points, Vec::new()).err(),
            Some(TopologyError::Empty)
        );
    }

    #[test]
    fn bowtie_vertex_is_invalid() {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(-1.0, 0.0, 0.0),
            Point::new(-1.0, -1.0, 0.0),
        ];
        let polygons = vec![smallvec![0, 1, 2], smallvec![0, 3, 4]];
        let mesh = PolygonMesh::new(points, polygons).unwrap();

        assert!(!mesh.is_valid());
    }
}
