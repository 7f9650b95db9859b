use crate::kernel::is_affinely_dependent_triangle;
use crate::math::{Point, Real, Vector};

#[derive(Debug)]
pub struct TriangleFacet {
    pub valid: bool,
    pub affinely_dependent: bool,
    pub normal: Vector<Real>,
    pub adj: [usize; 3],
    pub indirect_adj_id: [usize; 3],
    pub pts: [usize; 3],
    pub visible_points: Vec<usize>,
    pub furthest_point: usize,
    pub furthest_distance: Real,
}

impl TriangleFacet {
    pub fn new(p1: usize, p2: usize, p3: usize, points: &[Point<Real>]) -> TriangleFacet {
        let p1p2 = points[p2] - points[p1];
        let p1p3 = points[p3] - points[p1];
        let affinely_dependent = is_affinely_dependent_triangle(&points[p1], &points[p2], &points[p3]);
        let normal = p1p2.cross(&p1p3).try_normalize(0.0).unwrap_or_else(Vector::zeros);

        TriangleFacet {
            valid: true,
            affinely_dependent,
            normal,
            adj: [0, 0, 0],
            indirect_adj_id: [0, 0, 0],
            pts: [p1, p2, p3],
            visible_points: Vec::new(),
            furthest_point: usize::MAX,
            furthest_distance: 0.0,
        }
    }

    /// Registers a point seeing this facet. Points too close to the facet plane are ignored.
    pub fn add_visible_point(&mut self, pid: usize, points: &[Point<Real>]) {
        let distance = self.distance_to_point(pid, points);

        if distance <= crate::math::DEFAULT_EPSILON {
            return;
        }

        if distance > self.furthest_distance {
            self.furthest_distance = distance;
            self.furthest_point = pid;
        }

        self.visible_points.push(pid);
    }

    pub fn distance_to_point(&self, point: usize, points: &[Point<Real>]) -> Real {
        self.normal.dot(&(points[point] - points[self.pts[0]]))
    }

    pub fn set_facets_adjacency(
        &mut self,
        adj1: usize,
        adj2: usize,
        adj3: usize,
        id_adj1: usize,
        id_adj2: usize,
        id_adj3: usize,
    ) {
        self.indirect_adj_id = [id_adj1, id_adj2, id_adj3];
        self.adj = [adj1, adj2, adj3];
    }

    pub fn first_point_from_edge(&self, id: usize) -> usize {
        self.pts[id]
    }

    pub fn second_point_from_edge(&self, id: usize) -> usize {
        self.pts[(id + 1) % 3]
    }

    pub fn can_see_point(&self, point: usize, points: &[Point<Real>]) -> bool {
        if self.affinely_dependent {
            return false;
        }

        let p0 = points[self.pts[0]];
        let pt = points[point];

        (pt - p0).dot(&self.normal) >= crate::math::DEFAULT_EPSILON * 100.0
    }

    // Check that a given point can see this triangle from every one of its
    // vertices. This makes the visibility test independent of the vertex order.
    pub fn order_independent_can_be_seen_by_point(
        &self,
        point: usize,
        points: &[Point<Real>],
    ) -> bool {
        if self.affinely_dependent {
            return true;
        }

        let pt = points[point];
        self.pts
            .iter()
            .any(|i| (pt - points[*i]).dot(&self.normal) >= 0.0)
    }
}
