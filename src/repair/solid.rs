use super::triangle_intersection::has_self_intersections;
use super::{Polyhedron, RepairError};
use crate::bounding_volume::Aabb;
use crate::kernel::{triangle_area, Plane, Sign};
use crate::math::{Point, Real};
use crate::topology::{union_find, IntKey, Polygon, PolygonMesh};
use crate::transformation::triangulate_polygon;
use crate::utils::hashmap::{HashMap, HashSet};
use crate::utils;

/// A maximal set of edge-connected, coplanar boundary triangles of a [`Solid`]
/// facing the same direction.
#[derive(Clone, Debug)]
pub struct PlanarRegion {
    /// The oriented supporting plane, with its normal pointing outside of the solid.
    pub plane: Plane,
    /// The indices of the triangles of this region in [`Solid::triangles`].
    pub triangles: Vec<u32>,
}

/// A closed, outward-oriented, non-self-intersecting triangulated boundary
/// enclosing a non-zero volume.
///
/// The boundary may consist of several shells: a shell nested inside an odd
/// number of other shells bounds a cavity and is oriented inward.
#[derive(Clone, Debug)]
pub struct Solid {
    points: Vec<Point<Real>>,
    triangles: Vec<[u32; 3]>,
    triangle_regions: Vec<u32>,
    regions: Vec<PlanarRegion>,
    volume: Real,
}

impl Solid {
    /// Builds the solid bounded by a closed polyhedron.
    ///
    /// The faces are triangulated and every shell is oriented according to its
    /// nesting depth. This fails if a shell, or the whole solid, has a zero volume,
    /// or if the boundary intersects itself.
    pub fn from_polyhedron(polyhedron: &Polyhedron) -> Result<Self, RepairError> {
        let mesh = polyhedron.as_polygon_mesh();
        let mut points = mesh.points().to_vec();
        let mut triangles: Vec<[u32; 3]> = mesh
            .polygons()
            .iter()
            .flat_map(|poly| triangulate_polygon(&points, poly))
            .collect();
        utils::remove_unused_points(&mut points, &mut triangles);

        let aabb = Aabb::from_points(&points);
        let volume_eps = 1.0e-12 * aabb.diagonal_length().powi(3);
        let origin = aabb.center();

        /*
         * Orient the shells.
         */
        let shells = shells(&triangles);
        let mut shell_volumes = Vec::with_capacity(shells.len());

        for shell in &shells {
            let volume = signed_volume(&points, shell.iter().map(|t| triangles[*t as usize]), &origin);

            if volume.abs() <= volume_eps {
                return Err(RepairError::ZeroVolume);
            }

            shell_volumes.push(volume);
        }

        // Nesting is only well defined for disjoint shells.
        if has_self_intersections(&points, &triangles) {
            return Err(RepairError::SelfIntersecting);
        }

        let mut volume = 0.0;

        for (s, shell) in shells.iter().enumerate() {
            let test_point = points[triangles[shell[0] as usize][0] as usize];
            let depth = shells
                .iter()
                .enumerate()
                .filter(|(t, other)| {
                    *t != s
                        && winding_number(
                            &points,
                            other.iter().map(|i| triangles[*i as usize]),
                            &test_point,
                        )
                        .abs()
                            > 0.5
                })
                .count();

            let outward = depth % 2 == 0;

            if (shell_volumes[s] > 0.0) != outward {
                for t in shell {
                    triangles[*t as usize].swap(1, 2);
                }
                shell_volumes[s] = -shell_volumes[s];
            }

            volume += shell_volumes[s];
        }

        log::debug!(
            "Solid with {} triangles, {} shells, volume {}.",
            triangles.len(),
            shells.len(),
            volume
        );

        if volume <= volume_eps {
            return Err(RepairError::ZeroVolume);
        }

        let (triangle_regions, regions) = planar_regions(&points, &triangles);

        Ok(Solid {
            points,
            triangles,
            triangle_regions,
            regions,
            volume,
        })
    }

    /// Converts this solid back into a polyhedron.
    ///
    /// Each planar region bounded by a single simple loop becomes one polygonal
    /// face. Other regions keep their triangles.
    pub fn to_polyhedron(&self) -> Result<Polyhedron, RepairError> {
        let mut polygons: Vec<Polygon> = Vec::new();

        for region in &self.regions {
            match region_boundary(&self.triangles, &region.triangles) {
                Some(boundary) => polygons.push(Polygon::from_vec(boundary)),
                None => polygons.extend(
                    region
                        .triangles
                        .iter()
                        .map(|t| Polygon::from_slice(&self.triangles[*t as usize])),
                ),
            }
        }

        for (tri, region) in self.triangles.iter().zip(self.triangle_regions.iter()) {
            if *region == u32::MAX {
                polygons.push(Polygon::from_slice(tri));
            }
        }

        let mut points = self.points.clone();
        utils::remove_unused_polygon_points(&mut points, &mut polygons);
        let mesh = PolygonMesh::new(points, polygons)?;
        Polyhedron::from_polygon_mesh(mesh)
    }

    /// The vertices of this solid's boundary.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The outward-oriented boundary triangles of this solid.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// The planar regions of this solid's boundary.
    #[inline]
    pub fn regions(&self) -> &[PlanarRegion] {
        &self.regions
    }

    /// The region containing the triangle `tid`, or `None` if that triangle is degenerate.
    pub fn triangle_region(&self, tid: u32) -> Option<u32> {
        let region = self.triangle_regions[tid as usize];
        (region != u32::MAX).then_some(region)
    }

    /// The volume enclosed by this solid.
    #[inline]
    pub fn volume(&self) -> Real {
        self.volume
    }

    /// Is `pt` strictly inside of this solid?
    ///
    /// Points on the boundary may be classified either way.
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        winding_number(&self.points, self.triangles.iter().copied(), pt) > 0.5
    }
}

/// The generalized winding number of a closed triangle surface around `pt`.
///
/// This is the sum of the signed solid angles of the triangles seen from `pt`,
/// divided by `4π`.
pub fn winding_number(
    points: &[Point<Real>],
    triangles: impl IntoIterator<Item = [u32; 3]>,
    pt: &Point<Real>,
) -> Real {
    let mut total = 0.0;

    for tri in triangles {
        let a = points[tri[0] as usize] - pt;
        let b = points[tri[1] as usize] - pt;
        let c = points[tri[2] as usize] - pt;
        let (la, lb, lc) = (a.norm(), b.norm(), c.norm());

        let numerator = a.dot(&b.cross(&c));
        let denominator = la * lb * lc + a.dot(&b) * lc + a.dot(&c) * lb + b.dot(&c) * la;
        total += 2.0 * numerator.atan2(denominator);
    }

    total / (4.0 * core::f64::consts::PI)
}

fn signed_volume(
    points: &[Point<Real>],
    triangles: impl Iterator<Item = [u32; 3]>,
    origin: &Point<Real>,
) -> Real {
    let mut volume = 0.0;

    for tri in triangles {
        let a = points[tri[0] as usize] - origin;
        let b = points[tri[1] as usize] - origin;
        let c = points[tri[2] as usize] - origin;
        volume += a.dot(&b.cross(&c));
    }

    volume / 6.0
}

fn directed_edges(triangles: &[[u32; 3]]) -> HashMap<(u32, u32), u32> {
    let mut result = HashMap::default();

    for (tid, tri) in triangles.iter().enumerate() {
        for k in 0..3 {
            let _ = result.insert((tri[k], tri[(k + 1) % 3]), tid as u32);
        }
    }

    result
}

// The edge-connected components of a closed triangle mesh.
fn shells(triangles: &[[u32; 3]]) -> Vec<Vec<u32>> {
    let edges = directed_edges(triangles);
    let mut ufind = union_find(triangles.len());

    for (tid, tri) in triangles.iter().enumerate() {
        for k in 0..3 {
            if let Some(adj) = edges.get(&(tri[(k + 1) % 3], tri[k])) {
                ufind.union(IntKey(tid as u32), IntKey(*adj));
            }
        }
    }

    let mut shell_ids: HashMap<IntKey, usize> = HashMap::default();
    let mut result: Vec<Vec<u32>> = Vec::new();

    for tid in 0..triangles.len() as u32 {
        let root = ufind.find(IntKey(tid));
        let id = *shell_ids.entry(root).or_insert_with(|| {
            result.push(Vec::new());
            result.len() - 1
        });
        result[id].push(tid);
    }

    result
}

fn planar_regions(
    points: &[Point<Real>],
    triangles: &[[u32; 3]],
) -> (Vec<u32>, Vec<PlanarRegion>) {
    let pt = |i: u32| points[i as usize];
    let planes: Vec<Option<Plane>> = triangles
        .iter()
        .map(|tri| Plane::from_points(pt(tri[0]), pt(tri[1]), pt(tri[2])))
        .collect();
    let edges = directed_edges(triangles);
    let mut ufind = union_find(triangles.len());

    for (tid, tri) in triangles.iter().enumerate() {
        let Some(plane) = &planes[tid] else {
            continue;
        };

        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            let Some(adj) = edges.get(&(b, a)).copied() else {
                continue;
            };
            let Some(adj_plane) = &planes[adj as usize] else {
                continue;
            };

            let adj_tri = triangles[adj as usize];
            let Some(opposite) = adj_tri.iter().find(|i| **i != a && **i != b) else {
                continue;
            };

            if plane.side(&pt(*opposite)) == Sign::Zero
                && plane.normal().dot(adj_plane.normal()) > 0.0
            {
                ufind.union(IntKey(tid as u32), IntKey(adj));
            }
        }
    }

    let mut triangle_regions = vec![u32::MAX; triangles.len()];
    let mut region_ids: HashMap<IntKey, u32> = HashMap::default();
    let mut regions: Vec<PlanarRegion> = Vec::new();
    let mut region_areas: Vec<Real> = Vec::new();

    for (tid, plane) in planes.iter().enumerate() {
        let Some(plane) = plane else {
            continue;
        };

        let root = ufind.find(IntKey(tid as u32));
        let id = *region_ids.entry(root).or_insert_with(|| {
            regions.push(PlanarRegion {
                plane: *plane,
                triangles: Vec::new(),
            });
            region_areas.push(0.0);
            regions.len() as u32 - 1
        });

        let tri = triangles[tid];
        let area = triangle_area(&pt(tri[0]), &pt(tri[1]), &pt(tri[2]));
        let region = &mut regions[id as usize];
        region.triangles.push(tid as u32);

        // The best conditioned supporting plane is the one of the largest triangle.
        if area > region_areas[id as usize] {
            region.plane = *plane;
            region_areas[id as usize] = area;
        }

        triangle_regions[tid] = id;
    }

    (triangle_regions, regions)
}

// The boundary of a set of triangles, if it is a single simple loop.
fn region_boundary(triangles: &[[u32; 3]], region: &[u32]) -> Option<Vec<u32>> {
    if let [single] = region {
        return Some(triangles[*single as usize].to_vec());
    }

    let edges: HashSet<(u32, u32)> = region
        .iter()
        .flat_map(|t| {
            let tri = triangles[*t as usize];
            (0..3).map(move |k| (tri[k], tri[(k + 1) % 3]))
        })
        .collect();

    let mut boundary: HashMap<u32, u32> = HashMap::default();

    for (a, b) in &edges {
        if !edges.contains(&(*b, *a)) && boundary.insert(*a, *b).is_some() {
            // The boundary touches itself.
            return None;
        }
    }

    let start = boundary.keys().min().copied()?;
    let mut result = vec![start];
    let mut curr = boundary[&start];

    while curr != start {
        if result.len() >= boundary.len() {
            return None;
        }

        result.push(curr);
        curr = *boundary.get(&curr)?;
    }

    (result.len() == boundary.len()).then_some(result)
}

#[cfg(test)]
mod test {
    use super::Solid;
    use crate::math::Point;
    use crate::repair::{Polyhedron, RepairError};
    use crate::topology::{Polygon, PolygonMesh};
    use smallvec::smallvec;

    fn cube(min: f64, max: f64, offset: u32) -> (Vec<Point<f64>>, Vec<Polygon>) {
        let points = (0..8)
            .map(|i| {
                let c = |bit: u32| if i & bit != 0 { max } else { min };
                Point::new(c(1), c(2), c(4))
            })
            .collect();
        let polygons = [
            [0, 2, 3, 1],
            [4, 5, 7, 6],
            [0, 1, 5, 4],
            [2, 6, 7, 3],
            [0, 4, 6, 2],
            [1, 3, 7, 5],
        ]
        .iter()
        .map(|f| f.iter().map(|i| i + offset).collect())
        .collect();
        (points, polygons)
    }

    fn polyhedron(points: Vec<Point<f64>>, polygons: Vec<Polygon>) -> Polyhedron {
        Polyhedron::from_polygon_mesh(PolygonMesh::new(points, polygons).unwrap()).unwrap()
    }

    #[test]
    fn cube_solid() {
        let (points, polygons) = cube(0.0, 1.0, 0);
        let solid = Solid::from_polyhedron(&polyhedron(points, polygons)).unwrap();

        assert_relative_eq!(solid.volume(), 1.0, epsilon = 1.0e-12);
        assert_eq!(solid.triangles().len(), 12);
        assert_eq!(solid.regions().len(), 6);
        assert!(solid.regions().iter().all(|r| r.triangles.len() == 2));
        assert!(solid.contains_point(&Point::new(0.5, 0.5, 0.5)));
        assert!(!solid.contains_point(&Point::new(1.5, 0.5, 0.5)));

        let back = solid.to_polyhedron().unwrap();
        assert_eq!(back.as_polygon_mesh().num_faces(), 6);
        assert_eq!(back.as_polygon_mesh().num_vertices(), 8);
        assert_relative_eq!(back.to_mesh().volume(), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn inverted_cube_is_reoriented() {
        let (points, mut polygons) = cube(0.0, 1.0, 0);
        for poly in &mut polygons {
            poly.reverse();
        }

        let solid = Solid::from_polyhedron(&polyhedron(points, polygons)).unwrap();
        assert_relative_eq!(solid.volume(), 1.0, epsilon = 1.0e-12);

        for region in solid.regions() {
            let center = Point::new(0.5, 0.5, 0.5);
            assert!(region.plane.signed_distance(&center) < 0.0);
        }
    }

    #[test]
    fn cavity_is_oriented_inward() {
        let (mut points, mut polygons) = cube(0.0, 4.0, 0);
        let (inner_points, inner_polygons) = cube(1.0, 2.0, 8);
        points.extend(inner_points);
        polygons.extend(inner_polygons);

        let solid = Solid::from_polyhedron(&polyhedron(points, polygons)).unwrap();
        assert_relative_eq!(solid.volume(), 63.0, epsilon = 1.0e-9);
        assert!(!solid.contains_point(&Point::new(1.5, 1.5, 1.5)));
        assert!(solid.contains_point(&Point::new(3.0, 3.0, 3.0)));
    }

    #[test]
    fn flat_and_intersecting_solids_are_rejected() {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];
        let pillow: Vec<Polygon> = vec![smallvec![0, 1, 2], smallvec![0, 2, 1]];
        assert_eq!(
            Solid::from_polyhedron(&polyhedron(points, pillow)).err(),
            Some(RepairError::ZeroVolume)
        );

        let (mut points, mut polygons) = cube(0.0, 2.0, 0);
        let (other_points, other_polygons) = cube(1.0, 3.0, 8);
        points.extend(other_points);
        polygons.extend(other_polygons);
        assert_eq!(
            Solid::from_polyhedron(&polyhedron(points, polygons)).err(),
            Some(RepairError::SelfIntersecting)
        );
    }
}
