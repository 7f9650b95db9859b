//! The decomposition of a solid into convex cells is done by a binary space
//! partition of its convex hull, using the planes of the boundary of the solid
//! as splitting planes. Every decision on which side of a plane a point lies is
//! taken with the exact predicates of the [`kernel`](crate::kernel) module.
//!
//! The cells inside of the solid are then merged greedily whenever their union
//! is still convex.

pub use self::polytope::ConvexPolytope;

use self::bsp::binary_space_partition;
use self::merge::merge_convex_cells;
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::repair::{RepairError, Solid};
use crate::shape::Mesh;
use crate::transformation::{convex_hull_volume, try_convex_hull, ConvexHullError};

mod bsp;
mod merge;
mod polytope;

/// Errors of the convex decompositions.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum DecompositionError {
    /// A convex hull could not be computed.
    #[error("convex hull error: {0}")]
    ConvexHull(#[from] ConvexHullError),
    /// The input mesh could not be repaired into a solid.
    #[error("repair error: {0}")]
    Repair(#[from] RepairError),
    /// The decomposition did not produce any convex part.
    #[error("the decomposition did not produce any convex part.")]
    Empty,
    /// The decomposition produced more convex parts than allowed.
    #[error("the decomposition produced {num_hulls} hulls but at most {max_hulls} are allowed.")]
    TooManyHulls {
        /// The number of hulls produced.
        num_hulls: usize,
        /// The maximum number of hulls allowed.
        max_hulls: usize,
    },
}

/// A convex part of a decomposition.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexCell {
    /// The vertices of the cell.
    pub points: Vec<Point<Real>>,
    /// The outward-oriented triangles of the cell boundary.
    pub triangles: Vec<[u32; 3]>,
    /// The volume of the cell.
    pub volume: Real,
}

impl ConvexCell {
    /// The convex hull of a set of points, as a cell.
    pub fn from_points(points: &[Point<Real>]) -> Result<Self, ConvexHullError> {
        let (points, triangles) = try_convex_hull(points)?;
        let volume = convex_hull_volume(&points, &triangles);

        Ok(ConvexCell {
            points,
            triangles,
            volume,
        })
    }

    /// The boundary of this cell as a triangle mesh with normals and bounds.
    pub fn to_mesh(&self) -> Mesh {
        Mesh::from_trusted_parts(self.points.clone(), &self.triangles)
    }
}

/// Decomposes a solid into convex cells.
///
/// The union of the cells is the solid, up to floating-point tolerance. Points
/// computed while splitting cells are snapped to a splitting plane when they are
/// closer than `1.0e-9` times the diagonal of the solid's bounding box.
pub fn exact_convex_decomposition(solid: &Solid) -> Result<Vec<ConvexCell>, DecompositionError> {
    let scale = Aabb::from_points(solid.points()).diagonal_length();
    let tolerance = 1.0e-9 * scale;
    let min_volume = 1.0e-12 * scale.powi(3);

    let (hull_points, hull_triangles) = try_convex_hull(solid.points())?;
    let root = ConvexPolytope::from_convex_mesh(hull_points, &hull_triangles);
    let polytopes = binary_space_partition(solid, root, tolerance, min_volume);

    let cells: Vec<ConvexCell> = polytopes
        .iter()
        .filter_map(|polytope| match ConvexCell::from_points(polytope.vertices()) {
            Ok(cell) => Some(cell),
            Err(err) => {
                log::debug!("Dropping a degenerate convex cell: {}", err);
                None
            }
        })
        .collect();

    let cells = merge_convex_cells(cells, min_volume);

    if cells.is_empty() {
        return Err(DecompositionError::Empty);
    }

    log::debug!(
        "Exact convex decomposition: {} cells, total volume {} (solid volume {}).",
        cells.len(),
        cells.iter().map(|c| c.volume).sum::<Real>(),
        solid.volume()
    );

    Ok(cells)
}

#[cfg(test)]
mod test {
    use super::exact_convex_decomposition;
    use crate::math::{Point, Real};
    use crate::repair::{Polyhedron, Solid};
    use crate::topology::{Polygon, PolygonMesh};
    use crate::transformation::check_convex_hull;
    use smallvec::smallvec;

    fn prism(profile: &[[Real; 2]]) -> Solid {
        let n = profile.len() as u32;
        let mut points: Vec<_> = profile.iter().map(|p| Point::new(p[0], p[1], 0.0)).collect();
        points.extend(profile.iter().map(|p| Point::new(p[0], p[1], 1.0)));

        let mut polygons: Vec<Polygon> = vec![(0..n).rev().collect(), (n..2 * n).collect()];
        for i in 0..n {
            let j = (i + 1) % n;
            polygons.push(smallvec![i, j, j + n, i + n]);
        }

        let mesh = PolygonMesh::new(points, polygons).unwrap();
        Solid::from_polyhedron(&Polyhedron::from_polygon_mesh(mesh).unwrap()).unwrap()
    }

    #[test]
    fn box_is_a_single_cell() {
        let solid = prism(&[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]]);
        let cells = exact_convex_decomposition(&solid).unwrap();

        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].points.len(), 8);
        assert_relative_eq!(cells[0].volume, 2.0, epsilon = 1.0e-9);
    }

    #[test]
    fn l_shape_is_split() {
        let solid = prism(&[
            [0.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 2.0],
            [0.0, 2.0],
        ]);
        assert_relative_eq!(solid.volume(), 3.0, epsilon = 1.0e-9);

        let cells = exact_convex_decomposition(&solid).unwrap();
        assert!(cells.len() >= 2);

        let total: Real = cells.iter().map(|c| c.volume).sum();
        assert_relative_eq!(total, 3.0, epsilon = 1.0e-6);

        for cell in &cells {
            check_convex_hull(&cell.points, &cell.triangles).unwrap();
            assert!(cell.volume > 0.0);

            // Every cell is inside of the L.
            let center = crate::utils::center(&cell.points);
            assert!(solid.contains_point(&center));
        }
    }
}
