//! Bounding sphere.

use crate::bounding_volume::details;
use crate::math::{Point, Real};

/// A Bounding Sphere.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct BoundingSphere {
    /// The center of the sphere.
    pub center: Point<Real>,
    /// The radius of the sphere.
    pub radius: Real,
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::new(Point::origin(), 0.0)
    }
}

impl BoundingSphere {
    /// Creates a new bounding sphere.
    pub fn new(center: Point<Real>, radius: Real) -> BoundingSphere {
        BoundingSphere { center, radius }
    }

    /// Computes the centroid-based bounding sphere of a point cloud.
    ///
    /// An empty point cloud yields a zero-radius sphere at the origin.
    pub fn from_points(pts: &[Point<Real>]) -> BoundingSphere {
        let (center, radius) = details::point_cloud_bounding_sphere(pts);
        BoundingSphere::new(center, radius)
    }

    /// The bounding sphere center.
    #[inline]
    pub fn center(&self) -> &Point<Real> {
        &self.center
    }

    /// The bounding sphere radius.
    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// The bounding sphere diameter.
    #[inline]
    pub fn diameter(&self) -> Real {
        self.radius * 2.0
    }

    /// Does this sphere contain the given point?
    #[inline]
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        na::distance_squared(&self.center, pt) <= self.radius * self.radius
    }

    /// Computes the smallest sphere centered on `self.center` containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &BoundingSphere) -> BoundingSphere {
        let radius = self
            .radius
            .max(na::distance(&self.center, &other.center) + other.radius);
        BoundingSphere::new(self.center, radius)
    }
}
