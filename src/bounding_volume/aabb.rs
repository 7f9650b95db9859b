//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector};

/// An Axis Aligned Bounding Box.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The point with the smallest coordinates.
    pub mins: Point<Real>,
    /// The point with the largest coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new Aabb.
    ///
    /// # Arguments:
    ///   * `mins` - position of the point with the smallest coordinates.
    ///   * `maxs` - position of the point with the highest coordinates. Each component of `mins`
    ///     must be smaller than the related components of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid Aabb with `mins` components set to `Real::max_values` and `maxs`components set to `-Real::max_values`.
    ///
    /// This is often used as the initial values of some Aabb merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(Point::from(Vector::repeat(Real::MAX)), Point::from(Vector::repeat(-Real::MAX)))
    }

    /// Creates a new Aabb from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Computes the Aabb bounding a set of points.
    pub fn from_points<'a>(pts: impl IntoIterator<Item = &'a Point<Real>>) -> Self {
        let mut result = Aabb::new_invalid();

        for pt in pts {
            result.take_point(*pt);
        }

        result
    }

    /// Enlarges this Aabb so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// The center of this Aabb.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this Aabb.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this Aabb.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The length of the diagonal of this Aabb.
    ///
    /// Zero for an invalid Aabb.
    #[inline]
    pub fn diagonal_length(&self) -> Real {
        if self.mins.x > self.maxs.x {
            0.0
        } else {
            self.extents().norm()
        }
    }

    /// Does this Aabb intersect `other`? Touching boxes intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    /// Enlarges this Aabb by `amount` in every direction.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Aabb {
        Aabb::new(self.mins - Vector::repeat(amount), self.maxs + Vector::repeat(amount))
    }

    /// The smallest Aabb containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb::new(
            self.mins.coords.inf(&other.mins.coords).into(),
            self.maxs.coords.sup(&other.maxs.coords).into(),
        )
    }
}

/// Computes the Aabb of a set of points.
pub fn local_point_cloud_aabb(pts: &[Point<Real>]) -> Aabb {
    Aabb::from_points(pts)
}
