use super::{orient3d, Sign};
use crate::math::{Point, Real, Vector};
use crate::utils::Interval;

/// A plane supported by three non-collinear points.
///
/// The plane is never represented by a rounded normal and offset for
/// combinatorial decisions: [`Plane::side`] is exact with respect to the three
/// supporting points. The orientation is the one of the triangle
/// `(a, b, c)`, i.e., the normal is `(b - a) × (c - a)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    points: [Point<Real>; 3],
    normal: Vector<Real>,
}

impl Plane {
    /// Creates the plane supported by the triangle `abc`.
    ///
    /// Returns `None` if the three points are exactly collinear.
    pub fn from_points(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Option<Plane> {
        let normal = (b - a).cross(&(c - a));
        let normal = normal.try_normalize(0.0)?;

        if normal.iter().any(|x| !x.is_finite()) {
            return None;
        }

        Some(Plane {
            points: [a, b, c],
            normal,
        })
    }

    /// The three points supporting this plane.
    #[inline]
    pub fn points(&self) -> &[Point<Real>; 3] {
        &self.points
    }

    /// The (rounded) unit normal of this plane.
    #[inline]
    pub fn normal(&self) -> &Vector<Real> {
        &self.normal
    }

    /// The (rounded) signed distance from `pt` to this plane.
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&(pt - self.points[0]))
    }

    /// This plane with its orientation reversed.
    #[must_use]
    pub fn flipped(&self) -> Plane {
        Plane {
            points: [self.points[0], self.points[2], self.points[1]],
            normal: -self.normal,
        }
    }

    /// Exactly determines on which side of this plane `pt` lies.
    ///
    /// An interval-arithmetic evaluation is attempted first and the adaptive
    /// exact predicate is only invoked when it cannot decide.
    pub fn side(&self, pt: &Point<Real>) -> Sign {
        let [a, b, c] = &self.points;
        let iv = |x: Real| Interval::splat(x);

        let ab = [iv(b.x) - iv(a.x), iv(b.y) - iv(a.y), iv(b.z) - iv(a.z)];
        let ac = [iv(c.x) - iv(a.x), iv(c.y) - iv(a.y), iv(c.z) - iv(a.z)];
        let ap = [iv(pt.x) - iv(a.x), iv(pt.y) - iv(a.y), iv(pt.z) - iv(a.z)];
        let cross = [
            ab[1] * ac[2] - ab[2] * ac[1],
            ab[2] * ac[0] - ab[0] * ac[2],
            ab[0] * ac[1] - ab[1] * ac[0],
        ];
        let det = ap[0] * cross[0] + ap[1] * cross[1] + ap[2] * cross[2];

        match det.sign() {
            Some(core::cmp::Ordering::Greater) => Sign::Positive,
            Some(core::cmp::Ordering::Less) => Sign::Negative,
            _ => Sign::of(orient3d(a, b, c, pt)),
        }
    }

    /// Same as [`Plane::side`], except that points closer than `tolerance` to the
    /// plane are considered to lie on it.
    ///
    /// This is used for points constructed by earlier floating-point
    /// intersections, which are not exactly on the plane they were computed on.
    #[inline]
    pub fn side_with_tolerance(&self, pt: &Point<Real>, tolerance: Real) -> Sign {
        if self.signed_distance(pt).abs() <= tolerance {
            Sign::Zero
        } else {
            self.side(pt)
        }
    }

    /// Do both planes contain the same points with the same orientation?
    pub fn is_same_oriented_plane(&self, other: &Plane) -> bool {
        other.points.iter().all(|p| self.side(p) == Sign::Zero)
            && self.normal.dot(&other.normal) > 0.0
    }

    /// Computes the intersection between the segment `[p, q]` and this plane.
    ///
    /// `p` and `q` are assumed to lie on different sides of this plane.
    pub fn intersect_segment(&self, p: &Point<Real>, q: &Point<Real>) -> Point<Real> {
        let dp = self.signed_distance(p);
        let dq = self.signed_distance(q);
        let denom = dp - dq;

        if denom == 0.0 {
            return na::center(p, q);
        }

        let t = (dp / denom).clamp(0.0, 1.0);
        p + (q - p) * t
    }

    /// An orthonormal basis `(u, v)` of the plane's direction such that `u × v` is the normal.
    pub fn basis(&self) -> (Vector<Real>, Vector<Real>) {
        let u = (self.points[1] - self.points[0]).normalize();
        let v = self.normal.cross(&u);
        (u, v)
    }
}

#[cfg(test)]
mod test {
    use super::Plane;
    use crate::kernel::Sign;
    use crate::math::Point;

    #[test]
    fn plane_side_and_distance() {
        let plane = Plane::from_points(
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
        )
        .unwrap();

        assert_eq!(plane.side(&Point::new(3.0, -2.0, 2.0)), Sign::Positive);
        assert_eq!(plane.side(&Point::new(3.0, -2.0, 0.0)), Sign::Negative);
        assert_eq!(plane.side(&Point::new(3.0, -2.0, 1.0)), Sign::Zero);
        assert_relative_eq!(plane.signed_distance(&Point::new(0.0, 0.0, 3.0)), 2.0);
        assert_eq!(plane.flipped().side(&Point::new(0.0, 0.0, 3.0)), Sign::Negative);
    }

    #[test]
    fn plane_tolerance_and_segment_intersection() {
        let plane = Plane::from_points(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        let close = Point::new(0.5, 0.5, 1.0e-12);

        assert_eq!(plane.side(&close), Sign::Positive);
        assert_eq!(plane.side_with_tolerance(&close, 1.0e-9), Sign::Zero);

        let pt = plane.intersect_segment(&Point::new(0.0, 0.0, -1.0), &Point::new(2.0, 0.0, 3.0));
        assert_relative_eq!(pt, Point::new(0.5, 0.0, 0.0), epsilon = 1.0e-12);
    }

    #[test]
    fn collinear_points_do_not_define_a_plane() {
        assert!(Plane::from_points(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
        )
        .is_none());
    }

    #[test]
    fn same_oriented_planes() {
        let p1 = Plane::from_points(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        let p2 = Plane::from_points(
            Point::new(4.0, 4.0, 0.0),
            Point::new(5.0, 4.0, 0.0),
            Point::new(4.0, 6.0, 0.0),
        )
        .unwrap();

        assert!(p1.is_same_oriented_plane(&p2));
        assert!(!p1.is_same_oriented_plane(&p2.flipped()));
    }
}
