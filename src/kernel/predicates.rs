use crate::math::{Point, Real};
use na::Point2;
use robust::{Coord, Coord3D};

/// The sign of an exact predicate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Strictly positive.
    Positive,
    /// Strictly negative.
    Negative,
    /// Exactly zero.
    Zero,
}

impl Sign {
    /// The sign of a real number. NaN is mapped to `Zero`.
    #[inline]
    pub fn of(val: Real) -> Sign {
        if val > 0.0 {
            Sign::Positive
        } else if val < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    /// The opposite sign.
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
        }
    }
}

#[inline]
fn coord3(p: &Point<Real>) -> Coord3D<Real> {
    Coord3D {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}

/// Exact orientation of `d` relative to the plane through `a`, `b`, `c`.
///
/// The result is positive if `d` lies on the side pointed to by the normal
/// `(b - a) × (c - a)`, negative on the other side, and exactly zero if the four
/// points are coplanar. Its magnitude approximates six times the signed volume of
/// the tetrahedron `abcd`.
#[inline]
pub fn orient3d(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>, d: &Point<Real>) -> Real {
    // NOTE: `robust` returns a positive value when `d` is *below* the plane.
    -robust::orient3d(coord3(a), coord3(b), coord3(c), coord3(d))
}

/// The exact sign of [`orient3d`].
#[inline]
pub fn orientation3d(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>, d: &Point<Real>) -> Sign {
    Sign::of(orient3d(a, b, c, d))
}

/// Exact orientation of the 2D triangle `abc`: positive if counter-clockwise.
#[inline]
pub fn orient2d(a: &Point2<Real>, b: &Point2<Real>, c: &Point2<Real>) -> Real {
    robust::orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

/// The area of the triangle `abc`.
#[inline]
pub fn triangle_area(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> Real {
    (b - a).cross(&(c - a)).norm() * 0.5
}

/// The signed volume of the tetrahedron `abcd`, positive if `d` is above the
/// counter-clockwise triangle `abc`.
#[inline]
pub fn tetrahedron_signed_volume(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    d: &Point<Real>,
) -> Real {
    (b - a).cross(&(c - a)).dot(&(d - a)) / 6.0
}

/// Checks that the given triangle is degenerate, up to a small relative tolerance.
///
/// This is a floating-point test meant for normalized coordinates. Use the exact
/// predicates when a combinatorial decision depends on the result.
pub fn is_affinely_dependent_triangle(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> bool {
    const EPS: Real = crate::math::DEFAULT_EPSILON * 100.0;

    let p1p2 = b - a;
    let p1p3 = c - a;
    relative_eq!(p1p2.cross(&p1p3).norm_squared(), 0.0, epsilon = EPS * EPS)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn orient3d_sign_convention() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(1.0, 0.0, 0.0);
        let c = Point::new(0.0, 1.0, 0.0);

        assert_eq!(orientation3d(&a, &b, &c, &Point::new(0.3, 0.3, 1.0)), Sign::Positive);
        assert_eq!(orientation3d(&a, &b, &c, &Point::new(0.3, 0.3, -1.0)), Sign::Negative);
        assert_eq!(orientation3d(&a, &b, &c, &Point::new(5.0, -3.0, 0.0)), Sign::Zero);
        assert_relative_eq!(
            tetrahedron_signed_volume(&a, &b, &c, &Point::new(0.0, 0.0, 1.0)),
            1.0 / 6.0
        );
    }

    #[test]
    fn orient3d_is_exact_for_nearly_coplanar_points() {
        let a = Point::new(0.1, 0.1, 0.1);
        let b = Point::new(0.2, 0.2, 0.2);
        let c = Point::new(0.3, 0.7, 0.4);
        // `a`, `b` and `d` all lie exactly on the line `x = y = z`.
        let d = Point::new(0.5, 0.5, 0.5);
        let e = Point::new(0.5, 0.5, 0.5 + 1.0e-15);

        assert_eq!(orientation3d(&a, &b, &c, &d), Sign::Zero);
        assert_ne!(orientation3d(&a, &b, &c, &e), Sign::Zero);
    }

    #[test]
    fn degenerate_triangles() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(1.0, 1.0, 1.0);
        let c = Point::new(2.0, 2.0, 2.0);

        assert!(is_affinely_dependent_triangle(&a, &b, &c));
        assert!(!is_affinely_dependent_triangle(&a, &b, &Point::new(0.0, 1.0, 0.0)));
        assert_relative_eq!(
            triangle_area(&a, &Point::new(2.0, 0.0, 0.0), &Point::new(0.0, 2.0, 0.0)),
            2.0
        );
    }
}
