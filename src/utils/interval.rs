// "Complete Interval Arithmetic and its Implementation on the Computer"
// Ulrich W. Kulisch
use crate::math::Real;
use core::cmp::Ordering;
use core::ops::{Add, Mul, Neg, Sub};

/// An interval implementing outward-rounded interval arithmetic.
///
/// Every operation widens its result by one ulp on each side, so the exact
/// result of the same computation performed on real numbers is always
/// contained in the resulting interval. This is what makes [`Interval::sign`]
/// usable as a filter in front of exact geometric predicates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval(pub Real, pub Real);

impl Interval {
    /// An interval containing only `e`.
    #[must_use]
    pub fn splat(e: Real) -> Self {
        Self(e, e)
    }

    /// The smallest interval containing both `a` and `b`.
    #[must_use]
    pub fn sort(a: Real, b: Real) -> Self {
        if a < b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// Does this interval contain `t`?
    #[must_use]
    pub fn contains(&self, t: Real) -> bool {
        self.0 <= t && self.1 >= t
    }

    /// The width of this interval.
    #[must_use]
    pub fn width(self) -> Real {
        self.1 - self.0
    }

    /// The sign of every real number contained by this interval, if they all share the same.
    ///
    /// Returns `None` if the interval contains zero (or NaN).
    #[must_use]
    pub fn sign(self) -> Option<Ordering> {
        if self.0 > 0.0 {
            Some(Ordering::Greater)
        } else if self.1 < 0.0 {
            Some(Ordering::Less)
        } else {
            None
        }
    }

    fn widen(self) -> Self {
        Self(next_down(self.0), next_up(self.1))
    }
}

fn next_up(x: Real) -> Real {
    if x.is_nan() || x == Real::INFINITY {
        return x;
    }
    if x == 0.0 {
        return Real::from_bits(1);
    }

    let bits = x.to_bits();
    if x > 0.0 {
        Real::from_bits(bits + 1)
    } else {
        Real::from_bits(bits - 1)
    }
}

fn next_down(x: Real) -> Real {
    -next_up(-x)
}

impl Neg for Interval {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.1, -self.0)
    }
}

impl Add<Interval> for Interval {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1).widen()
    }
}

impl Sub<Interval> for Interval {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.1, self.1 - rhs.0).widen()
    }
}

impl Mul<Interval> for Interval {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = self.0 * rhs.0;
        let b = self.0 * rhs.1;
        let c = self.1 * rhs.0;
        let d = self.1 * rhs.1;

        Self(a.min(b).min(c).min(d), a.max(b).max(c).max(d)).widen()
    }
}

#[cfg(test)]
mod test {
    use super::Interval;
    use core::cmp::Ordering;

    #[test]
    fn interval_contains_exact_result() {
        let a = Interval::splat(0.1);
        let b = Interval::splat(0.2);
        let sum = a + b;

        assert!(sum.contains(0.1 + 0.2));
        assert!(sum.width() > 0.0);
        assert_eq!(sum.sign(), Some(Ordering::Greater));
    }

    #[test]
    fn interval_sign_is_undecided_around_zero() {
        let a = Interval::splat(1.0e-300);
        let zero = a - a;

        assert!(zero.contains(0.0));
        assert_eq!(zero.sign(), None);
        assert_eq!((-Interval(1.0, 2.0)).sign(), Some(Ordering::Less));
        let prod = Interval(-1.0, 2.0) * Interval(3.0, 4.0);
        assert!(prod.0 <= -4.0 && prod.1 >= 8.0);
        assert!(prod.width() < 12.0 + 1.0e-12);
    }
}
