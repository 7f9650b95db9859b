use crate::math::{Point, Real};
use core::hash::{Hash, Hasher};

/// A structure that implements `Eq` and `Hash` for points, comparing their exact bit patterns.
///
/// `-0.0` and `0.0` are considered equal. NaN coordinates are only equal to themselves
/// if they share the same bit pattern.
#[derive(Copy, Clone, Debug)]
pub struct HashablePartialEq<T> {
    value: T,
}

impl<T> HashablePartialEq<T> {
    /// Creates a new `HashablePartialEq`. Please make sure that you really
    /// want to transform the wrapped object's partial equality to an equivalence relation.
    pub fn new(value: T) -> HashablePartialEq<T> {
        HashablePartialEq { value }
    }

    /// Gets the wrapped value.
    pub fn unwrap(self) -> T {
        self.value
    }
}

fn canonical_bits(x: Real) -> u64 {
    if x == 0.0 {
        0
    } else {
        x.to_bits()
    }
}

impl PartialEq for HashablePartialEq<Point<Real>> {
    fn eq(&self, other: &Self) -> bool {
        self.value
            .iter()
            .zip(other.value.iter())
            .all(|(a, b)| canonical_bits(*a) == canonical_bits(*b))
    }
}

impl Eq for HashablePartialEq<Point<Real>> {}

impl Hash for HashablePartialEq<Point<Real>> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for x in self.value.iter() {
            canonical_bits(*x).hash(state);
        }
    }
}
