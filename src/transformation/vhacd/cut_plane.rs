use crate::math::{Point, Real, Vector};

/// An axis-aligned plane separating two layers of a voxel grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CutPlane {
    pub abc: Vector<Real>,
    pub d: Real,
    pub axis: u8,
    pub index: u32,
}

impl CutPlane {
    /// The plane between the voxel layers `index` and `index + 1` along `axis`.
    pub fn axis_aligned(origin: &Point<Real>, scale: Real, axis: usize, index: u32) -> Self {
        CutPlane {
            abc: Vector::ith(axis, 1.0),
            d: -(origin[axis] + (index as Real + 0.5) * scale),
            axis: axis as u8,
            index,
        }
    }

    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.abc.dot(&pt.coords) + self.d
    }
}
