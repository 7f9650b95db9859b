use super::CutPlane;
use crate::math::{Point, Real, Vector};
use crate::transformation::voxelization::{TetrahedronSet, VoxelSet};

/// A set of volume primitives that can be recursively clipped by the decomposition.
pub(crate) trait PrimitiveSet: Sized + Sync {
    fn len(&self) -> usize;
    /// The origin and the cell size of the voxel grid the primitives come from.
    fn grid(&self) -> (Point<Real>, Real);
    fn bb_voxels(&self) -> (Point<u32>, Point<u32>);
    fn compute_volume(&self) -> Real;
    fn compute_principal_axes(&self) -> Vector<Real>;
    fn surface_points(&self, sampling: u32) -> Vec<Point<Real>>;
    fn select_on_surface(&self) -> Self;
    fn intersect(
        &self,
        plane: &CutPlane,
        positive_pts: &mut Vec<Point<Real>>,
        negative_pts: &mut Vec<Point<Real>>,
        sampling: u32,
    );
    /// Returns `(negative_volume, positive_volume)`.
    fn compute_clipped_volumes(&self, plane: &CutPlane) -> (Real, Real);
    /// Returns `(positive_part, negative_part)`.
    fn clip(&self, plane: &CutPlane) -> (Self, Self);
}

macro_rules! impl_primitive_set(
    ($t: ty) => {
        impl PrimitiveSet for $t {
            fn len(&self) -> usize {
                <$t>::len(self)
            }

            fn grid(&self) -> (Point<Real>, Real) {
                (self.origin, self.scale)
            }

            fn bb_voxels(&self) -> (Point<u32>, Point<u32>) {
                (self.min_bb_voxels, self.max_bb_voxels)
            }

            fn compute_volume(&self) -> Real {
                <$t>::compute_volume(self)
            }

            fn compute_principal_axes(&self) -> Vector<Real> {
                <$t>::compute_principal_axes(self)
            }

            fn surface_points(&self, sampling: u32) -> Vec<Point<Real>> {
                <$t>::surface_points(self, sampling)
            }

            fn select_on_surface(&self) -> Self {
                <$t>::select_on_surface(self)
            }

            fn intersect(
                &self,
                plane: &CutPlane,
                positive_pts: &mut Vec<Point<Real>>,
                negative_pts: &mut Vec<Point<Real>>,
                sampling: u32,
            ) {
                <$t>::intersect(self, plane, positive_pts, negative_pts, sampling)
            }

            fn compute_clipped_volumes(&self, plane: &CutPlane) -> (Real, Real) {
                <$t>::compute_clipped_volumes(self, plane)
            }

            fn clip(&self, plane: &CutPlane) -> (Self, Self) {
                <$t>::clip(self, plane)
            }
        }
    }
);

impl_primitive_set!(VoxelSet);
impl_primitive_set!(TetrahedronSet);
