// Rust port, with modifications, of https://github.com/kmammou/v-hacd/blob/master/src/VHACD_Lib/src/vhacdVolume.cpp
// By Khaled Mamou
//
// # License of the original C++ code:
// > Copyright (c) 2011 Khaled Mamou (kmamou at gmail dot com)
// > All rights reserved.
// >
// >
// > Redistribution and use in source and binary forms, with or without modification, are permitted provided that the following conditions are met:
// >
// > 1. Redistributions of source code must retain the above copyright notice, this list of conditions and the following disclaimer.
// >
// > 2. Redistributions in binary form must reproduce the above copyright notice, this list of conditions and the following disclaimer in the documentation and/or other materials provided with the distribution.
// >
// > 3. The names of the contributors may not be used to endorse or promote products derived from this software without specific prior written permission.
// >
// > THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use super::{FillMode, VoxelizedVolume};
use crate::math::{Matrix, Point, Real, Vector};
use crate::transformation::vhacd::CutPlane;

/// A voxel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Voxel {
    /// The integer coordinates of the voxel as part of the voxel grid.
    pub coords: Point<u32>,
    /// Is this voxel on the surface of the volume (i.e. not inside of it)?
    pub is_on_surface: bool,
}

/// A sparse set of voxels.
///
/// It only contains voxels that are considered as "full" after a voxelization.
#[derive(Clone, Debug)]
pub struct VoxelSet {
    /// The 3D origin of this voxel-set.
    pub origin: Point<Real>,
    /// The scale factor between the voxel integer coordinates and their
    /// actual float world-space coordinates.
    pub scale: Real,
    pub(crate) min_bb_voxels: Point<u32>,
    pub(crate) max_bb_voxels: Point<u32>,
    pub(crate) voxels: Vec<Voxel>,
}

impl Default for VoxelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxelSet {
    /// Creates a new empty set of voxels.
    pub fn new() -> Self {
        Self {
            origin: Point::origin(),
            min_bb_voxels: Point::origin(),
            max_bb_voxels: Vector::repeat(1).into(),
            scale: 1.0,
            voxels: Vec::new(),
        }
    }

    /// The volume of a single voxel of this voxel set.
    pub fn voxel_volume(&self) -> Real {
        self.scale * self.scale * self.scale
    }

    /// Voxelizes the given shape described by its boundary triangle mesh.
    ///
    /// # Parameters
    /// * `points` - The vertex buffer of the boundary of the shape to voxelize.
    /// * `triangles` - The index buffer of the boundary of the shape to voxelize.
    /// * `resolution` - Controls the number of subdivision done along each axis. This number
    ///    is the number of subdivisions along the axis where the input shape has the largest extent.
    ///    The other dimensions will have a different automatically-determined resolution (in order to
    ///    keep the voxels cubic).
    /// * `fill_mode` - Controls what is being voxelized.
    pub fn voxelize(
        points: &[Point<Real>],
        triangles: &[[u32; 3]],
        resolution: u32,
        fill_mode: FillMode,
    ) -> Self {
        VoxelizedVolume::voxelize(points, triangles, resolution, fill_mode).into()
    }

    /// The minimal coordinates of the integer bounding-box of the voxels in this set.
    pub fn min_bb_voxels(&self) -> Point<u32> {
        self.min_bb_voxels
    }

    /// The maximal coordinates of the integer bounding-box of the voxels in this set.
    pub fn max_bb_voxels(&self) -> Point<u32> {
        self.max_bb_voxels
    }

    /// Computes the total volume of the voxels contained by this set.
    pub fn compute_volume(&self) -> Real {
        self.voxel_volume() * self.voxels.len() as Real
    }

    fn get_voxel_point(&self, voxel: &Voxel) -> Point<Real> {
        self.get_point(na::convert(voxel.coords))
    }

    pub(crate) fn get_point(&self, voxel: Point<Real>) -> Point<Real> {
        self.origin + voxel.coords * self.scale
    }

    /// The number of voxels in this set.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Is this set empty?
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// The set of voxels.
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Update the bounding box of this voxel set.
    pub fn compute_bb(&mut self) {
        let Some(first) = self.voxels.first() else {
            return;
        };

        self.min_bb_voxels = first.coords;
        self.max_bb_voxels = first.coords;

        for voxel in &self.voxels {
            self.min_bb_voxels = self.min_bb_voxels.inf(&voxel.coords);
            self.max_bb_voxels = self.max_bb_voxels.sup(&voxel.coords);
        }
    }

    /// The corners of the voxels on the surface of this set.
    ///
    /// Only one surface voxel every `sampling` voxels is taken into account. Use
    /// `1` to keep them all.
    pub fn surface_points(&self, sampling: u32) -> Vec<Point<Real>> {
        let mut points = Vec::new();

        for voxel in self
            .voxels
            .iter()
            .filter(|v| v.is_on_surface)
            .step_by(sampling.max(1) as usize)
        {
            self.map_voxel_points(voxel, |p| points.push(p));
        }

        points
    }

    /// Gets the vertices of the given voxel.
    fn map_voxel_points(&self, voxel: &Voxel, mut f: impl FnMut(Point<Real>)) {
        let ijk = voxel.coords.coords.map(|e| e as Real);

        let shifts = [
            Vector::new(-0.5, -0.5, -0.5),
            Vector::new(0.5, -0.5, -0.5),
            Vector::new(0.5, 0.5, -0.5),
            Vector::new(-0.5, 0.5, -0.5),
            Vector::new(-0.5, -0.5, 0.5),
            Vector::new(0.5, -0.5, 0.5),
            Vector::new(0.5, 0.5, 0.5),
            Vector::new(-0.5, 0.5, 0.5),
        ];

        for shift in &shifts {
            f(self.origin + (ijk + *shift) * self.scale)
        }
    }

    /// Pushes the corners of the voxels close to `plane` on their side of the plane.
    ///
    /// Voxels further than one voxel from the plane are only pushed once
    /// every `sampling` voxels.
    pub(crate) fn intersect(
        &self,
        plane: &CutPlane,
        positive_pts: &mut Vec<Point<Real>>,
        negative_pts: &mut Vec<Point<Real>>,
        sampling: u32,
    ) {
        let d0 = self.scale;
        let mut sp = 0;
        let mut sn = 0;

        for voxel in &self.voxels {
            let pt = self.get_voxel_point(voxel);
            let d = plane.signed_distance(&pt);

            if d >= 0.0 {
                if d <= d0 {
                    self.map_voxel_points(voxel, |p| positive_pts.push(p));
                } else {
                    sp += 1;

                    if sp >= sampling {
                        self.map_voxel_points(voxel, |p| positive_pts.push(p));
                        sp = 0;
                    }
                }
            } else if -d <= d0 {
                self.map_voxel_points(voxel, |p| negative_pts.push(p));
            } else {
                sn += 1;

                if sn >= sampling {
                    self.map_voxel_points(voxel, |p| negative_pts.push(p));
                    sn = 0;
                }
            }
        }
    }

    // Returns (negative_volume, positive_volume)
    pub(crate) fn compute_clipped_volumes(&self, plane: &CutPlane) -> (Real, Real) {
        let num_positive_voxels = self
            .voxels
            .iter()
            .filter(|voxel| plane.signed_distance(&self.get_voxel_point(voxel)) >= 0.0)
            .count();

        let num_negative_voxels = self.voxels.len() - num_positive_voxels;
        let positive_volume = self.voxel_volume() * (num_positive_voxels as Real);
        let negative_volume = self.voxel_volume() * (num_negative_voxels as Real);

        (negative_volume, positive_volume)
    }

    /// The subset of this set containing only its voxels on the surface.
    pub(crate) fn select_on_surface(&self) -> VoxelSet {
        VoxelSet {
            origin: self.origin,
            scale: self.scale,
            min_bb_voxels: self.min_bb_voxels,
            max_bb_voxels: self.max_bb_voxels,
            voxels: self.voxels.iter().filter(|v| v.is_on_surface).copied().collect(),
        }
    }

    /// Splits this voxel set into two parts, depending on where the voxel center lies wrt. the given plane.
    ///
    /// Returns `(positive_part, negative_part)`. The voxels adjacent to the plane
    /// become surface voxels of their part.
    pub(crate) fn clip(&self, plane: &CutPlane) -> (VoxelSet, VoxelSet) {
        let mut positive_part = VoxelSet {
            origin: self.origin,
            scale: self.scale,
            voxels: Vec::with_capacity(self.voxels.len()),
            ..VoxelSet::new()
        };
        let mut negative_part = positive_part.clone();
        let d0 = self.scale;

        for voxel in &self.voxels {
            let mut voxel = *voxel;
            let d = plane.signed_distance(&self.get_voxel_point(&voxel));

            if d.abs() <= d0 {
                voxel.is_on_surface = true;
            }

            if d >= 0.0 {
                positive_part.voxels.push(voxel);
            } else {
                negative_part.voxels.push(voxel);
            }
        }

        positive_part.compute_bb();
        negative_part.compute_bb();
        (positive_part, negative_part)
    }

    /// The eigenvalues of the covariance matrix of the voxel centers.
    pub(crate) fn compute_principal_axes(&self) -> Vector<Real> {
        let num_voxels = self.voxels.len();
        if num_voxels == 0 {
            return Vector::zeros();
        }

        let mut center = Point::origin();
        let denom = 1.0 / (num_voxels as Real);

        for voxel in &self.voxels {
            center += voxel.coords.map(|e| e as Real).coords * denom;
        }

        let mut cov_mat = Matrix::zeros();
        for voxel in &self.voxels {
            let xyz = voxel.coords.map(|e| e as Real) - center;
            cov_mat.syger(denom, &xyz, &xyz, 1.0);
        }

        cov_mat.symmetric_eigenvalues()
    }
}

#[cfg(test)]
mod test {
    use super::{Voxel, VoxelSet};
    use crate::math::Point;
    use crate::transformation::vhacd::CutPlane;

    fn slab() -> VoxelSet {
        let mut vset = VoxelSet::new();
        vset.scale = 0.5;

        for i in 0..4 {
            for j in 0..2 {
                for k in 0..2 {
                    vset.voxels.push(Voxel {
                        coords: Point::new(i, j, k),
                        is_on_surface: i == 0 || i == 3,
                    });
                }
            }
        }

        vset.compute_bb();
        vset
    }

    #[test]
    fn clip_voxel_set() {
        let vset = slab();
        assert_eq!(vset.min_bb_voxels(), Point::origin());
        assert_eq!(vset.max_bb_voxels(), Point::new(3, 1, 1));
        assert_relative_eq!(vset.compute_volume(), 16.0 * 0.125);

        // Between the voxel layers 1 and 2.
        let plane = CutPlane::axis_aligned(&vset.origin, vset.scale, 0, 1);
        let (neg_volume, pos_volume) = vset.compute_clipped_volumes(&plane);
        assert_relative_eq!(neg_volume, 1.0);
        assert_relative_eq!(pos_volume, 1.0);

        let (pos, neg) = vset.clip(&plane);
        assert_eq!(pos.len(), 8);
        assert_eq!(neg.len(), 8);
        assert!(pos.voxels().iter().all(|v| v.is_on_surface));
        assert_eq!(pos.min_bb_voxels().x, 2);
        assert_eq!(neg.max_bb_voxels().x, 1);
    }

    #[test]
    fn surface_points_and_axes() {
        let vset = slab();
        assert_eq!(vset.select_on_surface().len(), 8);
        assert_eq!(vset.surface_points(1).len(), 8 * 8);
        assert_eq!(vset.surface_points(2).len(), 4 * 8);

        // The slab is elongated along x.
        let eigv = vset.compute_principal_axes();
        let largest = eigv.max();
        assert_relative_eq!(largest, 1.25);
        assert_eq!(eigv.iter().filter(|e| **e < largest).count(), 2);
    }
}
