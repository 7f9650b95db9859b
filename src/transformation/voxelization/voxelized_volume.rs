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

use super::tri_box_overlap::triangle_aabb_overlap;
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::transformation::voxelization::{Voxel, VoxelSet};

/// Controls which voxels are kept by the voxelization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum FillMode {
    /// Only the voxels intersecting the boundary are kept.
    SurfaceOnly,
    /// The voxels enclosed by the boundary are kept too. The inside is
    /// detected by flood-filling the outside from the borders of the grid.
    FloodFill,
}

/// The state of a voxel of a [`VoxelizedVolume`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VoxelValue {
    /// Not classified yet.
    PrimitiveUndefined,
    /// Outside of the volume, and not visited by the flood fill yet.
    PrimitiveOutsideSurfaceToWalk,
    /// Outside of the volume.
    PrimitiveOutsideSurface,
    /// Inside of the volume.
    PrimitiveInsideSurface,
    /// Intersecting the boundary of the volume.
    PrimitiveOnSurface,
}

/// A dense voxel grid covering a closed triangle mesh.
pub struct VoxelizedVolume {
    origin: Point<Real>,
    scale: Real,
    resolution: Point<u32>,
    num_voxels_on_surface: u32,
    num_voxels_inside_surface: u32,
    num_voxels_outside_surface: u32,
    data: Vec<VoxelValue>,
}

impl VoxelizedVolume {
    /// Voxelizes the volume bounded by the given triangle mesh.
    ///
    /// `resolution` is the number of voxels along the largest extent of the mesh.
    /// The other axes get a resolution keeping the voxels cubic. The result is an
    /// empty grid if the points are all equal or if `resolution < 2`.
    pub fn voxelize(
        points: &[Point<Real>],
        triangles: &[[u32; 3]],
        resolution: u32,
        fill_mode: FillMode,
    ) -> Self {
        let mut result = VoxelizedVolume {
            resolution: Point::origin(),
            origin: Point::origin(),
            num_voxels_on_surface: 0,
            num_voxels_inside_surface: 0,
            num_voxels_outside_surface: 0,
            scale: 1.0,
            data: Vec::new(),
        };

        if points.is_empty() || resolution < 2 {
            return result;
        }

        let aabb = Aabb::from_points(points);
        let d = aabb.maxs - aabb.mins;
        let r = d.max();

        if r <= 0.0 {
            return result;
        }

        result.origin = aabb.mins;

        let res = resolution as Real;
        let (i0, i1, i2) = if d[0] >= d[1] && d[0] >= d[2] {
            (0, 1, 2)
        } else if d[1] >= d[0] && d[1] >= d[2] {
            (1, 0, 2)
        } else {
            (2, 0, 1)
        };

        result.resolution[i0] = resolution;
        result.resolution[i1] = 2 + (res * d[i1] / r) as u32;
        result.resolution[i2] = 2 + (res * d[i2] / r) as u32;

        result.scale = r / (res - 1.0);
        let inv_scale = (res - 1.0) / r;
        result.allocate();

        let mut tri_pts = [Point::origin(); 3];
        let box_half_size = Vector::repeat(0.5);
        let max_ijk = result.resolution.coords.map(|e| e - 1);
        let mut ijk0 = Vector::zeros();
        let mut ijk1 = Vector::zeros();

        for tri in triangles {
            // Find the range of voxels potentially intersecting the triangle.
            for c in 0..3 {
                let pt = points[tri[c] as usize];
                tri_pts[c] = Point::from((pt - result.origin) * inv_scale);

                let ijk = tri_pts[c]
                    .coords
                    .map(|e| (e + 0.5) as u32)
                    .inf(&max_ijk);

                if c == 0 {
                    ijk0 = ijk;
                    ijk1 = ijk;
                } else {
                    ijk0 = ijk0.inf(&ijk);
                    ijk1 = ijk1.sup(&ijk);
                }
            }

            ijk0.apply(|e| *e = e.saturating_sub(1));
            ijk1 = ijk1.map(|e| e + 2).inf(&result.resolution.coords);

            // Determine exactly what voxel intersect the triangle.
            for i in ijk0.x..ijk1.x {
                for j in ijk0.y..ijk1.y {
                    for k in ijk0.z..ijk1.z {
                        if result.voxel(i, j, k) != VoxelValue::PrimitiveUndefined {
                            continue;
                        }

                        let aabb = Aabb::from_half_extents(
                            Point::new(i as Real, j as Real, k as Real),
                            box_half_size,
                        );

                        if triangle_aabb_overlap(&aabb, &tri_pts) {
                            *result.voxel_mut(i, j, k) = VoxelValue::PrimitiveOnSurface;
                            result.num_voxels_on_surface += 1;
                        }
                    }
                }
            }
        }

        match fill_mode {
            FillMode::SurfaceOnly => {
                for value in &mut result.data {
                    if *value != VoxelValue::PrimitiveOnSurface {
                        *value = VoxelValue::PrimitiveOutsideSurface
                    }
                }
            }
            FillMode::FloodFill => {
                let [ri, rj, rk] = [
                    result.resolution[0],
                    result.resolution[1],
                    result.resolution[2],
                ];
                result.mark_outside_surface(0, 0, 0, ri, rj, 1);
                result.mark_outside_surface(0, 0, rk - 1, ri, rj, rk);
                result.mark_outside_surface(0, 0, 0, ri, 1, rk);
                result.mark_outside_surface(0, rj - 1, 0, ri, rj, rk);
                result.mark_outside_surface(0, 0, 0, 1, rj, rk);
                result.mark_outside_surface(ri - 1, 0, 0, ri, rj, rk);
                result.fill_outside_surface();
                result.fill_inside_surface();
            }
        }

        result
    }

    /// The number of voxels along each axis.
    pub fn resolution(&self) -> Point<u32> {
        self.resolution
    }

    /// The edge length of a voxel.
    pub fn scale(&self) -> Real {
        self.scale
    }

    fn allocate(&mut self) {
        let len = self.resolution[0] * self.resolution[1] * self.resolution[2];
        self.data.resize(len as usize, VoxelValue::PrimitiveUndefined);
    }

    fn voxel_index(&self, i: u32, j: u32, k: u32) -> u32 {
        i + j * self.resolution[0] + k * self.resolution[0] * self.resolution[1]
    }

    fn voxel_mut(&mut self, i: u32, j: u32, k: u32) -> &mut VoxelValue {
        let idx = self.voxel_index(i, j, k);
        &mut self.data[idx as usize]
    }

    /// The state of the voxel at the given integer coordinates.
    pub fn voxel(&self, i: u32, j: u32, k: u32) -> VoxelValue {
        let idx = self.voxel_index(i, j, k);
        self.data[idx as usize]
    }

    /// The number of voxels intersecting the boundary.
    pub fn num_voxels_on_surface(&self) -> u32 {
        self.num_voxels_on_surface
    }

    /// The number of voxels strictly inside of the volume.
    pub fn num_voxels_inside_surface(&self) -> u32 {
        self.num_voxels_inside_surface
    }

    /// The number of voxels outside of the volume.
    pub fn num_voxels_outside_surface(&self) -> u32 {
        self.num_voxels_outside_surface
    }

    /// Mark all the PrimitiveUndefined voxels within the given bounds as PrimitiveOutsideSurfaceToWalk.
    fn mark_outside_surface(&mut self, i0: u32, j0: u32, k0: u32, i1: u32, j1: u32, k1: u32) {
        for i in i0..i1 {
            for j in j0..j1 {
                for k in k0..k1 {
                    let v = self.voxel_mut(i, j, k);

                    if *v == VoxelValue::PrimitiveUndefined {
                        *v = VoxelValue::PrimitiveOutsideSurfaceToWalk;
                    }
                }
            }
        }
    }

    fn walk_forward(
        start: isize,
        end: isize,
        mut ptr: isize,
        out: &mut [VoxelValue],
        stride: isize,
        max_distance: isize,
    ) {
        let mut i = start;
        let mut count = 0;

        while count < max_distance && i < end && out[ptr as usize] == VoxelValue::PrimitiveUndefined
        {
            out[ptr as usize] = VoxelValue::PrimitiveOutsideSurfaceToWalk;
            i += 1;
            ptr += stride;
            count += 1;
        }
    }

    fn walk_backward(
        start: isize,
        end: isize,
        mut ptr: isize,
        out: &mut [VoxelValue],
        stride: isize,
        max_distance: isize,
    ) {
        let mut i = start;
        let mut count = 0;

        while count < max_distance
            && i >= end
            && out[ptr as usize] == VoxelValue::PrimitiveUndefined
        {
            out[ptr as usize] = VoxelValue::PrimitiveOutsideSurfaceToWalk;
            i -= 1;
            ptr -= stride;
            count += 1;
        }
    }

    fn fill_outside_surface(&mut self) {
        let i0 = self.resolution[0];
        let j0 = self.resolution[1];
        let k0 = self.resolution[2];

        // Short walks keep the sweep in cache.
        let walk_distance = 64;

        let istride = self.voxel_index(1, 0, 0) as isize - self.voxel_index(0, 0, 0) as isize;
        let jstride = self.voxel_index(0, 1, 0) as isize - self.voxel_index(0, 0, 0) as isize;
        let kstride = self.voxel_index(0, 0, 1) as isize - self.voxel_index(0, 0, 0) as isize;

        // Sweep the grid in memory order until no voxel is left to walk. This
        // converges much faster than a BFS and needs no queue.
        loop {
            let mut voxels_walked = 0;

            for i in 0..i0 {
                for j in 0..j0 {
                    for k in 0..k0 {
                        let idx = self.voxel_index(i, j, k) as isize;
                        let voxel = self.voxel_mut(i, j, k);

                        if *voxel != VoxelValue::PrimitiveOutsideSurfaceToWalk {
                            continue;
                        }

                        voxels_walked += 1;
                        *voxel = VoxelValue::PrimitiveOutsideSurface;

                        let data = &mut self.data;
                        let (i, j, k) = (i as isize, j as isize, k as isize);
                        Self::walk_forward(k + 1, k0 as isize, idx + kstride, data, kstride, walk_distance);
                        Self::walk_backward(k - 1, 0, idx - kstride, data, kstride, walk_distance);
                        Self::walk_forward(j + 1, j0 as isize, idx + jstride, data, jstride, walk_distance);
                        Self::walk_backward(j - 1, 0, idx - jstride, data, jstride, walk_distance);
                        Self::walk_forward(i + 1, i0 as isize, idx + istride, data, istride, walk_distance);
                        Self::walk_backward(i - 1, 0, idx - istride, data, istride, walk_distance);
                    }
                }
            }

            self.num_voxels_outside_surface += voxels_walked;

            if voxels_walked == 0 {
                break;
            }
        }
    }

    fn fill_inside_surface(&mut self) {
        for v in &mut self.data {
            if *v == VoxelValue::PrimitiveUndefined {
                *v = VoxelValue::PrimitiveInsideSurface;
                self.num_voxels_inside_surface += 1;
            }
        }
    }
}

impl From<VoxelizedVolume> for VoxelSet {
    fn from(volume: VoxelizedVolume) -> Self {
        let mut vset = VoxelSet::new();
        vset.origin = volume.origin;
        vset.scale = volume.scale;
        vset.voxels
            .reserve((volume.num_voxels_inside_surface + volume.num_voxels_on_surface) as usize);

        for k in 0..volume.resolution.z {
            for j in 0..volume.resolution.y {
                for i in 0..volume.resolution.x {
                    let is_on_surface = match volume.voxel(i, j, k) {
                        VoxelValue::PrimitiveInsideSurface => false,
                        VoxelValue::PrimitiveOnSurface => true,
                        _ => continue,
                    };

                    vset.voxels.push(Voxel {
                        coords: Point::new(i, j, k),
                        is_on_surface,
                    });
                }
            }
        }

        vset.compute_bb();
        vset
    }
}

#[cfg(test)]
mod test {
    use super::{FillMode, VoxelValue, VoxelizedVolume};
    use crate::math::Point;
    use crate::shape::Mesh;

    fn cube(size: f64) -> Mesh {
        let v = |x: f64, y: f64, z: f64| Point::new(x * size, y * size, z * size);
        let vertices = vec![
            v(0.0, 0.0, 0.0),
            v(1.0, 0.0, 0.0),
            v(1.0, 1.0, 0.0),
            v(0.0, 1.0, 0.0),
            v(0.0, 0.0, 1.0),
            v(1.0, 0.0, 1.0),
            v(1.0, 1.0, 1.0),
            v(0.0, 1.0, 1.0),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2,
            4, 5, 6, 4, 6, 7,
            0, 1, 5, 0, 5, 4,
            1, 2, 6, 1, 6, 5,
            2, 3, 7, 2, 7, 6,
            3, 0, 4, 3, 4, 7,
        ];
        Mesh::new(vertices, indices).unwrap()
    }

    #[test]
    fn flood_fill_cube() {
        let cube = cube(2.0);
        let volume = VoxelizedVolume::voxelize(
            cube.vertices(),
            &cube.triangle_indices(),
            10,
            FillMode::FloodFill,
        );

        assert_eq!(volume.resolution(), Point::new(10, 12, 12));
        assert_relative_eq!(volume.scale(), 2.0 / 9.0);

        // The center of the cube is filled, a corner of the grid is not.
        assert_eq!(volume.voxel(5, 5, 5), VoxelValue::PrimitiveInsideSurface);
        assert_eq!(volume.voxel(0, 11, 11), VoxelValue::PrimitiveOutsideSurface);

        let total = volume.num_voxels_on_surface()
            + volume.num_voxels_inside_surface()
            + volume.num_voxels_outside_surface();
        assert_eq!(total, 10 * 12 * 12);
        assert!(volume.num_voxels_inside_surface() > 0);
    }

    #[test]
    fn surface_only_has_no_inside() {
        let cube = cube(1.0);
        let volume = VoxelizedVolume::voxelize(
            cube.vertices(),
            &cube.triangle_indices(),
            16,
            FillMode::SurfaceOnly,
        );

        assert_eq!(volume.num_voxels_inside_surface(), 0);
        assert_eq!(volume.voxel(8, 8, 8), VoxelValue::PrimitiveOutsideSurface);
    }

    #[test]
    fn degenerate_input_gives_empty_grid() {
        let pts = [Point::new(1.0, 1.0, 1.0); 3];
        let volume = VoxelizedVolume::voxelize(&pts, &[[0, 1, 2]], 10, FillMode::FloodFill);
        assert_eq!(volume.resolution(), Point::origin());
    }
}
