use super::VoxelSet;
use crate::kernel::tetrahedron_signed_volume;
use crate::math::{Matrix, Point, Real, Vector};
use crate::transformation::vhacd::CutPlane;

// Split of a voxel into one central tetrahedron and four corner tetrahedra.
// The indices refer to the voxel corners as enumerated by `VoxelSet::surface_points`.
const VOXEL_TETRAHEDRA: [[usize; 4]; 5] = [
    [1, 3, 4, 6],
    [0, 1, 3, 4],
    [2, 3, 1, 6],
    [5, 1, 6, 4],
    [7, 6, 3, 4],
];

/// A tetrahedron of a [`TetrahedronSet`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tetrahedron {
    /// The four vertices of the tetrahedron.
    pub vertices: [Point<Real>; 4],
    /// Is this tetrahedron on the surface of the volume?
    pub is_on_surface: bool,
}

impl Tetrahedron {
    /// The (unsigned) volume of this tetrahedron.
    pub fn volume(&self) -> Real {
        let [a, b, c, d] = &self.vertices;
        tetrahedron_signed_volume(a, b, c, d).abs()
    }

    /// The barycenter of this tetrahedron.
    pub fn center(&self) -> Point<Real> {
        let sum = self.vertices.iter().fold(Vector::zeros(), |acc, p| acc + p.coords);
        Point::from(sum / 4.0)
    }
}

/// A volume decomposed into tetrahedra.
///
/// It is built by splitting every voxel of a [`VoxelSet`] into five tetrahedra,
/// and keeps the voxel grid of that set to generate its clipping planes.
#[derive(Clone, Debug)]
pub struct TetrahedronSet {
    pub(crate) origin: Point<Real>,
    pub(crate) scale: Real,
    pub(crate) min_bb_voxels: Point<u32>,
    pub(crate) max_bb_voxels: Point<u32>,
    pub(crate) tetrahedra: Vec<Tetrahedron>,
}

impl TetrahedronSet {
    /// Splits every voxel of `vset` into tetrahedra.
    pub fn from_voxel_set(vset: &VoxelSet) -> Self {
        let mut tetrahedra = Vec::with_capacity(vset.len() * VOXEL_TETRAHEDRA.len());

        for voxel in vset.voxels() {
            let center = vset.get_point(na::convert(voxel.coords));
            let h = vset.scale / 2.0;
            let corners = [
                center + Vector::new(-h, -h, -h),
                center + Vector::new(h, -h, -h),
                center + Vector::new(h, h, -h),
                center + Vector::new(-h, h, -h),
                center + Vector::new(-h, -h, h),
                center + Vector::new(h, -h, h),
                center + Vector::new(h, h, h),
                center + Vector::new(-h, h, h),
            ];

            for ids in &VOXEL_TETRAHEDRA {
                tetrahedra.push(Tetrahedron {
                    vertices: ids.map(|i| corners[i]),
                    is_on_surface: voxel.is_on_surface,
                });
            }
        }

        let mut result = TetrahedronSet {
            origin: vset.origin,
            scale: vset.scale,
            min_bb_voxels: Point::origin(),
            max_bb_voxels: Point::origin(),
            tetrahedra,
        };
        result.compute_bb();
        result
    }

    /// The tetrahedra of this set.
    pub fn tetrahedra(&self) -> &[Tetrahedron] {
        &self.tetrahedra
    }

    /// The number of tetrahedra in this set.
    pub fn len(&self) -> usize {
        self.tetrahedra.len()
    }

    /// Is this set empty?
    pub fn is_empty(&self) -> bool {
        self.tetrahedra.is_empty()
    }

    /// The total volume of the tetrahedra of this set.
    pub fn compute_volume(&self) -> Real {
        self.tetrahedra.iter().map(|t| t.volume()).sum()
    }

    /// The minimal coordinates of the voxel-grid bounding-box of this set.
    pub fn min_bb_voxels(&self) -> Point<u32> {
        self.min_bb_voxels
    }

    /// The maximal coordinates of the voxel-grid bounding-box of this set.
    pub fn max_bb_voxels(&self) -> Point<u32> {
        self.max_bb_voxels
    }

    fn grid_coords(&self, pt: &Point<Real>) -> Point<u32> {
        ((pt - self.origin) / self.scale).map(|e| e.round().max(0.0) as u32).into()
    }

    /// Updates the voxel-grid bounding box of this set.
    pub fn compute_bb(&mut self) {
        let mut coords = self.tetrahedra.iter().map(|t| self.grid_coords(&t.center()));

        let Some(first) = coords.next() else {
            return;
        };

        let (mins, maxs) = coords.fold((first, first), |(mins, maxs), c| (mins.inf(&c), maxs.sup(&c)));
        self.min_bb_voxels = mins;
        self.max_bb_voxels = maxs;
    }

    /// The vertices of the tetrahedra on the surface of this set.
    ///
    /// Only one surface tetrahedron every `sampling` is taken into account.
    pub fn surface_points(&self, sampling: u32) -> Vec<Point<Real>> {
        self.tetrahedra
            .iter()
            .filter(|t| t.is_on_surface)
            .step_by(sampling.max(1) as usize)
            .flat_map(|t| t.vertices)
            .collect()
    }

    pub(crate) fn select_on_surface(&self) -> TetrahedronSet {
        TetrahedronSet {
            tetrahedra: self.tetrahedra.iter().filter(|t| t.is_on_surface).copied().collect(),
            ..self.clone_empty()
        }
    }

    fn clone_empty(&self) -> TetrahedronSet {
        TetrahedronSet {
            origin: self.origin,
            scale: self.scale,
            min_bb_voxels: self.min_bb_voxels,
            max_bb_voxels: self.max_bb_voxels,
            tetrahedra: Vec::new(),
        }
    }

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

        for tetrahedron in &self.tetrahedra {
            let d = plane.signed_distance(&tetrahedron.center());
            let (pts, skipped) = if d >= 0.0 {
                (&mut *positive_pts, &mut sp)
            } else {
                (&mut *negative_pts, &mut sn)
            };

            if d.abs() <= d0 {
                pts.extend_from_slice(&tetrahedron.vertices);
            } else {
                *skipped += 1;

                if *skipped >= sampling {
                    pts.extend_from_slice(&tetrahedron.vertices);
                    *skipped = 0;
                }
            }
        }
    }

    // Returns (negative_volume, positive_volume)
    pub(crate) fn compute_clipped_volumes(&self, plane: &CutPlane) -> (Real, Real) {
        let mut positive_volume = 0.0;
        let mut negative_volume = 0.0;

        for tetrahedron in &self.tetrahedra {
            if plane.signed_distance(&tetrahedron.center()) >= 0.0 {
                positive_volume += tetrahedron.volume();
            } else {
                negative_volume += tetrahedron.volume();
            }
        }

        (negative_volume, positive_volume)
    }

    /// Splits this set depending on the side of the plane the tetrahedra centers lie on.
    ///
    /// Returns `(positive_part, negative_part)`.
    pub(crate) fn clip(&self, plane: &CutPlane) -> (TetrahedronSet, TetrahedronSet) {
        let mut positive_part = self.clone_empty();
        let mut negative_part = self.clone_empty();

        for tetrahedron in &self.tetrahedra {
            let mut tetrahedron = *tetrahedron;
            let d = plane.signed_distance(&tetrahedron.center());

            if d.abs() <= self.scale {
                tetrahedron.is_on_surface = true;
            }

            if d >= 0.0 {
                positive_part.tetrahedra.push(tetrahedron);
            } else {
                negative_part.tetrahedra.push(tetrahedron);
            }
        }

        positive_part.compute_bb();
        negative_part.compute_bb();
        (positive_part, negative_part)
    }

    /// The eigenvalues of the volume-weighted covariance matrix of the tetrahedra centers.
    pub(crate) fn compute_principal_axes(&self) -> Vector<Real> {
        let total: Real = self.compute_volume();

        if total == 0.0 {
            return Vector::zeros();
        }

        let mut center = Point::origin();
        for tetrahedron in &self.tetrahedra {
            center += tetrahedron.center().coords * (tetrahedron.volume() / total);
        }

        let mut cov_mat = Matrix::zeros();
        for tetrahedron in &self.tetrahedra {
            // Expressed in voxel units, like the voxel set covariance.
            let xyz = (tetrahedron.center() - center) / self.scale;
            cov_mat.syger(tetrahedron.volume() / total, &xyz, &xyz, 1.0);
        }

        cov_mat.symmetric_eigenvalues()
    }
}

#[cfg(test)]
mod test {
    use super::TetrahedronSet;
    use crate::math::Point;
    use crate::transformation::vhacd::CutPlane;
    use crate::transformation::voxelization::{Voxel, VoxelSet};

    #[test]
    fn voxels_split_into_tetrahedra() {
        let mut vset = VoxelSet::new();
        vset.scale = 0.5;
        vset.voxels = vec![
            Voxel {
                coords: Point::new(0, 0, 0),
                is_on_surface: true,
            },
            Voxel {
                coords: Point::new(1, 0, 0),
                is_on_surface: false,
            },
        ];
        vset.compute_bb();

        let tset = TetrahedronSet::from_voxel_set(&vset);
        assert_eq!(tset.len(), 10);
        assert_relative_eq!(tset.compute_volume(), vset.compute_volume(), epsilon = 1.0e-12);
        assert_eq!(tset.min_bb_voxels(), Point::origin());
        assert_eq!(tset.max_bb_voxels(), Point::new(1, 0, 0));
        assert_eq!(tset.surface_points(1).len(), 5 * 4);

        let plane = CutPlane::axis_aligned(&vset.origin, vset.scale, 0, 0);
        let (neg, pos) = tset.compute_clipped_volumes(&plane);
        assert_relative_eq!(neg, 0.125, epsilon = 1.0e-12);
        assert_relative_eq!(pos, 0.125, epsilon = 1.0e-12);

        let (pos, neg) = tset.clip(&plane);
        assert_eq!(pos.len(), 5);
        assert_eq!(neg.len(), 5);
        assert!(pos.tetrahedra().iter().all(|t| t.is_on_surface));
    }
}
