// Rust port, with modifications, of https://github.com/kmammou/v-hacd/blob/master/src/VHACD_Lib/src/VHACD.cpp
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

use super::primitive_set::PrimitiveSet;
use super::{CutPlane, PrimitiveMode, VHACDParameters};
use crate::math::{Point, Real, Vector};
use crate::transformation::convex_decomposition::{ConvexCell, DecompositionError};
use crate::transformation::voxelization::{TetrahedronSet, VoxelSet};
use crate::transformation::{convex_hull_volume, simplify_hull, try_convex_hull};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Approximate convex decomposition using the VHACD algorithm.
pub struct VHACD {
    convex_hulls: Vec<ConvexCell>,
    volume_ch0: Real,
    max_concavity: Real,
}

impl VHACD {
    /// Decompose the volume bounded by the given triangle mesh into a set of convex hulls.
    ///
    /// The mesh is expected to be closed: with `FillMode::FloodFill`, the
    /// interior of an open mesh leaks out and only its surface is decomposed.
    ///
    /// # Parameters
    /// * `params` - The parameters of the decomposition.
    /// * `points` - The vertex buffer of the mesh to decompose.
    /// * `triangles` - The index buffer of the mesh to decompose.
    pub fn decompose(
        params: &VHACDParameters,
        points: &[Point<Real>],
        triangles: &[[u32; 3]],
    ) -> Result<Self, DecompositionError> {
        // The voxel grid dimension is derived from the cube root of the
        // requested number of voxels.
        let dim = (((params.resolution as Real).powf(0.33) * 1.5) as u32).max(32);

        let vset = VoxelSet::voxelize(points, triangles, dim, params.fill_mode);
        if vset.is_empty() {
            return Err(DecompositionError::Empty);
        }

        log::debug!(
            "VHACD voxelization: {} voxels ({} on the surface) at scale {}.",
            vset.len(),
            vset.voxels().iter().filter(|v| v.is_on_surface).count(),
            vset.scale
        );

        let mut result = VHACD {
            convex_hulls: Vec::new(),
            volume_ch0: 1.0,
            max_concavity: -Real::MAX,
        };

        result.convex_hulls = match params.mode {
            PrimitiveMode::VoxelBased => result.do_compute_acd(params, vset),
            PrimitiveMode::TetrahedronBased => {
                let tset = TetrahedronSet::from_voxel_set(&vset);
                result.do_compute_acd(params, tset)
            }
        };

        result.merge_convex_hulls(params);
        result.simplify_convex_hulls(params);

        if result.convex_hulls.is_empty() {
            return Err(DecompositionError::Empty);
        }

        log::debug!(
            "VHACD produced {} convex hulls (max concavity: {}).",
            result.convex_hulls.len(),
            result.max_concavity
        );

        Ok(result)
    }

    /// The convex hulls computed by this decomposition.
    pub fn convex_hulls(&self) -> &[ConvexCell] {
        &self.convex_hulls
    }

    /// Consumes `self` and returns its convex hulls.
    pub fn into_convex_hulls(self) -> Vec<ConvexCell> {
        self.convex_hulls
    }

    /// The volume of the convex hull of the whole input.
    pub fn volume_ch0(&self) -> Real {
        self.volume_ch0
    }

    /// The largest concavity among the parts that have been clipped.
    pub fn max_concavity(&self) -> Real {
        self.max_concavity
    }

    fn do_compute_acd<P: PrimitiveSet>(
        &mut self,
        params: &VHACDParameters,
        pset: P,
    ) -> Vec<ConvexCell> {
        let mut input_parts = vec![pset];
        let mut parts = Vec::new();
        let mut temp = Vec::new();
        let mut first_iteration = true;

        let depth = if params.max_depth > 0 {
            params.max_depth
        } else {
            // One level deeper than the depth needed for `max_convex_hulls` leaves:
            // some branches stop early, and the merge step brings the hull count
            // back to the budget.
            let mut hull_count = 2;
            let mut depth = 1;

            while params.max_convex_hulls > hull_count {
                depth += 1;
                hull_count *= 2;
            }

            depth + 1
        };

        for level in 0..depth {
            if input_parts.is_empty() {
                break;
            }

            log::debug!(
                "VHACD level {}: {} parts to process.",
                level,
                input_parts.len()
            );

            for input_part in input_parts.drain(..) {
                self.process_primitive_set(params, first_iteration, input_part, &mut parts, &mut temp);
                first_iteration = false;
            }

            core::mem::swap(&mut input_parts, &mut temp);
        }

        parts.append(&mut input_parts);

        parts
            .iter()
            .filter_map(|part| {
                let points = part.surface_points(params.convex_hull_downsampling);
                ConvexCell::from_points(&points).ok()
            })
            .collect()
    }

    fn process_primitive_set<P: PrimitiveSet>(
        &mut self,
        params: &VHACDParameters,
        first_iteration: bool,
        pset: P,
        parts: &mut Vec<P>,
        temp: &mut Vec<P>,
    ) {
        let volume = pset.compute_volume();
        let hull =
            ConvexCell::from_points(&pset.surface_points(params.convex_hull_downsampling)).ok();
        let volume_ch = hull.as_ref().map(|h| h.volume).unwrap_or(0.0);

        if first_iteration {
            self.volume_ch0 = if volume_ch > 0.0 { volume_ch } else { volume };
        }

        let concavity = compute_concavity(volume, volume_ch, self.volume_ch0);

        if concavity <= params.concavity || pset.len() < 2 {
            parts.push(pset);
            return;
        }

        let (preferred_cutting_direction, w) = compute_preferred_cutting_direction(&pset);
        let planes = compute_axes_aligned_clipping_planes(&pset, params.plane_downsampling);
        let eval = PlaneEvaluation {
            pset: &pset,
            on_surface: &pset.select_on_surface(),
            hull: if params.convex_hull_approximation {
                hull.as_ref()
            } else {
                None
            },
            preferred_cutting_direction,
            w,
            alpha: concavity * params.alpha,
            beta: concavity * params.beta,
            volume_ch0: self.volume_ch0,
        };

        let Some((mut best_plane, mut min_concavity)) =
            eval.best_plane(&planes, params.convex_hull_downsampling, params.acceleration)
        else {
            parts.push(pset);
            return;
        };

        if params.plane_downsampling > 1 || params.convex_hull_downsampling > 1 {
            let planes_ref =
                refine_axes_aligned_clipping_planes(&pset, &best_plane, params.plane_downsampling);

            if let Some(best) = eval.best_plane(&planes_ref, 1, params.acceleration) {
                (best_plane, min_concavity) = best;
            }
        }

        self.max_concavity = self.max_concavity.max(min_concavity);

        let (positive_part, negative_part) = pset.clip(&best_plane);

        if positive_part.len() == 0 || negative_part.len() == 0 {
            parts.push(pset);
        } else {
            temp.push(negative_part);
            temp.push(positive_part);
        }
    }

    fn merge_cost(&self, ch1: &ConvexCell, ch2: &ConvexCell) -> Real {
        match merged_hull(ch1, ch2) {
            Some(merged) => compute_concavity(ch1.volume + ch2.volume, merged.volume, self.volume_ch0),
            None => Real::MAX,
        }
    }

    fn merge_convex_hulls(&mut self, params: &VHACDParameters) {
        let num_hulls = self.convex_hulls.len();

        if num_hulls <= 1 {
            return;
        }

        let mut costs = vec![vec![Real::MAX; num_hulls]; num_hulls];
        for i in 0..num_hulls {
            for j in 0..i {
                costs[i][j] = self.merge_cost(&self.convex_hulls[i], &self.convex_hulls[j]);
                costs[j][i] = costs[i][j];
            }
        }

        let max_hulls = params.max_convex_hulls.max(1) as usize;
        let min_volume = params.min_volume_per_ch * self.volume_ch0;

        while self.convex_hulls.len() > 1 {
            let n = self.convex_hulls.len();
            let tiny = self.convex_hulls.iter().position(|ch| ch.volume < min_volume);

            let (p1, p2) = if n > max_hulls {
                // Merge the cheapest pair.
                let mut best = (0, 1);
                for i in 0..n {
                    for j in 0..i {
                        if costs[i][j] < costs[best.1][best.0] {
                            best = (j, i);
                        }
                    }
                }
                best
            } else if let Some(tiny) = tiny {
                // Merge the tiny hull with its cheapest neighbor.
                let mut other = if tiny == 0 { 1 } else { 0 };
                for j in 0..n {
                    if j != tiny && costs[tiny][j] < costs[tiny][other] {
                        other = j;
                    }
                }
                (tiny.min(other), tiny.max(other))
            } else {
                break;
            };

            let Some(merged) = merged_hull(&self.convex_hulls[p1], &self.convex_hulls[p2]) else {
                log::debug!("VHACD could not merge the convex hulls {} and {}.", p1, p2);
                break;
            };

            self.convex_hulls[p1] = merged;
            let _ = self.convex_hulls.swap_remove(p2);
            let _ = costs.swap_remove(p2);
            for row in &mut costs {
                let _ = row.swap_remove(p2);
            }

            for j in 0..self.convex_hulls.len() {
                if j != p1 {
                    costs[p1][j] = self.merge_cost(&self.convex_hulls[p1], &self.convex_hulls[j]);
                    costs[j][p1] = costs[p1][j];
                }
            }
        }

        log::debug!(
            "VHACD merged {} convex hulls into {}.",
            num_hulls,
            self.convex_hulls.len()
        );
    }

    fn simplify_convex_hulls(&mut self, params: &VHACDParameters) {
        let max_vertices = params.max_num_vertices_per_ch as usize;

        for ch in &mut self.convex_hulls {
            if ch.points.len() <= max_vertices {
                continue;
            }

            match simplify_hull(&ch.points, max_vertices) {
                Ok((points, triangles)) => {
                    ch.volume = convex_hull_volume(&points, &triangles);
                    ch.points = points;
                    ch.triangles = triangles;
                }
                Err(err) => log::debug!("VHACD could not simplify a convex hull: {}", err),
            }
        }

        self.convex_hulls
            .retain(|ch| ch.points.len() <= max_vertices.max(4));
    }
}

/// The context needed to score candidate clipping planes of a primitive set.
struct PlaneEvaluation<'a, P> {
    pset: &'a P,
    on_surface: &'a P,
    hull: Option<&'a ConvexCell>,
    preferred_cutting_direction: Vector<Real>,
    w: Real,
    alpha: Real,
    beta: Real,
    volume_ch0: Real,
}

impl<P: PrimitiveSet> PlaneEvaluation<'_, P> {
    // Returns (total cost, concavity).
    fn cost(&self, plane: &CutPlane, convex_hull_downsampling: u32) -> (Real, Real) {
        let mut positive_pts = Vec::new();
        let mut negative_pts = Vec::new();

        self.on_surface.intersect(
            plane,
            &mut positive_pts,
            &mut negative_pts,
            convex_hull_downsampling * 32,
        );

        if let Some(hull) = self.hull {
            clip_convex_hull(hull, plane, &mut positive_pts, &mut negative_pts);
        }

        let volume_positive_ch = hull_volume(&positive_pts);
        let volume_negative_ch = hull_volume(&negative_pts);

        let (volume_negative, volume_positive) = self.pset.compute_clipped_volumes(plane);
        let concavity_negative =
            compute_concavity(volume_negative, volume_negative_ch, self.volume_ch0);
        let concavity_positive =
            compute_concavity(volume_positive, volume_positive_ch, self.volume_ch0);
        let concavity = concavity_negative + concavity_positive;

        let balance = self.alpha * (volume_negative - volume_positive).abs() / self.volume_ch0;
        let d = self.w * plane.abc.dot(&self.preferred_cutting_direction);
        let symmetry = self.beta * d;

        (concavity + balance + symmetry, concavity)
    }

    // Returns the best plane, and its concavity.
    fn best_plane(
        &self,
        planes: &[CutPlane],
        convex_hull_downsampling: u32,
        acceleration: bool,
    ) -> Option<(CutPlane, Real)> {
        let eval = |(i, plane): (usize, &CutPlane)| {
            let (total, concavity) = self.cost(plane, convex_hull_downsampling);
            (i, total, concavity)
        };

        // Ties are broken by the plane index, so the result does not depend on
        // the evaluation order.
        let compare = |a: &(usize, Real, Real), b: &(usize, Real, Real)| {
            a.1.total_cmp(&b.1).then(a.0.cmp(&b.0))
        };

        #[cfg(feature = "parallel")]
        let best = if acceleration {
            planes.par_iter().enumerate().map(eval).min_by(compare)
        } else {
            planes.iter().enumerate().map(eval).min_by(compare)
        };

        #[cfg(not(feature = "parallel"))]
        let best = {
            let _ = acceleration;
            planes.iter().enumerate().map(eval).min_by(compare)
        };

        best.map(|(i, _, concavity)| (planes[i], concavity))
    }
}

fn compute_concavity(volume: Real, volume_ch: Real, volume0: Real) -> Real {
    (volume_ch - volume).abs() / volume0
}

fn hull_volume(points: &[Point<Real>]) -> Real {
    try_convex_hull(points)
        .map(|(vertices, triangles)| convex_hull_volume(&vertices, &triangles))
        .unwrap_or(0.0)
}

fn merged_hull(ch1: &ConvexCell, ch2: &ConvexCell) -> Option<ConvexCell> {
    let mut points = ch1.points.clone();
    points.extend_from_slice(&ch2.points);
    ConvexCell::from_points(&points).ok()
}

/// Pushes the vertices of `hull` on their side of `plane`, and the intersections
/// of its edges with the plane on both sides.
fn clip_convex_hull(
    hull: &ConvexCell,
    plane: &CutPlane,
    positive_pts: &mut Vec<Point<Real>>,
    negative_pts: &mut Vec<Point<Real>>,
) {
    let distances: Vec<_> = hull.points.iter().map(|p| plane.signed_distance(p)).collect();

    for (pt, d) in hull.points.iter().zip(distances.iter()) {
        if *d >= 0.0 {
            positive_pts.push(*pt);
        } else {
            negative_pts.push(*pt);
        }
    }

    for tri in &hull.triangles {
        for k in 0..3 {
            let (a, b) = (tri[k] as usize, tri[(k + 1) % 3] as usize);

            // Every edge is shared by two triangles, only process it once.
            if a > b {
                continue;
            }

            let (da, db) = (distances[a], distances[b]);

            if (da >= 0.0) != (db >= 0.0) {
                let t = da / (da - db);
                let pt = hull.points[a] + (hull.points[b] - hull.points[a]) * t;
                positive_pts.push(pt);
                negative_pts.push(pt);
            }
        }
    }
}

fn compute_preferred_cutting_direction(pset: &impl PrimitiveSet) -> (Vector<Real>, Real) {
    let eigv = pset.compute_principal_axes();

    let vx = (eigv.y - eigv.z) * (eigv.y - eigv.z);
    let vy = (eigv.x - eigv.z) * (eigv.x - eigv.z);
    let vz = (eigv.x - eigv.y) * (eigv.x - eigv.y);

    let (dir, v, e) = if vx < vy && vx < vz {
        (Vector::x(), vx, eigv.y * eigv.y + eigv.z * eigv.z)
    } else if vy < vx && vy < vz {
        (Vector::y(), vy, eigv.x * eigv.x + eigv.z * eigv.z)
    } else {
        (Vector::z(), vz, eigv.x * eigv.x + eigv.y * eigv.y)
    };

    if e == 0.0 {
        (dir, 0.0)
    } else {
        (dir, 1.0 - v / e)
    }
}

fn compute_axes_aligned_clipping_planes(
    pset: &impl PrimitiveSet,
    downsampling: u32,
) -> Vec<CutPlane> {
    let (origin, scale) = pset.grid();
    let (min_v, max_v) = pset.bb_voxels();
    let mut planes = Vec::new();

    for dim in 0..3 {
        // No plane after the last layer: it would leave one side empty.
        for i in (min_v[dim]..max_v[dim]).step_by(downsampling.max(1) as usize) {
            planes.push(CutPlane::axis_aligned(&origin, scale, dim, i));
        }
    }

    planes
}

fn refine_axes_aligned_clipping_planes(
    pset: &impl PrimitiveSet,
    best_plane: &CutPlane,
    downsampling: u32,
) -> Vec<CutPlane> {
    let (origin, scale) = pset.grid();
    let (min_v, max_v) = pset.bb_voxels();
    let axis = best_plane.axis as usize;

    let i0 = min_v[axis].max(best_plane.index.saturating_sub(downsampling));
    let i1 = max_v[axis].min(best_plane.index + downsampling);

    (i0..i1)
        .map(|i| CutPlane::axis_aligned(&origin, scale, axis, i))
        .collect()
}

#[cfg(test)]
mod test {
    use super::VHACD;
    use crate::math::{Point, Real};
    use crate::transformation::check_convex_hull;
    use crate::transformation::vhacd::{PrimitiveMode, VHACDParameters};

    // An L-shaped prism of volume 3.
    fn l_shape() -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        let profile = [
            [0.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 2.0],
            [0.0, 2.0],
        ];
        let mut points: Vec<_> = profile.iter().map(|p| Point::new(p[0], p[1], 0.0)).collect();
        points.extend(profile.iter().map(|p| Point::new(p[0], p[1], 1.0)));

        // Caps, fanned from the reflex corner 3.
        let mut triangles = vec![
            [3, 2, 1],
            [3, 1, 0],
            [3, 0, 5],
            [3, 5, 4],
            [9, 7, 8],
            [9, 6, 7],
            [9, 11, 6],
            [9, 10, 11],
        ];
        for i in 0..6 {
            let j = (i + 1) % 6;
            triangles.push([i, j, j + 6]);
            triangles.push([i, j + 6, i + 6]);
        }

        (points, triangles)
    }

    fn params() -> VHACDParameters {
        VHACDParameters {
            resolution: 10_000,
            concavity: 0.01,
            max_convex_hulls: 8,
            ..VHACDParameters::default()
        }
    }

    #[test]
    fn l_shape_is_split() {
        let (points, triangles) = l_shape();
        let vhacd = VHACD::decompose(&params(), &points, &triangles).unwrap();
        let hulls = vhacd.convex_hulls();

        assert!(hulls.len() >= 2 && hulls.len() <= 8);

        let total: Real = hulls.iter().map(|h| h.volume).sum();
        assert!(total > 2.5 && total < 4.0, "total hull volume: {}", total);

        for hull in hulls {
            assert!(hull.points.len() <= 64);
            check_convex_hull(&hull.points, &hull.triangles).unwrap();
        }
    }

    #[test]
    fn respects_the_budgets() {
        let (points, triangles) = l_shape();
        let params = VHACDParameters {
            max_convex_hulls: 1,
            max_num_vertices_per_ch: 6,
            mode: PrimitiveMode::TetrahedronBased,
            ..params()
        };

        let vhacd = VHACD::decompose(&params, &points, &triangles).unwrap();
        assert_eq!(vhacd.convex_hulls().len(), 1);
        assert!(vhacd.convex_hulls()[0].points.len() <= 6);
    }

    #[test]
    fn degenerate_input_fails() {
        let points = vec![Point::origin(); 3];
        assert!(VHACD::decompose(&params(), &points, &[[0, 1, 2]]).is_err());
    }
}
