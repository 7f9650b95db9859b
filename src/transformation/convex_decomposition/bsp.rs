use super::polytope::ConvexPolytope;
use crate::kernel::{Plane, Sign};
use crate::math::{Point, Real, Vector};
use crate::repair::{PlanarRegion, Solid};
use crate::utils::hashmap::HashSet;
use ordered_float::OrderedFloat;
use core::cmp::Reverse;

// Maximum number of planes evaluated when choosing a splitting plane.
const MAX_CANDIDATE_PLANES: usize = 16;

/// A convex planar piece of the boundary of a solid.
#[derive(Clone, Debug)]
struct Fragment {
    points: Vec<Point<Real>>,
    region: u32,
}

impl Fragment {
    fn sides(&self, plane: &Plane, tolerance: Real) -> Vec<Sign> {
        self.points
            .iter()
            .map(|pt| plane.side_with_tolerance(pt, tolerance))
            .collect()
    }

    fn straddles(&self, plane: &Plane, tolerance: Real) -> bool {
        let sides = self.sides(plane, tolerance);
        sides.contains(&Sign::Positive) && sides.contains(&Sign::Negative)
    }

    fn split(self, plane: &Plane, tolerance: Real) -> (Option<Fragment>, Option<Fragment>) {
        let sides = self.sides(plane, tolerance);
        let has_pos = sides.contains(&Sign::Positive);
        let has_neg = sides.contains(&Sign::Negative);

        match (has_pos, has_neg) {
            (false, false) => return (None, None),
            (true, false) => return (Some(self), None),
            (false, true) => return (None, Some(self)),
            (true, true) => {}
        }

        let mut pos = Vec::new();
        let mut neg = Vec::new();
        let n = self.points.len();

        for k in 0..n {
            let (p, q) = (&self.points[k], &self.points[(k + 1) % n]);
            let (sp, sq) = (sides[k], sides[(k + 1) % n]);

            if sp != Sign::Negative {
                pos.push(*p);
            }

            if sp != Sign::Positive {
                neg.push(*p);
            }

            if (sp == Sign::Positive && sq == Sign::Negative)
                || (sp == Sign::Negative && sq == Sign::Positive)
            {
                let cut = plane.intersect_segment(p, q);
                pos.push(cut);
                neg.push(cut);
            }
        }

        let region = self.region;
        let make = |points: Vec<Point<Real>>| (points.len() >= 3).then_some(Fragment { points, region });
        (make(pos), make(neg))
    }

    fn area(&self) -> Real {
        let mut normal = Vector::zeros();

        for k in 1..self.points.len() - 1 {
            normal += (self.points[k] - self.points[0]).cross(&(self.points[k + 1] - self.points[0]));
        }

        normal.norm() * 0.5
    }
}

fn is_coplanar(a: &Plane, b: &Plane) -> bool {
    a.points().iter().all(|pt| b.side(pt) == Sign::Zero)
}

// Chooses the region plane cutting the fewest fragments, preferring larger regions.
fn select_splitting_region(
    regions: &[PlanarRegion],
    fragments: &[Fragment],
    tolerance: Real,
) -> u32 {
    let mut seen: HashSet<u32> = HashSet::default();
    let candidates: Vec<u32> = fragments
        .iter()
        .map(|f| f.region)
        .filter(|r| seen.insert(*r))
        .collect();
    let step = candidates.len().div_ceil(MAX_CANDIDATE_PLANES).max(1);

    candidates
        .iter()
        .step_by(step)
        .map(|region| {
            let plane = &regions[*region as usize].plane;
            let num_straddling = fragments
                .iter()
                .filter(|f| f.straddles(plane, tolerance))
                .count();
            let area: Real = fragments
                .iter()
                .filter(|f| f.region == *region)
                .map(|f| f.area())
                .sum();
            (*region, num_straddling, area)
        })
        .min_by_key(|(_, num_straddling, area)| (*num_straddling, Reverse(OrderedFloat(*area))))
        .map(|(region, _, _)| region)
        .unwrap_or(candidates[0])
}

/// Partitions `root` with the supporting planes of the boundary of `solid`, and
/// returns the convex leaf cells that are inside of the solid.
///
/// Each node is split by the plane of one of the boundary regions crossing it.
/// The fragments of the boundary lying on the splitting plane are consumed by the
/// split, so a node without any fragment is entirely inside or entirely outside.
pub(crate) fn binary_space_partition(
    solid: &Solid,
    root: ConvexPolytope,
    tolerance: Real,
    min_volume: Real,
) -> Vec<ConvexPolytope> {
    let regions = solid.regions();
    let fragments: Vec<Fragment> = solid
        .triangles()
        .iter()
        .enumerate()
        .filter_map(|(tid, tri)| {
            let region = solid.triangle_region(tid as u32)?;
            let points = tri.iter().map(|i| solid.points()[*i as usize]).collect();
            Some(Fragment { points, region })
        })
        .collect();

    let mut stack = vec![(root, fragments)];
    let mut cells = Vec::new();
    let mut num_leaves = 0;

    while let Some((cell, fragments)) = stack.pop() {
        if fragments.is_empty() {
            num_leaves += 1;

            if solid.contains_point(&cell.centroid()) {
                cells.push(cell);
            }

            continue;
        }

        let region = select_splitting_region(regions, &fragments, tolerance);
        let plane = &regions[region as usize].plane;
        let (pos_cell, neg_cell) = cell.split(plane, tolerance, min_volume);
        let mut pos_fragments = Vec::new();
        let mut neg_fragments = Vec::new();

        for fragment in fragments {
            if fragment.region == region
                || is_coplanar(&regions[fragment.region as usize].plane, plane)
            {
                continue;
            }

            let (pos, neg) = fragment.split(plane, tolerance);
            pos_fragments.extend(pos);
            neg_fragments.extend(neg);
        }

        if let Some(cell) = pos_cell {
            stack.push((cell, pos_fragments));
        }

        if let Some(cell) = neg_cell {
            stack.push((cell, neg_fragments));
        }
    }

    log::debug!(
        "Binary space partition: {} leaves, {} inside.",
        num_leaves,
        cells.len()
    );

    cells
}
