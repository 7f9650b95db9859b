use crate::math::{Point, Real};

/// Given an index buffer, remove from `points` every point that is not indexed.
///
/// The relative order of the remaining points is preserved and `idx` is
/// rewritten to reference the compacted buffer.
pub fn remove_unused_points(points: &mut Vec<Point<Real>>, idx: &mut [[u32; 3]]) {
    let remap = compact(points, idx.iter().flatten().copied());

    for tri in idx.iter_mut() {
        for id in tri.iter_mut() {
            *id = remap[*id as usize];
        }
    }
}

/// Same as [`remove_unused_points`] but for polygons with an arbitrary number of vertices.
pub fn remove_unused_polygon_points<P>(points: &mut Vec<Point<Real>>, polygons: &mut [P])
where
    P: AsMut<[u32]> + AsRef<[u32]>,
{
    let remap = compact(
        points,
        polygons.iter().flat_map(|poly| poly.as_ref().iter().copied()),
    );

    for poly in polygons.iter_mut() {
        for id in poly.as_mut() {
            *id = remap[*id as usize];
        }
    }
}

fn compact(points: &mut Vec<Point<Real>>, used_ids: impl Iterator<Item = u32>) -> Vec<u32> {
    let mut used = vec![false; points.len()];
    for id in used_ids {
        used[id as usize] = true;
    }

    let mut remap = vec![u32::MAX; points.len()];
    let mut num_kept = 0;

    for i in 0..points.len() {
        if used[i] {
            points[num_kept] = points[i];
            remap[i] = num_kept as u32;
            num_kept += 1;
        }
    }

    points.truncate(num_kept);
    remap
}
