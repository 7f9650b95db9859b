use super::ConvexCell;
use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::transformation::{convex_hull_volume, try_convex_hull};

/// Greedily merges pairs of convex cells whose union is convex.
///
/// Two cells are merged when the volume of the convex hull of their union does
/// not exceed the sum of their volumes by more than `tolerance`.
pub(crate) fn merge_convex_cells(mut cells: Vec<ConvexCell>, tolerance: Real) -> Vec<ConvexCell> {
    let mut aabbs: Vec<Aabb> = cells.iter().map(|c| Aabb::from_points(&c.points)).collect();
    let num_cells = cells.len();

    loop {
        let mut merged_any = false;
        let mut i = 0;

        while i < cells.len() {
            let mut j = i + 1;

            while j < cells.len() {
                if !aabbs[i].loosened(tolerance).intersects(&aabbs[j]) {
                    j += 1;
                    continue;
                }

                let mut points = cells[i].points.clone();
                points.extend_from_slice(&cells[j].points);

                let Ok((points, triangles)) = try_convex_hull(&points) else {
                    j += 1;
                    continue;
                };

                let volume = convex_hull_volume(&points, &triangles);
                let parts_volume = cells[i].volume + cells[j].volume;

                if volume <= parts_volume * (1.0 + 1.0e-9) + tolerance {
                    aabbs[i] = Aabb::from_points(&points);
                    cells[i] = ConvexCell {
                        points,
                        triangles,
                        volume,
                    };
                    let _ = cells.swap_remove(j);
                    let _ = aabbs.swap_remove(j);
                    merged_any = true;
                    // The cell `i` grew: test it again against every other cell.
                    j = i + 1;
                } else {
                    j += 1;
                }
            }

            i += 1;
        }

        if !merged_any {
            break;
        }
    }

    log::debug!("Merged {} convex cells into {}.", num_cells, cells.len());
    cells
}
