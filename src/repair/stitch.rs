use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::topology::{orient_polygon_soup, union_find, IntKey, Polygon, PolygonMesh};
use crate::utils::{self, hashmap::HashMap};

/// Stitches the border edges of `mesh` whose endpoints coincide within `tolerance`.
///
/// Each border edge is paired with at most one other border edge, preferably one
/// running in the opposite direction. Paired edges get their endpoints merged, and
/// the mesh is re-oriented and rebuilt. If the stitched mesh is not a valid
/// polygon mesh, `mesh` is left untouched.
///
/// Returns the number of edges that are no longer on the border.
pub fn stitch_borders(mesh: &mut PolygonMesh, tolerance: Real) -> usize {
    let half_edges = mesh.half_edges();
    let points = mesh.points();
    let border: Vec<(u32, u32)> = half_edges
        .iter()
        .filter(|he| he.is_border())
        .map(|he| (he.vertex, half_edges[he.next as usize].vertex))
        .collect();

    if border.len() < 2 {
        return 0;
    }

    let cell_size = tolerance
        .max(Aabb::from_points(points).diagonal_length() * 1.0e-3)
        .max(Real::MIN_POSITIVE);
    let mut grid: HashMap<[i64; 3], Vec<usize>> = HashMap::default();

    for (i, (start, _)) in border.iter().enumerate() {
        grid.entry(cell_key(&points[*start as usize], cell_size))
            .or_default()
            .push(i);
    }

    let close = |i: u32, j: u32| {
        i == j || na::distance(&points[i as usize], &points[j as usize]) <= tolerance
    };

    let mut ufind = union_find(points.len());
    let mut matched = vec![false; border.len()];
    let mut num_pairs = 0;

    for i in 0..border.len() {
        if matched[i] {
            continue;
        }

        let (a, b) = border[i];

        if close(a, b) {
            continue;
        }

        let is_free = |j: &usize| *j != i && !matched[*j];
        let opposite = candidates(&grid, &points[b as usize], cell_size)
            .filter(is_free)
            .find(|j| close(border[*j].0, b) && close(border[*j].1, a));

        if let Some(j) = opposite {
            let (c, d) = border[j];
            ufind.union(IntKey(a), IntKey(d));
            ufind.union(IntKey(b), IntKey(c));
            matched[i] = true;
            matched[j] = true;
            num_pairs += 1;
            continue;
        }

        let same_direction = candidates(&grid, &points[a as usize], cell_size)
            .filter(is_free)
            .find(|j| close(border[*j].0, a) && close(border[*j].1, b));

        if let Some(j) = same_direction {
            let (c, d) = border[j];
            ufind.union(IntKey(a), IntKey(c));
            ufind.union(IntKey(b), IntKey(d));
            matched[i] = true;
            matched[j] = true;
            num_pairs += 1;
        }
    }

    if num_pairs == 0 {
        return 0;
    }

    let mut new_points = points.to_vec();
    let mut polygons: Vec<Polygon> = mesh
        .polygons()
        .iter()
        .filter_map(|poly| {
            let mut merged: Polygon = poly.iter().map(|i| ufind.find(IntKey(*i)).0).collect();
            merged.dedup();

            while merged.len() > 1 && merged.first() == merged.last() {
                let _ = merged.pop();
            }

            let distinct = merged
                .iter()
                .enumerate()
                .all(|(k, i)| !merged[k + 1..].contains(i));

            (merged.len() >= 3 && distinct).then_some(merged)
        })
        .collect();

    let _ = orient_polygon_soup(&mut new_points, &mut polygons);
    utils::remove_unused_polygon_points(&mut new_points, &mut polygons);

    match PolygonMesh::new(new_points, polygons) {
        Ok(stitched) if stitched.is_valid() => {
            let num_stitched = (border.len() - stitched.num_border_edges()) / 2;
            log::debug!(
                "Stitched {} border edge pairs, {} border edges remain.",
                num_stitched,
                stitched.num_border_edges()
            );
            *mesh = stitched;
            num_stitched
        }
        _ => {
            log::debug!(
                "Border stitching of {} edge pairs produced an invalid mesh and was discarded.",
                num_pairs
            );
            0
        }
    }
}

fn cell_key(pt: &Point<Real>, cell_size: Real) -> [i64; 3] {
    [
        (pt.x / cell_size).floor() as i64,
        (pt.y / cell_size).floor() as i64,
        (pt.z / cell_size).floor() as i64,
    ]
}

// The border edges starting in the cells around `pt`.
fn candidates<'a>(
    grid: &'a HashMap<[i64; 3], Vec<usize>>,
    pt: &Point<Real>,
    cell_size: Real,
) -> impl Iterator<Item = usize> + 'a {
    let [x, y, z] = cell_key(pt, cell_size);

    (-1..=1)
        .flat_map(move |i| (-1..=1).flat_map(move |j| (-1..=1).map(move |k| [x + i, y + j, z + k])))
        .filter_map(move |key| grid.get(&key))
        .flatten()
        .copied()
}
