use super::union_find::{union_find, IntKey};
use super::Polygon;
use crate::math::{Point, Real};
use crate::utils::hashmap::{HashMap, HashSet};
use crate::utils::SortedPair;
use alloc::collections::VecDeque;
use smallvec::SmallVec;

/// Orients a polygon soup consistently and splits its non-manifold vertices.
///
/// Faces are flipped by breadth-first propagation across edges shared by exactly
/// two faces. An edge along which the orientation cannot be made consistent, or
/// an edge shared by more than two faces, is cut. Vertices whose faces do not form
/// a single fan once cut edges are ignored are then duplicated, one copy per fan,
/// and the polygons are updated accordingly.
///
/// Returns `false` if any edge had to be cut or any vertex had to be duplicated.
pub fn orient_polygon_soup(points: &mut Vec<Point<Real>>, polygons: &mut [Polygon]) -> bool {
    let mut edge_faces: HashMap<SortedPair<u32>, SmallVec<[u32; 2]>> = HashMap::default();

    for (fid, poly) in polygons.iter().enumerate() {
        for k in 0..poly.len() {
            let key = SortedPair::new(poly[k], poly[(k + 1) % poly.len()]);
            edge_faces.entry(key).or_default().push(fid as u32);
        }
    }

    let mut consistent = true;
    let mut visited = vec![false; polygons.len()];
    let mut cut_edges: HashSet<SortedPair<u32>> = HashSet::default();
    let mut queue = VecDeque::new();

    for seed in 0..polygons.len() {
        if visited[seed] {
            continue;
        }

        visited[seed] = true;
        queue.push_back(seed);

        while let Some(fid) = queue.pop_front() {
            for k in 0..polygons[fid].len() {
                let a = polygons[fid][k];
                let b = polygons[fid][(k + 1) % polygons[fid].len()];
                let key = SortedPair::new(a, b);
                let faces = &edge_faces[&key];

                if faces.len() != 2 {
                    if faces.len() > 2 && cut_edges.insert(key) {
                        consistent = false;
                    }
                    continue;
                }

                let adj = (if faces[0] == fid as u32 {
                    faces[1]
                } else {
                    faces[0]
                }) as usize;

                if !visited[adj] {
                    // The neighbor must traverse the shared edge from `b` to `a`.
                    if has_directed_edge(&polygons[adj], a, b) {
                        polygons[adj].reverse();
                    }

                    visited[adj] = true;
                    queue.push_back(adj);
                } else if has_directed_edge(&polygons[adj], a, b) && cut_edges.insert(key) {
                    consistent = false;
                }
            }
        }
    }

    // Group the face corners of each vertex into fans connected through uncut edges.
    let mut corner_offsets = Vec::with_capacity(polygons.len() + 1);
    corner_offsets.push(0);
    for poly in polygons.iter() {
        corner_offsets.push(corner_offsets.last().copied().unwrap_or(0) + poly.len());
    }

    let num_corners = corner_offsets.last().copied().unwrap_or(0);
    let mut ufind = union_find(num_corners);
    let corner = |fid: usize, vid: u32, polygons: &[Polygon]| -> Option<IntKey> {
        polygons[fid]
            .iter()
            .position(|i| *i == vid)
            .map(|k| IntKey((corner_offsets[fid] + k) as u32))
    };

    for (key, faces) in &edge_faces {
        if faces.len() != 2 || cut_edges.contains(key) {
            continue;
        }

        let (f1, f2) = (faces[0] as usize, faces[1] as usize);
        let (a, b) = **key;

        for vid in [a, b] {
            if let (Some(c1), Some(c2)) = (corner(f1, vid, polygons), corner(f2, vid, polygons)) {
                ufind.union(c1, c2);
            }
        }
    }

    let mut fan_to_vertex: HashMap<IntKey, u32> = HashMap::default();
    let mut vertex_used = vec![false; points.len()];
    let mut num_duplicated = 0;

    for fid in 0..polygons.len() {
        for k in 0..polygons[fid].len() {
            let vid = polygons[fid][k];
            let fan = ufind.find(IntKey((corner_offsets[fid] + k) as u32));

            let new_vid = *fan_to_vertex.entry(fan).or_insert_with(|| {
                if vertex_used[vid as usize] {
                    points.push(points[vid as usize]);
                    num_duplicated += 1;
                    points.len() as u32 - 1
                } else {
                    vertex_used[vid as usize] = true;
                    vid
                }
            });

            polygons[fid][k] = new_vid;
        }
    }

    if num_duplicated > 0 {
        log::debug!(
            "Polygon soup orientation: {} edges cut, {} vertices duplicated.",
            cut_edges.len(),
            num_duplicated
        );
    }

    consistent && num_duplicated == 0
}

fn has_directed_edge(poly: &[u32], a: u32, b: u32) -> bool {
    (0..poly.len()).any(|k| poly[k] == a && poly[(k + 1) % poly.len()] == b)
}
