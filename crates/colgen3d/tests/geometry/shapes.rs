use colgen3d::math::{Point, Real, Vector};
use colgen3d::Mesh;
use std::f64::consts::PI;

#[rustfmt::skip]
const CUBE_INDICES: [u32; 36] = [
    0, 2, 3, 0, 3, 1,
    4, 5, 7, 4, 7, 6,
    0, 1, 5, 0, 5, 4,
    2, 6, 7, 2, 7, 3,
    0, 4, 6, 0, 6, 2,
    1, 3, 7, 1, 7, 5,
];

fn cube_vertices(center: Point<Real>, half: Real) -> Vec<Point<Real>> {
    (0..8)
        .map(|k| {
            let sign = |bit: u32| if k & bit == 0 { -half } else { half };
            center + Vector::new(sign(1), sign(2), sign(4))
        })
        .collect()
}

pub fn cube(center: Point<Real>, half: Real) -> Mesh {
    Mesh::new(cube_vertices(center, half), CUBE_INDICES.to_vec()).unwrap()
}

/// A unit box without its top face, with two flipped side triangles.
pub fn open_box() -> Mesh {
    let mut indices = CUBE_INDICES.to_vec();
    // Drop the top face.
    let _ = indices.drain(6..12);
    // Flip the first face of the `y-` side.
    indices.swap(6, 7);

    Mesh::new(cube_vertices(Point::new(0.5, 0.5, 0.5), 0.5), indices).unwrap()
}

pub fn uv_sphere(center: Point<Real>, radius: Real, rings: u32, sectors: u32) -> Mesh {
    let mut vertices = vec![center + Vector::z() * radius];

    for i in 1..rings {
        let theta = PI * i as Real / rings as Real;
        for j in 0..sectors {
            let phi = 2.0 * PI * j as Real / sectors as Real;
            let dir = Vector::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());
            vertices.push(center + dir * radius);
        }
    }

    vertices.push(center - Vector::z() * radius);
    let south = vertices.len() as u32 - 1;
    let ring = |i: u32, j: u32| 1 + (i - 1) * sectors + j % sectors;

    let mut indices = Vec::new();
    for j in 0..sectors {
        indices.extend([0, ring(1, j), ring(1, j + 1)]);
        indices.extend([south, ring(rings - 1, j + 1), ring(rings - 1, j)]);

        for i in 1..rings - 1 {
            indices.extend([ring(i, j), ring(i + 1, j), ring(i + 1, j + 1)]);
            indices.extend([ring(i, j), ring(i + 1, j + 1), ring(i, j + 1)]);
        }
    }

    Mesh::new(vertices, indices).unwrap()
}

/// An L-shaped prism of volume 3.
pub fn l_shape() -> Mesh {
    let profile = [
        [0.0, 0.0],
        [2.0, 0.0],
        [2.0, 1.0],
        [1.0, 1.0],
        [1.0, 2.0],
        [0.0, 2.0],
    ];
    let mut vertices: Vec<_> = profile.iter().map(|p| Point::new(p[0], p[1], 0.0)).collect();
    vertices.extend(profile.iter().map(|p| Point::new(p[0], p[1], 1.0)));

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

    Mesh::from_triangles(vertices, &triangles).unwrap()
}

/// Three triangles piercing each other, with unrelated windings.
/// A 3×3×1 block of unit voxels without its center voxel: a genus-1 solid of volume 8.
pub fn square_frame() -> Mesh {
    let outer = [[0.0, 0.0], [3.0, 0.0], [3.0, 3.0], [0.0, 3.0]];
    let inner = [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0]];
    let mut vertices = Vec::new();

    for z in [0.0, 1.0] {
        vertices.extend(outer.iter().map(|p| Point::new(p[0], p[1], z)));
        vertices.extend(inner.iter().map(|p| Point::new(p[0], p[1], z)));
    }

    // Outer and inner corners, bottom then top.
    let (ob, ib, ot, it) = (0, 4, 8, 12);
    let mut triangles = Vec::new();

    for i in 0..4 {
        let j = (i + 1) % 4;
        triangles.push([ot + i, ot + j, it + j]);
        triangles.push([ot + i, it + j, it + i]);
        triangles.push([ob + i, ib + j, ob + j]);
        triangles.push([ob + i, ib + i, ib + j]);
        triangles.push([ob + i, ob + j, ot + j]);
        triangles.push([ob + i, ot + j, ot + i]);
        triangles.push([ib + i, it + j, ib + j]);
        triangles.push([ib + i, it + i, it + j]);
    }

    Mesh::from_triangles(vertices, &triangles).unwrap()
}

pub fn intersecting_triangles() -> Mesh {
    let vertices = vec![
        Point::new(-1.0, -1.0, 0.0),
        Point::new(1.0, -1.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, -1.0, -1.0),
        Point::new(0.0, 1.0, -1.0),
        Point::new(0.0, 0.0, 1.0),
        Point::new(-1.0, 0.0, 1.0),
        Point::new(1.0, 0.0, 1.0),
        Point::new(0.0, 0.0, -1.0),
    ];
    Mesh::new(vertices, vec![0, 1, 2, 5, 4, 3, 6, 7, 8]).unwrap()
}

/// Asserts that every point is inside of, or on, the closed convex mesh.
pub fn assert_contains_points(hull: &Mesh, points: &[Point<Real>], tolerance: Real) {
    let vertices = hull.vertices();

    for tri in hull.triangles() {
        let a = vertices[tri[0] as usize];
        let b = vertices[tri[1] as usize];
        let c = vertices[tri[2] as usize];
        let n = (b - a).cross(&(c - a));

        for pt in points {
            assert!(n.dot(&(pt - a)) <= tolerance * n.norm(), "{} is outside of the hull", pt);
        }
    }
}

/// The vertices of the mesh, sorted lexicographically.
pub fn sorted_vertices(mesh: &Mesh) -> Vec<Point<Real>> {
    let mut vertices = mesh.vertices().to_vec();
    vertices.sort_by(|a, b| {
        a.coords
            .iter()
            .zip(b.coords.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    vertices
}
