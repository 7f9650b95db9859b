use super::shapes::{assert_contains_points, cube, sorted_vertices, uv_sphere};
use colgen3d::math::{Point, Real};
use colgen3d::transformation::{check_convex_hull, try_convex_hull, ConvexHullError};
use colgen3d::{CollisionGen, CollisionGenSettings, CollisionTechnique, Mesh};

#[test]
fn simple_hull_of_a_cube_is_the_cube() {
    let mesh = cube(Point::new(1.0, 2.0, 3.0), 0.5);
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&mesh);

    let hull = collision_gen
        .generate_simple_hull(&CollisionGenSettings::default())
        .unwrap();

    assert_eq!(hull.num_vertices(), 8);
    assert_eq!(hull.num_triangles(), 12);
    assert_eq!(sorted_vertices(&hull), sorted_vertices(&mesh));
    assert_relative_eq!(hull.volume(), 1.0, epsilon = 1.0e-9);
    assert_eq!(hull.normals().len(), 8);
}

#[test]
fn simple_hull_envelops_every_input() {
    let left = uv_sphere(Point::new(-3.0, 0.0, 0.0), 1.0, 8, 12);
    let right = uv_sphere(Point::new(3.0, 0.0, 0.0), 1.0, 8, 12);
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&left);
    collision_gen.add_input_mesh(&right);

    let report = collision_gen.generate(
        CollisionTechnique::SimpleHull,
        &CollisionGenSettings::default(),
    );

    assert_eq!(report.hulls.len(), 1);
    assert_eq!(report.num_skipped(), 0);
    assert_eq!(report.num_hulls_of(0), 1);
    assert_eq!(report.num_hulls_of(1), 1);

    let hull = &report.hulls[0];
    assert_contains_points(hull, left.vertices(), 1.0e-9);
    assert_contains_points(hull, right.vertices(), 1.0e-9);
    check_convex_hull(hull.vertices(), &hull.triangle_indices()).unwrap();
}

#[test]
fn simple_hull_of_random_cloud() {
    let mut rng = oorandom::Rand64::new(42);
    let points: Vec<Point<Real>> = (0..500)
        .map(|_| Point::new(rng.rand_float(), rng.rand_float(), rng.rand_float()))
        .collect();

    let (vertices, triangles) = try_convex_hull(&points).unwrap();
    check_convex_hull(&vertices, &triangles).unwrap();

    let hull = Mesh::from_triangles(vertices, &triangles).unwrap();
    assert_contains_points(&hull, &points, 1.0e-9);
    assert!(hull.volume() > 0.0 && hull.volume() <= 1.0);
}

#[test]
fn simple_hull_rejects_degenerate_inputs() {
    let settings = CollisionGenSettings::default();
    let mut collision_gen = CollisionGen::new();
    assert_eq!(
        collision_gen.generate_simple_hull(&settings).err(),
        Some(ConvexHullError::IncompleteInput)
    );

    let flat = Mesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
    .unwrap();
    collision_gen.add_input_mesh(&flat);

    assert_eq!(
        collision_gen.generate_simple_hull(&settings).err(),
        Some(ConvexHullError::Degenerate { dimension: 2 })
    );

    let report = collision_gen.generate(CollisionTechnique::SimpleHull, &settings);
    assert!(report.hulls.is_empty());
    assert_eq!(report.num_skipped(), 1);
}

#[test]
fn simple_hull_is_padded_then_scaled() {
    let mesh = cube(Point::origin(), 1.0);
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&mesh);

    let settings = CollisionGenSettings {
        scale: 0.5,
        padding: 0.1,
        ..Default::default()
    };
    let hull = collision_gen.generate_simple_hull(&settings).unwrap();

    // Each corner is pushed by 0.1 times the sphere diameter along the diagonal.
    let diameter = mesh.bounding_sphere().diameter();
    let half = (1.0 + 0.1 * diameter / Real::sqrt(3.0)) * 0.5;
    assert_relative_eq!(hull.volume(), (2.0 * half).powi(3), epsilon = 1.0e-9);
}
