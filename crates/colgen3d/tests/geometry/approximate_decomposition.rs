use super::shapes::{intersecting_triangles, l_shape, open_box, uv_sphere};
use colgen3d::math::Point;
use colgen3d::transformation::check_convex_hull;
use colgen3d::{
    CollisionGen, CollisionGenSettings, CollisionTechnique, DecompositionMode, SkipReason,
};

fn settings() -> CollisionGenSettings {
    CollisionGenSettings {
        resolution: 10_000,
        concavity: 0.01,
        max_hulls: 8,
        max_hull_vertices: 16,
        ..Default::default()
    }
}

#[test]
fn l_shape_respects_the_budgets() {
    let mesh = l_shape();
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&mesh);

    for mode in [DecompositionMode::Voxel, DecompositionMode::Tetrahedron] {
        let settings = CollisionGenSettings {
            mode,
            ..settings()
        };
        let report = collision_gen.generate(CollisionTechnique::ApproximateDecomposition, &settings);

        assert_eq!(report.num_skipped(), 0);
        assert!(!report.hulls.is_empty() && report.hulls.len() <= 8);
        assert_eq!(report.num_hulls_of(0), report.hulls.len());

        for hull in &report.hulls {
            assert!(hull.num_vertices() >= 4 && hull.num_vertices() <= 16);
            check_convex_hull(hull.vertices(), &hull.triangle_indices()).unwrap();
            assert!(hull.volume() > 0.0);
            assert!(hull
                .vertices()
                .iter()
                .all(|pt| pt.x > -0.5 && pt.x < 2.5 && pt.y > -0.5 && pt.y < 2.5));
        }
    }
}

#[test]
fn single_hull_budget() {
    let mesh = l_shape();
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&mesh);

    let settings = CollisionGenSettings {
        max_hulls: 1,
        max_hull_vertices: 8,
        ..settings()
    };
    let report = collision_gen.generate_approximate_decomposition(&settings);

    assert_eq!(report.hulls.len(), 1);
    assert!(report.hulls[0].num_vertices() <= 8);
}

#[test]
fn broken_input_is_skipped() {
    let bad = intersecting_triangles();
    let good = open_box();
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&good);
    collision_gen.add_input_mesh(&bad);

    let report = collision_gen.generate_approximate_decomposition(&settings());

    assert_eq!(report.num_skipped(), 1);
    assert!(report.num_hulls_of(0) >= 1);
    assert_eq!(report.num_hulls_of(1), 0);
    assert_eq!(report.hulls.len(), report.num_hulls_of(0));

    let (input, reason) = report.skipped().next().unwrap();
    assert_eq!(input, 1);
    assert!(matches!(reason, SkipReason::Repair(_)));
}

#[test]
fn disjoint_spheres_are_decomposed_separately() {
    let left = uv_sphere(Point::new(-3.0, 0.0, 0.0), 1.0, 8, 12);
    let right = uv_sphere(Point::new(3.0, 0.0, 0.0), 1.0, 8, 12);
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&left);
    collision_gen.add_input_mesh(&right);

    let report = collision_gen.generate_approximate_decomposition(&settings());
    assert_eq!(report.num_skipped(), 0);

    let num_left = report.num_hulls_of(0);
    assert!(num_left >= 1);
    assert!(report.num_hulls_of(1) >= 1);

    let (left_hulls, right_hulls) = report.hulls.split_at(num_left);
    assert!(left_hulls
        .iter()
        .all(|hull| hull.vertices().iter().all(|pt| pt.x < 0.0)));
    assert!(right_hulls
        .iter()
        .all(|hull| hull.vertices().iter().all(|pt| pt.x > 0.0)));
}
