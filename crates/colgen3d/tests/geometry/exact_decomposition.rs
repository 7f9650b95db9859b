use super::shapes::{
    assert_contains_points, intersecting_triangles, l_shape, open_box, square_frame, uv_sphere,
};
use colgen3d::math::Point;
use colgen3d::repair::{repair_to_solid, RepairError, RepairParameters};
use colgen3d::transformation::{check_convex_hull, exact_convex_decomposition};
use colgen3d::{CollisionGen, CollisionGenSettings, CollisionTechnique, InputOutcome, SkipReason};

#[test]
fn open_box_decomposes_into_one_cell() {
    let mesh = open_box();
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&mesh);

    let report = collision_gen.generate(
        CollisionTechnique::ExactDecomposition,
        &CollisionGenSettings::default(),
    );

    assert_eq!(report.hulls.len(), 1);
    assert_eq!(
        report.outcomes,
        vec![InputOutcome::Generated {
            input: 0,
            num_hulls: 1
        }]
    );

    let hull = &report.hulls[0];
    assert_eq!(hull.num_vertices(), 8);
    assert_relative_eq!(hull.volume(), 1.0, epsilon = 1.0e-9);
}

#[test]
fn l_shape_cells_tile_the_solid() {
    let solid = repair_to_solid(&l_shape(), &RepairParameters::default()).unwrap();
    let cells = exact_convex_decomposition(&solid).unwrap();

    assert!(cells.len() >= 2);
    let total: f64 = cells.iter().map(|cell| cell.volume).sum();
    assert_relative_eq!(total, 3.0, epsilon = 1.0e-9);

    for cell in &cells {
        check_convex_hull(&cell.points, &cell.triangles).unwrap();
        assert!(cell
            .points
            .iter()
            .all(|pt| pt.x > -1.0e-9 && pt.y > -1.0e-9 && pt.z > -1.0e-9));
    }
}

#[test]
fn square_frame_cells_tile_the_solid() {
    let mesh = square_frame();
    assert_relative_eq!(mesh.volume(), 8.0, epsilon = 1.0e-12);

    let solid = repair_to_solid(&mesh, &RepairParameters::default()).unwrap();
    assert_relative_eq!(solid.volume(), 8.0, epsilon = 1.0e-9);

    assert!(!solid.contains_point(&Point::new(1.5, 1.5, 0.5)));

    let cells = exact_convex_decomposition(&solid).unwrap();
    assert!(cells.len() > 1);

    let total: f64 = cells.iter().map(|cell| cell.volume).sum();
    assert_relative_eq!(total, 8.0, epsilon = 1.0e-9);

    for cell in &cells {
        check_convex_hull(&cell.points, &cell.triangles).unwrap();
        assert_relative_eq!(cell.to_mesh().volume(), cell.volume, epsilon = 1.0e-9);
        assert!(cell
            .points
            .iter()
            .all(|pt| pt.iter().all(|x| *x > -1.0e-9 && *x < 3.0 + 1.0e-9)));
    }
}

#[test]
fn disjoint_spheres_give_one_hull_each() {
    let left = uv_sphere(Point::new(-3.0, 0.0, 0.0), 1.0, 8, 12);
    let right = uv_sphere(Point::new(3.0, 0.0, 0.0), 1.0, 8, 12);
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&left);
    collision_gen.add_input_mesh(&right);

    let report = collision_gen.generate_exact_decomposition(&CollisionGenSettings::default());

    assert_eq!(report.hulls.len(), 2);
    assert_eq!(report.num_hulls_of(0), 1);
    assert_eq!(report.num_hulls_of(1), 1);
    assert_contains_points(&report.hulls[0], left.vertices(), 1.0e-9);
    assert_contains_points(&report.hulls[1], right.vertices(), 1.0e-9);
    assert!(report.hulls[0].bounding_sphere().center().x < 0.0);
    assert!(report.hulls[1].bounding_sphere().center().x > 0.0);
}

#[test]
fn broken_input_does_not_abort_the_others() {
    let good = open_box();
    let bad = intersecting_triangles();
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&bad);
    collision_gen.add_input_mesh(&good);

    let report = collision_gen.generate_exact_decomposition(&CollisionGenSettings::default());

    assert_eq!(report.hulls.len(), 1);
    assert_eq!(report.num_skipped(), 1);
    assert_eq!(report.num_hulls_of(0), 0);
    assert_eq!(report.num_hulls_of(1), 1);

    let skipped: Vec<_> = report.skipped().collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].0, 0);
    assert!(matches!(skipped[0].1, SkipReason::Repair(_)));
}

#[test]
fn exact_decomposition_is_scaled() {
    let mesh = open_box();
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&mesh);

    let settings = CollisionGenSettings {
        scale: 2.0,
        ..Default::default()
    };
    let report = collision_gen.generate_exact_decomposition(&settings);

    assert_eq!(report.hulls.len(), 1);
    assert_relative_eq!(report.hulls[0].volume(), 8.0, epsilon = 1.0e-9);
}

#[test]
fn zero_volume_input_is_rejected() {
    let mesh = intersecting_triangles();
    assert!(matches!(
        repair_to_solid(&mesh, &RepairParameters::default()),
        Err(RepairError::ZeroVolume) | Err(RepairError::SelfIntersecting)
    ));
}
