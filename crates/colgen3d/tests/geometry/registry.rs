use super::shapes::cube;
use colgen3d::math::Point;
use colgen3d::{CollisionGen, CollisionGenSettings};

#[test]
fn empty_registry_has_no_points() {
    let collision_gen = CollisionGen::new();
    assert!(collision_gen.input_points(0.0).is_empty());
    assert!(collision_gen.input_points(0.5).is_empty());
}

#[test]
fn points_follow_registration_order() {
    let first = cube(Point::origin(), 1.0);
    let second = cube(Point::new(10.0, 0.0, 0.0), 1.0);
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&first);
    collision_gen.add_input_mesh(&second);

    let points = collision_gen.input_points(0.0);
    assert_eq!(points.len(), 16);
    assert_eq!(&points[..8], first.vertices());
    assert_eq!(&points[8..], second.vertices());

    collision_gen.clear_input_meshes();
    assert!(collision_gen.input_meshes().is_empty());
    assert!(collision_gen.input_points(0.0).is_empty());
}

#[test]
fn padding_pushes_points_away_from_the_center() {
    let mesh = cube(Point::new(10.0, 0.0, 0.0), 1.0);
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&mesh);

    let sphere = *mesh.bounding_sphere();
    let padding = 0.25;

    for (padded, original) in collision_gen
        .input_points(padding)
        .iter()
        .zip(mesh.vertices())
    {
        let before = (original - sphere.center()).norm();
        let after = (padded - sphere.center()).norm();
        assert_relative_eq!(
            after - before,
            padding * sphere.diameter(),
            epsilon = 1.0e-12
        );
    }

    // Registering the same mesh twice duplicates its points.
    collision_gen.add_input_mesh(&mesh);
    assert_eq!(collision_gen.input_points(padding).len(), 16);

    let hull = collision_gen
        .generate_simple_hull(&CollisionGenSettings::default())
        .unwrap();
    assert_eq!(hull.num_vertices(), 8);
    assert_relative_eq!(hull.volume(), 8.0, epsilon = 1.0e-9);
}
