use super::shapes::{cube, intersecting_triangles, l_shape, open_box};
use colgen3d::math::Point;
use colgen3d::repair::{repair_mesh, repair_to_solid, RepairParameters};
use colgen3d::transformation::check_convex_hull;

#[test]
fn repaired_open_box_is_closed() {
    let mesh = open_box();
    let repaired = repair_mesh(&mesh, &RepairParameters::default()).unwrap();

    assert_eq!(repaired.num_vertices(), 8);
    assert_eq!(repaired.num_triangles(), 12);
    assert_relative_eq!(repaired.volume(), 1.0, epsilon = 1.0e-12);
    assert_eq!(repaired.normals().len(), 8);
    check_convex_hull(repaired.vertices(), &repaired.triangle_indices()).unwrap();

    // The input is left untouched.
    assert_eq!(mesh.num_triangles(), 10);
}

#[test]
fn repair_is_idempotent() {
    let params = RepairParameters::default();
    let once = repair_mesh(&l_shape(), &params).unwrap();
    let twice = repair_mesh(&once, &params).unwrap();

    assert_relative_eq!(once.volume(), 3.0, epsilon = 1.0e-12);
    assert_relative_eq!(twice.volume(), once.volume(), epsilon = 1.0e-12);
    assert_eq!(twice.num_vertices(), once.num_vertices());
}

#[test]
fn repaired_solid_classifies_points() {
    let solid = repair_to_solid(&l_shape(), &RepairParameters::default()).unwrap();

    assert!(solid.contains_point(&Point::new(0.5, 0.5, 0.5)));
    assert!(solid.contains_point(&Point::new(1.5, 0.5, 0.5)));
    assert!(!solid.contains_point(&Point::new(1.5, 1.5, 0.5)));
    assert!(!solid.contains_point(&Point::new(0.5, 0.5, 1.5)));
}

#[test]
fn inverted_cube_is_reoriented() {
    let mesh = cube(Point::origin(), 1.0);
    let flipped: Vec<_> = mesh
        .triangles()
        .map(|[a, b, c]| [a, c, b])
        .collect();
    let flipped = colgen3d::Mesh::from_triangles(mesh.vertices().to_vec(), &flipped).unwrap();
    assert!(flipped.volume() < 0.0);

    let repaired = repair_mesh(&flipped, &RepairParameters::default()).unwrap();
    assert_relative_eq!(repaired.volume(), 8.0, epsilon = 1.0e-12);
}

#[test]
fn intersecting_triangles_are_rejected() {
    let mesh = intersecting_triangles();
    assert!(repair_mesh(&mesh, &RepairParameters::default()).is_err());
    assert!(repair_to_solid(&mesh, &RepairParameters::default()).is_err());
}
