use colgen3d::math::Point;
use colgen3d::{CollisionGen, CollisionGenSettings, CollisionTechnique, Mesh};

/*
 * An L-shaped prism, missing its top cap.
 */
fn open_l_shape() -> Mesh {
    let profile = [
        [0.0, 0.0],
        [2.0, 0.0],
        [2.0, 1.0],
        [1.0, 1.0],
        [1.0, 2.0],
        [0.0, 2.0],
    ];
    let mut vertices: Vec<_> = profile
        .iter()
        .map(|p| Point::new(p[0], p[1], 0.0))
        .collect();
    vertices.extend(profile.iter().map(|p| Point::new(p[0], p[1], 1.0)));

    let mut triangles = vec![[3, 2, 1], [3, 1, 0], [3, 0, 5], [3, 5, 4]];
    for i in 0..6 {
        let j = (i + 1) % 6;
        triangles.push([i, j, j + 6]);
        triangles.push([i, j + 6, i + 6]);
    }

    Mesh::from_triangles(vertices, &triangles).unwrap()
}

fn main() {
    let mesh = open_l_shape();
    let mut collision_gen = CollisionGen::new();
    collision_gen.add_input_mesh(&mesh);

    let settings = CollisionGenSettings {
        resolution: 20_000,
        concavity: 0.01,
        max_hulls: 8,
        ..Default::default()
    };

    for technique in [
        CollisionTechnique::SimpleHull,
        CollisionTechnique::ExactDecomposition,
        CollisionTechnique::ApproximateDecomposition,
    ] {
        let report = collision_gen.generate(technique, &settings);
        println!("{:?}: {} hull(s)", technique, report.hulls.len());

        for (i, hull) in report.hulls.iter().enumerate() {
            println!(
                "  hull {}: {} vertices, {} triangles, volume {:.4}",
                i,
                hull.num_vertices(),
                hull.num_triangles(),
                hull.volume()
            );
        }

        for (input, reason) in report.skipped() {
            println!("  input {} skipped: {}", input, reason);
        }
    }
}
