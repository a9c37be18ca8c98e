//! Four-vertex reference scene with the default (waves) parameters.

use clothwave::field::HeightField;
use clothwave::params::HeightFieldParams;
use clothwave::surface::{AmplitudeMap, ClothMesh, SurfaceSystem};
use glam::DVec2;

const REST: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

const EXPECTED: [f64; 4] = [
    0.050_611_983_654_909_293,
    -0.373_303_024_047_555_94,
    -0.094_596_305_888_393_906,
    -0.400_334_742_625_010_68,
];

fn reference_surface() -> SurfaceSystem {
    let mesh = ClothMesh::from_rest_positions(2, 2, &REST).unwrap();
    let amplitude = AmplitudeMap::from_values(vec![1.0; 4]);
    let field = HeightField::new(HeightFieldParams::default()).unwrap();
    SurfaceSystem::from_parts(mesh, amplitude, field).unwrap()
}

#[test]
fn reference_heights_at_time_zero() {
    let field = HeightField::new(HeightFieldParams::default()).unwrap();
    for (rest, expected) in REST.iter().zip(EXPECTED) {
        let p = DVec2::new(rest[0] as f64, rest[1] as f64);
        let h = field.sample(p, 0.0, 1.0);
        assert!(
            (h - expected).abs() < 1e-9,
            "height at {rest:?} = {h}, expected {expected}"
        );
    }
}

#[test]
fn reference_heights_later_in_time() {
    let field = HeightField::new(HeightFieldParams::default()).unwrap();
    let h = field.sample(DVec2::new(0.25, -3.5), 2.0, 1.0);
    assert!((h - 0.473_096_729_252_385_88).abs() < 1e-9, "{h}");
    let h = field.sample(DVec2::new(7.3, 4.1), 12.5, 1.0);
    assert!((h - 0.319_757_629_940_703_56).abs() < 1e-9, "{h}");
}

#[test]
fn reference_surface_update_writes_heights() {
    let mut surface = reference_surface();
    surface.update(0.0);

    for (vertex, expected) in surface.mesh.vertices.iter().zip(EXPECTED) {
        assert!((vertex.position[2] as f64 - expected).abs() < 1e-6);
    }

    // Repeated frames at the same time are identical
    let first = surface.heights().to_vec();
    surface.update(0.0);
    assert_eq!(surface.heights(), first.as_slice());
}
