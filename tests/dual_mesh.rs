use std::collections::HashMap;

use approx::assert_relative_eq;
use dual_contours::{
    Algorithm, CubeConfigField, Grid3, Mesh, extract_dual_mesh, extract_isosurface,
    algorithms::nielson_dual,
    tables::nielson_dual::{MIDPOINT_VERTEX_TABLE, VERTEX_TABLE},
    types::{Point, Value, Vector},
};

const RADIUS: Value = 0.6;

fn sphere(p: Point) -> Value {
    p.coords.norm() - RADIUS
}

fn unit_grid(resolution: usize) -> Grid3 {
    Grid3::new(
        [resolution; 3],
        Point::new(-1., -1., -1.),
        Point::new(1., 1., 1.),
    )
    .unwrap()
}

/// Every directed edge appears once and its reverse once.
fn assert_closed_and_oriented(mesh: &Mesh) {
    let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
    for face in mesh.faces() {
        for (i, &a) in face.iter().enumerate() {
            let b = face[(i + 1) % face.len()];
            *directed.entry((a, b)).or_default() += 1;
        }
    }
    for (&(a, b), &count) in &directed {
        assert_eq!(count, 1, "edge {a}->{b} used {count} times");
        assert_eq!(directed.get(&(b, a)), Some(&1), "edge {a}->{b} has no twin");
    }
}

#[test]
fn uniform_fields_are_empty() {
    for resolution in [2, 3, 7] {
        for value in [-1.0 as Value, 1.0] {
            let field = move |_: Point| value;
            for algorithm in Algorithm::ALL {
                let mesh = extract_isosurface(&field, algorithm, &unit_grid(resolution));
                assert!(mesh.is_empty(), "value {value} resolution {resolution}");
            }
        }
    }
}

#[test]
fn single_inside_corner_on_the_boundary_makes_no_faces() {
    let grid = Grid3::new([3, 3, 3], Point::new(0., 0., 0.), Point::new(2., 2., 2.)).unwrap();
    let field = |p: Point| p.coords.norm() - 0.5;
    let mesh = extract_dual_mesh(&field, Algorithm::NielsonDual, &grid);

    assert_eq!(mesh.num_vertices(), 1);
    assert_eq!(mesh.num_faces(), 0);
    assert_relative_eq!(mesh.vertex(0).pos, Point::new(1. / 6., 1. / 6., 1. / 6.));
}

#[test]
fn each_cube_configuration_reproduces_its_table_entry() {
    let grid = unit_grid(2);
    for config in 0..=255u8 {
        let mesh = extract_dual_mesh(&CubeConfigField::new(config), Algorithm::NielsonDual, &grid);
        let cooked = &MIDPOINT_VERTEX_TABLE[config as usize];
        assert_eq!(mesh.num_vertices(), VERTEX_TABLE[config as usize].len());
        assert_eq!(mesh.num_faces(), 0);
        for (vertex, offset) in mesh.vertices().iter().zip(cooked.offsets()) {
            let expected = Point::new(-1., -1., -1.) + Vector::from(*offset) * 2.;
            assert_relative_eq!(vertex.pos, expected, epsilon = 1e-6);
        }
    }
}

#[test]
fn sphere_is_a_closed_quad_mesh() {
    let grid = unit_grid(12);
    for algorithm in Algorithm::ALL {
        let mesh = extract_isosurface(&sphere, algorithm, &grid);
        assert!(mesh.num_faces() > 0);
        assert_eq!(mesh.num_indices(), 4 * mesh.num_faces());
        for face in mesh.faces() {
            assert!(face.iter().all(|&v| (v as usize) < mesh.num_vertices()));
        }
        assert_closed_and_oriented(&mesh);
    }
}

#[test]
fn sphere_normals_point_inward() {
    let mesh = extract_dual_mesh(&sphere, Algorithm::NielsonDual, &unit_grid(12));
    for (index, face) in mesh.faces().enumerate() {
        let centroid = face
            .iter()
            .fold(Vector::zeros(), |sum, &v| sum + mesh.vertex(v).pos.coords)
            / face.len() as Value;
        assert!(mesh.face_normal(index as u32).dot(&centroid) < 0.);
    }
}

#[test]
fn interpolated_vertices_hug_the_surface() {
    let grid = unit_grid(16);
    let tolerance = grid.cell_size().x;
    let mesh = extract_dual_mesh(&sphere, Algorithm::NielsonDualInterpolated, &grid);
    let midpoint = extract_dual_mesh(&sphere, Algorithm::NielsonDual, &grid);

    assert_eq!(mesh.num_vertices(), midpoint.num_vertices());
    assert_eq!(mesh.triangulate(), midpoint.triangulate());
    for vertex in mesh.vertices() {
        assert!((vertex.pos.coords.norm() - RADIUS).abs() < tolerance);
    }
}

#[test]
fn extraction_is_deterministic() {
    let grid = unit_grid(9).with_threshold(0.05);
    let first = extract_dual_mesh(&sphere, Algorithm::NielsonDual, &grid);
    let second = extract_dual_mesh(&sphere, Algorithm::NielsonDual, &grid);

    assert_eq!(first.positions(), second.positions());
    assert_eq!(
        first.faces().collect::<Vec<_>>(),
        second.faces().collect::<Vec<_>>()
    );
}

#[test]
fn appending_offsets_new_indices() {
    let grid = unit_grid(8);
    let fresh = extract_dual_mesh(&sphere, Algorithm::NielsonDual, &grid);

    let mut mesh = Mesh::new();
    mesh.add_vertex(Point::new(5., 5., 5.));
    nielson_dual(&sphere, Algorithm::NielsonDual, &grid, &mut mesh);

    assert_eq!(mesh.num_vertices(), fresh.num_vertices() + 1);
    for (appended, original) in mesh.faces().zip(fresh.faces()) {
        let shifted: Vec<u32> = original.iter().map(|v| v + 1).collect();
        assert_eq!(appended, shifted.as_slice());
    }
}

#[test]
fn interpolated_vertices_ignore_field_magnitude() {
    let grid = unit_grid(10);
    let reference = extract_dual_mesh(&sphere, Algorithm::NielsonDualInterpolated, &grid);
    let faint = |p: Point| sphere(p) * 1e-8;
    let mesh = extract_dual_mesh(&faint, Algorithm::NielsonDualInterpolated, &grid);

    assert_eq!(mesh.num_vertices(), reference.num_vertices());
    for (vertex, expected) in mesh.vertices().iter().zip(reference.vertices()) {
        assert_relative_eq!(vertex.pos, expected.pos, epsilon = 1e-5);
    }
}
