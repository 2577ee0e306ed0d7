//! Nielson's MC-Dual isosurface extraction.
//!
//! ```text
//! Pass 1, per cube:
//! 1. 8 corner samples            →  cube configuration
//! 2. VERTEX_TABLE[config]        →  0-4 dual vertices
//! 3. cooked / interpolated offset →  vertex positions, appended to the mesh
//!
//! Pass 2, per interior lattice edge:
//! 4. the 4 cubes around the edge →  VERTEX_INDEX_LOOKUP_TABLE slot in each
//! 5. 4 slots                     →  one quad
//! ```
//!
//! Faces are only generated once every vertex exists, and the two passes never
//! read the field again: both work from one sampling of the lattice.

use ndarray::Array3;

use super::Algorithm;
use crate::{
    field::ScalarField,
    grid::Grid3,
    mesh::Mesh,
    tables::{
        cube::EDGE_TABLE,
        nielson_dual::{MIDPOINT_VERTEX_TABLE, VERTEX_TABLE, vertex_index},
    },
    types::{CubeConfiguration, Point, Value, Vector},
    utils::{cube_configuration, get_corner_positions, get_edge_crossings},
};

/// For a lattice edge along each axis, the four cubes sharing it and the edge's local
/// index in each. Cubes are given as the amount to subtract from the edge's start
/// point, listed counter-clockwise around the axis.
const EDGE_NEIGHBOURS: [[([usize; 3], usize); 4]; 3] = [
    [([0, 1, 1], 6), ([0, 0, 1], 4), ([0, 0, 0], 0), ([0, 1, 0], 2)],
    [([1, 0, 1], 5), ([1, 0, 0], 1), ([0, 0, 0], 3), ([0, 0, 1], 7)],
    [([1, 1, 0], 10), ([0, 1, 0], 11), ([0, 0, 0], 8), ([1, 0, 0], 9)],
];

/// Extracts the isosurface of `field` over `grid` into a new [`Mesh`] of quads.
pub fn extract_dual_mesh<F: ScalarField + ?Sized>(
    field: &F,
    algorithm: Algorithm,
    grid: &Grid3,
) -> Mesh {
    let mut mesh = Mesh::new();
    nielson_dual(field, algorithm, grid, &mut mesh);
    mesh
}

/// Like [`extract_dual_mesh`], appending to an existing mesh.
pub fn nielson_dual<F: ScalarField + ?Sized>(
    field: &F,
    algorithm: Algorithm,
    grid: &Grid3,
    mesh: &mut Mesh,
) {
    let samples = grid.sample(field);
    nielson_dual_from_samples(&samples, algorithm, grid, mesh);
}

/// Runs MC-Dual over values already sampled at every lattice point of `grid`,
/// indexed `[[x, y, z]]` as produced by [`Grid3::sample`].
///
/// # Panics
/// Panics if the shape of `samples` does not match the grid resolution.
pub fn nielson_dual_from_samples(
    samples: &Array3<Value>,
    algorithm: Algorithm,
    grid: &Grid3,
    mesh: &mut Mesh,
) {
    let [rx, ry, rz] = grid.resolution();
    assert_eq!(samples.dim(), (rx, ry, rz), "samples do not match grid resolution");
    let _span = tracing::debug_span!("nielson_dual", ?algorithm, resolution = ?grid.resolution())
        .entered();

    let first_face = mesh.num_faces();
    let first_vertex = mesh.num_vertices();
    let cubes = generate_vertices(samples, algorithm, grid, mesh);
    generate_faces(samples, grid, &cubes, mesh);

    tracing::debug!(
        vertices = mesh.num_vertices() - first_vertex,
        faces = mesh.num_faces() - first_face,
        "dual mesh extracted"
    );
}

/// Per-cube results of the vertex pass.
struct CubeVertices {
    configs: Array3<CubeConfiguration>,
    /// Mesh index of each cube's vertex in slot 0; the others follow consecutively.
    first_vertex: Array3<u32>,
}

fn generate_vertices(
    samples: &Array3<Value>,
    algorithm: Algorithm,
    grid: &Grid3,
    mesh: &mut Mesh,
) -> CubeVertices {
    let [nx, ny, nz] = grid.num_cells();
    let cell_size = grid.cell_size();
    let threshold = grid.threshold();
    let mut cubes = CubeVertices {
        configs: Array3::zeros((nx, ny, nz)),
        first_vertex: Array3::zeros((nx, ny, nz)),
    };

    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                let corner_values = grid
                    .cube_corner_indices(x, y, z)
                    .map(|[cx, cy, cz]| samples[[cx, cy, cz]]);
                let config = cube_configuration(&corner_values, threshold);
                cubes.configs[[x, y, z]] = config;
                cubes.first_vertex[[x, y, z]] = mesh.num_vertices() as u32;

                if EDGE_TABLE[config as usize] == 0 {
                    continue;
                }

                let origin = grid.point(x, y, z);
                match algorithm {
                    Algorithm::NielsonDual => {
                        for offset in MIDPOINT_VERTEX_TABLE[config as usize].offsets() {
                            let offset = Vector::from(*offset).component_mul(&cell_size);
                            mesh.add_vertex(origin + offset);
                        }
                    }
                    Algorithm::NielsonDualInterpolated => {
                        let positions = get_corner_positions(origin, cell_size);
                        let crossings =
                            get_edge_crossings(config, &positions, &corner_values, threshold);
                        for vertex in VERTEX_TABLE[config as usize].vertices() {
                            let sum = vertex
                                .edges()
                                .filter_map(|edge| crossings[edge])
                                .fold(Vector::zeros(), |sum, p| sum + p.coords);
                            mesh.add_vertex(Point::from(sum / vertex.num_edges() as Value));
                        }
                    }
                }
            }
        }
    }

    cubes
}

fn generate_faces(samples: &Array3<Value>, grid: &Grid3, cubes: &CubeVertices, mesh: &mut Mesh) {
    let resolution = grid.resolution();
    let threshold = grid.threshold();

    for z in 0..resolution[2] {
        for y in 0..resolution[1] {
            for x in 0..resolution[0] {
                let start = [x, y, z];
                for axis in 0..3 {
                    if !is_interior_edge(start, axis, resolution) {
                        continue;
                    }
                    let mut end = start;
                    end[axis] += 1;
                    let start_inside = samples[start] <= threshold;
                    if start_inside == (samples[end] <= threshold) {
                        continue;
                    }
                    let Some(mut quad) = quad_around(start, axis, cubes) else {
                        continue;
                    };
                    // normals point from the outside end of the edge to the inside end
                    if start_inside {
                        quad.reverse();
                    }
                    mesh.add_face(&quad);
                }
            }
        }
    }
}

/// An edge is interior when it does not lie on the boundary of the lattice, so four
/// cubes surround it.
#[inline]
fn is_interior_edge(start: [usize; 3], axis: usize, resolution: [usize; 3]) -> bool {
    (0..3).all(|i| {
        if i == axis {
            start[i] + 1 < resolution[i]
        } else {
            start[i] >= 1 && start[i] + 1 < resolution[i]
        }
    })
}

/// Mesh indices of the dual vertices owning the edge in each of its four cubes, or
/// `None` if any cube has no vertex on it.
fn quad_around(start: [usize; 3], axis: usize, cubes: &CubeVertices) -> Option<[u32; 4]> {
    let mut quad = [0; 4];
    for (corner, (minus, edge)) in quad.iter_mut().zip(EDGE_NEIGHBOURS[axis]) {
        let cube = [start[0] - minus[0], start[1] - minus[1], start[2] - minus[2]];
        let slot = vertex_index(edge, cubes.configs[cube])?;
        *corner = cubes.first_vertex[cube] + slot as u32;
    }
    Some(quad)
}
