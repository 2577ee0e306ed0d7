//! Unit cube geometry shared by every cube-based table.
//!
//! Corners follow the usual marching cubes numbering:
//!
//! ```text
//!     7----6          Y
//!    /|   /|          |  Z
//!   3----2 |          | /
//!   | 4--|-5          *-- X
//!   |/   |/
//!   0----1
//!
//!  0 = (0, 0, 0)    4 = (0, 0, 1)
//!  1 = (1, 0, 0)    5 = (1, 0, 1)
//!  2 = (1, 1, 0)    6 = (1, 1, 1)
//!  3 = (0, 1, 0)    7 = (0, 1, 1)
//! ```
//!
//! Edges 0-3 run around the `z = 0` face, 4-7 around the `z = 1` face and 8-11 are
//! the four edges parallel to Z.

use crate::types::CubeConfiguration;

pub const NUM_CORNERS: usize = 8;
pub const NUM_EDGES: usize = 12;
pub const NUM_FACES: usize = 6;
pub const NUM_CUBE_CONFIGURATIONS: usize = 256;

/// Integer offset of each corner within the unit cube.
pub const CORNER_OFFSETS: [[usize; 3]; NUM_CORNERS] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// The two corners joined by each edge. The first corner is always the one nearer the origin.
pub const EDGE_CORNERS: [[usize; 2]; NUM_EDGES] = [
    [0, 1],
    [1, 2],
    [3, 2],
    [0, 3],
    [4, 5],
    [5, 6],
    [7, 6],
    [4, 7],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Axis (0 = X, 1 = Y, 2 = Z) each edge runs along.
pub const EDGE_AXES: [usize; NUM_EDGES] = [0, 1, 0, 1, 0, 1, 0, 1, 2, 2, 2, 2];

/// Corners of each face in cyclic order. Faces are ordered -X, +X, -Y, +Y, -Z, +Z.
pub const FACE_CORNERS: [[usize; 4]; NUM_FACES] = [
    [0, 3, 7, 4],
    [1, 2, 6, 5],
    [0, 1, 5, 4],
    [3, 2, 6, 7],
    [0, 1, 2, 3],
    [4, 5, 6, 7],
];

/// `FACE_EDGES[f][k]` joins `FACE_CORNERS[f][k]` and `FACE_CORNERS[f][(k + 1) % 4]`.
pub const FACE_EDGES: [[usize; 4]; NUM_FACES] = [
    [3, 11, 7, 8],
    [1, 10, 5, 9],
    [0, 9, 4, 8],
    [2, 10, 6, 11],
    [0, 1, 2, 3],
    [4, 5, 6, 7],
];

/// Bitmask of the two faces each edge lies on.
pub const EDGE_FACES: [u8; NUM_EDGES] = compute_edge_faces();

/// For each configuration, bit `e` is set when edge `e` is crossed.
pub const EDGE_TABLE: [u16; NUM_CUBE_CONFIGURATIONS] = compute_edge_table();

#[inline]
pub const fn corner_inside(config: CubeConfiguration, corner: usize) -> bool {
    (config >> corner) & 1 != 0
}

#[inline]
pub const fn edge_crossed(config: CubeConfiguration, edge: usize) -> bool {
    let [a, b] = EDGE_CORNERS[edge];
    corner_inside(config, a) != corner_inside(config, b)
}

const fn compute_edge_faces() -> [u8; NUM_EDGES] {
    let mut table = [0u8; NUM_EDGES];
    let mut face = 0;
    while face < NUM_FACES {
        let mut k = 0;
        while k < 4 {
            table[FACE_EDGES[face][k]] |= 1 << face;
            k += 1;
        }
        face += 1;
    }
    table
}

const fn compute_edge_table() -> [u16; NUM_CUBE_CONFIGURATIONS] {
    let mut table = [0u16; NUM_CUBE_CONFIGURATIONS];
    let mut config = 0;
    while config < NUM_CUBE_CONFIGURATIONS {
        let mut edge = 0;
        while edge < NUM_EDGES {
            if edge_crossed(config as CubeConfiguration, edge) {
                table[config] |= 1 << edge;
            }
            edge += 1;
        }
        config += 1;
    }
    table
}
