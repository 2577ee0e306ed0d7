//! Case tables for Nielson's MC-Dual algorithm.
//!
//! MC-Dual places one vertex per surface patch inside a cube rather than one per
//! crossed edge. A patch is a connected set of crossed edges: two crossed edges are
//! connected when the iso-contour on a cube face runs between them. A cube holds at
//! most four patches.
//!
//! All tables are derived at compile time from the corner/edge/face layout in
//! [`cube`](super::cube), so they can never drift out of sync with each other.
//!
//! # Ambiguous faces
//!
//! A face whose four edges are all crossed (two diagonal inside corners, two
//! diagonal outside corners) admits two contours. These tables always cut each
//! inside corner off on its own, so the outside corners connect across the face.
//! The decision depends only on the four corners of the face, so the two cubes
//! sharing a face always agree on it.

use super::cube::{
    CORNER_OFFSETS, EDGE_CORNERS, EDGE_FACES, EDGE_TABLE, FACE_CORNERS, FACE_EDGES,
    NUM_CUBE_CONFIGURATIONS, NUM_EDGES, NUM_FACES, corner_inside, edge_crossed,
};
use crate::types::{CubeConfiguration, Value};

/// Upper bound on the number of dual vertices in one cube.
pub const MAX_DUAL_VERTICES: usize = 4;

/// Number of edge slots addressed by [`VERTEX_INDEX_LOOKUP_TABLE`]. Edges 12..16 are never used.
pub const LOOKUP_EDGE_SLOTS: usize = 16;

/// Sentinel stored in [`VERTEX_INDEX_LOOKUP_TABLE`] for an edge with no vertex.
pub const NO_VERTEX: i32 = -1;

/// One patch of the surface inside a cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DualVertex {
    /// Bit `e` is set when crossed edge `e` belongs to this patch.
    pub edges: u16,
    /// Bit `f` is set when the patch continues through cube face `f` into the
    /// sibling vertex of the neighbouring cube (faces ordered -X, +X, -Y, +Y, -Z, +Z).
    pub faces: u8,
}

impl DualVertex {
    const EMPTY: Self = Self { edges: 0, faces: 0 };

    #[inline]
    pub const fn has_edge(self, edge: usize) -> bool {
        self.edges & (1 << edge) != 0
    }

    #[inline]
    pub const fn num_edges(self) -> u32 {
        self.edges.count_ones()
    }

    /// Indices of this patch's edges in ascending order.
    pub fn edges(self) -> impl Iterator<Item = usize> {
        (0..NUM_EDGES).filter(move |&edge| self.has_edge(edge))
    }
}

/// The dual vertices of one cube configuration, ordered by their lowest edge index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DualVertexList {
    num_vertices: u8,
    vertices: [DualVertex; MAX_DUAL_VERTICES],
}

impl DualVertexList {
    const EMPTY: Self = Self {
        num_vertices: 0,
        vertices: [DualVertex::EMPTY; MAX_DUAL_VERTICES],
    };

    #[inline]
    pub const fn len(&self) -> usize {
        self.num_vertices as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.num_vertices == 0
    }

    #[inline]
    pub fn vertices(&self) -> &[DualVertex] {
        &self.vertices[..self.len()]
    }
}

/// [`DualVertexList`] with each vertex resolved to an offset inside the unit cube.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CookedVertexList {
    num_vertices: u8,
    offsets: [[Value; 3]; MAX_DUAL_VERTICES],
}

impl CookedVertexList {
    #[inline]
    pub const fn len(&self) -> usize {
        self.num_vertices as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.num_vertices == 0
    }

    #[inline]
    pub fn offsets(&self) -> &[[Value; 3]] {
        &self.offsets[..self.len()]
    }
}

const VERTEX_TABLE_DATA: [DualVertexList; NUM_CUBE_CONFIGURATIONS] = build_vertex_table();

/// Dual vertices for every cube configuration.
pub static VERTEX_TABLE: [DualVertexList; NUM_CUBE_CONFIGURATIONS] = VERTEX_TABLE_DATA;

/// [`VERTEX_TABLE`] with every edge intersection taken at the edge midpoint, the
/// placement Nielson uses in the MC-Dual paper.
pub static MIDPOINT_VERTEX_TABLE: [CookedVertexList; NUM_CUBE_CONFIGURATIONS] =
    build_midpoint_table(&VERTEX_TABLE_DATA);

/// Slot (0-3) of the dual vertex owning an edge, or [`NO_VERTEX`].
///
/// Indexed by edge in the high byte and configuration in the low byte:
/// `edge * 256 + config`, 16 * 256 = 4096 entries.
pub static VERTEX_INDEX_LOOKUP_TABLE: [i32; LOOKUP_EDGE_SLOTS * NUM_CUBE_CONFIGURATIONS] =
    build_vertex_index_lookup_table(&VERTEX_TABLE_DATA);

/// Slot of the dual vertex that owns `edge` under `config`, if the edge is crossed.
#[inline]
pub fn vertex_index(edge: usize, config: CubeConfiguration) -> Option<usize> {
    debug_assert!(edge < NUM_EDGES, "edge {edge} out of range");
    let slot = VERTEX_INDEX_LOOKUP_TABLE[(edge << 8) | config as usize];
    (slot != NO_VERTEX).then_some(slot as usize)
}

/// Contour segments on every face of the cube, each as a two-edge bitmask.
///
/// Every crossed edge lies on two faces and appears in one segment per face, so
/// there are exactly as many segments as crossed edges.
const fn face_segments(config: CubeConfiguration) -> ([u16; NUM_EDGES], usize) {
    let mut segments = [0u16; NUM_EDGES];
    let mut count = 0;
    let mut face = 0;
    while face < NUM_FACES {
        let corners = FACE_CORNERS[face];
        let edges = FACE_EDGES[face];
        let mut crossed = 0u16;
        let mut num_crossed = 0;
        let mut k = 0;
        while k < 4 {
            if edge_crossed(config, edges[k]) {
                crossed |= 1 << edges[k];
                num_crossed += 1;
            }
            k += 1;
        }
        if num_crossed == 2 {
            segments[count] = crossed;
            count += 1;
        } else if num_crossed == 4 {
            // cut each inside corner off between its two face edges
            let mut k = 0;
            while k < 4 {
                if corner_inside(config, corners[k]) {
                    segments[count] = (1 << edges[(k + 3) % 4]) | (1 << edges[k]);
                    count += 1;
                }
                k += 1;
            }
        }
        face += 1;
    }
    (segments, count)
}

const fn faces_of(edges: u16) -> u8 {
    let mut faces = 0;
    let mut edge = 0;
    while edge < NUM_EDGES {
        if edges & (1 << edge) != 0 {
            faces |= EDGE_FACES[edge];
        }
        edge += 1;
    }
    faces
}

const fn build_vertex_list(config: CubeConfiguration) -> DualVertexList {
    let (segments, num_segments) = face_segments(config);
    let mut list = DualVertexList::EMPTY;
    let mut remaining = EDGE_TABLE[config as usize];
    while remaining != 0 {
        // grow a patch from the lowest unassigned edge
        let mut patch = 1u16 << remaining.trailing_zeros();
        loop {
            let mut grown = patch;
            let mut s = 0;
            while s < num_segments {
                if segments[s] & grown != 0 {
                    grown |= segments[s];
                }
                s += 1;
            }
            if grown == patch {
                break;
            }
            patch = grown;
        }
        assert!(
            (list.num_vertices as usize) < MAX_DUAL_VERTICES,
            "more than four dual vertices in one cube"
        );
        list.vertices[list.num_vertices as usize] = DualVertex {
            edges: patch,
            faces: faces_of(patch),
        };
        list.num_vertices += 1;
        remaining &= !patch;
    }
    list
}

const fn build_vertex_table() -> [DualVertexList; NUM_CUBE_CONFIGURATIONS] {
    let mut table = [DualVertexList::EMPTY; NUM_CUBE_CONFIGURATIONS];
    let mut config = 0;
    while config < NUM_CUBE_CONFIGURATIONS {
        table[config] = build_vertex_list(config as CubeConfiguration);
        config += 1;
    }
    table
}

const fn cook_midpoints(list: &DualVertexList) -> CookedVertexList {
    let mut cooked = CookedVertexList {
        num_vertices: list.num_vertices,
        offsets: [[0.0; 3]; MAX_DUAL_VERTICES],
    };
    let mut v = 0;
    while v < list.num_vertices as usize {
        let vertex = list.vertices[v];
        let mut sum = [0.0 as Value; 3];
        let mut edge = 0;
        while edge < NUM_EDGES {
            if vertex.has_edge(edge) {
                let [a, b] = EDGE_CORNERS[edge];
                let mut i = 0;
                while i < 3 {
                    sum[i] += (CORNER_OFFSETS[a][i] + CORNER_OFFSETS[b][i]) as Value * 0.5;
                    i += 1;
                }
            }
            edge += 1;
        }
        let n = vertex.num_edges() as Value;
        let mut i = 0;
        while i < 3 {
            cooked.offsets[v][i] = sum[i] / n;
            i += 1;
        }
        v += 1;
    }
    cooked
}

const fn build_midpoint_table(
    table: &[DualVertexList; NUM_CUBE_CONFIGURATIONS],
) -> [CookedVertexList; NUM_CUBE_CONFIGURATIONS] {
    let mut cooked = [CookedVertexList {
        num_vertices: 0,
        offsets: [[0.0; 3]; MAX_DUAL_VERTICES],
    }; NUM_CUBE_CONFIGURATIONS];
    let mut config = 0;
    while config < NUM_CUBE_CONFIGURATIONS {
        cooked[config] = cook_midpoints(&table[config]);
        config += 1;
    }
    cooked
}

const fn build_vertex_index_lookup_table(
    table: &[DualVertexList; NUM_CUBE_CONFIGURATIONS],
) -> [i32; LOOKUP_EDGE_SLOTS * NUM_CUBE_CONFIGURATIONS] {
    let mut lookup = [NO_VERTEX; LOOKUP_EDGE_SLOTS * NUM_CUBE_CONFIGURATIONS];
    let mut config = 0;
    while config < NUM_CUBE_CONFIGURATIONS {
        let list = &table[config];
        let mut v = 0;
        while v < list.num_vertices as usize {
            let mut edge = 0;
            while edge < NUM_EDGES {
                if list.vertices[v].has_edge(edge) {
                    lookup[edge * NUM_CUBE_CONFIGURATIONS + config] = v as i32;
                }
                edge += 1;
            }
            v += 1;
        }
        config += 1;
    }
    lookup
}
