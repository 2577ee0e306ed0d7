//! Marching squares tables.
//!
//! ```text
//!   3---2---2
//!   |       |
//!   3       1
//!   |       |
//!   0---0---1
//! ```
//!
//! Corner numbers sit at the cell corners, edge numbers at the edge midpoints.

use crate::types::SquareConfiguration;

pub const NUM_SQUARE_CORNERS: usize = 4;
pub const NUM_SQUARE_EDGES: usize = 4;
pub const NUM_SQUARE_CONFIGURATIONS: usize = 16;

pub const SQUARE_CORNER_OFFSETS: [[usize; 2]; NUM_SQUARE_CORNERS] =
    [[0, 0], [1, 0], [1, 1], [0, 1]];

/// The two corners joined by each edge, in counter-clockwise order.
pub const SQUARE_EDGE_CORNERS: [[usize; 2]; NUM_SQUARE_EDGES] = [[0, 1], [1, 2], [2, 3], [3, 0]];

/// For each configuration, bit `e` is set when edge `e` is crossed.
pub const SQUARE_EDGE_TABLE: [u8; NUM_SQUARE_CONFIGURATIONS] = compute_square_edge_table();

/// Pairs of crossed edges joined by a boundary segment, terminated by `-1`.
///
/// Each pair is oriented so that the inside corners lie to the left when walking
/// from the first edge to the second. The two saddle cases (5 and 10) cut each
/// inside corner off on its own.
pub const SQUARE_SEGMENT_TABLE: [[i8; 4]; NUM_SQUARE_CONFIGURATIONS] = [
    [-1, -1, -1, -1],
    [0, 3, -1, -1],
    [1, 0, -1, -1],
    [1, 3, -1, -1],
    [2, 1, -1, -1],
    [0, 3, 2, 1],
    [2, 0, -1, -1],
    [2, 3, -1, -1],
    [3, 2, -1, -1],
    [0, 2, -1, -1],
    [1, 0, 3, 2],
    [1, 2, -1, -1],
    [3, 1, -1, -1],
    [0, 1, -1, -1],
    [3, 0, -1, -1],
    [-1, -1, -1, -1],
];

#[inline]
pub const fn square_corner_inside(config: SquareConfiguration, corner: usize) -> bool {
    (config >> corner) & 1 != 0
}

const fn compute_square_edge_table() -> [u8; NUM_SQUARE_CONFIGURATIONS] {
    let mut table = [0u8; NUM_SQUARE_CONFIGURATIONS];
    let mut config = 0;
    while config < NUM_SQUARE_CONFIGURATIONS {
        let square = config as SquareConfiguration;
        let mut edge = 0;
        while edge < NUM_SQUARE_EDGES {
            let [a, b] = SQUARE_EDGE_CORNERS[edge];
            if square_corner_inside(square, a) != square_corner_inside(square, b) {
                table[config] |= 1 << edge;
            }
            edge += 1;
        }
        config += 1;
    }
    table
}

/// Returns the oriented edge pairs for `config`.
#[inline]
pub fn square_segments(config: SquareConfiguration) -> impl Iterator<Item = [usize; 2]> {
    SQUARE_SEGMENT_TABLE[config as usize & 0xf]
        .chunks_exact(2)
        .take_while(|pair| pair[0] != -1)
        .map(|pair| [pair[0] as usize, pair[1] as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIDPOINTS: [[f32; 2]; 4] = [[0.5, 0.0], [1.0, 0.5], [0.5, 1.0], [0.0, 0.5]];

    #[test]
    fn segments_cover_each_crossed_edge_exactly_once() {
        for config in 0..NUM_SQUARE_CONFIGURATIONS as u8 {
            let mut seen = 0u8;
            for [a, b] in square_segments(config) {
                for edge in [a, b] {
                    assert_eq!(seen & (1 << edge), 0, "config {config} edge {edge} reused");
                    seen |= 1 << edge;
                }
            }
            assert_eq!(seen, SQUARE_EDGE_TABLE[config as usize], "config {config}");
        }
    }

    #[test]
    fn inside_corners_lie_left_of_each_segment() {
        for config in 0..NUM_SQUARE_CONFIGURATIONS as u8 {
            for [a, b] in square_segments(config) {
                let [ax, ay] = MIDPOINTS[a];
                let [bx, by] = MIDPOINTS[b];
                // Endpoints of the two crossed edges straddle the segment.
                let corners = SQUARE_EDGE_CORNERS[a].into_iter().chain(SQUARE_EDGE_CORNERS[b]);
                for corner in corners {
                    let [cx, cy] = SQUARE_CORNER_OFFSETS[corner];
                    let cross = (bx - ax) * (cy as f32 - ay) - (by - ay) * (cx as f32 - ax);
                    assert_eq!(
                        cross > 0.0,
                        square_corner_inside(config, corner),
                        "config {config} segment {a}->{b} corner {corner}"
                    );
                }
            }
        }
    }

    #[test]
    fn saddles_separate_inside_corners() {
        assert_eq!(square_segments(5).collect::<Vec<_>>(), vec![[0, 3], [2, 1]]);
        assert_eq!(square_segments(10).collect::<Vec<_>>(), vec![[1, 0], [3, 2]]);
    }
}
