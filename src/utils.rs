use crate::{
    interp::{find_t, interpolate_points},
    tables::cube::{CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, NUM_EDGES},
    types::{CubeConfiguration, Point, Value, Vector},
};

/// Returns the 8 world-space corner positions of the cube whose lowest corner is `origin`.
///
/// Corners are ordered to match [`CORNER_OFFSETS`]:
/// ```text
///     7----6          Y
///    /|   /|          |  Z
///   3----2 |          | /
///   | 4--|-5          *-- X
///   |/   |/
///   0----1
/// ```
#[inline]
pub fn get_corner_positions(origin: Point, cell_size: Vector) -> [Point; 8] {
    CORNER_OFFSETS.map(|[dx, dy, dz]| {
        Point::new(
            origin.x + dx as Value * cell_size.x,
            origin.y + dy as Value * cell_size.y,
            origin.z + dz as Value * cell_size.z,
        )
    })
}

/// Returns the `[min, max]` bounding box corners given a `center` point and box dimensions.
///
/// ```text
///  min = center - dims/2
///  max = center + dims/2
/// ```
#[inline]
pub fn center_box(center: [f32; 3], dims: [f32; 3]) -> [[f32; 3]; 2] {
    let min = [
        center[0] - dims[0] / 2.0,
        center[1] - dims[1] / 2.0,
        center[2] - dims[2] / 2.0,
    ];
    let max = [
        center[0] + dims[0] / 2.0,
        center[1] + dims[1] / 2.0,
        center[2] + dims[2] / 2.0,
    ];
    [min, max]
}

/// Computes the cube configuration for a set of corner values.
///
/// Each of the 8 corners maps to one bit. A bit is set when the corner's value
/// is **at or below** the threshold (i.e. "inside" the surface):
///
/// ```text
/// corner index:  7  6  5  4  3  2  1  0
/// config bits:  [_][_][_][_][_][_][_][_]
///                                      ^-- corner 0 inside?
/// ```
#[inline]
pub fn cube_configuration(corner_values: &[Value; 8], threshold: Value) -> CubeConfiguration {
    corner_values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v <= threshold)
        .fold(0, |config, (i, _)| config | (1 << i))
}

/// Interpolates the threshold crossing along each crossed edge of a cube.
///
/// Uncrossed edges are `None`.
#[inline]
pub fn get_edge_crossings(
    config: CubeConfiguration,
    corner_positions: &[Point; 8],
    corner_values: &[Value; 8],
    threshold: Value,
) -> [Option<Point>; NUM_EDGES] {
    let edges_mask = EDGE_TABLE[config as usize];
    let mut crossings = [None; NUM_EDGES];

    for (i, [a, b]) in EDGE_CORNERS.iter().enumerate() {
        if (edges_mask & (1 << i)) == 0 {
            continue;
        }

        let t = find_t(corner_values[*a], corner_values[*b], threshold);
        crossings[i] = Some(interpolate_points(&corner_positions[*a], &corner_positions[*b], t));
    }

    crossings
}

/// Makes room for `needed` more elements, doubling the capacity of `buffer` (starting
/// from `initial`) whenever it runs out.
#[inline]
pub(crate) fn reserve_doubling<T>(buffer: &mut Vec<T>, needed: usize, initial: usize, name: &str) {
    if buffer.len() + needed <= buffer.capacity() {
        return;
    }
    let old = buffer.capacity();
    let additional = old.max(initial).max(needed);
    buffer.reserve_exact(additional);
    log::trace!("grew {name} from {old} to {}", buffer.capacity());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn configuration_bits_follow_corner_order() {
        let mut values = [1.0; 8];
        assert_eq!(cube_configuration(&values, 0.0), 0);
        values[0] = -1.0;
        values[6] = 0.0;
        assert_eq!(cube_configuration(&values, 0.0), 0b0100_0001);
        assert_eq!(cube_configuration(&[-1.0; 8], 0.0), 255);
    }

    #[test]
    fn crossings_interpolate_along_crossed_edges_only() {
        let positions = get_corner_positions(Point::new(0., 0., 0.), Vector::new(2., 2., 2.));
        let mut values = [1.0; 8];
        values[0] = -3.0;
        let config = cube_configuration(&values, 0.0);
        let crossings = get_edge_crossings(config, &positions, &values, 0.0);

        assert_eq!(crossings.iter().filter(|c| c.is_some()).count(), 3);
        // edge 0 runs from corner 0 to corner 1 along X; crossing at t = 0.75
        let p = crossings[0].unwrap();
        assert_relative_eq!(p, Point::new(1.5, 0., 0.));
        assert!(crossings[1].is_none());
    }

    #[test]
    fn doubling_growth() {
        let mut buffer: Vec<u32> = Vec::new();
        reserve_doubling(&mut buffer, 1, 4, "test");
        assert!(buffer.capacity() >= 4);
        let full = buffer.capacity();
        buffer.resize(full, 0);
        let before = buffer.capacity();
        reserve_doubling(&mut buffer, 1, 4, "test");
        assert!(buffer.capacity() >= 2 * before);
    }
}
