use nalgebra::Point as NPoint;

use crate::types::Value;

// linearly map a number from one range to another
pub fn remap(s: Value, range_in: [Value; 2], range_out: [Value; 2]) -> Value {
    range_out[0] + (s - range_in[0]) * (range_out[1] - range_out[0]) / (range_in[1] - range_in[0])
}

// Return the interpolation factor t corresponding to iso_val, clamped to the edge.
// Flat edges have no crossing to find and report their midpoint.
pub fn find_t(v0: Value, v1: Value, iso_val: Value) -> Value {
    let denom = v1 - v0;
    if denom == 0.0 {
        return 0.5;
    }
    ((iso_val - v0) / denom).clamp(0.0, 1.0)
}

// Linear interpolation
pub fn lerp(a: Value, b: Value, t: Value) -> Value {
    a + (b - a) * t
}

// Linearly interpolate between two points (2D or 3D) by factor t
pub fn interpolate_points<const D: usize>(
    p0: &NPoint<Value, D>,
    p1: &NPoint<Value, D>,
    t: Value,
) -> NPoint<Value, D> {
    NPoint::from(p0.coords.zip_map(&p1.coords, |a, b| lerp(a, b, t)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, Point2};
    use approx::assert_relative_eq;

    #[test]
    fn find_t_locates_the_zero_crossing() {
        assert_relative_eq!(find_t(-1.0, 3.0, 0.0), 0.25);
        assert_relative_eq!(find_t(2.0, -2.0, 0.0), 0.5);
        assert_relative_eq!(find_t(1.0, 1.0, 0.0), 0.5);
        assert_relative_eq!(find_t(1.0, 2.0, 0.0), 0.0);
    }

    #[test]
    fn find_t_is_scale_invariant() {
        for scale in [1.0, 1e-6, 1e-8, 1e-12] {
            assert_relative_eq!(find_t(-0.3 * scale, 0.7 * scale, 0.0), 0.3, epsilon = 1e-5);
        }
    }

    #[test]
    fn interpolate_points_works_in_both_dimensions() {
        let p = interpolate_points(&Point::new(0.0, 0.0, 0.0), &Point::new(2.0, 4.0, 8.0), 0.5);
        assert_eq!(p, Point::new(1.0, 2.0, 4.0));

        let q = interpolate_points(&Point2::new(1.0, 1.0), &Point2::new(1.0, 3.0), 0.25);
        assert_eq!(q, Point2::new(1.0, 1.5));
    }

    #[test]
    fn remap_maps_lattice_index_to_world() {
        assert_relative_eq!(remap(2.0, [0.0, 4.0], [-1.0, 1.0]), 0.0);
        assert_relative_eq!(remap(4.0, [0.0, 4.0], [-1.0, 1.0]), 1.0);
    }
}
