use nalgebra::Vector2;
use ndarray::{Array2, Array3};

use crate::{
    error::{DualContoursError, Result},
    field::{ColoredField, Sample, ScalarField},
    interp::remap,
    tables::{cube::CORNER_OFFSETS, square::SQUARE_CORNER_OFFSETS},
    types::{Point, Point2, Value, Vector},
    utils::center_box,
};

/// How boundary points are placed along a crossed cell edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgePlacement {
    /// Always the middle of the edge.
    #[default]
    Midpoint,
    /// The linearly interpolated threshold crossing when both corners are scalar
    /// samples, the midpoint otherwise.
    Interpolated,
}

/// A regular 3D lattice of `resolution[0] × resolution[1] × resolution[2]` sample
/// points spanning `min..=max`, i.e. `resolution - 1` cubes per axis.
///
/// ```rust,ignore
/// let grid = Grid3::new([32, 32, 32], Point::new(-1., -1., -1.), Point::new(1., 1., 1.))?
///     .with_threshold(0.25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid3 {
    resolution: [usize; 3],
    min: Point,
    max: Point,
    threshold: Value,
}

impl Grid3 {
    /// Creates a grid, rejecting resolutions below 2 and empty or non-finite bounds.
    pub fn new(resolution: [usize; 3], min: Point, max: Point) -> Result<Self> {
        check_resolution(&resolution)?;
        check_bounds(min.coords.as_slice(), max.coords.as_slice())?;
        Ok(Self {
            resolution,
            min,
            max,
            threshold: 0.,
        })
    }

    /// Creates a grid of `dims` centred on `center`.
    pub fn centered(resolution: [usize; 3], center: Point, dims: Vector) -> Result<Self> {
        let [min, max] = center_box(center.into(), dims.into());
        Self::new(resolution, min.into(), max.into())
    }

    /// Sets the iso-surface threshold.
    pub fn with_threshold(mut self, threshold: Value) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn resolution(&self) -> [usize; 3] {
        self.resolution
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn threshold(&self) -> Value {
        self.threshold
    }

    /// Number of cubes along each axis.
    pub fn num_cells(&self) -> [usize; 3] {
        self.resolution.map(|r| r - 1)
    }

    /// World-space size of one cube.
    pub fn cell_size(&self) -> Vector {
        Vector::from_fn(|i, _| (self.max[i] - self.min[i]) / (self.resolution[i] - 1) as Value)
    }

    /// World-space position of lattice point `(x, y, z)`.
    #[inline]
    pub fn point(&self, x: usize, y: usize, z: usize) -> Point {
        let index = [x, y, z];
        Point::from(Vector::from_fn(|i, _| {
            remap(
                index[i] as Value,
                [0., (self.resolution[i] - 1) as Value],
                [self.min[i], self.max[i]],
            )
        }))
    }

    /// Returns the 8 lattice indices `[x, y, z]` of the cube at `(x, y, z)`, in corner order.
    #[inline]
    pub fn cube_corner_indices(&self, x: usize, y: usize, z: usize) -> [[usize; 3]; 8] {
        CORNER_OFFSETS.map(|[dx, dy, dz]| [x + dx, y + dy, z + dz])
    }

    /// Evaluates `field` once at every lattice point. Values are indexed `[[x, y, z]]`.
    pub fn sample<F: ScalarField + ?Sized>(&self, field: &F) -> Array3<Value> {
        let [rx, ry, rz] = self.resolution;
        Array3::from_shape_fn((rx, ry, rz), |(x, y, z)| field.sample(self.point(x, y, z)))
    }
}

/// A regular 2D lattice of sample points spanning `min..=max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid2 {
    resolution: [usize; 2],
    min: Point2,
    max: Point2,
    threshold: Value,
    placement: EdgePlacement,
}

impl Grid2 {
    /// Creates a grid, rejecting resolutions below 2 and empty or non-finite bounds.
    pub fn new(resolution: [usize; 2], min: Point2, max: Point2) -> Result<Self> {
        check_resolution(&resolution)?;
        check_bounds(min.coords.as_slice(), max.coords.as_slice())?;
        Ok(Self {
            resolution,
            min,
            max,
            threshold: 0.,
            placement: EdgePlacement::default(),
        })
    }

    /// Sets the threshold used to turn scalar samples into inside/outside.
    pub fn with_threshold(mut self, threshold: Value) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets where boundary points are placed along crossed edges.
    pub fn with_placement(mut self, placement: EdgePlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn resolution(&self) -> [usize; 2] {
        self.resolution
    }

    pub fn min(&self) -> Point2 {
        self.min
    }

    pub fn max(&self) -> Point2 {
        self.max
    }

    pub fn threshold(&self) -> Value {
        self.threshold
    }

    pub fn placement(&self) -> EdgePlacement {
        self.placement
    }

    /// Number of squares along each axis.
    pub fn num_cells(&self) -> [usize; 2] {
        self.resolution.map(|r| r - 1)
    }

    /// World-space position of lattice point `(x, y)`.
    #[inline]
    pub fn point(&self, x: usize, y: usize) -> Point2 {
        let index = [x, y];
        Point2::from(Vector2::from_fn(|i, _| {
            remap(
                index[i] as Value,
                [0., (self.resolution[i] - 1) as Value],
                [self.min[i], self.max[i]],
            )
        }))
    }

    /// Returns the 4 lattice indices `[x, y]` of the square at `(x, y)`, in corner order.
    #[inline]
    pub fn square_corner_indices(&self, x: usize, y: usize) -> [[usize; 2]; 4] {
        SQUARE_CORNER_OFFSETS.map(|[dx, dy]| [x + dx, y + dy])
    }

    /// Evaluates `field` once at every lattice point. Samples are indexed `[[x, y]]`.
    pub fn sample<F: ColoredField + ?Sized>(&self, field: &F) -> Array2<Sample> {
        let [rx, ry] = self.resolution;
        Array2::from_shape_fn((rx, ry), |(x, y)| field.sample(self.point(x, y)))
    }
}

fn check_resolution(resolution: &[usize]) -> Result<()> {
    match resolution.iter().position(|&r| r < 2) {
        Some(axis) => Err(DualContoursError::InvalidResolution {
            axis,
            resolution: resolution[axis],
        }),
        None => Ok(()),
    }
}

fn check_bounds(min: &[Value], max: &[Value]) -> Result<()> {
    let valid = min
        .iter()
        .zip(max)
        .all(|(lo, hi)| lo.is_finite() && hi.is_finite() && lo < hi);
    if valid {
        Ok(())
    } else {
        Err(DualContoursError::InvalidBounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_degenerate_grids() {
        let min = Point::new(0., 0., 0.);
        let max = Point::new(1., 1., 1.);
        assert_eq!(
            Grid3::new([2, 1, 2], min, max),
            Err(DualContoursError::InvalidResolution {
                axis: 1,
                resolution: 1
            })
        );
        assert_eq!(
            Grid3::new([2, 2, 2], max, min),
            Err(DualContoursError::InvalidBounds)
        );
        assert_eq!(
            Grid2::new([4, 4], Point2::new(0., 0.), Point2::new(0., 1.)),
            Err(DualContoursError::InvalidBounds)
        );
        assert!(Grid2::new([2, 2], Point2::new(0., 0.), Point2::new(1., 1.)).is_ok());
    }

    #[test]
    fn lattice_points_span_the_bounds() {
        let grid = Grid3::new([3, 5, 2], Point::new(-1., 0., 2.), Point::new(1., 4., 3.)).unwrap();
        assert_eq!(grid.point(0, 0, 0), Point::new(-1., 0., 2.));
        assert_eq!(grid.point(2, 4, 1), Point::new(1., 4., 3.));
        assert_eq!(grid.point(1, 2, 0), Point::new(0., 2., 2.));
        assert_eq!(grid.num_cells(), [2, 4, 1]);
        assert_relative_eq!(grid.cell_size(), Vector::new(1., 1., 1.));
    }

    #[test]
    fn centered_grid_uses_center_box() {
        let grid =
            Grid3::centered([2, 2, 2], Point::new(1., 1., 1.), Vector::new(2., 4., 6.)).unwrap();
        assert_eq!(grid.min(), Point::new(0., -1., -2.));
        assert_eq!(grid.max(), Point::new(2., 3., 4.));
    }

    #[test]
    fn sampling_visits_every_lattice_point_once() {
        let grid = Grid3::new([3, 3, 3], Point::new(0., 0., 0.), Point::new(2., 2., 2.)).unwrap();
        let values = grid.sample(&|p: Point| p.x + 10. * p.y + 100. * p.z);
        assert_eq!(values.dim(), (3, 3, 3));
        assert_relative_eq!(values[[1, 2, 0]], 21.);

        let grid2 = Grid2::new([2, 3], Point2::new(0., 0.), Point2::new(1., 2.)).unwrap();
        let samples = grid2.sample(&|p: Point2| Sample::Scalar(p.y));
        assert_eq!(samples[[1, 2]], Sample::Scalar(2.));
    }
}
