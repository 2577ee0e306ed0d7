//! Field sampling capabilities supplied by the caller.
//!
//! The extraction algorithms never own or cache a field beyond a single run. Any
//! per-call configuration is captured by the implementing type or closure.

use crate::{
    tables::cube::{CORNER_OFFSETS, NUM_CORNERS, corner_inside},
    types::{CubeConfiguration, Point, Point2, Value},
};

/// A 3D scalar field. Values at or below the grid threshold are inside.
pub trait ScalarField {
    fn sample(&self, point: Point) -> Value;
}

impl<F> ScalarField for F
where
    F: Fn(Point) -> Value + ?Sized,
{
    #[inline]
    fn sample(&self, point: Point) -> Value {
        self(point)
    }
}

/// What a 2D field reports at one position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    /// A discrete region / material id.
    Color(u32),
    /// A continuous signed value, inside when at or below the threshold.
    Scalar(Value),
}

impl Sample {
    /// The region this sample belongs to. Scalars map to `1` inside and `0` outside.
    #[inline]
    pub fn color(self, threshold: Value) -> u32 {
        match self {
            Sample::Color(color) => color,
            Sample::Scalar(value) => u32::from(value <= threshold),
        }
    }

    #[inline]
    pub fn scalar(self) -> Option<Value> {
        match self {
            Sample::Scalar(value) => Some(value),
            Sample::Color(_) => None,
        }
    }
}

/// A 2D field returning either material ids or signed scalars.
pub trait ColoredField {
    fn sample(&self, point: Point2) -> Sample;
}

impl<F> ColoredField for F
where
    F: Fn(Point2) -> Sample + ?Sized,
{
    #[inline]
    fn sample(&self, point: Point2) -> Sample {
        self(point)
    }
}

/// Trilinear blend of a single cube configuration over `[-1, 1]^3`.
///
/// Inside corners take the value `-intensity`, outside corners `1.0`. Extracting this
/// field at resolution 2 reproduces `cube` exactly, which makes it handy for
/// inspecting individual table entries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeConfigField {
    pub cube: CubeConfiguration,
    pub intensity: Value,
}

impl CubeConfigField {
    pub fn new(cube: CubeConfiguration) -> Self {
        Self {
            cube,
            intensity: 1.0,
        }
    }

    pub fn with_intensity(mut self, intensity: Value) -> Self {
        self.intensity = intensity;
        self
    }
}

impl ScalarField for CubeConfigField {
    fn sample(&self, point: Point) -> Value {
        let local = point.map(|c| (c + 1.0) / 2.0);
        (0..NUM_CORNERS)
            .map(|corner| {
                let value = if corner_inside(self.cube, corner) {
                    -self.intensity
                } else {
                    1.0
                };
                let weight: Value = (0..3)
                    .map(|axis| {
                        if CORNER_OFFSETS[corner][axis] == 1 {
                            local[axis]
                        } else {
                            1.0 - local[axis]
                        }
                    })
                    .product();
                weight * value
            })
            .sum()
    }
}
