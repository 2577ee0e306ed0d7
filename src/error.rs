use derive_more::Display;

pub type Result<T> = core::result::Result<T, DualContoursError>;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum DualContoursError {
    /// A grid axis has fewer than two lattice points.
    #[display("resolution {resolution} on axis {axis} is below the minimum of 2")]
    InvalidResolution { axis: usize, resolution: usize },
    /// Bounds are non-finite, or `min` is not strictly below `max` on every axis.
    #[display("bounding box is empty, inverted or non-finite")]
    InvalidBounds,
    /// A face referenced a vertex that has not been added yet.
    #[display("vertex index {index} is out of range for {num_vertices} vertices")]
    InvalidIndex { index: u32, num_vertices: u32 },
    /// A face needs at least three indices.
    #[display("a face needs at least 3 indices, got {num_indices}")]
    DegenerateFace { num_indices: usize },
    /// An algorithm name did not match any [`Algorithm`](crate::algorithms::Algorithm).
    #[display("unknown algorithm name")]
    UnknownAlgorithm,
}

impl std::error::Error for DualContoursError {}
