pub mod colored_marching_squares;
pub mod nielson_dual;

use std::str::FromStr;

use derive_more::Display;

pub use colored_marching_squares::{
    colored_marching_squares, colored_marching_squares_from_samples, extract_colored_contour,
};
pub use nielson_dual::{extract_dual_mesh, nielson_dual, nielson_dual_from_samples};

use crate::{error::DualContoursError, field::ScalarField, grid::Grid3, mesh::Mesh};

/// Isosurface extraction algorithm.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// MC-Dual with vertices at the precomputed average of their edge midpoints.
    #[default]
    #[display("nielson_dual")]
    NielsonDual,
    /// MC-Dual with vertices at the average of their interpolated edge crossings.
    #[display("nielson_dual_interpolated")]
    NielsonDualInterpolated,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::NielsonDual, Algorithm::NielsonDualInterpolated];
}

impl FromStr for Algorithm {
    type Err = DualContoursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.to_string() == s)
            .ok_or(DualContoursError::UnknownAlgorithm)
    }
}

/// Extracts the isosurface `{ p : field(p) = grid.threshold() }` of `field` over
/// `grid` using `algorithm`.
///
/// ```rust,ignore
/// let sphere = |p: Point| p.coords.norm() - 0.8;
/// let grid = Grid3::new([32, 32, 32], Point::new(-1., -1., -1.), Point::new(1., 1., 1.))?;
/// let mesh = extract_isosurface(&sphere, Algorithm::NielsonDual, &grid);
/// ```
pub fn extract_isosurface<F: ScalarField + ?Sized>(
    field: &F,
    algorithm: Algorithm,
    grid: &Grid3,
) -> Mesh {
    match algorithm {
        Algorithm::NielsonDual | Algorithm::NielsonDualInterpolated => {
            extract_dual_mesh(field, algorithm, grid)
        }
    }
}
