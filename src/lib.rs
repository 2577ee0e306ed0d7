pub mod algorithms;
pub mod contour;
pub mod error;
pub mod field;
pub mod grid;
pub mod interp;
pub mod mesh;
#[cfg(feature = "bevy")]
pub mod plugin;
pub mod tables;
pub mod types;
pub mod utils;

pub use algorithms::{Algorithm, extract_colored_contour, extract_dual_mesh, extract_isosurface};
pub use contour::Contour;
pub use error::{DualContoursError, Result};
pub use field::{ColoredField, CubeConfigField, Sample, ScalarField};
pub use grid::{EdgePlacement, Grid2, Grid3};
pub use mesh::{Mesh, Vertex};
#[cfg(feature = "bevy")]
pub use plugin::{DualContoursPlugin, SurfaceChunk};
