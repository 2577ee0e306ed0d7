use nalgebra::{Point2 as NPoint2, Point3, Vector3};

/// Scalar field value at a point in space.
pub type Value = f32;

/// A 3D point with [`Value`] components.
pub type Point = Point3<Value>;

/// A 2D point with [`Value`] components.
pub type Point2 = NPoint2<Value>;

/// A 3D vector with [`Value`] components.
pub type Vector = Vector3<Value>;

/// A boxed scalar field: maps a [`Point`] to a [`Value`].
///
/// Return values **below or equal to** the grid's threshold are considered "inside" the surface.
pub type CompiledFunction = dyn Fn(Point) -> Value + Send + Sync;

/// Bit `i` is set when corner `i` of a cube is inside. 256 possible values.
pub type CubeConfiguration = u8;

/// Bit `i` is set when corner `i` of a square is inside. Only the low 4 bits are used.
pub type SquareConfiguration = u8;
