//! Immutable lookup tables, all evaluated at compile time.

pub mod cube;
pub mod nielson_dual;
pub mod square;

pub use cube::{CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, FACE_CORNERS, FACE_EDGES};
pub use nielson_dual::{
    CookedVertexList, DualVertex, DualVertexList, MIDPOINT_VERTEX_TABLE, VERTEX_INDEX_LOOKUP_TABLE,
    VERTEX_TABLE, vertex_index,
};
pub use square::{SQUARE_EDGE_CORNERS, SQUARE_EDGE_TABLE, SQUARE_SEGMENT_TABLE, square_segments};
