use crate::{types::Point2, utils::reserve_doubling};

const INITIAL_CAPACITY: usize = 256;

/// Polyline output of the 2D algorithms: points plus line segments between them.
///
/// Like [`Mesh`](crate::mesh::Mesh), indices returned by the `add_*` methods stay valid
/// for the lifetime of the contour.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    vertices: Vec<Point2>,
    lines: Vec<[u32; 2]>,
}

impl Contour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, vertex: Point2) -> u32 {
        let index = self.vertices.len();
        debug_assert!(index < u32::MAX as usize, "vertex index overflow");
        reserve_doubling(&mut self.vertices, 1, INITIAL_CAPACITY, "contour vertices");
        self.vertices.push(vertex);
        index as u32
    }

    /// Appends a segment between two existing vertices and returns its index.
    pub fn add_line(&mut self, line: [u32; 2]) -> u32 {
        debug_assert!(
            line.iter().all(|&v| (v as usize) < self.vertices.len()),
            "line {line:?} out of range for {} vertices",
            self.vertices.len()
        );
        let index = self.lines.len() as u32;
        reserve_doubling(&mut self.lines, 1, INITIAL_CAPACITY, "contour lines");
        self.lines.push(line);
        index
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.lines.is_empty()
    }

    pub fn vertex(&self, index: u32) -> Point2 {
        self.vertices[index as usize]
    }

    pub fn line(&self, index: u32) -> [u32; 2] {
        self.lines[index as usize]
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn lines(&self) -> &[[u32; 2]] {
        &self.lines
    }
}
