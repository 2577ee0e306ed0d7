use crate::{
    error::{DualContoursError, Result},
    types::{Point, Value, Vector},
    utils::reserve_doubling,
};

const INITIAL_VERTEX_CAPACITY: usize = 256;
const INITIAL_FACE_CAPACITY: usize = 256;

/// A mesh vertex. `norm` stays zero until [`Mesh::compute_normals`] runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub pos: Point,
    pub norm: Vector,
}

impl Vertex {
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            norm: Vector::zeros(),
        }
    }
}

impl From<Point> for Vertex {
    fn from(pos: Point) -> Self {
        Self::new(pos)
    }
}

/// Where a face's indices live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FaceSlot {
    Triangle(u32),
    Quad(u32),
    Polygon { start: u32, len: u32 },
}

/// Polygon mesh produced by the extraction algorithms.
///
/// Vertices and faces are append-only and addressed by the `u32` index returned when
/// they were added; indices never change, even when storage grows. Faces may have any
/// number of indices (at least three). Triangles and quads are packed into their own
/// flat pools so that adding one never allocates per face.
///
/// `Clone` copies the mesh. `std::mem::take` moves it out and leaves an empty mesh behind.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<FaceSlot>,
    triangles: Vec<u32>,
    quads: Vec<u32>,
    polygons: Vec<u32>,
    num_indices: usize,
    num_non_triangles: usize,
}

impl Mesh {
    /// Creates an empty mesh with no vertices or faces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for `vertices` vertices and `faces` quads.
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
            quads: Vec::with_capacity(faces * 4),
            ..Default::default()
        }
    }

    /// Appends a copy of `vertex` and returns its index.
    pub fn add_vertex(&mut self, vertex: impl Into<Vertex>) -> u32 {
        let index = self.vertices.len();
        debug_assert!(index < u32::MAX as usize, "vertex index overflow");
        reserve_doubling(&mut self.vertices, 1, INITIAL_VERTEX_CAPACITY, "mesh vertices");
        self.vertices.push(vertex.into());
        index as u32
    }

    /// Appends a face made of a copy of `indices` and returns the face index.
    ///
    /// Every index must refer to a vertex that has already been added and there must be
    /// at least three of them. This is checked in debug builds only; use
    /// [`try_add_face`](Mesh::try_add_face) for indices from an untrusted source.
    pub fn add_face(&mut self, indices: &[u32]) -> u32 {
        debug_assert!(
            self.check_face(indices).is_ok(),
            "invalid face {indices:?} for {} vertices",
            self.vertices.len()
        );

        let slot = match indices.len() {
            3 => {
                reserve_doubling(
                    &mut self.triangles,
                    3,
                    3 * INITIAL_FACE_CAPACITY,
                    "triangle pool",
                );
                let offset = self.triangles.len() as u32;
                self.triangles.extend_from_slice(indices);
                FaceSlot::Triangle(offset)
            }
            4 => {
                reserve_doubling(&mut self.quads, 4, 4 * INITIAL_FACE_CAPACITY, "quad pool");
                let offset = self.quads.len() as u32;
                self.quads.extend_from_slice(indices);
                FaceSlot::Quad(offset)
            }
            len => {
                reserve_doubling(&mut self.polygons, len, INITIAL_FACE_CAPACITY, "polygon pool");
                let start = self.polygons.len() as u32;
                self.polygons.extend_from_slice(indices);
                FaceSlot::Polygon {
                    start,
                    len: len as u32,
                }
            }
        };

        if indices.len() != 3 {
            self.num_non_triangles += 1;
        }
        self.num_indices += indices.len();

        let index = self.faces.len() as u32;
        reserve_doubling(&mut self.faces, 1, INITIAL_FACE_CAPACITY, "mesh faces");
        self.faces.push(slot);
        index
    }

    /// Like [`add_face`](Mesh::add_face), but reports bad input instead of asserting.
    pub fn try_add_face(&mut self, indices: &[u32]) -> Result<u32> {
        self.check_face(indices)?;
        Ok(self.add_face(indices))
    }

    fn check_face(&self, indices: &[u32]) -> Result<()> {
        if indices.len() < 3 {
            return Err(DualContoursError::DegenerateFace {
                num_indices: indices.len(),
            });
        }
        let num_vertices = self.vertices.len() as u32;
        match indices.iter().find(|&&index| index >= num_vertices) {
            Some(&index) => Err(DualContoursError::InvalidIndex {
                index,
                num_vertices,
            }),
            None => Ok(()),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Total number of indices over all faces.
    pub fn num_indices(&self) -> usize {
        self.num_indices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    /// `true` when every face has exactly three indices (vacuously true without faces).
    pub fn is_triangle_mesh(&self) -> bool {
        self.num_non_triangles == 0
    }

    pub fn vertex(&self, index: u32) -> &Vertex {
        &self.vertices[index as usize]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the vertex indices of face `index`.
    pub fn face(&self, index: u32) -> &[u32] {
        match self.faces[index as usize] {
            FaceSlot::Triangle(offset) => &self.triangles[offset as usize..offset as usize + 3],
            FaceSlot::Quad(offset) => &self.quads[offset as usize..offset as usize + 4],
            FaceSlot::Polygon { start, len } => {
                &self.polygons[start as usize..(start + len) as usize]
            }
        }
    }

    /// Iterates over the faces in insertion order.
    pub fn faces(&self) -> impl Iterator<Item = &[u32]> + '_ {
        (0..self.faces.len() as u32).map(move |index| self.face(index))
    }

    /// Computes the unit normal of face `index` with Newell's method, which also
    /// handles non-planar quads.
    ///
    /// Returns the zero vector if the face is degenerate.
    pub fn face_normal(&self, index: u32) -> Vector {
        let normal = self.face_area_normal(index);
        let nrm = normal.norm();
        if nrm == 0.0 {
            Vector::zeros()
        } else {
            normal / nrm
        }
    }

    // Newell normal, its length is twice the polygon area
    fn face_area_normal(&self, index: u32) -> Vector {
        let face = self.face(index);
        let mut normal = Vector::zeros();
        for (i, &a) in face.iter().enumerate() {
            let b = face[(i + 1) % face.len()];
            let pa = self.vertices[a as usize].pos;
            let pb = self.vertices[b as usize].pos;
            normal.x += (pa.y - pb.y) * (pa.z + pb.z);
            normal.y += (pa.z - pb.z) * (pa.x + pb.x);
            normal.z += (pa.x - pb.x) * (pa.y + pb.y);
        }
        normal
    }

    /// Computes area-weighted vertex normals from the faces, replacing any stored normals.
    ///
    /// Vertices not referenced by any face keep a zero normal.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vector::zeros(); self.vertices.len()];
        for index in 0..self.faces.len() as u32 {
            let normal = self.face_area_normal(index);
            for &v in self.face(index) {
                normals[v as usize] += normal;
            }
        }
        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.norm = normal.try_normalize(Value::EPSILON).unwrap_or_else(Vector::zeros);
        }
    }

    /// Splits every face into a triangle fan and returns a flat index buffer,
    /// three indices per triangle, preserving each face's winding.
    ///
    /// Faces with fewer than three indices (only reachable through
    /// [`add_face`](Mesh::add_face) in release builds) contribute no triangles.
    pub fn triangulate(&self) -> Vec<u32> {
        let num_triangles: usize = self.faces().map(|face| face.len().saturating_sub(2)).sum();
        let mut indices = Vec::with_capacity(3 * num_triangles);
        for face in self.faces() {
            for i in 1..face.len().saturating_sub(1) {
                indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
            }
        }
        indices
    }

    /// Vertex positions as plain arrays.
    pub fn positions(&self) -> Vec<[Value; 3]> {
        self.vertices.iter().map(|v| v.pos.into()).collect()
    }

    /// Vertex normals as plain arrays.
    pub fn normals(&self) -> Vec<[Value; 3]> {
        self.vertices.iter().map(|v| v.norm.into()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point::new(0., 0., 0.));
        mesh.add_vertex(Point::new(1., 0., 0.));
        mesh.add_vertex(Point::new(1., 1., 0.));
        mesh.add_vertex(Point::new(0., 1., 0.));
        mesh
    }

    #[test]
    fn faces_land_in_their_pools() {
        let mut mesh = unit_square();
        mesh.add_vertex(Point::new(0.5, 2., 0.));
        assert_eq!(mesh.add_face(&[0, 1, 2]), 0);
        assert!(mesh.is_triangle_mesh());
        assert_eq!(mesh.add_face(&[0, 1, 2, 3]), 1);
        assert!(!mesh.is_triangle_mesh());
        assert_eq!(mesh.add_face(&[0, 1, 2, 4, 3]), 2);

        assert_eq!(mesh.face(0), &[0, 1, 2]);
        assert_eq!(mesh.face(1), &[0, 1, 2, 3]);
        assert_eq!(mesh.face(2), &[0, 1, 2, 4, 3]);
        assert_eq!(mesh.num_indices(), 12);
        assert_eq!(mesh.faces().count(), 3);
    }

    #[test]
    fn try_add_face_rejects_bad_faces() {
        let mut mesh = unit_square();
        assert_eq!(
            mesh.try_add_face(&[0, 1, 4]),
            Err(DualContoursError::InvalidIndex {
                index: 4,
                num_vertices: 4
            })
        );
        assert_eq!(
            mesh.try_add_face(&[0, 1]),
            Err(DualContoursError::DegenerateFace { num_indices: 2 })
        );
        assert_eq!(mesh.num_faces(), 0);
        assert_eq!(mesh.try_add_face(&[0, 1, 3]), Ok(0));
    }

    #[test]
    fn quad_normal_and_fan() {
        let mut mesh = unit_square();
        mesh.add_face(&[0, 1, 2, 3]);
        assert_relative_eq!(mesh.face_normal(0), Vector::new(0., 0., 1.));
        assert_eq!(mesh.triangulate(), vec![0, 1, 2, 0, 2, 3]);

        mesh.compute_normals();
        for vertex in mesh.vertices() {
            assert_relative_eq!(vertex.norm, Vector::new(0., 0., 1.));
        }
    }

    #[test]
    fn fans_skip_faces_too_short_to_split() {
        let mut mesh = unit_square();
        mesh.add_vertex(Point::new(0.5, 2., 0.));
        mesh.add_face(&[0, 1, 2, 4, 3]);
        assert_eq!(mesh.triangulate(), vec![0, 1, 2, 0, 2, 4, 0, 4, 3]);

        // what add_face stores for a two-index face once its assertion is compiled out
        let start = mesh.polygons.len() as u32;
        mesh.polygons.extend_from_slice(&[0, 1]);
        mesh.faces.push(FaceSlot::Polygon { start, len: 2 });
        mesh.num_indices += 2;
        mesh.num_non_triangles += 1;

        assert_eq!(mesh.face(1), &[0, 1]);
        assert_eq!(mesh.triangulate().len(), 9);
    }

    #[test]
    fn degenerate_face_has_zero_normal() {
        let mut mesh = Mesh::new();
        for _ in 0..3 {
            mesh.add_vertex(Point::new(1., 1., 1.));
        }
        mesh.add_face(&[0, 1, 2]);
        assert_eq!(mesh.face_normal(0), Vector::zeros());
    }

    #[test]
    fn take_moves_and_clone_copies() {
        let mut mesh = unit_square();
        mesh.add_face(&[0, 1, 2]);
        let copy = mesh.clone();
        let moved = std::mem::take(&mut mesh);
        assert!(mesh.is_empty());
        assert_eq!(moved.num_faces(), 1);
        assert_eq!(copy.face(0), moved.face(0));
    }
}
