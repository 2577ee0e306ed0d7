use std::sync::Arc;

use bevy::{
    asset::RenderAssetUsages,
    mesh::{Indices, PrimitiveTopology},
    prelude::*,
};
use ndarray::Array3;

use crate::{
    algorithms::{Algorithm, extract_isosurface, nielson_dual_from_samples},
    grid::Grid3,
    mesh::Mesh as SurfaceMesh,
    types::{CompiledFunction, Value},
};

/// Where a [`SurfaceChunk`] gets its scalar values from.
#[derive(Clone)]
pub enum ChunkSource {
    /// Sampled at every lattice point of the chunk's grid each time it is meshed.
    Field(Arc<CompiledFunction>),
    /// Values already sampled, indexed `[[x, y, z]]`. Shape must match the grid resolution.
    Samples(Arc<Array3<Value>>),
}

/// A region of space whose isosurface is extracted into a [`Mesh3d`].
///
/// Sources are held behind an [`Arc`] so cloning a chunk never copies its samples.
/// Changing the component re-extracts its mesh.
#[derive(Component, Clone)]
#[require(Transform)]
pub struct SurfaceChunk {
    pub source: ChunkSource,
    pub grid: Grid3,
    pub algorithm: Algorithm,
}

impl SurfaceChunk {
    /// Creates a chunk that samples `field` over `grid`.
    pub fn from_field(field: Arc<CompiledFunction>, grid: Grid3) -> Self {
        Self {
            source: ChunkSource::Field(field),
            grid,
            algorithm: Algorithm::default(),
        }
    }

    /// Creates a chunk over values that were sampled beforehand.
    ///
    /// # Panics
    /// Panics (in debug) if the shape of `samples` doesn't match the grid resolution.
    pub fn from_samples(samples: Arc<Array3<Value>>, grid: Grid3) -> Self {
        let [rx, ry, rz] = grid.resolution();
        debug_assert_eq!(samples.dim(), (rx, ry, rz));
        Self {
            source: ChunkSource::Samples(samples),
            grid,
            algorithm: Algorithm::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Runs the extraction synchronously.
    pub fn extract(&self) -> SurfaceMesh {
        match &self.source {
            ChunkSource::Field(field) => {
                extract_isosurface(field.as_ref(), self.algorithm, &self.grid)
            }
            ChunkSource::Samples(samples) => {
                let mut mesh = SurfaceMesh::new();
                nielson_dual_from_samples(samples, self.algorithm, &self.grid, &mut mesh);
                mesh
            }
        }
    }
}

/// Triangulated render data, ready to move into a Bevy mesh.
///
/// Bevy treats counter-clockwise triangles as front faces with normals pointing out of
/// the solid, while extracted faces are wound so their normals point towards the
/// inside. Both are flipped here.
#[derive(Debug, Default, Clone)]
pub struct GeneratedMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl GeneratedMesh {
    pub fn from_mesh(mut mesh: SurfaceMesh) -> Self {
        mesh.compute_normals();
        let mut indices = mesh.triangulate();
        for triangle in indices.chunks_exact_mut(3) {
            triangle.swap(1, 2);
        }
        Self {
            positions: mesh.positions(),
            normals: mesh.normals().into_iter().map(|[x, y, z]| [-x, -y, -z]).collect(),
            indices,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn into_bevy_mesh(self) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD,
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals);
        mesh.insert_indices(Indices::U32(self.indices));
        mesh
    }
}

/// Bevy plugin that meshes every added or changed [`SurfaceChunk`] and attaches the
/// result as a [`Mesh3d`].
///
/// Extraction runs inside the system, on the frame the chunk changes.
pub struct DualContoursPlugin;

impl Plugin for DualContoursPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, mesh_surface_chunks);
    }
}

/// Extracts each added or changed [`SurfaceChunk`] and inserts its [`Mesh3d`],
/// replacing any previous one.
pub fn mesh_surface_chunks(
    mut commands: Commands,
    query: Query<(Entity, &SurfaceChunk), Changed<SurfaceChunk>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    for (entity, chunk) in query.iter() {
        let generated = GeneratedMesh::from_mesh(chunk.extract());
        debug!(
            "chunk {entity} meshed: {} triangles",
            generated.indices.len() / 3
        );
        commands
            .entity(entity)
            .insert(Mesh3d(meshes.add(generated.into_bevy_mesh())));
    }
}
