//! # Mesh Merger
//!
//! Concatenates positioned faces into a single indexed triangle list.
//!
//! - 4 vertices and 6 indices per face, no vertex sharing between faces
//! - Indices are renumbered so each face points at its own vertices
//! - Bounding box and sphere are computed once the buffer is complete

use bytemuck::{Pod, Zeroable};

use crate::bounds::{Aabb, BoundingSphere};
use crate::face::{FaceInstance, QUAD_INDICES, VERTICES_PER_FACE};
use crate::math::Vec3;

// =============================================================================
// VERTEX FORMAT - Standard vertex buffer layout
// =============================================================================

/// Vertex for the terrain mesh - packed for GPU upload
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    /// Position in world space [x, y, z]
    pub position: [f32; 3],
    /// Normal direction [nx, ny, nz]
    pub normal: [f32; 3],
    /// Atlas UV coordinates [u, v], both in [0, 1]
    pub uv: [f32; 2],
}

#[cfg(feature = "gpu")]
impl TerrainVertex {
    /// Vertex buffer layout for WGPU
    pub const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,  // position
        1 => Float32x3,  // normal
        2 => Float32x2,  // uv
    ];

    /// Vertex buffer layout descriptor
    #[must_use]
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TerrainVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

// =============================================================================
// MESH OUTPUT - Final mesh ready for GPU
// =============================================================================

/// Complete terrain mesh (vertices + indices + bounds)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainMesh {
    vertices: Vec<TerrainVertex>,
    indices: Vec<u32>,
    bounds: Aabb,
    sphere: BoundingSphere,
}

impl TerrainMesh {
    /// Vertex buffer data
    #[must_use]
    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// Index buffer data (u32 for large meshes)
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Raw vertex bytes for a GPU buffer upload
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for a GPU buffer upload
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Axis-aligned bounds of all vertices
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Bounding sphere of all vertices
    #[must_use]
    pub const fn bounding_sphere(&self) -> &BoundingSphere {
        &self.sphere
    }

    /// Check if mesh is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get vertex count
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get face (quad) count
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }
}

/// Accumulates faces into one vertex/index buffer.
#[derive(Debug, Default)]
pub struct MeshMerger {
    vertices: Vec<TerrainVertex>,
    indices: Vec<u32>,
}

impl MeshMerger {
    /// Creates an empty merger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a merger with room for `faces` faces.
    #[must_use]
    pub fn with_capacity(faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(faces * VERTICES_PER_FACE),
            indices: Vec::with_capacity(faces * QUAD_INDICES.len()),
        }
    }

    /// Appends one face.
    #[allow(clippy::cast_possible_truncation)]
    pub fn push(&mut self, face: &FaceInstance) {
        debug_assert!(
            self.vertices.len() + VERTICES_PER_FACE <= u32::MAX as usize,
            "Index buffer overflow"
        );
        let base_vertex = self.vertices.len() as u32;

        for (position, uv) in face.positions.iter().zip(face.uvs) {
            self.vertices.push(TerrainVertex {
                position: position.to_array(),
                normal: face.normal.to_array(),
                uv: uv.to_array(),
            });
        }

        self.indices
            .extend(QUAD_INDICES.iter().map(|&i| base_vertex + i));
    }

    /// Finalises the buffers and computes bounds.
    #[must_use]
    pub fn finish(self) -> TerrainMesh {
        let positions = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let bounds = Aabb::from_points(positions.clone());
        let sphere = BoundingSphere::from_points(positions);

        tracing::debug!(
            vertices = self.vertices.len(),
            triangles = self.indices.len() / 3,
            radius = sphere.radius,
            "mesh merged"
        );

        TerrainMesh {
            vertices: self.vertices,
            indices: self.indices,
            bounds,
            sphere,
        }
    }

    /// Merges all `faces` into one mesh.
    ///
    /// An empty input yields an empty mesh.
    #[must_use]
    pub fn merge<'a, I>(faces: I) -> TerrainMesh
    where
        I: IntoIterator<Item = &'a FaceInstance>,
    {
        let faces = faces.into_iter();
        let mut merger = Self::with_capacity(faces.size_hint().0);
        for face in faces {
            merger.push(face);
        }
        merger.finish()
    }
}
