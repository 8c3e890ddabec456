//! Renderer-ready geometry.

use super::meshing::MeshData;

/// Geometry of one sub-chunk in upload-ready form.
///
/// The renderer treats the byte buffers as opaque vertex and index buffers;
/// the vertex layout is described on [`Vertex`](super::Vertex).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChunkModel {
    vertex_bytes: Vec<u8>,
    index_bytes: Vec<u8>,
    vertex_count: u32,
    index_count: u32,
}

impl ChunkModel {
    /// Consumes a completed mesh payload.
    pub fn from_mesh(mesh: MeshData) -> Self {
        ChunkModel {
            vertex_bytes: bytemuck::cast_slice(&mesh.vertices[..]).to_vec(),
            index_bytes: bytemuck::cast_slice(&mesh.indices[..]).to_vec(),
            vertex_count: mesh.vertices.len() as u32,
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Raw vertex buffer contents.
    pub fn vertex_bytes(&self) -> &[u8] {
        &self.vertex_bytes
    }

    /// Raw `u32` index buffer contents.
    pub fn index_bytes(&self) -> &[u8] {
        &self.index_bytes
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Number of indices to draw.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Returns `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.index_count == 0
    }
}
