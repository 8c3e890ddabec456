//! Mesh data structures and the face-culling mesher.
//!
//! A mesh job receives a [`MeshInput`]: the target sub-chunk's grid plus the
//! grids bordering each of its six sides, all captured as shared read-only
//! handles when the job was requested. A face is emitted for every solid block
//! side that touches a non-solid block; a missing neighbour grid counts as air.

use std::sync::Arc;

use cgmath::{Point2, Point3};

use crate::engine_state::voxels::{
    block::block_side::BlockSide,
    chunk::{BlockGrid, CHUNK_WIDTH, SUB_CHUNK_HEIGHT},
};

use super::face::Face;
use crate::engine_state::rendering::Vertex;

/// Everything a mesh job reads.
#[derive(Clone, Debug)]
pub struct MeshInput {
    /// Chunk coordinate of the owning chunk.
    pub position: Point2<i32>,
    /// Vertical index of the target sub-chunk.
    pub level: usize,
    /// The grid being meshed.
    pub grid: Arc<BlockGrid>,
    /// Bordering grids indexed by `BlockSide as usize`.
    pub neighbors: [Option<Arc<BlockGrid>>; 6],
}

impl MeshInput {
    /// A mesh input with no resident neighbours.
    pub fn isolated(position: Point2<i32>, level: usize, grid: Arc<BlockGrid>) -> Self {
        MeshInput {
            position,
            level,
            grid,
            neighbors: Default::default(),
        }
    }

    /// Is the block one step past `side` of `(x, y, z)` solid?
    fn is_neighbor_solid(&self, x: usize, y: usize, z: usize, side: BlockSide) -> bool {
        let (dx, dy, dz) = side.offset();
        let (nx, ny, nz) = (x as i32 + dx, y as i32 + dy, z as i32 + dz);

        if let Some(block) = self.grid.get_checked(nx, ny, nz) {
            return block.is_solid();
        }

        match &self.neighbors[side as usize] {
            Some(neighbor) => neighbor.is_solid(
                nx.rem_euclid(CHUNK_WIDTH as i32) as usize,
                ny.rem_euclid(SUB_CHUNK_HEIGHT as i32) as usize,
                nz.rem_euclid(CHUNK_WIDTH as i32) as usize,
            ),
            None => false,
        }
    }
}

/// Vertex and index buffers produced by a mesh job.
///
/// This is the payload carried from the worker back to the foreground; it is
/// turned into a [`ChunkModel`](crate::engine_state::rendering::ChunkModel)
/// when consumed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeshData {
    /// The vertex data, four per face
    pub vertices: Vec<Vertex>,
    /// The index data, six per face
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Builds the culled mesh of one sub-chunk.
    pub fn build(input: &MeshInput) -> Self {
        let mut mesh = MeshData::default();
        let world_offset = Point3::new(
            input.position.x * CHUNK_WIDTH as i32,
            (input.level * SUB_CHUNK_HEIGHT) as i32,
            input.position.y * CHUNK_WIDTH as i32,
        );

        for y in 0..SUB_CHUNK_HEIGHT {
            for z in 0..CHUNK_WIDTH {
                for x in 0..CHUNK_WIDTH {
                    let block = input.grid.get(x, y, z);
                    if !block.is_solid() {
                        continue;
                    }
                    for side in BlockSide::all() {
                        if input.is_neighbor_solid(x, y, z, side) {
                            continue;
                        }
                        let face = Face::new(x, y, z, block.texture_index(side), side);
                        mesh.push_face(&face, world_offset);
                    }
                }
            }
        }

        mesh
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Returns `true` if the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn push_face(&mut self, face: &Face, world_offset: Point3<i32>) {
        let faces_generated = self.face_count() as u32;
        self.vertices
            .extend(Self::generate_face_vertices(face, world_offset));
        self.indices
            .extend(Self::generate_face_indices(faces_generated));
    }

    /// Generates the four corner vertices of a face.
    ///
    /// The vertices are ordered in a way that forms two triangles when combined
    /// with the indices from `generate_face_indices`.
    pub fn generate_face_vertices(face: &Face, world_offset: Point3<i32>) -> [Vertex; 4] {
        let to_world = |corner: Point3<usize>| {
            Point3::new(
                world_offset.x + corner.x as i32,
                world_offset.y + corner.y as i32,
                world_offset.z + corner.z as i32,
            )
        };
        let side = face.block_side as u32;

        [
            Vertex::new(to_world(face.ll), face.texture_index, 0, 1, side),
            Vertex::new(to_world(face.lr), face.texture_index, 1, 1, side),
            Vertex::new(to_world(face.ul), face.texture_index, 0, 0, side),
            Vertex::new(to_world(face.ur), face.texture_index, 1, 0, side),
        ]
    }

    /// Generates index data for a face, adjusted by the number of previously generated faces.
    pub fn generate_face_indices(num_faces_generated: u32) -> [u32; 6] {
        [
            num_faces_generated * 4,
            1 + num_faces_generated * 4,
            3 + num_faces_generated * 4,
            num_faces_generated * 4,
            3 + num_faces_generated * 4,
            2 + num_faces_generated * 4,
        ]
    }
}
