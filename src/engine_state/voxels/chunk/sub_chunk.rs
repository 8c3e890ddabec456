//! # Sub-chunk
//!
//! One vertical section of a chunk: a block grid plus the mesh built from it.
//!
//! ## State Machine
//!
//! ```text
//! BlocksPopulated ──request──▶ MeshRequested ──completion──▶ MeshReady
//!                                   ▲                            │
//!                                   └─────────re-request─────────┘
//! ```
//!
//! A sub-chunk only comes into existence once its blocks are generated, so
//! there is no separate "empty" state. While `MeshRequested` a background job
//! holds a shared reference to the grid; the owning chunk must not be freed
//! until the state leaves `MeshRequested`.

use std::sync::Arc;

use crate::engine_state::rendering::{meshing::MeshData, ChunkModel};

use super::block_grid::BlockGrid;

/// Lifecycle of a sub-chunk's mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubChunkState {
    /// Blocks are present, no mesh has been built yet.
    BlocksPopulated,
    /// A background mesh build targets this sub-chunk.
    MeshRequested,
    /// The last requested build has completed.
    MeshReady,
}

/// A fixed-height vertical segment of a chunk.
#[derive(Debug)]
pub struct SubChunk {
    level: usize,
    blocks: Arc<BlockGrid>,
    state: SubChunkState,
    mesh_dirty: bool,
    mesh: Option<MeshData>,
    model: Option<ChunkModel>,
}

impl SubChunk {
    /// Wraps a freshly generated grid as the sub-chunk at `level`.
    pub fn new(level: usize, blocks: BlockGrid) -> Self {
        SubChunk {
            level,
            blocks: Arc::new(blocks),
            state: SubChunkState::BlocksPopulated,
            mesh_dirty: false,
            mesh: None,
            model: None,
        }
    }

    /// Vertical index inside the owning chunk.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The finalized block grid.
    pub fn blocks(&self) -> &BlockGrid {
        &self.blocks
    }

    /// A shared handle to the grid for a background job.
    pub(crate) fn shared_blocks(&self) -> Arc<BlockGrid> {
        Arc::clone(&self.blocks)
    }

    /// Current mesh state.
    pub fn state(&self) -> SubChunkState {
        self.state
    }

    /// `true` while a background mesh build is outstanding.
    pub fn is_generating(&self) -> bool {
        self.state == SubChunkState::MeshRequested
    }

    /// `true` when a rebuild was refused during an outstanding build.
    pub fn is_mesh_dirty(&self) -> bool {
        self.mesh_dirty
    }

    /// The renderer-ready geometry of the last applied build.
    pub fn model(&self) -> Option<&ChunkModel> {
        self.model.as_ref()
    }

    /// `true` when a completed payload is waiting for [`SubChunk::generate_models`].
    pub fn has_pending_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    pub(crate) fn begin_mesh_build(&mut self) {
        debug_assert!(
            !self.is_generating(),
            "mesh build requested for sub-chunk {} while one is in flight",
            self.level
        );
        self.state = SubChunkState::MeshRequested;
        self.mesh_dirty = false;
    }

    pub(crate) fn complete_mesh_build(&mut self, mesh: MeshData) {
        debug_assert!(self.is_generating(), "mesh completion without a request");
        self.state = SubChunkState::MeshReady;
        self.mesh = Some(mesh);
    }

    pub(crate) fn discard_pending_mesh(&mut self) {
        self.mesh = None;
    }

    pub(crate) fn mark_mesh_dirty(&mut self) {
        self.mesh_dirty = true;
    }

    pub(crate) fn take_mesh_dirty(&mut self) -> bool {
        std::mem::take(&mut self.mesh_dirty)
    }

    /// Converts the completed mesh payload into renderer-ready buffers.
    ///
    /// Only acts once the build has completed and a payload is present; the
    /// payload is consumed.
    ///
    /// # Returns
    /// `true` if a new model replaced the previous one.
    pub fn generate_models(&mut self) -> bool {
        if self.is_generating() {
            return false;
        }
        match self.mesh.take() {
            Some(mesh) => {
                self.model = Some(ChunkModel::from_mesh(mesh));
                true
            }
            None => false,
        }
    }
}
