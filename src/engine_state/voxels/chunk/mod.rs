//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a vertical column of sub-chunks
//! at one `(x, z)` chunk coordinate, each holding a dense block grid and an
//! independently rebuildable mesh.
//!
//! ## Dimensions
//!
//! A chunk is `CHUNK_WIDTH` blocks wide along x and z and
//! `SUB_CHUNKS_PER_CHUNK × SUB_CHUNK_HEIGHT` blocks tall. All dimensions are
//! compile-time constants so grids are plain fixed-size allocations.

use cgmath::Point2;

use crate::core::error::{Result, StreamError};

pub mod block_grid;
pub mod sub_chunk;

pub use block_grid::BlockGrid;
pub use sub_chunk::{SubChunk, SubChunkState};

/// Width and depth of a chunk in blocks.
pub const CHUNK_WIDTH: usize = 16;
/// Height of one sub-chunk in blocks.
pub const SUB_CHUNK_HEIGHT: usize = 16;
/// Number of sub-chunks stacked in a chunk.
pub const SUB_CHUNKS_PER_CHUNK: usize = 4;
/// Height of the world in blocks.
pub const WORLD_HEIGHT: usize = SUB_CHUNK_HEIGHT * SUB_CHUNKS_PER_CHUNK;
/// Number of blocks in one sub-chunk grid.
pub const SUB_CHUNK_VOLUME: usize = CHUNK_WIDTH * SUB_CHUNK_HEIGHT * CHUNK_WIDTH;

/// A column of sub-chunks at a fixed chunk coordinate.
#[derive(Debug)]
pub struct Chunk {
    position: Point2<i32>,
    sub_chunks: Vec<SubChunk>,
    getting_deleted: bool,
}

impl Chunk {
    /// Builds a chunk from its generated grids, bottom level first.
    ///
    /// # Panics
    /// Panics if `grids` does not hold exactly `SUB_CHUNKS_PER_CHUNK` grids.
    pub fn new(position: Point2<i32>, grids: Vec<BlockGrid>) -> Self {
        assert_eq!(
            grids.len(),
            SUB_CHUNKS_PER_CHUNK,
            "chunk ({}, {}) needs one grid per sub-chunk",
            position.x,
            position.y
        );
        Chunk {
            position,
            sub_chunks: grids
                .into_iter()
                .enumerate()
                .map(|(level, grid)| SubChunk::new(level, grid))
                .collect(),
            getting_deleted: false,
        }
    }

    /// Chunk coordinate; `position().y` is the z axis.
    pub fn position(&self) -> Point2<i32> {
        self.position
    }

    /// Gets the sub-chunk at a vertical level.
    ///
    /// # Panics
    /// Panics if `level` is outside `[0, SUB_CHUNKS_PER_CHUNK)`; asking for a
    /// level that does not exist is a programming error.
    pub fn sub_chunk(&self, level: usize) -> &SubChunk {
        match self.sub_chunks.get(level) {
            Some(sub_chunk) => sub_chunk,
            None => panic!(
                "sub-chunk level {level} out of range (height {SUB_CHUNKS_PER_CHUNK})"
            ),
        }
    }

    /// Mutable access to the sub-chunk at a vertical level.
    ///
    /// # Panics
    /// Panics if `level` is out of range.
    pub fn sub_chunk_mut(&mut self, level: usize) -> &mut SubChunk {
        match self.sub_chunks.get_mut(level) {
            Some(sub_chunk) => sub_chunk,
            None => panic!(
                "sub-chunk level {level} out of range (height {SUB_CHUNKS_PER_CHUNK})"
            ),
        }
    }

    /// Bounds-checked sub-chunk lookup for untrusted levels.
    pub fn try_sub_chunk(&self, level: usize) -> Result<&SubChunk> {
        self.sub_chunks
            .get(level)
            .ok_or(StreamError::SubChunkOutOfRange {
                level,
                height: SUB_CHUNKS_PER_CHUNK,
            })
    }

    /// All sub-chunks, bottom first.
    pub fn sub_chunks(&self) -> &[SubChunk] {
        &self.sub_chunks
    }

    /// The finalized block grid of one level, for collision building.
    pub fn blocks(&self, level: usize) -> &BlockGrid {
        self.sub_chunk(level).blocks()
    }

    /// `true` once the chunk has been evicted from the window.
    pub fn is_getting_deleted(&self) -> bool {
        self.getting_deleted
    }

    pub(crate) fn mark_getting_deleted(&mut self) {
        self.getting_deleted = true;
    }

    /// `true` while any sub-chunk has a mesh build outstanding.
    pub fn is_generating(&self) -> bool {
        self.sub_chunks.iter().any(SubChunk::is_generating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_chunk() -> Chunk {
        Chunk::new(
            Point2::new(3, -2),
            (0..SUB_CHUNKS_PER_CHUNK).map(|_| BlockGrid::empty()).collect(),
        )
    }

    #[test]
    fn test_levels_are_numbered_bottom_up() {
        let chunk = empty_chunk();
        assert_eq!(chunk.position(), Point2::new(3, -2));
        for (level, sub_chunk) in chunk.sub_chunks().iter().enumerate() {
            assert_eq!(sub_chunk.level(), level);
        }
        assert!(!chunk.is_getting_deleted());
        assert!(!chunk.is_generating());
    }

    #[test]
    fn test_try_sub_chunk_out_of_range() {
        let chunk = empty_chunk();
        assert!(chunk.try_sub_chunk(SUB_CHUNKS_PER_CHUNK - 1).is_ok());
        assert!(matches!(
            chunk.try_sub_chunk(SUB_CHUNKS_PER_CHUNK),
            Err(StreamError::SubChunkOutOfRange { level, .. }) if level == SUB_CHUNKS_PER_CHUNK
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_sub_chunk_out_of_range_panics() {
        let chunk = empty_chunk();
        let _ = chunk.sub_chunk(SUB_CHUNKS_PER_CHUNK);
    }

    #[test]
    fn test_generating_tracks_any_level() {
        let mut chunk = empty_chunk();
        chunk.sub_chunk_mut(1).begin_mesh_build();
        assert!(chunk.is_generating());
    }
}
