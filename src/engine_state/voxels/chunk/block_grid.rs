//! # Block Grid
//!
//! The dense block storage of one sub-chunk: `CHUNK_WIDTH × SUB_CHUNK_HEIGHT ×
//! CHUNK_WIDTH` blocks in a single boxed slice. A grid is written once by the
//! block-generation job that creates it and is read-only afterwards, which is
//! what lets mesh jobs on worker threads share it through an `Arc`.

use std::fmt;

use crate::engine_state::voxels::block::{block_type::BlockType, Block};

use super::{CHUNK_WIDTH, SUB_CHUNK_HEIGHT, SUB_CHUNK_VOLUME};

/// Dense 3D array of blocks for one sub-chunk.
///
/// Blocks are laid out x-fastest, then z, then y, so one horizontal layer is
/// contiguous.
#[derive(Clone, PartialEq, Eq)]
pub struct BlockGrid {
    blocks: Box<[Block]>,
}

impl BlockGrid {
    /// Creates a grid filled with air.
    pub fn empty() -> Self {
        BlockGrid {
            blocks: vec![Block::AIR; SUB_CHUNK_VOLUME].into_boxed_slice(),
        }
    }

    #[inline]
    fn index(x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < CHUNK_WIDTH && y < SUB_CHUNK_HEIGHT && z < CHUNK_WIDTH,
            "block ({x}, {y}, {z}) outside sub-chunk grid"
        );
        x + z * CHUNK_WIDTH + y * CHUNK_WIDTH * CHUNK_WIDTH
    }

    /// Gets the block at grid-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[Self::index(x, y, z)]
    }

    /// Sets the block at grid-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn set(&mut self, x: usize, y: usize, z: usize, block_type: BlockType) {
        self.blocks[Self::index(x, y, z)] = Block::new(block_type);
    }

    /// Gets a block by signed coordinates, returning `None` outside the grid.
    pub fn get_checked(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        let in_range = |v: i32, max: usize| v >= 0 && (v as usize) < max;
        if in_range(x, CHUNK_WIDTH) && in_range(y, SUB_CHUNK_HEIGHT) && in_range(z, CHUNK_WIDTH) {
            Some(self.get(x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    /// Checks if the block at the specified coordinates is solid.
    pub fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.get(x, y, z).is_solid()
    }

    /// Number of non-air blocks.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_solid()).count()
    }

    /// Returns `true` if every block is air.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|block| !block.is_solid())
    }

    /// The grid as raw bytes, one per block.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blocks[..])
    }
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for BlockGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockGrid")
            .field("solid", &self.solid_count())
            .field("volume", &SUB_CHUNK_VOLUME)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_air() {
        let grid = BlockGrid::empty();
        assert!(grid.is_empty());
        assert_eq!(grid.as_bytes().len(), SUB_CHUNK_VOLUME);
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = BlockGrid::empty();
        grid.set(1, 2, 3, BlockType::STONE);
        grid.set(CHUNK_WIDTH - 1, SUB_CHUNK_HEIGHT - 1, CHUNK_WIDTH - 1, BlockType::GRASS);

        assert_eq!(grid.get(1, 2, 3).get_type(), BlockType::STONE);
        assert_eq!(
            grid.get(CHUNK_WIDTH - 1, SUB_CHUNK_HEIGHT - 1, CHUNK_WIDTH - 1).get_type(),
            BlockType::GRASS
        );
        assert_eq!(grid.get(3, 2, 1).get_type(), BlockType::AIR);
        assert_eq!(grid.solid_count(), 2);
    }

    #[test]
    #[should_panic(expected = "outside sub-chunk grid")]
    fn test_unchecked_access_past_row_end_panics() {
        // (CHUNK_WIDTH, 0, 0) would alias (0, 0, 1) without the bounds check
        let grid = BlockGrid::empty();
        grid.get(CHUNK_WIDTH, 0, 0);
    }

    #[test]
    #[should_panic(expected = "outside sub-chunk grid")]
    fn test_unchecked_write_past_layer_end_panics() {
        let mut grid = BlockGrid::empty();
        grid.set(0, 0, CHUNK_WIDTH, BlockType::STONE);
    }

    #[test]
    fn test_checked_access_outside_grid() {
        let mut grid = BlockGrid::empty();
        grid.set(0, 0, 0, BlockType::DIRT);

        assert_eq!(grid.get_checked(0, 0, 0), Some(Block::new(BlockType::DIRT)));
        assert_eq!(grid.get_checked(-1, 0, 0), None);
        assert_eq!(grid.get_checked(0, SUB_CHUNK_HEIGHT as i32, 0), None);
        assert_eq!(grid.get_checked(0, 0, CHUNK_WIDTH as i32), None);
    }
}
