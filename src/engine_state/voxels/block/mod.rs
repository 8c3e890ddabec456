//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and block data structures.

use block_side::BlockSide;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Texture tile indices in the block atlas.
pub mod tiles {
    /// Plain dirt.
    pub const DIRT: usize = 0;
    /// Top of a grass block.
    pub const GRASS_TOP: usize = 1;
    /// Side of a grass block.
    pub const GRASS_SIDE: usize = 2;
    /// Stone.
    pub const STONE: usize = 3;
    /// Player marker.
    pub const PLAYER: usize = 4;
}

/// Maps each block type to its texture tile for each face.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array is indexed by `BlockSide` as a `usize`:
/// [Front, Back, Bottom, Top, Left, Right]
pub static BLOCK_TYPE_TO_TEXTURE_INDICES: [[usize; 6]; 5] = [
    [0, 0, 0, 0, 0, 0], // AIR (never meshed)
    [tiles::DIRT; 6],   // DIRT
    [
        tiles::GRASS_SIDE,
        tiles::GRASS_SIDE,
        tiles::DIRT,
        tiles::GRASS_TOP,
        tiles::GRASS_SIDE,
        tiles::GRASS_SIDE,
    ], // GRASS
    [tiles::STONE; 6],  // STONE
    [tiles::PLAYER; 6], // PLAYER
];

/// Represents a single voxel block in the world.
///
/// This is a lightweight structure that stores only the block type, so a
/// block has no identity beyond its position in a grid.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute and `Pod` derive let a grid of blocks be viewed
/// as raw bytes. The block type is stored as a compact `BlockTypeSize`.
#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// An air block.
    pub const AIR: Block = Block { block_type: 0 };

    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Returns the block's type. Unknown stored values read back as air.
    pub fn get_type(&self) -> BlockType {
        BlockType::from_int(self.block_type).unwrap_or_default()
    }

    /// Returns `true` when this block hides its neighbours' faces.
    pub fn is_solid(&self) -> bool {
        self.get_type().is_solid()
    }

    /// Gets the texture tile of one face of this block.
    pub fn texture_index(&self, side: BlockSide) -> usize {
        BLOCK_TYPE_TO_TEXTURE_INDICES[self.get_type() as usize][side as usize]
    }
}
