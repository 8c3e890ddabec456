//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world
//! and the conversion from their compact stored form.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant is the value stored in a [`Block`](super::Block). The
/// `FromPrimitive` derive provides the reverse conversion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// An air block, which is non-solid and transparent.
    #[default]
    AIR,

    /// Plain dirt, found in the layers just under the surface.
    DIRT,

    /// A grass block: grass-top tile above, grass-side tile around, dirt below.
    GRASS,

    /// Stone, everything deeper than the dirt layers.
    STONE,

    /// Marks the position of a player, placed by the game rather than the terrain.
    PLAYER,
}

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Returns
    /// `None` if the value does not name a block type.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(btype)
    }

    /// Returns `true` for every block that occludes its neighbours' faces.
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_round_trip() {
        for block_type in [
            BlockType::AIR,
            BlockType::DIRT,
            BlockType::GRASS,
            BlockType::STONE,
            BlockType::PLAYER,
        ] {
            assert_eq!(BlockType::from_int(block_type as BlockTypeSize), Some(block_type));
        }
        assert_eq!(BlockType::from_int(200), None);
    }

    #[test]
    fn test_only_air_is_transparent() {
        assert!(!BlockType::AIR.is_solid());
        assert!(BlockType::DIRT.is_solid());
        assert!(BlockType::PLAYER.is_solid());
    }
}
