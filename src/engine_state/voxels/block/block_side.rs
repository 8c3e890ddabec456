//! # Block Side Module
//!
//! This module defines the six faces of a voxel block, which double as the
//! six directions to a neighbouring block or sub-chunk.

/// Represents the six possible faces of a voxel block.
///
/// Each variant is assigned a fixed integer so it can index per-side arrays
/// (texture tiles, neighbour grids).
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing negative X)
    FRONT = 0,

    /// The back face (facing positive X)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative Z)
    LEFT = 4,

    /// The right face (facing positive Z)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The four sides that point at horizontally adjacent chunks.
    pub fn horizontal() -> [BlockSide; 4] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Unit step `(dx, dy, dz)` from a block to the neighbour behind this face.
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            BlockSide::FRONT => (-1, 0, 0),
            BlockSide::BACK => (1, 0, 0),
            BlockSide::BOTTOM => (0, -1, 0),
            BlockSide::TOP => (0, 1, 0),
            BlockSide::LEFT => (0, 0, -1),
            BlockSide::RIGHT => (0, 0, 1),
        }
    }
}
