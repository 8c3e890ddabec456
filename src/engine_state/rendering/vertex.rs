//! Vertex data structures for voxel rendering.
//!
//! This module defines the vertex format produced by the mesher and handed to
//! the external renderer as raw bytes.

use cgmath::Point3;

/// A vertex of generated chunk geometry.
///
/// Represents a single point in world space with associated texture and face
/// information. The layout is fixed so the renderer can upload the bytes as is.
///
/// # Memory Layout
/// - Position: 3x i32 (12 bytes)
/// - Texture Index: u32 (4 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Side: u32 (4 bytes)
///
/// Total size: 28 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// X coordinate in world space
    x: i32,
    /// Y coordinate in world space
    y: i32,
    /// Z coordinate in world space
    z: i32,
    /// Index of the texture tile in the block atlas
    texture_index: u32,
    /// UV texture coordinates
    tex_coords: [f32; 2],
    /// The `BlockSide` this vertex's face points along
    side: u32,
}

impl Vertex {
    /// Creates a new vertex with the given parameters.
    ///
    /// # Arguments
    /// * `pos` - The 3D position of the vertex in world space
    /// * `texture_index` - Index of the tile in the block atlas
    /// * `u` - U texture coordinate, in blocks
    /// * `v` - V texture coordinate, in blocks
    /// * `side` - The face direction as a `BlockSide` discriminant
    pub fn new(pos: Point3<i32>, texture_index: usize, u: u8, v: u8, side: u32) -> Self {
        Vertex {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            texture_index: texture_index as u32,
            tex_coords: [u as f32, v as f32],
            side,
        }
    }

    /// World-space position of the vertex.
    pub fn position(&self) -> Point3<i32> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Atlas tile of the face this vertex belongs to.
    pub fn texture_index(&self) -> u32 {
        self.texture_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
    }
}
