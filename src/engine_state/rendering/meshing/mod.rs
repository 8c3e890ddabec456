//! Mesh generation for voxel rendering.
//!
//! This module converts sub-chunk block grids into vertex and index buffers.
//!
//! # Architecture
//! - [`MeshInput`]: The grids a mesh job reads, captured at request time
//! - [`MeshData`]: The vertex and index buffers a mesh job produces
//! - [`Face`]: A single quad covering one side of one block
//!
//! # Performance Considerations
//! - Faces between two solid blocks are never emitted, including across
//!   sub-chunk and chunk borders when the neighbouring grid is resident
//! - Meshing only reads shared immutable grids, so it runs on worker threads
//!   without locking

mod face;
mod mesh;

pub use face::Face;
pub use mesh::{MeshData, MeshInput};
