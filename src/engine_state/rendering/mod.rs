//! # Rendering Module
//!
//! CPU-side geometry for the external renderer: the vertex format, the mesher
//! that runs on worker threads, and the renderer-ready [`ChunkModel`] each
//! sub-chunk exposes once its mesh has been consumed. Draw calls and GPU
//! uploads happen outside this crate.

pub mod meshing;
pub mod model;
pub mod tasks;
pub mod vertex;

pub use model::ChunkModel;
pub use vertex::Vertex;
