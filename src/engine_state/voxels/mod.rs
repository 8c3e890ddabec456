//! # Voxel Streaming Core
//!
//! Representation, generation and streaming of the voxel world around a
//! moving viewer.
//!
//! ## Architecture
//!
//! * **Block**: individual voxel types and their per-side texture tiles
//! * **Chunk**: columns of sub-chunks, each a dense block grid plus its mesh
//! * **Terrain**: the procedural height map blocks are sampled from
//! * **Generator**: worker pools producing block grids and meshes
//! * **World**: the sliding window that requests, inserts and evicts chunks
//!
//! ## Data Flow
//!
//! 1. The window shifts and requests blocks for the coordinates it exposed
//! 2. Completed chunks are inserted and their sub-chunks are queued for meshing
//! 3. Completed meshes become models the renderer can pick up
//! 4. Evicted chunks are freed once no mesh job refers to them
//!
//! ## Thread Safety
//!
//! Only jobs cross threads. A job owns its inputs (block grids are shared as
//! immutable `Arc`s) and sends its output back over a channel; the window and
//! the chunk arena are touched by the foreground thread alone.

pub mod block;
pub mod chunk;
pub mod generator;
pub mod tasks;
pub mod terrain;
pub mod world;
