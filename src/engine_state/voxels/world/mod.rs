//! # World Module
//!
//! The streaming window: a ring-addressed grid of chunk handles
//! ([`RingGrid`]), the arena that owns the chunks ([`ChunkArena`]) and the
//! orchestrator tying both to the background generator ([`CircularArray`]).

pub mod arena;
pub mod circular_array;
pub mod ring_grid;
pub mod stats;

pub use arena::{ChunkArena, ChunkHandle};
pub use circular_array::{world_to_chunk, CircularArray};
pub use ring_grid::{RingGrid, Shift};
pub use stats::StreamingStats;
