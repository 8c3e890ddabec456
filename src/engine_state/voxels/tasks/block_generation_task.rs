//! # Block Generation Task
//!
//! This module defines the `BlockGenerationTask` which fills every sub-chunk
//! grid of one chunk coordinate in a background thread. It is scheduled when
//! a coordinate enters the streaming window.

use std::sync::Arc;

use cgmath::Point2;
use log::trace;
use web_time::Instant;

use crate::engine_state::{
    task_management::task::Task,
    voxels::{chunk::Chunk, terrain::TerrainGenerator},
};

/// A task that generates the block data of one chunk.
pub struct BlockGenerationTask {
    /// Shared, immutable terrain sampler
    terrain: Arc<TerrainGenerator>,
    /// The coordinate of the chunk to generate
    position: Point2<i32>,
}

impl BlockGenerationTask {
    /// Creates a new block generation task.
    ///
    /// # Arguments
    /// * `terrain` - The terrain sampler shared by all block workers
    /// * `position` - The chunk coordinate to generate
    pub fn new(terrain: Arc<TerrainGenerator>, position: Point2<i32>) -> Self {
        BlockGenerationTask { terrain, position }
    }
}

impl Task for BlockGenerationTask {
    type Output = Chunk;

    /// Generates the chunk. The result is a fully populated chunk that is not
    /// yet part of any window.
    fn process(self) -> Chunk {
        let start = Instant::now();
        let chunk = Chunk::new(self.position, self.terrain.generate_chunk(self.position));
        trace!(
            "Generated blocks for chunk ({}, {}) in {:?}",
            self.position.x,
            self.position.y,
            start.elapsed()
        );
        chunk
    }
}
