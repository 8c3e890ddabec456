//! # Chunk Generator
//!
//! Decouples procedural work from the per-tick window update. The generator
//! owns two worker pools, one per job type, and each pool owns a request and
//! a completion channel per worker:
//!
//! | Job | Request | Completion |
//! |---|---|---|
//! | blocks | chunk coordinate | populated [`Chunk`] |
//! | mesh | [`MeshTicket`] + [`MeshInput`] | [`MeshGenerated`] |
//!
//! All methods are called from the foreground thread and return immediately.
//!
//! ## Caller Obligations
//!
//! The generator does not de-duplicate block requests; the window must never
//! request a coordinate that is resident or already in flight. Mesh requests
//! are guarded by the sub-chunk's `generating` state, which
//! [`ChunkGenerator::request_mesh`] sets before the job is queued.

use std::sync::Arc;

use cgmath::Point2;
use log::trace;

use crate::core::{
    config::{GeneratorConfig, TerrainConfig},
    error::Result,
};
use crate::engine_state::{
    rendering::{
        meshing::MeshInput,
        tasks::mesh_generation_task::{MeshGenerated, MeshGenerationTask, MeshTicket},
    },
    task_management::TaskManager,
};

use super::{
    chunk::{Chunk, SubChunk},
    tasks::block_generation_task::BlockGenerationTask,
    terrain::TerrainGenerator,
};

/// Background producer of block grids and meshes.
pub struct ChunkGenerator {
    terrain: Arc<TerrainGenerator>,
    block_tasks: TaskManager<BlockGenerationTask>,
    mesh_tasks: TaskManager<MeshGenerationTask>,
    inline: bool,
}

impl ChunkGenerator {
    /// Starts the worker pools.
    ///
    /// # Errors
    /// Returns an IO error if a worker thread cannot be spawned.
    pub fn new(config: &GeneratorConfig, terrain: TerrainConfig) -> Result<Self> {
        Ok(ChunkGenerator {
            terrain: Arc::new(TerrainGenerator::new(terrain)),
            block_tasks: TaskManager::new(
                "blocks",
                config.block_workers,
                config.max_tasks_in_flight,
            )?,
            mesh_tasks: TaskManager::new("mesh", config.mesh_workers, config.max_tasks_in_flight)?,
            inline: config.is_inline(),
        })
    }

    /// The terrain sampler shared with the block workers.
    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    /// Enqueues block generation for chunk coordinate `(x, z)`.
    pub fn request_blocks(&mut self, x: i32, z: i32) {
        trace!("Requesting blocks for chunk ({x}, {z})");
        self.block_tasks.publish_task(BlockGenerationTask::new(
            Arc::clone(&self.terrain),
            Point2::new(x, z),
        ));
    }

    /// Enqueues a mesh build for a block-populated sub-chunk.
    ///
    /// The sub-chunk is marked as generating before the job is queued, so the
    /// caller sees "build in flight" as soon as this returns.
    pub fn request_mesh(&mut self, sub_chunk: &mut SubChunk, ticket: MeshTicket, input: MeshInput) {
        debug_assert_eq!(sub_chunk.level(), ticket.level);
        sub_chunk.begin_mesh_build();
        self.mesh_tasks
            .publish_task(MeshGenerationTask::new(ticket, input));
    }

    /// Drains every completed block job. Each call returns only what
    /// completed since the previous call.
    pub fn pop_chunks_generated(&mut self) -> Vec<Chunk> {
        self.block_tasks.drain_completed()
    }

    /// Drains every completed mesh job. Each call returns only what completed
    /// since the previous call.
    pub fn pop_meshes_generated(&mut self) -> Vec<MeshGenerated> {
        self.mesh_tasks.drain_completed()
    }

    /// Runs all queued jobs on the calling thread, blocks before meshes.
    ///
    /// Meant for inline mode; with worker threads it also runs any backlog
    /// that is waiting for a free worker.
    ///
    /// # Returns
    /// The number of jobs executed.
    pub fn run_pending_inline(&mut self) -> usize {
        self.block_tasks.run_pending_inline() + self.mesh_tasks.run_pending_inline()
    }

    /// Runs the backlog of every pool that has no worker threads.
    ///
    /// Pools with workers are left alone, so a config with block workers and
    /// inline meshing (or the reverse) still makes progress when the caller
    /// steps this once per tick.
    ///
    /// # Returns
    /// The number of jobs executed.
    pub fn run_inline_pools(&mut self) -> usize {
        let mut executed = 0;
        if self.block_tasks.worker_count() == 0 {
            executed += self.block_tasks.run_pending_inline();
        }
        if self.mesh_tasks.worker_count() == 0 {
            executed += self.mesh_tasks.run_pending_inline();
        }
        executed
    }

    /// `true` when neither pool has worker threads.
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Block jobs requested and not yet drained.
    pub fn pending_block_jobs(&self) -> usize {
        self.block_tasks.pending_count()
    }

    /// Mesh jobs requested and not yet drained.
    pub fn pending_mesh_jobs(&self) -> usize {
        self.mesh_tasks.pending_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::SUB_CHUNKS_PER_CHUNK;
    use crate::engine_state::voxels::world::ChunkArena;

    #[test]
    fn test_inline_block_generation() {
        let mut generator =
            ChunkGenerator::new(&GeneratorConfig::inline(), TerrainConfig::default()).unwrap();
        assert!(generator.is_inline());
        generator.request_blocks(1, 2);
        generator.request_blocks(-1, 0);
        assert_eq!(generator.pending_block_jobs(), 2);
        assert!(generator.pop_chunks_generated().is_empty());

        assert_eq!(generator.run_pending_inline(), 2);
        let chunks = generator.pop_chunks_generated();
        let positions: Vec<_> = chunks.iter().map(Chunk::position).collect();
        assert_eq!(positions, vec![Point2::new(1, 2), Point2::new(-1, 0)]);
        assert!(chunks
            .iter()
            .all(|chunk| chunk.sub_chunks().len() == SUB_CHUNKS_PER_CHUNK));

        // draining is not restartable
        assert!(generator.pop_chunks_generated().is_empty());
    }

    #[test]
    fn test_mesh_request_marks_generating_immediately() {
        let mut generator =
            ChunkGenerator::new(&GeneratorConfig::inline(), TerrainConfig::default()).unwrap();
        let terrain = TerrainGenerator::new(TerrainConfig::default());
        let position = Point2::new(0, 0);
        let mut arena = ChunkArena::new();
        let handle = arena.insert(Chunk::new(position, terrain.generate_chunk(position)));

        let chunk = arena.get_mut(handle).unwrap();
        let sub_chunk = chunk.sub_chunk_mut(1);
        let input = MeshInput::isolated(position, 1, sub_chunk.shared_blocks());
        let ticket = MeshTicket {
            chunk: handle,
            level: 1,
        };
        generator.request_mesh(sub_chunk, ticket, input);
        assert!(sub_chunk.is_generating());

        generator.run_pending_inline();
        let meshes = generator.pop_meshes_generated();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].ticket, ticket);
        assert!(!meshes[0].mesh.is_empty());
    }

    #[test]
    fn test_inline_pool_runs_beside_worker_pool() {
        let config = GeneratorConfig {
            block_workers: 0,
            mesh_workers: 2,
            max_tasks_in_flight: 1,
        };
        let mut generator = ChunkGenerator::new(&config, TerrainConfig::default()).unwrap();
        assert!(!generator.is_inline());
        generator.request_blocks(3, -1);
        assert_eq!(generator.run_inline_pools(), 1);

        let chunks = generator.pop_chunks_generated();
        assert_eq!(chunks.len(), 1);
        let chunk = &chunks[0];
        let expected = generator.terrain().generate_chunk(Point2::new(3, -1));
        for (level, grid) in expected.iter().enumerate() {
            assert_eq!(chunk.blocks(level), grid);
        }
    }

    #[test]
    fn test_worker_pools_are_not_run_inline() {
        let config = GeneratorConfig {
            block_workers: 1,
            mesh_workers: 0,
            max_tasks_in_flight: 1,
        };
        let mut generator = ChunkGenerator::new(&config, TerrainConfig::default()).unwrap();
        generator.request_blocks(0, 0);
        generator.request_blocks(1, 0);
        // the second job waits for the worker, not for the caller
        assert_eq!(generator.run_inline_pools(), 0);
    }

    #[test]
    fn test_threaded_block_generation() {
        let config = GeneratorConfig {
            block_workers: 2,
            mesh_workers: 1,
            max_tasks_in_flight: 2,
        };
        let mut generator = ChunkGenerator::new(&config, TerrainConfig::default()).unwrap();
        for x in 0..5 {
            generator.request_blocks(x, 0);
        }

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(20);
        let mut chunks = Vec::new();
        while chunks.len() < 5 && std::time::Instant::now() < deadline {
            chunks.extend(generator.pop_chunks_generated());
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let mut xs: Vec<_> = chunks.iter().map(|chunk| chunk.position().x).collect();
        xs.sort_unstable();
        assert_eq!(xs, vec![0, 1, 2, 3, 4]);
        assert_eq!(generator.pending_block_jobs(), 0);
    }
}
