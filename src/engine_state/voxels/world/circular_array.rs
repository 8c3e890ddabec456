//! # Circular Array
//!
//! The sliding window of resident chunks and the only code that talks to the
//! [`ChunkGenerator`]. It decides which chunks to evict, which coordinates to
//! request and which completed background work to fold back into live state.
//!
//! ## Ownership
//!
//! Every chunk lives in the [`ChunkArena`]. The window's [`RingGrid`] holds
//! handles of live chunks only; evicted chunks stay in the arena, listed in
//! `to_delete`, until none of their sub-chunks has a mesh build outstanding.
//! Mesh jobs carry the handle they were requested for, so a completion can
//! always be matched to its chunk and recognised as stale.
//!
//! ## Per-tick Order
//!
//! [`CircularArray::update`] sweeps the pending-delete list, then applies
//! block completions, then mesh completions.

use std::collections::HashSet;

use cgmath::{Point2, Point3};
use log::{debug, info, trace, warn};
use web_time::Duration;

use crate::core::{config::StreamingConfig, error::Result};
use crate::engine_state::rendering::{
    meshing::MeshInput,
    tasks::mesh_generation_task::{MeshGenerated, MeshTicket},
    ChunkModel,
};
use crate::engine_state::voxels::{
    block::block_side::BlockSide,
    chunk::{Chunk, CHUNK_WIDTH, SUB_CHUNKS_PER_CHUNK},
    generator::ChunkGenerator,
};

use super::{
    arena::{ChunkArena, ChunkHandle},
    ring_grid::{RingGrid, Shift},
    stats::StreamingStats,
};

/// Maps a world-space position to the coordinate of the chunk containing it.
pub fn world_to_chunk(position: Point3<f32>) -> Point2<i32> {
    let width = CHUNK_WIDTH as f32;
    Point2::new(
        (position.x / width).floor() as i32,
        (position.z / width).floor() as i32,
    )
}

/// Fixed-size window of chunks around the viewer.
pub struct CircularArray {
    grid: RingGrid<ChunkHandle>,
    arena: ChunkArena,
    to_delete: Vec<ChunkHandle>,
    in_flight: HashSet<(i32, i32)>,
    generator: ChunkGenerator,
    changed: Vec<Point2<i32>>,
    evicting: Vec<Point2<i32>>,
    evicted: Vec<Point2<i32>>,
    stats: StreamingStats,
}

impl CircularArray {
    /// Validates `config`, starts the generator and requests every
    /// coordinate of the initial window, row by row.
    ///
    /// # Errors
    /// Returns [`StreamError::InvalidConfig`](crate::core::error::StreamError)
    /// for unusable settings and an IO error if workers cannot be spawned.
    pub fn new(config: &StreamingConfig) -> Result<Self> {
        config.validate()?;
        let generator = ChunkGenerator::new(&config.generator, config.terrain.clone())?;

        let mut array = CircularArray {
            grid: RingGrid::new(config.window_size, config.origin_x, config.origin_z),
            arena: ChunkArena::new(),
            to_delete: Vec::new(),
            in_flight: HashSet::new(),
            generator,
            changed: Vec::new(),
            evicting: Vec::new(),
            evicted: Vec::new(),
            stats: StreamingStats::default(),
        };

        let size = config.window_size as i32;
        for z in config.origin_z..config.origin_z + size {
            for x in config.origin_x..config.origin_x + size {
                array.request_blocks(x, z);
            }
        }

        info!(
            "Streaming window {0}x{0} at ({1}, {2}), {3} block jobs requested{4}",
            config.window_size,
            config.origin_x,
            config.origin_z,
            array.in_flight.len(),
            if array.generator.is_inline() { " (inline)" } else { "" }
        );
        Ok(array)
    }

    /// Side length of the window in chunks.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Logical x of the window's lower corner.
    pub fn origin_x(&self) -> i32 {
        self.grid.origin_x()
    }

    /// Logical z of the window's lower corner.
    pub fn origin_z(&self) -> i32 {
        self.grid.origin_z()
    }

    /// Half-open window bound test on both axes.
    pub fn inside_array(&self, x: i32, z: i32) -> bool {
        self.grid.contains(x, z)
    }

    /// The live chunk at `(x, z)`.
    ///
    /// Coordinates outside the window, and coordinates whose blocks have not
    /// been generated yet, are absent.
    pub fn get(&self, x: i32, z: i32) -> Option<&Chunk> {
        self.grid
            .get(x, z)
            .and_then(|&handle| self.arena.get(handle))
    }

    /// Handle of the live chunk at `(x, z)`.
    pub fn chunk_handle(&self, x: i32, z: i32) -> Option<ChunkHandle> {
        self.grid.get(x, z).copied()
    }

    /// Any chunk still held, including evicted chunks waiting to be freed.
    pub fn chunk(&self, handle: ChunkHandle) -> Option<&Chunk> {
        self.arena.get(handle)
    }

    /// Current geometry of one sub-chunk, for the renderer.
    pub fn model(&self, x: i32, z: i32, level: usize) -> Option<&ChunkModel> {
        self.get(x, z)?.sub_chunks().get(level)?.model()
    }

    fn set(&mut self, x: i32, z: i32, handle: ChunkHandle) {
        debug_assert!(self.inside_array(x, z));
        self.grid.set(x, z, Some(handle));
    }

    /// Number of live chunks in the window.
    pub fn chunk_count(&self) -> usize {
        self.grid.occupied()
    }

    /// Evicted chunks not yet freed.
    pub fn pending_delete_count(&self) -> usize {
        self.to_delete.len()
    }

    /// Coordinates whose block job has not completed.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// `true` if a block job for `(x, z)` is outstanding.
    pub fn is_in_flight(&self, x: i32, z: i32) -> bool {
        self.in_flight.contains(&(x, z))
    }

    /// Counters since construction.
    pub fn stats(&self) -> &StreamingStats {
        &self.stats
    }

    /// Chunk coordinates whose render geometry changed during the last
    /// [`update`](Self::update).
    pub fn changed_chunks(&self) -> &[Point2<i32>] {
        &self.changed
    }

    /// Chunk coordinates that left the window in the moves before the last
    /// [`update`](Self::update).
    ///
    /// A renderer drops the models it holds for these before applying
    /// [`changed_chunks`](Self::changed_chunks), since a coordinate can leave
    /// and re-enter between two updates.
    pub fn evicted_chunks(&self) -> &[Point2<i32>] {
        &self.evicted
    }

    /// The background generator.
    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// Mutable access to the generator, e.g. to step inline jobs.
    pub fn generator_mut(&mut self) -> &mut ChunkGenerator {
        &mut self.generator
    }

    /// Flags a chunk as getting deleted and queues it for freeing.
    ///
    /// Memory is only reclaimed by [`update`](Self::update) once no mesh
    /// build targets the chunk.
    pub fn delete_chunk(&mut self, handle: ChunkHandle) {
        if self.arena.mark_pending_delete(handle) {
            self.to_delete.push(handle);
        }
    }

    /// Requests blocks for `(x, z)` unless the coordinate is resident or
    /// already in flight.
    fn request_blocks(&mut self, x: i32, z: i32) -> bool {
        if self.grid.get(x, z).is_some() || self.in_flight.contains(&(x, z)) {
            trace!("Chunk ({x}, {z}) already resident or requested");
            self.stats.skipped_block_requests += 1;
            return false;
        }
        self.in_flight.insert((x, z));
        self.generator.request_blocks(x, z);
        self.stats.blocks_requested += 1;
        true
    }

    /// Requests a mesh rebuild unless one is already in flight.
    ///
    /// A skipped request marks the sub-chunk dirty; it is re-requested when
    /// the outstanding build completes.
    ///
    /// # Returns
    /// `true` if a job was submitted.
    pub fn update_sub_chunk_mesh(&mut self, handle: ChunkHandle, level: usize) -> bool {
        if !self.arena.is_live(handle) {
            return false;
        }
        let Some(chunk) = self.arena.get_mut(handle) else {
            return false;
        };
        let sub_chunk = chunk.sub_chunk_mut(level);
        if sub_chunk.is_generating() {
            sub_chunk.mark_mesh_dirty();
            self.stats.skipped_mesh_requests += 1;
            return false;
        }
        self.submit_mesh(handle, level);
        true
    }

    fn submit_mesh(&mut self, handle: ChunkHandle, level: usize) {
        let Some(chunk) = self.arena.get(handle) else {
            return;
        };
        let position = chunk.position();
        let mut input = MeshInput::isolated(position, level, chunk.sub_chunk(level).shared_blocks());
        if level > 0 {
            input.neighbors[BlockSide::BOTTOM as usize] =
                Some(chunk.sub_chunk(level - 1).shared_blocks());
        }
        if level + 1 < SUB_CHUNKS_PER_CHUNK {
            input.neighbors[BlockSide::TOP as usize] =
                Some(chunk.sub_chunk(level + 1).shared_blocks());
        }
        for side in BlockSide::horizontal() {
            let (dx, _, dz) = side.offset();
            input.neighbors[side as usize] = self
                .get(position.x + dx, position.y + dz)
                .map(|neighbor| neighbor.sub_chunk(level).shared_blocks());
        }

        let ticket = MeshTicket {
            chunk: handle,
            level,
        };
        if let Some(chunk) = self.arena.get_mut(handle) {
            self.generator
                .request_mesh(chunk.sub_chunk_mut(level), ticket, input);
            self.stats.meshes_requested += 1;
        }
    }

    fn remesh_chunk(&mut self, handle: ChunkHandle) {
        for level in 0..SUB_CHUNKS_PER_CHUNK {
            self.update_sub_chunk_mesh(handle, level);
        }
    }

    /// Moves the window one chunk towards +x.
    pub fn move_right(&mut self) {
        self.shift(Shift::Right);
    }

    /// Moves the window one chunk towards -x.
    pub fn move_left(&mut self) {
        self.shift(Shift::Left);
    }

    /// Moves the window one chunk towards +z.
    pub fn move_front(&mut self) {
        self.shift(Shift::Front);
    }

    /// Moves the window one chunk towards -z.
    pub fn move_back(&mut self) {
        self.shift(Shift::Back);
    }

    /// Evicts the departing edge, requests the entering edge and remeshes
    /// the column (or row) beside the entering edge.
    fn shift(&mut self, direction: Shift) {
        self.grid.shift(direction);

        let size = self.size() as i32;
        let (x0, z0) = (self.origin_x(), self.origin_z());
        let (entering, inner): (Vec<(i32, i32)>, Vec<(i32, i32)>) = match direction {
            Shift::Right => (0..size)
                .map(|dz| ((x0 + size - 1, z0 + dz), (x0 + size - 2, z0 + dz)))
                .unzip(),
            Shift::Left => (0..size)
                .map(|dz| ((x0, z0 + dz), (x0 + 1, z0 + dz)))
                .unzip(),
            Shift::Front => (0..size)
                .map(|dx| ((x0 + dx, z0 + size - 1), (x0 + dx, z0 + size - 2)))
                .unzip(),
            Shift::Back => (0..size)
                .map(|dx| ((x0 + dx, z0), (x0 + dx, z0 + 1)))
                .unzip(),
        };

        // The departed edge's slots are now addressed by the entering edge.
        let mut evicted = 0;
        for &(x, z) in &entering {
            if let Some(handle) = self.grid.take(x, z) {
                if let Some(chunk) = self.arena.get(handle) {
                    self.evicting.push(chunk.position());
                }
                self.delete_chunk(handle);
                evicted += 1;
            }
        }
        for &(x, z) in &entering {
            self.request_blocks(x, z);
        }
        for &(x, z) in &inner {
            if let Some(handle) = self.chunk_handle(x, z) {
                self.remesh_chunk(handle);
            }
        }

        debug!(
            "Window shifted {:?} to origin ({x0}, {z0}), {evicted} chunks evicted",
            direction
        );
    }

    /// Per-tick maintenance: frees evicted chunks that no job targets, folds
    /// in completed block jobs and then completed mesh jobs.
    pub fn update(&mut self, delta: Duration) {
        trace!("Streaming update after {:?}", delta);
        self.changed.clear();
        self.evicted = std::mem::take(&mut self.evicting);
        self.sweep_pending_deletes();
        self.apply_generated_chunks();
        self.apply_generated_meshes();
    }

    fn sweep_pending_deletes(&mut self) {
        let mut idx = 0;
        while idx < self.to_delete.len() {
            let handle = self.to_delete[idx];
            if self.arena.get(handle).is_some_and(Chunk::is_generating) {
                idx += 1;
                continue;
            }
            self.to_delete.swap_remove(idx);
            if let Some(chunk) = self.arena.free(handle) {
                trace!("Freed chunk {:?}", chunk.position());
                self.stats.chunks_freed += 1;
            }
        }
    }

    fn apply_generated_chunks(&mut self) {
        let mut inserted = Vec::new();
        for chunk in self.generator.pop_chunks_generated() {
            let position = chunk.position();
            let (x, z) = (position.x, position.y);
            self.in_flight.remove(&(x, z));

            let handle = self.arena.insert(chunk);
            if self.inside_array(x, z) && self.grid.get(x, z).is_none() {
                self.set(x, z, handle);
                self.stats.chunks_inserted += 1;
                inserted.push(handle);
            } else {
                debug!("Dropping stale chunk ({x}, {z})");
                self.stats.stale_block_completions += 1;
                self.delete_chunk(handle);
            }
        }

        // New chunks change the visible faces of their neighbours.
        let mut targets = inserted.clone();
        for handle in inserted {
            let Some(position) = self.arena.get(handle).map(Chunk::position) else {
                continue;
            };
            for side in BlockSide::horizontal() {
                let (dx, _, dz) = side.offset();
                if let Some(neighbor) = self.chunk_handle(position.x + dx, position.y + dz) {
                    if !targets.contains(&neighbor) {
                        targets.push(neighbor);
                    }
                }
            }
        }
        for handle in targets {
            self.remesh_chunk(handle);
        }
    }

    fn apply_generated_meshes(&mut self) {
        let mut rebuilds = Vec::new();
        for MeshGenerated { ticket, mesh } in self.generator.pop_meshes_generated() {
            let Some(chunk) = self.arena.get_mut(ticket.chunk) else {
                warn!("Mesh completion for freed chunk {:?}", ticket.chunk);
                continue;
            };
            let deleting = chunk.is_getting_deleted();
            let position = chunk.position();
            let sub_chunk = chunk.sub_chunk_mut(ticket.level);
            sub_chunk.complete_mesh_build(mesh);

            if deleting {
                sub_chunk.discard_pending_mesh();
                debug!(
                    "Dropping stale mesh for chunk ({}, {}) level {}",
                    position.x, position.y, ticket.level
                );
                self.stats.stale_mesh_completions += 1;
                continue;
            }

            if sub_chunk.take_mesh_dirty() {
                rebuilds.push(ticket);
            }
            if sub_chunk.generate_models() {
                self.stats.meshes_applied += 1;
                if !self.changed.contains(&position) {
                    self.changed.push(position);
                }
            }
        }

        for ticket in rebuilds {
            self.update_sub_chunk_mesh(ticket.chunk, ticket.level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GeneratorConfig;
    use crate::engine_state::voxels::chunk::SubChunkState;

    fn inline_config(size: usize, origin_x: i32, origin_z: i32) -> StreamingConfig {
        StreamingConfig {
            window_size: size,
            origin_x,
            origin_z,
            generator: GeneratorConfig::inline(),
            ..StreamingConfig::default()
        }
    }

    /// Runs inline jobs and updates until nothing is outstanding.
    fn settle(array: &mut CircularArray) {
        for _ in 0..16 {
            array.generator_mut().run_pending_inline();
            array.update(Duration::ZERO);
            if array.generator().pending_block_jobs() == 0
                && array.generator().pending_mesh_jobs() == 0
                && array.pending_delete_count() == 0
            {
                return;
            }
        }
        panic!("window did not settle");
    }

    fn populated(size: usize) -> CircularArray {
        let mut array = CircularArray::new(&inline_config(size, 0, 0)).unwrap();
        settle(&mut array);
        array
    }

    fn assert_window_invariant(array: &CircularArray) {
        let (x0, z0, size) = (array.origin_x(), array.origin_z(), array.size() as i32);
        for x in x0 - 2..x0 + size + 2 {
            for z in z0 - 2..z0 + size + 2 {
                if let Some(chunk) = array.get(x, z) {
                    assert!(array.inside_array(x, z));
                    assert_eq!(chunk.position(), Point2::new(x, z));
                    assert!(!chunk.is_getting_deleted());
                }
            }
        }
    }

    #[test]
    fn test_world_to_chunk_floors() {
        let width = CHUNK_WIDTH as f32;
        assert_eq!(world_to_chunk(Point3::new(0.0, 50.0, 0.0)), Point2::new(0, 0));
        assert_eq!(
            world_to_chunk(Point3::new(width - 0.01, 0.0, width)),
            Point2::new(0, 1)
        );
        assert_eq!(world_to_chunk(Point3::new(-0.5, 0.0, -width - 1.0)), Point2::new(-1, -2));
    }

    #[test]
    fn test_initial_fill() {
        let mut array = CircularArray::new(&inline_config(4, 0, 0)).unwrap();
        assert_eq!(array.in_flight_count(), 16);
        assert_eq!(array.chunk_count(), 0);

        settle(&mut array);
        assert_eq!(array.chunk_count(), 16);
        assert_eq!(array.in_flight_count(), 0);
        assert_eq!(array.stats().chunks_inserted, 16);
        for x in 0..4 {
            for z in 0..4 {
                let chunk = array.get(x, z).unwrap();
                assert!(chunk
                    .sub_chunks()
                    .iter()
                    .all(|sub_chunk| sub_chunk.state() == SubChunkState::MeshReady));
                assert!(array.model(x, z, 0).is_some());

                let expected = array.generator().terrain().generate_chunk(Point2::new(x, z));
                for (level, grid) in expected.iter().enumerate() {
                    assert!(std::ptr::eq(chunk.blocks(level), chunk.sub_chunk(level).blocks()));
                    assert_eq!(chunk.blocks(level), grid);
                }
            }
        }
    }

    #[test]
    fn test_get_for_never_requested_coordinate_is_absent() {
        let array = CircularArray::new(&inline_config(4, 0, 0)).unwrap();
        // requested but not generated yet
        assert!(array.get(0, 0).is_none());
        assert!(array.get(4, 0).is_none());
        assert!(array.get(-1, 2).is_none());
        assert!(array.get(i32::MAX, i32::MIN).is_none());
        assert!(array.model(1, 1, 0).is_none());
    }

    #[test]
    fn test_move_right_scenario() {
        let mut array = populated(4);
        let evicted: Vec<_> = (0..4).map(|z| array.chunk_handle(0, z).unwrap()).collect();

        array.move_right();
        assert_eq!((array.origin_x(), array.origin_z()), (1, 0));
        assert_eq!(array.pending_delete_count(), 4);
        for &handle in &evicted {
            assert!(array.chunk(handle).unwrap().is_getting_deleted());
        }
        for z in 0..4 {
            assert!(array.get(0, z).is_none());
            assert!(array.is_in_flight(4, z));
            assert!(array.get(4, z).is_none());
            assert!(array.get(3, z).unwrap().is_generating());
            assert!(array
                .get(3, z)
                .unwrap()
                .sub_chunks()
                .iter()
                .all(|sub_chunk| sub_chunk.is_generating()));
            assert!(!array.get(2, z).unwrap().is_generating());
        }

        settle(&mut array);
        assert_eq!(array.chunk_count(), 16);
        assert_eq!(array.stats().chunks_freed, 4);
        for &handle in &evicted {
            assert!(array.chunk(handle).is_none());
        }
        assert_window_invariant(&array);
    }

    #[test]
    fn test_evicted_chunk_waits_for_its_mesh_build() {
        let mut array = populated(4);
        let handle = array.chunk_handle(1, 1).unwrap();
        assert!(array.update_sub_chunk_mesh(handle, 0));

        array.move_right();
        array.move_right();
        array.move_right();
        assert_eq!(array.pending_delete_count(), 12);

        // only the chunk with a build in flight survives the sweep
        array.update(Duration::ZERO);
        assert_eq!(array.pending_delete_count(), 1);
        let chunk = array.chunk(handle).unwrap();
        assert!(chunk.is_getting_deleted());
        assert!(chunk.is_generating());

        array.generator_mut().run_pending_inline();
        array.update(Duration::ZERO);
        assert_eq!(array.stats().stale_mesh_completions, 1);
        assert!(!array.changed_chunks().contains(&Point2::new(1, 1)));
        assert!(!array.chunk(handle).unwrap().is_generating());
        assert!(!array.chunk(handle).unwrap().sub_chunk(0).has_pending_mesh());

        array.update(Duration::ZERO);
        assert!(array.chunk(handle).is_none());
        assert_eq!(array.pending_delete_count(), 0);
        assert_window_invariant(&array);
    }

    #[test]
    fn test_evicted_chunks_reported_on_next_update() {
        let mut array = populated(4);
        assert!(array.evicted_chunks().is_empty());

        array.move_right();
        assert!(array.evicted_chunks().is_empty());
        array.update(Duration::ZERO);
        let mut evicted = array.evicted_chunks().to_vec();
        evicted.sort_by_key(|p| p.y);
        assert_eq!(evicted, (0..4).map(|z| Point2::new(0, z)).collect::<Vec<_>>());

        array.update(Duration::ZERO);
        assert!(array.evicted_chunks().is_empty());
    }

    #[test]
    fn test_evicted_chunk_refuses_mesh_requests() {
        let mut array = populated(4);
        let handle = array.chunk_handle(0, 2).unwrap();
        let requested = array.stats().meshes_requested;

        array.move_right();
        assert!(!array.update_sub_chunk_mesh(handle, 0));
        assert!(!array.chunk(handle).unwrap().is_generating());
        assert_eq!(array.stats().meshes_requested, requested + 4 * SUB_CHUNKS_PER_CHUNK as u64);
    }

    #[test]
    fn test_stale_block_completion_is_dropped() {
        let mut array = populated(4);
        array.move_right();
        array.move_left();
        assert!(array.is_in_flight(4, 0));

        settle(&mut array);
        assert_eq!(array.stats().stale_block_completions, 4);
        for z in 0..4 {
            assert!(array.get(4, z).is_none());
            assert_eq!(array.get(0, z).unwrap().position(), Point2::new(0, z));
        }
        assert_eq!(array.chunk_count(), 16);
    }

    #[test]
    fn test_coordinate_in_flight_is_not_requested_twice() {
        let mut array = populated(4);
        array.move_right();
        array.move_left();
        array.move_right();
        assert_eq!(array.stats().skipped_block_requests, 4);
        assert_eq!(array.generator().pending_block_jobs(), 8);

        settle(&mut array);
        assert_eq!(array.chunk_count(), 16);
        assert_eq!(array.stats().chunks_inserted, 16 + 4);
        // the x = 0 re-requests completed after the window left again
        assert_eq!(array.stats().stale_block_completions, 4);
        assert_window_invariant(&array);
    }

    #[test]
    fn test_no_double_build() {
        let mut array = populated(4);
        let handle = array.chunk_handle(2, 2).unwrap();
        let requested = array.stats().meshes_requested;

        assert!(array.update_sub_chunk_mesh(handle, 1));
        assert!(!array.update_sub_chunk_mesh(handle, 1));
        assert_eq!(array.generator().pending_mesh_jobs(), 1);
        assert_eq!(array.stats().meshes_requested, requested + 1);
        assert_eq!(array.stats().skipped_mesh_requests, 1);
        assert!(array.get(2, 2).unwrap().sub_chunk(1).is_mesh_dirty());

        // the refused request is picked up once the first build lands
        array.generator_mut().run_pending_inline();
        array.update(Duration::ZERO);
        let sub_chunk = array.get(2, 2).unwrap().sub_chunk(1);
        assert!(sub_chunk.is_generating());
        assert!(!sub_chunk.is_mesh_dirty());
        assert_eq!(array.changed_chunks(), &[Point2::new(2, 2)]);

        settle(&mut array);
        assert_eq!(
            array.get(2, 2).unwrap().sub_chunk(1).state(),
            SubChunkState::MeshReady
        );
    }

    #[test]
    fn test_window_invariant_under_wandering() {
        let mut array = populated(5);
        let moves = [
            Shift::Right,
            Shift::Right,
            Shift::Front,
            Shift::Left,
            Shift::Back,
            Shift::Back,
            Shift::Left,
            Shift::Left,
            Shift::Front,
            Shift::Right,
        ];
        for (step, direction) in moves.iter().cycle().take(60).enumerate() {
            array.shift(*direction);
            assert_window_invariant(&array);
            if step % 3 == 0 {
                array.generator_mut().run_pending_inline();
            }
            array.update(Duration::ZERO);
            assert_window_invariant(&array);
        }
        settle(&mut array);
        assert_eq!(array.chunk_count(), 25);
        assert_eq!(array.in_flight_count(), 0);
        assert_eq!(
            array.stats().chunks_freed,
            array.stats().chunks_inserted + array.stats().stale_block_completions - 25
        );
    }

    #[test]
    fn test_changed_chunks_reported_once_per_update() {
        let mut array = CircularArray::new(&inline_config(3, -1, -1)).unwrap();
        array.generator_mut().run_pending_inline();
        array.update(Duration::ZERO);
        assert!(array.changed_chunks().is_empty());

        array.generator_mut().run_pending_inline();
        array.update(Duration::ZERO);
        let mut changed = array.changed_chunks().to_vec();
        changed.sort_by_key(|p| (p.x, p.y));
        changed.dedup();
        assert_eq!(changed.len(), 9);
        assert_eq!(changed.len(), array.changed_chunks().len());

        array.update(Duration::ZERO);
        assert!(array.changed_chunks().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(CircularArray::new(&inline_config(2, 0, 0)).is_err());
    }
}
