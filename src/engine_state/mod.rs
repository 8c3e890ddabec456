//! # Engine State Module
//!
//! The headless driver of the streaming core.
//!
//! ## Key Components
//!
//! * `EngineState` - Keeps the window centred on the viewer and ticks it
//! * `rendering` - CPU-side mesh data and the renderer-ready models
//! * `task_management` - Worker pools for background jobs
//! * `voxels` - Blocks, chunks, terrain, the generator and the window
//!
//! ## Architecture
//!
//! An external frame loop owns the `EngineState` and calls
//! [`EngineState::update`] once per tick with the viewer position. The state
//! turns chunk-boundary crossings into single-step window moves, runs the
//! window's per-tick maintenance and hands back the chunks whose geometry
//! changed, which is all a renderer needs to re-upload.

use cgmath::{Point2, Point3};
use log::debug;
use web_time::Duration;

use crate::core::{config::StreamingConfig, error::Result};
use voxels::world::{world_to_chunk, CircularArray};

pub mod rendering;
pub mod task_management;
pub mod voxels;

/// The main state container for the streaming engine.
///
/// # Examples
///
/// ```no_run
/// use cgmath::Point3;
/// use voxel_stream::{core::config::StreamingConfig, engine_state::EngineState};
/// use web_time::Duration;
///
/// let mut engine_state = EngineState::new(&StreamingConfig::default())?;
/// let viewer = Point3::new(8.0, 40.0, 8.0);
/// loop {
///     for chunk in engine_state.update(Duration::from_millis(16), viewer) {
///         // re-upload the models of `chunk`
///     }
/// }
/// # Ok::<(), voxel_stream::core::error::StreamError>(())
/// ```
pub struct EngineState {
    /// The window of resident chunks
    pub world: CircularArray,
    /// Chunk the window is currently centred on
    current_viewer_chunk: Point2<i32>,
}

impl EngineState {
    /// Creates the window described by `config` and requests its chunks.
    pub fn new(config: &StreamingConfig) -> Result<Self> {
        let world = CircularArray::new(config)?;
        let half = (world.size() / 2) as i32;
        let current_viewer_chunk = Point2::new(world.origin_x() + half, world.origin_z() + half);
        Ok(Self {
            world,
            current_viewer_chunk,
        })
    }

    /// Chunk the window is currently centred on.
    pub fn viewer_chunk(&self) -> Point2<i32> {
        self.current_viewer_chunk
    }

    /// Shifts the window one step at a time until it is centred on `chunk`.
    ///
    /// # Returns
    /// The number of single-step moves issued.
    pub fn follow_viewer(&mut self, chunk: Point2<i32>) -> usize {
        let half = (self.world.size() / 2) as i32;
        let (target_x, target_z) = (chunk.x - half, chunk.y - half);
        let mut moves = 0;

        while self.world.origin_x() < target_x {
            self.world.move_right();
            moves += 1;
        }
        while self.world.origin_x() > target_x {
            self.world.move_left();
            moves += 1;
        }
        while self.world.origin_z() < target_z {
            self.world.move_front();
            moves += 1;
        }
        while self.world.origin_z() > target_z {
            self.world.move_back();
            moves += 1;
        }

        self.current_viewer_chunk = chunk;
        moves
    }

    /// Runs one tick: recentres on the viewer, steps the jobs of any pool
    /// without workers, then folds completed work into the window.
    ///
    /// # Returns
    /// The chunks whose render geometry changed during this tick.
    pub fn update(&mut self, delta: Duration, viewer_position: Point3<f32>) -> &[Point2<i32>] {
        let viewer_chunk = world_to_chunk(viewer_position);
        if viewer_chunk != self.current_viewer_chunk {
            let moves = self.follow_viewer(viewer_chunk);
            debug!(
                "Viewer entered chunk ({}, {}), {} window moves",
                viewer_chunk.x, viewer_chunk.y, moves
            );
        }

        self.world.generator_mut().run_inline_pools();
        self.world.update(delta);
        self.world.changed_chunks()
    }
}
