#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Stream
//!
//! The streaming core of a voxel engine: a fixed-size sliding window of
//! terrain chunks kept resident around a moving viewer, with block and mesh
//! generation running on background workers.
//!
//! ## Key Modules
//!
//! * `core` - Configuration, errors and logging
//! * `engine_state` - The window, the chunk data model, the generator and its worker pools
//!
//! ## Architecture
//!
//! The foreground thread owns the window and never waits on a worker. It
//! enqueues jobs and drains completed work once per tick:
//! * Block jobs turn a chunk coordinate into a populated chunk
//! * Mesh jobs turn a sub-chunk and its neighbours into vertex and index data
//! * Evicted chunks are kept until no mesh job refers to them
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     if let Err(err) = voxel_stream::run() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```
//!
//! Rendering, physics and input live outside this crate. They consume
//! [`CircularArray::changed_chunks`] and [`world_to_chunk`], and feed the
//! viewer position into [`EngineState::update`].

use cgmath::Point3;
use log::{info, warn};
use web_time::{Duration, Instant};

pub mod core;
pub mod engine_state;

pub use crate::core::{
    config::{GeneratorConfig, StreamingConfig, TerrainConfig},
    error::{Result, StreamError},
};
pub use engine_state::{
    voxels::world::{world_to_chunk, CircularArray, StreamingStats},
    EngineState,
};

/// Ticks the headless demo runs for.
const DEMO_TICKS: u32 = 600;
/// Target tick length of the headless demo.
const DEMO_TICK: Duration = Duration::from_millis(16);
/// Viewer speed of the headless demo, in blocks per tick.
const DEMO_VIEWER_SPEED: f32 = 0.5;

/// Runs the headless streaming demo.
///
/// The first command line argument, if present, is a JSON config file.
/// A viewer walks diagonally through the world while the window follows it;
/// progress and the final counters are logged.
///
/// # Errors
/// Returns an error if the config cannot be loaded or the workers cannot be
/// started.
pub fn run() -> Result<()> {
    crate::core::logging::init();
    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => StreamingConfig::load(path)?,
        None => StreamingConfig::default(),
    };

    let mut engine_state = EngineState::new(&config)?;
    let mut viewer = Point3::new(0.0, 48.0, 0.0);
    let mut last_tick = Instant::now();
    let mut geometry_updates = 0;

    for tick in 0..DEMO_TICKS {
        let delta = last_tick.elapsed();
        last_tick = Instant::now();

        viewer.x += DEMO_VIEWER_SPEED;
        viewer.z += DEMO_VIEWER_SPEED * 0.5;
        geometry_updates += engine_state.update(delta, viewer).len();

        if tick % 120 == 0 {
            let world = &engine_state.world;
            info!(
                "Tick {tick}: origin ({}, {}), {} live, {} pending delete, {} in flight",
                world.origin_x(),
                world.origin_z(),
                world.chunk_count(),
                world.pending_delete_count(),
                world.in_flight_count()
            );
        }

        if let Some(rest) = DEMO_TICK.checked_sub(last_tick.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    info!("{geometry_updates} chunk geometry updates");
    match serde_json::to_string(engine_state.world.stats()) {
        Ok(json) => info!("Streaming stats: {json}"),
        Err(err) => warn!("Could not serialize streaming stats: {err}"),
    }
    Ok(())
}
