//! # Streaming Configuration
//!
//! Runtime settings for the sliding chunk window, the background generator
//! and the procedural terrain. Everything is deserialized from JSON with
//! `serde`, and every field has a default so a config file only needs to name
//! what it changes:
//!
//! ```json
//! {
//!     "window_size": 12,
//!     "generator": { "block_workers": 4 },
//!     "terrain": { "seed": 7 }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::error::{Result, StreamError};
use crate::engine_state::voxels::chunk::WORLD_HEIGHT;

/// Top-level configuration for a streaming world.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamingConfig {
    /// Side length of the square window, in chunks.
    pub window_size: usize,
    /// Logical x coordinate of the window's lower corner.
    pub origin_x: i32,
    /// Logical z coordinate of the window's lower corner.
    pub origin_z: i32,
    /// Worker pool settings.
    pub generator: GeneratorConfig,
    /// Terrain shape settings.
    pub terrain: TerrainConfig,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            window_size: 8,
            origin_x: -4,
            origin_z: -4,
            generator: GeneratorConfig::default(),
            terrain: TerrainConfig::default(),
        }
    }
}

/// Settings for the background worker pools.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Threads producing block grids. `0` runs block jobs on the thread
    /// that steps the window.
    pub block_workers: usize,
    /// Threads producing meshes. `0` runs mesh jobs on the thread that
    /// steps the window.
    pub mesh_workers: usize,
    /// Jobs a single worker may hold before new jobs wait in the backlog.
    pub max_tasks_in_flight: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            block_workers: 2,
            mesh_workers: 2,
            max_tasks_in_flight: 1,
        }
    }
}

impl GeneratorConfig {
    /// A generator with no worker threads.
    ///
    /// Jobs only run when
    /// [`ChunkGenerator::run_pending_inline`](crate::engine_state::voxels::generator::ChunkGenerator::run_pending_inline)
    /// is called, which makes every completion happen at a point the caller
    /// chooses.
    pub fn inline() -> Self {
        Self {
            block_workers: 0,
            mesh_workers: 0,
            max_tasks_in_flight: 1,
        }
    }

    /// Returns `true` when both pools run without worker threads.
    pub fn is_inline(&self) -> bool {
        self.block_workers == 0 && self.mesh_workers == 0
    }
}

/// Parameters of the height-map terrain.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerrainConfig {
    /// Perlin permutation seed.
    pub seed: u32,
    /// Mean surface height in blocks.
    pub base_height: i32,
    /// Maximum deviation from `base_height` in blocks.
    pub amplitude: f64,
    /// Scale applied to world block coordinates before sampling noise.
    pub scale: f64,
    /// Layers of dirt between the grass surface and stone.
    pub dirt_depth: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            base_height: 24,
            amplitude: 12.0,
            scale: 0.02,
            dirt_depth: 3,
        }
    }
}

impl StreamingConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::info!("Loading streaming config from {}", path.as_ref().display());
        Self::from_json_str(&json)
    }

    /// Checks the settings describe a window and terrain that can be streamed.
    pub fn validate(&self) -> Result<()> {
        // A shift evicts one edge, exposes another and remeshes the column
        // beside the exposed edge; those must be three distinct columns.
        if self.window_size < 3 {
            return Err(StreamError::InvalidConfig(format!(
                "window_size must be at least 3, got {}",
                self.window_size
            )));
        }
        if self.window_size > i32::MAX as usize / 2 {
            return Err(StreamError::InvalidConfig(format!(
                "window_size {} is too large",
                self.window_size
            )));
        }
        if self.generator.max_tasks_in_flight == 0 {
            return Err(StreamError::InvalidConfig(
                "generator.max_tasks_in_flight must be at least 1".to_string(),
            ));
        }
        self.terrain.validate()
    }
}

impl TerrainConfig {
    /// Checks the terrain surface always lands inside the world column.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(StreamError::InvalidConfig(format!(
                "terrain.scale must be finite and positive, got {}",
                self.scale
            )));
        }
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(StreamError::InvalidConfig(format!(
                "terrain.amplitude must be finite and non-negative, got {}",
                self.amplitude
            )));
        }
        if self.dirt_depth < 0 {
            return Err(StreamError::InvalidConfig(format!(
                "terrain.dirt_depth must be non-negative, got {}",
                self.dirt_depth
            )));
        }
        let highest = self.base_height as f64 + self.amplitude.ceil();
        let lowest = self.base_height as f64 - self.amplitude.ceil();
        if lowest < 0.0 || highest >= WORLD_HEIGHT as f64 {
            return Err(StreamError::InvalidConfig(format!(
                "terrain surface range [{lowest}, {highest}] leaves the world height 0..{WORLD_HEIGHT}"
            )));
        }
        Ok(())
    }
}
