//! Error types for the streaming core

use thiserror::Error;

/// Main error type for the crate.
///
/// Only genuinely fallible surfaces return it (configuration loading, worker
/// start-up, checked sub-chunk lookups). Races between the window and the
/// background generator are not errors; they are counted in
/// [`StreamingStats`](crate::engine_state::voxels::world::StreamingStats).
#[derive(Debug, Error)]
pub enum StreamError {
    /// Reading a config file or spawning a worker thread failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for [`StreamingConfig`](super::config::StreamingConfig).
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The config parsed but describes an unusable window or terrain.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A vertical sub-chunk index outside `[0, height)`.
    #[error("Sub-chunk level {level} out of range (height {height})")]
    SubChunkOutOfRange {
        /// The requested level.
        level: usize,
        /// Number of sub-chunks per chunk.
        height: usize,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, StreamError>;
