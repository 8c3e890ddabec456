//! # Core Module
//!
//! Ambient services shared by the whole crate.
//!
//! ## Key Components
//! - `config`: `StreamingConfig` and its generator and terrain sections, loaded from JSON
//! - `error`: the crate's `StreamError` and `Result` alias
//! - `logging`: `env_logger` initialization

pub mod config;
pub mod error;
pub mod logging;

pub use config::{GeneratorConfig, StreamingConfig, TerrainConfig};
pub use error::{Result, StreamError};
