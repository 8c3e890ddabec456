//! # Rendering Tasks
//!
//! Background jobs that turn block data into geometry.

pub mod mesh_generation_task;
