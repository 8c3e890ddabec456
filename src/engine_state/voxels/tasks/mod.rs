//! # Voxel Task System
//!
//! This module contains tasks related to voxel world generation.
//! These tasks are processed on the generator's block workers so the
//! foreground update never waits on terrain sampling.

pub mod block_generation_task;
