use serde::Serialize;

/// Running counters kept by the [`CircularArray`](super::CircularArray).
///
/// Stale completions and skipped requests are expected while the viewer
/// moves; they are counted here instead of being reported as errors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StreamingStats {
    /// Block jobs handed to the generator.
    pub blocks_requested: u64,
    /// Block requests skipped because the coordinate was resident or in flight.
    pub skipped_block_requests: u64,
    /// Mesh jobs handed to the generator.
    pub meshes_requested: u64,
    /// Mesh requests skipped because a build was already in flight.
    pub skipped_mesh_requests: u64,
    /// Generated chunks made live.
    pub chunks_inserted: u64,
    /// Evicted chunks destroyed.
    pub chunks_freed: u64,
    /// Block completions that arrived after their coordinate left the window.
    pub stale_block_completions: u64,
    /// Mesh completions that arrived for an evicted chunk.
    pub stale_mesh_completions: u64,
    /// Mesh completions turned into models.
    pub meshes_applied: u64,
}
