//! Task for generating mesh data for a sub-chunk in a background thread.
//!
//! The task owns everything it reads: shared handles to the target grid and
//! its neighbours. It never touches the window or the chunk arena, so the
//! only state crossing threads is the task itself and its result.

use log::trace;
use web_time::Instant;

use crate::engine_state::{
    rendering::meshing::{MeshData, MeshInput},
    task_management::task::Task,
    voxels::world::ChunkHandle,
};

/// Identifies the sub-chunk a mesh job was requested for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeshTicket {
    /// The owning chunk at request time.
    pub chunk: ChunkHandle,
    /// Vertical index of the sub-chunk.
    pub level: usize,
}

/// A completed mesh job.
#[derive(Debug)]
pub struct MeshGenerated {
    /// Which sub-chunk the mesh was built for.
    pub ticket: MeshTicket,
    /// The generated geometry.
    pub mesh: MeshData,
}

/// A task that generates mesh data for one sub-chunk.
pub struct MeshGenerationTask {
    ticket: MeshTicket,
    input: MeshInput,
}

impl MeshGenerationTask {
    /// Creates a new mesh generation task.
    pub fn new(ticket: MeshTicket, input: MeshInput) -> Self {
        MeshGenerationTask { ticket, input }
    }
}

impl Task for MeshGenerationTask {
    type Output = MeshGenerated;

    fn process(self) -> MeshGenerated {
        let start = Instant::now();
        let mesh = MeshData::build(&self.input);
        trace!(
            "Meshed sub-chunk ({}, {}) level {}: {} faces in {:?}",
            self.input.position.x,
            self.input.position.y,
            self.input.level,
            mesh.face_count(),
            start.elapsed()
        );

        MeshGenerated {
            ticket: self.ticket,
            mesh,
        }
    }
}
