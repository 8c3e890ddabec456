//! # Chunk Arena
//!
//! Dense storage for every chunk the window still references, live or
//! evicted. Chunks are addressed by a [`ChunkHandle`]: a slot index plus the
//! slot's generation at insertion time. Freeing a slot bumps its generation,
//! so a handle captured by a background job before the free can never reach
//! whatever is stored in the slot afterwards.

use crate::engine_state::voxels::chunk::Chunk;

/// Generation-checked reference to a chunk in a [`ChunkArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChunkHandle {
    index: u32,
    generation: u32,
}

impl ChunkHandle {
    /// Slot index inside the arena.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation this handle was issued for.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
enum Entry {
    Free,
    Live(Chunk),
    PendingDelete(Chunk),
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Entry,
}

/// Owner of all resident and evicted-but-not-freed chunks.
#[derive(Debug, Default)]
pub struct ChunkArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ChunkArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a chunk as live and returns its handle.
    pub fn insert(&mut self, chunk: Chunk) -> ChunkHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Entry::Live(chunk);
            return ChunkHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entry: Entry::Live(chunk),
        });
        ChunkHandle {
            index,
            generation: 0,
        }
    }

    fn slot(&self, handle: ChunkHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    fn slot_mut(&mut self, handle: ChunkHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    /// The chunk behind `handle`, live or pending deletion.
    ///
    /// Returns `None` once the chunk has been freed.
    pub fn get(&self, handle: ChunkHandle) -> Option<&Chunk> {
        match &self.slot(handle)?.entry {
            Entry::Live(chunk) | Entry::PendingDelete(chunk) => Some(chunk),
            Entry::Free => None,
        }
    }

    /// Mutable access to the chunk behind `handle`.
    pub fn get_mut(&mut self, handle: ChunkHandle) -> Option<&mut Chunk> {
        match &mut self.slot_mut(handle)?.entry {
            Entry::Live(chunk) | Entry::PendingDelete(chunk) => Some(chunk),
            Entry::Free => None,
        }
    }

    /// `true` if the handle refers to a chunk that has not been evicted.
    pub fn is_live(&self, handle: ChunkHandle) -> bool {
        matches!(self.slot(handle), Some(Slot { entry: Entry::Live(_), .. }))
    }

    /// Moves a live chunk to pending deletion and flags it as getting deleted.
    ///
    /// # Returns
    /// `false` if the handle is stale or the chunk was already pending.
    pub fn mark_pending_delete(&mut self, handle: ChunkHandle) -> bool {
        let Some(slot) = self.slot_mut(handle) else {
            return false;
        };
        match std::mem::replace(&mut slot.entry, Entry::Free) {
            Entry::Live(mut chunk) => {
                chunk.mark_getting_deleted();
                slot.entry = Entry::PendingDelete(chunk);
                true
            }
            other => {
                slot.entry = other;
                false
            }
        }
    }

    /// Destroys a chunk and invalidates every outstanding handle to it.
    ///
    /// # Returns
    /// The freed chunk, or `None` for a stale handle.
    pub fn free(&mut self, handle: ChunkHandle) -> Option<Chunk> {
        let slot = self.slot_mut(handle)?;
        let chunk = match std::mem::replace(&mut slot.entry, Entry::Free) {
            Entry::Live(chunk) | Entry::PendingDelete(chunk) => chunk,
            Entry::Free => return None,
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(chunk)
    }

    /// Number of chunks held, live or pending deletion.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when no chunk is held.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point2;

    use super::*;
    use crate::engine_state::voxels::chunk::{BlockGrid, SUB_CHUNKS_PER_CHUNK};

    fn chunk_at(x: i32, z: i32) -> Chunk {
        Chunk::new(
            Point2::new(x, z),
            (0..SUB_CHUNKS_PER_CHUNK).map(|_| BlockGrid::empty()).collect(),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let mut arena = ChunkArena::new();
        let a = arena.insert(chunk_at(0, 0));
        let b = arena.insert(chunk_at(1, 0));
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(b).unwrap().position(), Point2::new(1, 0));
        assert!(arena.is_live(a));
    }

    #[test]
    fn test_pending_delete_keeps_chunk_reachable() {
        let mut arena = ChunkArena::new();
        let handle = arena.insert(chunk_at(2, 3));
        assert!(arena.mark_pending_delete(handle));
        assert!(!arena.mark_pending_delete(handle));

        assert!(!arena.is_live(handle));
        let chunk = arena.get(handle).unwrap();
        assert!(chunk.is_getting_deleted());
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_freed_handle_is_stale_after_reuse() {
        let mut arena = ChunkArena::new();
        let old = arena.insert(chunk_at(0, 0));
        assert!(arena.free(old).is_some());
        assert!(arena.is_empty());

        let new = arena.insert(chunk_at(9, 9));
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());

        assert!(arena.get(old).is_none());
        assert!(arena.free(old).is_none());
        assert!(!arena.mark_pending_delete(old));
        assert_eq!(arena.get(new).unwrap().position(), Point2::new(9, 9));
    }
}
