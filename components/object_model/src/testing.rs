//! Test doubles shared by unit tests.

use core_types::{GcId, ObjectKind};
use memory_manager::MemoryManager;

/// A memory manager that records every allocation and barrier call.
#[derive(Debug, Default)]
pub struct RecordingManager {
    next_id: u64,
    /// Allocations in order
    pub allocations: Vec<(GcId, ObjectKind)>,
    /// Barrier calls in order, as `(owner, target)`
    pub writes: Vec<(GcId, GcId)>,
}

impl RecordingManager {
    /// Number of barrier calls with the given owner.
    pub fn writes_from(&self, owner: GcId) -> usize {
        self.writes.iter().filter(|(o, _)| *o == owner).count()
    }
}

impl MemoryManager for RecordingManager {
    fn allocate(&mut self, kind: ObjectKind) -> GcId {
        self.next_id += 1;
        let id = GcId(self.next_id);
        self.allocations.push((id, kind));
        id
    }

    fn write_barrier(&mut self, owner: GcId, target: GcId) {
        self.writes.push((owner, target));
    }
}
