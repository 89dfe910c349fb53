//! The memory-manager boundary.
//!
//! The object model never touches collector state directly. It allocates
//! through [`MemoryManager::allocate`] and reports every reference it stores
//! into another object through [`MemoryManager::write_barrier`].

use core_types::{GcId, ObjectKind};

/// Allocation and write-barrier hooks of a memory manager.
///
/// Implementations must treat `write_barrier` as pure bookkeeping: it is
/// invoked while the owner is being mutated and must not call back into the
/// object model.
///
/// # Example
///
/// ```
/// use core_types::ObjectKind;
/// use memory_manager::{Heap, MemoryManager};
///
/// let mut heap = Heap::new();
/// let table = heap.allocate(ObjectKind::Table);
/// let array = heap.allocate(ObjectKind::Array);
/// heap.write_barrier(table, array);
/// assert_eq!(heap.stats().barrier_calls, 1);
/// ```
pub trait MemoryManager {
    /// Registers a new object of the given kind and returns its identity.
    fn allocate(&mut self, kind: ObjectKind) -> GcId;

    /// Records that a reference to `target` was written into `owner`.
    fn write_barrier(&mut self, owner: GcId, target: GcId);
}
