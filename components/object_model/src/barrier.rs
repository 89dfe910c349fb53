//! Write-barrier boundary.
//!
//! Every store of a value into a table, namespace, array, class member or
//! instance field goes through one of these functions. They report reference
//! edges to the memory manager before the store becomes visible.

use crate::value::Value;
use core_types::GcId;
use memory_manager::MemoryManager;

/// Reports that `value` is about to be stored into `owner`.
///
/// Scalars and strings are not heap references and produce no barrier call.
pub fn record_write(mem: &mut dyn MemoryManager, owner: GcId, value: &Value) {
    if let Some(target) = value.gc_id() {
        mem.write_barrier(owner, target);
    }
}

/// Stores `new_val` into `slot`, a storage location inside `owner`.
///
/// This is the only way entity code overwrites an existing slot.
///
/// # Example
///
/// ```
/// use core_types::ObjectKind;
/// use memory_manager::{Heap, MemoryManager};
/// use object_model::{barrier, Value};
///
/// let mut heap = Heap::new();
/// let owner = heap.allocate(ObjectKind::Array);
/// let mut slot = Value::Null;
///
/// barrier::write_barrier(&mut heap, owner, &mut slot, Value::Int(7));
/// assert_eq!(slot, Value::Int(7));
/// assert_eq!(heap.stats().barrier_calls, 0);
/// ```
pub fn write_barrier(mem: &mut dyn MemoryManager, owner: GcId, slot: &mut Value, new_val: Value) {
    record_write(mem, owner, &new_val);
    *slot = new_val;
}
