//! Integration test suite for the object model runtime
//!
//! This crate provides integration tests that verify the dispatcher, the
//! entities and the memory manager work together across crate boundaries.

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use memory_manager;
    pub use object_model;
}

use memory_manager::{Heap, HeapConfig};
use object_model::{Thread, Vm, VmConfig};
use std::cell::RefCell;
use std::rc::Rc;

/// Builds a thread on a VM backed by a heap the test can inspect.
pub fn thread_with_heap(config: HeapConfig) -> (Thread, Rc<RefCell<Heap>>) {
    let heap = Rc::new(RefCell::new(Heap::with_config(config)));
    let vm = Vm::with_memory_manager(VmConfig::default(), heap.clone());
    (Thread::new(&vm), heap)
}
