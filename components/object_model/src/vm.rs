//! Runtime instance state shared by every thread.

use crate::alloc::new_namespace;
use crate::config::VmConfig;
use crate::value::NamespaceRef;
use log::debug;
use memory_manager::{Heap, MemoryManager};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to the memory manager of a runtime instance.
pub type SharedMemoryManager = Rc<RefCell<dyn MemoryManager>>;

/// A runtime instance.
///
/// Owns the memory manager and the global namespace. Threads hold an `Rc` to
/// their VM and run cooperatively; no two of them touch the memory manager
/// at the same time.
pub struct Vm {
    config: VmConfig,
    mem: SharedMemoryManager,
    globals: NamespaceRef,
}

impl Vm {
    /// Creates a VM backed by a [`Heap`] built from `config.heap`.
    pub fn new(config: VmConfig) -> Rc<Vm> {
        let heap = Heap::with_config(config.heap.clone());
        Vm::with_memory_manager(config, Rc::new(RefCell::new(heap)))
    }

    /// Creates a VM backed by an arbitrary memory manager.
    pub fn with_memory_manager(config: VmConfig, mem: SharedMemoryManager) -> Rc<Vm> {
        let globals = new_namespace(&mut *mem.borrow_mut(), Rc::from(""), None);
        debug!("created VM with globals {}", globals.id());
        Rc::new(Vm {
            config,
            mem,
            globals,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    /// Returns the shared memory manager.
    pub fn memory_manager(&self) -> &SharedMemoryManager {
        &self.mem
    }

    /// Returns the global namespace.
    pub fn globals(&self) -> &NamespaceRef {
        &self.globals
    }
}

impl std::fmt::Debug for Vm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vm")
            .field("config", &self.config)
            .field("globals", &self.globals.id())
            .finish()
    }
}
