//! Allocation of heap objects.
//!
//! Each constructor asks the memory manager for an identity and wraps the new
//! object in its shared handle.

use crate::array::Array;
use crate::class::Class;
use crate::function::{Function, NativeFn};
use crate::gc_cell::GcCell;
use crate::instance::Instance;
use crate::namespace::Namespace;
use crate::table::Table;
use crate::value::{ArrayRef, ClassRef, FunctionRef, InstanceRef, NamespaceRef, TableRef, Value};
use core_types::ObjectKind;
use memory_manager::MemoryManager;
use std::rc::Rc;

/// Allocates an empty table.
pub fn new_table(mem: &mut dyn MemoryManager) -> TableRef {
    let id = mem.allocate(ObjectKind::Table);
    Rc::new(GcCell::new(id, Table::new(id)))
}

/// Allocates an array of `len` nulls.
pub fn new_array(mem: &mut dyn MemoryManager, len: usize) -> ArrayRef {
    let id = mem.allocate(ObjectKind::Array);
    Rc::new(GcCell::new(id, Array::new(id, len)))
}

/// Allocates an array holding `items`.
pub fn array_from(mem: &mut dyn MemoryManager, items: Vec<Value>) -> ArrayRef {
    let id = mem.allocate(ObjectKind::Array);
    Rc::new(GcCell::new(id, Array::from_values(mem, id, items)))
}

/// Allocates an empty namespace.
pub fn new_namespace(
    mem: &mut dyn MemoryManager,
    name: Rc<str>,
    parent: Option<NamespaceRef>,
) -> NamespaceRef {
    let id = mem.allocate(ObjectKind::Namespace);
    Rc::new(GcCell::new(id, Namespace::new(mem, id, name, parent)))
}

/// Allocates a class with no members of its own.
pub fn new_class(mem: &mut dyn MemoryManager, name: Rc<str>, base: Option<ClassRef>) -> ClassRef {
    let id = mem.allocate(ObjectKind::Class);
    Rc::new(GcCell::new(id, Class::new(mem, id, name, base)))
}

/// Allocates a native function.
pub fn new_function(mem: &mut dyn MemoryManager, name: Rc<str>, native: Rc<NativeFn>) -> FunctionRef {
    let id = mem.allocate(ObjectKind::Function);
    Rc::new(Function::new(id, name, native))
}

/// Allocates an instance of `class`, freezing the class.
pub fn new_instance(mem: &mut dyn MemoryManager, class: &ClassRef) -> InstanceRef {
    let id = mem.allocate(ObjectKind::Instance);
    Rc::new(GcCell::new(id, Instance::new(mem, id, class)))
}
