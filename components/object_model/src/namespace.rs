//! Identifier scopes.
//!
//! Unlike a [`Table`](crate::table::Table), a namespace distinguishes a name
//! bound to null from an unbound name, and removal truly deletes a binding.

use crate::barrier::record_write;
use crate::value::{NamespaceRef, Value};
use core_types::{GcId, RuntimeError, RuntimeResult};
use memory_manager::MemoryManager;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A mutable mapping from identifiers to values.
#[derive(Debug)]
pub struct Namespace {
    id: GcId,
    name: Rc<str>,
    parent: Option<NamespaceRef>,
    bindings: BTreeMap<Rc<str>, Value>,
}

impl Namespace {
    /// Creates an empty namespace.
    ///
    /// The parent link is a reference stored into the new namespace and is
    /// reported to the memory manager.
    pub fn new(
        mem: &mut dyn MemoryManager,
        id: GcId,
        name: Rc<str>,
        parent: Option<NamespaceRef>,
    ) -> Self {
        if let Some(parent) = &parent {
            mem.write_barrier(id, parent.id());
        }

        Namespace {
            id,
            name,
            parent,
            bindings: BTreeMap::new(),
        }
    }

    /// Returns the heap identity of this namespace.
    pub fn id(&self) -> GcId {
        self.id
    }

    /// Returns the namespace's own name.
    pub fn name(&self) -> &Rc<str> {
        &self.name
    }

    /// Returns the enclosing namespace, if any.
    pub fn parent(&self) -> Option<&NamespaceRef> {
        self.parent.as_ref()
    }

    /// Returns the dotted name through all named ancestors.
    pub fn full_name(&self) -> String {
        let mut parts = vec![self.name.to_string()];
        let mut next = self.parent.clone();

        while let Some(ns) = next {
            let ns = ns.borrow();
            parts.push(ns.name.to_string());
            next = ns.parent.clone();
        }

        parts.retain(|p| !p.is_empty());
        parts.reverse();
        parts.join(".")
    }

    /// Looks up a binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Returns true if `name` is bound, even if bound to null.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Binds `name` to `value`, creating the binding if needed.
    pub fn set(&mut self, mem: &mut dyn MemoryManager, name: Rc<str>, value: Value) {
        record_write(mem, self.id, &value);
        self.bindings.insert(name, value);
    }

    /// Deletes the binding for `name` and returns its value.
    ///
    /// Fails with a field error if `name` is not bound.
    pub fn remove(&mut self, name: &str) -> RuntimeResult<Value> {
        match self.bindings.remove(name) {
            Some(value) => Ok(value),
            None => Err(RuntimeError::field(format!(
                "key '{}' does not exist in namespace '{}'",
                name,
                self.full_name()
            ))),
        }
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over the bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Rc<str>, &Value)> {
        self.bindings.iter()
    }
}
