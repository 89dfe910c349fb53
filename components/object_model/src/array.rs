//! Growable sequences of values.

use crate::barrier::{record_write, write_barrier};
use crate::value::Value;
use core_types::{GcId, RuntimeError, RuntimeResult};
use memory_manager::MemoryManager;

/// A mutable, resizable sequence of values.
#[derive(Debug)]
pub struct Array {
    id: GcId,
    items: Vec<Value>,
}

impl Array {
    /// Creates an array of `len` nulls.
    pub fn new(id: GcId, len: usize) -> Self {
        Array {
            id,
            items: vec![Value::Null; len],
        }
    }

    /// Creates an array holding `items`, reporting every reference they
    /// contain.
    pub fn from_values(mem: &mut dyn MemoryManager, id: GcId, items: Vec<Value>) -> Self {
        for item in &items {
            record_write(mem, id, item);
        }
        Array { id, items }
    }

    /// Returns the heap identity of this array.
    pub fn id(&self) -> GcId {
        self.id
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Overwrites the element at `index`. Returns false if out of bounds.
    pub fn set(&mut self, mem: &mut dyn MemoryManager, index: usize, value: Value) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                write_barrier(mem, self.id, slot, value);
                true
            }
            None => false,
        }
    }

    /// Appends an element.
    pub fn push(&mut self, mem: &mut dyn MemoryManager, value: Value) {
        record_write(mem, self.id, &value);
        self.items.push(value);
    }

    /// Resizes the array, filling new slots with null.
    ///
    /// Fails with a `RangeError` when the storage for `len` elements cannot
    /// be reserved.
    pub fn resize(&mut self, len: usize) -> RuntimeResult<()> {
        let additional = len.saturating_sub(self.items.len());
        self.items.try_reserve(additional).map_err(|e| {
            RuntimeError::range(format!("Invalid length ({}): {}", len, e))
        })?;
        self.items.resize(len, Value::Null);
        Ok(())
    }

    /// Returns the elements in `lo..hi`.
    pub fn slice(&self, lo: usize, hi: usize) -> &[Value] {
        &self.items[lo..hi]
    }

    /// Overwrites the elements in `lo..lo + values.len()`.
    ///
    /// The caller has checked that the range lies within the array.
    pub fn assign_slice(&mut self, mem: &mut dyn MemoryManager, lo: usize, values: Vec<Value>) {
        for (slot, value) in self.items[lo..].iter_mut().zip(values) {
            write_barrier(mem, self.id, slot, value);
        }
    }

    /// Returns all elements.
    pub fn values(&self) -> &[Value] {
        &self.items
    }
}
