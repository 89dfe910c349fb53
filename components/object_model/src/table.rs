//! Mapping container keyed by arbitrary values.

use crate::barrier::record_write;
use crate::value::Value;
use core_types::GcId;
use memory_manager::MemoryManager;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A table key.
///
/// Keys compare by identity: type tag first, then payload (float bit
/// patterns, string contents, heap identity for references). Ordering by
/// heap identity follows allocation order, so iteration is deterministic.
#[derive(Debug, Clone)]
pub(crate) struct Key(pub(crate) Value);

impl Key {
    fn rank(&self) -> u8 {
        match self.0 {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) => 2,
            Value::Float(_) => 3,
            Value::String(_) => 4,
            _ => 5,
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.to_bits().cmp(&b.to_bits()),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (a, b) => match self.rank().cmp(&other.rank()) {
                Ordering::Equal => a.gc_id().cmp(&b.gc_id()),
                unequal => unequal,
            },
        }
    }
}

/// A mutable mapping from values to values.
///
/// Assigning null to a key removes it, so a key bound to null is
/// indistinguishable from one that was never set.
#[derive(Debug)]
pub struct Table {
    id: GcId,
    entries: BTreeMap<Key, Value>,
}

impl Table {
    /// Creates an empty table with the identity given by the allocator.
    pub fn new(id: GcId) -> Self {
        Table {
            id,
            entries: BTreeMap::new(),
        }
    }

    /// Returns the heap identity of this table.
    pub fn id(&self) -> GcId {
        self.id
    }

    /// Looks up a key.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(&Key(key.clone()))
    }

    /// Returns true if the key is bound.
    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(&Key(key.clone()))
    }

    /// Binds `key` to `value`, or removes `key` if `value` is null.
    ///
    /// Callers are responsible for rejecting null keys.
    pub fn set(&mut self, mem: &mut dyn MemoryManager, key: Value, value: Value) {
        if value.is_null() {
            self.entries.remove(&Key(key));
            return;
        }

        record_write(mem, self.id, &key);
        record_write(mem, self.id, &value);
        self.entries.insert(Key(key), value);
    }

    /// Returns the number of bound keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all bound keys and their values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (&k.0, v))
    }
}
