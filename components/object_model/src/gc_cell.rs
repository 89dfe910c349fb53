//! Shared mutable cell carrying a heap identity.

use core_types::GcId;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;

/// Interior-mutable storage for a heap object.
///
/// The identity is kept outside of the `RefCell` so it can be read while the
/// object is mutably borrowed (e.g. when a table is used as a key into
/// itself).
pub struct GcCell<T> {
    id: GcId,
    inner: RefCell<T>,
}

impl<T> GcCell<T> {
    /// Wraps an object allocated under `id`.
    pub fn new(id: GcId, value: T) -> Self {
        GcCell {
            id,
            inner: RefCell::new(value),
        }
    }

    /// Returns the heap identity.
    pub fn id(&self) -> GcId {
        self.id
    }

    /// Immutably borrows the object.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    /// Mutably borrows the object.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }
}

impl<T> fmt::Debug for GcCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcCell").field("id", &self.id).finish()
    }
}
