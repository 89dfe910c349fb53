//! Native functions.

use crate::thread::Thread;
use core_types::{GcId, RuntimeResult};
use std::fmt;
use std::rc::Rc;

/// Signature of a native function.
///
/// The function runs in its own stack frame: slot 0 holds `this` and slots
/// `1..=num_params` hold the arguments. It returns how many values it left
/// on top of its frame as results.
pub type NativeFn = dyn Fn(&mut Thread, usize) -> RuntimeResult<usize>;

/// A named native function.
pub struct Function {
    id: GcId,
    name: Rc<str>,
    native: Rc<NativeFn>,
}

impl Function {
    /// Creates a function allocated under `id`.
    pub fn new(id: GcId, name: Rc<str>, native: Rc<NativeFn>) -> Self {
        Function { id, name, native }
    }

    /// Returns the heap identity of this function.
    pub fn id(&self) -> GcId {
        self.id
    }

    /// Returns the function's name.
    pub fn name(&self) -> &Rc<str> {
        &self.name
    }

    /// Returns the native body.
    pub fn native(&self) -> &Rc<NativeFn> {
        &self.native
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}
