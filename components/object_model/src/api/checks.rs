//! Parameter validation for the stack API.
//!
//! Every check fails with a `UsageError` whose message starts with the name
//! of the API function that was misused.

use crate::thread::Thread;
use crate::value::{ClassRef, Value};
use core_types::{RuntimeError, RuntimeResult};
use std::rc::Rc;

impl Thread {
    /// Number of values in the current frame that are not `this`.
    pub fn num_params(&self) -> usize {
        let stack = self.stack();
        let reserved = usize::from(stack.current_frame().function.is_some());
        stack.size().saturating_sub(reserved)
    }

    /// Fails unless at least `n` values besides `this` are in the frame.
    pub fn check_num_params(&self, func: &str, n: usize) -> RuntimeResult<()> {
        let have = self.num_params();
        if have < n {
            return Err(RuntimeError::usage(format!(
                "{} - not enough parameters (expected {}, only have {} stack slots)",
                func, n, have
            )));
        }
        Ok(())
    }

    /// Builds the error for a parameter of the wrong type.
    pub fn param_type_error(&self, func: &str, slot: isize, name: &str, expected: &str) -> RuntimeError {
        let actual = self
            .stack()
            .fake_to_abs(slot)
            .map(|abs| self.stack().get(abs).type_name())
            .unwrap_or("nothing");
        RuntimeError::usage(format!(
            "{} - expected '{}' for {}, not '{}'",
            func, expected, name, actual
        ))
    }

    pub(crate) fn param(&self, slot: isize) -> RuntimeResult<Value> {
        let abs = self.stack().fake_to_abs(slot)?;
        Ok(self.stack().get(abs).clone())
    }

    /// Reads a string parameter.
    pub fn check_string_param(&self, func: &str, slot: isize, name: &str) -> RuntimeResult<Rc<str>> {
        match self.param(slot)? {
            Value::String(s) => Ok(s),
            _ => Err(self.param_type_error(func, slot, name, "string")),
        }
    }

    /// Reads an int parameter.
    pub fn check_int_param(&self, func: &str, slot: isize, name: &str) -> RuntimeResult<i64> {
        match self.param(slot)? {
            Value::Int(i) => Ok(i),
            _ => Err(self.param_type_error(func, slot, name, "int")),
        }
    }

    /// Reads a class parameter.
    pub fn check_class_param(&self, func: &str, slot: isize, name: &str) -> RuntimeResult<ClassRef> {
        match self.param(slot)? {
            Value::Class(c) => Ok(c),
            _ => Err(self.param_type_error(func, slot, name, "class")),
        }
    }
}
