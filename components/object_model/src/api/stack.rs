//! Pushing, popping and reading stack slots.

use crate::thread::Thread;
use crate::value::Value;
use core_types::{RuntimeError, RuntimeResult};
use std::rc::Rc;

impl Thread {
    pub(crate) fn top_index(&self) -> isize {
        self.stack().size() as isize - 1
    }

    /// Pushes a value.
    pub fn push_value(&mut self, value: Value) -> isize {
        self.stack_mut().push(value);
        self.top_index()
    }

    /// Pushes null.
    pub fn push_null(&mut self) -> isize {
        self.push_value(Value::Null)
    }

    /// Pushes a bool.
    pub fn push_bool(&mut self, value: bool) -> isize {
        self.push_value(Value::Bool(value))
    }

    /// Pushes an int.
    pub fn push_int(&mut self, value: i64) -> isize {
        self.push_value(Value::Int(value))
    }

    /// Pushes a float.
    pub fn push_float(&mut self, value: f64) -> isize {
        self.push_value(Value::Float(value))
    }

    /// Pushes a string.
    pub fn push_string(&mut self, value: &str) -> isize {
        self.push_value(Value::String(Rc::from(value)))
    }

    /// Pops `n` values.
    pub fn pop(&mut self, n: usize) -> RuntimeResult<()> {
        if self.stack().current_frame().function.is_some() && n >= self.stack().size() {
            return Err(RuntimeError::usage(format!(
                "pop - tried to pop {} values, but only {} are above 'this'",
                n,
                self.num_params()
            )));
        }
        self.stack_mut().pop(n)
    }

    /// Pops the topmost value.
    pub fn pop_top(&mut self) -> RuntimeResult<()> {
        self.pop(1)
    }

    /// Number of values in the current frame, `this` included.
    pub fn stack_size(&self) -> usize {
        self.stack().size()
    }

    /// Grows (with nulls) or shrinks the current frame.
    pub fn set_stack_size(&mut self, size: usize) -> RuntimeResult<()> {
        if size == 0 && self.stack().current_frame().function.is_some() {
            return Err(RuntimeError::usage(
                "set_stack_size - cannot set the stack size to 0 inside a function",
            ));
        }
        self.stack_mut().set_size(size);
        Ok(())
    }

    /// Resolves a fake index into a non-negative, push-stable one.
    pub fn abs_index(&self, slot: isize) -> RuntimeResult<isize> {
        let abs = self.stack().fake_to_abs(slot)?;
        Ok(self.stack().abs_to_fake(abs))
    }

    /// Swaps the two topmost values.
    pub fn swap_top(&mut self) -> RuntimeResult<()> {
        let a = self.stack().fake_to_abs(-1)?;
        let b = self.stack().fake_to_abs(-2)?;
        self.stack_mut().swap(a, b);
        Ok(())
    }

    /// Pushes a copy of the value in `slot`.
    pub fn dup(&mut self, slot: isize) -> RuntimeResult<isize> {
        let value = self.param(slot)?;
        Ok(self.push_value(value))
    }

    /// Returns the value in `slot`.
    pub fn get_value(&self, slot: isize) -> RuntimeResult<Value> {
        self.param(slot)
    }

    /// Reads an int.
    pub fn get_int(&self, slot: isize) -> RuntimeResult<i64> {
        self.check_int_param("get_int", slot, "slot")
    }

    /// Reads a bool.
    pub fn get_bool(&self, slot: isize) -> RuntimeResult<bool> {
        match self.param(slot)? {
            Value::Bool(b) => Ok(b),
            _ => Err(self.param_type_error("get_bool", slot, "slot", "bool")),
        }
    }

    /// Reads a float.
    pub fn get_float(&self, slot: isize) -> RuntimeResult<f64> {
        match self.param(slot)? {
            Value::Float(f) => Ok(f),
            _ => Err(self.param_type_error("get_float", slot, "slot", "float")),
        }
    }

    /// Reads a string.
    pub fn get_string(&self, slot: isize) -> RuntimeResult<Rc<str>> {
        self.check_string_param("get_string", slot, "slot")
    }

    /// Returns the type name of the value in `slot`.
    pub fn type_of(&self, slot: isize) -> RuntimeResult<&'static str> {
        Ok(self.param(slot)?.type_name())
    }
}
