//! Operand stack and frame addressing.
//!
//! Slots are addressed two ways:
//! - absolute: an offset into the whole stack, stable while values are
//!   pushed and popped above it
//! - "fake": relative to the current frame. Non-negative values count up
//!   from the frame base (0 is the frame's first slot), negative values count
//!   back from the top (-1 is the topmost value)
//!
//! Operations that push temporaries resolve every fake index to an absolute
//! one before pushing anything.

use crate::value::Value;
use core_types::{RuntimeError, RuntimeResult};
use std::rc::Rc;

/// An activation record on the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Absolute index of the frame's first slot
    pub base: usize,
    /// Name of the native function running in this frame
    pub function: Option<Rc<str>>,
}

impl Frame {
    /// Creates a frame starting at `base`.
    pub fn new(base: usize, function: Option<Rc<str>>) -> Self {
        Frame { base, function }
    }
}

/// The operand stack of one execution context.
#[derive(Debug)]
pub struct Stack {
    slots: Vec<Value>,
    frames: Vec<Frame>,
}

impl Stack {
    /// Creates a stack holding a single root frame.
    pub fn with_capacity(capacity: usize) -> Self {
        Stack {
            slots: Vec::with_capacity(capacity),
            frames: vec![Frame::new(0, None)],
        }
    }

    /// Absolute index one past the topmost value.
    pub fn top(&self) -> usize {
        self.slots.len()
    }

    /// Absolute index of the current frame's first slot.
    pub fn base(&self) -> usize {
        self.current_frame().base
    }

    /// Number of values in the current frame.
    pub fn size(&self) -> usize {
        self.top() - self.base()
    }

    /// Returns the current frame.
    pub fn current_frame(&self) -> &Frame {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    /// Number of active frames, including the root frame.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Pushes a value and returns its absolute index.
    pub fn push(&mut self, value: Value) -> usize {
        self.slots.push(value);
        self.slots.len() - 1
    }

    /// Pops `n` values from the current frame.
    pub fn pop(&mut self, n: usize) -> RuntimeResult<()> {
        let size = self.size();
        if n > size {
            return Err(RuntimeError::usage(format!(
                "Stack underflow (tried to pop {} values, only {} in the frame)",
                n, size
            )));
        }
        let new_top = self.top() - n;
        self.slots.truncate(new_top);
        Ok(())
    }

    /// Pops and returns the topmost value of the current frame.
    pub fn pop_value(&mut self) -> RuntimeResult<Value> {
        if self.size() == 0 {
            return Err(RuntimeError::usage(
                "Stack underflow (tried to pop 1 value, only 0 in the frame)",
            ));
        }
        Ok(self.slots.pop().unwrap_or(Value::Null))
    }

    /// Resolves a fake index against the current frame.
    pub fn fake_to_abs(&self, index: isize) -> RuntimeResult<usize> {
        let size = self.size();
        let relative = if index < 0 {
            index + size as isize
        } else {
            index
        };

        if relative < 0 || relative as usize >= size {
            return Err(RuntimeError::usage(format!(
                "Invalid index {} (stack size = {})",
                index, size
            )));
        }

        Ok(self.base() + relative as usize)
    }

    /// Converts an absolute index into a non-negative fake index.
    pub fn abs_to_fake(&self, abs: usize) -> isize {
        abs as isize - self.base() as isize
    }

    /// Reads the value at an absolute index.
    pub fn get(&self, abs: usize) -> &Value {
        &self.slots[abs]
    }

    /// Overwrites the value at an absolute index.
    pub fn set(&mut self, abs: usize, value: Value) {
        self.slots[abs] = value;
    }

    /// Inserts a value at an absolute index, shifting the values above it.
    pub fn insert(&mut self, abs: usize, value: Value) {
        self.slots.insert(abs, value);
    }

    /// Swaps the values at two absolute indices.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Removes every value at or above an absolute index.
    pub fn truncate(&mut self, abs: usize) {
        self.slots.truncate(abs);
    }

    /// Grows or shrinks the current frame to `size` values, padding with null.
    pub fn set_size(&mut self, size: usize) {
        let new_top = self.base() + size;
        self.slots.resize(new_top, Value::Null);
    }

    /// Returns the values from an absolute index to the top.
    pub fn values_from(&self, abs: usize) -> &[Value] {
        &self.slots[abs..]
    }

    /// Enters a frame starting at `base`.
    pub fn push_frame(&mut self, base: usize, function: Option<Rc<str>>) {
        self.frames.push(Frame::new(base, function));
    }

    /// Leaves the current frame. The root frame is kept.
    pub fn pop_frame(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }
}
