//! Execution contexts.
//!
//! A thread owns an operand stack and runs native functions on it. Calls
//! nest: each native call gets a frame whose slot 0 is `this`, and
//! metamethods invoked by the dispatcher are ordinary calls, so dispatch can
//! re-enter itself to any depth up to [`VmConfig::max_native_depth`].
//!
//! [`VmConfig::max_native_depth`]: crate::VmConfig::max_native_depth

use crate::alloc::new_instance;
use crate::class::find_method;
use crate::metamethod::{get_metamethod, Metamethod};
use crate::stack::Stack;
use crate::value::{ClassRef, FunctionRef, Value};
use crate::vm::Vm;
use core_types::{GcId, ObjectKind, RuntimeError, RuntimeResult, StackFrame};
use log::{debug, warn};
use memory_manager::MemoryManager;
use std::rc::Rc;

/// Name of the method run when a class is called.
pub const CONSTRUCTOR: &str = "constructor";

/// An execution context.
#[derive(Debug)]
pub struct Thread {
    vm: Rc<Vm>,
    stack: Stack,
    native_depth: usize,
}

impl Thread {
    /// Creates a thread with an empty root frame.
    pub fn new(vm: &Rc<Vm>) -> Self {
        Thread {
            vm: vm.clone(),
            stack: Stack::with_capacity(vm.config().initial_stack_capacity),
            native_depth: 0,
        }
    }

    /// Returns the VM this thread belongs to.
    pub fn vm(&self) -> &Rc<Vm> {
        &self.vm
    }

    /// Returns the operand stack.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub(crate) fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    /// Number of native calls currently active on this thread.
    pub fn native_depth(&self) -> usize {
        self.native_depth
    }

    /// Runs `f` with exclusive access to the memory manager.
    ///
    /// The manager is borrowed only for the duration of `f`, which must not
    /// call back into the thread.
    pub fn with_mem<R>(&self, f: impl FnOnce(&mut dyn MemoryManager) -> R) -> R {
        let mut mem = self.vm.memory_manager().borrow_mut();
        f(&mut *mem)
    }

    /// Allocates an identity for a new heap object.
    pub fn alloc(&self, kind: ObjectKind) -> GcId {
        self.with_mem(|mem| mem.allocate(kind))
    }

    /// Calls the value at absolute index `slot`.
    ///
    /// The slot above it holds `this` and the slots above that hold the
    /// arguments. Afterwards the callee, `this` and the arguments are
    /// replaced by the results. With `expected` set, the results are padded
    /// with nulls or truncated to that count.
    ///
    /// Returns the number of results left on the stack. On failure the stack
    /// is cut back to `slot`.
    pub(crate) fn call_abs(&mut self, slot: usize, expected: Option<usize>) -> RuntimeResult<usize> {
        match self.dispatch_call(slot, expected) {
            Ok(count) => Ok(count),
            Err(e) => {
                self.stack.truncate(slot);
                Err(e)
            }
        }
    }

    fn dispatch_call(&mut self, slot: usize, expected: Option<usize>) -> RuntimeResult<usize> {
        if self.stack.top() < slot + 2 {
            return Err(RuntimeError::usage(
                "Calls need a slot for 'this' above the callee",
            ));
        }
        let num_params = self.stack.top() - slot - 2;
        let callee = self.stack.get(slot).clone();

        match callee {
            Value::Function(func) => self.call_native(func, slot, num_params, expected),
            Value::Class(class) => self.instantiate(class, slot, num_params, expected),
            Value::Instance(_) => match get_metamethod(&callee, Metamethod::Call) {
                Some(method) => {
                    self.stack.set(slot, method);
                    self.stack.set(slot + 1, callee);
                    self.call_abs(slot, expected)
                }
                None => Err(RuntimeError::type_error(format!(
                    "No implementation of {} for instance of class '{}'",
                    Metamethod::Call,
                    class_name_of(&callee)
                ))),
            },
            other => Err(RuntimeError::type_error(format!(
                "Attempting to call a value of type '{}'",
                other.type_name()
            ))),
        }
    }

    fn call_native(
        &mut self,
        func: FunctionRef,
        slot: usize,
        num_params: usize,
        expected: Option<usize>,
    ) -> RuntimeResult<usize> {
        let max_depth = self.vm.config().max_native_depth;
        if self.native_depth >= max_depth {
            warn!(
                "native call depth limit {} reached calling '{}'",
                max_depth,
                func.name()
            );
            return Err(RuntimeError::call(format!(
                "Native call depth exceeded ({} nested calls) calling '{}'",
                max_depth,
                func.name()
            )));
        }

        let base = slot + 1;
        self.stack.push_frame(base, Some(func.name().clone()));
        self.native_depth += 1;

        let native = func.native().clone();
        let outcome = native(self, num_params);

        self.native_depth -= 1;
        let results = outcome.and_then(|count| {
            let top = self.stack.top();
            if count > top - base {
                return Err(RuntimeError::usage(format!(
                    "'{}' returned {} values but only {} are on its stack",
                    func.name(),
                    count,
                    top - base
                )));
            }
            Ok(self.stack.values_from(top - count).to_vec())
        });
        self.stack.pop_frame();
        self.stack.truncate(slot);

        let mut results = results.map_err(|e| e.with_frame(StackFrame::native(&**func.name())))?;
        if let Some(expected) = expected {
            results.resize(expected, Value::Null);
        }

        let count = results.len();
        for value in results {
            self.stack.push(value);
        }
        Ok(count)
    }

    fn instantiate(
        &mut self,
        class: ClassRef,
        slot: usize,
        num_params: usize,
        expected: Option<usize>,
    ) -> RuntimeResult<usize> {
        let instance = Value::Instance(self.with_mem(|mem| new_instance(mem, &class)));
        debug!("instantiated class '{}'", class.borrow().name());

        match find_method(&class, CONSTRUCTOR) {
            Some(ctor) if !matches!(ctor, Value::Function(_)) => {
                return Err(RuntimeError::type_error(format!(
                    "Class '{}' has a {} of type '{}', expected a function",
                    class.borrow().name(),
                    CONSTRUCTOR,
                    ctor.type_name()
                )));
            }
            Some(ctor) => {
                self.stack.set(slot, ctor);
                self.stack.set(slot + 1, instance.clone());
                self.call_abs(slot, Some(0))?;
            }
            None if num_params > 0 => {
                return Err(RuntimeError::call(format!(
                    "Class '{}' has no constructor but was called with {} parameters",
                    class.borrow().name(),
                    num_params
                )));
            }
            None => self.stack.truncate(slot),
        }

        self.stack.push(instance);
        let mut count = 1;
        if let Some(expected) = expected {
            self.stack.set_size(self.stack.size() - 1 + expected);
            count = expected;
        }
        Ok(count)
    }
}

pub(crate) fn class_name_of(value: &Value) -> Rc<str> {
    match value {
        Value::Instance(i) => i.borrow().class_name(),
        Value::Class(c) => c.borrow().name().clone(),
        other => Rc::from(other.type_name()),
    }
}
