//! Method calls and iteration.

use super::field::instance_field;
use super::{index_get, invoke_n, meta_args, unsupported};
use crate::class::lookup_member;
use crate::metamethod::{get_metamethod, Metamethod};
use crate::thread::{class_name_of, Thread};
use crate::value::Value;
use core_types::{RuntimeError, RuntimeResult};
use std::rc::Rc;
use std::vec;

/// Calls the method `name` of the object at absolute index `slot`.
///
/// The slots above `slot` hold the arguments. The object becomes `this`.
/// An instance without a field or method of that name falls back to
/// `opMethod`, which receives the name before the arguments. Results
/// replace the object and arguments as in a plain call.
pub fn call_method(
    t: &mut Thread,
    slot: usize,
    name: &Rc<str>,
    expected: Option<usize>,
) -> RuntimeResult<usize> {
    let object = t.stack().get(slot).clone();

    let method = match &object {
        Value::Instance(instance) => match instance_field(instance, name) {
            Some(method) => method,
            None => match get_metamethod(&object, Metamethod::Method) {
                Some(fallback) => {
                    t.stack_mut().insert(slot + 1, Value::String(name.clone()));
                    fallback
                }
                None => {
                    t.stack_mut().truncate(slot);
                    return Err(RuntimeError::field(format!(
                        "No implementation of method '{}' or {} for instance of class '{}'",
                        name,
                        Metamethod::Method,
                        class_name_of(&object)
                    )));
                }
            },
        },
        Value::Table(_) | Value::Namespace(_) => {
            match index_get(t, &object, &Value::String(name.clone())) {
                Ok(method) => method,
                Err(e) => {
                    t.stack_mut().truncate(slot);
                    return Err(e);
                }
            }
        }
        Value::Class(class) => match lookup_member(class, name) {
            Some(method) => method,
            None => {
                t.stack_mut().truncate(slot);
                return Err(RuntimeError::field(format!(
                    "Attempting to call nonexistent method '{}' of class '{}'",
                    name,
                    class.borrow().name()
                )));
            }
        },
        other => {
            t.stack_mut().truncate(slot);
            return Err(RuntimeError::type_error(format!(
                "Attempting to call method '{}' on a value of type '{}'",
                name,
                other.type_name()
            )));
        }
    };

    t.stack_mut().insert(slot, method);
    t.call_abs(slot, expected)
}

#[derive(Debug)]
enum ForeachState {
    Snapshot(vec::IntoIter<(Value, Value)>),
    Custom {
        iter: Value,
        state: Value,
        control: Value,
    },
}

/// An in-progress `foreach` loop.
///
/// Builtin containers are iterated over a snapshot taken when the loop
/// begins, so mutating the container during the loop is safe. A function
/// is its own iterator, and an instance supplies one through `opApply`.
#[derive(Debug)]
pub struct Foreach {
    state: ForeachState,
}

/// Starts iterating over `container`. `extra` is passed to `opApply`.
pub fn foreach_begin(t: &mut Thread, container: &Value, extra: Value) -> RuntimeResult<Foreach> {
    let items: Vec<(Value, Value)> = match container {
        Value::Table(table) => table
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        Value::Namespace(ns) => ns
            .borrow()
            .iter()
            .map(|(k, v)| (Value::String(k.clone()), v.clone()))
            .collect(),
        Value::Array(array) => array
            .borrow()
            .values()
            .iter()
            .enumerate()
            .map(|(i, v)| (Value::Int(i as i64), v.clone()))
            .collect(),
        Value::String(s) => s
            .chars()
            .enumerate()
            .map(|(i, c)| (Value::Int(i as i64), Value::String(Rc::from(c.to_string()))))
            .collect(),
        Value::Function(_) => {
            return Ok(Foreach {
                state: ForeachState::Custom {
                    iter: container.clone(),
                    state: Value::Null,
                    control: Value::Null,
                },
            })
        }
        _ => {
            let method = get_metamethod(container, Metamethod::Apply)
                .ok_or_else(|| unsupported("iterate over", container))?;
            let mut results = invoke_n(t, method, container.clone(), meta_args![extra], 3)?;
            let control = results.pop().unwrap_or(Value::Null);
            let state = results.pop().unwrap_or(Value::Null);
            let iter = results.pop().unwrap_or(Value::Null);
            return Ok(Foreach {
                state: ForeachState::Custom {
                    iter,
                    state,
                    control,
                },
            });
        }
    };

    Ok(Foreach {
        state: ForeachState::Snapshot(items.into_iter()),
    })
}

impl Foreach {
    /// Produces the next `(index, value)` pair, or `None` when done.
    ///
    /// Custom iterators are called with `this` set to the state and the
    /// previous index as the argument; a null index ends the loop.
    pub fn next(&mut self, t: &mut Thread) -> RuntimeResult<Option<(Value, Value)>> {
        match &mut self.state {
            ForeachState::Snapshot(items) => Ok(items.next()),
            ForeachState::Custom {
                iter,
                state,
                control,
            } => {
                let mut results = invoke_n(
                    t,
                    iter.clone(),
                    state.clone(),
                    meta_args![control.clone()],
                    2,
                )?;
                let value = results.pop().unwrap_or(Value::Null);
                let index = results.pop().unwrap_or(Value::Null);
                if index.is_null() {
                    return Ok(None);
                }
                *control = index.clone();
                Ok(Some((index, value)))
            }
        }
    }
}
