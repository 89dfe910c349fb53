//! Index and slice operations.

use super::{meta_args, normalize_index, slice_bounds, try_metamethod, unsupported};
use crate::alloc::array_from;
use crate::metamethod::Metamethod;
use crate::thread::Thread;
use crate::value::Value;
use core_types::{RuntimeError, RuntimeResult};
use std::rc::Rc;

fn char_at(s: &str, index: i64) -> RuntimeResult<Value> {
    let len = s.chars().count();
    normalize_index(index, len)
        .and_then(|i| s.chars().nth(i))
        .map(|c| Value::String(Rc::from(c.to_string())))
        .ok_or_else(|| {
            RuntimeError::bounds(format!(
                "Invalid string index {} (length is {})",
                index, len
            ))
        })
}

fn wrong_key(container: &Value, key: &Value) -> RuntimeError {
    RuntimeError::type_error(format!(
        "Attempting to index a {} with a '{}'",
        container.type_name(),
        key.type_name()
    ))
}

/// Reads `container[key]`.
///
/// A table yields null for an absent key. A namespace requires the name to
/// be bound. Arrays and strings take integer indices, negative ones counting
/// from the end.
pub fn index_get(t: &mut Thread, container: &Value, key: &Value) -> RuntimeResult<Value> {
    match (container, key) {
        (Value::Table(table), key) => {
            if key.is_null() {
                return Ok(Value::Null);
            }
            Ok(table.borrow().get(key).cloned().unwrap_or(Value::Null))
        }
        (Value::Namespace(ns), Value::String(name)) => {
            let ns = ns.borrow();
            ns.get(name).cloned().ok_or_else(|| {
                RuntimeError::field(format!(
                    "Attempting to access nonexistent field '{}' from namespace '{}'",
                    name,
                    ns.full_name()
                ))
            })
        }
        (Value::Array(array), Value::Int(index)) => {
            let array = array.borrow();
            normalize_index(*index, array.len())
                .and_then(|i| array.get(i).cloned())
                .ok_or_else(|| {
                    RuntimeError::bounds(format!(
                        "Invalid array index {} (length is {})",
                        index,
                        array.len()
                    ))
                })
        }
        (Value::String(s), Value::Int(index)) => char_at(s, *index),
        (Value::Namespace(_) | Value::Array(_) | Value::String(_), key) => {
            Err(wrong_key(container, key))
        }
        _ => try_metamethod(t, container, Metamethod::Index, meta_args![key.clone()])?
            .ok_or_else(|| unsupported("index", container)),
    }
}

/// Performs `container[key] = value`.
///
/// Assigning null to a table key removes it. Null table keys are rejected.
pub fn index_set(t: &mut Thread, container: &Value, key: &Value, value: Value) -> RuntimeResult<()> {
    match (container, key) {
        (Value::Table(_), Value::Null) => Err(RuntimeError::type_error(
            "Attempting to index-assign a table using a key of type 'null'",
        )),
        (Value::Table(table), key) => {
            t.with_mem(|mem| table.borrow_mut().set(mem, key.clone(), value));
            Ok(())
        }
        (Value::Namespace(ns), Value::String(name)) => {
            t.with_mem(|mem| ns.borrow_mut().set(mem, name.clone(), value));
            Ok(())
        }
        (Value::Array(array), Value::Int(index)) => {
            let stored = {
                let mut array = array.borrow_mut();
                match normalize_index(*index, array.len()) {
                    Some(i) => t.with_mem(|mem| array.set(mem, i, value)),
                    None => false,
                }
            };
            if stored {
                Ok(())
            } else {
                Err(RuntimeError::bounds(format!(
                    "Invalid array index {} (length is {})",
                    index,
                    array.borrow().len()
                )))
            }
        }
        (Value::Namespace(_) | Value::Array(_), key) => Err(wrong_key(container, key)),
        _ => try_metamethod(
            t,
            container,
            Metamethod::IndexAssign,
            meta_args![key.clone(), value],
        )?
        .map(|_| ())
        .ok_or_else(|| unsupported("index-assign", container)),
    }
}

/// Reads `container[lo .. hi]`; null bounds stand for the ends.
///
/// Array slices are new arrays. String slices are new strings.
pub fn slice_get(t: &mut Thread, container: &Value, lo: &Value, hi: &Value) -> RuntimeResult<Value> {
    match container {
        Value::Array(array) => {
            let items = {
                let array = array.borrow();
                let (l, h) = slice_bounds(lo, hi, array.len())?;
                array.slice(l, h).to_vec()
            };
            Ok(Value::Array(t.with_mem(|mem| array_from(mem, items))))
        }
        Value::String(s) => {
            let (l, h) = slice_bounds(lo, hi, s.chars().count())?;
            let sub: String = s.chars().skip(l).take(h - l).collect();
            Ok(Value::String(Rc::from(sub)))
        }
        _ => try_metamethod(
            t,
            container,
            Metamethod::Slice,
            meta_args![lo.clone(), hi.clone()],
        )?
        .ok_or_else(|| unsupported("slice", container)),
    }
}

/// Performs `container[lo .. hi] = value`.
///
/// For arrays, `value` must be an array exactly as long as the slice.
pub fn slice_set(
    t: &mut Thread,
    container: &Value,
    lo: &Value,
    hi: &Value,
    value: Value,
) -> RuntimeResult<()> {
    match container {
        Value::Array(array) => {
            let source = match &value {
                Value::Array(src) => src.borrow().values().to_vec(),
                other => {
                    return Err(RuntimeError::type_error(format!(
                        "Attempting to slice-assign a value of type '{}' into an array",
                        other.type_name()
                    )))
                }
            };

            let mut array = array.borrow_mut();
            let (l, h) = slice_bounds(lo, hi, array.len())?;
            if h - l != source.len() {
                return Err(RuntimeError::range(format!(
                    "Array slice-assign lengths do not match (destination is {}, source is {})",
                    h - l,
                    source.len()
                )));
            }
            t.with_mem(|mem| array.assign_slice(mem, l, source));
            Ok(())
        }
        _ => try_metamethod(
            t,
            container,
            Metamethod::SliceAssign,
            meta_args![lo.clone(), hi.clone(), value],
        )?
        .map(|_| ())
        .ok_or_else(|| unsupported("slice-assign", container)),
    }
}
