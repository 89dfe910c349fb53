//! Length operations.

use super::{meta_args, try_metamethod, unsupported};
use crate::metamethod::Metamethod;
use crate::thread::Thread;
use crate::value::Value;
use core_types::{RuntimeError, RuntimeResult};

/// Resolves the length of `value` without checking the result type.
///
/// Strings count characters; tables, namespaces and arrays count entries.
/// Other values go through `opLength`, which may return anything.
pub fn length_get_value(t: &mut Thread, value: &Value) -> RuntimeResult<Value> {
    let builtin = match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Table(table) => Some(table.borrow().len()),
        Value::Namespace(ns) => Some(ns.borrow().len()),
        Value::Array(array) => Some(array.borrow().len()),
        _ => None,
    };

    match builtin {
        Some(len) => Ok(Value::Int(len as i64)),
        None => try_metamethod(t, value, Metamethod::Length, meta_args![])?
            .ok_or_else(|| unsupported("get the length of", value)),
    }
}

/// Resolves the length of `value` as an integer.
pub fn length_get(t: &mut Thread, value: &Value) -> RuntimeResult<i64> {
    match length_get_value(t, value)? {
        Value::Int(len) => Ok(len),
        other => Err(RuntimeError::type_error(format!(
            "Expected length to be an int, but got '{}' instead",
            other.type_name()
        ))),
    }
}

/// Sets the length of `value`.
///
/// Arrays are truncated or padded with null. Other values go through
/// `opLengthAssign`.
pub fn length_set(t: &mut Thread, value: &Value, length: Value) -> RuntimeResult<()> {
    match value {
        Value::Array(array) => match length {
            Value::Int(len) if len >= 0 => {
                let len = usize::try_from(len)
                    .map_err(|_| RuntimeError::range(format!("Invalid length ({})", len)))?;
                array.borrow_mut().resize(len)
            }
            Value::Int(len) => Err(RuntimeError::range(format!(
                "Invalid length ({})",
                len
            ))),
            other => Err(RuntimeError::type_error(format!(
                "Attempting to set the length of an array using a length of type '{}'",
                other.type_name()
            ))),
        },
        _ => try_metamethod(t, value, Metamethod::LengthAssign, meta_args![length])?
            .map(|_| ())
            .ok_or_else(|| unsupported("set the length of", value)),
    }
}
