//! Concatenation.

use super::{invoke_n, meta_args, try_metamethod};
use crate::alloc::array_from;
use crate::metamethod::{get_metamethod, Metamethod};
use crate::thread::Thread;
use crate::value::Value;
use core_types::{RuntimeError, RuntimeResult};
use std::rc::Rc;

fn builtin_concat(t: &Thread, a: &Value, b: &Value) -> Option<Value> {
    let items = match (a, b) {
        (Value::String(x), Value::String(y)) => {
            let mut s = String::with_capacity(x.len() + y.len());
            s.push_str(x);
            s.push_str(y);
            return Some(Value::String(Rc::from(s)));
        }
        (Value::Array(x), Value::Array(y)) => {
            let mut items = x.borrow().values().to_vec();
            items.extend_from_slice(y.borrow().values());
            items
        }
        (Value::Array(x), other) => {
            let mut items = x.borrow().values().to_vec();
            items.push(other.clone());
            items
        }
        (other, Value::Array(y)) => {
            let mut items = vec![other.clone()];
            items.extend_from_slice(y.borrow().values());
            items
        }
        _ => return None,
    };
    Some(Value::Array(t.with_mem(|mem| array_from(mem, items))))
}

/// The `~` operation.
///
/// Strings join with strings and arrays join with anything, always into a
/// new value. Otherwise `opCat` is tried on `a`, then `opCat_r` on `b`.
pub fn concatenate(t: &mut Thread, a: &Value, b: &Value) -> RuntimeResult<Value> {
    if let Some(v) = builtin_concat(t, a, b) {
        return Ok(v);
    }

    if let Some(v) = try_metamethod(t, a, Metamethod::Cat, meta_args![b.clone()])? {
        return Ok(v);
    }

    if let Some(v) = try_metamethod(t, b, Metamethod::CatR, meta_args![a.clone()])? {
        return Ok(v);
    }

    Err(RuntimeError::type_error(format!(
        "Can't concatenate '{}' and '{}'",
        a.type_name(),
        b.type_name()
    )))
}

/// The `~=` operation.
///
/// An instance whose class defines `opCatAssign` is updated in place and
/// `None` is returned. Otherwise the result of [`concatenate`] is returned
/// for the caller to store in place of `dest`.
pub fn concatenate_assign(t: &mut Thread, dest: &Value, value: &Value) -> RuntimeResult<Option<Value>> {
    if let Some(method) = get_metamethod(dest, Metamethod::CatAssign) {
        invoke_n(t, method, dest.clone(), meta_args![value.clone()], 0)?;
        return Ok(None);
    }

    concatenate(t, dest, value).map(Some)
}
