//! Generic operation dispatch.
//!
//! Every operation resolves in three tiers:
//! 1. builtin semantics of the primary operand's type
//! 2. a metamethod found through the operand's
//!    [`overriding_class`](crate::Value::overriding_class)
//! 3. a `TypeError` naming the operation and the operand type
//!
//! Metamethods are called through the thread like any other function, with
//! the overriding operand as `this`, so they may re-enter the dispatcher.

mod call;
mod compare;
mod concat;
mod convert;
mod field;
mod index;
mod length;

pub use call::{call_method, foreach_begin, Foreach};
pub use compare::{compare, contains, equals, identity_equals};
pub use concat::{concatenate, concatenate_assign};
pub use convert::to_display_string;
pub use field::{field_get, field_set, hidden_field_get, hidden_field_set, remove_key};
pub use index::{index_get, index_set, slice_get, slice_set};
pub use length::{length_get, length_get_value, length_set};

use crate::metamethod::{get_metamethod, Metamethod};
use crate::thread::Thread;
use crate::value::Value;
use arrayvec::ArrayVec;
use core_types::{RuntimeError, RuntimeResult};
use log::trace;

/// Arguments passed to a metamethod, not counting `this`.
pub type MetaArgs = ArrayVec<Value, 3>;

/// Builds a [`MetaArgs`] list.
macro_rules! meta_args {
    ($($arg:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut args = $crate::dispatch::MetaArgs::new();
        $(args.push($arg);)*
        args
    }};
}
pub(crate) use meta_args;

/// Calls `method` with `this` and `args` and returns its first result.
pub(crate) fn invoke(
    t: &mut Thread,
    method: Value,
    this: Value,
    args: MetaArgs,
) -> RuntimeResult<Value> {
    let mut results = invoke_n(t, method, this, args, 1)?;
    Ok(results.pop().unwrap_or(Value::Null))
}

/// Calls `method` with `this` and `args` and returns exactly `count` results.
pub(crate) fn invoke_n(
    t: &mut Thread,
    method: Value,
    this: Value,
    args: MetaArgs,
    count: usize,
) -> RuntimeResult<Vec<Value>> {
    let slot = t.stack_mut().push(method);
    t.stack_mut().push(this);
    for arg in args {
        t.stack_mut().push(arg);
    }

    t.call_abs(slot, Some(count))?;
    let results = t.stack().values_from(slot).to_vec();
    t.stack_mut().truncate(slot);
    Ok(results)
}

/// Second tier: runs `method` on `operand` if its class defines it.
///
/// Returns `Ok(None)` when the operand cannot override the operation.
pub(crate) fn try_metamethod(
    t: &mut Thread,
    operand: &Value,
    method: Metamethod,
    args: MetaArgs,
) -> RuntimeResult<Option<Value>> {
    match get_metamethod(operand, method) {
        Some(m) => {
            trace!("dispatching {} to metamethod", method);
            invoke(t, m, operand.clone(), args).map(Some)
        }
        None => Ok(None),
    }
}

/// Third tier error for an operation with no semantics for `operand`.
pub(crate) fn unsupported(operation: &str, operand: &Value) -> RuntimeError {
    RuntimeError::type_error(format!(
        "Attempting to {} a value of type '{}'",
        operation,
        operand.type_name()
    ))
}

/// Resolves a possibly negative index against a length.
pub(crate) fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let index = if index < 0 { index + len } else { index };
    if (0..len).contains(&index) {
        Some(index as usize)
    } else {
        None
    }
}

/// Resolves slice bounds; null stands for the start or end of the sequence.
pub(crate) fn slice_bounds(lo: &Value, hi: &Value, len: usize) -> RuntimeResult<(usize, usize)> {
    let bound = |v: &Value, default: i64| -> RuntimeResult<i64> {
        match v {
            Value::Null => Ok(default),
            Value::Int(i) if *i < 0 => Ok(*i + len as i64),
            Value::Int(i) => Ok(*i),
            other => Err(RuntimeError::type_error(format!(
                "Attempting to slice with a '{}'",
                other.type_name()
            ))),
        }
    };

    let l = bound(lo, 0)?;
    let h = bound(hi, len as i64)?;

    if l < 0 || l > h || h > len as i64 {
        return Err(RuntimeError::bounds(format!(
            "Invalid slice indices [{} .. {}] (length = {})",
            l, h, len
        )));
    }

    Ok((l as usize, h as usize))
}
