//! Comparison, equality and membership.

use super::{meta_args, try_metamethod, unsupported};
use crate::metamethod::Metamethod;
use crate::thread::Thread;
use crate::value::Value;
use core_types::{RuntimeError, RuntimeResult};
use std::cmp::Ordering;

fn ordering_to_int(ordering: Ordering) -> i64 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

fn builtin_order(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            let (x, y) = (a.as_number()?, b.as_number()?);
            // Signed zeros are equal; only NaN falls back to the total order.
            Some(x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y)))
        }
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ if a.identity_eq(b) => Some(Ordering::Equal),
        _ => None,
    }
}

fn expect_cmp_result(result: Value) -> RuntimeResult<i64> {
    match result {
        Value::Int(i) => Ok(i),
        other => Err(RuntimeError::type_error(format!(
            "{} is expected to return an int, not '{}'",
            Metamethod::Cmp,
            other.type_name()
        ))),
    }
}

/// Three-way comparison. The sign of the result orders `a` against `b`.
///
/// Numbers compare numerically and strings lexicographically; a value
/// always compares equal to itself. Otherwise `opCmp` is tried on `a`, then
/// on `b` with the sign of its result flipped.
pub fn compare(t: &mut Thread, a: &Value, b: &Value) -> RuntimeResult<i64> {
    if let Some(ordering) = builtin_order(a, b) {
        return Ok(ordering_to_int(ordering));
    }

    if let Some(result) = try_metamethod(t, a, Metamethod::Cmp, meta_args![b.clone()])? {
        return expect_cmp_result(result);
    }

    if let Some(result) = try_metamethod(t, b, Metamethod::Cmp, meta_args![a.clone()])? {
        return expect_cmp_result(result).map(|r| -r.signum());
    }

    Err(RuntimeError::type_error(format!(
        "Can't compare types '{}' and '{}'",
        a.type_name(),
        b.type_name()
    )))
}

fn expect_equals_result(result: Value) -> RuntimeResult<bool> {
    match result {
        Value::Bool(b) => Ok(b),
        other => Err(RuntimeError::type_error(format!(
            "{} is expected to return a bool, not '{}'",
            Metamethod::Equals,
            other.type_name()
        ))),
    }
}

/// Equality test.
///
/// Numbers compare numerically. An instance operand defining `opEquals`
/// decides (the left one first). Otherwise values of the same type are equal
/// when identical; values of different types cannot be compared.
pub fn equals(t: &mut Thread, a: &Value, b: &Value) -> RuntimeResult<bool> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => return Ok(x == y),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            return Ok(a.as_number() == b.as_number())
        }
        _ => {}
    }

    if let Some(result) = try_metamethod(t, a, Metamethod::Equals, meta_args![b.clone()])? {
        return expect_equals_result(result);
    }

    if let Some(result) = try_metamethod(t, b, Metamethod::Equals, meta_args![a.clone()])? {
        return expect_equals_result(result);
    }

    if a.type_name() == b.type_name() {
        return Ok(a.identity_eq(b));
    }

    Err(RuntimeError::type_error(format!(
        "Can't compare types '{}' and '{}' for equality",
        a.type_name(),
        b.type_name()
    )))
}

/// The `is` operation: tag and payload identity, never dispatched.
pub fn identity_equals(a: &Value, b: &Value) -> bool {
    a.identity_eq(b)
}

/// The `in` operation: whether `container` includes `item`.
///
/// Strings test for a substring, tables and namespaces for a key, arrays
/// for an identical element. Instances go through `opIn`.
pub fn contains(t: &mut Thread, item: &Value, container: &Value) -> RuntimeResult<bool> {
    match container {
        Value::String(s) => match item {
            Value::String(sub) => Ok(s.contains(&**sub)),
            other => Err(RuntimeError::type_error(format!(
                "Can only use strings to look in strings, not '{}'",
                other.type_name()
            ))),
        },
        Value::Table(table) => Ok(!item.is_null() && table.borrow().contains_key(item)),
        Value::Namespace(ns) => match item {
            Value::String(name) => Ok(ns.borrow().contains(name)),
            other => Err(RuntimeError::type_error(format!(
                "Can only use strings to look in namespaces, not '{}'",
                other.type_name()
            ))),
        },
        Value::Array(array) => Ok(array.borrow().values().iter().any(|v| v.identity_eq(item))),
        _ => try_metamethod(t, container, Metamethod::In, meta_args![item.clone()])?
            .map(|v| v.is_truthy())
            .ok_or_else(|| unsupported("test membership in", container)),
    }
}
