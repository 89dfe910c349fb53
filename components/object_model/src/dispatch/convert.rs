//! String conversion.

use super::{meta_args, try_metamethod};
use crate::metamethod::Metamethod;
use crate::thread::Thread;
use crate::value::Value;
use core_types::{RuntimeError, RuntimeResult};
use std::rc::Rc;

fn raw_string(value: &Value) -> Rc<str> {
    let text = match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format!("{:?}", f),
        Value::String(s) => return s.clone(),
        Value::Table(t) => format!("table {}", t.id()),
        Value::Namespace(ns) => format!("namespace {}", ns.borrow().full_name()),
        Value::Array(a) => format!("array {}", a.id()),
        Value::Function(f) => format!("function {}", f.name()),
        Value::Class(c) => format!("class {}", c.borrow().name()),
        Value::Instance(i) => format!("instance of class {}", i.borrow().class_name()),
    };
    Rc::from(text)
}

/// Converts `value` to a string.
///
/// With `raw` set, or when the value's class does not define `toString`,
/// the structural representation is produced: the value itself for scalars,
/// the type name plus identity or name for objects.
pub fn to_display_string(t: &mut Thread, value: &Value, raw: bool) -> RuntimeResult<Rc<str>> {
    if !raw {
        if let Some(result) = try_metamethod(t, value, Metamethod::ToString, meta_args![])? {
            return match result {
                Value::String(s) => Ok(s),
                other => Err(RuntimeError::type_error(format!(
                    "{} was supposed to return a string, but returned a '{}'",
                    Metamethod::ToString,
                    other.type_name()
                ))),
            };
        }
    }

    Ok(raw_string(value))
}
