//! Field, hidden-field and key-removal operations.

use super::{index_get, index_set, meta_args, try_metamethod};
use crate::class::{find_method, lookup_member};
use crate::metamethod::{get_metamethod, Metamethod};
use crate::thread::Thread;
use crate::value::{InstanceRef, Value};
use core_types::{RuntimeError, RuntimeResult};
use std::rc::Rc;

fn no_fields(container: &Value, verb: &str, name: &str) -> RuntimeError {
    RuntimeError::type_error(format!(
        "Attempting to {} field '{}' of a value of type '{}'",
        verb,
        name,
        container.type_name()
    ))
}

/// Reads a declared field of an instance, falling back to its class's methods.
pub(super) fn instance_field(instance: &InstanceRef, name: &str) -> Option<Value> {
    let stored = {
        let inst = instance.borrow();
        inst.get_field(name).map(|slot| inst.field(slot).clone())
    };
    stored.or_else(|| {
        let class = instance.borrow().class().clone();
        find_method(&class, name)
    })
}

/// Reads the field `name` of `container`.
///
/// With `raw` unset, an instance whose class defines `opField` has every
/// field read routed through it. With `raw` set, only the instance's
/// declared fields and its class's methods are consulted. Reading an absent
/// field of a namespace, class or instance is a `FieldError`.
pub fn field_get(t: &mut Thread, container: &Value, name: &Rc<str>, raw: bool) -> RuntimeResult<Value> {
    match container {
        Value::Table(_) | Value::Namespace(_) => {
            index_get(t, container, &Value::String(name.clone()))
        }
        Value::Class(class) => lookup_member(class, name).ok_or_else(|| {
            RuntimeError::field(format!(
                "Attempting to access nonexistent field '{}' from class '{}'",
                name,
                class.borrow().name()
            ))
        }),
        Value::Instance(instance) => {
            if !raw {
                let key = Value::String(name.clone());
                if let Some(v) = try_metamethod(t, container, Metamethod::Field, meta_args![key])? {
                    return Ok(v);
                }
            }

            instance_field(instance, name).ok_or_else(|| {
                RuntimeError::field(format!(
                    "Attempting to access nonexistent field '{}' from instance of class '{}'",
                    name,
                    instance.borrow().class_name()
                ))
            })
        }
        other => Err(no_fields(other, "access", name)),
    }
}

/// Writes the field `name` of `container`.
///
/// With `raw` unset, an instance whose class defines `opFieldAssign` has
/// every field write routed through it. Classes and instances never gain
/// fields: assigning to an undeclared one is a `FieldError`.
pub fn field_set(
    t: &mut Thread,
    container: &Value,
    name: &Rc<str>,
    value: Value,
    raw: bool,
) -> RuntimeResult<()> {
    match container {
        Value::Table(_) | Value::Namespace(_) => {
            index_set(t, container, &Value::String(name.clone()), value)
        }
        Value::Class(class) => {
            let slot = class.borrow().get_member(name);
            match slot {
                Some(slot) => {
                    t.with_mem(|mem| class.borrow_mut().set_member(mem, slot, value));
                    Ok(())
                }
                None => Err(RuntimeError::field(format!(
                    "Attempting to assign to nonexistent field '{}' in class '{}'",
                    name,
                    class.borrow().name()
                ))),
            }
        }
        Value::Instance(instance) => {
            if !raw {
                if let Some(method) = get_metamethod(container, Metamethod::FieldAssign) {
                    let args = meta_args![Value::String(name.clone()), value];
                    super::invoke_n(t, method, container.clone(), args, 0)?;
                    return Ok(());
                }
            }

            let slot = instance.borrow().get_field(name);
            match slot {
                Some(slot) => {
                    t.with_mem(|mem| instance.borrow_mut().set_field(mem, slot, value));
                    Ok(())
                }
                None => Err(RuntimeError::field(format!(
                    "Attempting to assign to nonexistent field '{}' in instance of class '{}'",
                    name,
                    instance.borrow().class_name()
                ))),
            }
        }
        other => Err(no_fields(other, "assign to", name)),
    }
}

/// Reads a hidden field of a class or instance.
pub fn hidden_field_get(container: &Value, name: &str) -> RuntimeResult<Value> {
    match container {
        Value::Class(class) => {
            let c = class.borrow();
            match c.get_hidden_field(name) {
                Some(slot) => Ok(c.member(slot).clone()),
                None => Err(RuntimeError::field(format!(
                    "Attempting to access nonexistent hidden field '{}' from class '{}'",
                    name,
                    c.name()
                ))),
            }
        }
        Value::Instance(instance) => {
            let inst = instance.borrow();
            match inst.get_hidden_field(name) {
                Some(slot) => Ok(inst.field(slot).clone()),
                None => Err(RuntimeError::field(format!(
                    "Attempting to access nonexistent hidden field '{}' from instance of class '{}'",
                    name,
                    inst.class_name()
                ))),
            }
        }
        other => Err(no_fields(other, "access hidden", name)),
    }
}

/// Writes a hidden field of a class or instance.
pub fn hidden_field_set(t: &Thread, container: &Value, name: &str, value: Value) -> RuntimeResult<()> {
    match container {
        Value::Class(class) => {
            let slot = class.borrow().get_hidden_field(name);
            match slot {
                Some(slot) => {
                    t.with_mem(|mem| class.borrow_mut().set_member(mem, slot, value));
                    Ok(())
                }
                None => Err(RuntimeError::field(format!(
                    "Attempting to assign to nonexistent hidden field '{}' in class '{}'",
                    name,
                    class.borrow().name()
                ))),
            }
        }
        Value::Instance(instance) => {
            let slot = instance.borrow().get_hidden_field(name);
            match slot {
                Some(slot) => {
                    t.with_mem(|mem| instance.borrow_mut().set_field(mem, slot, value));
                    Ok(())
                }
                None => Err(RuntimeError::field(format!(
                    "Attempting to assign to nonexistent hidden field '{}' in instance of class '{}'",
                    name,
                    instance.borrow().class_name()
                ))),
            }
        }
        other => Err(no_fields(other, "assign to hidden", name)),
    }
}

/// Removes `key` from a table or namespace.
///
/// For a table this is assigning null. A namespace must have the name bound.
pub fn remove_key(t: &mut Thread, container: &Value, key: &Value) -> RuntimeResult<()> {
    match container {
        Value::Table(_) => index_set(t, container, key, Value::Null),
        Value::Namespace(ns) => match key {
            Value::String(name) => ns.borrow_mut().remove(name).map(|_| ()),
            other => Err(RuntimeError::type_error(format!(
                "Attempting to remove a key of type '{}' from a namespace",
                other.type_name()
            ))),
        },
        other => Err(RuntimeError::type_error(format!(
            "Attempting to remove a key from a value of type '{}'",
            other.type_name()
        ))),
    }
}
