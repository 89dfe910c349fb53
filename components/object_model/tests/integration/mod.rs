//! Integration tests for metamethod dispatch
//!
//! Metamethods here are native functions written against the stack API,
//! so every test also exercises re-entrant dispatch.

use core_types::ErrorKind;
use object_model::{Thread, Value, Vm, VmConfig};

fn thread() -> Thread {
    Thread::new(&Vm::new(VmConfig::default()))
}

fn instantiate(t: &mut Thread, class: isize) -> isize {
    let slot = t.dup(class).unwrap();
    t.push_null();
    t.call(slot, Some(1)).unwrap();
    t.abs_index(-1).unwrap()
}

/// A class whose instances forward indexing to a table in a hidden field.
fn proxy_class(t: &mut Thread) -> isize {
    let class = t.new_class("Proxy", None).unwrap();
    t.push_null();
    t.add_hidden_field(class, "_store").unwrap();

    t.new_function("constructor", |t, _| {
        t.new_table();
        t.hfielda(0, "_store")?;
        Ok(0)
    });
    t.add_method(class, "constructor").unwrap();

    t.new_function("opIndex", |t, _| {
        let store = t.hfield(0, "_store")?;
        t.dup(1)?;
        t.idx(store)?;
        Ok(1)
    });
    t.add_method(class, "opIndex").unwrap();

    t.new_function("opIndexAssign", |t, _| {
        let store = t.hfield(0, "_store")?;
        t.dup(1)?;
        t.dup(2)?;
        t.idxa(store)?;
        Ok(0)
    });
    t.add_method(class, "opIndexAssign").unwrap();

    class
}

#[test]
fn test_index_metamethods_reenter_dispatch() {
    let mut t = thread();
    let class = proxy_class(&mut t);
    let p = instantiate(&mut t, class);

    t.push_string("k");
    t.push_int(10);
    t.idxa(p).unwrap();

    t.push_string("k");
    t.idx(p).unwrap();
    assert_eq!(t.get_int(-1).unwrap(), 10);

    t.push_string("other");
    t.idx(p).unwrap();
    assert!(t.get_value(-1).unwrap().is_null());
}

#[test]
fn test_constructor_receives_arguments() {
    let mut t = thread();
    let class = t.new_class("Pt", None).unwrap();
    t.push_int(0);
    t.add_field(class, "x").unwrap();
    t.new_function("constructor", |t, n| {
        t.check_num_params("constructor", 1)?;
        assert_eq!(n, 1);
        t.dup(1)?;
        t.fielda(0, "x")?;
        Ok(0)
    });
    t.add_method(class, "constructor").unwrap();

    let slot = t.dup(class).unwrap();
    t.push_null();
    t.push_int(12);
    t.call(slot, Some(1)).unwrap();
    t.field(slot, "x").unwrap();
    assert_eq!(t.get_int(-1).unwrap(), 12);
}

#[test]
fn test_class_without_constructor_rejects_arguments() {
    let mut t = thread();
    let class = t.new_class("Pt", None).unwrap();
    let slot = t.dup(class).unwrap();
    t.push_null();
    t.push_int(1);
    let err = t.call(slot, None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::CallError);
    assert_eq!(t.stack_size(), 1);
}

#[test]
fn test_frozen_class_rejects_members() {
    let mut t = thread();
    let class = t.new_class("Pt", None).unwrap();
    instantiate(&mut t, class);
    t.push_int(1);
    let err = t.add_field(class, "late").unwrap_err();
    assert_eq!(err.kind, ErrorKind::StateError);
}

#[test]
fn test_compare_dispatches_both_sides() {
    let mut t = thread();
    let class = t.new_class("Num", None).unwrap();
    t.push_int(0);
    t.add_field(class, "v").unwrap();
    t.new_function("opCmp", |t, _| {
        let mine = {
            t.raw_field(0, "v")?;
            t.get_int(-1)?
        };
        let theirs = match t.get_value(1)? {
            Value::Int(i) => i,
            _ => {
                t.raw_field(1, "v")?;
                t.get_int(-1)?
            }
        };
        t.push_int(mine - theirs);
        Ok(1)
    });
    t.add_method(class, "opCmp").unwrap();

    let a = instantiate(&mut t, class);
    t.push_int(1);
    t.raw_fielda(a, "v").unwrap();
    let b = instantiate(&mut t, class);
    t.push_int(5);
    t.raw_fielda(b, "v").unwrap();

    assert!(t.cmp(a, b).unwrap() < 0);
    assert!(t.cmp(b, a).unwrap() > 0);

    let n = t.push_int(3);
    assert_eq!(t.cmp(n, b).unwrap(), -1);
    assert_eq!(t.cmp(b, n).unwrap(), 2);
}

#[test]
fn test_equals_override() {
    let mut t = thread();
    let class = t.new_class("Any", None).unwrap();
    t.new_function("opEquals", |t, _| {
        t.push_bool(true);
        Ok(1)
    });
    t.add_method(class, "opEquals").unwrap();
    let a = instantiate(&mut t, class);
    let n = t.push_int(4);

    assert!(t.equals(a, n).unwrap());
    assert!(t.equals(n, a).unwrap());
    assert!(!t.is(a, n).unwrap());
}

#[test]
fn test_call_and_method_dispatch() {
    let mut t = thread();
    let class = t.new_class("Greeter", None).unwrap();
    t.push_string("hi");
    t.add_field(class, "greeting").unwrap();
    t.new_function("greet", |t, _| {
        t.raw_field(0, "greeting")?;
        t.push_string("!");
        t.cat(2)?;
        Ok(1)
    });
    t.add_method(class, "greet").unwrap();
    t.new_function("opCall", |t, n| {
        t.push_int(n as i64);
        Ok(1)
    });
    t.add_method(class, "opCall").unwrap();
    t.new_function("opMethod", |t, _| {
        t.dup(1)?;
        Ok(1)
    });
    t.add_method(class, "opMethod").unwrap();

    let g = instantiate(&mut t, class);

    let slot = t.dup(g).unwrap();
    t.method_call(slot, "greet", Some(1)).unwrap();
    assert_eq!(&*t.get_string(-1).unwrap(), "hi!");

    let slot = t.dup(g).unwrap();
    t.method_call(slot, "wave", Some(1)).unwrap();
    assert_eq!(&*t.get_string(-1).unwrap(), "wave");

    let slot = t.dup(g).unwrap();
    t.push_null();
    t.push_int(1);
    t.push_int(2);
    t.call(slot, Some(1)).unwrap();
    assert_eq!(t.get_int(-1).unwrap(), 2);
}

#[test]
fn test_missing_method_without_fallback() {
    let mut t = thread();
    let class = t.new_class("Plain", None).unwrap();
    let inst = instantiate(&mut t, class);
    let slot = t.dup(inst).unwrap();
    let err = t.method_call(slot, "nothing", None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::FieldError);
    assert_eq!(t.stack_size() as isize, slot);
}

#[test]
fn test_derived_class_inherits_metamethods() {
    let mut t = thread();
    let base = t.new_class("Base", None).unwrap();
    t.new_function("opLength", |t, _| {
        t.push_int(3);
        Ok(1)
    });
    t.add_method(base, "opLength").unwrap();

    let derived = t.new_class("Derived", Some(base)).unwrap();
    let inst = instantiate(&mut t, derived);
    assert_eq!(t.len(inst).unwrap(), 3);
}

#[test]
fn test_to_string_override() {
    let mut t = thread();
    let class = t.new_class("Named", None).unwrap();
    t.new_function("toString", |t, _| {
        t.push_string("custom");
        Ok(1)
    });
    t.add_method(class, "toString").unwrap();
    let inst = instantiate(&mut t, class);

    let s = t.push_to_string(inst).unwrap();
    assert_eq!(&*t.get_string(s).unwrap(), "custom");
    let s = t.push_to_string_raw(inst).unwrap();
    assert_eq!(&*t.get_string(s).unwrap(), "instance of class Named");
}

#[test]
fn test_to_string_must_return_string() {
    let mut t = thread();
    let class = t.new_class("Bad", None).unwrap();
    t.new_function("toString", |t, _| {
        t.push_int(1);
        Ok(1)
    });
    t.add_method(class, "toString").unwrap();
    let inst = instantiate(&mut t, class);
    assert_eq!(t.push_to_string(inst).unwrap_err().kind, ErrorKind::TypeError);
}

#[test]
fn test_concatenation_metamethods() {
    let mut t = thread();
    let class = t.new_class("Rope", None).unwrap();
    t.new_function("opCat", |t, _| {
        t.push_string("left");
        Ok(1)
    });
    t.add_method(class, "opCat").unwrap();
    t.new_function("opCat_r", |t, _| {
        t.push_string("right");
        Ok(1)
    });
    t.add_method(class, "opCat_r").unwrap();
    let inst = instantiate(&mut t, class);

    t.dup(inst).unwrap();
    t.push_int(1);
    t.cat(2).unwrap();
    assert_eq!(&*t.get_string(-1).unwrap(), "left");

    t.push_int(1);
    t.dup(inst).unwrap();
    t.cat(2).unwrap();
    assert_eq!(&*t.get_string(-1).unwrap(), "right");
}

#[test]
fn test_cat_assign_in_place() {
    let mut t = thread();
    let class = t.new_class("Log", None).unwrap();
    t.push_int(0);
    t.add_field(class, "count").unwrap();
    t.new_function("opCatAssign", |t, _| {
        t.raw_field(0, "count")?;
        let count = t.get_int(-1)?;
        t.push_int(count + 1);
        t.raw_fielda(0, "count")?;
        Ok(0)
    });
    t.add_method(class, "opCatAssign").unwrap();
    let inst = instantiate(&mut t, class);

    t.push_string("a");
    t.push_string("b");
    t.cateq(inst, 2).unwrap();

    t.raw_field(inst, "count").unwrap();
    assert_eq!(t.get_int(-1).unwrap(), 2);
    assert!(matches!(t.get_value(inst).unwrap(), Value::Instance(_)));
}

#[test]
fn test_membership_metamethod() {
    let mut t = thread();
    let class = t.new_class("Evens", None).unwrap();
    t.new_function("opIn", |t, _| {
        let n = t.get_int(1)?;
        t.push_bool(n % 2 == 0);
        Ok(1)
    });
    t.add_method(class, "opIn").unwrap();
    let inst = instantiate(&mut t, class);

    let four = t.push_int(4);
    let five = t.push_int(5);
    assert!(t.is_in(four, inst).unwrap());
    assert!(!t.is_in(five, inst).unwrap());
}

#[test]
fn test_foreach_over_table_is_a_snapshot() {
    let mut t = thread();
    let tab = t.new_table();
    for (k, v) in [("a", 1), ("b", 2)] {
        t.push_string(k);
        t.push_int(v);
        t.idxa(tab).unwrap();
    }

    let mut state = t.foreach_begin(tab).unwrap();
    let mut seen = Vec::new();
    while t.foreach_next(&mut state).unwrap() {
        let key = t.get_string(-2).unwrap();
        let value = t.get_int(-1).unwrap();
        t.pop(2).unwrap();

        t.push_string("c");
        t.push_int(3);
        t.idxa(tab).unwrap();
        seen.push((key.to_string(), value));
    }

    assert_eq!(seen, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    assert_eq!(t.len(tab).unwrap(), 3);
}

#[test]
fn test_foreach_with_apply() {
    let mut t = thread();
    let class = t.new_class("Range", None).unwrap();
    t.new_function("opApply", |t, _| {
        t.new_function("iter", |t, _| {
            let next = match t.get_value(1)? {
                Value::Int(i) => i + 1,
                _ => 0,
            };
            if next >= 3 {
                t.push_null();
                t.push_null();
            } else {
                t.push_int(next);
                t.push_int(next * 10);
            }
            Ok(2)
        });
        t.push_null();
        t.push_null();
        Ok(3)
    });
    t.add_method(class, "opApply").unwrap();
    let inst = instantiate(&mut t, class);

    let mut state = t.foreach_begin(inst).unwrap();
    let mut values = Vec::new();
    while t.foreach_next(&mut state).unwrap() {
        values.push(t.get_int(-1).unwrap());
        t.pop(2).unwrap();
    }
    assert_eq!(values, vec![0, 10, 20]);
}

#[test]
fn test_foreach_over_int_is_type_error() {
    let mut t = thread();
    let n = t.push_int(1);
    assert_eq!(t.foreach_begin(n).unwrap_err().kind, ErrorKind::TypeError);
}

#[test]
fn test_native_depth_limit() {
    let vm = Vm::new(VmConfig {
        max_native_depth: 8,
        ..VmConfig::default()
    });
    let mut t = Thread::new(&vm);
    let f = t.new_function("recurse", |t, _| {
        t.get_global("recurse")?;
        t.push_null();
        t.call(-2, Some(0))?;
        Ok(0)
    });
    t.dup(f).unwrap();
    t.new_global("recurse").unwrap();
    t.push_null();
    let err = t.call(f, Some(0)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::CallError);
    assert_eq!(err.traceback.len(), 8);
    assert_eq!(t.native_depth(), 0);
    assert_eq!(t.stack_size(), 0);
}

#[test]
fn test_constructor_must_be_a_function() {
    let mut t = thread();
    let a = t.new_class("A", None).unwrap();
    let b = t.new_class("B", None).unwrap();
    t.dup(b).unwrap();
    t.add_method(a, "constructor").unwrap();
    t.dup(a).unwrap();
    t.add_method(b, "constructor").unwrap();

    let slot = t.dup(a).unwrap();
    t.push_null();
    let err = t.call(slot, Some(1)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert!(err.message.contains("Class 'A'"));
    assert_eq!(t.stack_size(), 2);
}

#[test]
fn test_non_function_metamethod_is_ignored() {
    let mut t = thread();
    let class = t.new_class("Callee", None).unwrap();
    t.new_table();
    t.add_method(class, "opCall").unwrap();
    let c = instantiate(&mut t, class);

    let slot = t.dup(c).unwrap();
    t.push_null();
    let err = t.call(slot, None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert!(err.message.contains("opCall"));
    assert_eq!(t.stack_size(), 2);
}
