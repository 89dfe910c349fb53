//! End-to-End Tests
//!
//! Drives a small native library (a namespace holding a `Stack` class)
//! purely through the embedding API, the way a host application would.

use core_types::ErrorKind;
use integration_tests::thread_with_heap;
use memory_manager::HeapConfig;
use object_model::Thread;

/// Registers global namespace `coll` with class `Stack` backed by a hidden
/// array.
fn register_library(t: &mut Thread) {
    let ns = t.new_namespace("coll");

    let class = t.new_class("Stack", None).unwrap();
    t.push_null();
    t.add_hidden_field(class, "_items").unwrap();

    t.new_function("constructor", |t, _| {
        t.new_array(0);
        t.hfielda(0, "_items")?;
        Ok(0)
    });
    t.add_method(class, "constructor").unwrap();

    t.new_function("push", |t, _| {
        t.check_num_params("push", 1)?;
        let items = t.hfield(0, "_items")?;
        let len = t.len(items)?;
        t.lenai(items, len + 1)?;
        t.dup(1)?;
        t.idxai(items, len)?;
        Ok(0)
    });
    t.add_method(class, "push").unwrap();

    t.new_function("opLength", |t, _| {
        let items = t.hfield(0, "_items")?;
        t.push_len(items)?;
        Ok(1)
    });
    t.add_method(class, "opLength").unwrap();

    t.new_function("opIndex", |t, _| {
        let index = t.check_int_param("opIndex", 1, "index")?;
        let items = t.hfield(0, "_items")?;
        t.idxi(items, index)?;
        Ok(1)
    });
    t.add_method(class, "opIndex").unwrap();

    t.new_function("opApply", |t, _| {
        let items = t.hfield(0, "_items")?;
        t.new_function("iterator", |t, _| {
            // this = items, 1 = previous index
            let next = if t.get_value(1)?.is_null() { 0 } else { t.get_int(1)? + 1 };
            if next >= t.len(0)? {
                t.push_null();
                t.push_null();
            } else {
                t.push_int(next);
                t.idxi(0, next)?;
            }
            Ok(2)
        });
        // iterator, state, control
        t.dup(items)?;
        t.push_null();
        Ok(3)
    });
    t.add_method(class, "opApply").unwrap();

    t.new_function("toString", |t, _| {
        t.push_string("Stack(");
        t.push_len(0)?;
        t.push_to_string(-1)?;
        t.swap_top()?;
        t.pop_top()?;
        t.push_string(")");
        t.cat(3)?;
        Ok(1)
    });
    t.add_method(class, "toString").unwrap();

    t.dup(class).unwrap();
    t.fielda(ns, "Stack").unwrap();
    t.pop_top().unwrap();
    t.new_global("coll").unwrap();
}

fn new_stack(t: &mut Thread) -> isize {
    let coll = t.get_global("coll").unwrap();
    let slot = t.field(coll, "Stack").unwrap();
    t.push_null();
    t.call(slot, Some(1)).unwrap();
    let stack = t.abs_index(-1).unwrap();
    for i in 1..=3 {
        let call = t.dup(stack).unwrap();
        t.push_int(i * 10);
        t.method_call(call, "push", Some(0)).unwrap();
    }
    stack
}

/// Test: the library is reachable through globals and behaves like a container
#[test]
fn test_library_round_trip() {
    let (mut t, _heap) = thread_with_heap(HeapConfig::default());
    register_library(&mut t);
    let stack = new_stack(&mut t);

    assert_eq!(t.len(stack).unwrap(), 3);
    t.idxi(stack, -1).unwrap();
    assert_eq!(t.get_int(-1).unwrap(), 30);

    t.push_to_string(stack).unwrap();
    assert_eq!(&*t.get_string(-1).unwrap(), "Stack(3)");

    t.push_to_string_raw(stack).unwrap();
    assert_eq!(&*t.get_string(-1).unwrap(), "instance of class Stack");
}

/// Test: foreach drives the opApply iterator until it yields null
#[test]
fn test_library_iteration() {
    let (mut t, _heap) = thread_with_heap(HeapConfig::default());
    register_library(&mut t);
    let stack = new_stack(&mut t);

    let mut state = t.foreach_begin(stack).unwrap();
    let mut sum = 0;
    let mut seen = 0;
    while t.foreach_next(&mut state).unwrap() {
        sum += t.get_int(-1).unwrap();
        assert_eq!(t.get_int(-2).unwrap(), seen);
        seen += 1;
        t.pop(2).unwrap();
    }
    assert_eq!(seen, 3);
    assert_eq!(sum, 60);
}

/// Test: errors raised inside library natives carry a traceback and leave
/// the caller's stack intact
#[test]
fn test_library_errors() {
    let (mut t, _heap) = thread_with_heap(HeapConfig::default());
    register_library(&mut t);
    let stack = new_stack(&mut t);
    let size = t.stack_size();

    t.push_int(7);
    let err = t.idx(stack).unwrap_err();
    assert_eq!(err.kind, ErrorKind::BoundsError);
    assert!(err.traceback.iter().any(|frame| frame.to_string().contains("opIndex")));

    t.set_stack_size(size).unwrap();
    t.push_string("x");
    let err = t.idx(stack).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UsageError);
    assert!(err.message.contains("opIndex - expected 'int' for index"));

    t.set_stack_size(size).unwrap();
    let call = t.dup(stack).unwrap();
    let err = t.method_call(call, "pop", None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::FieldError);
    assert_eq!(t.stack_size(), size);
}

/// Test: a small young generation promotes library objects as they survive
#[test]
fn test_library_under_promotion_pressure() {
    let (mut t, heap) = thread_with_heap(HeapConfig {
        young_capacity: 4,
        promotion_age: 1,
        ..HeapConfig::default()
    });
    register_library(&mut t);
    let stack = new_stack(&mut t);

    assert!(heap.borrow().stats().promotion_passes > 0);
    assert!(heap.borrow().old_count() > 0);
    assert!(heap.borrow().young_count() <= 4);
    assert_eq!(t.len(stack).unwrap(), 3);
}
