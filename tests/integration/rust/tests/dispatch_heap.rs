//! Dispatcher and Heap Integration Tests
//!
//! Verifies that stores performed through the generic operations reach the
//! heap's write barrier and keep its generational and marking bookkeeping
//! consistent.

use core_types::GcId;
use integration_tests::thread_with_heap;
use memory_manager::{HeapConfig, MarkingPhase};
use object_model::Thread;

fn id_of(t: &Thread, slot: isize) -> GcId {
    t.get_value(slot).unwrap().gc_id().unwrap()
}

/// Test: every reference store is counted once by the heap
#[test]
fn test_barrier_calls_reach_heap() {
    let (mut t, heap) = thread_with_heap(HeapConfig::default());
    let outer = t.new_table();
    let inner = t.new_table();
    let before = heap.borrow().stats().barrier_calls;

    t.push_string("k");
    t.dup(inner).unwrap();
    t.idxa(outer).unwrap();

    t.push_string("n");
    t.push_int(1);
    t.idxa(outer).unwrap();

    assert_eq!(heap.borrow().stats().barrier_calls, before + 1);
    assert_eq!(
        heap.borrow().edges_from(id_of(&t, outer)),
        vec![id_of(&t, inner)]
    );
}

/// Test: storing a young object into an old one is remembered
#[test]
fn test_old_to_young_store_is_remembered() {
    let (mut t, heap) = thread_with_heap(HeapConfig {
        promotion_age: 1,
        ..HeapConfig::default()
    });
    let old = t.new_table();
    heap.borrow_mut().promote_survivors();

    let young = t.new_array(0);
    t.push_int(0);
    t.dup(young).unwrap();
    t.idxa(old).unwrap();

    let old_id = id_of(&t, old);
    assert!(heap.borrow().remembered_set().contains(old_id));
    assert!(heap.borrow().stats().remembered_insertions >= 1);
}

/// Test: marking follows edges recorded through field and index stores
#[test]
fn test_marking_follows_dispatch_edges() {
    let (mut t, heap) = thread_with_heap(HeapConfig::default());

    let class = t.new_class("Node", None).unwrap();
    t.push_null();
    t.add_field(class, "next").unwrap();

    let root = t.new_table();
    let slot = t.dup(class).unwrap();
    t.push_null();
    t.call(slot, Some(1)).unwrap();
    let node = t.abs_index(-1).unwrap();

    t.push_string("node");
    t.dup(node).unwrap();
    t.idxa(root).unwrap();

    let payload = t.new_array(2);
    let payload_id = id_of(&t, payload);
    t.dup(payload).unwrap();
    t.fielda(node, "next").unwrap();

    let garbage = t.new_table();
    let garbage_id = id_of(&t, garbage);

    let root_id = id_of(&t, root);
    heap.borrow_mut().start_marking(&[root_id]);
    let report = heap.borrow_mut().finish_marking();

    assert!(report.unmarked.contains(&garbage_id));
    assert!(!report.unmarked.contains(&id_of(&t, node)));
    assert!(!report.unmarked.contains(&id_of(&t, class)));
    assert!(!report.unmarked.contains(&payload_id));
    assert_eq!(heap.borrow().marking_phase(), MarkingPhase::Idle);
}

/// Test: a store during marking shades the white target
#[test]
fn test_store_during_marking_preserves_invariant() {
    let (mut t, heap) = thread_with_heap(HeapConfig::default());
    let root = t.new_table();
    let late = t.new_table();
    let root_id = id_of(&t, root);
    let late_id = id_of(&t, late);

    heap.borrow_mut().start_marking(&[root_id]);
    while !heap.borrow_mut().mark_step() {}

    t.push_string("late");
    t.dup(late).unwrap();
    t.idxa(root).unwrap();

    let report = heap.borrow_mut().finish_marking();
    assert!(!report.unmarked.contains(&late_id));
    assert!(heap.borrow().stats().barrier_shades >= 1);
}

/// Test: allocation counts per kind
#[test]
fn test_allocation_statistics() {
    let (mut t, heap) = thread_with_heap(HeapConfig::default());
    let before = heap.borrow().stats().total_allocations();
    t.new_table();
    t.new_array(3);
    t.new_class("C", None).unwrap();
    t.new_function("f", |_, _| Ok(0));
    assert_eq!(heap.borrow().stats().total_allocations(), before + 4);
}
