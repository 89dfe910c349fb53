//! Contract tests verifying the memory_manager API consumed by the object model.
//! These tests ensure all exported types and functions exist with correct signatures.

use core_types::{GcId, ObjectKind};
use memory_manager::{
    Generation, Heap, HeapConfig, MarkColor, MarkingPhase, MemoryManager, RememberedSet,
};

/// Test Heap contract: new() -> Self
#[test]
fn contract_heap_new() {
    let heap = Heap::new();
    assert_eq!(heap.object_count(), 0);
    assert_eq!(heap.config(), &HeapConfig::default());
}

/// Test MemoryManager contract: allocate(kind) -> GcId
#[test]
fn contract_allocate_returns_unique_ids() {
    let mut heap = Heap::new();
    let ids: Vec<GcId> = ObjectKind::ALL.iter().map(|k| heap.allocate(*k)).collect();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(heap.object_count(), ObjectKind::ALL.len());
}

/// Test MemoryManager contract: new objects start young and white
#[test]
fn contract_new_objects_are_young() {
    let mut heap = Heap::new();
    let id = heap.allocate(ObjectKind::Class);
    let record = heap.record(id).cloned();
    assert_eq!(record.as_ref().map(|r| r.generation), Some(Generation::Young));
    assert_eq!(record.as_ref().map(|r| r.color), Some(MarkColor::White));
}

/// Test MemoryManager contract: write_barrier(owner, target) is O(1) bookkeeping
#[test]
fn contract_write_barrier_counts_calls() {
    let mut heap = Heap::new();
    let owner = heap.allocate(ObjectKind::Instance);
    let target = heap.allocate(ObjectKind::Table);
    for _ in 0..5 {
        heap.write_barrier(owner, target);
    }
    assert_eq!(heap.stats().barrier_calls, 5);
    assert_eq!(heap.edges_from(owner), vec![target]);
}

/// Test MemoryManager is object safe and usable behind a shared cell
#[test]
fn contract_memory_manager_is_object_safe() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let shared: Rc<RefCell<dyn MemoryManager>> = Rc::new(RefCell::new(Heap::new()));
    let a = shared.borrow_mut().allocate(ObjectKind::Table);
    let b = shared.borrow_mut().allocate(ObjectKind::Table);
    shared.borrow_mut().write_barrier(a, b);
}

/// Test RememberedSet contract
#[test]
fn contract_remembered_set() {
    let mut set = RememberedSet::default();
    set.add(GcId(1));
    assert_eq!(set.len(), 1);
    assert_eq!(set.roots(), vec![GcId(1)]);
}

/// Test marking contract: start -> step* -> finish
#[test]
fn contract_marking_cycle() {
    let mut heap = Heap::new();
    let root = heap.allocate(ObjectKind::Namespace);
    heap.start_marking(&[root]);
    assert_eq!(heap.marking_phase(), MarkingPhase::Marking);
    while !heap.mark_step() {}
    let report = heap.finish_marking();
    assert_eq!(report.marked, 1);
    assert_eq!(heap.marking_phase(), MarkingPhase::Idle);
}
