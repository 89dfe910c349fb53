//! Unit tests for GcId and ObjectKind

use core_types::{GcId, ObjectKind};
use std::collections::HashSet;

#[test]
fn test_gc_ids_are_hashable() {
    let ids: HashSet<GcId> = [GcId(1), GcId(2), GcId(1)].into_iter().collect();
    assert_eq!(ids.len(), 2);
}

#[test]
fn test_object_kind_all_is_complete() {
    assert_eq!(ObjectKind::ALL.len(), 6);
    assert!(ObjectKind::ALL.contains(&ObjectKind::Instance));
}

#[test]
fn test_object_kind_class_name() {
    assert_eq!(ObjectKind::Class.name(), "class");
}
