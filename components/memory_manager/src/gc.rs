//! Generations and incremental tri-color marking state.
//!
//! The heap does not own object storage (objects live in reference-counted
//! cells owned by the object model). What it tracks is collector metadata:
//! which generation every object belongs to and, during a marking cycle,
//! which color it has.

use crate::heap::ObjectRecord;
use core_types::GcId;
use std::collections::{BTreeMap, BTreeSet};

/// Mark colors for tri-color marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkColor {
    /// Unmarked (not yet visited)
    White,
    /// In process (reachable, needs scanning)
    Gray,
    /// Fully processed (reachable, all references scanned)
    Black,
}

/// Generation an object currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// Recently allocated
    Young,
    /// Survived enough promotion passes
    Old,
}

/// Phase of the incremental marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkingPhase {
    /// No marking cycle in progress
    Idle,
    /// Gray objects remain to be scanned
    Marking,
}

/// Outcome of a completed marking cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkingReport {
    /// Objects found reachable from the roots
    pub marked: usize,
    /// Objects left white (unreachable through recorded edges)
    pub unmarked: Vec<GcId>,
}

/// Gray worklist of the incremental marker.
#[derive(Debug, Default)]
pub(crate) struct Marker {
    active: bool,
    gray: Vec<GcId>,
}

impl Marker {
    pub(crate) fn phase(&self) -> MarkingPhase {
        if self.active {
            MarkingPhase::Marking
        } else {
            MarkingPhase::Idle
        }
    }

    pub(crate) fn begin(&mut self) {
        self.active = true;
        self.gray.clear();
    }

    pub(crate) fn end(&mut self) {
        self.active = false;
        self.gray.clear();
    }

    pub(crate) fn shade(&mut self, id: GcId) {
        self.gray.push(id);
    }

    pub(crate) fn is_drained(&self) -> bool {
        self.gray.is_empty()
    }

    /// Scans up to `budget` gray objects, greying their white targets.
    ///
    /// Returns the number of objects blackened.
    pub(crate) fn step(
        &mut self,
        budget: usize,
        records: &mut BTreeMap<GcId, ObjectRecord>,
        edges: &BTreeMap<GcId, BTreeSet<GcId>>,
    ) -> usize {
        let mut scanned = 0;

        while scanned < budget {
            let Some(id) = self.gray.pop() else {
                break;
            };

            match records.get(&id) {
                Some(record) if record.color != MarkColor::Black => {}
                _ => continue,
            }

            if let Some(targets) = edges.get(&id) {
                for target in targets {
                    if let Some(record) = records.get_mut(target) {
                        if record.color == MarkColor::White {
                            record.color = MarkColor::Gray;
                            self.gray.push(*target);
                        }
                    }
                }
            }

            if let Some(record) = records.get_mut(&id) {
                record.color = MarkColor::Black;
            }
            scanned += 1;
        }

        scanned
    }
}
