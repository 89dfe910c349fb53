//! Heap bookkeeping with generational promotion and incremental marking.
//!
//! This module implements the concrete [`MemoryManager`] used by the
//! runtime:
//! - Young generation: freshly allocated objects, aged by promotion passes
//! - Old generation: objects that survived `promotion_age` passes
//! - Write barriers for tracking old-to-young edges and the tri-color
//!   invariant during marking

use crate::config::HeapConfig;
use crate::gc::{Generation, MarkColor, Marker, MarkingPhase, MarkingReport};
use crate::manager::MemoryManager;
use crate::write_barrier::{record_edge, RememberedSet};
use core_types::{GcId, ObjectKind};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Collector metadata for one allocated object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    /// Kind of the object
    pub kind: ObjectKind,
    /// Generation the object belongs to
    pub generation: Generation,
    /// Number of promotion passes survived while young
    pub age: u8,
    /// Mark color in the current (or last) marking cycle
    pub color: MarkColor,
}

impl ObjectRecord {
    /// Creates the record of a freshly allocated object.
    pub fn new(kind: ObjectKind) -> Self {
        ObjectRecord {
            kind,
            generation: Generation::Young,
            age: 0,
            color: MarkColor::White,
        }
    }
}

/// Heap statistics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeapStats {
    /// Number of allocations, per object kind
    pub allocations: HashMap<ObjectKind, usize>,
    /// Number of write barrier invocations
    pub barrier_calls: usize,
    /// Number of owners newly added to the remembered set
    pub remembered_insertions: usize,
    /// Number of targets greyed by the barrier during marking
    pub barrier_shades: usize,
    /// Number of objects promoted to the old generation
    pub promotions: usize,
    /// Number of promotion passes performed
    pub promotion_passes: usize,
    /// Number of completed marking cycles
    pub marking_cycles: usize,
}

impl HeapStats {
    /// Total allocations across all object kinds.
    pub fn total_allocations(&self) -> usize {
        self.allocations.values().sum()
    }
}

/// The heap bookkeeping structure.
///
/// Contains:
/// - Per-object records (kind, generation, age, color)
/// - The edge graph reported through write barriers
/// - Remembered set for tracking old-to-young edges
/// - The incremental marker
///
/// Edges are conservative. The barrier reports stores, never overwrites or
/// removals, so an owner keeps an edge to every target it has ever held and
/// marking treats a replaced target as reachable from that owner. Each
/// owner's edge set is bounded by the distinct targets stored into it.
#[derive(Debug)]
pub struct Heap {
    config: HeapConfig,
    next_id: u64,
    records: BTreeMap<GcId, ObjectRecord>,
    // Only grows; see the type docs.
    edges: BTreeMap<GcId, BTreeSet<GcId>>,
    remembered_set: RememberedSet,
    marker: Marker,
    stats: HeapStats,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    /// Creates a new heap with the default configuration.
    pub fn new() -> Self {
        Self::with_config(HeapConfig::default())
    }

    /// Creates a new heap with a custom configuration.
    pub fn with_config(config: HeapConfig) -> Self {
        Heap {
            config,
            next_id: 1,
            records: BTreeMap::new(),
            edges: BTreeMap::new(),
            remembered_set: RememberedSet::new(),
            marker: Marker::default(),
            stats: HeapStats::default(),
        }
    }

    /// Returns the heap configuration.
    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    /// Returns the heap statistics.
    pub fn stats(&self) -> &HeapStats {
        &self.stats
    }

    /// Returns the collector record of an object.
    pub fn record(&self, id: GcId) -> Option<&ObjectRecord> {
        self.records.get(&id)
    }

    /// Returns the number of tracked objects.
    pub fn object_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the number of young objects.
    pub fn young_count(&self) -> usize {
        self.count_generation(Generation::Young)
    }

    /// Returns the number of old objects.
    pub fn old_count(&self) -> usize {
        self.count_generation(Generation::Old)
    }

    fn count_generation(&self, generation: Generation) -> usize {
        self.records
            .values()
            .filter(|r| r.generation == generation)
            .count()
    }

    /// Returns the remembered set.
    pub fn remembered_set(&self) -> &RememberedSet {
        &self.remembered_set
    }

    /// Returns the targets recorded for an owner, in allocation order.
    pub fn edges_from(&self, owner: GcId) -> Vec<GcId> {
        self.edges
            .get(&owner)
            .map(|targets| targets.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns the current marking phase.
    pub fn marking_phase(&self) -> MarkingPhase {
        self.marker.phase()
    }

    /// Ages every young object and promotes those reaching the configured
    /// promotion age.
    ///
    /// Remembered owners that no longer reference any young object are
    /// dropped from the remembered set afterwards.
    ///
    /// Returns the number of promoted objects.
    pub fn promote_survivors(&mut self) -> usize {
        let promotion_age = self.config.promotion_age;
        let mut promoted = 0;

        for record in self.records.values_mut() {
            if record.generation != Generation::Young {
                continue;
            }
            record.age = record.age.saturating_add(1);
            if record.age >= promotion_age {
                record.generation = Generation::Old;
                promoted += 1;
            }
        }

        let records = &self.records;
        let edges = &self.edges;
        self.remembered_set.retain(|owner| {
            edges.get(&owner).is_some_and(|targets| {
                targets.iter().any(|target| {
                    records
                        .get(target)
                        .is_some_and(|r| r.generation == Generation::Young)
                })
            })
        });

        self.stats.promotions += promoted;
        self.stats.promotion_passes += 1;
        log::debug!(
            "promotion pass: {} promoted, {} young, {} remembered",
            promoted,
            self.young_count(),
            self.remembered_set.len()
        );

        promoted
    }

    /// Starts an incremental marking cycle from the given roots.
    ///
    /// Every tracked object is reset to white and the roots are greyed.
    pub fn start_marking(&mut self, roots: &[GcId]) {
        for record in self.records.values_mut() {
            record.color = MarkColor::White;
        }

        self.marker.begin();
        for root in roots {
            if let Some(record) = self.records.get_mut(root) {
                if record.color == MarkColor::White {
                    record.color = MarkColor::Gray;
                    self.marker.shade(*root);
                }
            }
        }

        log::debug!("marking started with {} roots", roots.len());
    }

    /// Performs one bounded marking step.
    ///
    /// Returns true when no gray objects remain.
    pub fn mark_step(&mut self) -> bool {
        if self.marker.phase() == MarkingPhase::Idle {
            return true;
        }
        self.marker
            .step(self.config.mark_step_budget, &mut self.records, &self.edges);
        self.marker.is_drained()
    }

    /// Completes the current marking cycle and reports its outcome.
    ///
    /// Colors keep their final values until the next cycle starts; this
    /// lets callers inspect which objects were reached.
    pub fn finish_marking(&mut self) -> MarkingReport {
        while !self.mark_step() {}

        let mut report = MarkingReport::default();
        for (id, record) in &self.records {
            match record.color {
                MarkColor::Black => report.marked += 1,
                _ => report.unmarked.push(*id),
            }
        }

        self.marker.end();
        self.stats.marking_cycles += 1;
        log::debug!(
            "marking finished: {} marked, {} unmarked",
            report.marked,
            report.unmarked.len()
        );

        report
    }
}

impl MemoryManager for Heap {
    fn allocate(&mut self, kind: ObjectKind) -> GcId {
        if self.young_count() >= self.config.young_capacity {
            self.promote_survivors();
        }

        let id = GcId(self.next_id);
        self.next_id += 1;

        let mut record = ObjectRecord::new(kind);
        if self.marker.phase() == MarkingPhase::Marking {
            // Allocated black: new objects are live for the rest of the cycle.
            record.color = MarkColor::Black;
        }
        self.records.insert(id, record);
        *self.stats.allocations.entry(kind).or_insert(0) += 1;

        log::trace!("allocated {} {}", kind.name(), id);
        id
    }

    fn write_barrier(&mut self, owner: GcId, target: GcId) {
        self.stats.barrier_calls += 1;

        let effect = record_edge(
            &mut self.records,
            &mut self.edges,
            &mut self.remembered_set,
            &mut self.marker,
            owner,
            target,
        );

        if effect.remembered {
            self.stats.remembered_insertions += 1;
        }
        if effect.shaded {
            self.stats.barrier_shades += 1;
        }
        log::trace!("write barrier {} -> {}", owner, target);
    }
}
