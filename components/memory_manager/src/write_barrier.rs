//! Write barrier implementation
//!
//! Write barriers run whenever the object model stores a reference into
//! another object. They maintain two collector invariants:
//! 1. **Remembered set**: old objects that reference young objects are
//!    recorded so a young-generation pass can treat them as roots
//! 2. **Tri-color invariant**: while marking, a black owner never points to a
//!    white target (the target is greyed instead)

use crate::gc::{Generation, MarkColor, Marker};
use crate::heap::ObjectRecord;
use core_types::GcId;
use std::collections::{BTreeMap, BTreeSet};

/// Set of old-generation objects holding references to young objects.
///
/// During a promotion pass these objects are treated as additional roots.
#[derive(Debug, Default, Clone)]
pub struct RememberedSet {
    /// Owners with at least one old-to-young edge
    cards: BTreeSet<GcId>,
}

impl RememberedSet {
    /// Creates an empty remembered set.
    pub fn new() -> Self {
        RememberedSet {
            cards: BTreeSet::new(),
        }
    }

    /// Adds an object to the remembered set.
    ///
    /// Returns true if the object was not already remembered.
    pub fn add(&mut self, owner: GcId) -> bool {
        self.cards.insert(owner)
    }

    /// Removes an object from the remembered set.
    pub fn remove(&mut self, owner: GcId) {
        self.cards.remove(&owner);
    }

    /// Clears all entries from the remembered set.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Returns true if the object is remembered.
    pub fn contains(&self, owner: GcId) -> bool {
        self.cards.contains(&owner)
    }

    /// Returns the number of remembered objects.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if the remembered set is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns all remembered objects as roots, in allocation order.
    pub fn roots(&self) -> Vec<GcId> {
        self.cards.iter().copied().collect()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(GcId) -> bool) {
        self.cards.retain(|id| keep(*id));
    }
}

/// What a single barrier invocation changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BarrierEffect {
    pub(crate) remembered: bool,
    pub(crate) shaded: bool,
}

/// Records the edge `owner -> target` and restores collector invariants.
pub(crate) fn record_edge(
    records: &mut BTreeMap<GcId, ObjectRecord>,
    edges: &mut BTreeMap<GcId, BTreeSet<GcId>>,
    remembered: &mut RememberedSet,
    marker: &mut Marker,
    owner: GcId,
    target: GcId,
) -> BarrierEffect {
    let mut effect = BarrierEffect::default();

    let (owner_state, target_state) = match (records.get(&owner), records.get(&target)) {
        (Some(o), Some(t)) => ((o.generation, o.color), (t.generation, t.color)),
        _ => {
            log::trace!("write barrier on untracked edge {} -> {}", owner, target);
            return effect;
        }
    };

    edges.entry(owner).or_default().insert(target);

    if owner_state.0 == Generation::Old && target_state.0 == Generation::Young {
        effect.remembered = remembered.add(owner);
    }

    if owner_state.1 == MarkColor::Black && target_state.1 == MarkColor::White {
        if let Some(record) = records.get_mut(&target) {
            record.color = MarkColor::Gray;
            marker.shade(target);
            effect.shaded = true;
        }
    }

    effect
}
