//! Named slot layouts for class members.
//!
//! A layout maps member names to dense offsets so that instances can store
//! their fields in a plain vector mirroring the class.

use std::collections::HashMap;
use std::rc::Rc;

/// A named slot in a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDescriptor {
    /// Name of the member
    pub name: Rc<str>,
    /// Offset in the value vector
    pub offset: usize,
}

/// Ordered set of named slots.
///
/// # Example
///
/// ```
/// use object_model::SlotLayout;
///
/// let mut layout = SlotLayout::new();
/// layout.add("x".into());
/// layout.add("y".into());
///
/// assert_eq!(layout.lookup("x"), Some(0));
/// assert_eq!(layout.lookup("y"), Some(1));
/// assert_eq!(layout.lookup("z"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotLayout {
    slots: Vec<SlotDescriptor>,
    index: HashMap<Rc<str>, usize>,
}

impl SlotLayout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        SlotLayout::default()
    }

    /// Appends a slot and returns its offset.
    ///
    /// Callers check for duplicates with [`SlotLayout::lookup`] first.
    pub fn add(&mut self, name: Rc<str>) -> usize {
        let offset = self.slots.len();
        self.index.insert(name.clone(), offset);
        self.slots.push(SlotDescriptor { name, offset });
        offset
    }

    /// Looks up a slot by name and returns its offset.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the layout has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over the slots in offset order.
    pub fn iter(&self) -> impl Iterator<Item = &SlotDescriptor> {
        self.slots.iter()
    }
}
