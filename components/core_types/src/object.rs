//! Heap object identity shared between the memory manager and the object model.

use std::fmt;

/// Identity of a heap-allocated runtime object.
///
/// Ids are handed out by the memory manager at allocation time and never
/// reused within one runtime instance, so they order objects by allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GcId(pub u64);

impl fmt::Display for GcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}

/// The kind of a heap-allocated runtime object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Mapping container keyed by arbitrary values
    Table,
    /// Identifier scope keyed by strings
    Namespace,
    /// Growable sequence of values
    Array,
    /// Callable native function
    Function,
    /// Class template
    Class,
    /// Instance of a class
    Instance,
}

impl ObjectKind {
    /// All object kinds, in declaration order.
    pub const ALL: [ObjectKind; 6] = [
        ObjectKind::Table,
        ObjectKind::Namespace,
        ObjectKind::Array,
        ObjectKind::Function,
        ObjectKind::Class,
        ObjectKind::Instance,
    ];

    /// Returns the script-visible type name of objects of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Table => "table",
            ObjectKind::Namespace => "namespace",
            ObjectKind::Array => "array",
            ObjectKind::Function => "function",
            ObjectKind::Class => "class",
            ObjectKind::Instance => "instance",
        }
    }
}
