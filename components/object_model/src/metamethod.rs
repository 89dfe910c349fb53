//! Metamethod names and lookup.
//!
//! Metamethods are ordinary methods with reserved names. Only values whose
//! [`Value::overriding_class`] capability yields a class can override
//! operators; lookup walks that class's chain from most to least derived.

use crate::class::find_method;
use crate::value::Value;
use log::trace;
use std::fmt;

/// Every overridable operation, in fixed order.
///
/// The discriminant indexes [`METAMETHOD_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metamethod {
    /// Concatenation, left operand
    Cat,
    /// In-place concatenation
    CatAssign,
    /// Concatenation, right operand
    CatR,
    /// Index get
    Index,
    /// Index set
    IndexAssign,
    /// Slice get
    Slice,
    /// Slice set
    SliceAssign,
    /// Field get
    Field,
    /// Field set
    FieldAssign,
    /// Length get
    Length,
    /// Length set
    LengthAssign,
    /// Three-way comparison
    Cmp,
    /// Equality test
    Equals,
    /// Call
    Call,
    /// Method call on a missing method
    Method,
    /// Iteration
    Apply,
    /// Membership test
    In,
    /// String conversion
    ToString,
}

/// Reserved method names, indexed by `Metamethod as usize`.
pub const METAMETHOD_NAMES: [&str; Metamethod::COUNT] = [
    "opCat",
    "opCatAssign",
    "opCat_r",
    "opIndex",
    "opIndexAssign",
    "opSlice",
    "opSliceAssign",
    "opField",
    "opFieldAssign",
    "opLength",
    "opLengthAssign",
    "opCmp",
    "opEquals",
    "opCall",
    "opMethod",
    "opApply",
    "opIn",
    "toString",
];

impl Metamethod {
    /// Number of metamethods.
    pub const COUNT: usize = 18;

    /// All metamethods in table order.
    pub const ALL: [Metamethod; Metamethod::COUNT] = [
        Metamethod::Cat,
        Metamethod::CatAssign,
        Metamethod::CatR,
        Metamethod::Index,
        Metamethod::IndexAssign,
        Metamethod::Slice,
        Metamethod::SliceAssign,
        Metamethod::Field,
        Metamethod::FieldAssign,
        Metamethod::Length,
        Metamethod::LengthAssign,
        Metamethod::Cmp,
        Metamethod::Equals,
        Metamethod::Call,
        Metamethod::Method,
        Metamethod::Apply,
        Metamethod::In,
        Metamethod::ToString,
    ];

    /// Returns the reserved method name.
    pub fn name(self) -> &'static str {
        METAMETHOD_NAMES[self as usize]
    }

    /// Maps a method name back to its metamethod.
    pub fn from_name(name: &str) -> Option<Metamethod> {
        METAMETHOD_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Metamethod::ALL[i])
    }
}

impl fmt::Display for Metamethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Looks up a metamethod for `value`.
///
/// Returns `None` when the value cannot override operators or its class
/// hierarchy does not define the method as a function.
pub fn get_metamethod(value: &Value, method: Metamethod) -> Option<Value> {
    let class = value.overriding_class()?;
    let found = find_method(&class, method.name()).filter(|m| matches!(m, Value::Function(_)));
    trace!(
        "metamethod {} on {}: {}",
        method,
        value.type_name(),
        if found.is_some() { "found" } else { "absent" }
    );
    found
}
