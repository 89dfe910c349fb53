//! Runtime value representation.
//!
//! This module provides the [`Value`] enum, a closed tagged union over every
//! kind of runtime entity. Scalars are stored inline; strings are shared
//! immutable text; every other variant is a shared reference to a heap object
//! registered with the memory manager.

use crate::array::Array;
use crate::class::Class;
use crate::function::Function;
use crate::gc_cell::GcCell;
use crate::instance::Instance;
use crate::namespace::Namespace;
use crate::table::Table;
use core_types::GcId;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a [`Table`].
pub type TableRef = Rc<GcCell<Table>>;
/// Shared handle to a [`Namespace`].
pub type NamespaceRef = Rc<GcCell<Namespace>>;
/// Shared handle to an [`Array`].
pub type ArrayRef = Rc<GcCell<Array>>;
/// Shared handle to a [`Function`].
pub type FunctionRef = Rc<Function>;
/// Shared handle to a [`Class`].
pub type ClassRef = Rc<GcCell<Class>>;
/// Shared handle to an [`Instance`].
pub type InstanceRef = Rc<GcCell<Instance>>;

/// Represents any runtime value.
///
/// # Examples
///
/// ```
/// use object_model::Value;
///
/// let number = Value::Int(42);
/// let text = Value::from("hello");
///
/// assert_eq!(number.type_name(), "int");
/// assert_eq!(text.type_name(), "string");
/// assert!(number.identity_eq(&Value::Int(42)));
/// assert!(!number.identity_eq(&Value::Float(42.0)));
/// ```
#[derive(Clone)]
pub enum Value {
    /// The null value
    Null,
    /// Boolean
    Bool(bool),
    /// Signed 64-bit integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// Immutable string
    String(Rc<str>),
    /// Mapping container keyed by values
    Table(TableRef),
    /// Identifier scope keyed by strings
    Namespace(NamespaceRef),
    /// Growable sequence of values
    Array(ArrayRef),
    /// Native function
    Function(FunctionRef),
    /// Class template
    Class(ClassRef),
    /// Instance of a class
    Instance(InstanceRef),
}

impl Value {
    /// Returns the runtime type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Table(_) => "table",
            Value::Namespace(_) => "namespace",
            Value::Array(_) => "array",
            Value::Function(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }

    /// Returns the heap identity of a reference value.
    ///
    /// Scalars and strings are not tracked by the memory manager and return
    /// `None`.
    pub fn gc_id(&self) -> Option<GcId> {
        match self {
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => {
                None
            }
            Value::Table(t) => Some(t.id()),
            Value::Namespace(n) => Some(n.id()),
            Value::Array(a) => Some(a.id()),
            Value::Function(f) => Some(f.id()),
            Value::Class(c) => Some(c.id()),
            Value::Instance(i) => Some(i.id()),
        }
    }

    /// Returns true if this value refers to a heap object.
    pub fn is_reference(&self) -> bool {
        !matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_)
        )
    }

    /// Identity comparison (the `is` operation).
    ///
    /// Compares the tag and the payload: bit patterns for floats, contents
    /// for strings and object identity for references. Never dispatches.
    pub fn identity_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => Rc::ptr_eq(a, b),
            (Value::Namespace(a), Value::Namespace(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Capability query for operator overriding.
    ///
    /// Returns the class whose hierarchy is searched for metamethods, or
    /// `None` if this kind of value cannot override operators.
    pub fn overriding_class(&self) -> Option<ClassRef> {
        match self {
            Value::Instance(i) => Some(i.borrow().class().clone()),
            _ => None,
        }
    }

    /// Returns whether this value counts as true in a condition.
    ///
    /// Null, false, zero and 0.0 are false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            _ => true,
        }
    }

    /// Returns true if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the integer payload, if any.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&Rc<str>> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric payload of an int or float as a float.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.identity_eq(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Function(func) => f.debug_tuple("Function").field(&func.name()).finish(),
            Value::Class(c) => f.debug_tuple("Class").field(&c.borrow().name()).finish(),
            Value::Instance(i) => f
                .debug_tuple("Instance")
                .field(&i.borrow().class_name())
                .finish(),
            other => match other.gc_id() {
                Some(id) => write!(f, "{}({})", other.type_name(), id),
                None => write!(f, "{}", other.type_name()),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(Rc::from(value))
    }
}

impl From<Rc<str>> for Value {
    fn from(value: Rc<str>) -> Self {
        Value::String(value)
    }
}
