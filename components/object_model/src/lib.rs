//! Object model and generic operation dispatch
//!
//! This crate provides:
//! - [`Value`], a closed tagged union over every runtime entity
//! - Builtin entities: [`Table`], [`Namespace`], [`Array`], [`Function`],
//!   [`Class`] and [`Instance`]
//! - An operand [`Stack`] with frame-relative ("fake") and absolute
//!   addressing
//! - The metamethod table and the three-tier [`dispatch`]er
//! - A stack-addressed API on [`Thread`] with parameter validation
//!
//! Every store of a reference into an object passes through the
//! [`barrier`] functions, which report the new edge to the
//! [`MemoryManager`](memory_manager::MemoryManager).
//!
//! # Example
//!
//! ```
//! use object_model::{Thread, Vm, VmConfig};
//!
//! let vm = Vm::new(VmConfig::default());
//! let mut t = Thread::new(&vm);
//!
//! let table = t.new_table();
//! t.push_string("a");
//! t.push_int(1);
//! t.idxa(table).unwrap();
//!
//! t.push_string("a");
//! t.idx(table).unwrap();
//! assert_eq!(t.get_int(-1).unwrap(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod alloc;
mod api;
pub mod array;
pub mod barrier;
pub mod class;
pub mod config;
pub mod dispatch;
pub mod function;
pub mod gc_cell;
pub mod instance;
pub mod layout;
pub mod metamethod;
pub mod namespace;
pub mod stack;
pub mod table;
pub mod testing;
pub mod thread;
pub mod value;
pub mod vm;

// Re-export main types at crate root
pub use array::Array;
pub use class::{Class, MemberSlot};
pub use config::VmConfig;
pub use dispatch::Foreach;
pub use function::{Function, NativeFn};
pub use gc_cell::GcCell;
pub use instance::{FieldSlot, Instance};
pub use layout::{SlotDescriptor, SlotLayout};
pub use metamethod::{get_metamethod, Metamethod, METAMETHOD_NAMES};
pub use namespace::Namespace;
pub use stack::{Frame, Stack};
pub use table::Table;
pub use thread::Thread;
pub use value::{ArrayRef, ClassRef, FunctionRef, InstanceRef, NamespaceRef, TableRef, Value};
pub use vm::{SharedMemoryManager, Vm};
