//! The stack-addressed API.
//!
//! These are the entry points used by native functions and embedders. They
//! take slot arguments as fake indices (see [`crate::stack`]), resolve them
//! to absolute indices before pushing anything, and leave results on the
//! stack. Functions that push a value return its (non-negative) fake index.

mod checks;
mod object;
mod ops;
mod stack;
