//! Core runtime types shared by every component.
//!
//! This crate provides the error taxonomy, traceback frames and heap object
//! identities used by the memory manager and the object model.
//!
//! # Overview
//!
//! - [`RuntimeError`] - Runtime errors with tracebacks
//! - [`ErrorKind`] - Kinds of runtime errors
//! - [`StackFrame`] - Traceback entry
//! - [`GcId`] - Identity of a heap object
//! - [`ObjectKind`] - Kind of a heap object
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, RuntimeError};
//!
//! let error = RuntimeError::new(ErrorKind::FieldError, "no such field 'x'");
//! assert_eq!(error.to_string(), "FieldError: no such field 'x'");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod object;
mod trace;

pub use error::{ErrorKind, RuntimeError, RuntimeResult};
pub use object::{GcId, ObjectKind};
pub use trace::StackFrame;
