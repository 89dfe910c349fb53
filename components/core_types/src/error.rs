//! Runtime error taxonomy and error values.
//!
//! Every failure raised by the object model is a [`RuntimeError`] tagged with
//! an [`ErrorKind`]. Errors are never recovered from locally; they unwind to
//! the caller, collecting a traceback entry for each native call they leave.

use crate::StackFrame;
use thiserror::Error;

/// The kind of runtime error.
///
/// These correspond to the standard exception classes the runtime exposes to
/// script code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument count or wrong argument type at the API boundary
    UsageError,
    /// A field, hidden field or namespace binding does not exist
    FieldError,
    /// An operation has no semantics for the operand types involved
    TypeError,
    /// An index or slice bound lies outside of a container
    BoundsError,
    /// A numeric argument is outside of its valid range
    RangeError,
    /// A call could not be performed (e.g. native call depth exhausted)
    CallError,
    /// An object is in a state that forbids the operation
    StateError,
}

impl ErrorKind {
    /// Returns the script-visible name of this error kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::FieldError.name(), "FieldError");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::UsageError => "UsageError",
            ErrorKind::FieldError => "FieldError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::BoundsError => "BoundsError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::CallError => "CallError",
            ErrorKind::StateError => "StateError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A runtime error with message and traceback.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, RuntimeError};
///
/// let error = RuntimeError::new(
///     ErrorKind::TypeError,
///     "Attempting to index a value of type 'int'",
/// );
///
/// assert_eq!(error.kind, ErrorKind::TypeError);
/// assert_eq!(
///     error.to_string(),
///     "TypeError: Attempting to index a value of type 'int'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct RuntimeError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Native calls the error unwound through, innermost first
    pub traceback: Vec<StackFrame>,
}

impl RuntimeError {
    /// Creates an error with an empty traceback.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            traceback: Vec::new(),
        }
    }

    /// Shorthand for a [`ErrorKind::UsageError`].
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UsageError, message)
    }

    /// Shorthand for a [`ErrorKind::FieldError`].
    pub fn field(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FieldError, message)
    }

    /// Shorthand for a [`ErrorKind::TypeError`].
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeError, message)
    }

    /// Shorthand for a [`ErrorKind::BoundsError`].
    pub fn bounds(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BoundsError, message)
    }

    /// Shorthand for a [`ErrorKind::RangeError`].
    pub fn range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RangeError, message)
    }

    /// Shorthand for a [`ErrorKind::CallError`].
    pub fn call(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CallError, message)
    }

    /// Shorthand for a [`ErrorKind::StateError`].
    pub fn state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StateError, message)
    }

    /// Appends a frame to the traceback and returns the error.
    pub fn with_frame(mut self, frame: StackFrame) -> Self {
        self.traceback.push(frame);
        self
    }

    /// Returns true if this error has the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

/// Result alias used throughout the runtime.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
