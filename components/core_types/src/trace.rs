//! Traceback frames attached to runtime errors.

use std::fmt;

/// A single entry in a runtime error's traceback.
///
/// # Examples
///
/// ```
/// use core_types::StackFrame;
///
/// let frame = StackFrame::native("opIndex");
/// assert_eq!(frame.function_name, "opIndex");
/// assert_eq!(frame.to_string(), "opIndex (native)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Name of the function the error unwound through
    pub function_name: String,
    /// Whether the function was implemented natively
    pub native: bool,
}

impl StackFrame {
    /// Creates a frame for a native function.
    pub fn native(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            native: true,
        }
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.native {
            write!(f, "{} (native)", self.function_name)
        } else {
            f.write_str(&self.function_name)
        }
    }
}
