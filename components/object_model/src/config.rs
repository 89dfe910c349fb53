//! Runtime configuration.

use memory_manager::HeapConfig;

/// Tuning parameters for a [`Vm`](crate::Vm).
///
/// # Example
///
/// ```
/// use object_model::{Vm, VmConfig};
///
/// let vm = Vm::new(VmConfig {
///     max_native_depth: 16,
///     ..VmConfig::default()
/// });
/// assert_eq!(vm.config().max_native_depth, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmConfig {
    /// Number of stack slots reserved when a thread is created
    pub initial_stack_capacity: usize,
    /// Maximum nesting of native calls, metamethods included
    pub max_native_depth: usize,
    /// Configuration of the heap built by [`Vm::new`](crate::Vm::new)
    pub heap: HeapConfig,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            initial_stack_capacity: 256,
            max_native_depth: 200,
            heap: HeapConfig::default(),
        }
    }
}
