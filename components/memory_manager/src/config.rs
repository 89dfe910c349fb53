//! Heap configuration.

/// Tuning parameters for [`Heap`](crate::Heap).
///
/// # Example
///
/// ```
/// use memory_manager::{Heap, HeapConfig};
///
/// let heap = Heap::with_config(HeapConfig {
///     young_capacity: 16,
///     ..HeapConfig::default()
/// });
/// assert_eq!(heap.config().young_capacity, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapConfig {
    /// Number of live young objects that triggers a promotion pass
    pub young_capacity: usize,
    /// Number of promotion passes a young object survives before it is
    /// moved to the old generation
    pub promotion_age: u8,
    /// Maximum number of gray objects processed by one marking step
    pub mark_step_budget: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        HeapConfig {
            young_capacity: 4096,
            promotion_age: 3,
            mark_step_budget: 64,
        }
    }
}
