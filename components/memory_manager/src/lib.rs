//! Memory Manager - allocation bookkeeping and write barriers
//!
//! This component provides:
//! - The [`MemoryManager`] boundary consumed by the object model
//! - Generational bookkeeping (young + old generation, promotion by age)
//! - Write barriers maintaining the remembered set
//! - Incremental tri-color marking over the edges reported by barriers

pub mod config;
pub mod gc;
pub mod heap;
pub mod manager;
pub mod write_barrier;

// Re-export main types
pub use config::HeapConfig;
pub use gc::{Generation, MarkColor, MarkingPhase, MarkingReport};
pub use heap::{Heap, HeapStats, ObjectRecord};
pub use manager::MemoryManager;
pub use write_barrier::RememberedSet;
