/*!
 * Memory Traits
 * Host abstraction for global memory counters
 */

use super::types::PageCounters;

/// Global page counter reader
///
/// Implementations must not block: the reader is called from reclaim context.
pub trait MemoryCounters: Send + Sync {
    /// Current global counters
    fn page_counters(&self) -> PageCounters;
}
