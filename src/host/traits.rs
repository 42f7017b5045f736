/*!
 * Host Traits
 * Outbound collaborators the killer relies on
 */

use crate::core::errors::HostResult;
use crate::memory::MemoryCounters;
use crate::process::{ProcessKiller, ProcessTable};

/// Out-of-band memory compaction
pub trait Compactor: Send + Sync {
    /// Request compaction of all nodes; fire-and-forget when `sync` is false
    fn compact_nodes(&self, sync: bool) -> HostResult<()>;
}

/// Everything the evaluator needs from the host
pub trait Host: MemoryCounters + ProcessTable + ProcessKiller + Compactor {}

/// Implement Host for types that implement all required traits
impl<T> Host for T where T: MemoryCounters + ProcessTable + ProcessKiller + Compactor {}
