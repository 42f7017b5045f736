/*!
 * Process Traits
 * Host abstractions for the live process table
 */

use super::types::ProcessSnapshot;
use crate::core::errors::HostResult;
use crate::core::types::Pid;

/// Finite, restartable sequence of process snapshots for one pass
pub type ProcessIter<'a> = Box<dyn Iterator<Item = ProcessSnapshot> + 'a>;

/// Point-in-time process table provider
///
/// Producing the iterator must not block or sleep.
pub trait ProcessTable: Send + Sync {
    /// Snapshot of every live process
    fn processes(&self) -> ProcessIter<'_>;
}

/// Forceful termination of processes
pub trait ProcessKiller: Send + Sync {
    /// Send the equivalent of SIGKILL; must not block
    fn send_kill(&self, pid: Pid) -> HostResult<()>;

    /// Flag the process as dying so later scans see it as death-pending
    fn mark_memdie(&self, pid: Pid);
}
