/*!
 * Simulated Host
 * In-memory implementation of every host collaborator
 *
 * Counters and the process table are published through `ArcSwap`, so
 * readers never block on writers. Kill delivery is recorded in a lock-free
 * queue and can be followed by an explicit `reap` that returns memory.
 */

use super::traits::Compactor;
use crate::core::errors::{ConfigError, ConfigResult, HostError, HostResult};
use crate::core::types::{OomScoreAdj, Pages, Pid};
use crate::memory::{MemoryCounters, PageCounters};
use crate::process::{ProcessIter, ProcessKiller, ProcessSnapshot, ProcessTable};
use arc_swap::ArcSwap;
use crossbeam_queue::SegQueue;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Initial state of a simulated host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub counters: PageCounters,
    pub processes: Vec<ProcessSnapshot>,
}

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, Default)]
struct Faults {
    fail_kill: AtomicBool,
    fail_compaction: AtomicBool,
}

/// Simulation-based host
/// Clones share the same state
#[derive(Clone)]
pub struct SimulatedHost {
    counters: Arc<ArcSwap<PageCounters>>,
    processes: Arc<ArcSwap<Vec<ProcessSnapshot>>>,
    kills: Arc<SegQueue<Pid>>,
    kill_count: Arc<AtomicUsize>,
    compactions: Arc<AtomicUsize>,
    faults: Arc<Faults>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::from_scenario(Scenario::default())
    }

    pub fn from_scenario(scenario: Scenario) -> Self {
        info!(
            "Simulated host initialized with {} processes, {} free pages",
            scenario.processes.len(),
            scenario.counters.free
        );
        Self {
            counters: Arc::new(ArcSwap::from_pointee(scenario.counters)),
            processes: Arc::new(ArcSwap::from_pointee(scenario.processes)),
            kills: Arc::new(SegQueue::new()),
            kill_count: Arc::new(AtomicUsize::new(0)),
            compactions: Arc::new(AtomicUsize::new(0)),
            faults: Arc::new(Faults::default()),
        }
    }

    pub fn with_counters(self, counters: PageCounters) -> Self {
        self.set_counters(counters);
        self
    }

    pub fn with_processes(self, processes: Vec<ProcessSnapshot>) -> Self {
        self.set_processes(processes);
        self
    }

    pub fn set_counters(&self, counters: PageCounters) {
        self.counters.store(Arc::new(counters));
    }

    /// Modify counters in place
    pub fn update_counters<F>(&self, mut f: F)
    where
        F: FnMut(&mut PageCounters),
    {
        self.counters.rcu(|current| {
            let mut next = **current;
            f(&mut next);
            next
        });
    }

    pub fn set_processes(&self, processes: Vec<ProcessSnapshot>) {
        self.processes.store(Arc::new(processes));
    }

    /// Add a process to the table
    pub fn spawn(&self, process: ProcessSnapshot) {
        debug!("Simulated spawn of PID {} ({})", process.pid, process.comm);
        self.processes.rcu(|table| {
            let mut next = (**table).clone();
            next.push(process.clone());
            next
        });
    }

    /// Change a process's adj, returning false if it does not exist
    pub fn set_oom_score_adj(&self, pid: Pid, adj: OomScoreAdj) -> bool {
        self.modify_process(pid, |p| p.oom_score_adj = adj)
    }

    /// Look up a single process
    pub fn process(&self, pid: Pid) -> Option<ProcessSnapshot> {
        self.processes.load().iter().find(|p| p.pid == pid).cloned()
    }

    pub fn process_count(&self) -> usize {
        self.processes.load().len()
    }

    /// Remove death-pending processes and return their pages to the free pool
    ///
    /// Returns the number of processes reaped.
    pub fn reap(&self) -> usize {
        let table = self.processes.load_full();
        let (dead, alive): (Vec<_>, Vec<_>) = table.iter().cloned().partition(|p| p.memdie);
        if dead.is_empty() {
            return 0;
        }

        let freed: Pages = dead.iter().filter_map(|p| p.resident_pages).sum();
        self.set_processes(alive);
        self.update_counters(|c| {
            let from_anon = freed.min(c.active_anon);
            c.active_anon -= from_anon;
            c.free += freed;
        });

        info!("Simulated reap of {} processes freed {} pages", dead.len(), freed);
        dead.len()
    }

    /// Drain the pids that received a kill since the last call
    pub fn take_kills(&self) -> Vec<Pid> {
        std::iter::from_fn(|| self.kills.pop()).collect()
    }

    pub fn kill_count(&self) -> usize {
        self.kill_count.load(Ordering::Acquire)
    }

    pub fn compaction_count(&self) -> usize {
        self.compactions.load(Ordering::Acquire)
    }

    /// Make subsequent kills fail
    pub fn fail_kills(&self, fail: bool) {
        self.faults.fail_kill.store(fail, Ordering::Release);
    }

    /// Make subsequent compaction requests fail
    pub fn fail_compaction(&self, fail: bool) {
        self.faults.fail_compaction.store(fail, Ordering::Release);
    }

    fn modify_process<F>(&self, pid: Pid, mut f: F) -> bool
    where
        F: FnMut(&mut ProcessSnapshot),
    {
        let mut found = false;
        self.processes.rcu(|table| {
            found = false;
            let mut next = (**table).clone();
            if let Some(p) = next.iter_mut().find(|p| p.pid == pid) {
                f(p);
                found = true;
            }
            next
        });
        found
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCounters for SimulatedHost {
    fn page_counters(&self) -> PageCounters {
        **self.counters.load()
    }
}

impl ProcessTable for SimulatedHost {
    fn processes(&self) -> ProcessIter<'_> {
        let table = self.processes.load_full();
        Box::new((0..table.len()).map(move |i| table[i].clone()))
    }
}

impl ProcessKiller for SimulatedHost {
    fn send_kill(&self, pid: Pid) -> HostResult<()> {
        if self.faults.fail_kill.load(Ordering::Acquire) {
            return Err(HostError::KillFailed {
                pid,
                reason: "injected fault".to_string(),
            });
        }
        if !self.processes.load().iter().any(|p| p.pid == pid) {
            return Err(HostError::NoSuchProcess(pid));
        }

        self.kills.push(pid);
        self.kill_count.fetch_add(1, Ordering::AcqRel);
        debug!("Simulated SIGKILL delivered to PID {}", pid);
        Ok(())
    }

    fn mark_memdie(&self, pid: Pid) {
        self.modify_process(pid, |p| p.memdie = true);
    }
}

impl Compactor for SimulatedHost {
    fn compact_nodes(&self, sync: bool) -> HostResult<()> {
        self.compactions.fetch_add(1, Ordering::AcqRel);
        if self.faults.fail_compaction.load(Ordering::Acquire) {
            return Err(HostError::CompactionFailed("injected fault".to_string()));
        }
        debug!("Simulated compaction requested (sync={})", sync);
        Ok(())
    }
}
