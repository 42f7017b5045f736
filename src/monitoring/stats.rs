/*!
 * Killer Statistics
 * Lock-free counters and recent-kill history
 */

use crate::core::limits::KILL_HISTORY_CAPACITY;
use crate::core::types::{OomScoreAdj, Pages, Pid};
use crate::process::VictimState;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use smartstring::alias::String as CompactString;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

/// One issued kill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillRecord {
    pub pid: Pid,
    pub comm: CompactString,
    pub oom_score_adj: OomScoreAdj,
    pub resident_pages: Pages,
    /// Clock reading when the kill was issued
    pub at: Duration,
    /// Whether the host accepted the kill request
    pub delivered: bool,
    /// Last lifecycle state reached by the evaluator
    pub state: VictimState,
}

/// Serializable copy of the counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub passes: u64,
    pub queries: u64,
    pub kills: u64,
    pub no_victim: u64,
    pub death_pending_aborts: u64,
    pub no_pressure: u64,
    pub pages_targeted: Pages,
}

/// Atomic killer statistics
///
/// # Performance
/// - Cache-line aligned to prevent false sharing between reclaim threads
#[repr(C, align(64))]
pub struct ShrinkerStats {
    passes: AtomicU64,
    queries: AtomicU64,
    kills: AtomicU64,
    no_victim: AtomicU64,
    death_pending_aborts: AtomicU64,
    no_pressure: AtomicU64,
    pages_targeted: AtomicI64,
    /// Ring of recent kills; held only to push or clone
    history: Mutex<VecDeque<KillRecord>>,
}

impl ShrinkerStats {
    pub fn new() -> Self {
        Self {
            passes: AtomicU64::new(0),
            queries: AtomicU64::new(0),
            kills: AtomicU64::new(0),
            no_victim: AtomicU64::new(0),
            death_pending_aborts: AtomicU64::new(0),
            no_pressure: AtomicU64::new(0),
            pages_targeted: AtomicI64::new(0),
            history: Mutex::new(VecDeque::with_capacity(KILL_HISTORY_CAPACITY)),
        }
    }

    #[inline(always)]
    pub fn inc_passes(&self) {
        self.passes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_queries(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_no_victim(&self) {
        self.no_victim.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_death_pending_aborts(&self) {
        self.death_pending_aborts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_no_pressure(&self) {
        self.no_pressure.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a kill; the oldest history entry is evicted when full
    pub fn record_kill(&self, record: KillRecord) {
        self.kills.fetch_add(1, Ordering::Relaxed);
        self.pages_targeted
            .fetch_add(record.resident_pages, Ordering::Relaxed);
        let mut history = self.history.lock();
        if history.len() == KILL_HISTORY_CAPACITY {
            history.pop_front();
        }
        history.push_back(record);
    }

    pub fn kills(&self) -> u64 {
        self.kills.load(Ordering::Relaxed)
    }

    /// Recent kills, oldest first
    pub fn recent_kills(&self) -> Vec<KillRecord> {
        self.history.lock().iter().cloned().collect()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            passes: self.passes.load(Ordering::Relaxed),
            queries: self.queries.load(Ordering::Relaxed),
            kills: self.kills.load(Ordering::Relaxed),
            no_victim: self.no_victim.load(Ordering::Relaxed),
            death_pending_aborts: self.death_pending_aborts.load(Ordering::Relaxed),
            no_pressure: self.no_pressure.load(Ordering::Relaxed),
            pages_targeted: self.pages_targeted.load(Ordering::Relaxed),
        }
    }
}

impl Default for ShrinkerStats {
    fn default() -> Self {
        Self::new()
    }
}
