/*!
 * Process Types
 * Read-only process snapshots and victim lifecycle
 */

use crate::core::types::{OomScoreAdj, Pages, Pid};
use serde::{Deserialize, Serialize};
use smartstring::alias::String as CompactString;

/// Per-process view produced fresh for each evaluation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub pid: Pid,
    /// Short command name
    pub comm: CompactString,
    /// Kernel-internal helper, never a candidate
    #[serde(default)]
    pub kernel_thread: bool,
    pub oom_score_adj: OomScoreAdj,
    /// Resident set size; `None` when the address space is already gone
    pub resident_pages: Option<Pages>,
    /// Already sent a kill and expected to exit
    #[serde(default)]
    pub memdie: bool,
}

impl ProcessSnapshot {
    /// Ordinary user process with an address space
    pub fn new(pid: Pid, comm: &str, oom_score_adj: OomScoreAdj, resident_pages: Pages) -> Self {
        Self {
            pid,
            comm: comm.into(),
            kernel_thread: false,
            oom_score_adj,
            resident_pages: Some(resident_pages),
            memdie: false,
        }
    }

    /// Kernel helper thread (no address space)
    pub fn kernel_thread(pid: Pid, comm: &str) -> Self {
        Self {
            pid,
            comm: comm.into(),
            kernel_thread: true,
            oom_score_adj: 0,
            resident_pages: None,
            memdie: false,
        }
    }

    pub fn with_memdie(mut self, memdie: bool) -> Self {
        self.memdie = memdie;
        self
    }

    pub fn without_mm(mut self) -> Self {
        self.resident_pages = None;
        self
    }
}

/// Process selected for termination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Victim {
    pub pid: Pid,
    pub comm: CompactString,
    pub oom_score_adj: OomScoreAdj,
    pub resident_pages: Pages,
}

/// Lifecycle of a process as seen by the killer
///
/// `PendingDeath` is terminal here; the host observes the actual exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictimState {
    Eligible,
    Selected,
    TerminationRequested,
    PendingDeath,
}

impl VictimState {
    /// Next state, or `None` once pending death
    pub fn advance(self) -> Option<VictimState> {
        match self {
            VictimState::Eligible => Some(VictimState::Selected),
            VictimState::Selected => Some(VictimState::TerminationRequested),
            VictimState::TerminationRequested => Some(VictimState::PendingDeath),
            VictimState::PendingDeath => None,
        }
    }
}

impl std::fmt::Display for VictimState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            VictimState::Eligible => write!(f, "eligible"),
            VictimState::Selected => write!(f, "selected"),
            VictimState::TerminationRequested => write!(f, "termination_requested"),
            VictimState::PendingDeath => write!(f, "pending_death"),
        }
    }
}
