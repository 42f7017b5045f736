/*!
 * Victim Selection
 * Single pass over a process snapshot picking at most one victim
 */

use super::types::{ProcessSnapshot, Victim};
use crate::core::types::{OomScoreAdj, Pid};
use crate::lowmem_print;
use crate::monitoring::diagnostics::{Verbosity, LEVEL_SELECT};

/// Result of scanning the process table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Highest-adj eligible process
    Victim(Victim),
    /// Nothing at or above the adj floor with a resident set
    NoneEligible,
    /// A previous victim is still dying inside the debounce window
    DeathPending { pid: Pid },
}

/// Scan `processes` for the process to kill at `min_adj`
///
/// Filter order per process: kernel helpers, processes without an address
/// space, the death-pending abort (only while `debounce_open`), the adj
/// floor, then empty resident sets. A candidate replaces the current best
/// only when its adj is strictly greater, so resident size never breaks ties.
pub fn select_victim<I>(
    processes: I,
    min_adj: OomScoreAdj,
    debounce_open: bool,
    verbosity: Verbosity,
) -> Selection
where
    I: IntoIterator<Item = ProcessSnapshot>,
{
    let mut selected: Option<Victim> = None;

    for p in processes {
        if p.kernel_thread {
            continue;
        }

        let Some(resident) = p.resident_pages else {
            continue;
        };

        if p.memdie && debounce_open {
            return Selection::DeathPending { pid: p.pid };
        }

        if p.oom_score_adj < min_adj {
            continue;
        }

        if resident <= 0 {
            continue;
        }

        if let Some(best) = &selected {
            if p.oom_score_adj <= best.oom_score_adj {
                continue;
            }
        }

        lowmem_print!(
            verbosity,
            LEVEL_SELECT,
            info,
            pid = p.pid,
            comm = %p.comm,
            adj = p.oom_score_adj,
            size = resident,
            "select to kill"
        );

        selected = Some(Victim {
            pid: p.pid,
            comm: p.comm,
            oom_score_adj: p.oom_score_adj,
            resident_pages: resident,
        });
    }

    match selected {
        Some(victim) => Selection::Victim(victim),
        None => Selection::NoneEligible,
    }
}
