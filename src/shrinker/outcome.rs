/*!
 * Shrink Outcome
 * Typed result of an evaluation pass and its integer wire form
 */

use crate::core::types::{Pages, Pid};
use crate::process::Victim;
use serde::{Deserialize, Serialize};

/// Integer handed back to the host when nothing can be reclaimed
pub const NO_RECLAIM: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ShrinkOutcome {
    /// Advisory query: pages on the LRU lists
    Estimate { pages: Pages },
    /// Eviction pass with no threshold breached
    Unchanged { pages: Pages },
    /// A kill was issued; `remaining` excludes the victim's resident set
    Killed { victim: Victim, remaining: Pages },
    /// Pressure exists but no process is eligible
    NoVictim,
    /// A previous victim is still dying inside the debounce window
    DeathPending { pid: Pid },
}

impl ShrinkOutcome {
    /// Value returned to the host memory manager
    pub fn as_raw(&self) -> i64 {
        match self {
            ShrinkOutcome::Estimate { pages } | ShrinkOutcome::Unchanged { pages } => *pages,
            ShrinkOutcome::Killed { remaining, .. } => *remaining,
            ShrinkOutcome::NoVictim | ShrinkOutcome::DeathPending { .. } => NO_RECLAIM,
        }
    }

    pub fn victim(&self) -> Option<&Victim> {
        match self {
            ShrinkOutcome::Killed { victim, .. } => Some(victim),
            _ => None,
        }
    }

    pub fn is_kill(&self) -> bool {
        matches!(self, ShrinkOutcome::Killed { .. })
    }

    pub fn is_no_reclaim(&self) -> bool {
        matches!(
            self,
            ShrinkOutcome::NoVictim | ShrinkOutcome::DeathPending { .. }
        )
    }
}

impl From<ShrinkOutcome> for i64 {
    fn from(outcome: ShrinkOutcome) -> Self {
        outcome.as_raw()
    }
}
