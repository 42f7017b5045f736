/*!
 * Threshold Table
 * Ordered mapping from free-memory floors to the minimum killable adj
 */

use super::types::PressureMode;
use crate::core::types::{OomScoreAdj, Pages};
use serde::{Deserialize, Serialize};

/// One row of the threshold table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    /// Processes at or above this adj become eligible
    pub min_adj: OomScoreAdj,
    /// Free-memory floor in pages
    pub minfree: Pages,
}

/// Immutable threshold table, expected (not enforced) to ascend in both columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdTable {
    entries: Vec<ThresholdEntry>,
}

impl ThresholdTable {
    pub fn new(entries: Vec<ThresholdEntry>) -> Self {
        Self { entries }
    }

    /// Pair two independently sized arrays, keeping only their common prefix
    pub fn from_arrays(adj: &[OomScoreAdj], minfree: &[Pages]) -> Self {
        let entries = adj
            .iter()
            .zip(minfree)
            .map(|(&min_adj, &minfree)| ThresholdEntry { min_adj, minfree })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ThresholdEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Minimum adj of the first entry (in table order) whose floor is breached
    ///
    /// Returns `None` when nothing is breached or the table is empty.
    pub fn min_adj_for(
        &self,
        free: Pages,
        cache: Pages,
        mode: PressureMode,
    ) -> Option<OomScoreAdj> {
        self.entries
            .iter()
            .find(|entry| mode.is_breached(free, cache, entry.minfree))
            .map(|entry| entry.min_adj)
    }
}
