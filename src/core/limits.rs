/*!
 * System Limits and Constants
 *
 * Centralized location for the killer's limits, defaults, and magic numbers.
 * Values marked [LINUX-COMPAT] match the kernel's definitions.
 */

use super::types::{OomScoreAdj, Pages};
use std::time::Duration;

// =============================================================================
// OOM SCORE RANGE
// =============================================================================

/// Lowest OOM score adjustment (never kill)
/// [LINUX-COMPAT]
pub const OOM_SCORE_ADJ_MIN: OomScoreAdj = -1000;

/// Highest OOM score adjustment (kill first)
/// [LINUX-COMPAT]
pub const OOM_SCORE_ADJ_MAX: OomScoreAdj = 1000;

// =============================================================================
// THRESHOLD TABLE
// =============================================================================

/// Capacity of each tunable parameter array
pub const LOWMEM_ARRAY_MAX: usize = 6;

/// Default minimum adj per threshold, ascending
pub const DEFAULT_ADJ: [OomScoreAdj; 4] = [0, 1, 6, 12];

/// Default free-page floors per threshold, ascending
/// 12MB, 16MB, 40MB, 64MB with 4KB pages
pub const DEFAULT_MINFREE: [Pages; 4] = [3 * 1024, 4 * 1024, 10 * 1024, 16 * 1024];

// =============================================================================
// KILL DEBOUNCE
// =============================================================================

/// Cooldown after a kill during which death-pending processes block selection
pub const DEATH_PENDING_TIMEOUT: Duration = Duration::from_secs(1);

/// Capacity of the recent-kill history ring
pub const KILL_HISTORY_CAPACITY: usize = 16;

// =============================================================================
// SHRINKER REGISTRATION
// =============================================================================

/// Default relative cost of recreating a reclaimed object
/// [LINUX-COMPAT]
pub const DEFAULT_SEEKS: u32 = 2;

/// Default cost for the killer: far more expensive than a cache shrinker
pub const DEFAULT_COST: u32 = DEFAULT_SEEKS * 16;

/// Objects requested from a shrinker per batch
/// [LINUX-COMPAT]
pub const SHRINK_BATCH: i64 = 128;

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Default diagnostic verbosity (kills and selections)
pub const DEFAULT_DEBUG_LEVEL: u32 = 2;

/// Default period between host-driven reclaim passes in the daemon
pub const DEFAULT_DRIVER_INTERVAL: Duration = Duration::from_millis(250);
