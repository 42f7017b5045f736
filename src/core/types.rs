/*!
 * Core Types
 * Common types used across the low-memory killer
 */

use serde::{Deserialize, Serialize};

/// Process ID type
pub type Pid = u32;

/// Page count. Signed so that "remaining after a kill" and the
/// no-reclaim sentinel share one representation with the host
pub type Pages = i64;

/// OOM score adjustment (-1000..=1000, higher is more killable)
pub type OomScoreAdj = i16;

/// Opaque allocation context forwarded by the host
pub type GfpMask = u32;

/// Arguments of a single shrink request from the host memory manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShrinkControl {
    /// Zero or negative asks for an estimate; positive asks for reclaim
    pub nr_to_scan: i64,
    pub gfp_mask: GfpMask,
}

impl ShrinkControl {
    /// Advisory query: how much could be reclaimed
    pub fn query(gfp_mask: GfpMask) -> Self {
        Self {
            nr_to_scan: 0,
            gfp_mask,
        }
    }

    /// Eviction pass with the given scan intensity
    pub fn scan(nr_to_scan: i64, gfp_mask: GfpMask) -> Self {
        Self {
            nr_to_scan,
            gfp_mask,
        }
    }

    #[inline]
    pub fn is_query(&self) -> bool {
        self.nr_to_scan <= 0
    }
}
