/*!
 * Shrinker Traits
 * Interface between the host memory manager and a reclaim callback
 */

use crate::core::types::ShrinkControl;

/// Reclaim callback invoked by the host under memory pressure
pub trait Shrinker: Send + Sync {
    /// Zero scan: return the reclaimable estimate. Positive scan: reclaim
    /// and return what remains, or -1 when nothing could be done
    fn shrink(&self, sc: ShrinkControl) -> i64;

    /// Relative cost of recreating what the shrinker frees
    fn seeks(&self) -> u32;

    /// Name used in host diagnostics
    fn name(&self) -> &str {
        "shrinker"
    }
}
