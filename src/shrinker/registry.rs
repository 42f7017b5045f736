/*!
 * Shrinker Registry
 * Host-side registration and the slab reclaim driver
 *
 * `shrink_slab` spreads reclaim across shrinkers in proportion to the
 * pages just scanned from the LRU lists and inversely to each shrinker's
 * cost, carrying unfinished work over to the next call.
 */

use super::traits::Shrinker;
use crate::core::limits::SHRINK_BATCH;
use crate::core::types::{GfpMask, ShrinkControl};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Handle returned by `register`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShrinkerId(u64);

struct Registered {
    id: ShrinkerId,
    shrinker: Arc<dyn Shrinker>,
    /// Scan budget deferred from previous calls
    deferred: AtomicI64,
}

/// Summary of one `shrink_slab` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabReport {
    /// Reported reduction in reclaimable objects
    pub freed: i64,
    /// Batched shrink calls issued
    pub batches: u32,
    /// Shrinkers that answered -1 and stopped early
    pub gave_up: u32,
}

/// Registered shrinkers
#[derive(Default)]
pub struct ShrinkerRegistry {
    shrinkers: RwLock<Vec<Registered>>,
    next_id: AtomicU64,
}

impl ShrinkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, shrinker: Arc<dyn Shrinker>) -> ShrinkerId {
        let id = ShrinkerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        info!(name = shrinker.name(), seeks = shrinker.seeks(), "shrinker registered");
        self.shrinkers.write().push(Registered {
            id,
            shrinker,
            deferred: AtomicI64::new(0),
        });
        id
    }

    /// Remove a shrinker; returns false if it was not registered
    pub fn unregister(&self, id: ShrinkerId) -> bool {
        let mut shrinkers = self.shrinkers.write();
        let before = shrinkers.len();
        shrinkers.retain(|r| r.id != id);
        let removed = shrinkers.len() != before;
        if removed {
            info!(id = id.0, "shrinker unregistered");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.shrinkers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shrinkers.read().is_empty()
    }

    /// Call every shrinker after `scanned` of `lru_pages` LRU pages were scanned
    pub fn shrink_slab(&self, scanned: u64, lru_pages: u64, gfp_mask: GfpMask) -> SlabReport {
        let mut report = SlabReport::default();
        let scanned = scanned.max(1);

        for entry in self.shrinkers.read().iter() {
            let shrinker = &entry.shrinker;
            let max_pass = shrinker.shrink(ShrinkControl::query(gfp_mask));
            if max_pass <= 0 {
                continue;
            }

            let delta = scan_delta(scanned, lru_pages, max_pass, shrinker.seeks());

            let mut total_scan = entry
                .deferred
                .swap(0, Ordering::AcqRel)
                .saturating_add(delta);
            total_scan = total_scan.clamp(0, max_pass.saturating_mul(2));

            debug!(
                name = shrinker.name(),
                max_pass,
                delta,
                total_scan,
                "shrink_slab"
            );

            while total_scan >= SHRINK_BATCH {
                let nr_before = shrinker.shrink(ShrinkControl::query(gfp_mask));
                let shrink_ret = shrinker.shrink(ShrinkControl::scan(SHRINK_BATCH, gfp_mask));
                report.batches += 1;

                if shrink_ret == -1 {
                    report.gave_up += 1;
                    break;
                }
                if shrink_ret < nr_before {
                    report.freed += nr_before - shrink_ret;
                }
                total_scan -= SHRINK_BATCH;
            }

            entry.deferred.fetch_add(total_scan, Ordering::AcqRel);
        }

        report
    }
}

/// Objects to scan: `(4 * scanned / seeks) * max_pass / (lru_pages + 1)`
///
/// Widened to 128 bits and saturated, so huge scan counts cap at `i64::MAX`.
fn scan_delta(scanned: u64, lru_pages: u64, max_pass: i64, seeks: u32) -> i64 {
    let per_seek = (scanned as u128).saturating_mul(4) / u128::from(seeks.max(1));
    let delta = per_seek.saturating_mul(max_pass.max(0) as u128) / (lru_pages as u128 + 1);
    i64::try_from(delta).unwrap_or(i64::MAX)
}
