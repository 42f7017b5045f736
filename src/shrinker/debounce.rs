/*!
 * Kill Debounce
 * Process-wide cooldown deadline armed after every kill
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Single-slot deadline shared by all reclaim contexts
///
/// Stored as nanoseconds on the evaluator's clock; zero means never armed.
/// Arming only ever moves the deadline forward.
#[derive(Debug)]
pub struct KillDebounce {
    deadline_nanos: AtomicU64,
    window: Duration,
}

impl KillDebounce {
    pub fn new(window: Duration) -> Self {
        Self {
            deadline_nanos: AtomicU64::new(0),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether `now` is at or before the deadline
    #[inline]
    pub fn is_open(&self, now: Duration) -> bool {
        let deadline = self.deadline_nanos.load(Ordering::Acquire);
        deadline != 0 && (now.as_nanos() as u64) <= deadline
    }

    /// Extend the deadline to `now + window`, returning the effective deadline
    pub fn arm(&self, now: Duration) -> Duration {
        let target = ((now + self.window).as_nanos() as u64).max(1);
        let previous = self.deadline_nanos.fetch_max(target, Ordering::AcqRel);
        Duration::from_nanos(previous.max(target))
    }

    pub fn deadline(&self) -> Option<Duration> {
        match self.deadline_nanos.load(Ordering::Acquire) {
            0 => None,
            nanos => Some(Duration::from_nanos(nanos)),
        }
    }
}

impl Default for KillDebounce {
    fn default() -> Self {
        Self::new(crate::core::limits::DEATH_PENDING_TIMEOUT)
    }
}
