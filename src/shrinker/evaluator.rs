/*!
 * Pressure Evaluator
 * Decides, on each host shrink request, whether to kill and whom
 *
 * One pass: read tunables and counters, find the breached threshold,
 * scan the process snapshot for the highest-adj victim, then issue the
 * kill and arm the debounce. Nothing here blocks; host errors are logged
 * and dropped.
 */

use super::debounce::KillDebounce;
use super::outcome::ShrinkOutcome;
use super::traits::Shrinker;
use crate::config::ParameterStore;
use crate::core::clock::{Clock, MonotonicClock};
use crate::core::types::{Pages, Pid, ShrinkControl};
use crate::host::Host;
use crate::lowmem_print;
use crate::monitoring::diagnostics::{
    Verbosity, LEVEL_KILL, LEVEL_PASS, LEVEL_QUERY, LEVEL_RESULT,
};
use crate::monitoring::{span_shrink, KillRecord, ShrinkerStats};
use crate::process::{select_victim, Selection, Victim, VictimState};
use std::time::Duration;
use tracing::{debug, warn};

/// Low-memory killer bound to a host and a clock
pub struct PressureEvaluator<H: Host, C: Clock = MonotonicClock> {
    host: H,
    clock: C,
    params: ParameterStore,
    debounce: KillDebounce,
    stats: ShrinkerStats,
}

impl<H: Host> PressureEvaluator<H, MonotonicClock> {
    pub fn new(host: H, params: ParameterStore) -> Self {
        Self::with_clock(host, params, MonotonicClock::new())
    }
}

impl<H: Host, C: Clock> PressureEvaluator<H, C> {
    pub fn with_clock(host: H, params: ParameterStore, clock: C) -> Self {
        let snapshot = params.load();
        tracing::info!(
            adj = %crate::config::format_array(&snapshot.tunables.adj),
            minfree = %crate::config::format_array(&snapshot.tunables.minfree),
            cost = snapshot.tunables.cost,
            mode = %snapshot.tunables.pressure_mode,
            "low memory killer initialized"
        );
        Self {
            host,
            clock,
            params,
            debounce: KillDebounce::default(),
            stats: ShrinkerStats::new(),
        }
    }

    /// Evaluate memory pressure and kill at most one process
    pub fn evaluate(&self, sc: ShrinkControl) -> ShrinkOutcome {
        let span = span_shrink(sc.nr_to_scan, sc.gfp_mask);
        let _entered = span.enter();

        let params = self.params.load();
        let verbosity = params.tunables.verbosity();
        let mode = params.tunables.pressure_mode;

        let counters = self.host.page_counters();
        let other_free = counters.free;
        let other_file = counters.reclaimable_cache(mode);
        let min_adj = params.table.min_adj_for(other_free, other_file, mode);

        let rem = counters.lru_total();

        if sc.is_query() {
            self.stats.inc_queries();
            lowmem_print!(
                verbosity,
                LEVEL_QUERY,
                info,
                nr_to_scan = sc.nr_to_scan,
                gfp_mask = sc.gfp_mask,
                rem,
                "lowmem_shrink estimate"
            );
            return ShrinkOutcome::Estimate { pages: rem };
        }

        self.stats.inc_passes();
        lowmem_print!(
            verbosity,
            LEVEL_PASS,
            info,
            nr_to_scan = sc.nr_to_scan,
            gfp_mask = sc.gfp_mask,
            other_free,
            other_file,
            min_adj = ?min_adj,
            "lowmem_shrink"
        );

        let Some(min_adj) = min_adj else {
            self.stats.inc_no_pressure();
            return self.finish(ShrinkOutcome::Unchanged { pages: rem }, sc, verbosity);
        };

        let now = self.clock.now();
        let debounce_open = self.debounce.is_open(now);

        let outcome = match select_victim(self.host.processes(), min_adj, debounce_open, verbosity) {
            Selection::DeathPending { pid } => {
                self.stats.inc_death_pending_aborts();
                debug!(pid, "previous victim still dying, skipping pass");
                ShrinkOutcome::DeathPending { pid }
            }
            Selection::NoneEligible => {
                self.stats.inc_no_victim();
                ShrinkOutcome::NoVictim
            }
            Selection::Victim(victim) => self.kill(victim, now, rem, verbosity),
        };

        self.finish(outcome, sc, verbosity)
    }

    fn kill(&self, victim: Victim, now: Duration, rem: Pages, verbosity: Verbosity) -> ShrinkOutcome {
        lowmem_print!(
            verbosity,
            LEVEL_KILL,
            warn,
            pid = victim.pid,
            comm = %victim.comm,
            adj = victim.oom_score_adj,
            size = victim.resident_pages,
            "send sigkill"
        );

        let mut state = advance(victim.pid, VictimState::Eligible);

        let deadline = self.debounce.arm(now);
        debug!(
            window_ms = self.debounce.window().as_millis() as u64,
            deadline_ms = deadline.as_millis() as u64,
            "kill debounce armed"
        );

        let delivered = match self.host.send_kill(victim.pid) {
            Ok(()) => {
                state = advance(victim.pid, state);
                true
            }
            Err(e) => {
                warn!(pid = victim.pid, error = %e, "kill request failed");
                false
            }
        };

        // Marked even when the kill request was rejected
        self.host.mark_memdie(victim.pid);
        if delivered {
            state = advance(victim.pid, state);
        }

        self.stats.record_kill(KillRecord {
            pid: victim.pid,
            comm: victim.comm.clone(),
            oom_score_adj: victim.oom_score_adj,
            resident_pages: victim.resident_pages,
            at: now,
            delivered,
            state,
        });

        let remaining = rem - victim.resident_pages;

        if let Err(e) = self.host.compact_nodes(false) {
            debug!(error = %e, "compaction request ignored");
        }

        ShrinkOutcome::Killed { victim, remaining }
    }

    fn finish(&self, outcome: ShrinkOutcome, sc: ShrinkControl, verbosity: Verbosity) -> ShrinkOutcome {
        lowmem_print!(
            verbosity,
            LEVEL_RESULT,
            info,
            nr_to_scan = sc.nr_to_scan,
            gfp_mask = sc.gfp_mask,
            ret = outcome.as_raw(),
            "lowmem_shrink result"
        );
        outcome
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    pub fn debounce(&self) -> &KillDebounce {
        &self.debounce
    }

    pub fn stats(&self) -> &ShrinkerStats {
        &self.stats
    }
}

/// Step a victim's lifecycle and log the transition
fn advance(pid: Pid, from: VictimState) -> VictimState {
    let to = from.advance().unwrap_or(from);
    debug!(pid, from = %from, to = %to, "victim state");
    to
}

impl<H: Host, C: Clock> Shrinker for PressureEvaluator<H, C> {
    fn shrink(&self, sc: ShrinkControl) -> i64 {
        self.evaluate(sc).as_raw()
    }

    fn seeks(&self) -> u32 {
        self.params.cost()
    }

    fn name(&self) -> &str {
        "lowmemorykiller"
    }
}
