/*!
 * Selection Properties
 * Randomized checks of the selection invariants
 */

use crate::common::{counters, evaluator, tunables};
use lowmem_killer::core::types::Pages;
use lowmem_killer::process::ProcessSnapshot;
use lowmem_killer::{ShrinkControl, ShrinkOutcome};
use proptest::prelude::*;

fn process_strategy() -> impl Strategy<Value = ProcessSnapshot> {
    (1u32..10_000, -1000i16..=1000, 0i64..50_000, any::<bool>()).prop_map(
        |(pid, adj, rss, kernel_thread)| {
            let mut p = ProcessSnapshot::new(pid, "proc", adj, rss);
            if kernel_thread {
                p.kernel_thread = true;
            }
            p
        },
    )
}

/// Ascending table of 1..=6 entries
fn table_strategy() -> impl Strategy<Value = (Vec<i16>, Vec<Pages>)> {
    prop::collection::vec((0i16..150, 1i64..5000), 1..=6).prop_map(|steps| {
        let mut adj = Vec::new();
        let mut minfree = Vec::new();
        let (mut a, mut m) = (0i16, 0i64);
        for (da, dm) in steps {
            a += da;
            m += dm;
            adj.push(a);
            minfree.push(m);
        }
        (adj, minfree)
    })
}

proptest! {
    #[test]
    fn prop_victim_respects_breached_floor(
        (adj, minfree) in table_strategy(),
        free in 0i64..40_000,
        processes in prop::collection::vec(process_strategy(), 0..40),
    ) {
        let expected_floor = adj
            .iter()
            .zip(&minfree)
            .find(|(_, m)| free < **m)
            .map(|(&a, _)| a);

        let e = evaluator(tunables(&adj, &minfree), counters(free, 100_000), processes.clone());
        let outcome = e.evaluate(ShrinkControl::scan(128, 0));

        match expected_floor {
            None => prop_assert_eq!(outcome, ShrinkOutcome::Unchanged { pages: 100_000 }),
            Some(floor) => {
                let eligible: Vec<&ProcessSnapshot> = processes
                    .iter()
                    .filter(|p| !p.kernel_thread)
                    .filter(|p| p.oom_score_adj >= floor)
                    .filter(|p| p.resident_pages.unwrap_or(0) > 0)
                    .collect();

                match outcome.victim() {
                    Some(v) => {
                        prop_assert!(v.oom_score_adj >= floor);
                        prop_assert!(v.resident_pages > 0);
                        let best = eligible.iter().map(|p| p.oom_score_adj).max();
                        prop_assert_eq!(Some(v.oom_score_adj), best);
                        let first_best = eligible
                            .iter()
                            .find(|p| Some(p.oom_score_adj) == best)
                            .map(|p| p.pid);
                        prop_assert_eq!(Some(v.pid), first_best);
                        prop_assert_eq!(outcome.as_raw(), 100_000 - v.resident_pages);
                    }
                    None => {
                        prop_assert!(eligible.is_empty());
                        prop_assert_eq!(&outcome, &ShrinkOutcome::NoVictim);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_no_pressure_no_kill(
        (adj, minfree) in table_strategy(),
        headroom in 0i64..10_000,
        processes in prop::collection::vec(process_strategy(), 0..40),
    ) {
        let free = minfree.iter().copied().max().unwrap_or(0) + headroom;
        let e = evaluator(tunables(&adj, &minfree), counters(free, 7777), processes);

        prop_assert_eq!(
            e.evaluate(ShrinkControl::scan(128, 0)),
            ShrinkOutcome::Unchanged { pages: 7777 }
        );
        prop_assert_eq!(e.host().kill_count(), 0);
    }

    #[test]
    fn prop_kernel_helpers_never_selected(
        adj in -1000i16..=1000,
        rss in 1i64..1_000_000,
    ) {
        let helper = ProcessSnapshot {
            kernel_thread: true,
            ..ProcessSnapshot::new(2, "kworker", adj, rss)
        };
        let e = evaluator(tunables(&[-1000], &[4096]), counters(0, 10), vec![helper]);
        prop_assert_eq!(e.evaluate(ShrinkControl::scan(128, 0)), ShrinkOutcome::NoVictim);
    }
}
