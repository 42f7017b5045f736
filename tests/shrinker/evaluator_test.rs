/*!
 * Pressure Evaluator Tests
 * Threshold lookup, victim selection and kill issuance end to end
 */

use crate::common::{counters, evaluator, tunables};
use lowmem_killer::process::{ProcessSnapshot, VictimState};
use lowmem_killer::{PageCounters, PressureMode, ShrinkControl, ShrinkOutcome, NO_RECLAIM};
use pretty_assertions::assert_eq;

fn scan() -> ShrinkControl {
    ShrinkControl::scan(128, 0xd0)
}

#[test]
fn test_end_to_end_only_adj_12_and_above_eligible() {
    // free + cache = 15000: 3072 holds, 16384 is breached => min adj 12
    let e = evaluator(
        tunables(&[0, 12], &[3072, 16384]),
        counters(15000, 40000),
        vec![
            ProcessSnapshot::new(10, "launcher", 0, 5000),
            ProcessSnapshot::new(11, "music", 6, 5000),
        ],
    );

    assert_eq!(e.evaluate(scan()), ShrinkOutcome::NoVictim);
    assert_eq!(e.host().kill_count(), 0);

    e.host().spawn(ProcessSnapshot::new(12, "gallery", 12, 700));
    let outcome = e.evaluate(scan());
    assert_eq!(outcome.victim().map(|v| v.pid), Some(12));
    assert_eq!(outcome.as_raw(), 40000 - 700);
}

#[test]
fn test_cache_counts_as_free_in_combined_mode() {
    let e = evaluator(
        tunables(&[0, 12], &[3072, 16384]),
        PageCounters {
            free: 10000,
            active_file: 4000,
            inactive_file: 3000,
            active_anon: 9000,
            ..Default::default()
        },
        vec![ProcessSnapshot::new(10, "cached", 12, 100)],
    );

    // 10000 + 7000 >= 16384: nothing breached
    assert_eq!(
        e.evaluate(scan()),
        ShrinkOutcome::Unchanged { pages: 16000 }
    );
}

#[test]
fn test_no_pressure_returns_unmodified_total() {
    let e = evaluator(
        tunables(&[0, 1, 6, 12], &[3072, 4096, 10240, 16384]),
        counters(50000, 12345),
        vec![ProcessSnapshot::new(10, "cached", 1000, 9999)],
    );

    let outcome = e.evaluate(scan());
    assert_eq!(outcome, ShrinkOutcome::Unchanged { pages: 12345 });
    assert_eq!(e.host().kill_count(), 0);
    assert_eq!(e.stats().snapshot().no_pressure, 1);
}

#[test]
fn test_query_never_kills_even_under_pressure() {
    let e = evaluator(
        tunables(&[0], &[100000]),
        PageCounters {
            free: 10,
            active_anon: 100,
            inactive_anon: 200,
            active_file: 300,
            inactive_file: 400,
            ..Default::default()
        },
        vec![ProcessSnapshot::new(10, "cached", 12, 500)],
    );

    assert_eq!(
        e.evaluate(ShrinkControl::query(0)),
        ShrinkOutcome::Estimate { pages: 1000 }
    );
    assert_eq!(
        e.evaluate(ShrinkControl::scan(-5, 0)),
        ShrinkOutcome::Estimate { pages: 1000 }
    );
    assert_eq!(e.host().kill_count(), 0);
    assert_eq!(e.stats().snapshot().queries, 2);
}

#[test]
fn test_kernel_helper_never_selected() {
    let helper = ProcessSnapshot {
        oom_score_adj: 1000,
        resident_pages: Some(1_000_000),
        ..ProcessSnapshot::kernel_thread(2, "kswapd0")
    };
    let e = evaluator(tunables(&[0], &[4096]), counters(0, 5000), vec![helper]);

    assert_eq!(e.evaluate(scan()), ShrinkOutcome::NoVictim);
    assert_eq!(e.evaluate(scan()).as_raw(), NO_RECLAIM);
}

#[test]
fn test_zero_footprint_never_selected() {
    let e = evaluator(
        tunables(&[0], &[4096]),
        counters(0, 5000),
        vec![
            ProcessSnapshot::new(10, "empty", 1000, 0),
            ProcessSnapshot::new(11, "real", 0, 10),
        ],
    );

    let outcome = e.evaluate(scan());
    assert_eq!(outcome.victim().map(|v| v.pid), Some(11));
}

#[test]
fn test_priority_dominates_resident_size() {
    let e = evaluator(
        tunables(&[0], &[4096]),
        counters(0, 5000),
        vec![
            ProcessSnapshot::new(10, "big", 5, 100),
            ProcessSnapshot::new(11, "small", 10, 10),
        ],
    );

    let outcome = e.evaluate(scan());
    let victim = outcome.victim().expect("victim selected");
    assert_eq!(victim.pid, 11);
    assert_eq!(victim.oom_score_adj, 10);
    assert_eq!(outcome.as_raw(), 5000 - 10);
}

#[test]
fn test_kill_marks_victim_and_requests_compaction() {
    let e = evaluator(
        tunables(&[0], &[4096]),
        counters(0, 5000),
        vec![ProcessSnapshot::new(10, "cached", 12, 300)],
    );

    assert!(e.evaluate(scan()).is_kill());
    assert_eq!(e.host().take_kills(), vec![10]);
    assert!(e.host().process(10).expect("still listed").memdie);
    assert_eq!(e.host().compaction_count(), 1);

    let history = e.stats().recent_kills();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].pid, 10);
    assert!(history[0].delivered);
    assert_eq!(history[0].state, VictimState::PendingDeath);
}

#[test]
fn test_split_mode_needs_free_and_file_below_floor() {
    let mut t = tunables(&[0], &[4096]);
    t.pressure_mode = PressureMode::Split;
    let e = evaluator(
        t,
        PageCounters {
            free: 1000,
            file: 9000,
            shmem: 1000,
            active_anon: 5000,
            ..Default::default()
        },
        vec![ProcessSnapshot::new(10, "cached", 12, 300)],
    );

    // file - shmem = 8000 is above the floor
    assert_eq!(e.evaluate(scan()), ShrinkOutcome::Unchanged { pages: 5000 });

    e.host().update_counters(|c| c.shmem = 6000);
    assert!(e.evaluate(scan()).is_kill());
}

#[test]
fn test_tunable_changes_apply_on_next_pass() {
    let e = evaluator(
        tunables(&[0], &[1024]),
        counters(2000, 5000),
        vec![ProcessSnapshot::new(10, "cached", 12, 300)],
    );

    assert_eq!(e.evaluate(scan()), ShrinkOutcome::Unchanged { pages: 5000 });

    e.params().set_minfree("4096").unwrap();
    assert!(e.evaluate(scan()).is_kill());
}

#[test]
fn test_empty_table_never_acts() {
    let e = evaluator(
        tunables(&[0, 1, 6], &[]),
        counters(0, 5000),
        vec![ProcessSnapshot::new(10, "cached", 12, 300)],
    );
    assert_eq!(e.evaluate(scan()), ShrinkOutcome::Unchanged { pages: 5000 });
}
