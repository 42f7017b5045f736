/*!
 * lmkd - Main Entry Point
 *
 * Runs the low-memory killer against a simulated host:
 * - Loads tunables (LMK_CONFIG file, then LMK_* overrides)
 * - Seeds the host from LMK_SCENARIO or a built-in demo
 * - Drives the host reclaim loop until Ctrl+C
 */

use anyhow::Context;
use lowmem_killer::core::limits::DEFAULT_DRIVER_INTERVAL;
use lowmem_killer::memory::MemoryCounters;
use lowmem_killer::{
    init_tracing, PageCounters, ParameterStore, PressureEvaluator, ProcessSnapshot, Scenario,
    ShrinkerRegistry, SimulatedHost, Tunables,
};
use std::sync::Arc;
use tracing::info;

/// LRU pages reported as scanned on each driver tick
const SCAN_PER_TICK: u64 = 1024;

/// Pages moved from free to anonymous memory per tick in the demo
const DEFAULT_DRAIN: i64 = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("lmkd starting...");

    let tunables = match std::env::var("LMK_CONFIG") {
        Ok(path) => Tunables::from_json_file(&path)
            .with_context(|| format!("loading tunables from {}", path))?,
        Err(_) => Tunables::default(),
    }
    .with_env_overrides()
    .context("applying LMK_* overrides")?;
    let params = ParameterStore::new(tunables)?;

    let scenario = match std::env::var("LMK_SCENARIO") {
        Ok(path) => Scenario::from_json_file(&path)
            .with_context(|| format!("loading scenario from {}", path))?,
        Err(_) => demo_scenario(),
    };
    let host = SimulatedHost::from_scenario(scenario);

    let drain = std::env::var("LMK_DRAIN")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(DEFAULT_DRAIN);

    let evaluator = Arc::new(PressureEvaluator::new(host.clone(), params.clone()));
    let registry = ShrinkerRegistry::new();
    let id = registry.register(evaluator.clone());

    info!(
        adj = %params.adj(),
        minfree = %params.minfree(),
        drain,
        "lmkd ready, press Ctrl+C to exit"
    );

    let mut ticker = tokio::time::interval(DEFAULT_DRIVER_INTERVAL);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                host.update_counters(|c| {
                    let moved = drain.min(c.free);
                    c.free -= moved;
                    c.active_anon += moved;
                });

                let lru_pages = host.page_counters().lru_total().max(0) as u64;
                let report = registry.shrink_slab(SCAN_PER_TICK, lru_pages, 0);
                let reaped = host.reap();

                if report.freed > 0 || reaped > 0 {
                    info!(
                        freed = report.freed,
                        batches = report.batches,
                        reaped,
                        free = host.page_counters().free,
                        "reclaim tick"
                    );
                }
            }
            _ = &mut shutdown => {
                info!("shutdown requested");
                break;
            }
        }
    }

    registry.unregister(id);
    info!(stats = ?evaluator.stats().snapshot(), "lmkd stopped");
    Ok(())
}

/// Small device with a foreground app and a few cached ones
fn demo_scenario() -> Scenario {
    Scenario {
        counters: PageCounters {
            free: 20 * 1024,
            active_anon: 30 * 1024,
            inactive_anon: 10 * 1024,
            active_file: 2 * 1024,
            inactive_file: 2 * 1024,
            file: 5 * 1024,
            shmem: 512,
        },
        processes: vec![
            ProcessSnapshot::kernel_thread(2, "kthreadd"),
            ProcessSnapshot::new(1, "init", -1000, 200),
            ProcessSnapshot::new(310, "system_server", -900, 9000),
            ProcessSnapshot::new(812, "launcher", 0, 6000),
            ProcessSnapshot::new(1204, "music", 1, 3000),
            ProcessSnapshot::new(1377, "browser", 6, 8000),
            ProcessSnapshot::new(1510, "gallery", 12, 4000),
            ProcessSnapshot::new(1622, "mail", 12, 2500),
        ],
    }
}
