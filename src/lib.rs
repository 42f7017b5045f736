/*!
 * Low Memory Killer Library
 * Threshold-driven process killer for memory-constrained systems
 */

pub mod config;
pub mod core;
pub mod host;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod shrinker;

// Re-exports
pub use config::{ParameterStore, Tunables};
pub use crate::core::{Clock, ConfigError, HostError, ManualClock, MonotonicClock, ShrinkControl};
pub use host::{Host, Scenario, SimulatedHost};
pub use memory::{PageCounters, PressureMode, ThresholdEntry, ThresholdTable};
pub use monitoring::init_tracing;
pub use process::{ProcessSnapshot, Victim};
pub use shrinker::{PressureEvaluator, ShrinkOutcome, Shrinker, ShrinkerRegistry, NO_RECLAIM};
