/*!
 * Monitoring
 * Tracing setup, verbosity-gated diagnostics and killer statistics
 */

pub mod diagnostics;
mod stats;
mod tracer;

pub use diagnostics::Verbosity;
pub use stats::{KillRecord, ShrinkerStats, StatsSnapshot};
pub use tracer::{init_tracing, span_shrink};
