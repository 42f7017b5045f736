/*!
 * Core Module
 * Fundamental types, limits, clocks and error handling
 */

pub mod clock;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use errors::*;
pub use types::*;
