/*!
 * Memory Module
 * Page counters and the free-memory threshold table
 */

pub mod threshold;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use threshold::{ThresholdEntry, ThresholdTable};
pub use traits::*;
pub use types::*;
