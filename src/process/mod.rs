/*!
 * Process Module
 * Process snapshots and victim selection
 */

pub mod selection;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use selection::{select_victim, Selection};
pub use traits::*;
pub use types::*;
