/*!
 * Shrinker Module
 * Low-memory killer evaluator and the host reclaim driver
 */

pub mod debounce;
pub mod evaluator;
pub mod outcome;
pub mod registry;
pub mod traits;

// Re-export for convenience
pub use debounce::KillDebounce;
pub use evaluator::PressureEvaluator;
pub use outcome::{ShrinkOutcome, NO_RECLAIM};
pub use registry::{ShrinkerId, ShrinkerRegistry, SlabReport};
pub use traits::Shrinker;
