/*!
 * Configuration Module
 * Tunable parameters and their lock-free store
 */

mod store;
mod tunables;

pub use store::{ParamSnapshot, ParameterStore};
pub use tunables::*;
