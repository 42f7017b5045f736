/*!
 * Host Module
 * Boundary to the operating system's memory and process facilities
 */

mod simulation;
mod traits;

pub use simulation::{Scenario, SimulatedHost};
pub use traits::*;
