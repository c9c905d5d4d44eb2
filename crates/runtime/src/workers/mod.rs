//! Worker tasks that back the runtime orchestration.

mod simulation;

pub use simulation::{Command, SimulationContext, SimulationWorker};
