pub mod simulation;

pub use simulation::{SimulatedPath, SimulationParams, SimulationResult};
