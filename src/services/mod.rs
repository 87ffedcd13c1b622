pub mod simulation_service;
pub mod stats;
