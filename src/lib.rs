pub mod commands;
pub mod metrics;
pub mod model;
pub mod normalizers;
pub mod simulation;
pub mod util;

pub use model::{CandidateInput, CandidateSimResult, MatchupTally, SimulationConfig, SimulationResult};
pub use simulation::{run_simulation, SimulationError, Simulator};
