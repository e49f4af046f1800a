pub mod candidate;
pub mod config;
pub mod results;

pub use candidate::CandidateInput;
pub use config::SimulationConfig;
pub use results::{CandidateSimResult, MatchupTally, SimulationResult};
