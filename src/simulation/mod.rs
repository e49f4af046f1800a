//! Monte Carlo first-round and runoff projections.
//!
//! A run draws `numSimulations` independent scenarios from the poll averages,
//! tallies who finished first and second in each, and reduces the tallies
//! into per-candidate statistics and the most likely runoff pairings.

use crate::model::{CandidateInput, SimulationConfig, SimulationResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::HashSet;

pub mod aggregate;
pub mod sampler;
pub mod stats;
pub mod tally;

use sampler::ScenarioSampler;
use tally::ScenarioTally;

/// Scenarios drawn from one ChaCha stream. Fixed so that sequential and
/// parallel runs split the work identically.
pub const SCENARIOS_PER_CHUNK: usize = 1_000;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("No candidates supplied")]
    EmptyCandidateSet,
    #[error("Invalid candidate '{id}': {reason}")]
    InvalidCandidate { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Runs simulations for a fixed, validated configuration
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the full simulation on seeded ChaCha streams, one per chunk.
    ///
    /// Without a configured seed the base seed comes from system entropy; it
    /// is echoed in the result either way.
    pub fn run(&self, candidates: &[CandidateInput]) -> Result<SimulationResult> {
        validate_candidates(candidates)?;

        let seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        let sampler = ScenarioSampler::new(&self.config, candidates);
        let chunks = chunk_plan(self.config.num_simulations);
        let num_candidates = candidates.len();

        let tally = if self.config.parallel {
            chunks
                .par_iter()
                .map(|&(index, count)| run_chunk(&sampler, seed, index, count))
                .reduce(|| ScenarioTally::new(num_candidates), ScenarioTally::merge)
        } else {
            chunks
                .iter()
                .map(|&(index, count)| run_chunk(&sampler, seed, index, count))
                .fold(ScenarioTally::new(num_candidates), ScenarioTally::merge)
        };

        Ok(aggregate::aggregate(candidates, tally, Some(seed)))
    }

    /// Run every scenario sequentially from a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(
        &self,
        candidates: &[CandidateInput],
        rng: &mut R,
    ) -> Result<SimulationResult> {
        validate_candidates(candidates)?;

        let sampler = ScenarioSampler::new(&self.config, candidates);
        let mut tally = ScenarioTally::new(candidates.len());
        for _ in 0..self.config.num_simulations {
            tally.record(&sampler.sample(rng));
        }

        Ok(aggregate::aggregate(candidates, tally, None))
    }
}

/// Validate inputs and run a simulation with the configured (or entropy) seed.
pub fn run_simulation(
    config: &SimulationConfig,
    candidates: &[CandidateInput],
) -> Result<SimulationResult> {
    Simulator::new(config.clone())?.run(candidates)
}

pub fn validate_candidates(candidates: &[CandidateInput]) -> Result<()> {
    if candidates.is_empty() {
        return Err(SimulationError::EmptyCandidateSet);
    }

    let mut seen = HashSet::new();
    for candidate in candidates {
        let reason = if candidate.id.trim().is_empty() {
            Some("id must not be empty".to_string())
        } else if !candidate.poll_average.is_finite() {
            Some(format!(
                "pollAverage must be finite, got {}",
                candidate.poll_average
            ))
        } else if candidate.poll_average < 0.0 {
            Some(format!(
                "pollAverage must not be negative, got {}",
                candidate.poll_average
            ))
        } else if !seen.insert(candidate.id.as_str()) {
            Some("duplicate id".to_string())
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(SimulationError::InvalidCandidate {
                id: candidate.id.clone(),
                reason,
            });
        }
    }

    Ok(())
}

/// Split `num_simulations` into (chunk index, scenario count) pairs.
fn chunk_plan(num_simulations: usize) -> Vec<(u64, usize)> {
    let mut chunks = Vec::with_capacity(num_simulations / SCENARIOS_PER_CHUNK + 1);
    let mut remaining = num_simulations;
    let mut index = 0u64;

    while remaining > 0 {
        let count = remaining.min(SCENARIOS_PER_CHUNK);
        chunks.push((index, count));
        remaining -= count;
        index += 1;
    }

    chunks
}

fn run_chunk(sampler: &ScenarioSampler, seed: u64, index: u64, count: usize) -> ScenarioTally {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index);

    let mut tally = ScenarioTally::new(sampler.num_candidates());
    for _ in 0..count {
        tally.record(&sampler.sample(&mut rng));
    }
    tally
}
