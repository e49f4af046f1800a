mod info;
mod simulate;

pub use info::info;
pub use simulate::simulate;

use crate::model::{CandidateInput, SimulationConfig};
use crate::normalizers::normalize_candidates;
use crate::simulation::SimulationError;
use crate::util::{read_serialized, InputError};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

pub type CommandResult<T> = std::result::Result<T, CommandError>;

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub simulations: Option<usize>,
    pub volatility: Option<f64>,
    pub undecided: Option<f64>,
    pub turnout_variation: Option<f64>,
    pub blank_mean: Option<f64>,
    pub blank_std_dev: Option<f64>,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut SimulationConfig) {
        if let Some(simulations) = self.simulations {
            config.num_simulations = simulations;
        }
        if let Some(volatility) = self.volatility {
            config.volatility = volatility;
        }
        if let Some(undecided) = self.undecided {
            config.undecided_percent = undecided;
        }
        if let Some(turnout_variation) = self.turnout_variation {
            config.turnout_variation = turnout_variation;
        }
        if let Some(blank_mean) = self.blank_mean {
            config.blank_vote_mean = blank_mean;
        }
        if let Some(blank_std_dev) = self.blank_std_dev {
            config.blank_vote_std_dev = blank_std_dev;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.parallel {
            config.parallel = true;
        }
    }
}

/// Everything a command needs before it can simulate
#[derive(Debug)]
pub struct LoadedInputs {
    pub candidates: Vec<CandidateInput>,
    pub config: SimulationConfig,
    pub warnings: Vec<String>,
}

/// Read candidates and config, apply overrides and normalize the candidates.
pub fn load_inputs(
    candidates_path: &Path,
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> CommandResult<LoadedInputs> {
    let raw_candidates: Vec<CandidateInput> = read_serialized(candidates_path)?;
    let mut config = match config_path {
        Some(path) => read_serialized(path)?,
        None => SimulationConfig::default(),
    };
    overrides.apply(&mut config);

    let (candidates, warnings) = normalize_candidates(raw_candidates);

    Ok(LoadedInputs {
        candidates,
        config,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = SimulationConfig::default();
        let overrides = ConfigOverrides {
            simulations: Some(2_000),
            undecided: Some(0.0),
            seed: Some(3),
            parallel: true,
            ..ConfigOverrides::default()
        };
        overrides.apply(&mut config);

        assert_eq!(config.num_simulations, 2_000);
        assert_eq!(config.undecided_percent, 0.0);
        assert_eq!(config.seed, Some(3));
        assert!(config.parallel);
        assert_eq!(config.volatility, SimulationConfig::default().volatility);
    }

    #[test]
    fn test_load_inputs_normalizes_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let candidates_path = dir.path().join("candidates.json");
        std::fs::write(
            &candidates_path,
            r#"[{"id": " a ", "name": "Ana  Souza", "pollAverage": 12.5}]"#,
        )
        .unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, r#"{"numSimulations": 1500}"#).unwrap();

        let inputs = load_inputs(
            &candidates_path,
            Some(config_path.as_path()),
            &ConfigOverrides::default(),
        )
        .unwrap();

        assert_eq!(inputs.candidates[0].id, "a");
        assert_eq!(inputs.candidates[0].short_name, "Souza");
        assert_eq!(inputs.config.num_simulations, 1500);
        assert!(inputs.warnings.is_empty());
    }
}
