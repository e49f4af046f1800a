use crate::simulation::{Result, SimulationError};
use serde::{Deserialize, Serialize};

/// Upper bound on scenarios per run; samples are held in memory per candidate.
pub const MAX_SIMULATIONS: usize = 1_000_000;

/// Parameters controlling the randomization of each simulated election
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    #[serde(rename = "numSimulations")]
    pub num_simulations: usize,
    /// Fraction of a candidate's poll average used as the std-dev of its draw.
    pub volatility: f64,
    #[serde(rename = "undecidedPercent")]
    pub undecided_percent: f64,
    /// Turnout jitter, interpreted as ± percent.
    #[serde(rename = "turnoutVariation")]
    pub turnout_variation: f64,
    #[serde(rename = "blankVoteMean")]
    pub blank_vote_mean: f64,
    #[serde(rename = "blankVoteStdDev")]
    pub blank_vote_std_dev: f64,
    /// Share a candidate must exceed to win outright in the first round.
    #[serde(rename = "majorityThreshold")]
    pub majority_threshold: f64,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: 10_000,
            volatility: 0.15,
            undecided_percent: 10.0,
            turnout_variation: 5.0,
            blank_vote_mean: 5.0,
            blank_vote_std_dev: 2.0,
            majority_threshold: 50.0,
            seed: None,
            parallel: false,
        }
    }
}

impl SimulationConfig {
    pub fn with_simulations(mut self, num_simulations: usize) -> Self {
        self.num_simulations = num_simulations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject configurations the sampler cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.num_simulations == 0 {
            return Err(invalid("numSimulations must be positive"));
        }
        if self.num_simulations > MAX_SIMULATIONS {
            return Err(invalid(&format!(
                "numSimulations must not exceed {}",
                MAX_SIMULATIONS
            )));
        }

        check_non_negative("volatility", self.volatility)?;
        check_percent("undecidedPercent", self.undecided_percent)?;
        check_percent("turnoutVariation", self.turnout_variation)?;
        check_non_negative("blankVoteMean", self.blank_vote_mean)?;
        check_non_negative("blankVoteStdDev", self.blank_vote_std_dev)?;

        if !self.majority_threshold.is_finite()
            || self.majority_threshold <= 0.0
            || self.majority_threshold > 100.0
        {
            return Err(invalid("majorityThreshold must be within (0, 100]"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> SimulationError {
    SimulationError::InvalidConfiguration(message.to_string())
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(invalid(&format!("{} must be finite, got {}", field, value)));
    }
    if value < 0.0 {
        return Err(invalid(&format!("{} must not be negative, got {}", field, value)));
    }
    Ok(())
}

fn check_percent(field: &str, value: f64) -> Result<()> {
    check_non_negative(field, value)?;
    if value > 100.0 {
        return Err(invalid(&format!("{} must not exceed 100, got {}", field, value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_simulations_rejected() {
        let config = SimulationConfig::default().with_simulations(0);
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_too_many_simulations_rejected() {
        let config = SimulationConfig::default().with_simulations(MAX_SIMULATIONS + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_fields_rejected() {
        let mut config = SimulationConfig::default();
        config.volatility = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.blank_vote_mean = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_blank_std_dev_rejected() {
        let mut config = SimulationConfig::default();
        config.blank_vote_std_dev = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("blankVoteStdDev"));
    }

    #[test]
    fn test_percent_fields_bounded() {
        let mut config = SimulationConfig::default();
        config.undecided_percent = 100.5;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.turnout_variation = 100.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_high_volatility_accepted() {
        let mut config = SimulationConfig::default();
        config.volatility = 1.5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"numSimulations": 2000, "seed": 7}"#).unwrap();
        assert_eq!(config.num_simulations, 2000);
        assert_eq!(config.seed, Some(7));
        assert!((config.volatility - 0.15).abs() < 1e-12);
        assert!(!config.parallel);
    }
}
