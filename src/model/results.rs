use serde::{Deserialize, Serialize};

/// Per-candidate summary across every simulated election
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSimResult {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortName")]
    pub short_name: String,
    #[serde(rename = "partyColor")]
    pub party_color: String,
    #[serde(rename = "pollAverage")]
    pub poll_average: f64,
    #[serde(rename = "winProbability")]
    pub win_probability: f64,
    #[serde(rename = "secondRoundProbability")]
    pub second_round_probability: f64,
    #[serde(rename = "firstRoundVictoryProbability")]
    pub first_round_victory_probability: f64,
    #[serde(rename = "meanVote")]
    pub mean_vote: f64,
    #[serde(rename = "medianVote")]
    pub median_vote: f64,
    pub percentile5: f64,
    pub percentile95: f64,
    #[serde(rename = "stdDev")]
    pub std_dev: f64,
}

/// How often a pair of candidates occupied the top two places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupTally {
    #[serde(rename = "candidate1Id")]
    pub candidate1_id: String,
    #[serde(rename = "candidate1")]
    pub candidate1_name: String,
    #[serde(rename = "candidate2Id")]
    pub candidate2_id: String,
    #[serde(rename = "candidate2")]
    pub candidate2_name: String,
    pub count: u64,
    pub probability: f64,
}

impl MatchupTally {
    pub fn label(&self) -> String {
        format!("{} vs {}", self.candidate1_name, self.candidate2_name)
    }

    pub fn involves(&self, id: &str) -> bool {
        self.candidate1_id == id || self.candidate2_id == id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub candidates: Vec<CandidateSimResult>,
    #[serde(rename = "secondRoundMatchups")]
    pub second_round_matchups: Vec<MatchupTally>,
    /// Share of scenarios where nobody crossed the majority threshold.
    #[serde(rename = "runoffProbability")]
    pub runoff_probability: f64,
    #[serde(rename = "totalSimulations")]
    pub total_simulations: usize,
    /// Base seed of the chunked streams; `None` when the caller supplied the RNG.
    pub seed: Option<u64>,
    pub timestamp: String,
}

impl SimulationResult {
    pub fn candidate(&self, id: &str) -> Option<&CandidateSimResult> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Find the matchup between two candidates regardless of order.
    pub fn matchup(&self, a: &str, b: &str) -> Option<&MatchupTally> {
        if a == b {
            return None;
        }
        self.second_round_matchups
            .iter()
            .find(|m| m.involves(a) && m.involves(b))
    }

    pub fn favorite(&self) -> Option<&CandidateSimResult> {
        self.candidates.first()
    }
}
