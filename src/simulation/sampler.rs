use super::tally::ScenarioOutcome;
use crate::model::{CandidateInput, SimulationConfig};
use rand::Rng;
use rand_distr::StandardNormal;

/// Scale (in percentage points) of the half-normal draw for candidates
/// without polling data. Their draws are almost surely positive, so they
/// never tie at zero.
pub const ZERO_POLL_STD_DEV: f64 = 1.0;

/// Lowest turnout multiplier a scenario can draw.
const MIN_TURNOUT_FACTOR: f64 = 0.01;

/// Draws one simulated election at a time from the poll averages
pub struct ScenarioSampler<'a> {
    config: &'a SimulationConfig,
    means: Vec<f64>,
    std_devs: Vec<f64>,
    /// Position of each candidate when sorted by id, used to break share ties.
    tie_break: Vec<usize>,
}

impl<'a> ScenarioSampler<'a> {
    pub fn new(config: &'a SimulationConfig, candidates: &[CandidateInput]) -> Self {
        let means = candidates.iter().map(|c| c.poll_average).collect();
        let std_devs = candidates
            .iter()
            .map(|c| {
                if c.has_polling_data() {
                    c.poll_average * config.volatility
                } else {
                    ZERO_POLL_STD_DEV
                }
            })
            .collect();

        let mut by_id: Vec<usize> = (0..candidates.len()).collect();
        by_id.sort_by(|&a, &b| candidates[a].id.cmp(&candidates[b].id));
        let mut tie_break = vec![0; candidates.len()];
        for (position, &index) in by_id.iter().enumerate() {
            tie_break[index] = position;
        }

        Self {
            config,
            means,
            std_devs,
            tie_break,
        }
    }

    pub fn num_candidates(&self) -> usize {
        self.means.len()
    }

    /// Draw one scenario: noisy shares, undecided split, blank vote, turnout
    /// jitter, then normalization to 100.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ScenarioOutcome {
        let mut shares: Vec<f64> = self
            .means
            .iter()
            .zip(&self.std_devs)
            .map(|(&mean, &std_dev)| {
                let z: f64 = rng.sample(StandardNormal);
                if mean > 0.0 {
                    (mean + std_dev * z).max(0.0)
                } else {
                    std_dev * z.abs()
                }
            })
            .collect();

        self.redistribute_undecided(&mut shares, rng);

        let blank = self.draw_blank_vote(rng);

        let turnout = self.draw_turnout_factor(rng);
        for share in shares.iter_mut() {
            *share *= turnout;
        }

        let blank = normalize(&mut shares, blank);

        ScenarioOutcome::ranked(
            shares,
            blank,
            &self.tie_break,
            self.config.majority_threshold,
        )
    }

    fn redistribute_undecided<R: Rng>(&self, shares: &mut [f64], rng: &mut R) {
        let weights: Vec<f64> = shares.iter().map(|_| rng.gen::<f64>()).collect();
        let pool = self.config.undecided_percent;
        let total_weight: f64 = weights.iter().sum();

        if total_weight > 0.0 {
            for (share, weight) in shares.iter_mut().zip(&weights) {
                *share += pool * weight / total_weight;
            }
        } else {
            let even = pool / shares.len() as f64;
            for share in shares.iter_mut() {
                *share += even;
            }
        }
    }

    fn draw_blank_vote<R: Rng>(&self, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        (self.config.blank_vote_mean + self.config.blank_vote_std_dev * z).max(0.0)
    }

    fn draw_turnout_factor<R: Rng>(&self, rng: &mut R) -> f64 {
        let jitter = rng.gen::<f64>() * 2.0 - 1.0;
        (1.0 + jitter * self.config.turnout_variation / 100.0).max(MIN_TURNOUT_FACTOR)
    }
}

/// Scale candidate shares and the blank share to sum to 100, returning the
/// scaled blank share. A non-positive total splits 100 evenly with no blank vote.
fn normalize(shares: &mut [f64], blank: f64) -> f64 {
    let total = shares.iter().sum::<f64>() + blank;

    if !(total > 0.0) || !total.is_finite() {
        let even = 100.0 / shares.len() as f64;
        for share in shares.iter_mut() {
            *share = even;
        }
        return 0.0;
    }

    let scale = 100.0 / total;
    for share in shares.iter_mut() {
        *share *= scale;
    }
    blank * scale
}
