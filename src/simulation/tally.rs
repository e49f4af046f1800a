use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One simulated election, ranked. Never leaves the simulation loop.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    /// Normalized shares in candidate input order.
    pub shares: Vec<f64>,
    pub blank_share: f64,
    pub first: usize,
    pub second: Option<usize>,
    /// The first-place share of valid (non-blank) votes exceeded the majority
    /// threshold.
    pub outright: bool,
}

impl ScenarioOutcome {
    /// Rank candidates by share descending; equal shares fall back to `tie_break`
    /// (lower wins).
    pub fn ranked(
        shares: Vec<f64>,
        blank_share: f64,
        tie_break: &[usize],
        majority_threshold: f64,
    ) -> ScenarioOutcome {
        let mut order: Vec<usize> = (0..shares.len()).collect();
        order.sort_by(|&a, &b| match shares[b].partial_cmp(&shares[a]) {
            Some(Ordering::Equal) | None => tie_break[a].cmp(&tie_break[b]),
            Some(ordering) => ordering,
        });

        let first = order[0];
        let second = order.get(1).copied();
        let outright = valid_vote_share(shares[first], blank_share) > majority_threshold;

        ScenarioOutcome {
            shares,
            blank_share,
            first,
            second,
            outright,
        }
    }

    /// The top-two pairing keyed by input position, lower index first.
    pub fn pairing(&self) -> Option<(usize, usize)> {
        self.second
            .map(|second| (self.first.min(second), self.first.max(second)))
    }
}

/// Share of valid votes, i.e. with blank/null ballots excluded.
pub fn valid_vote_share(share: f64, blank_share: f64) -> f64 {
    let valid = 100.0 - blank_share;
    if valid > 0.0 {
        share / valid * 100.0
    } else {
        0.0
    }
}

/// Running counts for a batch of scenarios. Tallies from disjoint batches
/// combine with [`ScenarioTally::merge`] in any order.
#[derive(Debug, Clone, Default)]
pub struct ScenarioTally {
    pub scenarios: u64,
    pub first_place: Vec<u64>,
    pub top_two: Vec<u64>,
    pub outright: Vec<u64>,
    pub samples: Vec<Vec<f64>>,
    pub pairings: BTreeMap<(usize, usize), u64>,
}

impl ScenarioTally {
    pub fn new(num_candidates: usize) -> Self {
        Self {
            scenarios: 0,
            first_place: vec![0; num_candidates],
            top_two: vec![0; num_candidates],
            outright: vec![0; num_candidates],
            samples: vec![Vec::new(); num_candidates],
            pairings: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, outcome: &ScenarioOutcome) {
        self.scenarios += 1;
        self.first_place[outcome.first] += 1;
        self.top_two[outcome.first] += 1;
        if outcome.outright {
            self.outright[outcome.first] += 1;
        }
        if let Some(second) = outcome.second {
            self.top_two[second] += 1;
        }
        if let Some(pairing) = outcome.pairing() {
            *self.pairings.entry(pairing).or_insert(0) += 1;
        }
        for (samples, &share) in self.samples.iter_mut().zip(&outcome.shares) {
            samples.push(share);
        }
    }

    pub fn merge(mut self, other: ScenarioTally) -> ScenarioTally {
        self.scenarios += other.scenarios;
        add_counts(&mut self.first_place, &other.first_place);
        add_counts(&mut self.top_two, &other.top_two);
        add_counts(&mut self.outright, &other.outright);
        for (samples, more) in self.samples.iter_mut().zip(other.samples) {
            samples.extend(more);
        }
        for (pairing, count) in other.pairings {
            *self.pairings.entry(pairing).or_insert(0) += count;
        }
        self
    }

    /// Scenarios in which no candidate crossed the majority threshold.
    pub fn runoffs(&self) -> u64 {
        self.scenarios - self.outright.iter().sum::<u64>()
    }
}

fn add_counts(into: &mut [u64], from: &[u64]) {
    for (a, b) in into.iter_mut().zip(from) {
        *a += b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(shares: Vec<f64>) -> ScenarioOutcome {
        let tie_break: Vec<usize> = (0..shares.len()).collect();
        ScenarioOutcome::ranked(shares, 0.0, &tie_break, 50.0)
    }

    #[test]
    fn test_ranked_picks_top_two() {
        let o = outcome(vec![20.0, 45.0, 35.0]);
        assert_eq!(o.first, 1);
        assert_eq!(o.second, Some(2));
        assert_eq!(o.pairing(), Some((1, 2)));
        assert!(!o.outright);
    }

    #[test]
    fn test_tie_break_order_applies() {
        let o = ScenarioOutcome::ranked(vec![30.0, 30.0, 40.0], 0.0, &[2, 1, 0], 50.0);
        assert_eq!(o.first, 2);
        assert_eq!(o.second, Some(1));
        assert_eq!(o.pairing(), Some((1, 2)));
    }

    #[test]
    fn test_majority_measured_over_valid_votes() {
        // 52% of valid votes once a 5% blank share is set aside.
        let o = ScenarioOutcome::ranked(vec![49.4, 45.6], 5.0, &[0, 1], 50.0);
        assert!(o.outright);

        let o = ScenarioOutcome::ranked(vec![47.0, 48.0], 5.0, &[0, 1], 50.0);
        assert!(o.outright);

        let o = ScenarioOutcome::ranked(vec![46.0, 44.0], 10.0, &[0, 1], 50.0);
        assert!(o.outright);

        let o = ScenarioOutcome::ranked(vec![40.0, 40.0, 20.0], 0.0, &[0, 1, 2], 50.0);
        assert!(!o.outright);
    }

    #[test]
    fn test_valid_vote_share_without_valid_votes() {
        assert_eq!(valid_vote_share(0.0, 100.0), 0.0);
        assert!((valid_vote_share(49.4, 5.0) - 52.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_counts() {
        let mut tally = ScenarioTally::new(3);
        tally.record(&outcome(vec![55.0, 30.0, 15.0]));
        tally.record(&outcome(vec![30.0, 40.0, 30.0]));

        assert_eq!(tally.scenarios, 2);
        assert_eq!(tally.first_place, vec![1, 1, 0]);
        assert_eq!(tally.top_two, vec![2, 2, 0]);
        assert_eq!(tally.outright, vec![1, 0, 0]);
        assert_eq!(tally.runoffs(), 1);
        assert_eq!(tally.pairings.get(&(0, 1)), Some(&2));
        assert_eq!(tally.samples[2], vec![15.0, 30.0]);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let scenarios = vec![
            outcome(vec![55.0, 30.0, 15.0]),
            outcome(vec![20.0, 30.0, 50.0]),
            outcome(vec![10.0, 60.0, 30.0]),
        ];

        let mut left = ScenarioTally::new(3);
        left.record(&scenarios[0]);
        let mut right = ScenarioTally::new(3);
        right.record(&scenarios[1]);
        right.record(&scenarios[2]);

        let ab = left.clone().merge(right.clone());
        let ba = right.merge(left);

        assert_eq!(ab.scenarios, 3);
        assert_eq!(ab.first_place, ba.first_place);
        assert_eq!(ab.top_two, ba.top_two);
        assert_eq!(ab.outright, ba.outright);
        assert_eq!(ab.pairings, ba.pairings);
        assert_eq!(ab.samples[0].len(), 3);
    }

    #[test]
    fn test_single_candidate_has_no_pairing() {
        let mut tally = ScenarioTally::new(1);
        tally.record(&outcome(vec![95.0]));
        assert!(tally.pairings.is_empty());
        assert_eq!(tally.top_two, vec![1]);
    }
}
