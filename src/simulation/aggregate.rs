use super::stats::{percentage, round1, Summary};
use super::tally::ScenarioTally;
use crate::model::{CandidateInput, CandidateSimResult, MatchupTally, SimulationResult};
use chrono::Utc;
use itertools::Itertools;

/// Most runoff pairings a result carries.
pub const MAX_MATCHUPS: usize = 20;

/// Reduce a finished tally into the caller-facing result.
pub fn aggregate(
    candidates: &[CandidateInput],
    tally: ScenarioTally,
    seed: Option<u64>,
) -> SimulationResult {
    let total = tally.scenarios;

    debug_assert!(
        (win_probability_sum(&tally) - 100.0).abs() < 1e-6,
        "win probabilities must sum to 100 before rounding"
    );

    let second_round_matchups = rank_matchups(candidates, &tally);
    let runoff_probability = round1(percentage(tally.runoffs(), total));

    let ScenarioTally {
        first_place,
        top_two,
        outright,
        samples,
        ..
    } = tally;

    let candidate_results = candidates
        .iter()
        .zip(samples)
        .enumerate()
        .map(|(index, (candidate, samples))| {
            let summary = Summary::from_samples(samples);
            let result = CandidateSimResult {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
                short_name: candidate.short_name.clone(),
                party_color: candidate.party_color.clone(),
                poll_average: candidate.poll_average,
                win_probability: round1(percentage(first_place[index], total)),
                second_round_probability: round1(percentage(top_two[index], total)),
                first_round_victory_probability: round1(percentage(outright[index], total)),
                mean_vote: round1(summary.mean),
                median_vote: round1(summary.median),
                percentile5: round1(summary.percentile5),
                percentile95: round1(summary.percentile95),
                std_dev: round1(summary.std_dev),
            };
            (first_place[index], result)
        })
        // Stable sort keeps input order among equal win counts.
        .sorted_by(|(a, _), (b, _)| b.cmp(a))
        .map(|(_, result)| result)
        .collect();

    SimulationResult {
        candidates: candidate_results,
        second_round_matchups,
        runoff_probability,
        total_simulations: total as usize,
        seed,
        timestamp: Utc::now().to_rfc3339(),
    }
}

/// Sum of unrounded win probabilities; 100 for any non-empty tally.
pub fn win_probability_sum(tally: &ScenarioTally) -> f64 {
    tally
        .first_place
        .iter()
        .map(|&wins| percentage(wins, tally.scenarios))
        .sum()
}

fn rank_matchups(candidates: &[CandidateInput], tally: &ScenarioTally) -> Vec<MatchupTally> {
    tally
        .pairings
        .iter()
        // Pairings iterate in key order, so equal counts stay ordered by key.
        .sorted_by(|(_, a), (_, b)| b.cmp(a))
        .take(MAX_MATCHUPS)
        .map(|(&(first, second), &count)| MatchupTally {
            candidate1_id: candidates[first].id.clone(),
            candidate1_name: candidates[first].name.clone(),
            candidate2_id: candidates[second].id.clone(),
            candidate2_name: candidates[second].name.clone(),
            count,
            probability: round1(percentage(count, tally.scenarios)),
        })
        .collect()
}
