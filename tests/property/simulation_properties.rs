use proptest::prelude::*;
use runoff_sim::{run_simulation, CandidateInput, SimulationConfig};

fn candidates_strategy() -> impl Strategy<Value = Vec<CandidateInput>> {
    prop::collection::vec(0.0f64..60.0, 1..8).prop_map(|polls| {
        polls
            .into_iter()
            .enumerate()
            .map(|(i, poll)| CandidateInput::new(&format!("c{}", i), &format!("Candidate {}", i), poll))
            .collect()
    })
}

fn config_strategy() -> impl Strategy<Value = SimulationConfig> {
    (
        50usize..400,
        0.0f64..1.0,
        0.0f64..30.0,
        0.0f64..20.0,
        0.0f64..10.0,
        0.0f64..5.0,
        any::<u64>(),
    )
        .prop_map(
            |(num_simulations, volatility, undecided, turnout, blank_mean, blank_std_dev, seed)| {
                SimulationConfig {
                    num_simulations,
                    volatility,
                    undecided_percent: undecided,
                    turnout_variation: turnout,
                    blank_vote_mean: blank_mean,
                    blank_vote_std_dev: blank_std_dev,
                    seed: Some(seed),
                    ..SimulationConfig::default()
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn win_probabilities_are_conserved(candidates in candidates_strategy(), config in config_strategy()) {
        let result = run_simulation(&config, &candidates).unwrap();
        let total: f64 = result.candidates.iter().map(|c| c.win_probability).sum();
        prop_assert!((99.0..=101.0).contains(&total), "sum {}", total);
        for c in &result.candidates {
            prop_assert!((0.0..=100.0).contains(&c.win_probability));
        }
    }

    #[test]
    fn vote_statistics_are_ordered(candidates in candidates_strategy(), config in config_strategy()) {
        let result = run_simulation(&config, &candidates).unwrap();
        for c in &result.candidates {
            prop_assert!(c.percentile5 <= c.median_vote);
            prop_assert!(c.median_vote <= c.percentile95);
            prop_assert!(c.second_round_probability >= c.win_probability);
            prop_assert!(c.mean_vote >= 0.0 && c.mean_vote <= 100.0);
        }
    }

    #[test]
    fn seeded_runs_are_deterministic(candidates in candidates_strategy(), config in config_strategy()) {
        let first = run_simulation(&config, &candidates).unwrap();
        let second = run_simulation(&config.clone().with_parallel(true), &candidates).unwrap();
        prop_assert_eq!(first.candidates, second.candidates);
        prop_assert_eq!(first.second_round_matchups, second.second_round_matchups);
    }
}
