use super::{load_inputs, CommandResult, ConfigOverrides};
use crate::metrics::{MetricsCollector, RunStage};
use crate::model::SimulationResult;
use crate::simulation::Simulator;
use crate::util::write_serialized;
use colored::*;
use std::path::Path;

pub fn simulate(
    candidates_path: &Path,
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
    output_path: Option<&Path>,
    top_matchups: usize,
) -> CommandResult<SimulationResult> {
    let mut metrics = MetricsCollector::new();

    metrics.start_stage(RunStage::Loading);
    let inputs = load_inputs(candidates_path, config_path, overrides)?;
    for warning in &inputs.warnings {
        eprintln!("⚠️  {}", warning);
    }
    let simulator = Simulator::new(inputs.config)?;
    metrics.end_stage(
        RunStage::Loading,
        None,
        Some(inputs.candidates.len() as u64),
    );

    println!(
        "🎲 Simulating {} elections for {} candidates{}",
        simulator.config().num_simulations.to_string().bright_cyan(),
        inputs.candidates.len().to_string().bright_cyan(),
        if simulator.config().parallel {
            " (parallel)".to_string()
        } else {
            String::new()
        }
    );

    metrics.start_stage(RunStage::Simulation);
    let result = simulator.run(&inputs.candidates)?;
    metrics.end_stage(
        RunStage::Simulation,
        Some(result.total_simulations as u64),
        Some(result.candidates.len() as u64),
    );

    print_results(&result, top_matchups);

    if let Some(output_path) = output_path {
        metrics.start_stage(RunStage::Output);
        write_serialized(output_path, &result)?;
        metrics.end_stage(RunStage::Output, None, None);
        println!(
            "✅ Results written to {}",
            output_path.display().to_string().bright_green()
        );
    }

    metrics.print_summary();

    Ok(result)
}

fn print_results(result: &SimulationResult, top_matchups: usize) {
    println!(
        "\n{}",
        "📊 First Round Projection".bright_cyan().bold()
    );
    println!("{}", "=".repeat(78).bright_cyan());
    println!(
        "{:<24} {:>7} {:>8} {:>8} {:>7} {:>7} {:>13}",
        "Candidate", "Poll", "Win %", "Top 2 %", "Mean", "Median", "90% range"
    );

    for candidate in &result.candidates {
        println!(
            "{:<24} {:>7.1} {:>8} {:>8.1} {:>7.1} {:>7.1} {:>13}",
            truncate(&candidate.name, 24),
            candidate.poll_average,
            format!("{:.1}", candidate.win_probability).bright_green(),
            candidate.second_round_probability,
            candidate.mean_vote,
            candidate.median_vote,
            format!("{:.1}–{:.1}", candidate.percentile5, candidate.percentile95),
        );
    }

    println!(
        "\n🗳️  Runoff needed in {}% of scenarios",
        format!("{:.1}", result.runoff_probability).bright_yellow()
    );

    if !result.second_round_matchups.is_empty() {
        println!("\n{}", "🤝 Likeliest Runoff Matchups".bright_cyan().bold());
        for matchup in result.second_round_matchups.iter().take(top_matchups) {
            println!(
                "  {} {}%",
                matchup.label(),
                format!("{:.1}", matchup.probability).bright_yellow()
            );
        }
    }

    if let Some(seed) = result.seed {
        println!("\n🌱 Seed: {}", seed.to_string().bright_white());
    }
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(width - 1).collect();
        short.push('…');
        short
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Lula", 24), "Lula");
        assert_eq!(truncate("Abcdefgh", 5), "Abcd…");
    }

    #[test]
    fn test_simulate_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let candidates_path = dir.path().join("candidates.json");
        std::fs::write(
            &candidates_path,
            r##"[
                {"id": "a", "name": "Alice", "partyColor": "#112233", "pollAverage": 45},
                {"id": "b", "name": "Bruno", "pollAverage": 35},
                {"id": "c", "name": "Carla", "pollAverage": 20}
            ]"##,
        )
        .unwrap();
        let output_path = dir.path().join("out").join("result.json");
        let overrides = ConfigOverrides {
            simulations: Some(1_000),
            seed: Some(17),
            ..ConfigOverrides::default()
        };

        let result = simulate(&candidates_path, None, &overrides, Some(output_path.as_path()), 5).unwrap();

        assert_eq!(result.total_simulations, 1_000);
        let written: SimulationResult = crate::util::read_serialized(&output_path).unwrap();
        assert_eq!(written.seed, Some(17));
        assert_eq!(written.candidates.len(), 3);
        assert_eq!(written.candidates[0].id, result.candidates[0].id);
        assert_eq!(written.timestamp, result.timestamp);
    }

    #[test]
    fn test_simulate_rejects_empty_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let candidates_path = dir.path().join("candidates.json");
        std::fs::write(&candidates_path, "[]").unwrap();

        let err = simulate(&candidates_path, None, &ConfigOverrides::default(), None, 5).unwrap_err();
        assert_eq!(err.to_string(), "No candidates supplied");
    }
}
