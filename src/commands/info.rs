use super::{load_inputs, CommandResult, ConfigOverrides};
use crate::simulation::validate_candidates;
use colored::*;
use std::path::Path;

/// Validate the inputs of a simulation and print what would be run.
pub fn info(
    candidates_path: &Path,
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> CommandResult<()> {
    let inputs = load_inputs(candidates_path, config_path, overrides)?;
    inputs.config.validate()?;
    validate_candidates(&inputs.candidates)?;

    println!("{}", "👥 Candidates".bright_cyan().bold());
    for candidate in &inputs.candidates {
        println!(
            "  {} {} ({}) {} {}%",
            candidate.id.bright_white(),
            candidate.name,
            candidate.short_name,
            candidate.party_color.dimmed(),
            format!("{:.1}", candidate.poll_average).bright_yellow()
        );
    }

    let total_polled: f64 = inputs.candidates.iter().map(|c| c.poll_average).sum();
    println!(
        "  Poll total: {}% (+{}% undecided)",
        format!("{:.1}", total_polled).bright_yellow(),
        format!("{:.1}", inputs.config.undecided_percent).bright_yellow()
    );

    let config = &inputs.config;
    println!("\n{}", "⚙️  Configuration".bright_cyan().bold());
    println!("  Simulations:       {}", config.num_simulations);
    println!("  Volatility:        {}", config.volatility);
    println!("  Turnout variation: ±{}%", config.turnout_variation);
    println!(
        "  Blank vote:        {}% (σ {})",
        config.blank_vote_mean, config.blank_vote_std_dev
    );
    println!("  Majority:          {}%", config.majority_threshold);
    println!(
        "  Seed:              {}",
        config
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "entropy".to_string())
    );

    for warning in &inputs.warnings {
        eprintln!("⚠️  {}", warning);
    }

    println!("\n✅ Inputs are valid");
    Ok(())
}
