use clap::{Parser, Subcommand};
use runoff_sim::commands::{info, simulate, ConfigOverrides};
use std::path::PathBuf;

#[derive(Parser)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct SimulationArgs {
    /// Candidates JSON file (array of {id, name, shortName, partyColor, pollAverage})
    candidates: PathBuf,
    /// Simulation config JSON file; defaults are used for missing fields
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of simulated elections
    #[clap(long)]
    simulations: Option<usize>,
    /// Std-dev of each draw as a fraction of the poll average
    #[clap(long)]
    volatility: Option<f64>,
    /// Percentage of undecided voters to redistribute
    #[clap(long)]
    undecided: Option<f64>,
    /// Turnout jitter in ± percent
    #[clap(long)]
    turnout_variation: Option<f64>,
    /// Mean blank/null vote share
    #[clap(long)]
    blank_mean: Option<f64>,
    /// Std-dev of the blank/null vote share
    #[clap(long)]
    blank_std_dev: Option<f64>,
    /// Seed for reproducible runs
    #[clap(long)]
    seed: Option<u64>,
    /// Run scenario chunks on all cores
    #[clap(long)]
    parallel: bool,
}

impl SimulationArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            simulations: self.simulations,
            volatility: self.volatility,
            undecided: self.undecided,
            turnout_variation: self.turnout_variation,
            blank_mean: self.blank_mean,
            blank_std_dev: self.blank_std_dev,
            seed: self.seed,
            parallel: self.parallel,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Validate candidates and config and show what would be simulated.
    Info {
        #[clap(flatten)]
        args: SimulationArgs,
    },
    /// Run the Monte Carlo simulation.
    Simulate {
        #[clap(flatten)]
        args: SimulationArgs,
        /// Write the full result as JSON to this path
        #[clap(long)]
        output: Option<PathBuf>,
        /// Number of runoff matchups to print
        #[clap(long, default_value = "5")]
        top_matchups: usize,
    },
}

fn main() {
    let opts = Opts::parse();

    match opts.command {
        Command::Info { args } => {
            if let Err(e) = info(&args.candidates, args.config.as_deref(), &args.overrides()) {
                eprintln!("❌ Invalid inputs: {}", e);
                std::process::exit(1);
            }
        }
        Command::Simulate {
            args,
            output,
            top_matchups,
        } => {
            if let Err(e) = simulate(
                &args.candidates,
                args.config.as_deref(),
                &args.overrides(),
                output.as_deref(),
                top_matchups,
            ) {
                eprintln!("❌ Simulation failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
