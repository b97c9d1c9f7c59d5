use std::path::PathBuf;

use clap::Parser;
use stratoplan::config::{RunConfig, load_run_config};
use stratoplan::export::{solution, summary, trajectory};
use stratoplan::importer::load_problem;
use stratoplan::run::{StrategyKind, run_strategy};

/// Plan balloon altitude instructions for a problem file and write the solution.
#[derive(Parser, Debug)]
#[command(author, version, about = "Balloon fleet planner")]
struct Cli {
    /// Problem input file
    #[arg(long)]
    input: PathBuf,

    /// Solution output file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/solution.txt")]
    output: PathBuf,

    /// lookahead, greedy, random, or local-search
    #[arg(long, default_value = "lookahead")]
    strategy: StrategyKind,

    /// Run configuration (.toml or .yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the random seed of the chosen strategy
    #[arg(long)]
    seed: Option<u64>,

    /// Override the lookahead depth
    #[arg(long)]
    depth: Option<usize>,

    /// Optional per-turn trajectory CSV
    #[arg(long)]
    trajectory: Option<PathBuf>,

    /// Optional JSON run summary
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_run_config(path)?,
        None => RunConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.planner.random_seed = seed;
        config.local_search.random_seed = seed;
    }
    if let Some(depth) = cli.depth {
        config.planner.lookahead_depth = depth;
    }
    config.validate()?;

    let problem = load_problem(&cli.input)?;
    log::info!(
        "loaded {}x{}x{} grid, {} targets, {} balloons, {} turns",
        problem.grid.rows,
        problem.grid.cols,
        problem.grid.max_altitude,
        problem.targets.len(),
        problem.balloons,
        problem.turns
    );

    let outcome = run_strategy(&problem, cli.strategy, &config)?;
    solution::save_solution(&cli.output, &outcome.solution)?;
    if let Some(path) = &cli.trajectory {
        trajectory::save_csv(path, &trajectory::records(&outcome.trajectories))?;
    }
    if let Some(path) = &cli.summary {
        summary::save_summary(path, &outcome.summary)?;
    }

    if cli.output.as_os_str() == "-" {
        eprintln!("score: {}", outcome.score);
    } else {
        println!("score: {}", outcome.score);
    }
    Ok(())
}
