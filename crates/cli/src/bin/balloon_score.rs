use std::path::PathBuf;

use clap::Parser;
use stratoplan::export::solution::load_solution;
use stratoplan::importer::load_problem;
use stratoplan::sim::score;

/// Replay a solution file against a problem and print its score.
#[derive(Parser, Debug)]
#[command(author, version, about = "Score a balloon solution file")]
struct Cli {
    /// Problem input file
    #[arg(long)]
    input: PathBuf,

    /// Solution file (T lines of B instructions)
    #[arg(long)]
    solution: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let problem = load_problem(&cli.input)?;
    let solution = load_solution(&cli.solution)?;
    let total = score(&problem, &solution)?;
    println!("score: {total}");
    Ok(())
}
