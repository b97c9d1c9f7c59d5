//! End-to-end planning run: pick a strategy, plan, and score.

use std::fmt;
use std::str::FromStr;

use strato_config::RunConfig;
use strato_core::Solution;
use strato_export::summary::RunSummary;
use strato_planner::{
    GreedyStrategy, LocalSearchStrategy, LookaheadStrategy, PlannerError, RandomStrategy, Strategy,
};
use strato_sim::{BalloonState, Problem, ScoringContext, SimError, replay, score_with};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("planning failed: {0}")]
    Planner(#[from] PlannerError),
    #[error("scoring failed: {0}")]
    Sim(#[from] SimError),
    #[error("unknown strategy '{0}' (expected lookahead, greedy, random, or local-search)")]
    UnknownStrategy(String),
}

/// Strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    #[default]
    Lookahead,
    Greedy,
    Random,
    LocalSearch,
}

impl FromStr for StrategyKind {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lookahead" => Ok(StrategyKind::Lookahead),
            "greedy" => Ok(StrategyKind::Greedy),
            "random" => Ok(StrategyKind::Random),
            "local-search" | "local_search" => Ok(StrategyKind::LocalSearch),
            other => Err(RunError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrategyKind::Lookahead => "lookahead",
            StrategyKind::Greedy => "greedy",
            StrategyKind::Random => "random",
            StrategyKind::LocalSearch => "local-search",
        };
        f.write_str(label)
    }
}

impl StrategyKind {
    /// Instantiate the strategy with its settings from `config`.
    pub fn build(self, config: &RunConfig) -> Box<dyn Strategy> {
        let seed = config.planner.random_seed;
        match self {
            StrategyKind::Lookahead => Box::new(LookaheadStrategy::new(config.planner.clone())),
            StrategyKind::Greedy => Box::new(GreedyStrategy::new(seed)),
            StrategyKind::Random => Box::new(RandomStrategy::new(seed)),
            StrategyKind::LocalSearch => {
                Box::new(LocalSearchStrategy::new(config.local_search.clone()))
            }
        }
    }

    fn seed(self, config: &RunConfig) -> u64 {
        match self {
            StrategyKind::LocalSearch => config.local_search.random_seed,
            _ => config.planner.random_seed,
        }
    }
}

/// Everything a front-end needs after a run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub solution: Solution,
    pub score: u64,
    pub trajectories: Vec<Vec<BalloonState>>,
    pub summary: RunSummary,
}

/// Plan `problem` with `kind`, then replay and score the result.
pub fn run_strategy(
    problem: &Problem,
    kind: StrategyKind,
    config: &RunConfig,
) -> Result<RunOutcome, RunError> {
    let ctx = ScoringContext::new(problem);
    let mut strategy = kind.build(config);
    log::info!(
        "planning {} balloons over {} turns with {}",
        problem.balloons,
        problem.turns,
        strategy.name()
    );
    let solution = strategy.plan(problem, &ctx)?;
    let score = score_with(&ctx, problem, &solution)?;
    let trajectories = replay(problem, &solution)?;
    let balloons_lost = trajectories
        .last()
        .map(|states| states.iter().filter(|s| !s.is_live()).count())
        .unwrap_or(0);
    let summary = RunSummary {
        strategy: strategy.name().to_string(),
        score,
        balloons: problem.balloons,
        turns: problem.turns,
        balloons_lost,
        seed: kind.seed(config),
        lookahead_depth: (kind == StrategyKind::Lookahead).then_some(config.planner.lookahead_depth),
    };
    log::info!("{} scored {score} ({balloons_lost} balloons lost)", summary.strategy);
    Ok(RunOutcome {
        solution,
        score,
        trajectories,
        summary,
    })
}
