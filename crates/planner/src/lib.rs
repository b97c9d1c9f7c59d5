//! Fleet planning: the time-expanded lookahead planner and simple baselines.

pub mod baselines;
pub mod graph;
pub mod ledger;
pub mod lookahead;
pub mod sequential;

pub use baselines::{GreedyStrategy, LocalSearchStrategy, RandomStrategy};
pub use graph::{Edge, Node, NodeId, NodeKind, StateGraph};
pub use ledger::CoverageLedger;
pub use lookahead::{LookaheadScorer, SINK_PENALTY};
pub use sequential::{BalloonPlan, LookaheadStrategy, PlanOutcome, SequentialPlanner};

use strato_core::Solution;
use strato_coverage::CoverageError;
use strato_sim::{Problem, ScoringContext, SimError};
use thiserror::Error;

/// Top-level planning error.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("simulation failed: {0}")]
    Sim(#[from] SimError),
    #[error("coverage lookup failed: {0}")]
    Coverage(#[from] CoverageError),
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),
    #[error("state at col {col}, row {row}, altitude {altitude} has no graph node")]
    UnmappedState { col: i32, row: i32, altitude: i32 },
    #[error("node {0} has no successors")]
    NoSuccessor(NodeId),
}

/// A way of producing a full instruction matrix for a problem.
pub trait Strategy {
    fn name(&self) -> &'static str;

    fn plan(&mut self, problem: &Problem, ctx: &ScoringContext) -> Result<Solution, PlannerError>;
}
