//! Sequential fleet planner.
//!
//! Balloons are planned one after another. Each balloon walks the state graph
//! turn by turn, taking the successor with the highest lookahead value (ties are
//! broken uniformly at random). Once its whole path is fixed, everything it covers
//! is claimed in the ledger so later balloons only earn credit elsewhere.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use smallvec::SmallVec;
use strato_config::{LaunchPolicy, PlannerConfig};
use strato_core::{Instruction, Solution};
use strato_sim::{Problem, ScoringContext};

use crate::graph::{Edge, NodeId, StateGraph};
use crate::ledger::CoverageLedger;
use crate::lookahead::LookaheadScorer;
use crate::{PlannerError, Strategy};

/// Full-horizon plan of one balloon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalloonPlan {
    pub instructions: Vec<Instruction>,
    /// Node occupied after the move of each turn.
    pub path: Vec<NodeId>,
    /// Turn whose move carried the balloon out of the band.
    pub died_at: Option<usize>,
}

/// Result of planning a whole fleet.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub solution: Solution,
    pub plans: Vec<BalloonPlan>,
    /// `(target, turn)` pairs claimed in the ledger across all balloons.
    pub claimed: usize,
}

impl PlanOutcome {
    pub fn balloons_lost(&self) -> usize {
        self.plans.iter().filter(|p| p.died_at.is_some()).count()
    }
}

pub struct SequentialPlanner {
    config: PlannerConfig,
    turns: usize,
    balloons: usize,
    graph: StateGraph,
    ledger: CoverageLedger,
    scorer: LookaheadScorer,
    rng: ChaCha20Rng,
}

impl SequentialPlanner {
    pub fn new(
        problem: &Problem,
        ctx: &ScoringContext,
        config: PlannerConfig,
    ) -> Result<Self, PlannerError> {
        if config.batch_size == 0 || config.lookahead_depth == 0 {
            return Err(PlannerError::InvalidConfig(
                "batch_size and lookahead_depth must be positive".into(),
            ));
        }
        let graph = StateGraph::build(problem, ctx)?;
        let ledger = CoverageLedger::new(&graph, ctx.targets.len(), problem.turns);
        // windows never extend past the horizon
        let depth = config.lookahead_depth.min(problem.turns).max(1);
        let scorer = LookaheadScorer::new(graph.len(), depth);
        log::debug!(
            "lookahead depth {} (requested {})",
            scorer.depth(),
            config.lookahead_depth
        );
        let rng = ChaCha20Rng::seed_from_u64(config.random_seed);
        Ok(Self {
            config,
            turns: problem.turns,
            balloons: problem.balloons,
            graph,
            ledger,
            scorer,
            rng,
        })
    }

    /// Effective lookahead depth after clamping to the horizon.
    pub fn lookahead_depth(&self) -> usize {
        self.scorer.depth()
    }

    pub fn ledger(&self) -> &CoverageLedger {
        &self.ledger
    }

    /// Plan balloon `index` against the current ledger without committing it.
    pub fn plan_balloon(&mut self, index: usize) -> Result<BalloonPlan, PlannerError> {
        let launch = self.graph.launch();
        let mut plan = BalloonPlan {
            instructions: Vec::with_capacity(self.turns),
            path: Vec::with_capacity(self.turns),
            died_at: None,
        };

        if index == 0 && self.config.anchor_first_balloon {
            plan.instructions.resize(self.turns, Instruction::Hold);
            plan.path.resize(self.turns, launch);
            return Ok(plan);
        }

        let slot = self.config.launch_slot(index).min(self.turns);
        let mut node = launch;
        let mut turn = 0;
        if self.config.launch_policy == LaunchPolicy::Parked {
            plan.instructions.resize(slot, Instruction::Hold);
            plan.path.resize(slot, launch);
            turn = slot;
        }

        while turn < self.turns {
            let edge = if self.config.launch_policy == LaunchPolicy::Deadline
                && turn == slot
                && node == launch
            {
                self.forced_ascent(node)?
            } else {
                self.best_edge(node, turn)?
            };
            plan.instructions.push(edge.instruction);
            plan.path.push(edge.target);

            if edge.target == self.graph.sink() {
                log::warn!("balloon {index} leaves the band at turn {turn}");
                plan.died_at = Some(turn);
                plan.instructions.resize(self.turns, Instruction::Hold);
                plan.path.resize(self.turns, self.graph.sink());
                break;
            }
            log::trace!("balloon {index} turn {turn}: {} -> node {}", edge.instruction, edge.target);
            node = edge.target;
            turn += 1;
        }
        Ok(plan)
    }

    /// Claim the plan's coverage and invalidate cached lookahead values.
    pub fn commit(&mut self, plan: &BalloonPlan) -> usize {
        let fresh = self.ledger.claim_path(&self.graph, &plan.path);
        self.scorer.reset();
        log::debug!("ledger updated with {fresh} new (target, turn) pairs");
        fresh
    }

    /// Plan and commit every balloon in index order.
    pub fn plan_all(mut self) -> Result<PlanOutcome, PlannerError> {
        let mut plans = Vec::with_capacity(self.balloons);
        let mut claimed = 0;
        for index in 0..self.balloons {
            let plan = self.plan_balloon(index)?;
            let fresh = self.commit(&plan);
            log::info!(
                "balloon {}/{} planned: {} new coverage credits{}",
                index + 1,
                self.balloons,
                fresh,
                if plan.died_at.is_some() { ", lost" } else { "" }
            );
            claimed += fresh;
            plans.push(plan);
        }
        let solution = if plans.is_empty() {
            Solution::holding(self.turns, 0)
        } else {
            let columns: Vec<Vec<Instruction>> =
                plans.iter().map(|p| p.instructions.clone()).collect();
            Solution::from_balloon_plans(&columns)
        };
        Ok(PlanOutcome {
            solution,
            plans,
            claimed,
        })
    }

    fn best_edge(&mut self, node: NodeId, turn: usize) -> Result<Edge, PlannerError> {
        let end = self.scorer.window_end(turn, self.turns);
        let mut best = i64::MIN;
        let mut ties: SmallVec<[Edge; 3]> = SmallVec::new();
        for edge in &self.graph.node(node).edges {
            let value = self
                .scorer
                .value(&self.graph, &self.ledger, edge.target, turn, end);
            if value > best {
                best = value;
                ties.clear();
            }
            if value == best {
                ties.push(*edge);
            }
        }
        ties.choose(&mut self.rng)
            .copied()
            .ok_or(PlannerError::NoSuccessor(node))
    }

    fn forced_ascent(&self, node: NodeId) -> Result<Edge, PlannerError> {
        self.graph
            .node(node)
            .edges
            .iter()
            .find(|e| e.instruction == Instruction::Ascend)
            .copied()
            .ok_or(PlannerError::NoSuccessor(node))
    }
}

/// The sequential lookahead planner exposed as a strategy.
#[derive(Debug, Clone, Default)]
pub struct LookaheadStrategy {
    pub config: PlannerConfig,
}

impl LookaheadStrategy {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }
}

impl Strategy for LookaheadStrategy {
    fn name(&self) -> &'static str {
        "lookahead"
    }

    fn plan(&mut self, problem: &Problem, ctx: &ScoringContext) -> Result<Solution, PlannerError> {
        let planner = SequentialPlanner::new(problem, ctx, self.config.clone())?;
        Ok(planner.plan_all()?.solution)
    }
}
