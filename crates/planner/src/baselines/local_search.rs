use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use strato_config::LocalSearchConfig;
use strato_core::Solution;
use strato_sim::{Balloon, Problem, ScoringContext, Simulator, score_with};

use super::{GreedyStrategy, random_instruction};
use crate::{PlannerError, Strategy};

/// Hill climbing from the greedy solution.
///
/// Each iteration keeps one balloon's instructions up to a random turn, rerolls the
/// rest with random valid instructions, and keeps the candidate unless it scores
/// lower.
#[derive(Debug, Clone)]
pub struct LocalSearchStrategy {
    config: LocalSearchConfig,
    rng: ChaCha20Rng,
}

impl LocalSearchStrategy {
    pub fn new(config: LocalSearchConfig) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(config.random_seed);
        Self { config, rng }
    }

    /// Improve `initial` in place of a greedy start.
    pub fn improve(
        &mut self,
        problem: &Problem,
        ctx: &ScoringContext,
        initial: Solution,
    ) -> Result<Solution, PlannerError> {
        let mut current = initial;
        let mut current_score = score_with(ctx, problem, &current)?;
        if problem.balloons == 0 || problem.turns == 0 {
            return Ok(current);
        }
        let sim = Simulator::new(&problem.wind);
        let mut accepted = 0usize;

        for iteration in 0..self.config.iterations {
            let balloon = self.rng.gen_range(0..problem.balloons);
            let pivot = self.rng.gen_range(0..problem.turns);
            let candidate = self.reroll(problem, &sim, &current, balloon, pivot)?;
            let candidate_score = score_with(ctx, problem, &candidate)?;
            if candidate_score >= current_score {
                if candidate_score > current_score {
                    log::debug!(
                        "iteration {iteration}: {current_score} -> {candidate_score} (balloon {balloon} from turn {pivot})"
                    );
                }
                accepted += 1;
                current = candidate;
                current_score = candidate_score;
            }
        }
        log::info!(
            "local search accepted {accepted}/{} moves, final score {current_score}",
            self.config.iterations
        );
        Ok(current)
    }

    fn reroll(
        &mut self,
        problem: &Problem,
        sim: &Simulator<'_>,
        current: &Solution,
        balloon_index: usize,
        pivot: usize,
    ) -> Result<Solution, PlannerError> {
        let mut candidate = current.clone();
        let plan = current.balloon_plan(balloon_index);
        let mut balloon = Balloon::new(problem.start);
        for &instruction in &plan[..pivot] {
            balloon.apply(sim, instruction)?;
        }
        for turn in pivot..problem.turns {
            let instruction =
                random_instruction(&mut self.rng, balloon.state(), problem.grid.max_altitude);
            balloon.apply(sim, instruction)?;
            candidate.set(turn, balloon_index, instruction);
        }
        Ok(candidate)
    }
}

impl Strategy for LocalSearchStrategy {
    fn name(&self) -> &'static str {
        "local-search"
    }

    fn plan(&mut self, problem: &Problem, ctx: &ScoringContext) -> Result<Solution, PlannerError> {
        let initial = GreedyStrategy::new(self.config.random_seed).plan(problem, ctx)?;
        self.improve(problem, ctx, initial)
    }
}
