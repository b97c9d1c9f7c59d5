use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use smallvec::SmallVec;
use strato_core::{Instruction, Solution, valid_instructions};
use strato_sim::{Balloon, Problem, ScoringContext, Simulator};

use crate::{PlannerError, Strategy};

/// Score of a move that carries the balloon out of the band.
const LOST_PENALTY: i64 = -10;

/// One-turn greedy heuristic: move to wherever the most targets are in view next
/// turn, ignoring the rest of the fleet.
#[derive(Debug, Clone)]
pub struct GreedyStrategy {
    rng: ChaCha20Rng,
}

impl GreedyStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Strategy for GreedyStrategy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn plan(&mut self, problem: &Problem, ctx: &ScoringContext) -> Result<Solution, PlannerError> {
        let sim = Simulator::new(&problem.wind);
        let max_altitude = problem.grid.max_altitude;
        let mut fleet: Vec<Balloon> = (0..problem.balloons)
            .map(|_| Balloon::new(problem.start))
            .collect();

        for turn in 0..problem.turns {
            log::debug!("greedy turn {turn}");
            for balloon in &mut fleet {
                if !balloon.state().is_live() {
                    balloon.apply(&sim, Instruction::Hold)?;
                    continue;
                }
                let mut best = i64::MIN;
                let mut ties: SmallVec<[Instruction; 3]> = SmallVec::new();
                for instruction in valid_instructions(balloon.state().altitude, max_altitude) {
                    let next = balloon.preview(&sim, instruction)?;
                    let value = if next.is_live() {
                        ctx.coverage.covered_targets(next.position, &ctx.targets)?.len() as i64
                    } else {
                        LOST_PENALTY
                    };
                    if value > best {
                        best = value;
                        ties.clear();
                    }
                    if value == best {
                        ties.push(instruction);
                    }
                }
                let choice = ties.choose(&mut self.rng).copied().unwrap_or_default();
                balloon.apply(&sim, choice)?;
            }
        }

        let plans: Vec<_> = fleet.into_iter().map(Balloon::into_instructions).collect();
        if plans.is_empty() {
            return Ok(Solution::holding(problem.turns, 0));
        }
        Ok(Solution::from_balloon_plans(&plans))
    }
}
