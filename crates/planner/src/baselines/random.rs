use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use strato_core::Solution;
use strato_sim::{Balloon, Problem, ScoringContext, Simulator};

use super::random_instruction;
use crate::{PlannerError, Strategy};

/// Every balloon picks a random valid instruction every turn.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: ChaCha20Rng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn plan(&mut self, problem: &Problem, _ctx: &ScoringContext) -> Result<Solution, PlannerError> {
        let sim = Simulator::new(&problem.wind);
        let max_altitude = problem.grid.max_altitude;
        let mut fleet: Vec<Balloon> = (0..problem.balloons)
            .map(|_| Balloon::new(problem.start))
            .collect();
        for _ in 0..problem.turns {
            for balloon in &mut fleet {
                let instruction = random_instruction(&mut self.rng, balloon.state(), max_altitude);
                balloon.apply(&sim, instruction)?;
            }
        }
        let plans: Vec<_> = fleet.into_iter().map(Balloon::into_instructions).collect();
        if plans.is_empty() {
            return Ok(Solution::holding(problem.turns, 0));
        }
        Ok(Solution::from_balloon_plans(&plans))
    }
}
