//! Whole-fleet replay and the reference score.
//!
//! Each turn every balloon moves, then each target covered by at least one live
//! balloon earns one point. Overlapping footprints earn nothing extra.

use strato_core::Solution;

use crate::balloon::{Balloon, BalloonState, Simulator};
use crate::problem::{Problem, ScoringContext};
use crate::SimError;

/// Score `solution` against `problem`.
pub fn score(problem: &Problem, solution: &Solution) -> Result<u64, SimError> {
    let ctx = ScoringContext::new(problem);
    score_with(&ctx, problem, solution)
}

/// Score with a prebuilt context, for callers evaluating many candidates.
pub fn score_with(
    ctx: &ScoringContext,
    problem: &Problem,
    solution: &Solution,
) -> Result<u64, SimError> {
    let trajectories = replay(problem, solution)?;
    let mut covered = vec![false; ctx.targets.len()];
    let mut total = 0u64;
    for states in &trajectories {
        covered.iter_mut().for_each(|flag| *flag = false);
        for state in states.iter().filter(|s| s.is_live()) {
            for cell in ctx.coverage.covered(state.position)? {
                if let Some(id) = ctx.targets.id_at(*cell) {
                    if !covered[id] {
                        covered[id] = true;
                        total += 1;
                    }
                }
            }
        }
    }
    Ok(total)
}

/// Turn-major balloon states: `result[t][b]` is balloon `b` after its move at turn `t`.
pub fn replay(problem: &Problem, solution: &Solution) -> Result<Vec<Vec<BalloonState>>, SimError> {
    if solution.turn_count() != problem.turns || !solution.is_rectangular(problem.balloons) {
        return Err(SimError::ShapeMismatch {
            expected_turns: problem.turns,
            expected_balloons: problem.balloons,
        });
    }
    let sim = Simulator::new(&problem.wind);
    let mut fleet: Vec<Balloon> = (0..problem.balloons)
        .map(|_| Balloon::new(problem.start))
        .collect();
    let mut trajectories = Vec::with_capacity(problem.turns);
    for row in solution.turns() {
        let states = fleet
            .iter_mut()
            .zip(row)
            .map(|(balloon, instruction)| balloon.apply(&sim, *instruction))
            .collect::<Result<Vec<_>, _>>()?;
        trajectories.push(states);
    }
    Ok(trajectories)
}
