//! Baseline strategies built only on the simulator and the reference score.

mod greedy;
mod local_search;
mod random;

pub use greedy::GreedyStrategy;
pub use local_search::LocalSearchStrategy;
pub use random::RandomStrategy;

use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;
use strato_core::{Instruction, valid_instructions};
use strato_sim::BalloonState;

/// A uniformly random instruction that is valid for `state`. Dead balloons hold.
fn random_instruction<R: Rng>(rng: &mut R, state: &BalloonState, max_altitude: i32) -> Instruction {
    if !state.is_live() {
        return Instruction::Hold;
    }
    let options: SmallVec<[Instruction; 3]> = valid_instructions(state.altitude, max_altitude).collect();
    options.choose(rng).copied().unwrap_or_default()
}
