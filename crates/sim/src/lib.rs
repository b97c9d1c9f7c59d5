//! Balloon drift simulation and solution scoring.

pub mod balloon;
pub mod problem;
pub mod scoring;

pub use balloon::{Balloon, BalloonState, Liveness, Simulator};
pub use problem::{Problem, ScoringContext};
pub use scoring::{replay, score, score_with};

use strato_core::Instruction;
use strato_coverage::CoverageError;
use strato_wind::WindError;
use thiserror::Error;

/// Errors raised while simulating or scoring balloons.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("instruction {instruction} is invalid at altitude {altitude}")]
    InvalidInstruction {
        altitude: i32,
        instruction: Instruction,
    },
    #[error("solution shape mismatch: expected {expected_turns} turns of {expected_balloons} instructions")]
    ShapeMismatch {
        expected_turns: usize,
        expected_balloons: usize,
    },
    #[error(transparent)]
    Wind(#[from] WindError),
    #[error(transparent)]
    Coverage(#[from] CoverageError),
}
