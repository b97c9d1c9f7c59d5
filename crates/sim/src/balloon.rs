//! Single-balloon state machine.
//!
//! A live balloon first applies its altitude change, then drifts with the wind
//! found at its current cell and the new altitude. A move that carries it out of
//! the latitude band still happens; the balloon is dead from then on and ignores
//! every later instruction.

use strato_core::constants::LAUNCH_ALTITUDE;
use strato_core::{Instruction, Position, WindVector};
use strato_wind::WindField;

use crate::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Liveness {
    Live,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BalloonState {
    pub position: Position,
    pub altitude: i32,
    pub liveness: Liveness,
}

impl BalloonState {
    /// Grounded at the launch cell.
    pub fn launch(start: Position) -> Self {
        Self {
            position: start,
            altitude: LAUNCH_ALTITUDE,
            liveness: Liveness::Live,
        }
    }

    /// Airborne and alive at `position`.
    pub fn aloft(position: Position, altitude: i32) -> Self {
        Self {
            position,
            altitude,
            liveness: Liveness::Live,
        }
    }

    pub fn is_live(&self) -> bool {
        self.liveness == Liveness::Live
    }
}

/// Transition function over a fixed wind field.
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'a> {
    wind: &'a WindField,
}

impl<'a> Simulator<'a> {
    pub fn new(wind: &'a WindField) -> Self {
        Self { wind }
    }

    /// Dry-run one turn from `state`. Dead balloons are returned unchanged.
    pub fn advance(
        &self,
        state: &BalloonState,
        instruction: Instruction,
    ) -> Result<BalloonState, SimError> {
        if !state.is_live() {
            return Ok(*state);
        }
        let grid = self.wind.grid();
        if !instruction.is_valid_at(state.altitude, grid.max_altitude) {
            return Err(SimError::InvalidInstruction {
                altitude: state.altitude,
                instruction,
            });
        }

        let altitude = state.altitude + instruction.delta();
        let drift = if altitude > LAUNCH_ALTITUDE {
            self.wind.at(state.position, altitude)?
        } else {
            WindVector::CALM
        };
        let position = Position::new(
            grid.wrap_col(state.position.col + drift.d_col),
            state.position.row + drift.d_row,
        );
        let liveness = if grid.row_in_band(position.row) {
            Liveness::Live
        } else {
            Liveness::Dead
        };
        Ok(BalloonState {
            position,
            altitude,
            liveness,
        })
    }
}

/// A balloon that records every instruction it is given.
#[derive(Debug, Clone)]
pub struct Balloon {
    state: BalloonState,
    instructions: Vec<Instruction>,
}

impl Balloon {
    pub fn new(start: Position) -> Self {
        Self {
            state: BalloonState::launch(start),
            instructions: Vec::new(),
        }
    }

    /// Resume from an arbitrary state with an existing instruction history.
    pub fn resume(state: BalloonState, instructions: Vec<Instruction>) -> Self {
        Self {
            state,
            instructions,
        }
    }

    pub fn state(&self) -> &BalloonState {
        &self.state
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Resulting state of `instruction` without moving the balloon.
    pub fn preview(
        &self,
        sim: &Simulator<'_>,
        instruction: Instruction,
    ) -> Result<BalloonState, SimError> {
        sim.advance(&self.state, instruction)
    }

    /// Apply `instruction` and record it. Dead balloons record it and stay put.
    pub fn apply(
        &mut self,
        sim: &Simulator<'_>,
        instruction: Instruction,
    ) -> Result<BalloonState, SimError> {
        let next = sim.advance(&self.state, instruction)?;
        if self.state.is_live() && !next.is_live() {
            log::debug!(
                "balloon left the band at col {}, row {}",
                next.position.col,
                next.position.row
            );
        }
        self.state = next;
        self.instructions.push(instruction);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strato_core::Grid;

    fn eastward(rows: i32) -> WindField {
        WindField::from_fn(Grid::new(rows, 4, 2), |_, alt| WindVector::new(1, alt - 1))
    }

    #[test]
    fn ascent_uses_wind_at_new_altitude() {
        let wind = eastward(5);
        let sim = Simulator::new(&wind);
        let start = BalloonState::launch(Position::new(3, 1));
        let next = sim.advance(&start, Instruction::Ascend).unwrap();
        assert_eq!(next, BalloonState::aloft(Position::new(0, 1), 1));
    }

    #[test]
    fn holding_at_launch_stays_put() {
        let wind = eastward(5);
        let sim = Simulator::new(&wind);
        let start = BalloonState::launch(Position::new(2, 2));
        assert_eq!(sim.advance(&start, Instruction::Hold).unwrap(), start);
    }

    #[test]
    fn descending_below_flight_floor_is_rejected() {
        let wind = eastward(5);
        let sim = Simulator::new(&wind);
        let low = BalloonState::aloft(Position::new(0, 0), 1);
        assert_eq!(
            sim.advance(&low, Instruction::Descend),
            Err(SimError::InvalidInstruction {
                altitude: 1,
                instruction: Instruction::Descend
            })
        );
        let high = BalloonState::aloft(Position::new(0, 0), 2);
        assert!(sim.advance(&high, Instruction::Ascend).is_err());
    }

    #[test]
    fn leaving_the_band_kills_and_freezes() {
        let wind = eastward(2);
        let sim = Simulator::new(&wind);
        let mut balloon = Balloon::resume(BalloonState::aloft(Position::new(0, 1), 1), Vec::new());
        let killed = balloon.apply(&sim, Instruction::Ascend).unwrap();
        assert_eq!(killed.position, Position::new(1, 2));
        assert_eq!(killed.liveness, Liveness::Dead);
        // later instructions are recorded, even ones that would be invalid aloft
        let frozen = balloon.apply(&sim, Instruction::Ascend).unwrap();
        assert_eq!(frozen, killed);
        assert_eq!(balloon.instructions().len(), 2);
    }
}
