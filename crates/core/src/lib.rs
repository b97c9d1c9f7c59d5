//! Core grid geometry, instructions, and shared primitives for the stratoplan workspace.

/// Fixed quantities shared across crates.
pub mod constants {
    /// Altitude of the launch site. No wind blows at this level.
    pub const LAUNCH_ALTITUDE: i32 = 0;
    /// Lowest altitude a balloon may descend to once airborne.
    pub const MIN_FLIGHT_ALTITUDE: i32 = 1;
}

/// Grid dimensions and coordinate helpers.
pub mod grid {
    use serde::{Deserialize, Serialize};

    /// A ground cell or balloon position. Columns wrap around the globe, rows do not.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct Position {
        pub col: i32,
        pub row: i32,
    }

    impl Position {
        pub const fn new(col: i32, row: i32) -> Self {
            Self { col, row }
        }
    }

    /// Rows × columns × altitude levels of a problem.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Grid {
        pub rows: i32,
        pub cols: i32,
        pub max_altitude: i32,
    }

    impl Grid {
        pub const fn new(rows: i32, cols: i32, max_altitude: i32) -> Self {
            Self {
                rows,
                cols,
                max_altitude,
            }
        }

        /// Normalize a column into `[0, cols)`.
        #[inline]
        pub fn wrap_col(&self, col: i32) -> i32 {
            col.rem_euclid(self.cols)
        }

        /// Whether the row lies inside the valid latitude band `[0, rows)`.
        #[inline]
        pub fn row_in_band(&self, row: i32) -> bool {
            (0..self.rows).contains(&row)
        }

        /// Whether the position is a cell of the ground grid.
        #[inline]
        pub fn contains(&self, position: Position) -> bool {
            self.row_in_band(position.row) && (0..self.cols).contains(&position.col)
        }

        /// Whether the altitude lies in `[0, max_altitude]`.
        #[inline]
        pub fn altitude_in_range(&self, altitude: i32) -> bool {
            (0..=self.max_altitude).contains(&altitude)
        }

        /// Number of ground cells.
        #[inline]
        pub fn cell_count(&self) -> usize {
            (self.rows.max(0) as usize) * (self.cols.max(0) as usize)
        }

        /// Row-major index of a ground cell, or `None` outside the grid.
        #[inline]
        pub fn cell_index(&self, position: Position) -> Option<usize> {
            self.contains(position)
                .then(|| position.row as usize * self.cols as usize + position.col as usize)
        }

        /// Iterate every ground cell in row-major order.
        pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
            (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(col, row)))
        }
    }
}

/// Horizontal drift applied by the wind at one (cell, altitude).
pub mod wind {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct WindVector {
        pub d_col: i32,
        pub d_row: i32,
    }

    impl WindVector {
        pub const CALM: WindVector = WindVector { d_col: 0, d_row: 0 };

        pub const fn new(d_col: i32, d_row: i32) -> Self {
            Self { d_col, d_row }
        }
    }
}

/// Per-turn altitude control.
pub mod instruction {
    use std::fmt;

    use serde::{Deserialize, Serialize};
    use thiserror::Error;

    /// Altitude change ordered for one balloon during one turn.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(try_from = "i32", into = "i32")]
    pub enum Instruction {
        Descend,
        #[default]
        Hold,
        Ascend,
    }

    #[derive(Debug, Error, PartialEq, Eq)]
    #[error("altitude delta {0} is not one of -1, 0, 1")]
    pub struct InvalidDelta(pub i32);

    impl Instruction {
        pub const ALL: [Instruction; 3] = [Instruction::Descend, Instruction::Hold, Instruction::Ascend];

        /// Signed altitude delta.
        #[inline]
        pub const fn delta(self) -> i32 {
            match self {
                Instruction::Descend => -1,
                Instruction::Hold => 0,
                Instruction::Ascend => 1,
            }
        }

        /// Structural validity at `altitude` under a ceiling of `max_altitude`.
        ///
        /// Airborne balloons may not descend below altitude 1, so descending is only
        /// allowed from altitude 2 upwards; ascending stops at the ceiling.
        #[inline]
        pub fn is_valid_at(self, altitude: i32, max_altitude: i32) -> bool {
            match self {
                Instruction::Descend => altitude >= 2,
                Instruction::Hold => true,
                Instruction::Ascend => altitude < max_altitude,
            }
        }
    }

    impl TryFrom<i32> for Instruction {
        type Error = InvalidDelta;

        fn try_from(value: i32) -> Result<Self, Self::Error> {
            match value {
                -1 => Ok(Instruction::Descend),
                0 => Ok(Instruction::Hold),
                1 => Ok(Instruction::Ascend),
                other => Err(InvalidDelta(other)),
            }
        }
    }

    impl From<Instruction> for i32 {
        fn from(value: Instruction) -> Self {
            value.delta()
        }
    }

    impl fmt::Display for Instruction {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.delta())
        }
    }

    /// Instructions that are structurally valid at `altitude`, in descend/hold/ascend order.
    pub fn valid_instructions(altitude: i32, max_altitude: i32) -> impl Iterator<Item = Instruction> {
        Instruction::ALL
            .into_iter()
            .filter(move |instruction| instruction.is_valid_at(altitude, max_altitude))
    }
}

/// Turn-major instruction matrix for a whole fleet.
pub mod solution {
    use crate::instruction::Instruction;

    /// `turns[t][b]` is the instruction for balloon `b` at turn `t`.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct Solution {
        turns: Vec<Vec<Instruction>>,
    }

    impl Solution {
        /// A solution where every balloon holds for every turn.
        pub fn holding(turns: usize, balloons: usize) -> Self {
            Self {
                turns: vec![vec![Instruction::Hold; balloons]; turns],
            }
        }

        /// Wrap turn-major rows as-is. Rows may be ragged; `score` rejects those.
        pub fn from_turns(turns: Vec<Vec<Instruction>>) -> Self {
            Self { turns }
        }

        /// Transpose per-balloon plans (balloon-major) into a turn-major matrix.
        ///
        /// Plans shorter than the longest one are padded with `Hold`.
        pub fn from_balloon_plans(plans: &[Vec<Instruction>]) -> Self {
            let turn_count = plans.iter().map(Vec::len).max().unwrap_or(0);
            let turns = (0..turn_count)
                .map(|t| {
                    plans
                        .iter()
                        .map(|plan| plan.get(t).copied().unwrap_or_default())
                        .collect()
                })
                .collect();
            Self { turns }
        }

        pub fn turn_count(&self) -> usize {
            self.turns.len()
        }

        /// Balloon count of the first turn (0 for an empty solution).
        pub fn balloon_count(&self) -> usize {
            self.turns.first().map(Vec::len).unwrap_or(0)
        }

        pub fn turns(&self) -> &[Vec<Instruction>] {
            &self.turns
        }

        pub fn get(&self, turn: usize, balloon: usize) -> Option<Instruction> {
            self.turns.get(turn).and_then(|row| row.get(balloon)).copied()
        }

        /// Overwrite one entry. Returns `false` if the cell does not exist.
        pub fn set(&mut self, turn: usize, balloon: usize, instruction: Instruction) -> bool {
            match self.turns.get_mut(turn).and_then(|row| row.get_mut(balloon)) {
                Some(slot) => {
                    *slot = instruction;
                    true
                }
                None => false,
            }
        }

        /// Instructions of one balloon across all turns.
        pub fn balloon_plan(&self, balloon: usize) -> Vec<Instruction> {
            self.turns
                .iter()
                .map(|row| row.get(balloon).copied().unwrap_or_default())
                .collect()
        }

        /// Whether every turn carries exactly `balloons` instructions.
        pub fn is_rectangular(&self, balloons: usize) -> bool {
            self.turns.iter().all(|row| row.len() == balloons)
        }
    }
}

pub use grid::{Grid, Position};
pub use instruction::{Instruction, valid_instructions};
pub use solution::Solution;
pub use wind::WindVector;
