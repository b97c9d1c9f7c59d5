//! Wind field lookup: `(column, row, altitude) -> drift vector`.
//!
//! Vectors are stored in one flat slab ordered altitude-major, then row, then
//! column, mirroring the block layout of problem files.

use strato_core::constants::{LAUNCH_ALTITUDE, MIN_FLIGHT_ALTITUDE};
use strato_core::{Grid, Position, WindVector};
use thiserror::Error;

/// Errors raised while building or querying a wind field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindError {
    #[error("wind lookup out of range at col {col}, row {row}, altitude {altitude}")]
    OutOfRange { col: i32, row: i32, altitude: i32 },
    #[error("expected {expected} wind vectors for the grid, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Immutable wind vectors for every airborne (cell, altitude) of a grid.
#[derive(Debug, Clone)]
pub struct WindField {
    grid: Grid,
    vectors: Vec<WindVector>,
}

impl WindField {
    /// Build a field from vectors laid out altitude 1..=A, then rows, then columns.
    pub fn new(grid: Grid, vectors: Vec<WindVector>) -> Result<Self, WindError> {
        let expected = grid.cell_count() * grid.max_altitude.max(0) as usize;
        if vectors.len() != expected {
            return Err(WindError::SizeMismatch {
                expected,
                actual: vectors.len(),
            });
        }
        Ok(Self { grid, vectors })
    }

    /// Build a field by evaluating `f(position, altitude)` for every airborne state.
    pub fn from_fn<F>(grid: Grid, mut f: F) -> Self
    where
        F: FnMut(Position, i32) -> WindVector,
    {
        let mut vectors = Vec::with_capacity(grid.cell_count() * grid.max_altitude.max(0) as usize);
        for altitude in MIN_FLIGHT_ALTITUDE..=grid.max_altitude {
            for position in grid.cells() {
                vectors.push(f(position, altitude));
            }
        }
        Self { grid, vectors }
    }

    /// Same vector everywhere aloft.
    pub fn uniform(grid: Grid, vector: WindVector) -> Self {
        Self::from_fn(grid, |_, _| vector)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Drift at `position` and `altitude`.
    ///
    /// Altitude 0 is the launch level and always calm. The column is wrapped; the row
    /// and altitude must lie inside the grid.
    pub fn at(&self, position: Position, altitude: i32) -> Result<WindVector, WindError> {
        let out_of_range = || WindError::OutOfRange {
            col: position.col,
            row: position.row,
            altitude,
        };
        if !self.grid.altitude_in_range(altitude) || !self.grid.row_in_band(position.row) {
            return Err(out_of_range());
        }
        if altitude == LAUNCH_ALTITUDE {
            return Ok(WindVector::CALM);
        }
        let cell = Position::new(self.grid.wrap_col(position.col), position.row);
        let cell_index = self.grid.cell_index(cell).ok_or_else(out_of_range)?;
        let layer = (altitude - MIN_FLIGHT_ALTITUDE) as usize * self.grid.cell_count();
        self.vectors
            .get(layer + cell_index)
            .copied()
            .ok_or_else(out_of_range)
    }
}
