#![allow(dead_code)]

use stratoplan::model::{Grid, Position, WindVector};
use stratoplan::sim::Problem;
use stratoplan::wind::WindField;

/// Problem with the given wind field and defaults for everything else.
pub fn problem(
    wind: WindField,
    start: Position,
    targets: Vec<Position>,
    radius: i32,
    balloons: usize,
    turns: usize,
) -> Problem {
    Problem {
        grid: wind.grid(),
        radius,
        balloons,
        turns,
        start,
        targets,
        wind,
    }
}

/// 3×3 grid, two altitudes, no wind anywhere.
pub fn calm_3x3(targets: Vec<Position>, balloons: usize, turns: usize) -> Problem {
    let grid = Grid::new(3, 3, 2);
    problem(
        WindField::uniform(grid, WindVector::CALM),
        Position::new(1, 1),
        targets,
        1,
        balloons,
        turns,
    )
}

/// Altitude 1 blows north fast enough to leave a 3-row band from row 1.
pub fn deadly_floor(turns: usize) -> Problem {
    let grid = Grid::new(3, 6, 2);
    let wind = WindField::from_fn(grid, |_, altitude| {
        if altitude == 1 {
            WindVector::new(0, 2)
        } else {
            WindVector::new(1, 0)
        }
    });
    problem(wind, Position::new(0, 1), vec![Position::new(3, 1)], 1, 1, turns)
}

pub fn sample_path() -> &'static str {
    "data/problems/small.in"
}
