//! Problem file import.
//!
//! Layout, one record per non-empty line:
//!
//! ```text
//! R C A
//! L V B T
//! start_row start_col
//! target_row target_col      (L lines)
//! d_row d_col d_row d_col …  (A blocks of R lines, 2·C integers each)
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use strato_core::{Grid, Position, WindVector};
use strato_sim::Problem;
use strato_wind::{WindError, WindField};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed input at line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error(transparent)]
    Wind(#[from] WindError),
}

/// Read and parse a problem file.
pub fn load_problem<P: AsRef<Path>>(path: P) -> Result<Problem, ImportError> {
    let contents = std::fs::read_to_string(path)?;
    parse_problem(&contents)
}

/// Parse problem text.
pub fn parse_problem(contents: &str) -> Result<Problem, ImportError> {
    let mut lines = LineCursor::new(contents);

    let (line, [rows, cols, max_altitude]) = lines.fixed::<i32, 3>("grid dimensions")?;
    if rows <= 0 || cols <= 0 || max_altitude <= 0 {
        return Err(malformed(line, "R, C and A must be positive"));
    }
    let grid = Grid::new(rows, cols, max_altitude);
    let wind_count = grid
        .cell_count()
        .checked_mul(max_altitude as usize)
        .ok_or_else(|| malformed(line, "grid is too large to hold a wind field"))?;

    let (line, [target_count, radius, balloons, turns]) =
        lines.fixed::<i64, 4>("target count, radius, balloons and turns")?;
    if target_count < 0 || radius < 0 || balloons < 0 || turns < 0 {
        return Err(malformed(line, "L, V, B and T must be non-negative"));
    }
    let radius = i32::try_from(radius)
        .map_err(|_| malformed(line, format!("sensing radius {radius} is out of range")))?;

    let start = lines.cell(grid, "starting cell")?;

    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for _ in 0..target_count {
        let target = lines.cell(grid, "target cell")?;
        if seen.insert(target) {
            targets.push(target);
        } else {
            log::warn!(
                "duplicate target cell at row {}, col {} ignored",
                target.row,
                target.col
            );
        }
    }

    // every vector takes at least four bytes of input
    let mut vectors = Vec::with_capacity(wind_count.min(contents.len() / 4));
    for _altitude in 1..=max_altitude {
        for _row in 0..rows {
            let (line, values) = lines.record::<i32>("wind row")?;
            let expected = 2 * cols as usize;
            if values.len() != expected {
                return Err(malformed(
                    line,
                    format!("expected {expected} integers, found {}", values.len()),
                ));
            }
            vectors.extend(
                values
                    .chunks_exact(2)
                    .map(|pair| WindVector::new(pair[1], pair[0])),
            );
        }
    }

    if let Some(line) = lines.next_line_number() {
        return Err(malformed(line, "unexpected trailing data"));
    }

    Ok(Problem {
        grid,
        radius,
        balloons: balloons as usize,
        turns: turns as usize,
        start,
        targets,
        wind: WindField::new(grid, vectors)?,
    })
}

fn malformed(line: usize, message: impl Into<String>) -> ImportError {
    ImportError::Malformed {
        line,
        message: message.into(),
    }
}

struct LineCursor<'a> {
    lines: std::iter::Peekable<Box<dyn Iterator<Item = (usize, &'a str)> + 'a>>,
    last_line: usize,
}

impl<'a> LineCursor<'a> {
    fn new(contents: &'a str) -> Self {
        let iter: Box<dyn Iterator<Item = (usize, &'a str)> + 'a> = Box::new(
            contents
                .lines()
                .enumerate()
                .map(|(idx, line)| (idx + 1, line))
                .filter(|(_, line)| !line.trim().is_empty()),
        );
        Self {
            lines: iter.peekable(),
            last_line: 0,
        }
    }

    fn next_line_number(&mut self) -> Option<usize> {
        self.lines.peek().map(|(number, _)| *number)
    }

    fn record<T: FromStr>(&mut self, what: &str) -> Result<(usize, Vec<T>), ImportError> {
        let (number, line) = self
            .lines
            .next()
            .ok_or_else(|| malformed(self.last_line + 1, format!("missing {what}")))?;
        self.last_line = number;
        let values = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<T>()
                    .map_err(|_| malformed(number, format!("'{token}' is not an integer")))
            })
            .collect::<Result<Vec<T>, _>>()?;
        Ok((number, values))
    }

    fn fixed<T: FromStr + Copy, const N: usize>(
        &mut self,
        what: &str,
    ) -> Result<(usize, [T; N]), ImportError> {
        let (number, values) = self.record::<T>(what)?;
        let array: [T; N] = values.as_slice().try_into().map_err(|_| {
            malformed(
                number,
                format!("{what}: expected {N} integers, found {}", values.len()),
            )
        })?;
        Ok((number, array))
    }

    fn cell(&mut self, grid: Grid, what: &str) -> Result<Position, ImportError> {
        let (number, [row, col]) = self.fixed::<i32, 2>(what)?;
        let position = Position::new(col, row);
        if !grid.contains(position) {
            return Err(malformed(
                number,
                format!("{what} (row {row}, col {col}) lies outside the grid"),
            ));
        }
        Ok(position)
    }
}
