//! Export helpers for solution files, trajectory CSV, and JSON summaries.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("filesystem error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed solution at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Plain-text solution files: one line per turn, one instruction per balloon.
pub mod solution {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::path::Path;

    use strato_core::{Instruction, Solution};

    use super::{ExportError, writer_for_path};

    pub fn write_solution(writer: &mut dyn Write, solution: &Solution) -> Result<(), ExportError> {
        for row in solution.turns() {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(writer, "{}", line.join(" "))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save_solution(path: &Path, solution: &Solution) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        write_solution(writer.as_mut(), solution)
    }

    /// Read a solution. Every line must carry the same number of instructions.
    pub fn read_solution<R: Read>(reader: R) -> Result<Solution, ExportError> {
        let mut turns = Vec::new();
        let mut width: Option<usize> = None;
        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let number = index + 1;
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| {
                    token
                        .parse::<i32>()
                        .ok()
                        .and_then(|delta| Instruction::try_from(delta).ok())
                        .ok_or_else(|| ExportError::Malformed {
                            line: number,
                            message: format!("'{token}' is not one of -1, 0, 1"),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            match width {
                Some(expected) if expected != row.len() => {
                    return Err(ExportError::Malformed {
                        line: number,
                        message: format!("expected {expected} instructions, found {}", row.len()),
                    });
                }
                _ => width = Some(row.len()),
            }
            turns.push(row);
        }
        Ok(Solution::from_turns(turns))
    }

    pub fn load_solution(path: &Path) -> Result<Solution, ExportError> {
        read_solution(std::fs::File::open(path)?)
    }
}

/// Per-turn balloon positions as CSV.
pub mod trajectory {
    use std::io::{Read, Write};
    use std::path::Path;

    use serde::{Deserialize, Serialize};
    use strato_sim::BalloonState;

    use super::{ExportError, writer_for_path};

    /// CSV row: one balloon after its move at one turn.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Record {
        pub turn: usize,
        pub balloon: usize,
        pub col: i32,
        pub row: i32,
        pub altitude: i32,
        pub live: bool,
    }

    /// Flatten turn-major states into records.
    pub fn records(trajectories: &[Vec<BalloonState>]) -> Vec<Record> {
        trajectories
            .iter()
            .enumerate()
            .flat_map(|(turn, states)| {
                states.iter().enumerate().map(move |(balloon, state)| Record {
                    turn,
                    balloon,
                    col: state.position.col,
                    row: state.position.row,
                    altitude: state.altitude,
                    live: state.is_live(),
                })
            })
            .collect()
    }

    pub fn write_csv(writer: &mut dyn Write, records: &[Record]) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for record in records {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(())
    }

    pub fn save_csv(path: &Path, records: &[Record]) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        write_csv(writer.as_mut(), records)
    }

    pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Record>, ExportError> {
        let mut csv = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        for record in csv.deserialize() {
            records.push(record?);
        }
        Ok(records)
    }
}

/// JSON sidecar describing one planning run.
pub mod summary {
    use std::io::Write;
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::{ExportError, writer_for_path};

    #[derive(Debug, Clone, Serialize)]
    pub struct RunSummary {
        pub strategy: String,
        pub score: u64,
        pub balloons: usize,
        pub turns: usize,
        pub balloons_lost: usize,
        pub seed: u64,
        pub lookahead_depth: Option<usize>,
    }

    pub fn save_summary(path: &Path, summary: &RunSummary) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        to_writer_pretty(&mut writer, summary)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strato_core::{Instruction, Solution};

    #[test]
    fn solution_text_round_trips() {
        let plan = Solution::from_turns(vec![
            vec![Instruction::Ascend, Instruction::Hold],
            vec![Instruction::Descend, Instruction::Ascend],
        ]);
        let mut buffer = Vec::new();
        solution::write_solution(&mut buffer, &plan).unwrap();
        assert_eq!(String::from_utf8(buffer.clone()).unwrap(), "1 0\n-1 1\n");
        let parsed = solution::read_solution(buffer.as_slice()).unwrap();
        assert_eq!(parsed, plan);
    }

    #[test]
    fn ragged_solution_is_malformed() {
        let err = solution::read_solution("1 0\n0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ExportError::Malformed { line: 2, .. }));
    }

    #[test]
    fn out_of_range_instruction_is_malformed() {
        let err = solution::read_solution("2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ExportError::Malformed { line: 1, .. }));
    }

    #[test]
    fn trajectory_csv_has_header_and_rows() {
        let records = vec![trajectory::Record {
            turn: 0,
            balloon: 1,
            col: 2,
            row: 3,
            altitude: 1,
            live: true,
        }];
        let mut buffer = Vec::new();
        trajectory::write_csv(&mut buffer, &records).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("turn,balloon,col,row,altitude,live\n"));
        assert_eq!(trajectory::read_csv(buffer.as_slice()).unwrap(), records);
    }
}
