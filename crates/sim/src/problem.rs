use strato_core::{Grid, Position};
use strato_coverage::{CoverageIndex, TargetMap};
use strato_wind::WindField;

/// Parsed problem bundle shared read-only by every strategy.
#[derive(Debug, Clone)]
pub struct Problem {
    pub grid: Grid,
    /// Sensing radius `V`.
    pub radius: i32,
    pub balloons: usize,
    pub turns: usize,
    pub start: Position,
    pub targets: Vec<Position>,
    pub wind: WindField,
}

/// Coverage footprints and target lookup derived once from a problem.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub coverage: CoverageIndex,
    pub targets: TargetMap,
}

impl ScoringContext {
    pub fn new(problem: &Problem) -> Self {
        Self {
            coverage: CoverageIndex::build(problem.grid, problem.radius),
            targets: TargetMap::new(problem.grid, &problem.targets),
        }
    }
}
