mod common;

use common::{calm_3x3, deadly_floor, problem};
use stratoplan::coverage::CoverageIndex;
use stratoplan::model::{Grid, Instruction, Position, Solution, WindVector};
use stratoplan::sim::{SimError, replay, score};
use stratoplan::wind::WindField;

#[test]
fn single_turn_over_the_only_target_scores_one() {
    let problem = calm_3x3(vec![Position::new(1, 1)], 1, 1);
    for instruction in [Instruction::Hold, Instruction::Ascend] {
        let solution = Solution::from_turns(vec![vec![instruction]]);
        assert_eq!(score(&problem, &solution).unwrap(), 1, "{instruction}");
    }
}

#[test]
fn distant_target_earns_nothing() {
    let problem = calm_3x3(vec![Position::new(0, 0)], 1, 1);
    for instruction in [Instruction::Hold, Instruction::Ascend] {
        let solution = Solution::from_turns(vec![vec![instruction]]);
        assert_eq!(score(&problem, &solution).unwrap(), 0, "{instruction}");
    }
}

#[test]
fn descending_from_the_ground_is_rejected() {
    let problem = calm_3x3(vec![Position::new(1, 1)], 1, 1);
    let solution = Solution::from_turns(vec![vec![Instruction::Descend]]);
    assert!(matches!(
        score(&problem, &solution),
        Err(SimError::InvalidInstruction { altitude: 0, .. })
    ));
}

#[test]
fn ascending_past_the_ceiling_is_rejected() {
    let problem = calm_3x3(vec![], 1, 3);
    let solution = Solution::from_turns(vec![vec![Instruction::Ascend]; 3]);
    assert!(matches!(
        replay(&problem, &solution),
        Err(SimError::InvalidInstruction { altitude: 2, .. })
    ));
}

#[test]
fn descending_back_to_the_ground_is_rejected() {
    let problem = calm_3x3(vec![], 1, 2);
    let solution = Solution::from_turns(vec![
        vec![Instruction::Ascend],
        vec![Instruction::Descend],
    ]);
    assert!(matches!(
        replay(&problem, &solution),
        Err(SimError::InvalidInstruction { altitude: 1, .. })
    ));
}

#[test]
fn overlapping_balloons_count_a_target_once() {
    let problem = calm_3x3(vec![Position::new(1, 1)], 2, 1);
    let solution = Solution::holding(1, 2);
    assert_eq!(score(&problem, &solution).unwrap(), 1);
}

#[test]
fn altitude_stays_within_bounds_on_valid_plans() {
    let problem = calm_3x3(vec![], 1, 4);
    let plan = vec![
        vec![Instruction::Ascend],
        vec![Instruction::Ascend],
        vec![Instruction::Descend],
        vec![Instruction::Hold],
    ];
    let states = replay(&problem, &Solution::from_turns(plan)).unwrap();
    let altitudes: Vec<i32> = states.iter().map(|turn| turn[0].altitude).collect();
    assert_eq!(altitudes, vec![1, 2, 1, 1]);
    assert!(
        altitudes
            .iter()
            .all(|a| (0..=problem.grid.max_altitude).contains(a))
    );
}

#[test]
fn dead_balloon_is_frozen_and_ignores_instructions() {
    let problem = deadly_floor(4);
    let solution = Solution::from_turns(vec![
        vec![Instruction::Ascend],
        vec![Instruction::Ascend],
        vec![Instruction::Descend],
        vec![Instruction::Ascend],
    ]);
    let states = replay(&problem, &solution).unwrap();
    let first = states[0][0];
    assert!(!first.is_live());
    assert_eq!(first.position, Position::new(0, 3));
    for turn in &states[1..] {
        assert_eq!(turn[0], first);
    }
    assert_eq!(score(&problem, &solution).unwrap(), 0);
}

#[test]
fn every_footprint_contains_its_centre() {
    let grid = Grid::new(5, 7, 1);
    for radius in 0..4 {
        let index = CoverageIndex::build(grid, radius);
        for cell in grid.cells() {
            let covered = index.covered(cell).unwrap();
            if radius == 0 {
                assert!(covered.is_empty());
            } else {
                assert!(covered.contains(&cell), "radius {radius} at {cell:?}");
            }
        }
    }
}

#[test]
fn footprint_wraps_across_the_column_seam() {
    let grid = Grid::new(3, 10, 1);
    let index = CoverageIndex::build(grid, 2);
    let covered = index.covered(Position::new(0, 1)).unwrap();
    assert!(covered.contains(&Position::new(9, 1)));
    assert!(covered.contains(&Position::new(1, 1)));
    assert!(!covered.contains(&Position::new(2, 2)));
}

fn drifting_pair() -> (stratoplan::sim::Problem, Solution) {
    let grid = Grid::new(3, 12, 1);
    let wind = WindField::uniform(grid, WindVector::new(1, 0));
    let targets = (0..12).map(|col| Position::new(col, 1)).collect();
    let problem = problem(wind, Position::new(0, 1), targets, 1, 2, 5);
    let mut turns = vec![vec![Instruction::Hold, Instruction::Ascend]];
    turns.extend(std::iter::repeat_n(
        vec![Instruction::Hold, Instruction::Hold],
        4,
    ));
    (problem, Solution::from_turns(turns))
}

#[test]
fn score_ignores_balloon_order() {
    let (problem, solution) = drifting_pair();
    let swapped = Solution::from_turns(
        solution
            .turns()
            .iter()
            .map(|row| row.iter().rev().copied().collect())
            .collect(),
    );
    let forward = score(&problem, &solution).unwrap();
    assert_eq!(forward, score(&problem, &swapped).unwrap());
    assert_eq!(forward, 5 + 5);
}

#[test]
fn extra_balloon_on_fresh_cells_never_lowers_the_score() {
    let (problem, solution) = drifting_pair();
    let mut single = problem.clone();
    single.balloons = 1;
    let alone = Solution::from_turns(
        solution
            .turns()
            .iter()
            .map(|row| vec![row[0]])
            .collect(),
    );
    let one = score(&single, &alone).unwrap();
    let two = score(&problem, &solution).unwrap();
    assert!(two > one);
}

#[test]
fn ragged_solution_is_a_shape_mismatch() {
    let problem = calm_3x3(vec![], 2, 2);
    let solution = Solution::from_turns(vec![vec![Instruction::Hold]; 2]);
    assert!(matches!(
        score(&problem, &solution),
        Err(SimError::ShapeMismatch { .. })
    ));
}

#[test]
fn oversized_radius_scores_every_target() {
    let mut problem = calm_3x3(vec![Position::new(0, 0), Position::new(2, 2)], 1, 2);
    problem.radius = 100_000;
    let solution = Solution::holding(2, 1);
    assert_eq!(score(&problem, &solution).unwrap(), 4);
}
