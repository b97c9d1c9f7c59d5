//! Sensing-circle coverage.
//!
//! A balloon at `(col, row)` covers every cell whose squared distance is strictly
//! below `radius²`. Columns wrap; rows do not, so footprints near the band edges
//! contain rows outside `[0, rows)` that match no target.

use strato_core::{Grid, Position};
use thiserror::Error;

/// Stable identifier of a target cell: its index in the problem's target list.
pub type TargetId = usize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoverageError {
    #[error("coverage lookup out of range at col {col}, row {row}")]
    OutOfRange { col: i32, row: i32 },
}

/// Relative `(d_col, d_row)` offsets strictly inside the sensing circle.
pub fn circle_offsets(radius: i32) -> Vec<(i32, i32)> {
    let r = radius.max(0);
    let r_sq = i64::from(r) * i64::from(r);
    let mut offsets = Vec::new();
    for d_col in -r..=r {
        for d_row in -r..=r {
            let (dc, dr) = (i64::from(d_col), i64::from(d_row));
            if dc * dc + dr * dr < r_sq {
                offsets.push((d_col, d_row));
            }
        }
    }
    offsets
}

/// Precomputed footprint of every ground cell.
#[derive(Debug, Clone)]
pub struct CoverageIndex {
    grid: Grid,
    footprints: Vec<Vec<Position>>,
}

impl CoverageIndex {
    /// Precompute every footprint. A radius of `rows + cols` already reaches every
    /// in-band cell from anywhere, so larger radii are clamped to it.
    pub fn build(grid: Grid, radius: i32) -> Self {
        let reach = grid.rows.max(0).saturating_add(grid.cols.max(0));
        let offsets = circle_offsets(radius.min(reach));
        let footprints = grid
            .cells()
            .map(|centre| footprint(grid, &offsets, centre))
            .collect();
        Self { grid, footprints }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Cells covered from `position`, sorted and free of duplicates.
    pub fn covered(&self, position: Position) -> Result<&[Position], CoverageError> {
        let index = self
            .grid
            .cell_index(Position::new(self.grid.wrap_col(position.col), position.row))
            .ok_or(CoverageError::OutOfRange {
                col: position.col,
                row: position.row,
            })?;
        Ok(&self.footprints[index])
    }

    /// Target ids covered from `position`, in ascending order.
    pub fn covered_targets(
        &self,
        position: Position,
        targets: &TargetMap,
    ) -> Result<Vec<TargetId>, CoverageError> {
        let mut ids: Vec<TargetId> = self
            .covered(position)?
            .iter()
            .filter_map(|cell| targets.id_at(*cell))
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

fn footprint(grid: Grid, offsets: &[(i32, i32)], centre: Position) -> Vec<Position> {
    let mut cells: Vec<Position> = offsets
        .iter()
        .map(|(d_col, d_row)| Position::new(grid.wrap_col(centre.col + d_col), centre.row + d_row))
        .collect();
    // narrow grids fold several offsets onto one column
    cells.sort_unstable();
    cells.dedup();
    cells
}

/// Dense lookup from ground cell to target id.
#[derive(Debug, Clone)]
pub struct TargetMap {
    grid: Grid,
    slots: Vec<Option<TargetId>>,
    count: usize,
}

impl TargetMap {
    /// Index `targets`. Cells outside the grid and repeated cells are skipped; the
    /// first occurrence keeps its id.
    pub fn new(grid: Grid, targets: &[Position]) -> Self {
        let mut slots = vec![None; grid.cell_count()];
        let mut count = 0;
        for &target in targets {
            if let Some(index) = grid.cell_index(target) {
                if slots[index].is_none() {
                    slots[index] = Some(count);
                    count += 1;
                }
            }
        }
        Self { grid, slots, count }
    }

    pub fn id_at(&self, position: Position) -> Option<TargetId> {
        self.grid
            .cell_index(position)
            .and_then(|index| self.slots[index])
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_radius_covers_only_the_centre() {
        assert_eq!(circle_offsets(1), vec![(0, 0)]);
    }

    #[test]
    fn boundary_distance_is_excluded() {
        let offsets = circle_offsets(2);
        assert!(offsets.contains(&(1, 1)));
        assert!(!offsets.contains(&(2, 0)));
        assert!(!offsets.contains(&(0, -2)));
        assert_eq!(offsets.len(), 9);
    }

    #[test]
    fn footprint_wraps_columns_but_not_rows() {
        let grid = Grid::new(4, 6, 1);
        let index = CoverageIndex::build(grid, 2);
        let cells = index.covered(Position::new(0, 0)).unwrap();
        assert!(cells.contains(&Position::new(5, 0)));
        assert!(cells.contains(&Position::new(0, -1)));
        assert!(!cells.iter().any(|c| c.col < 0 || c.col >= 6));
    }

    #[test]
    fn narrow_grid_footprints_have_no_duplicates() {
        let grid = Grid::new(5, 2, 1);
        let index = CoverageIndex::build(grid, 3);
        let cells = index.covered(Position::new(1, 2)).unwrap();
        let mut unique = cells.to_vec();
        unique.dedup();
        assert_eq!(unique.len(), cells.len());
    }

    #[test]
    fn radius_beyond_the_grid_covers_every_cell() {
        let grid = Grid::new(3, 4, 1);
        let everywhere: Vec<Position> = grid.cells().collect();
        let map = TargetMap::new(grid, &everywhere);
        let index = CoverageIndex::build(grid, 50_000);
        let all: Vec<TargetId> = (0..map.len()).collect();
        for cell in grid.cells() {
            assert_eq!(index.covered_targets(cell, &map).unwrap(), all);
        }
        let clamped = CoverageIndex::build(grid, 7);
        assert_eq!(
            index.covered(Position::new(2, 1)).unwrap(),
            clamped.covered(Position::new(2, 1)).unwrap()
        );
    }

    #[test]
    fn lookups_outside_the_band_fail() {
        let index = CoverageIndex::build(Grid::new(3, 3, 1), 1);
        assert_eq!(
            index.covered(Position::new(0, 3)),
            Err(CoverageError::OutOfRange { col: 0, row: 3 })
        );
    }

    #[test]
    fn target_map_intersects_footprints() {
        let grid = Grid::new(3, 3, 1);
        let targets = [Position::new(1, 1), Position::new(2, 1), Position::new(1, 1)];
        let map = TargetMap::new(grid, &targets);
        assert_eq!(map.len(), 2);
        let index = CoverageIndex::build(grid, 2);
        let ids = index.covered_targets(Position::new(1, 1), &map).unwrap();
        assert_eq!(ids, vec![0, 1]);
    }
}
