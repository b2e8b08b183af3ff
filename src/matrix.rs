//! Square matchup matrix indexed by roster position
//!
//! Row = "your pick", column = "opponent's pick". Diagonal cells are inert.

use serde::{Deserialize, Serialize};

use crate::registry::RankRegistry;
use crate::types::RankId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchupMatrix {
    cells: Vec<Vec<RankId>>,
}

impl MatchupMatrix {
    /// `size × size` matrix with every cell set to `default`
    pub fn create(size: usize, default: &RankId) -> Self {
        Self {
            cells: (0..size).map(|_| vec![default.clone(); size]).collect(),
        }
    }

    /// Wrap rows as-is; shape is checked by the caller via [`Self::is_square_of`]
    pub fn from_rows(cells: Vec<Vec<RankId>>) -> Self {
        Self { cells }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn rows(&self) -> &[Vec<RankId>] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&RankId> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// True when the matrix is exactly `n × n`
    pub fn is_square_of(&self, n: usize) -> bool {
        self.cells.len() == n && self.cells.iter().all(|row| row.len() == n)
    }

    /// Write one cell. Diagonal and out-of-range writes are ignored.
    /// Returns whether the cell was written.
    pub fn set_cell(&mut self, row: usize, col: usize, rank: RankId) -> bool {
        if row == col {
            return false;
        }
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = rank;
                true
            }
            None => false,
        }
    }

    /// Rewrite every cell holding `old` to `new`; returns the number of cells changed
    pub fn replace_rank(&mut self, old: &RankId, new: &RankId) -> usize {
        let mut count = 0;
        for cell in self.cells.iter_mut().flatten() {
            if *cell == *old {
                *cell = new.clone();
                count += 1;
            }
        }
        count
    }

    /// Off-diagonal cells whose id is not in the registry
    pub fn dangling_cells(&self, registry: &RankRegistry) -> Vec<(usize, usize)> {
        let mut dangling = Vec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, id) in cells.iter().enumerate() {
                if row != col && registry.by_id(id).is_none() {
                    dangling.push((row, col));
                }
            }
        }
        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i64) -> RankId {
        RankId::Num(n)
    }

    #[test]
    fn test_create_fills_every_cell() {
        for n in 0..6 {
            let matrix = MatchupMatrix::create(n, &id(3));
            assert!(matrix.is_square_of(n));
            assert!(matrix.rows().iter().flatten().all(|cell| *cell == id(3)));
        }
    }

    #[test]
    fn test_create_twice_is_independent() {
        let mut a = MatchupMatrix::create(3, &id(3));
        let b = MatchupMatrix::create(3, &id(3));
        a.set_cell(0, 1, id(5));
        assert_eq!(b.get(0, 1), Some(&id(3)));
    }

    #[test]
    fn test_set_cell_only_touches_target() {
        let mut matrix = MatchupMatrix::create(3, &id(3));
        assert!(matrix.set_cell(2, 0, id(1)));
        for row in 0..3 {
            for col in 0..3 {
                let expected = if (row, col) == (2, 0) { id(1) } else { id(3) };
                assert_eq!(matrix.get(row, col), Some(&expected));
            }
        }
    }

    #[test]
    fn test_set_cell_diagonal_is_noop() {
        let mut matrix = MatchupMatrix::create(3, &id(3));
        for i in 0..3 {
            assert!(!matrix.set_cell(i, i, id(9)));
            assert_eq!(matrix.get(i, i), Some(&id(3)));
        }
    }

    #[test]
    fn test_set_cell_out_of_range_is_ignored() {
        let mut matrix = MatchupMatrix::create(2, &id(3));
        assert!(!matrix.set_cell(0, 5, id(1)));
        assert!(!matrix.set_cell(7, 0, id(1)));
        assert_eq!(matrix, MatchupMatrix::create(2, &id(3)));
    }

    #[test]
    fn test_replace_rank_counts_changes() {
        let mut matrix = MatchupMatrix::from_rows(vec![
            vec![id(3), id(2), id(2)],
            vec![id(1), id(3), id(2)],
            vec![id(2), id(1), id(3)],
        ]);
        assert_eq!(matrix.replace_rank(&id(2), &id(3)), 4);
        assert!(matrix.rows().iter().flatten().all(|cell| *cell != id(2)));
    }

    #[test]
    fn test_is_square_of_rejects_ragged() {
        let matrix = MatchupMatrix::from_rows(vec![vec![id(1), id(1)], vec![id(1)]]);
        assert!(!matrix.is_square_of(2));
    }

    #[test]
    fn test_serializes_as_nested_arrays() {
        let matrix = MatchupMatrix::create(2, &id(3));
        assert_eq!(serde_json::to_string(&matrix).unwrap(), "[[3,3],[3,3]]");
    }

    #[test]
    fn test_dangling_cells_skip_diagonal() {
        let registry = RankRegistry::from_ranks(Vec::new());
        let matrix = MatchupMatrix::create(2, &id(3));
        assert_eq!(matrix.dangling_cells(&registry), vec![(0, 1), (1, 0)]);
    }
}
