//! Backtrack pointers derived from a completed score table

use super::table::{Recurrence, ScoreTable};
use super::{AlignError, AlignResult};
use serde::{Deserialize, Serialize};

/// Which predecessor produced a cell's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Consumed a symbol of the first sequence against a gap
    Up,
    /// Consumed a symbol of the second sequence against a gap
    Left,
    /// Consumed one symbol of each sequence
    Diag,
    /// Traceback terminator: the origin, or a zero cell of a local table
    None,
}

/// Pointer matrix with the same shape as the score table it was derived from
#[derive(Debug, Clone, PartialEq)]
pub struct PointerMatrix {
    data: Vec<Direction>,
    rows: usize,
    cols: usize,
}

impl PointerMatrix {
    /// Recover a pointer for every cell of `table`.
    ///
    /// Interior cells are resolved in the order DIAG, UP, LEFT: the first predecessor whose
    /// candidate reproduces the cell value exactly wins. Row 0 points LEFT and column 0
    /// points UP unless the recurrence marks the cell terminal.
    pub fn from_table<R: Recurrence>(
        recurrence: &R,
        table: &ScoreTable<R::Score>,
        a: &[u8],
        b: &[u8],
    ) -> AlignResult<Self> {
        let (rows, cols) = (table.rows(), table.cols());
        if rows != a.len() + 1 || cols != b.len() + 1 {
            return Err(AlignError::ShapeMismatch {
                rows,
                cols,
                expected_rows: a.len() + 1,
                expected_cols: b.len() + 1,
            });
        }

        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                let value = table.get(i, j);
                let direction = if recurrence.is_terminal(value) || (i == 0 && j == 0) {
                    Direction::None
                } else if i == 0 {
                    Direction::Left
                } else if j == 0 {
                    Direction::Up
                } else if recurrence.from_diag(table.get(i - 1, j - 1), a[i - 1], b[j - 1]) == value {
                    Direction::Diag
                } else if recurrence.from_up(table.get(i - 1, j)) == value {
                    Direction::Up
                } else if recurrence.from_left(table.get(i, j - 1)) == value {
                    Direction::Left
                } else {
                    return Err(AlignError::InvariantViolation { row: i, col: j });
                };
                data.push(direction);
            }
        }

        Ok(Self { data, rows, cols })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Direction {
        self.data[row * self.cols + col]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::table::{GlobalRecurrence, LcsRecurrence, LocalRecurrence};
    use crate::types::Scoring;

    #[test]
    fn test_global_boundaries() {
        let recurrence = GlobalRecurrence {
            scoring: Scoring::new(1.0, 1.0, 0.5),
        };
        let table = ScoreTable::build(&recurrence, b"GAAC", b"CAAG").unwrap();
        let pointers = PointerMatrix::from_table(&recurrence, &table, b"GAAC", b"CAAG").unwrap();

        assert_eq!(pointers.get(0, 0), Direction::None);
        assert!((1..5).all(|j| pointers.get(0, j) == Direction::Left));
        assert!((1..5).all(|i| pointers.get(i, 0) == Direction::Up));
        // A/A after G/C is only reachable diagonally
        assert_eq!(pointers.get(2, 2), Direction::Diag);
    }

    #[test]
    fn test_lcs_pointers() {
        let table = ScoreTable::build(&LcsRecurrence, b"AC", b"AC").unwrap();
        let pointers = PointerMatrix::from_table(&LcsRecurrence, &table, b"AC", b"AC").unwrap();
        assert_eq!(pointers.get(1, 1), Direction::Diag);
        assert_eq!(pointers.get(2, 2), Direction::Diag);
        assert_eq!(pointers.get(1, 2), Direction::Left);
    }

    #[test]
    fn test_local_zero_cells_terminate() {
        let recurrence = LocalRecurrence {
            scoring: Scoring::new(1.0, 1.0, 0.5),
        };
        let table = ScoreTable::build(&recurrence, b"GAAC", b"CAAG").unwrap();
        let pointers = PointerMatrix::from_table(&recurrence, &table, b"GAAC", b"CAAG").unwrap();

        for i in 0..pointers.rows() {
            for j in 0..pointers.cols() {
                let is_zero = table.get(i, j) == 0.0;
                assert_eq!(pointers.get(i, j) == Direction::None, is_zero, "cell ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let table = ScoreTable::build(&LcsRecurrence, b"AC", b"AC").unwrap();
        let err = PointerMatrix::from_table(&LcsRecurrence, &table, b"ACG", b"AC").unwrap_err();
        assert!(matches!(err, AlignError::ShapeMismatch { expected_rows: 4, .. }));
    }

    #[test]
    fn test_inconsistent_table_is_rejected() {
        // A table built for different sequences cannot be explained by this recurrence
        let table = ScoreTable::build(&LcsRecurrence, b"AA", b"AA").unwrap();
        let err = PointerMatrix::from_table(&LcsRecurrence, &table, b"CC", b"GG").unwrap_err();
        assert_eq!(err, AlignError::InvariantViolation { row: 1, col: 1 });
    }
}
