//! Traceback through a pointer matrix and reconstruction of its results

use super::backtrack::{Direction, PointerMatrix};
use super::{AlignError, AlignResult};
use crate::types::{Alignment, GAP};

/// Where a traceback is allowed to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminus {
    /// Global problems must walk all the way back to cell (0, 0)
    Origin,
    /// Local alignment stops on the first terminator cell
    Terminator,
}

/// One move of a traceback, recorded at the cell it leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub direction: Direction,
    pub row: usize,
    pub col: usize,
}

/// Steps from the end cell back to the start cell, last column first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracePath {
    pub steps: Vec<Step>,
    pub start: (usize, usize),
    pub end: (usize, usize),
}

/// Follow pointers from `end` until the terminus is reached
pub fn trace(pointers: &PointerMatrix, end: (usize, usize), terminus: Terminus) -> AlignResult<TracePath> {
    let (mut row, mut col) = end;
    if row >= pointers.rows() || col >= pointers.cols() {
        return Err(AlignError::IllegalPointer { row, col });
    }

    let mut steps = Vec::with_capacity(row + col);
    loop {
        let direction = pointers.get(row, col);
        match direction {
            Direction::None if terminus == Terminus::Terminator || (row == 0 && col == 0) => break,
            Direction::Up if row > 0 => {
                steps.push(Step { direction, row, col });
                row -= 1;
            }
            Direction::Left if col > 0 => {
                steps.push(Step { direction, row, col });
                col -= 1;
            }
            Direction::Diag if row > 0 && col > 0 => {
                steps.push(Step { direction, row, col });
                row -= 1;
                col -= 1;
            }
            _ => return Err(AlignError::IllegalPointer { row, col }),
        }
    }

    log::trace!(
        "Traceback from ({}, {}) to ({}, {}) in {} steps",
        end.0,
        end.1,
        row,
        col,
        steps.len()
    );

    Ok(TracePath {
        steps,
        start: (row, col),
        end,
    })
}

/// Emit both alignment rows; `a` indexes rows and `b` indexes columns of the table
pub fn emit_alignment(path: &TracePath, a: &[u8], b: &[u8]) -> Alignment {
    let mut top = Vec::with_capacity(path.steps.len());
    let mut bottom = Vec::with_capacity(path.steps.len());

    for step in &path.steps {
        match step.direction {
            Direction::Up => {
                top.push(a[step.row - 1]);
                bottom.push(GAP);
            }
            Direction::Left => {
                top.push(GAP);
                bottom.push(b[step.col - 1]);
            }
            Direction::Diag => {
                top.push(a[step.row - 1]);
                bottom.push(b[step.col - 1]);
            }
            // never recorded by `trace`
            Direction::None => {}
        }
    }

    top.reverse();
    bottom.reverse();
    Alignment::new(top, bottom)
}

/// Emit the symbols of every diagonal step whose two symbols agree
pub fn emit_common_subsequence(path: &TracePath, a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut subsequence: Vec<u8> = path
        .steps
        .iter()
        .filter(|step| step.direction == Direction::Diag)
        .map(|step| (a[step.row - 1], b[step.col - 1]))
        .filter(|(x, y)| x == y)
        .map(|(x, _)| x)
        .collect();
    subsequence.reverse();
    subsequence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::table::{LcsRecurrence, ScoreTable};

    fn lcs_pointers(a: &[u8], b: &[u8]) -> PointerMatrix {
        let table = ScoreTable::build(&LcsRecurrence, a, b).unwrap();
        PointerMatrix::from_table(&LcsRecurrence, &table, a, b).unwrap()
    }

    #[test]
    fn test_trace_reaches_origin() {
        let pointers = lcs_pointers(b"GACT", b"ATG");
        let path = trace(&pointers, (4, 3), Terminus::Origin).unwrap();
        assert_eq!(path.start, (0, 0));
        assert_eq!(path.end, (4, 3));

        let alignment = emit_alignment(&path, b"GACT", b"ATG");
        assert_eq!(alignment.ungapped_top(), b"GACT");
        assert_eq!(alignment.ungapped_bottom(), b"ATG");
        assert_eq!(emit_common_subsequence(&path, b"GACT", b"ATG"), b"AT");
    }

    #[test]
    fn test_trace_from_outside_table() {
        let pointers = lcs_pointers(b"AC", b"AC");
        assert_eq!(
            trace(&pointers, (3, 0), Terminus::Origin),
            Err(AlignError::IllegalPointer { row: 3, col: 0 })
        );
    }

    #[test]
    fn test_trace_from_origin_is_empty() {
        let pointers = lcs_pointers(b"AC", b"AC");
        let path = trace(&pointers, (0, 0), Terminus::Origin).unwrap();
        assert!(path.steps.is_empty());
        assert!(emit_alignment(&path, b"AC", b"AC").is_empty());
    }
}
