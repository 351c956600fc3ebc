//! Score table construction
//!
//! One builder fills an (n+1)×(m+1) table for every alignment-style problem. The
//! problem-specific parts (boundary row/column, the three predecessor transitions and how
//! they are combined) live behind the [`Recurrence`] trait, so edit distance, LCS, global
//! and local alignment share the same fill loop and the same backtrack pass.

use super::{AlignError, AlignResult};
use crate::types::Scoring;
use std::fmt::Debug;
use std::ops::Index;

/// A DP recurrence over two sequences with up/left/diagonal predecessors.
///
/// `from_*` compute each candidate; `combine` picks the cell value from the three
/// candidates. Backtrack re-evaluates the same `from_*` expressions, so an implementation
/// must be deterministic for pointer recovery to work.
pub trait Recurrence {
    type Score: Copy + PartialEq + PartialOrd + Debug;

    /// Short name used in log output
    const NAME: &'static str;

    /// Value of cell (0, j)
    fn boundary_row(&self, j: usize) -> Self::Score;

    /// Value of cell (i, 0)
    fn boundary_col(&self, i: usize) -> Self::Score;

    /// Candidate reached by consuming a symbol of the first sequence only
    fn from_up(&self, up: Self::Score) -> Self::Score;

    /// Candidate reached by consuming a symbol of the second sequence only
    fn from_left(&self, left: Self::Score) -> Self::Score;

    /// Candidate reached by consuming `a` and `b` together
    fn from_diag(&self, diag: Self::Score, a: u8, b: u8) -> Self::Score;

    fn combine(&self, up: Self::Score, left: Self::Score, diag: Self::Score) -> Self::Score;

    /// Cells holding a terminal value stop a traceback instead of pointing anywhere
    fn is_terminal(&self, _value: Self::Score) -> bool {
        false
    }
}

/// Levenshtein distance: unit cost insertions, deletions and substitutions
#[derive(Debug, Clone, Copy, Default)]
pub struct EditRecurrence;

impl Recurrence for EditRecurrence {
    type Score = usize;
    const NAME: &'static str = "edit";

    fn boundary_row(&self, j: usize) -> usize {
        j
    }

    fn boundary_col(&self, i: usize) -> usize {
        i
    }

    fn from_up(&self, up: usize) -> usize {
        up + 1
    }

    fn from_left(&self, left: usize) -> usize {
        left + 1
    }

    fn from_diag(&self, diag: usize, a: u8, b: u8) -> usize {
        diag + usize::from(a != b)
    }

    fn combine(&self, up: usize, left: usize, diag: usize) -> usize {
        up.min(left).min(diag)
    }
}

/// Longest common subsequence length
#[derive(Debug, Clone, Copy, Default)]
pub struct LcsRecurrence;

impl Recurrence for LcsRecurrence {
    type Score = usize;
    const NAME: &'static str = "lcs";

    fn boundary_row(&self, _j: usize) -> usize {
        0
    }

    fn boundary_col(&self, _i: usize) -> usize {
        0
    }

    fn from_up(&self, up: usize) -> usize {
        up
    }

    fn from_left(&self, left: usize) -> usize {
        left
    }

    fn from_diag(&self, diag: usize, a: u8, b: u8) -> usize {
        diag + usize::from(a == b)
    }

    fn combine(&self, up: usize, left: usize, diag: usize) -> usize {
        up.max(left).max(diag)
    }
}

/// Needleman-Wunsch style global alignment with a linear gap penalty
#[derive(Debug, Clone, Copy)]
pub struct GlobalRecurrence {
    pub scoring: Scoring,
}

impl Recurrence for GlobalRecurrence {
    type Score = f64;
    const NAME: &'static str = "global";

    fn boundary_row(&self, j: usize) -> f64 {
        j as f64 * -self.scoring.gap_penalty
    }

    fn boundary_col(&self, i: usize) -> f64 {
        i as f64 * -self.scoring.gap_penalty
    }

    fn from_up(&self, up: f64) -> f64 {
        up - self.scoring.gap_penalty
    }

    fn from_left(&self, left: f64) -> f64 {
        left - self.scoring.gap_penalty
    }

    fn from_diag(&self, diag: f64, a: u8, b: u8) -> f64 {
        diag + self.scoring.substitution(a, b)
    }

    fn combine(&self, up: f64, left: f64, diag: f64) -> f64 {
        up.max(left).max(diag)
    }
}

/// Smith-Waterman style local alignment: the global recurrence floored at zero
#[derive(Debug, Clone, Copy)]
pub struct LocalRecurrence {
    pub scoring: Scoring,
}

impl Recurrence for LocalRecurrence {
    type Score = f64;
    const NAME: &'static str = "local";

    fn boundary_row(&self, _j: usize) -> f64 {
        0.0
    }

    fn boundary_col(&self, _i: usize) -> f64 {
        0.0
    }

    fn from_up(&self, up: f64) -> f64 {
        up - self.scoring.gap_penalty
    }

    fn from_left(&self, left: f64) -> f64 {
        left - self.scoring.gap_penalty
    }

    fn from_diag(&self, diag: f64, a: u8, b: u8) -> f64 {
        diag + self.scoring.substitution(a, b)
    }

    fn combine(&self, up: f64, left: f64, diag: f64) -> f64 {
        up.max(left).max(diag).max(0.0)
    }

    fn is_terminal(&self, value: f64) -> bool {
        value == 0.0
    }
}

/// Row-major DP table; cell (i, j) scores the length-i prefix of the first sequence
/// against the length-j prefix of the second.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable<S> {
    cells: Vec<S>,
    rows: usize,
    cols: usize,
}

impl<S: Copy> ScoreTable<S> {
    /// Fill a table for `a` (rows) against `b` (columns).
    ///
    /// Row 0 and column 0 come from the recurrence's boundary rules; every interior cell
    /// is computed from its up, left and diagonal neighbours in row-major order.
    pub fn build<R>(recurrence: &R, a: &[u8], b: &[u8]) -> AlignResult<Self>
    where
        R: Recurrence<Score = S>,
    {
        require_nonempty(a, b)?;

        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let mut cells = Vec::with_capacity(rows * cols);

        cells.extend((0..cols).map(|j| recurrence.boundary_row(j)));

        for i in 1..rows {
            cells.push(recurrence.boundary_col(i));
            let prev_row = (i - 1) * cols;
            let curr_row = i * cols;
            let symbol = a[i - 1];

            for j in 1..cols {
                let up = recurrence.from_up(cells[prev_row + j]);
                let left = recurrence.from_left(cells[curr_row + j - 1]);
                let diag = recurrence.from_diag(cells[prev_row + j - 1], symbol, b[j - 1]);
                cells.push(recurrence.combine(up, left, diag));
            }
        }

        log::debug!("Built {} score table ({} x {})", R::NAME, rows, cols);

        Ok(Self { cells, rows, cols })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> S {
        self.cells[row * self.cols + col]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bottom-right cell: the optimum over both full sequences
    pub fn last(&self) -> S {
        self.cells[self.cells.len() - 1]
    }

    pub fn row(&self, row: usize) -> &[S] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Copy into nested rows, mostly for inspection and comparison in tests
    pub fn to_rows(&self) -> Vec<Vec<S>> {
        self.cells.chunks(self.cols).map(|row| row.to_vec()).collect()
    }
}

impl<S: Copy + PartialOrd> ScoreTable<S> {
    /// Position of the maximum cell, first occurrence in row-major order
    pub fn argmax(&self) -> (usize, usize) {
        let mut best = 0;
        for (idx, value) in self.cells.iter().enumerate() {
            if *value > self.cells[best] {
                best = idx;
            }
        }
        (best / self.cols, best % self.cols)
    }
}

impl<S> Index<(usize, usize)> for ScoreTable<S> {
    type Output = S;

    fn index(&self, (row, col): (usize, usize)) -> &S {
        &self.cells[row * self.cols + col]
    }
}

pub(crate) fn require_nonempty(a: &[u8], b: &[u8]) -> AlignResult<()> {
    if a.is_empty() {
        return Err(AlignError::EmptyInput("first"));
    }
    if b.is_empty() {
        return Err(AlignError::EmptyInput("second"));
    }
    Ok(())
}
