//! Dynamic-programming pairwise comparison
//!
//! Edit distance, longest common subsequence, global and local alignment all run the same
//! pipeline: [`ScoreTable::build`] fills the table for a [`Recurrence`],
//! [`PointerMatrix::from_table`] recovers which predecessor produced every cell, and
//! [`trace`] walks those pointers back from the end cell. Every call allocates its own
//! tables; nothing is cached between calls.

pub mod backtrack;
pub mod table;
pub mod traceback;

mod edit;
mod global;
mod lcs;
mod local;

pub use backtrack::{Direction, PointerMatrix};
pub use edit::{edit_alignment, edit_distance, edit_distance_matrix, edit_matrix};
pub use global::{global_alignment, global_score_table};
pub use lcs::{lcs_length, lcs_table, longest_common_subsequence};
pub use local::{local_alignment, local_score_table};
pub use table::{
    EditRecurrence, GlobalRecurrence, LcsRecurrence, LocalRecurrence, Recurrence, ScoreTable,
};
pub use traceback::{trace, Step, Terminus, TracePath};

use crate::types::Scoring;
use thiserror::Error;

/// Errors that can occur while building or tracing a DP table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignError {
    #[error("Empty input: the {0} sequence has zero length")]
    EmptyInput(&'static str),

    #[error("Invalid scoring: {name} = {value} (expected a finite, non-negative value)")]
    InvalidScoring { name: &'static str, value: f64 },

    #[error("Invariant violation: cell ({row}, {col}) is not derivable from any predecessor")]
    InvariantViolation { row: usize, col: usize },

    #[error("Illegal traceback pointer at cell ({row}, {col})")]
    IllegalPointer { row: usize, col: usize },

    #[error("Table is {rows}x{cols} but the sequences need {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
}

pub type AlignResult<T> = Result<T, AlignError>;

pub(crate) fn validate_scoring(scoring: &Scoring) -> AlignResult<()> {
    match scoring.first_invalid() {
        Some((name, value)) => Err(AlignError::InvalidScoring { name, value }),
        None => Ok(()),
    }
}
