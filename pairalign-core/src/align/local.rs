use super::table::{LocalRecurrence, ScoreTable};
use super::traceback::{emit_alignment, trace, Terminus};
use super::{validate_scoring, AlignResult, PointerMatrix};
use crate::types::{Alignment, LocalAlignment, Scoring};

/// Local alignment table: the global recurrence floored at zero, with all-zero boundaries
pub fn local_score_table(a: &[u8], b: &[u8], scoring: &Scoring) -> AlignResult<ScoreTable<f64>> {
    validate_scoring(scoring)?;
    ScoreTable::build(&LocalRecurrence { scoring: *scoring }, a, b)
}

/// Highest-scoring alignment between a substring of `a` and a substring of `b`.
///
/// The end point is the first maximum cell in row-major order; traceback stops at the
/// first zero cell, which fixes the start point. When no positive-scoring alignment
/// exists the result is empty with `0..0` ranges and a score of zero.
pub fn local_alignment(a: &[u8], b: &[u8], scoring: &Scoring) -> AlignResult<LocalAlignment> {
    let recurrence = LocalRecurrence { scoring: *scoring };
    let table = local_score_table(a, b, scoring)?;
    let (end_row, end_col) = table.argmax();
    let score = table.get(end_row, end_col);

    if score == 0.0 {
        return Ok(LocalAlignment {
            alignment: Alignment::default(),
            score,
            top_range: 0..0,
            bottom_range: 0..0,
        });
    }

    let pointers = PointerMatrix::from_table(&recurrence, &table, a, b)?;
    let path = trace(&pointers, (end_row, end_col), Terminus::Terminator)?;
    let (start_row, start_col) = path.start;

    log::debug!(
        "Local alignment score {} over [{}, {}) x [{}, {})",
        score,
        start_row,
        end_row,
        start_col,
        end_col
    );

    Ok(LocalAlignment {
        alignment: emit_alignment(&path, a, b),
        score,
        top_range: start_row..end_row,
        bottom_range: start_col..end_col,
    })
}
