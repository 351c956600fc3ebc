use super::table::{GlobalRecurrence, ScoreTable};
use super::traceback::{emit_alignment, trace, Terminus};
use super::{validate_scoring, AlignResult, PointerMatrix};
use crate::types::{Alignment, Scoring};

/// Global alignment table with full-gap boundaries (`-j·gap` along row 0, `-i·gap` down
/// column 0)
pub fn global_score_table(a: &[u8], b: &[u8], scoring: &Scoring) -> AlignResult<ScoreTable<f64>> {
    validate_scoring(scoring)?;
    ScoreTable::build(&GlobalRecurrence { scoring: *scoring }, a, b)
}

/// Maximum-score end-to-end alignment of `a` and `b`.
///
/// The rows with gaps removed reproduce `a` and `b` exactly, and
/// `alignment.score(scoring)` equals the bottom-right cell of the table.
pub fn global_alignment(a: &[u8], b: &[u8], scoring: &Scoring) -> AlignResult<Alignment> {
    let recurrence = GlobalRecurrence { scoring: *scoring };
    let table = global_score_table(a, b, scoring)?;
    let pointers = PointerMatrix::from_table(&recurrence, &table, a, b)?;
    let path = trace(&pointers, (a.len(), b.len()), Terminus::Origin)?;
    Ok(emit_alignment(&path, a, b))
}
