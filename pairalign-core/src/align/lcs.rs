use super::table::{LcsRecurrence, ScoreTable};
use super::traceback::{emit_common_subsequence, trace, Terminus};
use super::{AlignResult, PointerMatrix};

/// LCS table; cell (i, j) is the LCS length of the length-i and length-j prefixes
pub fn lcs_table(a: &[u8], b: &[u8]) -> AlignResult<ScoreTable<usize>> {
    ScoreTable::build(&LcsRecurrence, a, b)
}

pub fn lcs_length(a: &[u8], b: &[u8]) -> AlignResult<usize> {
    Ok(lcs_table(a, b)?.last())
}

/// One longest common subsequence of `a` and `b` (empty if they share no symbol)
pub fn longest_common_subsequence(a: &[u8], b: &[u8]) -> AlignResult<Vec<u8>> {
    let table = lcs_table(a, b)?;
    let pointers = PointerMatrix::from_table(&LcsRecurrence, &table, a, b)?;
    let path = trace(&pointers, (a.len(), b.len()), Terminus::Origin)?;
    Ok(emit_common_subsequence(&path, a, b))
}
