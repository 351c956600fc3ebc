use super::table::{EditRecurrence, ScoreTable};
use super::traceback::{emit_alignment, trace, Terminus};
use super::{AlignError, AlignResult, PointerMatrix};
use crate::types::Alignment;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Levenshtein table; cell (i, j) is the edit distance between the length-i prefix of `a`
/// and the length-j prefix of `b`.
pub fn edit_matrix(a: &[u8], b: &[u8]) -> AlignResult<ScoreTable<usize>> {
    ScoreTable::build(&EditRecurrence, a, b)
}

/// Minimum number of substitutions, insertions and deletions turning `a` into `b`
pub fn edit_distance(a: &[u8], b: &[u8]) -> AlignResult<usize> {
    Ok(edit_matrix(a, b)?.last())
}

/// One minimum-edit alignment of `a` against `b`
pub fn edit_alignment(a: &[u8], b: &[u8]) -> AlignResult<Alignment> {
    let table = edit_matrix(a, b)?;
    let pointers = PointerMatrix::from_table(&EditRecurrence, &table, a, b)?;
    let path = trace(&pointers, (a.len(), b.len()), Terminus::Origin)?;
    Ok(emit_alignment(&path, a, b))
}

/// Symmetric matrix of pairwise edit distances with a zero diagonal.
///
/// Each pair gets its own table. With the `parallel` feature the pairs are spread over
/// the rayon pool.
pub fn edit_distance_matrix<S>(patterns: &[S]) -> AlignResult<Vec<Vec<usize>>>
where
    S: AsRef<[u8]> + Sync,
{
    if patterns.iter().any(|pattern| pattern.as_ref().is_empty()) {
        return Err(AlignError::EmptyInput("pattern"));
    }

    let n = patterns.len();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();

    let distance = |&(i, j): &(usize, usize)| {
        edit_distance(patterns[i].as_ref(), patterns[j].as_ref()).map(|d| (i, j, d))
    };

    #[cfg(feature = "parallel")]
    let distances: Vec<(usize, usize, usize)> = pairs.par_iter().map(distance).collect::<AlignResult<_>>()?;
    #[cfg(not(feature = "parallel"))]
    let distances: Vec<(usize, usize, usize)> = pairs.iter().map(distance).collect::<AlignResult<_>>()?;

    let mut matrix = vec![vec![0; n]; n];
    for (i, j, d) in distances {
        matrix[i][j] = d;
        matrix[j][i] = d;
    }

    log::debug!("Computed {} pairwise edit distances", pairs.len());
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(edit_distance(b"A--T", b"A--T"), Ok(0));
    }

    #[test]
    fn test_known_distances() {
        assert_eq!(edit_distance(b"kitten", b"sitting"), Ok(3));
        assert_eq!(edit_distance(b"A", b"T"), Ok(1));
        assert_eq!(edit_distance(b"ACGT", b"A"), Ok(3));
    }

    #[test]
    fn test_edit_alignment_matches_distance() {
        let alignment = edit_alignment(b"kitten", b"sitting").unwrap();
        assert_eq!(alignment.edit_count(), 3);
        assert_eq!(alignment.ungapped_top(), b"kitten");
        assert_eq!(alignment.ungapped_bottom(), b"sitting");
    }

    #[test]
    fn test_distance_matrix() {
        let matrix = edit_distance_matrix(&["A", "T", "AT"]).unwrap();
        assert_eq!(matrix, vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]);

        let identical = edit_distance_matrix(&["A", "A", "A"]).unwrap();
        assert!(identical.iter().flatten().all(|&d| d == 0));
    }

    #[test]
    fn test_distance_matrix_rejects_empty_pattern() {
        let err = edit_distance_matrix(&["A", ""]).unwrap_err();
        assert_eq!(err, AlignError::EmptyInput("pattern"));
    }
}
