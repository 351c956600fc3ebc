use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Symbol written into an alignment row opposite a consumed symbol of the other row
pub const GAP: u8 = b'-';

/// Linear-gap scoring parameters shared by global and local alignment.
///
/// All three values are magnitudes: the recurrences add `match_score` and subtract
/// `mismatch_penalty` and `gap_penalty`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    /// Reward for aligning two identical symbols
    #[serde(default = "default_weight")]
    pub match_score: f64,
    /// Penalty for aligning two different symbols
    #[serde(default = "default_weight")]
    pub mismatch_penalty: f64,
    /// Penalty for aligning a symbol against a gap
    #[serde(default = "default_weight")]
    pub gap_penalty: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            match_score: 1.0,
            mismatch_penalty: 1.0,
            gap_penalty: 1.0,
        }
    }
}

impl Scoring {
    pub fn new(match_score: f64, mismatch_penalty: f64, gap_penalty: f64) -> Self {
        Self {
            match_score,
            mismatch_penalty,
            gap_penalty,
        }
    }

    /// Returns the name and value of the first parameter that is negative or not finite
    pub fn first_invalid(&self) -> Option<(&'static str, f64)> {
        [
            ("match_score", self.match_score),
            ("mismatch_penalty", self.mismatch_penalty),
            ("gap_penalty", self.gap_penalty),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    }

    /// Signed contribution of a single alignment column
    #[inline]
    pub fn column_score(&self, a: u8, b: u8) -> f64 {
        if a == GAP || b == GAP {
            -self.gap_penalty
        } else if a == b {
            self.match_score
        } else {
            -self.mismatch_penalty
        }
    }

    /// Diagonal step weight used by the recurrences
    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> f64 {
        if a == b {
            self.match_score
        } else {
            -self.mismatch_penalty
        }
    }
}

/// Two equal-length rows over the input alphabet plus [`GAP`].
///
/// Removing the gaps from `top` yields the aligned part of the first sequence, and
/// likewise `bottom` for the second.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub top: Vec<u8>,
    pub bottom: Vec<u8>,
}

impl Alignment {
    pub fn new(top: Vec<u8>, bottom: Vec<u8>) -> Self {
        debug_assert_eq!(top.len(), bottom.len());
        Self { top, bottom }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.top.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    /// Iterate over `(top, bottom)` symbol pairs, left to right
    pub fn columns(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.top.iter().copied().zip(self.bottom.iter().copied())
    }

    /// Signed score under the linear-gap recurrence. For an alignment produced by the
    /// traceback this equals the table cell the traceback started from.
    pub fn score(&self, scoring: &Scoring) -> f64 {
        self.columns().map(|(a, b)| scoring.column_score(a, b)).sum()
    }

    /// Unsigned column weight: every match, mismatch and gap column adds the magnitude of
    /// its parameter. Useful as a coarse alignment-size measure.
    pub fn weight_sum(&self, scoring: &Scoring) -> f64 {
        self.columns()
            .map(|(a, b)| {
                if a == b {
                    scoring.match_score
                } else if a == GAP || b == GAP {
                    scoring.gap_penalty
                } else {
                    scoring.mismatch_penalty
                }
            })
            .sum()
    }

    /// Number of columns whose two symbols differ (substitutions and gap columns)
    pub fn edit_count(&self) -> usize {
        self.columns().filter(|(a, b)| a != b).count()
    }

    /// Percentage of columns holding identical symbols
    pub fn identity(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let matches = self.columns().filter(|(a, b)| a == b && *a != GAP).count();
        (matches as f32 / self.len() as f32) * 100.0
    }

    /// The top row with gaps removed
    pub fn ungapped_top(&self) -> Vec<u8> {
        strip_gaps(&self.top)
    }

    /// The bottom row with gaps removed
    pub fn ungapped_bottom(&self) -> Vec<u8> {
        strip_gaps(&self.bottom)
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", String::from_utf8_lossy(&self.top))?;
        write!(f, "{}", String::from_utf8_lossy(&self.bottom))
    }
}

fn strip_gaps(row: &[u8]) -> Vec<u8> {
    row.iter().copied().filter(|&c| c != GAP).collect()
}

/// Highest-scoring alignment between substrings of the two inputs.
///
/// `top_range` and `bottom_range` are half-open intervals into the first and second
/// sequence; the alignment rows with gaps removed reproduce exactly those substrings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalAlignment {
    pub alignment: Alignment,
    /// Maximum cell of the local score table
    pub score: f64,
    pub top_range: Range<usize>,
    pub bottom_range: Range<usize>,
}

impl LocalAlignment {
    /// `(start0, end0, start1, end1)`
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        (
            self.top_range.start,
            self.top_range.end,
            self.bottom_range.start,
            self.bottom_range.end,
        )
    }

    /// True when no positive-scoring local alignment exists
    pub fn is_empty(&self) -> bool {
        self.alignment.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_scores() {
        let alignment = Alignment::new(b"GAAC-".to_vec(), b"-AAGT".to_vec());
        let scoring = Scoring::new(1.0, 1.0, 0.5);

        // gap, match, match, mismatch, gap
        assert_eq!(alignment.score(&scoring), -0.5 + 1.0 + 1.0 - 1.0 - 0.5);
        assert_eq!(alignment.weight_sum(&scoring), 0.5 + 1.0 + 1.0 + 1.0 + 0.5);
        assert_eq!(alignment.edit_count(), 3);
    }

    #[test]
    fn test_ungapped_rows() {
        let alignment = Alignment::new(b"AG-T".to_vec(), b"A-CT".to_vec());
        assert_eq!(alignment.ungapped_top(), b"AGT");
        assert_eq!(alignment.ungapped_bottom(), b"ACT");
        assert_eq!(alignment.to_string(), "AG-T\nA-CT");
    }

    #[test]
    fn test_identity() {
        let alignment = Alignment::new(b"ACGT".to_vec(), b"ACCT".to_vec());
        assert_eq!(alignment.identity(), 75.0);
        assert_eq!(Alignment::default().identity(), 0.0);
    }

    #[test]
    fn test_scoring_validation() {
        assert!(Scoring::default().first_invalid().is_none());
        assert_eq!(
            Scoring::new(1.0, -1.0, 0.5).first_invalid(),
            Some(("mismatch_penalty", -1.0))
        );
        assert!(Scoring::new(f64::NAN, 1.0, 1.0).first_invalid().is_some());
    }

    #[test]
    fn test_local_bounds() {
        let local = LocalAlignment {
            alignment: Alignment::new(b"AA".to_vec(), b"AA".to_vec()),
            score: 2.0,
            top_range: 1..3,
            bottom_range: 1..3,
        };
        assert_eq!(local.bounds(), (1, 3, 1, 3));
        assert!(!local.is_empty());
    }
}
