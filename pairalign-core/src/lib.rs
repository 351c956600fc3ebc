//! pairalign Core Library
//!
//! Pairwise sequence comparison by classical dynamic programming: edit distance, longest
//! common subsequence, global and local alignment with linear gap penalties, plus a
//! shared k-mer similarity count.
//!
//! ```
//! use pairalign_core::{global_alignment, local_alignment, Scoring};
//!
//! let scoring = Scoring::new(1.0, 1.0, 0.5);
//!
//! let global = global_alignment(b"GAAC", b"CAAG", &scoring).unwrap();
//! assert_eq!(global.ungapped_top(), b"GAAC");
//!
//! let local = local_alignment(b"GAAC", b"CAAG", &scoring).unwrap();
//! assert_eq!(local.bounds(), (1, 3, 1, 3));
//! ```

pub mod align;
pub mod change;
#[cfg(feature = "io-fasta")] pub mod fasta;
pub mod kmer;
pub mod types;

// Re-export commonly used types and functions
pub use align::{
    edit_alignment, edit_distance, edit_distance_matrix, edit_matrix, global_alignment,
    global_score_table, lcs_length, lcs_table, local_alignment, local_score_table,
    longest_common_subsequence, AlignError, AlignResult, Direction, PointerMatrix, ScoreTable,
};
pub use change::min_coins;
#[cfg(feature = "io-fasta")]
pub use fasta::{FastaError, FastaRecord, FastaResult};
pub use kmer::{count_shared_kmers, frequency_map, KmerTally};
pub use types::{Alignment, LocalAlignment, Scoring, GAP};

/// Version information for the pairalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
