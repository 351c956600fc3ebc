//! Shared k-mer counting
//!
//! A cheap similarity heuristic: tally every length-k substring of each sequence and count
//! how many occurrences the two tallies have in common. No table or traceback machinery
//! is involved, and positions are ignored.

use std::collections::HashMap;

/// Occurrence count per distinct k-mer, borrowing the k-mers from the tallied sequence
pub type KmerTally<'a> = HashMap<&'a [u8], usize>;

/// Count every length-`k` window of `sequence`.
///
/// Empty when `k` is zero or longer than the sequence.
pub fn frequency_map(sequence: &[u8], k: usize) -> KmerTally<'_> {
    let mut tally = KmerTally::new();
    if k == 0 || k > sequence.len() {
        return tally;
    }

    for kmer in sequence.windows(k) {
        *tally.entry(kmer).or_insert(0) += 1;
    }
    tally
}

/// Sum over the distinct k-mers of `a` of the smaller of their two occurrence counts
pub fn count_shared_kmers(a: &[u8], b: &[u8], k: usize) -> usize {
    let tally_a = frequency_map(a, k);
    let tally_b = frequency_map(b, k);
    shared_count(&tally_a, &tally_b)
}

/// Minimum-overlap of two tallies
pub fn shared_count(a: &KmerTally<'_>, b: &KmerTally<'_>) -> usize {
    a.iter()
        .map(|(kmer, &count)| count.min(b.get(kmer).copied().unwrap_or(0)))
        .sum()
}
