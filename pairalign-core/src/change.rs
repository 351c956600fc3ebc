//! Minimum coin change
//!
//! Unrelated to alignment: a 1-D DP over amounts `0..=amount` that shares no types with
//! the alignment engine.

/// Fewest coins from `denominations` (each usable any number of times) summing to
/// `amount`, or `None` when the amount cannot be reached. Zero denominations are ignored.
pub fn min_coins(amount: usize, denominations: &[usize]) -> Option<usize> {
    let mut best: Vec<Option<usize>> = vec![None; amount + 1];
    best[0] = Some(0);

    for value in 1..=amount {
        let fewest = denominations
            .iter()
            .filter(|&&coin| coin > 0 && coin <= value)
            .filter_map(|&coin| best[value - coin])
            .min();
        best[value] = fewest.map(|count| count + 1);
    }

    best[amount]
}
