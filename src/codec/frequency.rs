//! Symbol frequency analysis over byte buffers.
//!
//! A [`FrequencyTable`] counts how often each byte value occurs in an input.
//! It exists only to seed Huffman tree construction and the selector's
//! diversity heuristic; it is discarded once the tree is built.

use crate::error::{Error, Result};

/// Per-byte occurrence counts for one input buffer.
///
/// The sum of all counts always equals the length of the analyzed input.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Returns the number of occurrences of `symbol`.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Returns the total number of symbols counted (the input length).
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Returns the number of distinct symbols that occurred at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Iterates over `(symbol, count)` pairs with non-zero counts, in
    /// ascending byte order. The fixed iteration order makes downstream
    /// tree construction deterministic.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(b, &c)| (b as u8, c))
    }
}

/// Count symbol occurrences in `input` with a single O(n) pass.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if `input` is empty. Every table this
/// function produces therefore contains at least one symbol.
///
/// # Example
///
/// ```
/// use bale::codec::frequency::analyze;
///
/// let table = analyze(b"aabccc").unwrap();
/// assert_eq!(table.count(b'c'), 3);
/// assert_eq!(table.total(), 6);
/// ```
pub fn analyze(input: &[u8]) -> Result<FrequencyTable> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut counts = [0u64; 256];
    for &b in input {
        counts[b as usize] += 1;
    }
    Ok(FrequencyTable { counts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let table = analyze(b"aabccc").unwrap();
        assert_eq!(table.count(b'a'), 2);
        assert_eq!(table.count(b'b'), 1);
        assert_eq!(table.count(b'c'), 3);
        assert_eq!(table.count(b'z'), 0);
    }

    #[test]
    fn test_total_equals_input_length() {
        let input = b"this is an example for huffman encoding";
        let table = analyze(input).unwrap();
        assert_eq!(table.total(), input.len() as u64);
    }

    #[test]
    fn test_distinct_and_order() {
        let table = analyze(b"cba").unwrap();
        assert_eq!(table.distinct(), 3);
        let symbols: Vec<u8> = table.symbols().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![b'a', b'b', b'c']);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(analyze(b""), Err(Error::EmptyInput)));
    }
}
