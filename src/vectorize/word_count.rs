//! Word-count aggregation.

use ahash::AHashMap;

/// Count the occurrences of every term in a token sequence.
pub fn count_words<S: AsRef<str>>(tokens: &[S]) -> AHashMap<String, usize> {
    let mut counts = AHashMap::with_capacity(tokens.len());
    for token in tokens {
        *counts.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    counts
}
