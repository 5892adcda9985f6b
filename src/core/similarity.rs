//! Content similarity between two revisions of a file.
//!
//! Tokens are whitespace-delimited words; the score is the classic matching
//! ratio `2*M / T` where `M` is the longest-common-subsequence length of the
//! two token sequences and `T` is their combined token count.

/// Normalized similarity of two content snapshots, in `[0, 1]`.
///
/// Two empty inputs are defined as identical (1.0). Deterministic for a
/// given pair of inputs; no allocation survives the call.
pub fn similarity(old_text: &str, new_text: &str) -> f64 {
    let old_tokens: Vec<&str> = old_text.split_whitespace().collect();
    let new_tokens: Vec<&str> = new_text.split_whitespace().collect();

    let total = old_tokens.len() + new_tokens.len();
    if total == 0 {
        return 1.0;
    }

    let matched = lcs_length(&old_tokens, &new_tokens);
    (2.0 * matched as f64) / total as f64
}

/// Longest common subsequence length over token slices, rolling two rows
/// so memory stays proportional to the shorter input.
fn lcs_length(a: &[&str], b: &[&str]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Keep the DP rows sized by the shorter sequence.
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev = vec![0usize; inner.len() + 1];
    let mut curr = vec![0usize; inner.len() + 1];

    for token_a in outer {
        for (j, token_b) in inner.iter().enumerate() {
            curr[j + 1] = if token_a == token_b {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[inner.len()]
}
