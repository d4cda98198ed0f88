//! Lexical similarity scoring
//!
//! Normalized Levenshtein similarity plus the keyword-overlap bonus used by the
//! intent matcher.

/// Similarity between two strings in `0.0..=1.0`, case-insensitive
///
/// Computed as `(L - d) / L` where `d` is the Levenshtein distance between the
/// lowercased strings and `L` the length of the longer one. Two empty strings
/// are considered identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    let a_chars: Vec<char> = a_lower.chars().collect();
    let b_chars: Vec<char> = b_lower.chars().collect();

    let longest = a_chars.len().max(b_chars.len());
    if longest == 0 {
        return 1.0;
    }

    let distance = edit_distance(&a_chars, &b_chars);
    (longest - distance) as f64 / longest as f64
}

/// Levenshtein distance between two strings, counted in characters
///
/// Unit cost for insertion, deletion and substitution; no transpositions.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    edit_distance(&a_chars, &b_chars)
}

fn edit_distance(a: &[char], b: &[char]) -> usize {
    // Keep the shorter sequence on the inner axis so the rows stay small
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let n = inner.len();

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for (i, oc) in outer.iter().enumerate() {
        curr[0] = i + 1;
        for j in 1..=n {
            curr[j] = if *oc == inner[j - 1] {
                prev[j - 1]
            } else {
                (prev[j - 1] + 1).min(curr[j - 1] + 1).min(prev[j] + 1)
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Keyword-overlap bonus of `query` against `pattern`
///
/// Every whitespace-delimited pattern word with more than `min_word_len`
/// characters that appears inside some query word, or contains one, adds
/// `per_word`. Both sides are expected to be lowercased already. The result is
/// not capped.
pub fn keyword_bonus(query: &str, pattern: &str, min_word_len: usize, per_word: f64) -> f64 {
    let query_words: Vec<&str> = query.split_whitespace().collect();

    pattern
        .split_whitespace()
        .filter(|word| word.chars().count() > min_word_len)
        .filter(|word| {
            query_words
                .iter()
                .any(|qw| qw.contains(*word) || word.contains(*qw))
        })
        .count() as f64
        * per_word
}
