//! Token counting seam shared by the classifier and every strategy

use std::fmt::Debug;

/// Counts tokens and slices text at token boundaries.
///
/// A single instance is shared process-wide so token budgets are comparable
/// across strategies. Implementations must be safe for concurrent read-only
/// use and must never fail: encoding problems degrade to a conservative
/// estimate instead of aborting a request.
pub trait TokenCounter: Send + Sync + Debug {
    /// Number of tokens in `text`. Deterministic for a given input.
    fn count(&self, text: &str) -> usize;

    /// Split `text` into windows of at most `max_tokens` tokens, repeating
    /// the trailing `overlap` tokens at the start of each following window.
    ///
    /// Every window except the last holds exactly `max_tokens` tokens; the
    /// last holds the remainder.
    fn windows(&self, text: &str, max_tokens: usize, overlap: usize) -> Vec<String>;
}

/// Conservative token estimate used when no real tokenizer is available.
///
/// Roughly four characters per token, rounded up, matching the usual BPE
/// density for English prose.
pub fn estimate_tokens(text: &str) -> usize {
    let chars = text.chars().count();
    chars.div_ceil(ESTIMATE_CHARS_PER_TOKEN)
}

pub(crate) const ESTIMATE_CHARS_PER_TOKEN: usize = 4;

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Whitespace-word token counter for predictable tests
    #[derive(Debug, Clone, Default)]
    pub struct WordTokenCounter;

    impl TokenCounter for WordTokenCounter {
        fn count(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }

        fn windows(&self, text: &str, max_tokens: usize, overlap: usize) -> Vec<String> {
            let words: Vec<&str> = text.split_whitespace().collect();

            if words.is_empty() || max_tokens == 0 {
                return Vec::new();
            }

            if words.len() <= max_tokens {
                return vec![words.join(" ")];
            }

            let step = max_tokens - overlap.min(max_tokens - 1);
            let mut result = Vec::new();
            let mut start = 0;

            while start < words.len() {
                let end = (start + max_tokens).min(words.len());
                result.push(words[start..end].join(" "));

                if end == words.len() {
                    break;
                }

                start += step;
            }

            result
        }
    }
}
