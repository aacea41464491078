//! Tokenizer adapter backed by the cl100k_base BPE

use once_cell::sync::Lazy;
use tiktoken_rs::{cl100k_base, CoreBPE};

use crate::domain::chunking::tokenizer::{estimate_tokens, TokenCounter, ESTIMATE_CHARS_PER_TOKEN};

// Built once at first use and shared read-only afterwards; the BPE tables
// are expensive to construct.
static CL100K: Lazy<Option<CoreBPE>> = Lazy::new(|| match cl100k_base() {
    Ok(bpe) => Some(bpe),
    Err(e) => {
        tracing::warn!(
            "Failed to load cl100k_base tokenizer, falling back to character estimate: {}",
            e
        );
        None
    }
});

/// Token counter using the cl100k_base encoding.
///
/// When the encoding cannot be loaded or a token window cannot be decoded
/// back to text, calls degrade to a character-count estimate instead of
/// failing the request.
#[derive(Debug, Clone, Default)]
pub struct Cl100kTokenCounter;

impl Cl100kTokenCounter {
    /// Create a new counter; the underlying BPE is shared process-wide
    pub fn new() -> Self {
        Self
    }
}

impl TokenCounter for Cl100kTokenCounter {
    fn count(&self, text: &str) -> usize {
        match CL100K.as_ref() {
            Some(bpe) => bpe.encode_with_special_tokens(text).len(),
            None => estimate_tokens(text),
        }
    }

    fn windows(&self, text: &str, max_tokens: usize, overlap: usize) -> Vec<String> {
        if text.is_empty() || max_tokens == 0 {
            return Vec::new();
        }

        let Some(bpe) = CL100K.as_ref() else {
            return estimate_windows(text, max_tokens, overlap);
        };

        let tokens = bpe.encode_with_special_tokens(text);

        if tokens.len() <= max_tokens {
            return vec![text.to_string()];
        }

        let step = max_tokens - overlap.min(max_tokens - 1);
        let mut result = Vec::new();
        let mut start = 0;

        while start < tokens.len() {
            let end = (start + max_tokens).min(tokens.len());

            match bpe.decode(tokens[start..end].to_vec()) {
                Ok(window) => result.push(window),
                // A window boundary can land inside a multi-byte character;
                // degrade the whole split rather than emit mangled text.
                Err(_) => return estimate_windows(text, max_tokens, overlap),
            }

            if end == tokens.len() {
                break;
            }

            start += step;
        }

        result
    }
}

/// Character-window fallback honoring the same window/overlap contract
fn estimate_windows(text: &str, max_tokens: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let window = max_tokens * ESTIMATE_CHARS_PER_TOKEN;
    let overlap_chars = overlap * ESTIMATE_CHARS_PER_TOKEN;

    if chars.len() <= window {
        return vec![text.to_string()];
    }

    let step = window - overlap_chars.min(window - 1);
    let mut result = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + window).min(chars.len());
        result.push(chars[start..end].iter().collect());

        if end == chars.len() {
            break;
        }

        start += step;
    }

    result
}
