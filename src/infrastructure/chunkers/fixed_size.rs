//! Fixed-size chunking strategy

use std::sync::Arc;

use crate::domain::chunking::{
    BoundaryKind, Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy, ChunkingStrategyKind,
    TokenCounter,
};
use crate::domain::DomainError;

/// Windows the token stream into fixed-size pieces with a configurable
/// overlap between consecutive windows. Boundaries fall wherever the
/// tokenizer puts them, content structure is ignored.
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    counter: Arc<dyn TokenCounter>,
}

impl FixedSizeChunker {
    /// Create a new fixed-size chunker
    pub fn new(counter: Arc<dyn TokenCounter>) -> Self {
        Self { counter }
    }
}

impl ChunkingStrategy for FixedSizeChunker {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        let content = content.trim();

        if content.is_empty() {
            return Ok(vec![]);
        }

        let chunks = self
            .counter
            .windows(content, config.max_tokens, config.overlap_tokens)
            .into_iter()
            .enumerate()
            .map(|(i, window)| {
                let tokens = self.counter.count(&window);
                Chunk::new(window, ChunkMetadata::new(i, tokens, BoundaryKind::Window))
            })
            .collect();

        Ok(chunks)
    }

    fn kind(&self) -> ChunkingStrategyKind {
        ChunkingStrategyKind::FixedSize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chunking::tokenizer::mock::WordTokenCounter;

    fn chunker() -> FixedSizeChunker {
        FixedSizeChunker::new(Arc::new(WordTokenCounter))
    }

    #[test]
    fn test_empty_content() {
        let chunks = chunker().chunk("", &ChunkingConfig::new(10)).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        assert!(chunker().chunk("x", &ChunkingConfig::new(0)).is_err());
        assert!(chunker()
            .chunk("x", &ChunkingConfig::new(4).with_overlap(4))
            .is_err());
    }

    #[test]
    fn test_short_content_single_window() {
        let chunks = chunker()
            .chunk("one two three", &ChunkingConfig::new(10))
            .unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "one two three");
        assert_eq!(chunks[0].metadata.boundary, BoundaryKind::Window);
        assert_eq!(chunks[0].metadata.token_count, 3);
    }

    #[test]
    fn test_windows_respect_budget() {
        let content = (1..=20).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let chunks = chunker().chunk(&content, &ChunkingConfig::new(6)).unwrap();

        assert!(chunks.len() > 1);

        for chunk in &chunks {
            assert!(chunk.metadata.token_count <= 6);
        }
    }

    #[test]
    fn test_overlap_repeats_tail_tokens() {
        let content = "a b c d e f g h";
        let chunks = chunker()
            .chunk(content, &ChunkingConfig::new(4).with_overlap(2))
            .unwrap();

        // Step of 2: windows start at a, c, e, g
        assert_eq!(chunks[0].content, "a b c d");
        assert_eq!(chunks[1].content, "c d e f");
        assert!(chunks[1].content.starts_with("c d"));
    }

    #[test]
    fn test_indices_contiguous() {
        let content = "a b c d e f g h i j";
        let chunks = chunker().chunk(content, &ChunkingConfig::new(3)).unwrap();

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.chunk_index, i);
        }
    }
}
