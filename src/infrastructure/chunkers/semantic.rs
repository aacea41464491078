//! Semantic chunking strategy

use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use super::ChunkBuilder;
use crate::domain::chunking::{
    BoundaryKind, Chunk, ChunkingConfig, ChunkingStrategy, ChunkingStrategyKind, TokenCounter,
};
use crate::domain::DomainError;

/// Splits at paragraph boundaries first; a paragraph over the budget is
/// further split at sentence boundaries. A single sentence over the budget
/// is emitted whole as a forced-split chunk.
#[derive(Debug, Clone)]
pub struct SemanticChunker {
    counter: Arc<dyn TokenCounter>,
}

impl SemanticChunker {
    /// Create a new semantic chunker
    pub fn new(counter: Arc<dyn TokenCounter>) -> Self {
        Self { counter }
    }

    /// Core accumulation, reused by the code-aware and hierarchical
    /// strategies for their prose segments. Assumes a validated config.
    pub(crate) fn split(&self, content: &str, config: &ChunkingConfig) -> Vec<Chunk> {
        let mut builder = ChunkBuilder::new(self.counter.as_ref(), config.max_tokens);
        self.split_into(&mut builder, content, config);
        builder.finish()
    }

    /// Feed paragraph/sentence units of `content` into an existing builder
    pub(crate) fn split_into(
        &self,
        builder: &mut ChunkBuilder<'_>,
        content: &str,
        config: &ChunkingConfig,
    ) {
        for paragraph in content.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            if self.counter.count(paragraph) <= config.max_tokens {
                builder.push(paragraph, "\n\n", BoundaryKind::Paragraph, false);
                continue;
            }

            for sentence in paragraph.unicode_sentences().map(str::trim) {
                if sentence.is_empty() {
                    continue;
                }

                if self.counter.count(sentence) > config.max_tokens {
                    builder.force(sentence, false);
                } else {
                    builder.push(sentence, " ", BoundaryKind::Sentence, false);
                }
            }
        }
    }
}

impl ChunkingStrategy for SemanticChunker {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        let content = content.trim();

        if content.is_empty() {
            return Ok(vec![]);
        }

        Ok(self.split(content, config))
    }

    fn kind(&self) -> ChunkingStrategyKind {
        ChunkingStrategyKind::Semantic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chunking::tokenizer::mock::WordTokenCounter;

    fn chunker() -> SemanticChunker {
        SemanticChunker::new(Arc::new(WordTokenCounter))
    }

    #[test]
    fn test_empty_content() {
        let chunks = chunker().chunk("", &ChunkingConfig::new(100)).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_whitespace_only() {
        let chunks = chunker().chunk("  \n\n \t ", &ChunkingConfig::new(100)).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let result = chunker().chunk("content", &ChunkingConfig::new(0));
        assert!(result.is_err());
    }

    #[test]
    fn test_small_document_single_chunk() {
        let content = "First paragraph.\n\nSecond paragraph.";
        let chunks = chunker().chunk(content, &ChunkingConfig::new(100)).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, content);
        assert_eq!(chunks[0].metadata.boundary, BoundaryKind::Paragraph);
    }

    #[test]
    fn test_paragraphs_split_at_budget() {
        let content = "one two three four.\n\nfive six seven eight.\n\nnine ten.";
        let chunks = chunker().chunk(content, &ChunkingConfig::new(5)).unwrap();

        assert_eq!(chunks.len(), 3);

        for chunk in &chunks {
            assert!(chunk.metadata.token_count <= 5);
            assert_eq!(chunk.metadata.boundary, BoundaryKind::Paragraph);
        }
    }

    #[test]
    fn test_oversized_paragraph_splits_at_sentences() {
        let content = "First sentence here. Second sentence here. Third sentence here.";
        let chunks = chunker().chunk(content, &ChunkingConfig::new(4)).unwrap();

        assert!(chunks.len() > 1);

        for chunk in &chunks {
            assert!(chunk.metadata.token_count <= 4);
            assert_eq!(chunk.metadata.boundary, BoundaryKind::Sentence);
        }
    }

    #[test]
    fn test_oversized_sentence_forced_split() {
        let content = "tiny one. this single sentence has far too many words to ever fit the budget at all.";
        let chunks = chunker().chunk(content, &ChunkingConfig::new(3)).unwrap();

        let forced: Vec<_> = chunks
            .iter()
            .filter(|c| c.metadata.boundary == BoundaryKind::ForcedSplit)
            .collect();

        assert_eq!(forced.len(), 1);
        assert!(forced[0].metadata.token_count > 3);
        assert!(forced[0].content.starts_with("this single sentence"));
    }

    #[test]
    fn test_indices_contiguous() {
        let content = "a b c.\n\nd e f.\n\ng h i.";
        let chunks = chunker().chunk(content, &ChunkingConfig::new(3)).unwrap();

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.chunk_index, i);
        }
    }

    #[test]
    fn test_reconstruction_modulo_separators() {
        let content = "alpha beta gamma.\n\ndelta epsilon zeta.\n\neta theta iota.";
        let chunks = chunker().chunk(content, &ChunkingConfig::new(6)).unwrap();

        let rebuilt = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        assert_eq!(rebuilt, content);
    }
}
