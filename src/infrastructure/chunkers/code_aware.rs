//! Code-aware chunking strategy

use std::sync::Arc;

use super::{ChunkBuilder, SemanticChunker};
use crate::domain::chunking::{
    BoundaryKind, Chunk, ChunkingConfig, ChunkingStrategy, ChunkingStrategyKind, TokenCounter,
};
use crate::domain::DomainError;

/// Partitions text into alternating prose and code-block segments.
///
/// Code blocks (fenced or indentation-delimited) are atomic: a block is
/// packed whole next to its surrounding prose when it fits the budget, and
/// emitted whole as a forced-split chunk when it alone exceeds it. Prose
/// between blocks is chunked with the semantic algorithm.
#[derive(Debug, Clone)]
pub struct CodeAwareChunker {
    counter: Arc<dyn TokenCounter>,
    semantic: SemanticChunker,
}

#[derive(Debug, PartialEq)]
enum Segment {
    Prose(String),
    Code(String),
}

impl CodeAwareChunker {
    /// Create a new code-aware chunker
    pub fn new(counter: Arc<dyn TokenCounter>) -> Self {
        let semantic = SemanticChunker::new(Arc::clone(&counter));
        Self { counter, semantic }
    }

    fn is_indented_code(line: &str) -> bool {
        (line.starts_with("    ") || line.starts_with('\t')) && !line.trim().is_empty()
    }

    /// Split content into prose and code segments, scanning line by line.
    /// Fences take precedence over indentation; an unterminated fence runs
    /// to the end of the document.
    fn segment(content: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut prose: Vec<&str> = Vec::new();
        let mut code: Vec<&str> = Vec::new();
        let mut in_fence = false;

        let mut lines = content.lines().peekable();

        while let Some(line) = lines.next() {
            if in_fence {
                code.push(line);

                if line.trim_start().starts_with("```") {
                    in_fence = false;
                    segments.push(Segment::Code(code.join("\n")));
                    code.clear();
                }
            } else if line.trim_start().starts_with("```") {
                if !prose.is_empty() {
                    segments.push(Segment::Prose(prose.join("\n")));
                    prose.clear();
                }

                in_fence = true;
                code.push(line);
            } else if Self::is_indented_code(line) {
                if !prose.is_empty() {
                    segments.push(Segment::Prose(prose.join("\n")));
                    prose.clear();
                }

                code.push(line);

                while let Some(next) = lines.peek() {
                    if Self::is_indented_code(next) {
                        code.push(*next);
                        lines.next();
                    } else {
                        break;
                    }
                }

                segments.push(Segment::Code(code.join("\n")));
                code.clear();
            } else {
                prose.push(line);
            }
        }

        if !code.is_empty() {
            segments.push(Segment::Code(code.join("\n")));
        }

        if !prose.is_empty() {
            segments.push(Segment::Prose(prose.join("\n")));
        }

        segments
    }
}

impl ChunkingStrategy for CodeAwareChunker {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        let content = content.trim();

        if content.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = ChunkBuilder::new(self.counter.as_ref(), config.max_tokens);

        for segment in Self::segment(content) {
            match segment {
                Segment::Prose(text) => {
                    self.semantic.split_into(&mut builder, &text, config);
                }
                Segment::Code(block) => {
                    if self.counter.count(&block) > config.max_tokens {
                        builder.force(&block, true);
                    } else {
                        builder.push(&block, "\n\n", BoundaryKind::Paragraph, true);
                    }
                }
            }
        }

        Ok(builder.finish())
    }

    fn kind(&self) -> ChunkingStrategyKind {
        ChunkingStrategyKind::CodeAware
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chunking::tokenizer::mock::WordTokenCounter;

    fn chunker() -> CodeAwareChunker {
        CodeAwareChunker::new(Arc::new(WordTokenCounter))
    }

    const FENCED: &str = "Intro words here.\n\n```\ncode line one\ncode line two\n```\n\nClosing words here.";

    #[test]
    fn test_empty_content() {
        let chunks = chunker().chunk("", &ChunkingConfig::new(100)).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        assert!(chunker().chunk("x", &ChunkingConfig::new(0)).is_err());
    }

    #[test]
    fn test_segmentation_alternates() {
        let segments = CodeAwareChunker::segment(FENCED);

        assert_eq!(segments.len(), 3);
        assert!(matches!(segments[0], Segment::Prose(_)));
        assert!(matches!(segments[1], Segment::Code(_)));
        assert!(matches!(segments[2], Segment::Prose(_)));

        if let Segment::Code(block) = &segments[1] {
            assert!(block.starts_with("```"));
            assert!(block.ends_with("```"));
        }
    }

    #[test]
    fn test_indented_code_detected() {
        let content = "Prose line.\n    indented_code()\n    more_code()\nBack to prose.";
        let segments = CodeAwareChunker::segment(content);

        assert_eq!(segments.len(), 3);
        assert!(matches!(&segments[1], Segment::Code(b) if b.contains("indented_code")));
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let content = "Prose.\n```\ncode without closing fence";
        let segments = CodeAwareChunker::segment(content);

        assert_eq!(segments.len(), 2);
        assert!(matches!(&segments[1], Segment::Code(b) if b.contains("closing fence")));
    }

    #[test]
    fn test_prose_and_code_packed_under_budget() {
        let chunks = chunker().chunk(FENCED, &ChunkingConfig::new(50)).unwrap();

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].metadata.contains_code);
        assert!(chunks[0].content.contains("Intro words"));
        assert!(chunks[0].content.contains("code line one"));
    }

    #[test]
    fn test_code_block_never_split() {
        let chunks = chunker().chunk(FENCED, &ChunkingConfig::new(6)).unwrap();

        // The whole block lands in exactly one chunk
        let with_code: Vec<_> = chunks.iter().filter(|c| c.metadata.contains_code).collect();
        assert_eq!(with_code.len(), 1);
        assert!(with_code[0].content.contains("code line one\ncode line two"));

        // Prose chunks carry no code flag
        for chunk in chunks.iter().filter(|c| !c.metadata.contains_code) {
            assert!(!chunk.content.contains("```"));
        }
    }

    #[test]
    fn test_oversized_block_forced_whole() {
        let block = format!("```\n{}\n```", "code line with words\n".repeat(20).trim_end());
        let content = format!("Short intro.\n\n{}", block);

        let chunks = chunker().chunk(&content, &ChunkingConfig::new(10)).unwrap();

        let forced: Vec<_> = chunks
            .iter()
            .filter(|c| c.metadata.boundary == BoundaryKind::ForcedSplit)
            .collect();

        assert_eq!(forced.len(), 1);
        assert!(forced[0].metadata.token_count > 10);
        assert!(forced[0].metadata.contains_code);
        // Whole block survives intact, line boundaries included
        assert_eq!(forced[0].content, block);
    }

    #[test]
    fn test_indices_contiguous() {
        let chunks = chunker().chunk(FENCED, &ChunkingConfig::new(6)).unwrap();

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.chunk_index, i);
        }
    }

    #[test]
    fn test_reconstruction_modulo_separators() {
        // Budget small enough to force prose / code / prose apart
        let chunks = chunker().chunk(FENCED, &ChunkingConfig::new(6)).unwrap();

        assert!(chunks.len() > 1);

        let rebuilt = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        assert_eq!(rebuilt, FENCED);
    }
}
