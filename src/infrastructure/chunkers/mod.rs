//! Chunking strategy implementations

mod code_aware;
mod fixed_size;
mod hierarchical;
mod semantic;

pub use code_aware::CodeAwareChunker;
pub use fixed_size::FixedSizeChunker;
pub use hierarchical::HierarchicalChunker;
pub use semantic::SemanticChunker;

use crate::domain::chunking::{BoundaryKind, Chunk, ChunkMetadata, TokenCounter};

/// Accumulates units (paragraphs, sentences, code blocks) into chunks under
/// a token budget, closing a chunk when the next unit would exceed it.
///
/// Shared by the semantic, code-aware and hierarchical strategies; the
/// fixed-size strategy windows tokens directly.
pub(crate) struct ChunkBuilder<'a> {
    counter: &'a dyn TokenCounter,
    max_tokens: usize,
    chunks: Vec<Chunk>,
    current: String,
    current_tokens: usize,
    boundary: BoundaryKind,
    has_code: bool,
}

impl<'a> ChunkBuilder<'a> {
    pub(crate) fn new(counter: &'a dyn TokenCounter, max_tokens: usize) -> Self {
        Self {
            counter,
            max_tokens,
            chunks: Vec::new(),
            current: String::new(),
            current_tokens: 0,
            boundary: BoundaryKind::Paragraph,
            has_code: false,
        }
    }

    /// Add a unit that fits the budget on its own. Closes the pending chunk
    /// first when appending the unit would exceed the budget.
    pub(crate) fn push(
        &mut self,
        unit: &str,
        separator: &str,
        boundary: BoundaryKind,
        is_code: bool,
    ) {
        let unit_tokens = self.counter.count(unit);

        if self.current.is_empty() {
            self.current.push_str(unit);
            self.current_tokens = unit_tokens;
            self.boundary = boundary;
            self.has_code = is_code;
            return;
        }

        let separator_tokens = self.counter.count(separator);

        if self.current_tokens + separator_tokens + unit_tokens <= self.max_tokens {
            self.current.push_str(separator);
            self.current.push_str(unit);
            self.current_tokens += separator_tokens + unit_tokens;
            self.has_code |= is_code;

            // The chunk boundary is the finest unit it was cut at
            if boundary == BoundaryKind::Sentence {
                self.boundary = BoundaryKind::Sentence;
            }
        } else {
            self.flush();
            self.current.push_str(unit);
            self.current_tokens = unit_tokens;
            self.boundary = boundary;
            self.has_code = is_code;
        }
    }

    /// Emit an atomic unit that exceeds the budget as its own forced-split
    /// chunk, never truncated.
    pub(crate) fn force(&mut self, unit: &str, is_code: bool) {
        self.flush();

        let metadata = ChunkMetadata::new(
            self.chunks.len(),
            self.counter.count(unit),
            BoundaryKind::ForcedSplit,
        )
        .with_code(is_code);

        self.chunks.push(Chunk::new(unit, metadata));
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }

        let content = std::mem::take(&mut self.current);
        let metadata = ChunkMetadata::new(
            self.chunks.len(),
            self.counter.count(&content),
            self.boundary,
        )
        .with_code(self.has_code);

        self.chunks.push(Chunk::new(content, metadata));
        self.current_tokens = 0;
        self.boundary = BoundaryKind::Paragraph;
        self.has_code = false;
    }

    /// Close the pending chunk and return everything accumulated
    pub(crate) fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

/// Re-number chunk indices after strategies merge or annotate chunk lists
pub(crate) fn reindex(chunks: &mut [Chunk]) {
    for (i, chunk) in chunks.iter_mut().enumerate() {
        chunk.metadata.chunk_index = i;
    }
}
