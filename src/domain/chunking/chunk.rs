//! Chunk types shared by every chunking strategy

use serde::{Deserialize, Serialize};

/// Finest boundary kind a chunk was cut at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// Whole paragraphs (blank-line delimited blocks)
    Paragraph,
    /// A paragraph had to be split at sentence boundaries
    Sentence,
    /// Fixed token window, no structural awareness
    Window,
    /// A single atomic unit exceeded the budget and was emitted whole
    ForcedSplit,
}

impl BoundaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryKind::Paragraph => "paragraph",
            BoundaryKind::Sentence => "sentence",
            BoundaryKind::Window => "window",
            BoundaryKind::ForcedSplit => "forced_split",
        }
    }
}

/// Structural metadata a strategy attaches to a chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Index of this chunk (0-based, contiguous)
    pub chunk_index: usize,
    /// Token count of the chunk content, computed by the tokenizer adapter
    pub token_count: usize,
    /// Boundary the chunk was cut at
    pub boundary: BoundaryKind,
    /// Ancestor heading titles, outermost first; empty outside the
    /// hierarchical strategy
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub heading_path: Vec<String>,
    /// True when the chunk includes any code-block text
    #[serde(default)]
    pub contains_code: bool,
}

impl ChunkMetadata {
    /// Metadata with the given index, token count and boundary
    pub fn new(chunk_index: usize, token_count: usize, boundary: BoundaryKind) -> Self {
        Self {
            chunk_index,
            token_count,
            boundary,
            heading_path: Vec::new(),
            contains_code: false,
        }
    }

    /// Set the heading path
    pub fn with_heading_path(mut self, path: Vec<String>) -> Self {
        self.heading_path = path;
        self
    }

    /// Flag the chunk as containing code
    pub fn with_code(mut self, contains_code: bool) -> Self {
        self.contains_code = contains_code;
        self
    }
}

/// A token-budgeted slice of a document's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk content
    pub content: String,
    /// Structural metadata
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(content: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Get the chunk index
    pub fn index(&self) -> usize {
        self.metadata.chunk_index
    }

    /// Token count of the chunk content
    pub fn token_count(&self) -> usize {
        self.metadata.token_count
    }

    /// Check if the chunk is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
