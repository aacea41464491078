//! Processing result assembled by the orchestrator

use serde::{Deserialize, Serialize};

use super::chunk::{BoundaryKind, Chunk};
use super::classify::ClassificationResult;
use super::document::DocumentType;
use super::strategy::ChunkingStrategyKind;

/// A chunk stamped with its document context, ready for downstream indexing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// `{document_id}_chunk_{index}`
    pub chunk_id: String,
    /// Identifier of the source document
    pub document_id: String,
    /// Position of the chunk (0-based, contiguous)
    pub chunk_index: usize,
    /// Classified type of the source document
    pub document_type: DocumentType,
    /// Strategy that produced the chunk
    pub strategy: ChunkingStrategyKind,
    /// Chunk content
    pub content: String,
    /// Token count computed by the tokenizer adapter
    pub token_count: usize,
    /// Boundary the chunk was cut at
    pub boundary: BoundaryKind,
    /// Ancestor heading titles, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub heading_path: Vec<String>,
    /// True when the chunk includes code-block text
    #[serde(default)]
    pub contains_code: bool,
}

impl ChunkRecord {
    /// Stamp a strategy-produced chunk with its document context
    pub fn stamp(
        chunk: Chunk,
        document_id: &str,
        document_type: DocumentType,
        strategy: ChunkingStrategyKind,
    ) -> Self {
        Self {
            chunk_id: format!("{}_chunk_{}", document_id, chunk.metadata.chunk_index),
            document_id: document_id.to_string(),
            chunk_index: chunk.metadata.chunk_index,
            document_type,
            strategy,
            token_count: chunk.metadata.token_count,
            boundary: chunk.metadata.boundary,
            heading_path: chunk.metadata.heading_path,
            contains_code: chunk.metadata.contains_code,
            content: chunk.content,
        }
    }
}

/// Token count distribution over the emitted chunks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkStats {
    pub total_chunks: usize,
    pub min_tokens: usize,
    pub max_tokens: usize,
    pub mean_tokens: f64,
}

impl ChunkStats {
    /// Compute the distribution; all-zero for an empty chunk list
    pub fn from_records(records: &[ChunkRecord]) -> Self {
        if records.is_empty() {
            return Self {
                total_chunks: 0,
                min_tokens: 0,
                max_tokens: 0,
                mean_tokens: 0.0,
            };
        }

        let counts: Vec<usize> = records.iter().map(|r| r.token_count).collect();
        let total: usize = counts.iter().sum();

        Self {
            total_chunks: records.len(),
            min_tokens: *counts.iter().min().unwrap_or(&0),
            max_tokens: *counts.iter().max().unwrap_or(&0),
            mean_tokens: total as f64 / records.len() as f64,
        }
    }
}

/// Complete outcome of processing one document.
///
/// Always well-formed: failures inside a strategy and blank input yield a
/// zero-chunk result with a recorded reason instead of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub document_id: String,
    pub classification: ClassificationResult,
    pub strategy: ChunkingStrategyKind,
    pub chunks: Vec<ChunkRecord>,
    pub stats: ChunkStats,
    /// Why no chunks were produced, when the chunk list is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<String>,
    /// Wall-clock processing duration in milliseconds
    pub duration_ms: u64,
}

impl ProcessingResult {
    /// Result carrying the given chunk records
    pub fn new(
        document_id: impl Into<String>,
        classification: ClassificationResult,
        strategy: ChunkingStrategyKind,
        chunks: Vec<ChunkRecord>,
    ) -> Self {
        let stats = ChunkStats::from_records(&chunks);

        Self {
            document_id: document_id.into(),
            classification,
            strategy,
            chunks,
            stats,
            skipped_reason: None,
            duration_ms: 0,
        }
    }

    /// Zero-chunk result with a recorded reason
    pub fn skipped(
        document_id: impl Into<String>,
        classification: ClassificationResult,
        strategy: ChunkingStrategyKind,
        reason: impl Into<String>,
    ) -> Self {
        let mut result = Self::new(document_id, classification, strategy, Vec::new());
        result.skipped_reason = Some(reason.into());
        result
    }

    /// Record the processing duration
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chunking::chunk::ChunkMetadata;
    use std::collections::BTreeMap;

    fn record(index: usize, tokens: usize) -> ChunkRecord {
        let chunk = Chunk::new(
            format!("chunk {}", index),
            ChunkMetadata::new(index, tokens, BoundaryKind::Paragraph),
        );
        ChunkRecord::stamp(chunk, "doc-1", DocumentType::Policy, ChunkingStrategyKind::Semantic)
    }

    #[test]
    fn test_stamp_builds_chunk_id() {
        let rec = record(3, 10);

        assert_eq!(rec.chunk_id, "doc-1_chunk_3");
        assert_eq!(rec.document_id, "doc-1");
        assert_eq!(rec.chunk_index, 3);
        assert_eq!(rec.strategy, ChunkingStrategyKind::Semantic);
    }

    #[test]
    fn test_stats_distribution() {
        let records = vec![record(0, 10), record(1, 30), record(2, 20)];
        let stats = ChunkStats::from_records(&records);

        assert_eq!(stats.total_chunks, 3);
        assert_eq!(stats.min_tokens, 10);
        assert_eq!(stats.max_tokens, 30);
        assert!((stats.mean_tokens - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_empty() {
        let stats = ChunkStats::from_records(&[]);

        assert_eq!(stats.total_chunks, 0);
        assert_eq!(stats.min_tokens, 0);
        assert_eq!(stats.mean_tokens, 0.0);
    }

    #[test]
    fn test_skipped_result() {
        let classification = ClassificationResult::fallback(0, BTreeMap::new());
        let result = ProcessingResult::skipped(
            "doc-2",
            classification,
            ChunkingStrategyKind::FixedSize,
            "document is empty or whitespace-only",
        );

        assert!(result.chunks.is_empty());
        assert_eq!(result.stats.total_chunks, 0);
        assert_eq!(
            result.skipped_reason.as_deref(),
            Some("document is empty or whitespace-only")
        );
    }
}
