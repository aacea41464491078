//! Chunking strategy trait, strategy kinds and the type→strategy selector

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::chunk::Chunk;
use super::document::DocumentType;
use crate::domain::DomainError;

/// The closed set of chunking strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingStrategyKind {
    Semantic,
    CodeAware,
    Hierarchical,
    FixedSize,
}

impl ChunkingStrategyKind {
    /// All strategy kinds in declaration order
    pub fn all() -> &'static [ChunkingStrategyKind] {
        &[
            ChunkingStrategyKind::Semantic,
            ChunkingStrategyKind::CodeAware,
            ChunkingStrategyKind::Hierarchical,
            ChunkingStrategyKind::FixedSize,
        ]
    }

    /// Stable string identifier, matches the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkingStrategyKind::Semantic => "semantic",
            ChunkingStrategyKind::CodeAware => "code_aware",
            ChunkingStrategyKind::Hierarchical => "hierarchical",
            ChunkingStrategyKind::FixedSize => "fixed_size",
        }
    }
}

impl std::fmt::Display for ChunkingStrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Select the chunking strategy for a classified document type.
///
/// Total and deterministic: every type maps to exactly one strategy and the
/// fallback type maps to fixed-size.
pub fn select_strategy(document_type: DocumentType) -> ChunkingStrategyKind {
    match document_type {
        DocumentType::TechnicalDoc => ChunkingStrategyKind::Hierarchical,
        DocumentType::SupportTicket => ChunkingStrategyKind::Semantic,
        DocumentType::ApiReference => ChunkingStrategyKind::Hierarchical,
        DocumentType::Policy => ChunkingStrategyKind::Semantic,
        DocumentType::Tutorial => ChunkingStrategyKind::Hierarchical,
        DocumentType::Code => ChunkingStrategyKind::CodeAware,
        DocumentType::Generic => ChunkingStrategyKind::FixedSize,
    }
}

/// Per-invocation chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Token budget per chunk; only forced-split chunks may exceed it
    pub max_tokens: usize,
    /// Trailing tokens repeated at the start of the next chunk.
    /// Only the fixed-size strategy honors this.
    pub overlap_tokens: usize,
}

impl ChunkingConfig {
    /// Create a configuration with no overlap
    pub fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            overlap_tokens: 0,
        }
    }

    /// Set the overlap token count
    pub fn with_overlap(mut self, overlap_tokens: usize) -> Self {
        self.overlap_tokens = overlap_tokens;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_tokens == 0 {
            return Err(DomainError::configuration(
                "max_tokens must be greater than 0",
            ));
        }

        if self.overlap_tokens >= self.max_tokens {
            return Err(DomainError::configuration(
                "overlap_tokens must be less than max_tokens",
            ));
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            overlap_tokens: 0,
        }
    }
}

/// Trait implemented by each of the four chunking strategies
pub trait ChunkingStrategy: Send + Sync + Debug {
    /// Split content into ordered, contiguous chunks under the token budget
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError>;

    /// The strategy kind this implementation provides
    fn kind(&self) -> ChunkingStrategyKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_is_total() {
        for doc_type in DocumentType::all() {
            // Every type resolves without panicking
            let _ = select_strategy(*doc_type);
        }
    }

    #[test]
    fn test_selector_mapping() {
        assert_eq!(
            select_strategy(DocumentType::TechnicalDoc),
            ChunkingStrategyKind::Hierarchical
        );
        assert_eq!(
            select_strategy(DocumentType::SupportTicket),
            ChunkingStrategyKind::Semantic
        );
        assert_eq!(
            select_strategy(DocumentType::ApiReference),
            ChunkingStrategyKind::Hierarchical
        );
        assert_eq!(
            select_strategy(DocumentType::Policy),
            ChunkingStrategyKind::Semantic
        );
        assert_eq!(
            select_strategy(DocumentType::Tutorial),
            ChunkingStrategyKind::Hierarchical
        );
        assert_eq!(
            select_strategy(DocumentType::Code),
            ChunkingStrategyKind::CodeAware
        );
        assert_eq!(
            select_strategy(DocumentType::Generic),
            ChunkingStrategyKind::FixedSize
        );
    }

    #[test]
    fn test_selector_is_deterministic() {
        for doc_type in DocumentType::all() {
            assert_eq!(select_strategy(*doc_type), select_strategy(*doc_type));
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(ChunkingConfig::new(512).validate().is_ok());
        assert!(ChunkingConfig::new(0).validate().is_err());
        assert!(ChunkingConfig::new(100).with_overlap(100).validate().is_err());
        assert!(ChunkingConfig::new(100).with_overlap(99).validate().is_ok());
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ChunkingStrategyKind::CodeAware).unwrap(),
            "\"code_aware\""
        );
        assert_eq!(
            serde_json::to_string(&ChunkingStrategyKind::FixedSize).unwrap(),
            "\"fixed_size\""
        );
    }
}
