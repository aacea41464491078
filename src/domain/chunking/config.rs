//! Static engine configuration, loaded once and immutable thereafter

use serde::{Deserialize, Serialize};

use super::strategy::{ChunkingConfig, ChunkingStrategyKind};
use crate::domain::DomainError;

/// Configuration for the classification + chunking engine.
///
/// Validated at orchestrator construction; never mutated per request, so
/// arbitrarily many `process` calls can run in parallel against the same
/// instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum aggregate signature score a type needs to beat the fallback
    pub classification_threshold: u32,
    /// Token budget for the semantic strategy
    pub semantic_max_tokens: usize,
    /// Token budget for the code-aware strategy
    pub code_aware_max_tokens: usize,
    /// Token budget for the hierarchical strategy
    pub hierarchical_max_tokens: usize,
    /// Token budget for the fixed-size strategy
    pub fixed_size_max_tokens: usize,
    /// Trailing tokens the fixed-size strategy repeats across windows
    pub fixed_size_overlap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            classification_threshold: 2,
            semantic_max_tokens: 512,
            code_aware_max_tokens: 512,
            hierarchical_max_tokens: 512,
            fixed_size_max_tokens: 256,
            fixed_size_overlap: 32,
        }
    }
}

impl EngineConfig {
    /// The chunking configuration for a strategy kind
    pub fn budget_for(&self, kind: ChunkingStrategyKind) -> ChunkingConfig {
        match kind {
            ChunkingStrategyKind::Semantic => ChunkingConfig::new(self.semantic_max_tokens),
            ChunkingStrategyKind::CodeAware => ChunkingConfig::new(self.code_aware_max_tokens),
            ChunkingStrategyKind::Hierarchical => {
                ChunkingConfig::new(self.hierarchical_max_tokens)
            }
            ChunkingStrategyKind::FixedSize => {
                ChunkingConfig::new(self.fixed_size_max_tokens).with_overlap(self.fixed_size_overlap)
            }
        }
    }

    /// Validate every per-strategy budget
    pub fn validate(&self) -> Result<(), DomainError> {
        for kind in ChunkingStrategyKind::all() {
            self.budget_for(*kind).validate().map_err(|e| {
                DomainError::configuration(format!("{} strategy: {}", kind, e))
            })?;
        }

        Ok(())
    }
}
