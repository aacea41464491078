//! Document processing orchestrator
//!
//! Ties classification, strategy selection and chunk stamping together.
//! `process` is total: any malformed, empty or unchunkable input yields a
//! zero-chunk result with a recorded reason, never an error.

use std::sync::Arc;
use std::time::Instant;

use sha2::{Digest, Sha256};

use crate::domain::chunking::{
    select_strategy, ChunkRecord, ChunkingStrategy, ChunkingStrategyKind, ClassificationResult,
    Document, DocumentType, EngineConfig, ProcessingResult, TokenCounter,
};
use crate::domain::DomainError;
use crate::infrastructure::chunkers::{
    CodeAwareChunker, FixedSizeChunker, HierarchicalChunker, SemanticChunker,
};
use crate::infrastructure::classifier::DocumentClassifier;
use crate::infrastructure::observability::record_document_processed;
use crate::infrastructure::tokenizer::Cl100kTokenCounter;

/// Orchestrates the classify, select, chunk pipeline over one shared
/// tokenizer and one strategy instance per kind.
#[derive(Debug)]
pub struct IntelligentChunker {
    classifier: DocumentClassifier,
    config: EngineConfig,
    semantic: SemanticChunker,
    code_aware: CodeAwareChunker,
    hierarchical: HierarchicalChunker,
    fixed_size: FixedSizeChunker,
}

impl IntelligentChunker {
    /// Build an orchestrator over the cl100k tokenizer
    pub fn new(config: EngineConfig) -> Result<Self, DomainError> {
        Self::with_counter(config, Arc::new(Cl100kTokenCounter::new()))
    }

    /// Build an orchestrator over an explicit token counter
    pub fn with_counter(
        config: EngineConfig,
        counter: Arc<dyn TokenCounter>,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        Ok(Self {
            classifier: DocumentClassifier::new(config.classification_threshold),
            semantic: SemanticChunker::new(Arc::clone(&counter)),
            code_aware: CodeAwareChunker::new(Arc::clone(&counter)),
            hierarchical: HierarchicalChunker::new(Arc::clone(&counter)),
            fixed_size: FixedSizeChunker::new(counter),
            config,
        })
    }

    /// Classify raw text without chunking it
    pub fn classify(&self, content: &str) -> ClassificationResult {
        self.classifier.classify(content)
    }

    /// Run the full pipeline over one document. Never fails.
    pub fn process(&self, document: &Document) -> ProcessingResult {
        let started = Instant::now();
        let document_id = self.document_id(document);

        if document.is_blank() {
            tracing::debug!(document_id = %document_id, "Skipping blank document");

            return ProcessingResult::skipped(
                document_id,
                ClassificationResult::fallback(0, Default::default()),
                ChunkingStrategyKind::FixedSize,
                "document is empty or whitespace-only",
            )
            .with_duration_ms(started.elapsed().as_millis() as u64);
        }

        let mut classification = self.classifier.classify(&document.content);

        // A filename extension is a supplemental signal: it decides only
        // when content signatures were inconclusive.
        if classification.is_fallback() {
            if let Some(hint) = document
                .filename
                .as_deref()
                .and_then(DocumentType::from_filename)
            {
                tracing::debug!(
                    document_id = %document_id,
                    hint = %hint,
                    "Classification below threshold, using filename hint"
                );
                classification.document_type = hint;
            }
        }

        let strategy_kind = select_strategy(classification.document_type);
        let chunking_config = self.config.budget_for(strategy_kind);

        tracing::debug!(
            document_id = %document_id,
            document_type = %classification.document_type,
            confidence = classification.confidence,
            strategy = %strategy_kind,
            max_tokens = chunking_config.max_tokens,
            "Processing document"
        );

        let chunks = match self
            .strategy(strategy_kind)
            .chunk(&document.content, &chunking_config)
        {
            Ok(chunks) => chunks,
            Err(e) => {
                tracing::warn!(
                    document_id = %document_id,
                    strategy = %strategy_kind,
                    error = %e,
                    "Chunking failed, returning zero-chunk result"
                );

                return ProcessingResult::skipped(
                    document_id,
                    classification,
                    strategy_kind,
                    format!("chunking failed: {}", e),
                )
                .with_duration_ms(started.elapsed().as_millis() as u64);
            }
        };

        let records: Vec<ChunkRecord> = chunks
            .into_iter()
            .map(|chunk| {
                ChunkRecord::stamp(
                    chunk,
                    &document_id,
                    classification.document_type,
                    strategy_kind,
                )
            })
            .collect();

        let duration = started.elapsed();

        tracing::info!(
            document_id = %document_id,
            document_type = %classification.document_type,
            strategy = %strategy_kind,
            chunks = records.len(),
            duration_ms = duration.as_millis() as u64,
            "Document processed"
        );

        record_document_processed(
            classification.document_type.as_str(),
            strategy_kind.as_str(),
            records.len() as u64,
            duration,
        );

        ProcessingResult::new(document_id, classification, strategy_kind, records)
            .with_duration_ms(duration.as_millis() as u64)
    }

    /// Supported document types, in classification priority order
    pub fn supported_document_types(&self) -> &'static [DocumentType] {
        DocumentType::all()
    }

    /// Available chunking strategies
    pub fn supported_strategies(&self) -> &'static [ChunkingStrategyKind] {
        ChunkingStrategyKind::all()
    }

    fn strategy(&self, kind: ChunkingStrategyKind) -> &dyn ChunkingStrategy {
        match kind {
            ChunkingStrategyKind::Semantic => &self.semantic,
            ChunkingStrategyKind::CodeAware => &self.code_aware,
            ChunkingStrategyKind::Hierarchical => &self.hierarchical,
            ChunkingStrategyKind::FixedSize => &self.fixed_size,
        }
    }

    /// Caller-supplied id wins; otherwise derive a stable one from content
    fn document_id(&self, document: &Document) -> String {
        if let Some(ref id) = document.id {
            return id.clone();
        }

        let digest = Sha256::digest(document.content.as_bytes());
        hex::encode(&digest[..4])
    }
}
