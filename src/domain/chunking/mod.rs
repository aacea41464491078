//! Chunking domain - documents, classification, strategies, results

pub mod chunk;
pub mod classify;
pub mod config;
pub mod document;
pub mod result;
pub mod strategy;
pub mod tokenizer;

pub use chunk::{BoundaryKind, Chunk, ChunkMetadata};
pub use classify::ClassificationResult;
pub use config::EngineConfig;
pub use document::{Document, DocumentType};
pub use result::{ChunkRecord, ChunkStats, ProcessingResult};
pub use strategy::{select_strategy, ChunkingConfig, ChunkingStrategy, ChunkingStrategyKind};
pub use tokenizer::{estimate_tokens, TokenCounter};
