//! Intelligent Document Chunking API
//!
//! Classification-driven adaptive chunking for retrieval pipelines:
//! - Rule-based document classification over weighted signatures
//! - Strategy selection per document type (semantic, code-aware,
//!   hierarchical, fixed-size)
//! - Token-budgeted chunks with boundary and heading-path metadata

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::chunking::{Document, ProcessingResult};
pub use infrastructure::services::IntelligentChunker;
