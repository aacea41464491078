//! Application services

mod chunking_service;

pub use chunking_service::IntelligentChunker;
