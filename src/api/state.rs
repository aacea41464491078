//! Shared application state

use std::sync::Arc;

use crate::infrastructure::services::IntelligentChunker;

/// State handed to every handler; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub chunker: Arc<IntelligentChunker>,
}

impl AppState {
    pub fn new(chunker: Arc<IntelligentChunker>) -> Self {
        Self { chunker }
    }
}
