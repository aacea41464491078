//! Document chunking endpoints

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::chunking::{
    select_strategy, ChunkingStrategyKind, Document, DocumentType, ProcessingResult,
};

use super::state::AppState;
use super::types::ApiError;

/// Request body for `POST /chunk`
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkRequest {
    /// Raw document text
    pub content: String,
    /// Optional filename, used as a classification hint
    #[serde(default)]
    pub filename: Option<String>,
    /// Caller-supplied document identifier
    #[serde(default)]
    pub document_id: Option<String>,
}

/// Response body for the chunking endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ChunkingResponse {
    #[serde(flatten)]
    pub result: ProcessingResult,
    pub processing_timestamp: DateTime<Utc>,
}

impl ChunkingResponse {
    fn now(result: ProcessingResult) -> Self {
        Self {
            result,
            processing_timestamp: Utc::now(),
        }
    }
}

/// One row of the `GET /document-types` listing
#[derive(Debug, Clone, Serialize)]
pub struct DocumentTypeInfo {
    pub document_type: DocumentType,
    pub strategy: ChunkingStrategyKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentTypesResponse {
    pub document_types: Vec<DocumentTypeInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategiesResponse {
    pub strategies: Vec<ChunkingStrategyKind>,
}

/// `POST /chunk` - classify and chunk a JSON-submitted document
pub async fn chunk_document(
    State(state): State<AppState>,
    Json(request): Json<ChunkRequest>,
) -> Json<ChunkingResponse> {
    let mut document = Document::new(request.content);

    if let Some(filename) = request.filename {
        document = document.with_filename(filename);
    }

    if let Some(id) = request.document_id {
        document = document.with_id(id);
    }

    Json(ChunkingResponse::now(state.chunker.process(&document)))
}

/// `POST /chunk-file` - classify and chunk an uploaded file.
///
/// The upload must decode as UTF-8 text; anything else is rejected.
pub async fn chunk_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ChunkingResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;

        let content = String::from_utf8(bytes.to_vec())
            .map_err(|_| ApiError::bad_request("file is not valid UTF-8 text").with_param("file"))?;

        let mut document = Document::new(content);

        if let Some(filename) = filename {
            document = document.with_filename(filename);
        }

        return Ok(Json(ChunkingResponse::now(state.chunker.process(&document))));
    }

    Err(ApiError::bad_request("missing multipart field 'file'").with_param("file"))
}

/// `GET /document-types` - supported types and the strategy each maps to
pub async fn list_document_types(State(state): State<AppState>) -> Json<DocumentTypesResponse> {
    let document_types = state
        .chunker
        .supported_document_types()
        .iter()
        .map(|&document_type| DocumentTypeInfo {
            document_type,
            strategy: select_strategy(document_type),
        })
        .collect();

    Json(DocumentTypesResponse { document_types })
}

/// `GET /chunking-strategies` - available strategies
pub async fn list_strategies(State(state): State<AppState>) -> Json<StrategiesResponse> {
    Json(StrategiesResponse {
        strategies: state.chunker.supported_strategies().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_request_minimal_body() {
        let request: ChunkRequest = serde_json::from_str(r#"{"content": "hello"}"#).unwrap();

        assert_eq!(request.content, "hello");
        assert!(request.filename.is_none());
        assert!(request.document_id.is_none());
    }

    #[test]
    fn test_chunk_request_full_body() {
        let body = r#"{"content": "x", "filename": "a.py", "document_id": "doc-1"}"#;
        let request: ChunkRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.filename.as_deref(), Some("a.py"));
        assert_eq!(request.document_id.as_deref(), Some("doc-1"));
    }

    #[test]
    fn test_response_flattens_result() {
        use crate::domain::chunking::ClassificationResult;

        let result = ProcessingResult::skipped(
            "doc-1",
            ClassificationResult::fallback(0, Default::default()),
            ChunkingStrategyKind::FixedSize,
            "document is empty or whitespace-only",
        );

        let json = serde_json::to_value(ChunkingResponse::now(result)).unwrap();

        assert_eq!(json["document_id"], "doc-1");
        assert!(json["processing_timestamp"].is_string());
        assert_eq!(json["skipped_reason"], "document is empty or whitespace-only");
    }

    #[test]
    fn test_document_type_info_serialization() {
        let info = DocumentTypeInfo {
            document_type: DocumentType::Code,
            strategy: select_strategy(DocumentType::Code),
        };

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["document_type"], "code");
        assert_eq!(json["strategy"], "code_aware");
    }
}
