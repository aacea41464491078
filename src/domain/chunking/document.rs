//! Document value object and the closed set of document types

use serde::{Deserialize, Serialize};

/// Classified document types.
///
/// Declaration order is the tie-break priority used by the classifier:
/// more specific types come first, so a score tie resolves to the most
/// specific candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Code,
    ApiReference,
    SupportTicket,
    Policy,
    TechnicalDoc,
    Tutorial,
    /// Fallback when no type reaches the classification threshold
    Generic,
}

impl DocumentType {
    /// All types in tie-break priority order, fallback last
    pub fn all() -> &'static [DocumentType] {
        &[
            DocumentType::Code,
            DocumentType::ApiReference,
            DocumentType::SupportTicket,
            DocumentType::Policy,
            DocumentType::TechnicalDoc,
            DocumentType::Tutorial,
            DocumentType::Generic,
        ]
    }

    /// Types the classifier scores against (everything except the fallback)
    pub fn scored() -> &'static [DocumentType] {
        &DocumentType::all()[..6]
    }

    /// Stable string identifier, matches the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Code => "code",
            DocumentType::ApiReference => "api_reference",
            DocumentType::SupportTicket => "support_ticket",
            DocumentType::Policy => "policy",
            DocumentType::TechnicalDoc => "technical_doc",
            DocumentType::Tutorial => "tutorial",
            DocumentType::Generic => "generic",
        }
    }

    /// Guess a type from a filename alone.
    ///
    /// Mirrors the filename checks the content classifier cannot make:
    /// source-file extensions imply code, and a few well-known name
    /// fragments imply their document family.
    pub fn from_filename(filename: &str) -> Option<DocumentType> {
        let name = filename.to_lowercase();

        const CODE_EXTENSIONS: &[&str] = &[
            ".py", ".js", ".ts", ".java", ".cpp", ".c", ".rs", ".go", ".sql", ".sh",
        ];

        if CODE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            return Some(DocumentType::Code);
        }

        if name.contains("api") || name.contains("swagger") || name.contains("openapi") {
            return Some(DocumentType::ApiReference);
        }

        if name.contains("policy") || name.contains("procedure") {
            return Some(DocumentType::Policy);
        }

        if name.contains("tutorial") || name.contains("guide") {
            return Some(DocumentType::Tutorial);
        }

        None
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document submitted for processing.
///
/// Immutable once handed to the orchestrator; one `Document` produces one
/// `ProcessingResult` and nothing persists across requests.
#[derive(Debug, Clone)]
pub struct Document {
    /// Raw text content
    pub content: String,
    /// Optional filename, used as a classification hint
    pub filename: Option<String>,
    /// Caller-supplied identifier; generated from the content when absent
    pub id: Option<String>,
}

impl Document {
    /// Create a document from raw text
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: None,
            id: None,
        }
    }

    /// Attach a filename hint
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Attach a caller-supplied identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// True when the content is empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_most_specific_first() {
        let all = DocumentType::all();
        assert_eq!(all[0], DocumentType::Code);
        assert_eq!(all[1], DocumentType::ApiReference);
        assert_eq!(all[all.len() - 1], DocumentType::Generic);
    }

    #[test]
    fn test_scored_excludes_fallback() {
        assert!(!DocumentType::scored().contains(&DocumentType::Generic));
        assert_eq!(DocumentType::scored().len(), 6);
    }

    #[test]
    fn test_serde_representation_matches_as_str() {
        for doc_type in DocumentType::all() {
            let json = serde_json::to_string(doc_type).unwrap();
            assert_eq!(json, format!("\"{}\"", doc_type.as_str()));
        }
    }

    #[test]
    fn test_from_filename_code_extension() {
        assert_eq!(
            DocumentType::from_filename("handlers.py"),
            Some(DocumentType::Code)
        );
        assert_eq!(
            DocumentType::from_filename("main.rs"),
            Some(DocumentType::Code)
        );
    }

    #[test]
    fn test_from_filename_name_fragments() {
        assert_eq!(
            DocumentType::from_filename("swagger.yaml"),
            Some(DocumentType::ApiReference)
        );
        assert_eq!(
            DocumentType::from_filename("security-policy.md"),
            Some(DocumentType::Policy)
        );
        assert_eq!(
            DocumentType::from_filename("setup-guide.md"),
            Some(DocumentType::Tutorial)
        );
    }

    #[test]
    fn test_from_filename_no_hint() {
        assert_eq!(DocumentType::from_filename("notes.txt"), None);
        assert_eq!(DocumentType::from_filename("README.md"), None);
    }

    #[test]
    fn test_document_is_blank() {
        assert!(Document::new("").is_blank());
        assert!(Document::new("  \n\t ").is_blank());
        assert!(!Document::new("text").is_blank());
    }

    #[test]
    fn test_document_builder() {
        let doc = Document::new("content")
            .with_filename("doc.md")
            .with_id("doc-1");

        assert_eq!(doc.filename.as_deref(), Some("doc.md"));
        assert_eq!(doc.id.as_deref(), Some("doc-1"));
    }
}
