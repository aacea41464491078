//! Classification result types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::document::DocumentType;

/// Outcome of classifying a document.
///
/// Exactly one type is always chosen; when no score reaches the threshold
/// the fallback type is chosen with the failing score recorded, never an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The winning type (or the fallback)
    pub document_type: DocumentType,
    /// Winning score; monotonic in the number of matched signatures
    pub confidence: u32,
    /// Every score considered, keyed by type
    pub scores: BTreeMap<DocumentType, u32>,
}

impl ClassificationResult {
    /// Result for a winner that met the threshold
    pub fn matched(document_type: DocumentType, confidence: u32, scores: BTreeMap<DocumentType, u32>) -> Self {
        Self {
            document_type,
            confidence,
            scores,
        }
    }

    /// Fallback result recording the best below-threshold score
    pub fn fallback(best_score: u32, scores: BTreeMap<DocumentType, u32>) -> Self {
        Self {
            document_type: DocumentType::Generic,
            confidence: best_score,
            scores,
        }
    }

    /// True when the fallback type was chosen
    pub fn is_fallback(&self) -> bool {
        self.document_type == DocumentType::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matched_result() {
        let mut scores = BTreeMap::new();
        scores.insert(DocumentType::Code, 5);
        scores.insert(DocumentType::Tutorial, 1);

        let result = ClassificationResult::matched(DocumentType::Code, 5, scores);

        assert_eq!(result.document_type, DocumentType::Code);
        assert_eq!(result.confidence, 5);
        assert!(!result.is_fallback());
    }

    #[test]
    fn test_fallback_records_best_score() {
        let result = ClassificationResult::fallback(1, BTreeMap::new());

        assert_eq!(result.document_type, DocumentType::Generic);
        assert_eq!(result.confidence, 1);
        assert!(result.is_fallback());
    }

    #[test]
    fn test_serialization_uses_string_keys() {
        let mut scores = BTreeMap::new();
        scores.insert(DocumentType::ApiReference, 3);

        let result = ClassificationResult::matched(DocumentType::ApiReference, 3, scores);
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("\"document_type\":\"api_reference\""));
        assert!(json.contains("\"api_reference\":3"));
    }
}
