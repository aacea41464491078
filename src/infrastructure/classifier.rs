//! Rule-based document classifier
//!
//! Scores a document against weighted lexical and structural signatures for
//! every supported type in a single scan, then picks the strictly highest
//! score. Ties break by the priority order of [`DocumentType`]; scores below
//! the threshold fall back to [`DocumentType::Generic`].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::RegexSet;

use crate::domain::chunking::{ClassificationResult, DocumentType};

/// One detection signature: a pattern and the weight it contributes when it
/// matches anywhere in the document.
struct Signature {
    doc_type: DocumentType,
    weight: u32,
    pattern: &'static str,
}

const fn sig(doc_type: DocumentType, weight: u32, pattern: &'static str) -> Signature {
    Signature {
        doc_type,
        weight,
        pattern,
    }
}

// Weights are tunable constants: structural markers (a code fence, a route
// line, a ticket field) outweigh single keywords. Tests assert relative
// ordering only, not exact scores.
static SIGNATURES: &[Signature] = &[
    // Code
    sig(DocumentType::Code, 3, r"```"),
    sig(
        DocumentType::Code,
        2,
        r"(?im)^\s*(def|class|fn|function|import|from|pub|impl)\b",
    ),
    sig(
        DocumentType::Code,
        1,
        r"(?i)\b(javascript|python|java|rust|c\+\+|sql)\b",
    ),
    sig(DocumentType::Code, 1, r"(?m)^(    |\t)\S"),
    // API reference
    sig(
        DocumentType::ApiReference,
        3,
        r"(?im)^\s*(get|post|put|delete|patch)\s+/",
    ),
    sig(
        DocumentType::ApiReference,
        1,
        r"(?i)\b(endpoint|rest|graphql|request|response|parameter)\b",
    ),
    sig(
        DocumentType::ApiReference,
        1,
        r"(?i)\b(json|xml|swagger|openapi)\b",
    ),
    sig(
        DocumentType::ApiReference,
        1,
        r"(?i)\b(authentication|authorization|token)\b",
    ),
    // Support ticket
    sig(
        DocumentType::SupportTicket,
        3,
        r"(?im)^(priority|status|severity|assignee|reported by)\s*:",
    ),
    sig(DocumentType::SupportTicket, 3, r"(?i)\bsteps to reproduce\b"),
    sig(
        DocumentType::SupportTicket,
        1,
        r"(?i)\b(issue|problem|bug|error|ticket)\b",
    ),
    sig(
        DocumentType::SupportTicket,
        1,
        r"(?i)\b(workaround|solution|customer|reported)\b",
    ),
    // Policy
    sig(
        DocumentType::Policy,
        2,
        r"(?i)\b(shall|must comply|mandatory|prohibited)\b",
    ),
    sig(
        DocumentType::Policy,
        1,
        r"(?i)\b(policy|procedure|guideline|compliance)\b",
    ),
    sig(
        DocumentType::Policy,
        1,
        r"(?i)\b(approval|review|governance|standard)\b",
    ),
    // Technical doc
    sig(DocumentType::TechnicalDoc, 2, r"(?m)^#{1,6}\s"),
    sig(
        DocumentType::TechnicalDoc,
        1,
        r"(?i)\b(architecture|design|implementation|configuration)\b",
    ),
    sig(
        DocumentType::TechnicalDoc,
        1,
        r"(?i)\b(system|component|module|service)\b",
    ),
    sig(
        DocumentType::TechnicalDoc,
        1,
        r"(?i)\b(requirements|specifications|technical)\b",
    ),
    // Tutorial
    sig(
        DocumentType::Tutorial,
        2,
        r"(?i)\b(tutorial|how-to|step-by-step|walkthrough)\b",
    ),
    sig(DocumentType::Tutorial, 1, r"(?m)^\s*\d+\.\s"),
    sig(
        DocumentType::Tutorial,
        1,
        r"(?i)\b(example|demo|getting started)\b",
    ),
    sig(
        DocumentType::Tutorial,
        1,
        r"(?i)\b(learn|install|setup|configure)\b",
    ),
];

// One compiled set so every signature is tested in a single scan over the
// document, keeping classification linear in document length.
static SIGNATURE_SET: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new(SIGNATURES.iter().map(|s| s.pattern))
        .unwrap_or_else(|e| panic!("invalid classifier signature: {}", e))
});

/// Rule-based classifier over the signature table
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    threshold: u32,
}

impl DocumentClassifier {
    /// Classifier with the given score threshold
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// Classify raw text. Total: never fails, empty input included.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let mut scores: BTreeMap<DocumentType, u32> =
            DocumentType::scored().iter().map(|t| (*t, 0)).collect();

        if !text.trim().is_empty() {
            for index in SIGNATURE_SET.matches(text) {
                let signature = &SIGNATURES[index];
                *scores.entry(signature.doc_type).or_insert(0) += signature.weight;
            }
        }

        // Priority order of the enumeration breaks ties: only a strictly
        // higher score displaces an earlier (more specific) type.
        let mut best_type = DocumentType::scored()[0];
        let mut best_score = scores[&best_type];

        for doc_type in DocumentType::scored() {
            let score = scores[doc_type];

            if score > best_score {
                best_type = *doc_type;
                best_score = score;
            }
        }

        if best_score >= self.threshold && best_score > 0 {
            ClassificationResult::matched(best_type, best_score, scores)
        } else {
            ClassificationResult::fallback(best_score, scores)
        }
    }
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new(2)
    }
}
