//! Document structures for a scoring run

use crate::error::{Result, ResumeRankerError};
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};

pub const REFERENCE_ID: &str = "job description";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentRole {
    Reference,
    Candidate,
}

/// A document after normalization. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: String,
    role: DocumentRole,
    raw_text: String,
    normalized: String,
    word_count: usize,
    token_count: usize,
}

impl Document {
    pub fn new(id: impl Into<String>, role: DocumentRole, raw_text: impl Into<String>, processor: &TextProcessor) -> Self {
        let raw_text = raw_text.into();
        let processed = processor.process(&raw_text);

        Self {
            id: id.into(),
            role,
            raw_text,
            normalized: processed.normalized,
            word_count: processed.word_count,
            token_count: processed.tokens.len(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> DocumentRole {
        self.role
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }
}

/// The reference document followed by every candidate, in input order.
#[derive(Debug, Clone)]
pub struct Corpus {
    reference: Document,
    candidates: Vec<Document>,
}

impl Corpus {
    pub fn new(reference: Document, candidates: Vec<Document>) -> Result<Self> {
        if candidates.is_empty() {
            return Err(ResumeRankerError::EmptyInput);
        }
        if reference.role() != DocumentRole::Reference
            || candidates.iter().any(|doc| doc.role() != DocumentRole::Candidate)
        {
            return Err(ResumeRankerError::InvalidInput(
                "Corpus needs one reference document followed by candidates".to_string(),
            ));
        }

        Ok(Self { reference, candidates })
    }

    pub fn reference(&self) -> &Document {
        &self.reference
    }

    pub fn candidates(&self) -> &[Document] {
        &self.candidates
    }

    /// Normalized texts with the reference at index 0.
    pub fn texts(&self) -> Vec<&str> {
        std::iter::once(&self.reference)
            .chain(self.candidates.iter())
            .map(Document::normalized)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizationConfig;

    fn processor() -> TextProcessor {
        TextProcessor::new(&NormalizationConfig::default()).unwrap()
    }

    #[test]
    fn test_document_normalized_on_creation() {
        let doc = Document::new("a.txt", DocumentRole::Candidate, "Managed the Databases", &processor());

        assert_eq!(doc.id(), "a.txt");
        assert_eq!(doc.raw_text(), "Managed the Databases");
        assert_eq!(doc.normalized(), "manage database");
        assert_eq!(doc.word_count(), 3);
        assert_eq!(doc.token_count(), 2);
    }

    #[test]
    fn test_corpus_orders_reference_first() {
        let processor = processor();
        let reference = Document::new(REFERENCE_ID, DocumentRole::Reference, "rust engineer", &processor);
        let candidates = vec![
            Document::new("a", DocumentRole::Candidate, "golang engineer", &processor),
            Document::new("b", DocumentRole::Candidate, "", &processor),
        ];

        let corpus = Corpus::new(reference, candidates).unwrap();
        assert_eq!(corpus.texts(), vec!["rust engineer", "golang engineer", ""]);
        assert_eq!(corpus.candidates().len(), 2);
        assert_eq!(corpus.reference().id(), REFERENCE_ID);
    }

    #[test]
    fn test_corpus_without_candidates() {
        let reference = Document::new(REFERENCE_ID, DocumentRole::Reference, "rust", &processor());
        let result = Corpus::new(reference, Vec::new());

        assert!(matches!(result, Err(ResumeRankerError::EmptyInput)));
    }
}
