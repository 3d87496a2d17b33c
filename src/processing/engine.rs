//! Scoring pipeline: normalize, vectorize, rank

use crate::config::Config;
use crate::error::Result;
use crate::processing::document::{Corpus, Document, DocumentRole, REFERENCE_ID};
use crate::processing::ranking::{RankAggregator, ResultTable};
use crate::processing::text_processor::TextProcessor;
use crate::processing::vectorizer::TfIdfVectorizer;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Per-document normalization statistics, reported with `--detailed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub id: String,
    pub word_count: usize,
    pub token_count: usize,
}

#[derive(Debug, Clone)]
pub struct RankingRun {
    pub table: ResultTable,
    pub vocabulary_size: usize,
    pub document_stats: Vec<DocumentStats>,
}

/// Owns the normalization context and scorer settings for a scoring run.
pub struct RankingEngine {
    processor: TextProcessor,
    vectorizer: TfIdfVectorizer,
    aggregator: RankAggregator,
}

impl RankingEngine {
    pub fn new(config: &Config) -> Result<Self> {
        config.thresholds.validate()?;

        Ok(Self {
            processor: TextProcessor::new(&config.normalization)?,
            vectorizer: TfIdfVectorizer::new(&config.vectorizer),
            aggregator: RankAggregator::new(config.thresholds),
        })
    }

    /// Rank every `(identifier, raw_text)` candidate against the reference text.
    pub fn rank<S, T>(&self, reference_text: &str, candidates: &[(S, T)]) -> Result<RankingRun>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let reference = Document::new(REFERENCE_ID, DocumentRole::Reference, reference_text, &self.processor);
        let documents = candidates
            .iter()
            .map(|(id, text)| Document::new(id.as_ref(), DocumentRole::Candidate, text.as_ref(), &self.processor))
            .collect();
        let corpus = Corpus::new(reference, documents)?;

        info!("Scoring {} candidates", corpus.candidates().len());

        let texts = corpus.texts();
        let (scores, vocabulary_size) = self.vectorizer.score_against_reference(texts[0], &texts[1..]);

        let scored: Vec<(String, f64)> = corpus
            .candidates()
            .iter()
            .zip(scores)
            .map(|(doc, score)| {
                debug!("{}: {:.4}", doc.id(), score);
                (doc.id().to_string(), score)
            })
            .collect();

        let document_stats = std::iter::once(corpus.reference())
            .chain(corpus.candidates().iter())
            .map(|doc| DocumentStats {
                id: doc.id().to_string(),
                word_count: doc.word_count(),
                token_count: doc.token_count(),
            })
            .collect();

        Ok(RankingRun {
            table: self.aggregator.aggregate(scored),
            vocabulary_size,
            document_stats,
        })
    }

    pub fn score_candidates<S, T>(&self, reference_text: &str, candidates: &[(S, T)]) -> Result<ResultTable>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Ok(self.rank(reference_text, candidates)?.table)
    }
}

/// Score candidates with the default configuration.
pub fn score_candidates<S, T>(reference_text: &str, candidates: &[(S, T)]) -> Result<ResultTable>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    RankingEngine::new(&Config::default())?.score_candidates(reference_text, candidates)
}
