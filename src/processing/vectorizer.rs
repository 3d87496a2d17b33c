//! TF-IDF vectorization and cosine similarity

use crate::config::VectorizerConfig;
use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView1};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    min_token_len: usize,
    smooth_idf: bool,
    sublinear_tf: bool,
}

/// Weighted document-term matrix; one L2-normalized row per document.
#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    vocabulary: Vec<String>,
    idf: Array1<f64>,
    weights: Array2<f64>,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new(&VectorizerConfig::default())
    }
}

impl TfIdfVectorizer {
    pub fn new(config: &VectorizerConfig) -> Self {
        Self {
            min_token_len: config.min_token_len,
            smooth_idf: config.smooth_idf,
            sublinear_tf: config.sublinear_tf,
        }
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace()
            .filter(|token| token.chars().count() >= self.min_token_len)
            .collect()
    }

    /// Build the vocabulary over every document and weight each row.
    pub fn fit_transform(&self, documents: &[&str]) -> TfIdfMatrix {
        let tokenized: Vec<Vec<&str>> = documents.iter().map(|doc| self.tokenize(doc)).collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.clone();
            seen.sort_unstable();
            seen.dedup();
            for token in seen {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        // BTreeMap iteration gives the sorted vocabulary
        let vocabulary: Vec<String> = document_frequency.keys().map(|t| t.to_string()).collect();
        let column: BTreeMap<&str, usize> = document_frequency
            .keys()
            .enumerate()
            .map(|(index, &token)| (token, index))
            .collect();

        let n_docs = documents.len() as f64;
        let idf: Array1<f64> = document_frequency
            .values()
            .map(|&df| {
                let df = df as f64;
                if self.smooth_idf {
                    ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
                } else {
                    (n_docs / df).ln() + 1.0
                }
            })
            .collect();

        let mut weights = Array2::<f64>::zeros((documents.len(), vocabulary.len()));
        for (row, tokens) in tokenized.iter().enumerate() {
            for token in tokens {
                if let Some(&col) = column.get(token) {
                    weights[[row, col]] += 1.0;
                }
            }
        }

        if self.sublinear_tf {
            weights.mapv_inplace(|count| if count > 0.0 { 1.0 + count.ln() } else { 0.0 });
        }

        for mut row in weights.rows_mut() {
            row *= &idf;
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }

        debug!(
            "Vectorized {} documents over a vocabulary of {} terms",
            documents.len(),
            vocabulary.len()
        );

        TfIdfMatrix { vocabulary, idf, weights }
    }

    /// Similarity of each candidate to the reference, in candidate order.
    pub fn score_against_reference(&self, reference: &str, candidates: &[&str]) -> (Vec<f64>, usize) {
        let mut documents = Vec::with_capacity(candidates.len() + 1);
        documents.push(reference);
        documents.extend_from_slice(candidates);

        let matrix = self.fit_transform(&documents);
        if matrix.vocabulary_size() == 0 {
            warn!("Vocabulary is empty after normalization; every candidate scores 0");
        }

        (matrix.similarities_to_first(), matrix.vocabulary_size())
    }
}

impl TfIdfMatrix {
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf(&self) -> &Array1<f64> {
        &self.idf
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn n_documents(&self) -> usize {
        self.weights.nrows()
    }

    /// Cosine similarity between row 0 and every following row, clamped to [0, 1].
    pub fn similarities_to_first(&self) -> Vec<f64> {
        if self.weights.nrows() == 0 {
            return Vec::new();
        }

        let reference = self.weights.row(0);
        self.weights
            .rows()
            .into_iter()
            .skip(1)
            .map(|row| cosine_similarity(reference, row).clamp(0.0, 1.0))
            .collect()
    }
}

/// Cosine similarity; 0 when either vector has zero norm.
pub fn cosine_similarity(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    a.dot(&b) / (norm_a * norm_b)
}
