//! Text normalization, vectorization and ranking

pub mod document;
pub mod engine;
pub mod lemmatizer;
pub mod ranking;
pub mod text_processor;
pub mod vectorizer;

pub use engine::{score_candidates, RankingEngine, RankingRun};
pub use ranking::{Interpretation, ResultTable, ScoreRecord};
