//! Report structures wrapping a ranked result table

use crate::processing::engine::{DocumentStats, RankingRun};
use crate::processing::ranking::{Interpretation, ResultTable};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// A ranked result table with the metadata of the run that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,

    pub results: ResultTable,

    /// Normalization statistics, reference first (only filled for detailed output)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub document_stats: Vec<DocumentStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: SystemTime,

    /// Version of the ranker used
    pub ranker_version: String,

    /// Job description file ranked against
    pub job_file: String,

    pub candidate_count: usize,

    /// Distinct terms across the job description and all resumes
    pub vocabulary_size: usize,

    /// Total processing time
    pub processing_time_ms: u64,
}

/// Number of candidates per interpretation label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub low: usize,
}

impl RankingReport {
    pub fn new(run: RankingRun, job_file: impl Into<String>, processing_time_ms: u64, detailed: bool) -> Self {
        let metadata = ReportMetadata {
            generated_at: SystemTime::now(),
            ranker_version: env!("CARGO_PKG_VERSION").to_string(),
            job_file: job_file.into(),
            candidate_count: run.table.len(),
            vocabulary_size: run.vocabulary_size,
            processing_time_ms,
        };

        Self {
            metadata,
            results: run.table,
            document_stats: if detailed { run.document_stats } else { Vec::new() },
        }
    }

    pub fn label_counts(&self) -> LabelCounts {
        let mut counts = LabelCounts::default();
        for record in &self.results {
            match record.interpretation {
                Interpretation::Excellent => counts.excellent += 1,
                Interpretation::Good => counts.good += 1,
                Interpretation::Average => counts.average += 1,
                Interpretation::Low => counts.low += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ranking::RankAggregator;

    fn run() -> RankingRun {
        RankingRun {
            table: RankAggregator::default().aggregate(vec![
                ("a.pdf".to_string(), 0.81),
                ("b.txt".to_string(), 0.55),
                ("c.md".to_string(), 0.1),
                ("d.md".to_string(), 0.0),
            ]),
            vocabulary_size: 42,
            document_stats: vec![DocumentStats {
                id: "job description".to_string(),
                word_count: 10,
                token_count: 7,
            }],
        }
    }

    #[test]
    fn test_report_metadata() {
        let report = RankingReport::new(run(), "job.txt", 12, false);

        assert_eq!(report.metadata.candidate_count, 4);
        assert_eq!(report.metadata.vocabulary_size, 42);
        assert_eq!(report.metadata.job_file, "job.txt");
        assert!(report.document_stats.is_empty());
    }

    #[test]
    fn test_label_counts() {
        let report = RankingReport::new(run(), "job.txt", 0, true);

        assert_eq!(
            report.label_counts(),
            LabelCounts { excellent: 1, good: 1, average: 0, low: 2 }
        );
        assert_eq!(report.document_stats.len(), 1);
    }
}
