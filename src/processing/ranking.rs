//! Score interpretation and ranking

use crate::config::ScoreThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpretation {
    Excellent,
    Good,
    Average,
    Low,
}

impl Interpretation {
    /// First label whose inclusive lower bound the score reaches.
    pub fn from_score(score: f64, thresholds: &ScoreThresholds) -> Self {
        if score >= thresholds.excellent {
            Interpretation::Excellent
        } else if score >= thresholds.good {
            Interpretation::Good
        } else if score >= thresholds.average {
            Interpretation::Average
        } else {
            Interpretation::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interpretation::Excellent => "Excellent",
            Interpretation::Good => "Good",
            Interpretation::Average => "Average",
            Interpretation::Low => "Low",
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interpretation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "excellent" => Ok(Interpretation::Excellent),
            "good" => Ok(Interpretation::Good),
            "average" => Ok(Interpretation::Average),
            "low" => Ok(Interpretation::Low),
            _ => Err(format!("Unknown interpretation: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub candidate: String,
    /// Rounded to three decimals
    pub score: f64,
    pub interpretation: Interpretation,
}

/// Round to three decimals, half away from zero.
///
/// Rounds the binary value of `score * 1000`, not its decimal spelling: a
/// literal such as `0.5005` is stored just below the midpoint and rounds down.
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Score records sorted best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTable {
    records: Vec<ScoreRecord>,
}

impl ResultTable {
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn top(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoreRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ScoreRecord;
    type IntoIter = std::slice::Iter<'a, ScoreRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RankAggregator {
    thresholds: ScoreThresholds,
}

impl RankAggregator {
    pub fn new(thresholds: ScoreThresholds) -> Self {
        Self { thresholds }
    }

    /// Label every score and sort descending by rounded score.
    ///
    /// `Vec::sort_by` is stable, so candidates that display the same score
    /// keep their input order.
    pub fn aggregate(&self, scored: Vec<(String, f64)>) -> ResultTable {
        let mut records: Vec<ScoreRecord> = scored
            .into_iter()
            .map(|(candidate, raw)| ScoreRecord {
                candidate,
                score: round_score(raw),
                interpretation: Interpretation::from_score(raw, &self.thresholds),
            })
            .collect();

        records.sort_by(|a, b| b.score.total_cmp(&a.score));

        ResultTable { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_boundaries() {
        let thresholds = ScoreThresholds::default();
        let cases = [
            (1.0, Interpretation::Excellent),
            (0.75, Interpretation::Excellent),
            (0.7499, Interpretation::Good),
            (0.5, Interpretation::Good),
            (0.4999, Interpretation::Average),
            (0.3, Interpretation::Average),
            (0.2999, Interpretation::Low),
            (0.0, Interpretation::Low),
        ];

        for (score, expected) in cases {
            assert_eq!(Interpretation::from_score(score, &thresholds), expected, "score {}", score);
        }
    }

    #[test]
    fn test_label_uses_unrounded_score() {
        let table = RankAggregator::default().aggregate(vec![("a".to_string(), 0.74996)]);
        let record = table.top().unwrap();

        assert_eq!(record.score, 0.75);
        assert_eq!(record.interpretation, Interpretation::Good);
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.85312), 0.853);
        assert_eq!(round_score(0.1026), 0.103);
        assert_eq!(round_score(0.0), 0.0);
        assert_eq!(round_score(1.0), 1.0);
    }

    #[test]
    fn test_round_score_follows_binary_value_at_midpoints() {
        // 0.1235 * 1000 is exactly 123.5
        assert_eq!(round_score(0.1235), 0.124);
        assert_eq!(round_score(0.0005), 0.001);
        // 0.5005 * 1000 is 500.49999999999994
        assert_eq!(round_score(0.5005), 0.5);
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let table = RankAggregator::default().aggregate(vec![
            ("first".to_string(), 0.4),
            ("second".to_string(), 0.9),
            ("third".to_string(), 0.4),
            ("fourth".to_string(), 0.40001),
            ("fifth".to_string(), 0.0),
        ]);

        let order: Vec<&str> = table.iter().map(|r| r.candidate.as_str()).collect();
        assert_eq!(order, vec!["second", "first", "third", "fourth", "fifth"]);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_interpretation_round_trips_through_text() {
        for label in [Interpretation::Excellent, Interpretation::Good, Interpretation::Average, Interpretation::Low] {
            assert_eq!(label.to_string().parse::<Interpretation>().unwrap(), label);
        }
        assert!("Great".parse::<Interpretation>().is_err());
    }

    #[test]
    fn test_custom_thresholds() {
        let aggregator = RankAggregator::new(ScoreThresholds {
            excellent: 0.9,
            good: 0.6,
            average: 0.1,
        });
        let table = aggregator.aggregate(vec![("a".to_string(), 0.8), ("b".to_string(), 0.2)]);

        assert_eq!(table.records()[0].interpretation, Interpretation::Good);
        assert_eq!(table.records()[1].interpretation, Interpretation::Average);
    }

    #[test]
    fn test_empty_table() {
        let table = RankAggregator::default().aggregate(Vec::new());
        assert!(table.is_empty());
        assert!(table.top().is_none());
    }
}
