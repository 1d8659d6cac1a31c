//! Sentiment aggregation over a whole result set.
//!
//! The summary is always rebuilt from the current [`ResultSet`]; results are
//! replaced wholesale, so there is no incremental bookkeeping to keep in sync.

use serde::{Deserialize, Serialize};

use crate::sentiment::{round_to_hundredths, Sentiment};
use crate::types::{flatten, ResultSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive_count: usize,
    pub neutral_count: usize,
    pub negative_count: usize,
    pub average_score: f64,
    pub total: usize,
}

/// Percentages for the stacked sentiment bar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SentimentDistribution {
    pub positive_pct: f64,
    pub neutral_pct: f64,
    pub negative_pct: f64,
}

impl SentimentSummary {
    pub fn distribution(&self) -> SentimentDistribution {
        let total = self.total.max(1) as f64;
        SentimentDistribution {
            positive_pct: self.positive_count as f64 / total * 100.0,
            neutral_pct: self.neutral_count as f64 / total * 100.0,
            negative_pct: self.negative_count as f64 / total * 100.0,
        }
    }
}

pub fn summarize(results: &ResultSet) -> SentimentSummary {
    let records = flatten(results);
    let mut summary = SentimentSummary {
        total: records.len(),
        ..SentimentSummary::default()
    };

    for record in &records {
        match record.sentiment() {
            Sentiment::Positive => summary.positive_count += 1,
            Sentiment::Neutral => summary.neutral_count += 1,
            Sentiment::Negative => summary.negative_count += 1,
        }
    }

    if !records.is_empty() {
        let sum: f64 = records.iter().map(|r| r.score()).sum();
        summary.average_score = round_to_hundredths(sum / records.len() as f64);
    }

    summary
}
