use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{Language, Platform, TimeRange};
use crate::sentiment::{classify, Sentiment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub query: String,
    pub range: TimeRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_to: Option<NaiveDate>,
    pub language: Language,
    pub platforms: BTreeSet<Platform>,
}

impl SearchConfig {
    /// The query with surrounding whitespace removed, or `None` when nothing is left.
    pub fn trimmed_query(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    pub fn toggle_platform(&mut self, platform: Platform) {
        if !self.platforms.remove(&platform) {
            self.platforms.insert(platform);
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            range: TimeRange::default(),
            custom_from: None,
            custom_to: None,
            language: Language::default(),
            platforms: Platform::ALL.into_iter().collect(),
        }
    }
}

/// Engagement counters. A source may omit any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub comments: Option<u64>,
    #[serde(default)]
    pub shares: Option<u64>,
    #[serde(default)]
    pub views: Option<u64>,
}

/// One monitored mention. `sentiment` always follows `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordData")]
pub struct Record {
    pub id: String,
    pub source: Platform,
    pub title: String,
    pub url: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub snippet: String,
    score: f64,
    sentiment: Sentiment,
    pub metrics: EngagementMetrics,
}

/// Wire form of a record. Any incoming sentiment label is ignored and
/// re-derived from the score.
#[derive(Deserialize)]
struct RecordData {
    id: String,
    source: Platform,
    title: String,
    url: String,
    author: String,
    published_at: DateTime<Utc>,
    snippet: String,
    score: f64,
    #[serde(default)]
    metrics: EngagementMetrics,
}

impl From<RecordData> for Record {
    fn from(data: RecordData) -> Self {
        Record::new(
            data.id,
            data.source,
            data.title,
            data.url,
            data.author,
            data.published_at,
            data.snippet,
            data.score,
            data.metrics,
        )
    }
}

impl Record {
    /// Builds a record whose sentiment is derived from `score`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        source: Platform,
        title: impl Into<String>,
        url: impl Into<String>,
        author: impl Into<String>,
        published_at: DateTime<Utc>,
        snippet: impl Into<String>,
        score: f64,
        metrics: EngagementMetrics,
    ) -> Self {
        Self {
            id: id.into(),
            source,
            title: title.into(),
            url: url.into(),
            author: author.into(),
            published_at,
            snippet: snippet.into(),
            score,
            sentiment: classify(score),
            metrics,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    /// Replaces the score and re-derives the sentiment label.
    pub fn set_score(&mut self, score: f64) {
        self.score = score;
        self.sentiment = classify(score);
    }

    pub fn has_link(&self) -> bool {
        is_openable_url(&self.url)
    }
}

/// False for blank urls and the `#` placeholder.
pub fn is_openable_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && url != "#"
}

/// Records of one search, grouped by platform in catalog order.
pub type ResultSet = BTreeMap<Platform, Vec<Record>>;

/// Flattens a result set in platform order, then within-platform order.
pub fn flatten(results: &ResultSet) -> Vec<&Record> {
    results.values().flatten().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearchEntry {
    pub config: SearchConfig,
    pub saved_at: DateTime<Utc>,
}

impl SavedSearchEntry {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            saved_at: Utc::now(),
        }
    }

    /// Chip text, e.g. `Acme • 7d • EN`.
    pub fn label(&self) -> String {
        format!(
            "{} • {} • {}",
            self.config.query,
            self.config.range.key(),
            self.config.language.key().to_uppercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, source: Platform, score: f64) -> Record {
        Record::new(
            id,
            source,
            "title",
            "#",
            "author",
            Utc::now(),
            "snippet",
            score,
            EngagementMetrics::default(),
        )
    }

    #[test]
    fn test_record_sentiment_is_derived() {
        assert_eq!(record("a", Platform::News, 0.9).sentiment(), Sentiment::Positive);
        assert_eq!(record("b", Platform::News, -0.9).sentiment(), Sentiment::Negative);
        assert_eq!(record("c", Platform::News, 0.25).sentiment(), Sentiment::Neutral);
    }

    #[test]
    fn test_deserialized_label_follows_score() {
        let json = r##"{
            "id": "news-0",
            "source": "news",
            "title": "t",
            "url": "#",
            "author": "a",
            "published_at": "2024-05-01T12:30:00Z",
            "snippet": "s",
            "score": 0.9,
            "sentiment": "negative"
        }"##;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.sentiment(), Sentiment::Positive);
        assert_eq!(record.metrics, EngagementMetrics::default());

        let mut results = ResultSet::new();
        results.insert(Platform::News, vec![record]);
        let summary = crate::summary::summarize(&results);
        assert_eq!(summary.positive_count, 1);
        assert_eq!(summary.negative_count, 0);
    }

    #[test]
    fn test_serialized_record_reads_back_equal() {
        let original = record("x", Platform::Youtube, -0.4);
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"sentiment\":\"negative\""));
        let restored: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_set_score_updates_label() {
        let mut record = record("a", Platform::News, 0.9);
        record.set_score(-1.0);
        assert_eq!(record.score(), -1.0);
        assert_eq!(record.sentiment(), Sentiment::Negative);
        record.set_score(0.0);
        assert_eq!(record.sentiment(), Sentiment::Neutral);
    }

    #[test]
    fn test_has_link() {
        let mut record = record("a", Platform::News, 0.0);
        assert!(!record.has_link());
        record.url = "https://example.com/a".to_string();
        assert!(record.has_link());
        record.url = "  ".to_string();
        assert!(!record.has_link());
    }

    #[test]
    fn test_default_config_selects_all_platforms() {
        let config = SearchConfig::default();
        assert_eq!(config.platforms.len(), Platform::ALL.len());
        assert_eq!(config.range, TimeRange::Last7Days);
        assert_eq!(config.language, Language::Auto);
        assert!(config.trimmed_query().is_none());
    }

    #[test]
    fn test_toggle_platform() {
        let mut config = SearchConfig::default();
        config.toggle_platform(Platform::Reddit);
        assert!(!config.platforms.contains(&Platform::Reddit));
        config.toggle_platform(Platform::Reddit);
        assert!(config.platforms.contains(&Platform::Reddit));
    }

    #[test]
    fn test_trimmed_query() {
        let mut config = SearchConfig::default();
        config.query = "   ".to_string();
        assert!(config.trimmed_query().is_none());
        config.query = "  Acme ".to_string();
        assert_eq!(config.trimmed_query(), Some("Acme"));
    }

    #[test]
    fn test_flatten_follows_platform_order() {
        let mut results = ResultSet::new();
        results.insert(Platform::Web, vec![record("web-0", Platform::Web, 0.0)]);
        results.insert(
            Platform::News,
            vec![
                record("news-0", Platform::News, 0.0),
                record("news-1", Platform::News, 0.0),
            ],
        );
        let ids: Vec<&str> = flatten(&results).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["news-0", "news-1", "web-0"]);
    }

    #[test]
    fn test_saved_entry_label() {
        let mut config = SearchConfig::default();
        config.query = "Acme".to_string();
        config.language = Language::En;
        let entry = SavedSearchEntry::new(config);
        assert_eq!(entry.label(), "Acme • 7d • EN");
    }
}
