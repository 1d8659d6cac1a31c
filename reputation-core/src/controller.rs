//! Search state machine.
//!
//! The controller owns the editable [`SearchConfig`], the current
//! [`ResultSet`] and its [`SentimentSummary`]. A search is split into
//! [`SearchController::begin_search`], which snapshots the configuration
//! into a [`SearchRequest`], and [`SearchController::complete`], which
//! applies the outcome. The fetch in between runs wherever the caller likes
//! (an `iced` command, a test, [`SearchController::search`]).
//!
//! Every request carries a monotonically increasing id. Only the outcome of
//! the most recently started request is applied; older outcomes are dropped.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::{Language, Platform, TimeRange};
use crate::error::DataSourceError;
use crate::source::DataSource;
use crate::summary::{summarize, SentimentSummary};
use crate::types::{flatten, Record, ResultSet, SavedSearchEntry, SearchConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// A snapshot of the configuration a search was started with.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub id: u64,
    pub config: SearchConfig,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub request_id: u64,
    pub result: Result<ResultSet, DataSourceError>,
}

/// Runs `request` against `source`. Used to drive a search off the UI thread.
pub async fn execute(source: Arc<dyn DataSource>, request: SearchRequest) -> SearchOutcome {
    debug!(
        "Fetching request {} from {} for {:?}",
        request.id,
        source.name(),
        request.config.platforms
    );
    let result = source.fetch_results(&request.config).await;
    SearchOutcome {
        request_id: request.id,
        result,
    }
}

#[derive(Debug, Default)]
pub struct SearchController {
    config: SearchConfig,
    status: SearchStatus,
    results: ResultSet,
    summary: SentimentSummary,
    last_request_id: u64,
    pending: Option<SearchRequest>,
}

impl Default for SearchStatus {
    fn default() -> Self {
        SearchStatus::Idle
    }
}

impl SearchController {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SearchStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn records_for(&self, platform: Platform) -> &[Record] {
        self.results
            .get(&platform)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All current records, flattened in platform order.
    pub fn records(&self) -> Vec<&Record> {
        flatten(&self.results)
    }

    pub fn summary(&self) -> &SentimentSummary {
        &self.summary
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.config.query = query.into();
    }

    pub fn set_range(&mut self, range: TimeRange) {
        self.config.range = range;
    }

    pub fn set_language(&mut self, language: Language) {
        self.config.language = language;
    }

    pub fn set_custom_from(&mut self, date: Option<NaiveDate>) {
        self.config.custom_from = date;
    }

    pub fn set_custom_to(&mut self, date: Option<NaiveDate>) {
        self.config.custom_to = date;
    }

    pub fn toggle_platform(&mut self, platform: Platform) {
        self.config.toggle_platform(platform);
    }

    /// Copies a saved configuration into the editable state. Does not search.
    pub fn apply_saved(&mut self, entry: &SavedSearchEntry) {
        debug!("Loading saved search '{}'", entry.config.query);
        self.config = entry.config.clone();
    }

    /// Starts a search for the current configuration.
    ///
    /// Returns `None`, leaving the status untouched, when the query is blank.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        if self.config.trimmed_query().is_none() {
            debug!("Ignoring search with an empty query");
            return None;
        }

        self.last_request_id += 1;
        let request = SearchRequest {
            id: self.last_request_id,
            config: self.config.clone(),
        };
        info!(
            "Starting search {} for '{}' ({}, {}, {} platforms)",
            request.id,
            request.config.query,
            request.config.range.key(),
            request.config.language.key(),
            request.config.platforms.len()
        );

        self.status = SearchStatus::Loading;
        self.pending = Some(request.clone());
        Some(request)
    }

    /// Applies the outcome of a request. Returns `false` if the outcome
    /// belonged to a superseded request and was discarded.
    pub fn complete(&mut self, outcome: SearchOutcome) -> bool {
        let request = match self.pending.take() {
            Some(request) if request.id == outcome.request_id => request,
            other => {
                debug!(
                    "Discarding outcome of superseded search {}",
                    outcome.request_id
                );
                self.pending = other;
                return false;
            }
        };

        match outcome.result {
            Ok(mut results) => {
                results.retain(|platform, _| {
                    let requested = request.config.platforms.contains(platform);
                    if !requested {
                        warn!(
                            "Dropping results for unrequested platform {}",
                            platform.key()
                        );
                    }
                    requested
                });
                self.summary = summarize(&results);
                self.results = results;
                self.status = SearchStatus::Ready;
                info!(
                    "Search {} finished with {} records",
                    request.id, self.summary.total
                );
            }
            Err(error) => {
                warn!("Search {} failed: {}", request.id, error);
                self.status = SearchStatus::Error(error.display_message());
            }
        }
        true
    }

    /// Begins a search, awaits `source`, and applies the outcome.
    pub async fn search(&mut self, source: &dyn DataSource) -> bool {
        let Some(request) = self.begin_search() else {
            return false;
        };
        let result = source.fetch_results(&request.config).await;
        self.complete(SearchOutcome {
            request_id: request.id,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EngagementMetrics;
    use chrono::Utc;

    fn results_for(platforms: &[Platform], per_platform: usize) -> ResultSet {
        platforms
            .iter()
            .map(|platform| {
                let records = (0..per_platform)
                    .map(|i| {
                        Record::new(
                            format!("{}-{}", platform.key(), i),
                            *platform,
                            "title",
                            "#",
                            "author",
                            Utc::now(),
                            "snippet",
                            0.5,
                            EngagementMetrics::default(),
                        )
                    })
                    .collect();
                (*platform, records)
            })
            .collect()
    }

    fn controller_with_query(query: &str) -> SearchController {
        let mut controller = SearchController::default();
        controller.set_query(query);
        controller
    }

    #[test]
    fn test_blank_query_stays_idle() {
        let mut controller = controller_with_query("   ");
        assert!(controller.begin_search().is_none());
        assert_eq!(controller.status(), &SearchStatus::Idle);
    }

    #[test]
    fn test_success_transitions_to_ready() {
        let mut controller = controller_with_query("Acme");
        let request = controller.begin_search().unwrap();
        assert_eq!(controller.status(), &SearchStatus::Loading);

        let applied = controller.complete(SearchOutcome {
            request_id: request.id,
            result: Ok(results_for(&[Platform::News], 3)),
        });
        assert!(applied);
        assert_eq!(controller.status(), &SearchStatus::Ready);
        assert_eq!(controller.summary().total, 3);
        assert_eq!(controller.records_for(Platform::News).len(), 3);
        assert!(controller.records_for(Platform::Web).is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_results() {
        let mut controller = controller_with_query("Acme");
        let first = controller.begin_search().unwrap();
        controller.complete(SearchOutcome {
            request_id: first.id,
            result: Ok(results_for(&[Platform::News], 2)),
        });
        let before = controller.results().clone();

        let second = controller.begin_search().unwrap();
        controller.complete(SearchOutcome {
            request_id: second.id,
            result: Err(DataSourceError::rejected("timeout")),
        });

        assert_eq!(
            controller.status(),
            &SearchStatus::Error("timeout".to_string())
        );
        assert_eq!(controller.error(), Some("timeout"));
        assert_eq!(controller.results(), &before);
        assert_eq!(controller.summary().total, 2);
    }

    #[test]
    fn test_empty_rejection_uses_default_message() {
        let mut controller = controller_with_query("Acme");
        let request = controller.begin_search().unwrap();
        controller.complete(SearchOutcome {
            request_id: request.id,
            result: Err(DataSourceError::rejected("")),
        });
        assert_eq!(controller.error(), Some(crate::error::DEFAULT_FETCH_ERROR));
    }

    #[test]
    fn test_error_cleared_by_next_success() {
        let mut controller = controller_with_query("Acme");
        let failed = controller.begin_search().unwrap();
        controller.complete(SearchOutcome {
            request_id: failed.id,
            result: Err(DataSourceError::rejected("boom")),
        });

        let retry = controller.begin_search().unwrap();
        assert_eq!(controller.status(), &SearchStatus::Loading);
        controller.complete(SearchOutcome {
            request_id: retry.id,
            result: Ok(ResultSet::new()),
        });
        assert_eq!(controller.status(), &SearchStatus::Ready);
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_superseded_outcome_is_discarded() {
        let mut controller = controller_with_query("Acme");
        let older = controller.begin_search().unwrap();
        let newer = controller.begin_search().unwrap();
        assert!(newer.id > older.id);

        // Newer request resolves first, then the older one arrives late.
        assert!(controller.complete(SearchOutcome {
            request_id: newer.id,
            result: Ok(results_for(&[Platform::Reddit], 1)),
        }));
        assert!(!controller.complete(SearchOutcome {
            request_id: older.id,
            result: Ok(results_for(&[Platform::Reddit], 4)),
        }));

        assert_eq!(controller.summary().total, 1);
        assert_eq!(controller.status(), &SearchStatus::Ready);
    }

    #[test]
    fn test_stale_outcome_does_not_end_loading() {
        let mut controller = controller_with_query("Acme");
        let older = controller.begin_search().unwrap();
        let newer = controller.begin_search().unwrap();

        assert!(!controller.complete(SearchOutcome {
            request_id: older.id,
            result: Err(DataSourceError::rejected("late")),
        }));
        assert!(controller.is_loading());

        assert!(controller.complete(SearchOutcome {
            request_id: newer.id,
            result: Ok(ResultSet::new()),
        }));
        assert_eq!(controller.status(), &SearchStatus::Ready);
    }

    #[test]
    fn test_unrequested_platforms_are_dropped() {
        let mut controller = controller_with_query("Acme");
        controller.toggle_platform(Platform::Web);
        let request = controller.begin_search().unwrap();
        assert!(!request.config.platforms.contains(&Platform::Web));

        controller.complete(SearchOutcome {
            request_id: request.id,
            result: Ok(results_for(&[Platform::News, Platform::Web], 2)),
        });
        assert!(controller.results().contains_key(&Platform::News));
        assert!(!controller.results().contains_key(&Platform::Web));
        assert_eq!(controller.summary().total, 2);
    }

    #[test]
    fn test_edits_during_flight_do_not_change_request() {
        let mut controller = controller_with_query("Acme");
        let request = controller.begin_search().unwrap();
        controller.set_query("Other");
        controller.toggle_platform(Platform::News);

        assert_eq!(request.config.query, "Acme");
        assert!(request.config.platforms.contains(&Platform::News));

        controller.complete(SearchOutcome {
            request_id: request.id,
            result: Ok(results_for(&[Platform::News], 1)),
        });
        assert_eq!(controller.records_for(Platform::News).len(), 1);
    }

    struct FixedSource(ResultSet);

    #[async_trait::async_trait]
    impl DataSource for FixedSource {
        async fn fetch_results(
            &self,
            _config: &SearchConfig,
        ) -> Result<ResultSet, DataSourceError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_search_drives_full_cycle() {
        let source = FixedSource(results_for(&[Platform::News, Platform::Youtube], 2));
        let mut controller = controller_with_query("Acme");

        let applied = tokio_test::block_on(controller.search(&source));
        assert!(applied);
        assert_eq!(controller.status(), &SearchStatus::Ready);
        assert_eq!(controller.records().len(), 4);
    }

    #[test]
    fn test_apply_saved_restores_configuration() {
        let mut saved = SearchConfig::default();
        saved.query = "Acme".to_string();
        saved.range = TimeRange::Custom;
        saved.custom_from = NaiveDate::from_ymd_opt(2024, 1, 1);
        saved.language = Language::Hi;
        saved.platforms = [Platform::News, Platform::Youtube].into_iter().collect();
        let entry = SavedSearchEntry::new(saved.clone());

        let mut controller = controller_with_query("something else");
        controller.apply_saved(&entry);
        assert_eq!(controller.config(), &saved);
        assert_eq!(controller.status(), &SearchStatus::Idle);
    }
}
