//! Mock data source.
//!
//! Waits a fixed latency and then synthesizes a handful of records per
//! requested platform with random scores and engagement counts. Swap it for a
//! real [`DataSource`] implementation to monitor live sources.

use async_trait::async_trait;
use chrono::Utc;
use reputation_core::{
    round_to_hundredths, DataSource, DataSourceError, EngagementMetrics, Platform, Record,
    ResultSet, SearchConfig,
};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

const AUTHORS: [&str; 4] = ["TOI", "User123", "Channel XYZ", "Reporter AB"];
const PLACEHOLDER_SNIPPET: &str =
    "This is a placeholder snippet showing how the item preview will look in the UI.";

pub struct MockDataSource {
    latency: Duration,
    rng: Mutex<fastrand::Rng>,
}

impl MockDataSource {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Deterministic output for a given seed.
    pub fn with_seed(latency: Duration, seed: u64) -> Self {
        Self {
            latency,
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }

    pub fn records_per_platform(platform: Platform) -> usize {
        match platform {
            Platform::Youtube => 6,
            _ => 5,
        }
    }

    fn generate(&self, config: &SearchConfig) -> Result<ResultSet, DataSourceError> {
        let mut rng = self.rng.lock().map_err(|_| DataSourceError::Unavailable {
            source_name: self.name().to_string(),
        })?;
        let now = Utc::now();

        let results = config
            .platforms
            .iter()
            .map(|&platform| {
                let records = (0..Self::records_per_platform(platform))
                    .map(|i| {
                        let score = round_to_hundredths(rng.f64() * 2.0 - 1.0);
                        let metrics = EngagementMetrics {
                            likes: Some(rng.u64(0..900)),
                            comments: Some(rng.u64(0..350)),
                            shares: Some(rng.u64(0..180)),
                            views: Some(rng.u64(0..20_000)),
                        };
                        Record::new(
                            format!("{}-{}", platform.key(), i),
                            platform,
                            format!(
                                "{} result {} for \"{}\"",
                                platform.key().to_uppercase(),
                                i + 1,
                                config.query
                            ),
                            "#",
                            AUTHORS[i % AUTHORS.len()],
                            now,
                            PLACEHOLDER_SNIPPET,
                            score,
                            metrics,
                        )
                    })
                    .collect();
                (platform, records)
            })
            .collect();

        Ok(results)
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_results(&self, config: &SearchConfig) -> Result<ResultSet, DataSourceError> {
        debug!(
            "Mock fetch for '{}' ({}, {}) waiting {:?}",
            config.query,
            config.range.key(),
            config.language.key(),
            self.latency
        );
        tokio::time::sleep(self.latency).await;
        self.generate(config)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
