use async_trait::async_trait;

use crate::error::DataSourceError;
use crate::types::{ResultSet, SearchConfig};

/// Anything that can answer a search with per-platform records.
///
/// Implementations should only return keys for platforms listed in
/// `config.platforms`; the controller drops anything else.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_results(&self, config: &SearchConfig) -> Result<ResultSet, DataSourceError>;

    fn name(&self) -> &'static str;
}
