use crate::outcome::FetchOutcome;
use anime_watch_models::{CatalogEntry, CatalogEntryDetail};
use async_trait::async_trait;

/// Read-only access to a media catalog.
///
/// Every method issues at most one request and never returns an error directly:
/// failures are logged and reported through [`FetchOutcome`].
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Titles airing in the current broadcast season (first page only)
    async fn fetch_seasonal_now(&self) -> FetchOutcome<Vec<CatalogEntry>>;

    /// Keyword search; a blank query returns `Empty` without touching the network
    async fn search_by_query(&self, text: &str) -> FetchOutcome<Vec<CatalogEntry>>;

    async fn fetch_detail(&self, id: u64) -> FetchOutcome<CatalogEntryDetail>;
}
