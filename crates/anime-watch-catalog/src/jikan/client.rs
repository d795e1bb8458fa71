use crate::error::CatalogError;
use crate::jikan::api;
use crate::outcome::FetchOutcome;
use crate::traits::CatalogSource;
use crate::transport::{CatalogTransport, HttpTransport};
use anime_watch_config::CatalogConfig;
use anime_watch_models::{CatalogEntry, CatalogEntryDetail};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Page size of the seasonal listing (first page only)
pub const SEASONAL_LIMIT: usize = 24;
/// Maximum number of keyword search results
pub const SEARCH_LIMIT: usize = 12;

/// Catalog client for the Jikan v4 API
#[derive(Clone)]
pub struct JikanClient {
    transport: Arc<dyn CatalogTransport>,
}

impl JikanClient {
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self { transport }
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// Fetch a list page, keeping at most `limit` entries even if the server sends more
    async fn fetch_list(&self, what: &str, path: &str, limit: usize) -> FetchOutcome<Vec<CatalogEntry>> {
        let body = match self.transport.get_json(path).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Error fetching {}: {}", what, e);
                return FetchOutcome::Failed(e);
            }
        };

        match api::entries_from_body(body) {
            Some(mut entries) => {
                if entries.len() > limit {
                    debug!("Dropping {} {} beyond the limit of {}", entries.len() - limit, what, limit);
                    entries.truncate(limit);
                }
                info!("Fetched {} ({} entries)", what, entries.len());
                FetchOutcome::from_list(entries)
            }
            None => {
                warn!("Catalog response for {} had no data", what);
                FetchOutcome::Empty
            }
        }
    }
}

#[async_trait]
impl CatalogSource for JikanClient {
    fn source_name(&self) -> &str {
        "jikan"
    }

    async fn fetch_seasonal_now(&self) -> FetchOutcome<Vec<CatalogEntry>> {
        let path = format!("/seasons/now?limit={}&page=1", SEASONAL_LIMIT);
        self.fetch_list("seasonal listing", &path, SEASONAL_LIMIT).await
    }

    async fn search_by_query(&self, text: &str) -> FetchOutcome<Vec<CatalogEntry>> {
        let query = text.trim();
        if query.is_empty() {
            debug!("Blank search query, skipping request");
            return FetchOutcome::Empty;
        }

        let path = format!("/anime?q={}&limit={}", urlencoding::encode(query), SEARCH_LIMIT);
        self.fetch_list("search results", &path, SEARCH_LIMIT).await
    }

    async fn fetch_detail(&self, id: u64) -> FetchOutcome<CatalogEntryDetail> {
        let path = format!("/anime/{}/full", id);
        let body = match self.transport.get_json(&path).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Error fetching anime details for {}: {}", id, e);
                return FetchOutcome::Failed(e);
            }
        };

        match api::detail_from_body(body) {
            Some(detail) => FetchOutcome::Loaded(detail),
            None => {
                warn!("Catalog response for anime {} had no usable data", id);
                FetchOutcome::Empty
            }
        }
    }
}
