/// Errors that can occur while talking to the catalog API.
///
/// None of these escape the catalog client; they are carried inside
/// [`FetchOutcome::Failed`](crate::FetchOutcome::Failed) so callers can decide what to show.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    #[error("Failed to parse catalog response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),
}
