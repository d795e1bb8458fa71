use crate::error::CatalogError;
use anime_watch_config::CatalogConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Issues a GET against the catalog and returns the decoded JSON body.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// `path_and_query` is relative to the catalog base URL, e.g. `/anime/1/full`
    async fn get_json(&self, path_and_query: &str) -> Result<serde_json::Value, CatalogError>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::new(client, config.base_url.trim()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get_json(&self, path_and_query: &str) -> Result<serde_json::Value, CatalogError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                path: path_and_query.to_string(),
            });
        }

        let text = response.text().await?;
        let body = serde_json::from_str(&text)?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = HttpTransport::new(Client::new(), "https://api.jikan.moe/v4/");
        assert_eq!(transport.base_url(), "https://api.jikan.moe/v4");
    }

    #[test]
    fn test_from_config_uses_base_url() {
        let config = CatalogConfig::default();
        let transport = HttpTransport::from_config(&config).unwrap();
        assert_eq!(transport.base_url(), anime_watch_config::DEFAULT_BASE_URL);
    }
}
