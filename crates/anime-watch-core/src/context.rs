use crate::preferences::PreferenceStore;
use crate::storage::{FileStore, KeyValueStore};
use crate::view::ViewController;
use crate::watchlist::WatchlistStore;
use anime_watch_catalog::{CatalogSource, JikanClient};
use anime_watch_config::{Config, PathManager};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

/// Shared collaborators for one run: the storage substrate and the catalog.
///
/// Stores are constructed from here at startup and handed to whoever needs them.
#[derive(Clone)]
pub struct AppContext {
    storage: Arc<dyn KeyValueStore>,
    catalog: Arc<dyn CatalogSource>,
}

impl AppContext {
    pub fn new(storage: Arc<dyn KeyValueStore>, catalog: Arc<dyn CatalogSource>) -> Self {
        Self { storage, catalog }
    }

    /// File-backed storage under the data directory and the Jikan client from `[catalog]`
    pub fn from_config(config: &Config, paths: &PathManager) -> Result<Self> {
        config.validate()?;

        let paths = match &config.storage.data_dir {
            Some(data_dir) => paths.clone().with_data_dir(data_dir),
            None => paths.clone(),
        };
        paths
            .ensure_directories()
            .with_context(|| format!("Failed to create data directory {}", paths.data_dir().display()))?;

        let storage_dir = paths.storage_dir();
        debug!("Using storage directory {}", storage_dir.display());

        let catalog = JikanClient::from_config(&config.catalog)
            .context("Failed to build catalog HTTP client")?;

        Ok(Self::new(
            Arc::new(FileStore::new(storage_dir)),
            Arc::new(catalog),
        ))
    }

    pub fn watchlist(&self) -> WatchlistStore {
        WatchlistStore::load(self.storage.clone())
    }

    pub fn preferences(&self) -> PreferenceStore {
        PreferenceStore::load(self.storage.clone())
    }

    /// A fresh session over the persisted stores
    pub fn controller(&self) -> ViewController {
        ViewController::new(self.catalog.clone(), self.watchlist(), self.preferences())
    }
}
