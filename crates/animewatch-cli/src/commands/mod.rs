pub mod browse;
pub mod catalog;
pub mod clear;
pub mod config;
pub mod preferences;
pub mod prompts;
pub mod watchlist;

use anime_watch_config::{Config, PathManager};
use anime_watch_core::AppContext;
use color_eyre::Result;

/// Build the stores and catalog client for one command
pub(crate) fn open_context(config: &Config, paths: &PathManager) -> Result<AppContext> {
    AppContext::from_config(config, paths)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialize: {:#}", e))
}
