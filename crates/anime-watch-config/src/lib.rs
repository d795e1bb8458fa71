pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, LoggingConfig, StorageConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use paths::{home_override, PathManager};
