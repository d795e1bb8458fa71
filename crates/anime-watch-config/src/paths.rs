use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base directory override from the `ANIMEWATCH_HOME` environment variable
pub fn home_override() -> Option<PathBuf> {
    std::env::var("ANIMEWATCH_HOME")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        if let Some(base) = home_override() {
            return Ok(Self::from_base(base));
        }

        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("animewatch");

        Ok(Self::from_base(base_dir))
    }

    /// Config at the base level, data and logs in subdirectories
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    /// Point the data directory somewhere else (the `[storage] data_dir` setting)
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Key-value documents (watchlist snapshot, preferences)
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Log file written into configs created by `config init`
    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("animewatch.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(self.storage_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // Fall back to a directory next to the working directory when the platform has no config dir
        Self::new().unwrap_or_else(|_| Self::from_base(".animewatch"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::from_base("/tmp/aw");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/aw/config.toml"));
        assert_eq!(paths.storage_dir(), PathBuf::from("/tmp/aw/data/storage"));
        assert_eq!(paths.default_log_file(), PathBuf::from("/tmp/aw/logs/animewatch.log"));
    }

    #[test]
    fn test_data_dir_override() {
        let paths = PathManager::from_base("/tmp/aw").with_data_dir("/srv/aw-data");
        assert_eq!(paths.storage_dir(), PathBuf::from("/srv/aw-data/storage"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/aw/config.toml"));
    }

    #[test]
    fn test_ensure_directories_creates_storage() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().join("home"));
        paths.ensure_directories().unwrap();
        assert!(paths.storage_dir().is_dir());
    }
}
