use crate::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key of the maturity preference
pub const SHOW_MATURE_KEY: &str = "show-adult-content";

/// Whether mature-genre titles are shown. Defaults to hidden.
pub struct PreferenceStore {
    storage: Arc<dyn KeyValueStore>,
    show_mature: bool,
}

impl PreferenceStore {
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let show_mature = match storage.get(SHOW_MATURE_KEY) {
            Ok(Some(content)) => serde_json::from_str::<bool>(&content).unwrap_or_else(|e| {
                warn!("Discarding unreadable maturity preference: {}", e);
                false
            }),
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read maturity preference: {}", e);
                false
            }
        };

        Self { storage, show_mature }
    }

    pub fn get(&self) -> bool {
        self.show_mature
    }

    pub fn set(&mut self, show_mature: bool) {
        self.show_mature = show_mature;
        self.persist();
    }

    /// Flip the preference and return the new value
    pub fn toggle(&mut self) -> bool {
        self.set(!self.show_mature);
        self.show_mature
    }

    /// Back to the default and forget the stored value
    pub fn reset(&mut self) {
        self.show_mature = false;
        if let Err(e) = self.storage.remove(SHOW_MATURE_KEY) {
            warn!("Failed to remove maturity preference: {}", e);
        }
    }

    fn persist(&self) {
        let value = if self.show_mature { "true" } else { "false" };
        match self.storage.set(SHOW_MATURE_KEY, value) {
            Ok(()) => debug!("Saved maturity preference: {}", value),
            Err(e) => warn!("Failed to persist maturity preference: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_to_hidden() {
        let prefs = PreferenceStore::load(Arc::new(MemoryStore::new()));
        assert!(!prefs.get());
    }

    #[test]
    fn test_set_persists_raw_boolean() {
        let storage = Arc::new(MemoryStore::new());
        let mut prefs = PreferenceStore::load(storage.clone());

        prefs.set(true);
        assert_eq!(storage.get(SHOW_MATURE_KEY).unwrap().as_deref(), Some("true"));
        assert!(PreferenceStore::load(storage.clone()).get());

        assert!(!prefs.toggle());
        assert_eq!(storage.get(SHOW_MATURE_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_unreadable_snapshot_resets_to_default() {
        for raw in ["", "yes", "1", "{\"show\": true}"] {
            let storage = Arc::new(MemoryStore::new());
            storage.set(SHOW_MATURE_KEY, raw).unwrap();
            assert!(!PreferenceStore::load(storage).get(), "value {:?}", raw);
        }
    }

    #[test]
    fn test_reset_forgets_value() {
        let storage = Arc::new(MemoryStore::new());
        let mut prefs = PreferenceStore::load(storage.clone());
        prefs.set(true);
        prefs.reset();
        assert!(!prefs.get());
        assert_eq!(storage.get(SHOW_MATURE_KEY).unwrap(), None);
    }
}
