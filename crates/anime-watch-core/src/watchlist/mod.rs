use crate::storage::KeyValueStore;
use anime_watch_models::{CatalogEntry, WatchStatus, WatchlistEntry};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key of the watchlist snapshot
pub const WATCHLIST_KEY: &str = "anime-watchlist";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Anime {0} is not in your watchlist")]
    NotTracked(u64),
}

/// Number of tracked entries per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub watching: usize,
    pub completed: usize,
    pub plan_to_watch: usize,
}

impl StatusCounts {
    pub fn get(&self, status: WatchStatus) -> usize {
        match status {
            WatchStatus::Watching => self.watching,
            WatchStatus::Completed => self.completed,
            WatchStatus::PlanToWatch => self.plan_to_watch,
        }
    }

    pub fn total(&self) -> usize {
        self.watching + self.completed + self.plan_to_watch
    }
}

/// The user's tracked titles, one entry per catalog id.
///
/// Every mutation writes the full collection back to storage.
pub struct WatchlistStore {
    storage: Arc<dyn KeyValueStore>,
    entries: Vec<WatchlistEntry>,
}

impl WatchlistStore {
    /// Load the persisted snapshot; a missing or unreadable snapshot starts an empty watchlist
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let entries = match storage.get(WATCHLIST_KEY) {
            Ok(Some(content)) => match serde_json::from_str::<Vec<WatchlistEntry>>(&content) {
                Ok(entries) => {
                    debug!("Loaded watchlist snapshot ({} entries)", entries.len());
                    dedupe_by_id(entries)
                }
                Err(e) => {
                    warn!("Discarding unreadable watchlist snapshot: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read watchlist snapshot: {}", e);
                Vec::new()
            }
        };

        Self { storage, entries }
    }

    /// Track `entry` with `status`, or reassign the status if it is already tracked
    pub fn add(&mut self, entry: CatalogEntry, status: WatchStatus) -> &WatchlistEntry {
        self.add_at(entry, status, Utc::now())
    }

    /// Like [`add`](Self::add) with an explicit timestamp for new entries
    pub fn add_at(
        &mut self,
        entry: CatalogEntry,
        status: WatchStatus,
        now: DateTime<Utc>,
    ) -> &WatchlistEntry {
        let index = match self.position(entry.id) {
            Some(index) => {
                debug!("Updating status of {} to {}", entry.id, status.as_key());
                self.entries[index].watch_status = status;
                index
            }
            None => {
                info!("Added {} to {}", entry.display_title(), status);
                self.entries.push(WatchlistEntry::new(entry, status, now));
                self.entries.len() - 1
            }
        };

        self.persist();
        &self.entries[index]
    }

    /// Reassign the status of an entry that is already tracked
    pub fn promote(&mut self, id: u64, status: WatchStatus) -> Result<&WatchlistEntry, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotTracked(id))?;
        self.entries[index].watch_status = status;
        self.persist();
        Ok(&self.entries[index])
    }

    /// Stop tracking `id`; returns the removed entry if there was one
    pub fn remove(&mut self, id: u64) -> Option<WatchlistEntry> {
        let removed = self.position(id).map(|index| self.entries.remove(index));
        if removed.is_none() {
            debug!("Remove of untracked id {} is a no-op", id);
        }
        self.persist();
        removed
    }

    pub fn list_by_status(&self, status: WatchStatus) -> Vec<&WatchlistEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.watch_status == status)
            .collect()
    }

    pub fn find_by_id(&self, id: u64) -> Option<&WatchlistEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.position(id).is_some()
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for entry in &self.entries {
            match entry.watch_status {
                WatchStatus::Watching => counts.watching += 1,
                WatchStatus::Completed => counts.completed += 1,
                WatchStatus::PlanToWatch => counts.plan_to_watch += 1,
            }
        }
        counts
    }

    /// Drop every entry and the stored snapshot
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.storage.remove(WATCHLIST_KEY) {
            warn!("Failed to remove watchlist snapshot: {}", e);
        }
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize watchlist: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(WATCHLIST_KEY, &json) {
            warn!("Failed to persist watchlist: {}", e);
        }
    }
}

/// Keep the first entry for each id; a hand-edited snapshot may repeat ids
fn dedupe_by_id(entries: Vec<WatchlistEntry>) -> Vec<WatchlistEntry> {
    let mut seen = std::collections::HashSet::new();
    let total = entries.len();
    let unique: Vec<WatchlistEntry> = entries
        .into_iter()
        .filter(|entry| seen.insert(entry.id()))
        .collect();
    if unique.len() < total {
        warn!("Dropped {} duplicate watchlist entries", total - unique.len());
    }
    unique
}

#[cfg(test)]
mod tests;
