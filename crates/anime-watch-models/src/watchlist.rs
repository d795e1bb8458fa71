use crate::catalog_entry::CatalogEntry;
use crate::status::WatchStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry the user is tracking.
///
/// `date_added` is set when the entry is first tracked and never changes afterwards,
/// even when the status is reassigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    #[serde(rename = "watchStatus")]
    pub watch_status: WatchStatus,
    #[serde(rename = "dateAdded")]
    pub date_added: DateTime<Utc>,
}

impl WatchlistEntry {
    pub fn new(entry: CatalogEntry, watch_status: WatchStatus, date_added: DateTime<Utc>) -> Self {
        Self {
            entry,
            watch_status,
            date_added,
        }
    }

    pub fn id(&self) -> u64 {
        self.entry.id
    }
}
