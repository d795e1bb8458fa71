pub mod context;
pub mod filter;
pub mod preferences;
pub mod storage;
pub mod view;
pub mod watchlist;

pub use context::AppContext;
pub use filter::{count_visible, filter_mature, is_mature, MATURE_GENRES};
pub use preferences::{PreferenceStore, SHOW_MATURE_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use view::{DetailOverlay, DetailRequest, EmptyState, Listing, OverlayState, View, ViewController};
pub use watchlist::{StatusCounts, StoreError, WatchlistStore, WATCHLIST_KEY};
