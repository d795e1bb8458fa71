pub mod catalog_entry;
pub mod detail;
pub mod status;
pub mod watchlist;

pub use catalog_entry::{AiredDates, BroadcastSchedule, CatalogEntry};
pub use detail::CatalogEntryDetail;
pub use status::WatchStatus;
pub use watchlist::WatchlistEntry;

/// Anything that carries an ordered list of genre names.
///
/// Used by the maturity filter so catalog results and tracked entries share one code path.
pub trait HasGenres {
    fn genre_names(&self) -> &[String];
}

impl HasGenres for CatalogEntry {
    fn genre_names(&self) -> &[String] {
        &self.genres
    }
}

impl HasGenres for WatchlistEntry {
    fn genre_names(&self) -> &[String] {
        &self.entry.genres
    }
}

impl HasGenres for CatalogEntryDetail {
    fn genre_names(&self) -> &[String] {
        &self.entry.genres
    }
}
