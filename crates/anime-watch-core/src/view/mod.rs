//! Session state behind the interactive surface: which view is active, what each view
//! lists, and the detail overlay.

use crate::filter::{count_visible, filter_mature};
use crate::preferences::PreferenceStore;
use crate::watchlist::{StoreError, WatchlistStore};
use anime_watch_catalog::{CatalogSource, FetchOutcome};
use anime_watch_models::{CatalogEntry, CatalogEntryDetail, WatchStatus, WatchlistEntry};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Ongoing,
    Search,
    Watching,
    Completed,
    PlanToWatch,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Ongoing,
        View::Search,
        View::Watching,
        View::Completed,
        View::PlanToWatch,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            View::Ongoing => "Ongoing",
            View::Search => "Search",
            View::Watching => "Watching",
            View::Completed => "Completed",
            View::PlanToWatch => "Plan to Watch",
        }
    }

    /// The watchlist status a view lists, None for the catalog views
    pub fn watch_status(&self) -> Option<WatchStatus> {
        match self {
            View::Ongoing | View::Search => None,
            View::Watching => Some(WatchStatus::Watching),
            View::Completed => Some(WatchStatus::Completed),
            View::PlanToWatch => Some(WatchStatus::PlanToWatch),
        }
    }
}

impl From<WatchStatus> for View {
    fn from(status: WatchStatus) -> Self {
        match status {
            WatchStatus::Watching => View::Watching,
            WatchStatus::Completed => View::Completed,
            WatchStatus::PlanToWatch => View::PlanToWatch,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Why a view has nothing to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// The seasonal listing has not come back yet
    Loading,
    /// The seasonal fetch finished without results
    NoOngoing,
    /// Results exist but the maturity filter hides all of them
    AllFiltered { view: View },
    NoResults { query: String },
    SearchPrompt,
    EmptyStatus(WatchStatus),
}

impl EmptyState {
    pub fn message(&self) -> String {
        match self {
            EmptyState::Loading => "Loading ongoing anime...".to_string(),
            EmptyState::NoOngoing => "No ongoing anime to show right now".to_string(),
            EmptyState::AllFiltered { view: View::Ongoing } => {
                "All ongoing anime filtered due to adult content settings".to_string()
            }
            EmptyState::AllFiltered { .. } => {
                "All search results filtered due to adult content settings".to_string()
            }
            EmptyState::NoResults { query } => format!("No anime found for \"{}\"", query),
            EmptyState::SearchPrompt => "Search for anime to add to your watchlist".to_string(),
            EmptyState::EmptyStatus(status) => {
                format!("No anime in your {} list yet", status.label().to_lowercase())
            }
        }
    }

    /// Whether showing mature content would reveal something
    pub fn offers_mature_toggle(&self) -> bool {
        matches!(self, EmptyState::AllFiltered { .. })
    }
}

/// What the main content area renders for the active view
#[derive(Debug)]
pub enum Listing<'a> {
    Catalog(Vec<&'a CatalogEntry>),
    Watchlist(Vec<&'a WatchlistEntry>),
    Empty(EmptyState),
}

#[derive(Debug)]
pub enum OverlayState {
    Loading,
    Loaded(CatalogEntryDetail),
    /// Terminal; the user has to reselect to try again
    Failed,
}

#[derive(Debug)]
pub struct DetailOverlay {
    pub id: u64,
    /// The list entry that was selected, when the overlay was opened from a list
    pub selected: Option<CatalogEntry>,
    pub state: OverlayState,
    generation: u64,
}

impl DetailOverlay {
    pub const FAILED_MESSAGE: &'static str = "Failed to load anime details";

    pub fn detail(&self) -> Option<&CatalogEntryDetail> {
        match &self.state {
            OverlayState::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    /// Entry to track from the overlay: the selected list entry, else the loaded record
    pub fn entry(&self) -> Option<&CatalogEntry> {
        self.selected
            .as_ref()
            .or_else(|| self.detail().map(|detail| &detail.entry))
    }
}

/// Ticket for an in-flight detail fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    pub id: u64,
    generation: u64,
}

pub struct ViewController {
    catalog: Arc<dyn CatalogSource>,
    watchlist: WatchlistStore,
    preferences: PreferenceStore,
    active: View,
    ongoing: Vec<CatalogEntry>,
    ongoing_requested: bool,
    ongoing_settled: bool,
    search_query: String,
    search_results: Vec<CatalogEntry>,
    last_search_failed: bool,
    overlay: Option<DetailOverlay>,
    next_generation: u64,
}

impl ViewController {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        watchlist: WatchlistStore,
        preferences: PreferenceStore,
    ) -> Self {
        Self {
            catalog,
            watchlist,
            preferences,
            active: View::Ongoing,
            ongoing: Vec::new(),
            ongoing_requested: false,
            ongoing_settled: false,
            search_query: String::new(),
            search_results: Vec::new(),
            last_search_failed: false,
            overlay: None,
            next_generation: 0,
        }
    }

    /// Enter the initial view, which loads the seasonal listing
    pub async fn start(&mut self) {
        self.select_view(View::Ongoing).await;
    }

    /// Jump to any view. The first visit to Ongoing fetches the seasonal listing.
    pub async fn select_view(&mut self, view: View) {
        debug!("Switching view to {}", view);
        self.active = view;
        if view == View::Ongoing && !self.ongoing_requested {
            self.load_ongoing().await;
        }
    }

    async fn load_ongoing(&mut self) {
        self.ongoing_requested = true;
        let outcome = self.catalog.fetch_seasonal_now().await;
        self.ongoing = outcome.into_entries();
        self.ongoing_settled = true;
    }

    /// Run a keyword search and show its results
    pub async fn submit_search(&mut self, text: &str) {
        self.search_query = text.trim().to_string();
        self.active = View::Search;

        let outcome = self.catalog.search_by_query(text).await;
        self.last_search_failed = outcome.is_failed();
        self.search_results = outcome.into_entries();
        info!(
            "Search for '{}' returned {} results",
            self.search_query,
            self.search_results.len()
        );
    }

    pub fn add_entry(&mut self, entry: CatalogEntry, status: WatchStatus) -> &WatchlistEntry {
        self.watchlist.add(entry, status)
    }

    /// Mark a tracked entry as completed
    pub fn complete_entry(&mut self, id: u64) -> Result<&WatchlistEntry, StoreError> {
        self.watchlist.promote(id, WatchStatus::Completed)
    }

    pub fn remove_entry(&mut self, id: u64) -> Option<WatchlistEntry> {
        self.watchlist.remove(id)
    }

    /// Add actions are offered only for titles not tracked yet
    pub fn can_add(&self, id: u64) -> bool {
        !self.watchlist.contains(id)
    }

    pub fn show_mature(&self) -> bool {
        self.preferences.get()
    }

    pub fn set_show_mature(&mut self, show: bool) {
        self.preferences.set(show);
    }

    pub fn toggle_mature(&mut self) -> bool {
        self.preferences.toggle()
    }

    /// Open the overlay in its loading state; pair with [`finish_detail`](Self::finish_detail)
    pub fn begin_detail(&mut self, id: u64, selected: Option<CatalogEntry>) -> DetailRequest {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.overlay = Some(DetailOverlay {
            id,
            selected,
            state: OverlayState::Loading,
            generation,
        });
        DetailRequest { id, generation }
    }

    /// Apply a detail fetch result.
    ///
    /// Results for an overlay that was closed or replaced in the meantime are dropped;
    /// returns whether the result was applied.
    pub fn finish_detail(
        &mut self,
        request: DetailRequest,
        outcome: FetchOutcome<CatalogEntryDetail>,
    ) -> bool {
        let Some(overlay) = self
            .overlay
            .as_mut()
            .filter(|overlay| overlay.generation == request.generation)
        else {
            debug!("Discarding stale detail result for {}", request.id);
            return false;
        };

        overlay.state = match outcome.into_option() {
            Some(detail) => OverlayState::Loaded(detail),
            None => OverlayState::Failed,
        };
        true
    }

    /// Select a list entry and load its full record
    pub async fn open_detail(&mut self, entry: CatalogEntry) {
        let request = self.begin_detail(entry.id, Some(entry));
        self.fetch_detail(request).await;
    }

    /// Open the overlay for an id, reusing any entry already on screen or tracked
    pub async fn open_detail_by_id(&mut self, id: u64) {
        let selected = self.find_known_entry(id);
        let request = self.begin_detail(id, selected);
        self.fetch_detail(request).await;
    }

    async fn fetch_detail(&mut self, request: DetailRequest) {
        let outcome = self.catalog.fetch_detail(request.id).await;
        self.finish_detail(request, outcome);
    }

    /// Close the overlay; the fetched record is not kept
    pub fn close_detail(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<&DetailOverlay> {
        self.overlay.as_ref()
    }

    /// Track the overlay's title with `status`. None when there is nothing to add or the
    /// title is already tracked.
    pub fn add_from_overlay(&mut self, status: WatchStatus) -> Option<&WatchlistEntry> {
        let entry = self.overlay.as_ref()?.entry()?.clone();
        if !self.can_add(entry.id) {
            return None;
        }
        Some(self.watchlist.add(entry, status))
    }

    fn find_known_entry(&self, id: u64) -> Option<CatalogEntry> {
        self.search_results
            .iter()
            .chain(self.ongoing.iter())
            .find(|entry| entry.id == id)
            .cloned()
            .or_else(|| self.watchlist.find_by_id(id).map(|tracked| tracked.entry.clone()))
    }

    pub fn active_view(&self) -> View {
        self.active
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn last_search_failed(&self) -> bool {
        self.last_search_failed
    }

    pub fn ongoing(&self) -> &[CatalogEntry] {
        &self.ongoing
    }

    pub fn search_results(&self) -> &[CatalogEntry] {
        &self.search_results
    }

    pub fn watchlist(&self) -> &WatchlistStore {
        &self.watchlist
    }

    /// Live counts for the view selector
    pub fn tab_counts(&self) -> Vec<(View, usize)> {
        let show = self.show_mature();
        let counts = self.watchlist.counts();
        View::ALL
            .iter()
            .map(|view| {
                let count = match view {
                    View::Ongoing => count_visible(&self.ongoing, show),
                    View::Search => count_visible(&self.search_results, show),
                    other => other.watch_status().map(|s| counts.get(s)).unwrap_or(0),
                };
                (*view, count)
            })
            .collect()
    }

    /// What the active view renders
    pub fn listing(&self) -> Listing<'_> {
        self.listing_for(self.active)
    }

    pub fn listing_for(&self, view: View) -> Listing<'_> {
        let show = self.show_mature();
        match (view, view.watch_status()) {
            (_, Some(status)) => {
                let entries = self.watchlist.list_by_status(status);
                if entries.is_empty() {
                    Listing::Empty(EmptyState::EmptyStatus(status))
                } else {
                    Listing::Watchlist(entries)
                }
            }
            (View::Ongoing, None) => {
                let visible = filter_mature(&self.ongoing, show);
                if !visible.is_empty() {
                    Listing::Catalog(visible)
                } else if !self.ongoing.is_empty() {
                    Listing::Empty(EmptyState::AllFiltered { view })
                } else if !self.ongoing_settled {
                    Listing::Empty(EmptyState::Loading)
                } else {
                    Listing::Empty(EmptyState::NoOngoing)
                }
            }
            (_, None) => {
                let visible = filter_mature(&self.search_results, show);
                if !visible.is_empty() {
                    Listing::Catalog(visible)
                } else if !self.search_results.is_empty() {
                    Listing::Empty(EmptyState::AllFiltered { view })
                } else if !self.search_query.is_empty() {
                    Listing::Empty(EmptyState::NoResults {
                        query: self.search_query.clone(),
                    })
                } else {
                    Listing::Empty(EmptyState::SearchPrompt)
                }
            }
        }
    }
}
