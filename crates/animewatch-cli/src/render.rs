//! Terminal rendering for listings, the detail view, and the view selector.

use anime_watch_core::{DetailOverlay, EmptyState, Listing, OverlayState, View};
use anime_watch_models::{CatalogEntry, CatalogEntryDetail, WatchlistEntry};
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;

const SYNOPSIS_CHARS: usize = 80;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect()
}

fn score_cell(score: Option<f64>) -> Cell {
    match score {
        Some(score) => Cell::new(format!("★ {:.2}", score)).fg(Color::Yellow),
        None => Cell::new("N/A"),
    }
}

fn episodes_label(episodes: Option<u32>) -> String {
    episodes
        .map(|n| format!("{} eps", n))
        .unwrap_or_else(|| "? eps".to_string())
}

fn title_cell(entry: &CatalogEntry) -> Cell {
    let mut title = entry.display_title().to_string();
    if entry.is_currently_airing() {
        title.push_str(" [AIRING]");
    }
    Cell::new(title).add_attribute(Attribute::Bold)
}

/// Catalog cards: title with airing badge, score, episodes, and genres
pub fn catalog_table(entries: &[&CatalogEntry], tracked: impl Fn(u64) -> bool) -> Table {
    let mut table = new_table();
    table.set_header(header(&["ID", "Title", "Score", "Episodes", "Year", "Airs", "Genres", ""]));
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.id),
            title_cell(entry),
            score_cell(entry.score),
            Cell::new(episodes_label(entry.episodes)),
            Cell::new(entry.release_year().map(|y| y.to_string()).unwrap_or_default()),
            Cell::new(entry.broadcast.as_ref().map(|b| b.label()).unwrap_or_default()),
            Cell::new(entry.genres.join(", ")),
            if tracked(entry.id) {
                Cell::new("tracked").fg(Color::Green)
            } else {
                Cell::new("")
            },
        ]);
    }
    table
}

pub fn watchlist_table(entries: &[&WatchlistEntry]) -> Table {
    let mut table = new_table();
    table.set_header(header(&["ID", "Title", "Status", "Score", "Episodes", "Added"]));
    for tracked in entries {
        table.add_row(vec![
            Cell::new(tracked.id()),
            title_cell(&tracked.entry),
            Cell::new(tracked.watch_status.label()),
            score_cell(tracked.entry.score),
            Cell::new(episodes_label(tracked.entry.episodes)),
            Cell::new(tracked.date_added.format("%Y-%m-%d").to_string()),
        ]);
    }
    table
}

/// One-line view selector, e.g. `Ongoing (24) | Search (0) | ...`, active view highlighted
pub fn tab_bar(counts: &[(View, usize)], active: View) -> String {
    counts
        .iter()
        .map(|(view, count)| {
            let label = format!("{} ({})", view.label(), count);
            if *view == active {
                label.bright_cyan().bold().to_string()
            } else {
                label.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn print_empty(state: &EmptyState) {
    println!("{}", state.message().dimmed());
    if state.offers_mature_toggle() {
        println!("{}", "Turn on adult content to show them (animewatch adult on)".dimmed());
    }
}

/// Print a listing; catalog entries are marked when already tracked
pub fn print_listing(listing: &Listing<'_>, tracked: impl Fn(u64) -> bool) {
    match listing {
        Listing::Catalog(entries) => {
            println!("{}", catalog_table(entries, tracked));
            for entry in entries {
                if let Some(excerpt) = entry.synopsis_excerpt(SYNOPSIS_CHARS) {
                    println!("  {} {}", format!("#{}", entry.id).dimmed(), excerpt.dimmed());
                }
            }
        }
        Listing::Watchlist(entries) => println!("{}", watchlist_table(entries)),
        Listing::Empty(state) => print_empty(state),
    }
}

/// Key/value rows for a full record; fields that are unknown are left out
pub fn detail_rows(detail: &CatalogEntryDetail) -> Vec<(&'static str, String)> {
    let entry = &detail.entry;
    let mut rows = vec![("Title", entry.display_title().to_string())];
    if entry.title_english.is_some() && entry.display_title() != entry.title {
        rows.push(("Original title", entry.title.clone()));
    }
    if !entry.status.is_empty() {
        rows.push(("Status", entry.status.clone()));
    }
    rows.push((
        "Score",
        entry.score.map(|s| format!("{:.2}", s)).unwrap_or_else(|| "N/A".to_string()),
    ));
    rows.push(("Episodes", episodes_label(entry.episodes)));
    if let Some(duration) = &detail.duration {
        rows.push(("Duration", duration.clone()));
    }
    if let Some(aired) = detail.aired_span_label() {
        rows.push(("Aired", aired));
    }
    if let Some(broadcast) = &entry.broadcast {
        rows.push(("Broadcast", broadcast.label()));
    }
    if let Some(studios) = detail.studios_label() {
        rows.push(("Studios", studios));
    }
    if let Some(source) = &detail.source {
        rows.push(("Source", source.clone()));
    }
    if let Some(members) = detail.members {
        rows.push(("Members", members.to_string()));
    }
    if !entry.genres.is_empty() {
        rows.push(("Genres", entry.genres.join(", ")));
    }
    rows
}

pub fn print_detail(detail: &CatalogEntryDetail) {
    let entry = &detail.entry;
    println!();
    print!("{}", entry.display_title().bright_white().bold());
    if entry.is_currently_airing() {
        print!(" {}", "AIRING".black().on_green());
    }
    println!();

    let mut table = new_table();
    for (key, value) in detail_rows(detail) {
        table.add_row(vec![Cell::new(key).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    println!("{}", table);

    if let Some(synopsis) = &entry.synopsis {
        println!();
        println!("{}", synopsis);
    }
    println!("{}", entry.poster_url().dimmed());
}

/// Print the overlay in whatever state it is in
pub fn print_overlay(overlay: &DetailOverlay) {
    match &overlay.state {
        OverlayState::Loading => println!("{}", "Loading...".dimmed()),
        OverlayState::Loaded(detail) => print_detail(detail),
        OverlayState::Failed => println!("{} {}", "✗".red(), DetailOverlay::FAILED_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anime_watch_models::BroadcastSchedule;

    fn detail() -> CatalogEntryDetail {
        let mut entry = CatalogEntry::new(52991, "Sousou no Frieren").with_genres(["Adventure", "Drama"]);
        entry.title_english = Some("Frieren: Beyond Journey's End".to_string());
        entry.score = Some(9.31);
        entry.episodes = Some(28);
        entry.status = "Finished Airing".to_string();
        entry.broadcast = Some(BroadcastSchedule {
            day: "Fridays".to_string(),
            time: "23:00".to_string(),
            timezone: Some("Asia/Tokyo".to_string()),
        });
        let mut detail = CatalogEntryDetail::from_entry(entry);
        detail.studios = vec!["Madhouse".to_string()];
        detail
    }

    #[test]
    fn test_detail_rows_include_known_fields() {
        let rows = detail_rows(&detail());
        let get = |key: &str| rows.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone());

        assert_eq!(get("Title").as_deref(), Some("Frieren: Beyond Journey's End"));
        assert_eq!(get("Original title").as_deref(), Some("Sousou no Frieren"));
        assert_eq!(get("Score").as_deref(), Some("9.31"));
        assert_eq!(get("Episodes").as_deref(), Some("28 eps"));
        assert_eq!(get("Studios").as_deref(), Some("Madhouse"));
        assert_eq!(get("Genres").as_deref(), Some("Adventure, Drama"));
        assert!(get("Broadcast").is_some());
    }

    #[test]
    fn test_detail_rows_skip_unknown_fields() {
        let detail = CatalogEntryDetail::from_entry(CatalogEntry::new(1, "Bare"));
        let rows = detail_rows(&detail);
        let keys: Vec<_> = rows.iter().map(|(k, _)| *k).collect();

        assert!(!keys.contains(&"Duration"));
        assert!(!keys.contains(&"Studios"));
        assert!(!keys.contains(&"Broadcast"));
        assert!(!keys.contains(&"Original title"));
        assert!(!keys.contains(&"Status"));
        assert_eq!(rows.iter().find(|(k, _)| *k == "Score").map(|(_, v)| v.as_str()), Some("N/A"));
    }

    #[test]
    fn test_catalog_table_has_row_per_entry() {
        let a = CatalogEntry::new(1, "A");
        let b = CatalogEntry::new(2, "B");
        let table = catalog_table(&[&a, &b], |id| id == 2);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("tracked"));
    }

    #[test]
    fn test_tab_bar_lists_every_view() {
        let counts: Vec<_> = View::ALL.iter().map(|v| (*v, 3)).collect();
        let bar = tab_bar(&counts, View::Watching);
        for view in View::ALL {
            assert!(bar.contains(view.label()));
        }
    }
}
