use anime_watch_models::HasGenres;

/// Genres hidden while mature content is switched off (exact, case-sensitive match)
pub const MATURE_GENRES: [&str; 3] = ["Hentai", "Ecchi", "Erotica"];

pub fn is_mature<T: HasGenres + ?Sized>(entry: &T) -> bool {
    entry
        .genre_names()
        .iter()
        .any(|genre| MATURE_GENRES.contains(&genre.as_str()))
}

/// Entries to display under the current maturity preference, in input order.
///
/// With `show_mature` set every entry is returned.
pub fn filter_mature<T: HasGenres>(entries: &[T], show_mature: bool) -> Vec<&T> {
    if show_mature {
        return entries.iter().collect();
    }
    entries.iter().filter(|entry| !is_mature(*entry)).collect()
}

pub fn count_visible<T: HasGenres>(entries: &[T], show_mature: bool) -> usize {
    if show_mature {
        return entries.len();
    }
    entries.iter().filter(|entry| !is_mature(*entry)).count()
}
