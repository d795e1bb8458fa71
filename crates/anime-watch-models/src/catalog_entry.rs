use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// One title as returned by the catalog, normalized at the API boundary.
///
/// Immutable once fetched. The same shape is flattened into persisted watchlist entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_english: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_image_url: Option<String>,
    /// 0.0 - 10.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,
    /// Lifecycle status as reported by the catalog ("Currently Airing", "Finished Airing", ...)
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aired: Option<AiredDates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<BroadcastSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiredDates {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Weekly broadcast slot, e.g. Saturdays at 23:00 (JST)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BroadcastSchedule {
    pub day: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl CatalogEntry {
    /// Minimal entry; the remaining fields are filled in by the catalog normalizer or tests.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            title_english: None,
            image_url: String::new(),
            large_image_url: None,
            score: None,
            episodes: None,
            status: String::new(),
            genres: Vec::new(),
            year: None,
            aired: None,
            broadcast: None,
            airing: None,
            synopsis: None,
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// English title when the catalog has one, otherwise the primary title
    pub fn display_title(&self) -> &str {
        match self.title_english.as_deref() {
            Some(english) if !english.trim().is_empty() => english,
            _ => &self.title,
        }
    }

    pub fn poster_url(&self) -> &str {
        match self.large_image_url.as_deref() {
            Some(large) if !large.is_empty() => large,
            _ => &self.image_url,
        }
    }

    pub fn is_currently_airing(&self) -> bool {
        self.airing.unwrap_or(false)
    }

    /// First `max_chars` characters of the synopsis followed by an ellipsis
    pub fn synopsis_excerpt(&self, max_chars: usize) -> Option<String> {
        let synopsis = self.synopsis.as_deref()?;
        let excerpt: String = synopsis.chars().take(max_chars).collect();
        Some(format!("{}...", excerpt.trim_end()))
    }

    /// Release year, falling back to the year of the first air date
    pub fn release_year(&self) -> Option<i32> {
        self.year
            .or_else(|| self.aired.as_ref().and_then(|a| a.from).map(|from| from.year()))
    }
}

impl AiredDates {
    /// "2019" or "2019 - 2021"; None when the start date is unknown
    pub fn span_label(&self) -> Option<String> {
        let from = self.from?;
        Some(match self.to {
            Some(to) => format!("{} - {}", from.year(), to.year()),
            None => from.year().to_string(),
        })
    }
}

impl BroadcastSchedule {
    /// "Saturdays at 23:00"
    pub fn label(&self) -> String {
        format!("{} at {}", self.day, self.time)
    }
}
