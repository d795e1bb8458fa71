//! Jikan v4 wire types and their normalization into catalog entries.

use anime_watch_models::{AiredDates, BroadcastSchedule, CatalogEntry, CatalogEntryDetail};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct JikanEnvelope {
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct JikanNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct JikanImageSet {
    image_url: Option<String>,
    large_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JikanImages {
    jpg: Option<JikanImageSet>,
}

#[derive(Debug, Deserialize)]
struct JikanAired {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JikanBroadcast {
    day: Option<String>,
    time: Option<String>,
    timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JikanAnime {
    mal_id: u64,
    title: String,
    title_english: Option<String>,
    images: Option<JikanImages>,
    score: Option<f64>,
    episodes: Option<u32>,
    status: Option<String>,
    synopsis: Option<String>,
    genres: Option<Vec<JikanNamed>>,
    year: Option<i32>,
    aired: Option<JikanAired>,
    broadcast: Option<JikanBroadcast>,
    airing: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct JikanAnimeFull {
    #[serde(flatten)]
    anime: JikanAnime,
    members: Option<u64>,
    duration: Option<String>,
    studios: Option<Vec<JikanNamed>>,
    source: Option<String>,
}

fn parse_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            debug!("Ignoring unparseable air date '{}': {}", raw, e);
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<JikanAnime> for CatalogEntry {
    fn from(anime: JikanAnime) -> Self {
        let (image_url, large_image_url) = anime
            .images
            .and_then(|images| images.jpg)
            .map(|jpg| (jpg.image_url.unwrap_or_default(), non_blank(jpg.large_image_url)))
            .unwrap_or_default();

        let aired = anime.aired.and_then(|aired| {
            let from = parse_timestamp(aired.from);
            let to = parse_timestamp(aired.to);
            if from.is_none() && to.is_none() {
                None
            } else {
                Some(AiredDates { from, to })
            }
        });

        // Jikan sends a broadcast block with null fields for titles without a weekly slot
        let broadcast = anime.broadcast.and_then(|b| match (non_blank(b.day), non_blank(b.time)) {
            (Some(day), Some(time)) => Some(BroadcastSchedule {
                day,
                time,
                timezone: non_blank(b.timezone),
            }),
            _ => None,
        });

        CatalogEntry {
            id: anime.mal_id,
            title: anime.title,
            title_english: non_blank(anime.title_english),
            image_url,
            large_image_url,
            score: anime.score.filter(|s| (0.0..=10.0).contains(s)),
            episodes: anime.episodes.filter(|e| *e > 0),
            status: anime.status.unwrap_or_default(),
            genres: anime
                .genres
                .unwrap_or_default()
                .into_iter()
                .map(|g| g.name)
                .collect(),
            year: anime.year,
            aired,
            broadcast,
            airing: anime.airing,
            synopsis: non_blank(anime.synopsis),
        }
    }
}

impl From<JikanAnimeFull> for CatalogEntryDetail {
    fn from(full: JikanAnimeFull) -> Self {
        CatalogEntryDetail {
            entry: full.anime.into(),
            members: full.members,
            duration: non_blank(full.duration),
            studios: full
                .studios
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.name)
                .collect(),
            source: non_blank(full.source),
        }
    }
}

/// Pull the `data` member out of a response body.
///
/// Returns None when the body is not an envelope or `data` is missing or null.
fn envelope_data(body: Value) -> Option<Value> {
    match serde_json::from_value::<JikanEnvelope>(body) {
        Ok(envelope) => envelope.data.filter(|data| !data.is_null()),
        Err(e) => {
            debug!("Response is not a data envelope: {}", e);
            None
        }
    }
}

/// Normalize a list response (`{ data: [...] }`).
///
/// None when `data` is absent or not an array. Items that do not look like an anime
/// record are skipped.
pub fn entries_from_body(body: Value) -> Option<Vec<CatalogEntry>> {
    let data = envelope_data(body)?;
    let Value::Array(items) = data else {
        debug!("Expected an array under data");
        return None;
    };

    let total = items.len();
    let entries: Vec<CatalogEntry> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<JikanAnime>(item) {
            Ok(anime) => Some(anime.into()),
            Err(e) => {
                debug!("Skipping malformed catalog item: {}", e);
                None
            }
        })
        .collect();

    if entries.len() < total {
        debug!("Normalized {} of {} catalog items", entries.len(), total);
    }

    Some(entries)
}

/// Normalize a detail response (`{ data: {...} }`); None when the record is absent or malformed
pub fn detail_from_body(body: Value) -> Option<CatalogEntryDetail> {
    let data = envelope_data(body)?;
    match serde_json::from_value::<JikanAnimeFull>(data) {
        Ok(full) => Some(full.into()),
        Err(e) => {
            debug!("Malformed detail record: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    fn frieren() -> Value {
        json!({
            "mal_id": 52991,
            "title": "Sousou no Frieren",
            "title_english": "Frieren: Beyond Journey's End",
            "images": {
                "jpg": {
                    "image_url": "https://cdn.myanimelist.net/images/anime/1015/138006.jpg",
                    "large_image_url": "https://cdn.myanimelist.net/images/anime/1015/138006l.jpg"
                }
            },
            "score": 9.3,
            "episodes": 28,
            "status": "Finished Airing",
            "synopsis": "During their decade-long quest to defeat the Demon King...",
            "genres": [
                { "mal_id": 2, "type": "anime", "name": "Adventure" },
                { "mal_id": 8, "type": "anime", "name": "Drama" }
            ],
            "year": 2023,
            "aired": { "from": "2023-09-29T00:00:00+00:00", "to": "2024-03-22T00:00:00+00:00" },
            "broadcast": { "day": "Fridays", "time": "23:00", "timezone": "Asia/Tokyo", "string": "Fridays at 23:00 (JST)" },
            "airing": false
        })
    }

    #[test]
    fn test_entries_from_body_normalizes_fields() {
        let entries = entries_from_body(json!({ "data": [frieren()] })).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.id, 52991);
        assert_eq!(entry.display_title(), "Frieren: Beyond Journey's End");
        assert!(entry.poster_url().ends_with("138006l.jpg"));
        assert_eq!(entry.score, Some(9.3));
        assert_eq!(entry.episodes, Some(28));
        assert_eq!(entry.genres, vec!["Adventure".to_string(), "Drama".to_string()]);
        assert_eq!(entry.aired.as_ref().unwrap().from.unwrap().year(), 2023);
        assert_eq!(entry.broadcast.as_ref().unwrap().label(), "Fridays at 23:00");
        assert_eq!(entry.airing, Some(false));
    }

    #[test]
    fn test_missing_data_is_absent() {
        assert!(entries_from_body(json!({ "pagination": {} })).is_none());
        assert!(entries_from_body(json!({ "data": null })).is_none());
        assert!(entries_from_body(json!({ "data": { "mal_id": 1 } })).is_none());
        assert!(entries_from_body(json!([1, 2, 3])).is_none());
        assert!(detail_from_body(json!({ "status": 404, "message": "Not Found" })).is_none());
    }

    #[test]
    fn test_malformed_items_are_skipped() {
        let body = json!({ "data": [frieren(), { "title": "no id" }, { "mal_id": 7 }] });
        let entries = entries_from_body(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 52991);
    }

    #[test]
    fn test_sparse_record_uses_absent_values() {
        let body = json!({
            "data": [{
                "mal_id": 1,
                "title": "Sparse",
                "episodes": 0,
                "score": null,
                "genres": null,
                "aired": { "from": "not a date", "to": null },
                "broadcast": { "day": null, "time": null, "timezone": null, "string": "Unknown" }
            }]
        });
        let entry = entries_from_body(body).unwrap().remove(0);
        assert_eq!(entry.episodes, None);
        assert_eq!(entry.score, None);
        assert!(entry.genres.is_empty());
        assert_eq!(entry.aired, None);
        assert_eq!(entry.broadcast, None);
        assert_eq!(entry.image_url, "");
        assert_eq!(entry.status, "");
    }

    #[test]
    fn test_detail_from_body_reads_extended_fields() {
        let mut record = frieren();
        record["members"] = json!(1_050_000);
        record["duration"] = json!("24 min per ep");
        record["source"] = json!("Manga");
        record["studios"] = json!([{ "mal_id": 11, "name": "Madhouse" }]);

        let detail = detail_from_body(json!({ "data": record })).unwrap();
        assert_eq!(detail.id(), 52991);
        assert_eq!(detail.members, Some(1_050_000));
        assert_eq!(detail.duration.as_deref(), Some("24 min per ep"));
        assert_eq!(detail.studios_label().as_deref(), Some("Madhouse"));
        assert_eq!(detail.source.as_deref(), Some("Manga"));
        assert_eq!(detail.aired_span_label().as_deref(), Some("2023 - 2024"));
    }
}
