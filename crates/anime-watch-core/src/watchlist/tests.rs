use super::*;
use crate::storage::MemoryStore;
use chrono::{Duration, TimeZone};

fn entry(id: u64, title: &str) -> CatalogEntry {
    CatalogEntry::new(id, title).with_genres(["Action"])
}

fn store() -> (Arc<MemoryStore>, WatchlistStore) {
    let storage = Arc::new(MemoryStore::new());
    let store = WatchlistStore::load(storage.clone());
    (storage, store)
}

fn ids(entries: &[&WatchlistEntry]) -> Vec<u64> {
    entries.iter().map(|e| e.id()).collect()
}

#[test]
fn test_readd_updates_status_and_keeps_date_added() {
    let (_, mut store) = store();
    let added = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

    store.add_at(entry(1, "Mob Psycho 100"), WatchStatus::Watching, added);
    let before = store.find_by_id(1).unwrap().date_added;

    let later = added + Duration::days(30);
    let updated = store.add_at(entry(1, "Mob Psycho 100"), WatchStatus::Completed, later);
    assert_eq!(updated.watch_status, WatchStatus::Completed);
    assert_eq!(updated.date_added, before);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_readd_scenario_moves_between_lists() {
    let (_, mut store) = store();
    store.add(entry(1, "Bocchi the Rock!"), WatchStatus::Watching);
    store.add(entry(1, "Bocchi the Rock!"), WatchStatus::Completed);

    assert!(store.list_by_status(WatchStatus::Watching).is_empty());
    assert_eq!(ids(&store.list_by_status(WatchStatus::Completed)), vec![1]);
    assert!(store.list_by_status(WatchStatus::PlanToWatch).is_empty());
}

#[test]
fn test_remove_is_noop_for_unknown_id() {
    let (_, mut store) = store();
    store.add(entry(1, "Vinland Saga"), WatchStatus::PlanToWatch);

    assert!(store.remove(99).is_none());
    assert_eq!(store.len(), 1);

    let removed = store.remove(1).unwrap();
    assert_eq!(removed.id(), 1);
    assert!(store.is_empty());
    assert!(store.find_by_id(1).is_none());
}

#[test]
fn test_promote_requires_tracked_entry() {
    let (_, mut store) = store();
    assert!(matches!(
        store.promote(7, WatchStatus::Completed),
        Err(StoreError::NotTracked(7))
    ));

    store.add(entry(7, "Haikyu!!"), WatchStatus::Watching);
    let promoted = store.promote(7, WatchStatus::Completed).unwrap();
    assert_eq!(promoted.watch_status, WatchStatus::Completed);
}

#[test]
fn test_random_operation_sequences_keep_ids_unique() {
    // Small LCG so the sequence is reproducible without extra dependencies
    let mut seed: u64 = 0x5eed;
    let mut next = move |bound: u64| {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) % bound
    };

    let (_, mut store) = store();
    for _ in 0..2_000 {
        let id = next(12);
        if next(4) == 0 {
            store.remove(id);
        } else {
            let status = WatchStatus::ALL[next(3) as usize];
            store.add(entry(id, "Entry"), status);
        }

        let mut seen = std::collections::HashSet::new();
        assert!(store.entries().iter().all(|e| seen.insert(e.id())));

        let partitioned: usize = WatchStatus::ALL
            .iter()
            .map(|status| store.list_by_status(*status).len())
            .sum();
        assert_eq!(partitioned, store.len());
        assert_eq!(store.counts().total(), store.len());

        for status in WatchStatus::ALL {
            assert!(store
                .list_by_status(status)
                .iter()
                .all(|e| e.watch_status == status));
        }
    }
}

#[test]
fn test_snapshot_round_trip() {
    let (storage, mut store) = store();
    let base = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
    store.add_at(entry(1, "One"), WatchStatus::Watching, base);
    store.add_at(entry(2, "Two"), WatchStatus::Completed, base + Duration::hours(1));
    store.add_at(entry(3, "Three"), WatchStatus::PlanToWatch, base + Duration::hours(2));
    store.remove(2);

    let reloaded = WatchlistStore::load(storage);
    assert_eq!(reloaded.entries(), store.entries());
    assert_eq!(reloaded.find_by_id(3).unwrap().date_added, base + Duration::hours(2));
    assert_eq!(reloaded.find_by_id(1).unwrap().watch_status, WatchStatus::Watching);
}

#[test]
fn test_corrupt_or_empty_snapshot_loads_empty() {
    for raw in ["", "not json", "{\"id\": 1}", "[{\"id\": \"x\"}]"] {
        let storage = Arc::new(MemoryStore::new());
        storage.set(WATCHLIST_KEY, raw).unwrap();
        let store = WatchlistStore::load(storage);
        assert!(store.is_empty(), "snapshot {:?} should load empty", raw);
    }
}

#[test]
fn test_duplicate_ids_in_snapshot_are_collapsed() {
    let storage = Arc::new(MemoryStore::new());
    let added = Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap();
    let snapshot = vec![
        WatchlistEntry::new(entry(5, "First"), WatchStatus::Watching, added),
        WatchlistEntry::new(entry(5, "Again"), WatchStatus::Completed, added),
    ];
    storage
        .set(WATCHLIST_KEY, &serde_json::to_string(&snapshot).unwrap())
        .unwrap();

    let store = WatchlistStore::load(storage);
    assert_eq!(store.len(), 1);
    assert_eq!(store.find_by_id(5).unwrap().watch_status, WatchStatus::Watching);
}

#[test]
fn test_every_mutation_persists() {
    let (storage, mut store) = store();
    store.add(entry(1, "One"), WatchStatus::Watching);
    let stored: Vec<WatchlistEntry> =
        serde_json::from_str(&storage.get(WATCHLIST_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 1);

    store.remove(1);
    assert_eq!(storage.get(WATCHLIST_KEY).unwrap().as_deref(), Some("[]"));

    store.add(entry(2, "Two"), WatchStatus::PlanToWatch);
    store.clear();
    assert!(store.is_empty());
    assert_eq!(storage.get(WATCHLIST_KEY).unwrap(), None);
}

#[test]
fn test_file_backed_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn KeyValueStore> = Arc::new(crate::storage::FileStore::new(dir.path()));

    let mut store = WatchlistStore::load(storage.clone());
    store.add(entry(11, "Cowboy Bebop"), WatchStatus::Completed);

    let reloaded = WatchlistStore::load(storage);
    assert_eq!(ids(&reloaded.list_by_status(WatchStatus::Completed)), vec![11]);
}
