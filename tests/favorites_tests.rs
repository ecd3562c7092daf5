use std::path::PathBuf;

use cinefind::constants::favorites::STORAGE_KEY;
use cinefind::favorites::{FavoritesError, FavoritesStore, JsonFileStorage};
use cinefind::models::{MovieId, MovieRecord};

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("cinefind-favorites-{}", uuid::Uuid::new_v4()))
}

fn record(json: serde_json::Value) -> MovieRecord {
    serde_json::from_value(json).unwrap()
}

#[test]
fn test_favorites_survive_restart() {
    let dir = temp_dir();

    {
        let mut store = FavoritesStore::initialize(JsonFileStorage::new(&dir, STORAGE_KEY));
        store
            .add(record(serde_json::json!({"id": 603, "title": "The Matrix"})))
            .unwrap();
        store
            .add(record(serde_json::json!({"id": "27205", "title": "Inception"})))
            .unwrap();
        store
            .add(record(serde_json::json!({"$id": "doc-1", "title": "Heat"})))
            .unwrap();
    }

    let storage = JsonFileStorage::new(&dir, STORAGE_KEY);
    assert!(storage.path().ends_with("favorites.json"));

    let store = FavoritesStore::initialize(storage);
    let titles: Vec<&str> = store.favorites().iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["The Matrix", "Inception", "Heat"]);
    assert!(store.is_favorite(&MovieId::from(27205u64)));
    assert!(store.is_favorite(&"doc-1".parse().unwrap()));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_corrupt_file_starts_empty_and_is_replaced() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("favorites.json");
    std::fs::write(&path, "{not json").unwrap();

    let mut store = FavoritesStore::initialize(JsonFileStorage::new(&dir, STORAGE_KEY));
    assert!(store.is_empty());

    store
        .add(record(serde_json::json!({"id": 42, "title": "A"})))
        .unwrap();

    let persisted: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(persisted.as_array().unwrap().len(), 1);
    assert_eq!(persisted[0]["id"], 42);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_failed_write_keeps_mutation() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    // A file where the data directory should be makes every save fail.
    let blocker = dir.join("blocked");
    std::fs::write(&blocker, "").unwrap();

    let mut store = FavoritesStore::initialize(JsonFileStorage::new(&blocker, STORAGE_KEY));
    let err = store
        .add(record(serde_json::json!({"id": 7, "title": "Se7en"})))
        .unwrap_err();

    assert!(matches!(err, FavoritesError::Storage(_)));
    assert!(store.is_favorite(&MovieId::from(7u64)));

    std::fs::remove_dir_all(&dir).ok();
}
