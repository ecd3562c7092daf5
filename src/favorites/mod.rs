//! Favorites store.
//!
//! Keeps the user's favorited movies in insertion order and writes the whole
//! collection through to storage after every change. Storage is only read
//! once, when the store is initialized.

mod storage;

pub use storage::{FavoritesStorage, JsonFileStorage, MemoryStorage};

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::models::{FavoriteMovie, MovieId, MovieRecord};

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Movie record has no id")]
    MissingId,

    #[error("Failed to persist favorites: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Failed to serialize favorites: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct FavoritesStore {
    storage: Box<dyn FavoritesStorage>,
    favorites: Vec<FavoriteMovie>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("favorites", &self.favorites.len())
            .finish_non_exhaustive()
    }
}

#[allow(clippy::cast_precision_loss)]
fn record_count(count: usize) {
    metrics::gauge!("favorites_count").set(count as f64);
}

impl FavoritesStore {
    /// Loads the persisted collection. Missing or unreadable data yields an
    /// empty store; the failure is logged and never returned.
    pub fn initialize(storage: impl FavoritesStorage + 'static) -> Self {
        let favorites = match storage.load() {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|e| {
                error!(error = %e, "Failed to load favorites, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(error = %e, "Failed to read favorites storage, starting empty");
                Vec::new()
            }
        };

        debug!(count = favorites.len(), "Favorites loaded");
        record_count(favorites.len());

        Self {
            storage: Box::new(storage),
            favorites,
        }
    }

    /// Adds the movie unless a favorite with the same id exists.
    ///
    /// Returns `true` when the movie was inserted.
    pub fn add(&mut self, record: impl Into<MovieRecord>) -> Result<bool, FavoritesError> {
        let favorite = record
            .into()
            .normalize()
            .ok_or(FavoritesError::MissingId)?;

        if self.is_favorite(&favorite.id) {
            return Ok(false);
        }

        debug!(id = %favorite.id, title = %favorite.title, "Adding favorite");
        self.favorites.push(favorite);
        record_count(self.favorites.len());
        self.persist()?;
        Ok(true)
    }

    /// Removes every favorite with this id.
    ///
    /// Returns `true` when something was removed. Removing an unknown id
    /// leaves the collection and the storage untouched.
    pub fn remove(&mut self, id: &MovieId) -> Result<bool, FavoritesError> {
        let before = self.favorites.len();
        self.favorites.retain(|f| &f.id != id);

        if self.favorites.len() == before {
            return Ok(false);
        }

        debug!(id = %id, "Removed favorite");
        record_count(self.favorites.len());
        self.persist()?;
        Ok(true)
    }

    /// Removes the movie when it is a favorite, adds it otherwise.
    ///
    /// Returns whether the movie is a favorite afterwards.
    pub fn toggle(&mut self, record: impl Into<MovieRecord>) -> Result<bool, FavoritesError> {
        let record = record.into();
        let id = record.canonical_id().cloned().ok_or(FavoritesError::MissingId)?;

        if self.is_favorite(&id) {
            self.remove(&id)?;
            Ok(false)
        } else {
            self.add(record)?;
            Ok(true)
        }
    }

    #[must_use]
    pub fn is_favorite(&self, id: &MovieId) -> bool {
        self.favorites.iter().any(|f| &f.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &MovieId) -> Option<&FavoriteMovie> {
        self.favorites.iter().find(|f| &f.id == id)
    }

    /// Favorites in the order they were added.
    #[must_use]
    pub fn favorites(&self) -> &[FavoriteMovie] {
        &self.favorites
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    fn persist(&mut self) -> Result<(), FavoritesError> {
        let encoded = serde_json::to_string(&self.favorites)?;
        self.storage.save(&encoded).map_err(|e| {
            error!(error = %e, "Failed to persist favorites");
            FavoritesError::from(e)
        })
    }
}

/// Parses a persisted array. Entries without any id are skipped and
/// duplicate ids keep their first occurrence.
fn decode(raw: &str) -> Result<Vec<FavoriteMovie>, serde_json::Error> {
    let records: Vec<MovieRecord> = serde_json::from_str(raw)?;
    let mut favorites: Vec<FavoriteMovie> = Vec::with_capacity(records.len());

    for record in records {
        match record.normalize() {
            Some(favorite) if favorites.iter().any(|f| f.id == favorite.id) => {
                debug!(id = %favorite.id, "Skipping duplicate persisted favorite");
            }
            Some(favorite) => favorites.push(favorite),
            None => warn!("Skipping persisted favorite without an id"),
        }
    }

    Ok(favorites)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> MovieRecord {
        serde_json::from_str(json).unwrap()
    }

    fn empty_store() -> (FavoritesStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (FavoritesStore::initialize(storage.clone()), storage)
    }

    #[test]
    fn test_add_then_remove() {
        let (mut store, _) = empty_store();
        let id = MovieId::from(27205u64);

        assert!(store.add(record(r#"{"id": 27205, "title": "Inception"}"#)).unwrap());
        assert!(store.is_favorite(&id));

        assert!(store.remove(&id).unwrap());
        assert!(!store.is_favorite(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let (mut store, _) = empty_store();

        assert!(store.add(record(r#"{"id": 42, "title": "A"}"#)).unwrap());
        assert!(!store.add(record(r#"{"id": 42, "title": "A"}"#)).unwrap());

        assert_eq!(store.len(), 1);
        assert_eq!(store.favorites()[0].id, MovieId::from(42u64));
    }

    #[test]
    fn test_string_and_numeric_ids_match() {
        let (mut store, _) = empty_store();
        store.add(record(r#"{"id": "42", "title": "A"}"#)).unwrap();

        assert!(!store.add(record(r#"{"id": 42, "title": "A"}"#)).unwrap());
        assert!(store.is_favorite(&MovieId::from(42u64)));
    }

    #[test]
    fn test_secondary_id_is_found() {
        let (mut store, _) = empty_store();
        store
            .add(record(r#"{"$id": "65f1c0aa", "title": "From trending"}"#))
            .unwrap();

        assert!(store.is_favorite(&MovieId::parse("65f1c0aa").unwrap()));
    }

    #[test]
    fn test_add_without_id_is_rejected() {
        let (mut store, storage) = empty_store();
        let err = store.add(record(r#"{"title": "Nameless"}"#)).unwrap_err();

        assert!(matches!(err, FavoritesError::MissingId));
        assert!(store.is_empty());
        assert!(storage.contents().is_none());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let (mut store, storage) = empty_store();
        store.add(record(r#"{"id": 1, "title": "One"}"#)).unwrap();
        let persisted = storage.contents();

        assert!(!store.remove(&MovieId::from(99u64)).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(storage.contents(), persisted);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let (mut store, storage) = empty_store();

        store.add(record(r#"{"id": 1, "title": "One"}"#)).unwrap();
        store.add(record(r#"{"id": 2, "title": "Two"}"#)).unwrap();
        let written: Vec<FavoriteMovie> =
            serde_json::from_str(&storage.contents().unwrap()).unwrap();
        assert_eq!(written.len(), 2);

        store.remove(&MovieId::from(1u64)).unwrap();
        let written: Vec<FavoriteMovie> =
            serde_json::from_str(&storage.contents().unwrap()).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].title, "Two");
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let (mut store, storage) = empty_store();
        for (id, title) in [(3u64, "C"), (1, "A"), (2, "B")] {
            store
                .add(MovieRecord {
                    id: Some(MovieId::from(id)),
                    title: Some(title.to_string()),
                    vote_average: Some(7.5),
                    ..MovieRecord::default()
                })
                .unwrap();
        }

        let reloaded = FavoritesStore::initialize(storage);
        assert_eq!(reloaded.favorites(), store.favorites());
    }

    #[test]
    fn test_initialize_reports_count_gauge() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let storage =
            MemoryStorage::with_contents(r#"[{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]"#);

        let store = metrics::with_local_recorder(&recorder, || FavoritesStore::initialize(storage));

        assert_eq!(store.len(), 2);
        assert!(handle.render().contains("favorites_count 2"));
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let store = FavoritesStore::initialize(MemoryStorage::with_contents("{not json"));
        assert!(store.is_empty());

        let store = FavoritesStore::initialize(MemoryStorage::with_contents(r#"{"id": 1}"#));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_normalizes_legacy_entries() {
        let raw = r#"[
            {"id": 5, "title": "Five"},
            {"$id": "doc-9", "title": "Nine"},
            {"title": "No id"},
            {"id": "5", "title": "Five again"}
        ]"#;

        let store = FavoritesStore::initialize(MemoryStorage::with_contents(raw));
        assert_eq!(store.len(), 2);
        assert_eq!(store.favorites()[0].title, "Five");
        assert!(store.is_favorite(&MovieId::parse("doc-9").unwrap()));
    }

    #[test]
    fn test_toggle() {
        let (mut store, _) = empty_store();
        let movie = r#"{"id": 603, "title": "The Matrix"}"#;

        assert!(store.toggle(record(movie)).unwrap());
        assert!(!store.toggle(record(movie)).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_returns_stored_record() {
        let (mut store, _) = empty_store();
        store
            .add(record(r#"{"id": 11, "title": "Star Wars", "original_language": "en"}"#))
            .unwrap();

        let favorite = store.get(&MovieId::from(11u64)).unwrap();
        assert_eq!(favorite.original_language.as_deref(), Some("en"));
    }
}
