use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use crate::{
    db::{KeyValueStore, StorageKey},
    error::AppResult,
    models::{FavoritesList, MovieId, MovieSummary},
};

/// Process-wide favorites list backed by a key-value store
///
/// Every mutation writes the new list to storage before it becomes the
/// in-memory copy, so both always agree once a call returns. A failed write
/// leaves the in-memory list untouched and returns the error.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    favorites: RwLock<FavoritesList>,
    changes: watch::Sender<FavoritesList>,
}

impl FavoritesStore {
    /// Loads the persisted list, falling back to an empty one
    ///
    /// Missing, unreadable and malformed entries all start the session with no
    /// favorites; the stored shape is not versioned or migrated.
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        // Any failure to read or decode starts the session empty
        let favorites = match storage.get(&StorageKey::Favorites).await {
            Ok(Some(json)) => match serde_json::from_str::<FavoritesList>(&json) {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        backend = storage.name(),
                        "Stored favorites are malformed, starting empty"
                    );
                    FavoritesList::new()
                }
            },
            Ok(None) => FavoritesList::new(),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    kind = ?e.kind(),
                    backend = storage.name(),
                    "Failed to read stored favorites, starting empty"
                );
                FavoritesList::new()
            }
        };

        tracing::info!(
            count = favorites.len(),
            backend = storage.name(),
            "Favorites loaded"
        );

        // Observers start from the loaded list
        let (changes, _) = watch::channel(favorites.clone());

        Self {
            storage,
            favorites: RwLock::new(favorites),
            changes,
        }
    }

    /// Current list
    pub async fn list(&self) -> FavoritesList {
        self.favorites.read().await.clone()
    }

    /// Receiver notified with the new list after every successful mutation
    pub fn subscribe(&self) -> watch::Receiver<FavoritesList> {
        self.changes.subscribe()
    }

    /// Appends `movie` to the end of the list
    ///
    /// No uniqueness check: adding the same title twice stores it twice.
    pub async fn add(&self, movie: MovieSummary) -> AppResult<FavoritesList> {
        // Held across the write so concurrent mutations apply in order
        let mut favorites = self.favorites.write().await;
        let movie_id = movie.id.clone();
        let updated = favorites.with_added(movie);

        // Storage first; memory never runs ahead of it
        self.persist(&updated).await?;
        *favorites = updated.clone();

        // Notify observers
        self.changes.send_replace(updated.clone());

        tracing::info!(movie_id = %movie_id, count = updated.len(), "Favorite added");
        Ok(updated)
    }

    /// Removes every entry sharing `movie`'s identifier
    pub async fn remove(&self, movie: &MovieSummary) -> AppResult<FavoritesList> {
        self.remove_id(&movie.id).await
    }

    /// Removes every entry with identifier `id`
    ///
    /// Storage is rewritten even when nothing matched.
    pub async fn remove_id(&self, id: &MovieId) -> AppResult<FavoritesList> {
        let mut favorites = self.favorites.write().await;
        let updated = favorites.without(id);

        // Storage first; memory never runs ahead of it
        self.persist(&updated).await?;
        *favorites = updated.clone();
        self.changes.send_replace(updated.clone());

        tracing::info!(movie_id = %id, count = updated.len(), "Favorite removed");
        Ok(updated)
    }

    async fn persist(&self, favorites: &FavoritesList) -> AppResult<()> {
        let json = serde_json::to_string(favorites)?;
        self.storage
            .set(&StorageKey::Favorites, json)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    backend = self.storage.name(),
                    "Failed to persist favorites"
                );
                e
            })
    }
}
