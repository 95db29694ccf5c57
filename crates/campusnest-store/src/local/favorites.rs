use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{load_persisted, save_persisted, Storage, FAVORITES_KEY};

const FAVORITES_VERSION: u32 = 0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FavoritesState {
    favorites: Vec<String>,
}

/// Saved property ids, deduplicated, in the order they were added.
///
/// Every mutation is written through to storage before returning.
pub struct FavoritesStore {
    storage: Arc<dyn Storage>,
    ids: Vec<String>,
}

impl FavoritesStore {
    /// Restores favorites persisted by an earlier session.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let mut ids =
            load_persisted::<FavoritesState>(storage.as_ref(), FAVORITES_KEY, FAVORITES_VERSION)
                .unwrap_or_default()
                .favorites;
        dedup_in_order(&mut ids);
        Self { storage, ids }
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Linear scan; the list is small.
    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.iter().any(|f| f == id)
    }

    /// Adds `id` if absent. Returns `true` if it was added.
    pub fn add(&mut self, id: &str) -> bool {
        if self.is_favorite(id) {
            return false;
        }
        self.ids.push(id.to_owned());
        self.persist();
        true
    }

    /// Removes `id` if present. Returns `true` if it was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|f| f != id);
        if self.ids.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Flips membership and returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.add(id)
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
    }

    fn persist(&self) {
        save_persisted(
            self.storage.as_ref(),
            FAVORITES_KEY,
            FAVORITES_VERSION,
            &FavoritesState {
                favorites: self.ids.clone(),
            },
        );
    }
}

fn dedup_in_order(ids: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}
