use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{load_persisted, save_persisted, Storage, VIEW_HISTORY_KEY};

const VIEW_HISTORY_VERSION: u32 = 0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewHistoryState {
    view_history: Vec<String>,
}

/// Recently viewed property ids, most recent first, at most
/// [`ViewHistoryStore::MAX_ENTRIES`] long.
pub struct ViewHistoryStore {
    storage: Arc<dyn Storage>,
    entries: Vec<String>,
}

impl ViewHistoryStore {
    pub const MAX_ENTRIES: usize = 20;

    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let stored = load_persisted::<ViewHistoryState>(
            storage.as_ref(),
            VIEW_HISTORY_KEY,
            VIEW_HISTORY_VERSION,
        )
        .unwrap_or_default()
        .view_history;

        let mut entries: Vec<String> = Vec::with_capacity(Self::MAX_ENTRIES);
        for id in stored {
            if !entries.contains(&id) {
                entries.push(id);
            }
        }
        entries.truncate(Self::MAX_ENTRIES);
        Self { storage, entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves `id` to the front, dropping its older occurrence and anything
    /// past the cap.
    pub fn record(&mut self, id: &str) {
        self.entries.retain(|e| e != id);
        self.entries.insert(0, id.to_owned());
        self.entries.truncate(Self::MAX_ENTRIES);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&self) {
        save_persisted(
            self.storage.as_ref(),
            VIEW_HISTORY_KEY,
            VIEW_HISTORY_VERSION,
            &ViewHistoryState {
                view_history: self.entries.clone(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> (Arc<dyn Storage>, ViewHistoryStore) {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let store = ViewHistoryStore::load(Arc::clone(&storage));
        (storage, store)
    }

    #[test]
    fn record_puts_most_recent_first() {
        let (_, mut history) = store();
        history.record("a");
        history.record("b");
        history.record("c");
        assert_eq!(history.entries(), ["c", "b", "a"]);
    }

    #[test]
    fn recording_same_id_twice_keeps_one_at_front() {
        let (_, mut history) = store();
        history.record("a");
        history.record("b");
        history.record("a");
        assert_eq!(history.entries(), ["a", "b"]);
        assert_eq!(history.entries().iter().filter(|e| *e == "a").count(), 1);
    }

    #[test]
    fn never_exceeds_twenty_entries() {
        let (_, mut history) = store();
        for i in 0..35 {
            history.record(&format!("p{i}"));
            assert!(history.len() <= ViewHistoryStore::MAX_ENTRIES);
        }
        assert_eq!(history.len(), 20);
        assert_eq!(history.entries()[0], "p34");
        assert_eq!(history.entries()[19], "p15");
    }

    #[test]
    fn revisiting_evicted_id_reinserts_at_front() {
        let (_, mut history) = store();
        for i in 0..21 {
            history.record(&format!("p{i}"));
        }
        assert!(!history.entries().contains(&"p0".to_string()));
        history.record("p0");
        assert_eq!(history.entries()[0], "p0");
        assert_eq!(history.len(), 20);
    }

    #[test]
    fn history_survives_reload_and_clear() {
        let (storage, mut history) = store();
        history.record("a");
        history.record("b");
        let reloaded = ViewHistoryStore::load(Arc::clone(&storage));
        assert_eq!(reloaded.entries(), ["b", "a"]);

        history.clear();
        assert!(ViewHistoryStore::load(storage).is_empty());
    }

    #[test]
    fn load_enforces_cap_and_uniqueness() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let ids: Vec<String> = (0..25).map(|i| format!("p{}", i % 22)).collect();
        let blob = serde_json::json!({ "state": { "viewHistory": ids }, "version": 0 });
        storage
            .set_item(VIEW_HISTORY_KEY, &blob.to_string())
            .unwrap();
        let history = ViewHistoryStore::load(storage);
        assert_eq!(history.len(), 20);
        assert_eq!(history.entries()[0], "p0");
    }
}
