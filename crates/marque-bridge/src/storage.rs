//! Key-value storage seam shared by all three contexts.

use std::sync::Mutex;

use crate::message::StorageMap;

/// A flat string-keyed store: the page's local storage on one side, the
/// extension's durable storage on the other.
///
/// Values are strings only; anything structured goes through a
/// [`crate::cell::StorageCell`].
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);

    /// The entire store as a flat map.
    fn snapshot(&self) -> StorageMap;

    /// Drop every key.
    fn clear(&self);

    /// Replace the entire contents with `data`. Not a merge: keys absent
    /// from `data` are gone afterwards.
    fn replace(&self, data: &StorageMap) {
        self.clear();
        for (key, value) in data {
            self.set(key, value);
        }
    }
}

/// In-memory store for tests and headless contexts.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    inner: Mutex<StorageMap>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StorageMap> {
        // A poisoned map still holds valid string data.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    fn snapshot(&self) -> StorageMap {
        self.lock().clone()
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_remove() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));

        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn replace_drops_stale_keys() {
        let store = MemoryKeyValueStore::new();
        store.set("stale", "old");
        store.set("kept", "old");

        let mut data = StorageMap::new();
        data.insert("kept".into(), "new".into());
        data.insert("fresh".into(), "1".into());
        store.replace(&data);

        assert_eq!(store.snapshot(), data);
        assert_eq!(store.get("stale"), None);
    }

    #[test]
    fn clear_empties_the_store() {
        let store = MemoryKeyValueStore::new();
        store.set("a", "1");
        store.set("b", "2");
        store.clear();
        assert!(store.snapshot().is_empty());
    }
}
