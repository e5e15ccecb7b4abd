//! Typed storage cells over the key-value seam.
//!
//! A cell binds one key of a string store to a serde type, with a fallback
//! for missing or undecodable values. The shipped cells cover the keys both
//! sides of the bridge care about: theme, auth tokens, font family.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

/// Well-known cell keys mirrored between website and extension.
pub const THEME_KEY: &str = "theme-storage-key";
pub const AUTH_TOKEN_KEY: &str = "auth-token-storage-key";
pub const REFRESH_TOKEN_KEY: &str = "refresh-token-storage-key";
pub const FONT_FAMILY_KEY: &str = "font-family-storage-key";

type Listener<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A typed view over one key of a string store.
///
/// Values round-trip through JSON; a missing or undecodable value reads as
/// the fallback. Listeners fire after every write made through this cell.
pub struct StorageCell<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    fallback: T,
    listeners: Mutex<Vec<Listener<T>>>,
}

impl<T: Serialize + DeserializeOwned + Clone> StorageCell<T> {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, fallback: T) -> Self {
        Self {
            store,
            key: key.into(),
            fallback,
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> T {
        self.store
            .get(&self.key)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn set(&self, value: T) {
        match serde_json::to_string(&value) {
            Ok(raw) => {
                self.store.set(&self.key, &raw);
                self.notify(&value);
            }
            Err(e) => tracing::error!("failed to encode {}: {}", self.key, e),
        }
    }

    /// Read-modify-write against the current (or fallback) value.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        self.set(f(self.get()));
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(Box::new(listener));
        }
    }

    fn notify(&self, value: &T) {
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener(value);
            }
        }
    }
}

/// Website color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl StorageCell<Theme> {
    /// Flip between light and dark and persist the result.
    pub fn toggle(&self) {
        self.update(Theme::toggled);
    }
}

/// The theme cell, light by default.
pub fn theme_cell(store: Arc<dyn KeyValueStore>) -> StorageCell<Theme> {
    StorageCell::new(store, THEME_KEY, Theme::Light)
}

/// The auth token cell, empty by default.
pub fn auth_token_cell(store: Arc<dyn KeyValueStore>) -> StorageCell<String> {
    StorageCell::new(store, AUTH_TOKEN_KEY, String::new())
}

/// The refresh token cell, empty by default.
pub fn refresh_token_cell(store: Arc<dyn KeyValueStore>) -> StorageCell<String> {
    StorageCell::new(store, REFRESH_TOKEN_KEY, String::new())
}

/// The font family cell, empty by default.
pub fn font_family_cell(store: Arc<dyn KeyValueStore>) -> StorageCell<String> {
    StorageCell::new(store, FONT_FAMILY_KEY, String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryKeyValueStore::new())
    }

    #[test]
    fn missing_value_reads_as_fallback() {
        let cell = theme_cell(store());
        assert_eq!(cell.get(), Theme::Light);
    }

    #[test]
    fn undecodable_value_reads_as_fallback() {
        let store = store();
        store.set(THEME_KEY, "not json at all");
        let cell = theme_cell(store);
        assert_eq!(cell.get(), Theme::Light);
    }

    #[test]
    fn set_round_trips_and_persists() {
        let store = store();
        let cell = theme_cell(store.clone());
        cell.set(Theme::Dark);

        assert_eq!(cell.get(), Theme::Dark);
        // Visible through the underlying store, so it syncs with everything else.
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("\"dark\""));
    }

    #[test]
    fn toggle_flips_and_persists() {
        let cell = theme_cell(store());
        cell.toggle();
        assert_eq!(cell.get(), Theme::Dark);
        cell.toggle();
        assert_eq!(cell.get(), Theme::Light);
    }

    #[test]
    fn listeners_fire_on_writes() {
        static FIRED: AtomicUsize = AtomicUsize::new(0);
        let cell = theme_cell(store());
        cell.subscribe(|_| {
            FIRED.fetch_add(1, Ordering::SeqCst);
        });

        cell.set(Theme::Dark);
        cell.toggle();
        assert_eq!(FIRED.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn token_cells_default_to_empty() {
        let store = store();
        let token = auth_token_cell(store.clone());
        assert_eq!(token.get(), "");

        token.set("jwt-value".into());
        assert_eq!(auth_token_cell(store).get(), "jwt-value");
    }
}
