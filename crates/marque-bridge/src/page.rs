//! Page-context endpoint: the website's side of the bridge.

use std::sync::Arc;

use crate::channel::{WindowSink, ANY_ORIGIN};
use crate::message::BridgeMessage;
use crate::storage::KeyValueStore;

/// The website endpoint. Answers snapshot requests from its local store and
/// applies snapshots pushed back from the extension.
pub struct PageSync<W> {
    local: Arc<dyn KeyValueStore>,
    window: W,
}

impl<W: WindowSink> PageSync<W> {
    pub fn new(local: Arc<dyn KeyValueStore>, window: W) -> Self {
        Self { local, window }
    }

    /// Post the entire local store toward the extension relay. Fired on
    /// load (after the relay's handshake delay), on every snapshot request,
    /// and on local storage changes.
    pub fn sync_to_extension(&self) {
        let payload = self.local.snapshot();
        self.window
            .post(&BridgeMessage::SyncLocalStorage { payload }, ANY_ORIGIN);
    }

    /// Handle a message arriving on the window channel.
    ///
    /// Snapshots coming back from the extension apply per key — the page
    /// never clears its own store on sync; full-replace semantics exist on
    /// the extension side only.
    pub fn on_window_message(&self, message: BridgeMessage) {
        match message {
            BridgeMessage::RequestWebsiteStorage => self.sync_to_extension(),
            BridgeMessage::WebsiteStorageResponse { data } => {
                for (key, value) in &data {
                    self.local.set(key, value);
                }
            }
            _ => {}
        }
    }

    /// Local storage changed outside the bridge: push a fresh snapshot.
    pub fn on_storage_event(&self) {
        self.sync_to_extension();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::StorageMap;
    use crate::storage::MemoryKeyValueStore;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingWindow {
        posts: Mutex<Vec<(BridgeMessage, String)>>,
    }

    impl WindowSink for RecordingWindow {
        fn post(&self, message: &BridgeMessage, target_origin: &str) {
            self.posts
                .lock()
                .unwrap()
                .push((message.clone(), target_origin.to_string()));
        }
    }

    fn snapshot(pairs: &[(&str, &str)]) -> StorageMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn request_is_answered_with_a_full_snapshot() {
        let local = Arc::new(MemoryKeyValueStore::new());
        local.set("theme", "\"dark\"");
        let window = Arc::new(RecordingWindow::default());
        let page = PageSync::new(local, window.clone());

        page.on_window_message(BridgeMessage::RequestWebsiteStorage);

        let posts = window.posts.lock().unwrap();
        assert_eq!(
            *posts,
            vec![(
                BridgeMessage::SyncLocalStorage {
                    payload: snapshot(&[("theme", "\"dark\"")])
                },
                ANY_ORIGIN.to_string()
            )]
        );
    }

    #[test]
    fn extension_snapshot_applies_per_key() {
        let local = Arc::new(MemoryKeyValueStore::new());
        local.set("mine", "kept");
        let page = PageSync::new(local.clone(), Arc::new(RecordingWindow::default()));

        page.on_window_message(BridgeMessage::WebsiteStorageResponse {
            data: snapshot(&[("theme", "\"dark\"")]),
        });

        // Applied key arrives, unrelated keys survive.
        assert_eq!(local.get("theme").as_deref(), Some("\"dark\""));
        assert_eq!(local.get("mine").as_deref(), Some("kept"));
    }

    #[test]
    fn storage_event_pushes_a_fresh_snapshot() {
        let local = Arc::new(MemoryKeyValueStore::new());
        let window = Arc::new(RecordingWindow::default());
        let page = PageSync::new(local.clone(), window.clone());

        local.set("k", "v");
        page.on_storage_event();

        let posts = window.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(
            posts[0].0,
            BridgeMessage::SyncLocalStorage {
                payload: snapshot(&[("k", "v")])
            }
        );
    }

    #[test]
    fn unrelated_messages_are_ignored() {
        let local = Arc::new(MemoryKeyValueStore::new());
        let window = Arc::new(RecordingWindow::default());
        let page = PageSync::new(local.clone(), window.clone());

        page.on_window_message(BridgeMessage::UpdateExtensionStorage {
            data: snapshot(&[("k", "v")]),
        });

        assert!(window.posts.lock().unwrap().is_empty());
        assert!(local.snapshot().is_empty());
    }
}
