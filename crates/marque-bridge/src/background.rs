//! Background context: durable storage writes.

use crate::channel::RuntimeChannel;
use crate::message::{BridgeMessage, SyncResponse};
use crate::storage::KeyValueStore;

/// The extension's background endpoint. Owns durable storage and answers
/// runtime messages from the content relay.
pub struct BackgroundSync<S> {
    durable: S,
}

impl<S: KeyValueStore> BackgroundSync<S> {
    pub fn new(durable: S) -> Self {
        Self { durable }
    }

    pub fn durable(&self) -> &S {
        &self.durable
    }

    /// Handle one runtime message and produce the response envelope.
    ///
    /// A snapshot fully replaces the durable contents — never a per-key
    /// merge, so stale keys disappear on every sync. An empty snapshot
    /// clears durable storage instead of writing an empty map.
    pub fn handle(&self, message: &BridgeMessage) -> SyncResponse {
        match message {
            BridgeMessage::UpdateExtensionStorage { data }
            | BridgeMessage::WebsiteStorageResponse { data } => {
                if data.is_empty() {
                    self.durable.clear();
                    tracing::debug!("cleared durable storage");
                    SyncResponse::cleared()
                } else {
                    self.durable.replace(data);
                    tracing::debug!(keys = data.len(), "replaced durable storage");
                    SyncResponse::success()
                }
            }
            other => {
                tracing::warn!(?other, "unknown runtime message");
                SyncResponse::error("invalid message type or data")
            }
        }
    }

    /// Ask the relay for a fresh page snapshot (the reverse direction).
    ///
    /// The snapshot itself arrives as a later runtime message; here we only
    /// get the relay's acknowledgment. A dead channel is logged and dropped
    /// — the next handshake resyncs.
    pub fn request_page_snapshot(&self, relay: &dyn RuntimeChannel) {
        match relay.send(&BridgeMessage::RequestWebsiteStorage) {
            Ok(response) if response.is_success() => {}
            Ok(response) => {
                tracing::warn!(error = ?response.error, "snapshot request rejected")
            }
            Err(e) => tracing::warn!("content relay unavailable: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::StorageMap;
    use crate::storage::MemoryKeyValueStore;

    fn background() -> BackgroundSync<MemoryKeyValueStore> {
        BackgroundSync::new(MemoryKeyValueStore::new())
    }

    fn map(pairs: &[(&str, &str)]) -> StorageMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn update_replaces_everything() {
        let background = background();
        background.durable().set("stale", "old");

        let response = background.handle(&BridgeMessage::UpdateExtensionStorage {
            data: map(&[("k", "v")]),
        });

        assert!(response.is_success());
        assert_eq!(response.cleared, None);
        assert_eq!(background.durable().snapshot(), map(&[("k", "v")]));
    }

    #[test]
    fn empty_update_clears_instead_of_writing_empty_map() {
        let background = background();
        background.durable().set("k", "v");

        let response = background.handle(&BridgeMessage::UpdateExtensionStorage {
            data: StorageMap::new(),
        });

        assert!(response.is_success());
        assert_eq!(response.cleared, Some(true));
        assert!(background.durable().snapshot().is_empty());
    }

    #[test]
    fn website_response_persists_the_same_way() {
        let background = background();
        let response = background.handle(&BridgeMessage::WebsiteStorageResponse {
            data: map(&[("theme", "\"dark\"")]),
        });

        assert!(response.is_success());
        assert_eq!(
            background.durable().get("theme").as_deref(),
            Some("\"dark\"")
        );
    }

    #[test]
    fn unknown_message_is_an_error_and_touches_nothing() {
        let background = background();
        background.durable().set("k", "v");

        let response = background.handle(&BridgeMessage::RequestWebsiteStorage);

        assert!(!response.is_success());
        assert_eq!(background.durable().get("k").as_deref(), Some("v"));
    }
}
