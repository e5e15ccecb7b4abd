//! End-to-end bridge tests
//!
//! Wires all three endpoints together with in-memory stores and recording
//! transports, then pumps messages by hand the way the browser's event loop
//! would deliver them.

use std::sync::{Arc, Mutex};

use marque_bridge::{
    BackgroundSync, BridgeMessage, ChannelError, ContentRelay, KeyValueStore,
    MemoryKeyValueStore, OriginPolicy, PageSync, RuntimeChannel, StorageMap, SyncResponse,
    WindowSink,
};

const WEB_ORIGIN: &str = "https://marque.app";

/// Records every window post for manual delivery.
#[derive(Default)]
struct RecordingWindow {
    posts: Mutex<Vec<(BridgeMessage, String)>>,
}

impl RecordingWindow {
    fn drain(&self) -> Vec<(BridgeMessage, String)> {
        std::mem::take(&mut self.posts.lock().unwrap())
    }
}

impl WindowSink for RecordingWindow {
    fn post(&self, message: &BridgeMessage, target_origin: &str) {
        self.posts
            .lock()
            .unwrap()
            .push((message.clone(), target_origin.to_string()));
    }
}

/// Runtime channel wired straight into the background handler.
struct BackgroundChannel(Arc<BackgroundSync<MemoryKeyValueStore>>);

impl RuntimeChannel for BackgroundChannel {
    fn send(&self, message: &BridgeMessage) -> Result<SyncResponse, ChannelError> {
        Ok(self.0.handle(message))
    }
}

struct Harness {
    page_store: Arc<MemoryKeyValueStore>,
    page: PageSync<Arc<RecordingWindow>>,
    relay: ContentRelay<Arc<RecordingWindow>, BackgroundChannel>,
    relay_window: Arc<RecordingWindow>,
    page_window: Arc<RecordingWindow>,
    background: Arc<BackgroundSync<MemoryKeyValueStore>>,
}

impl Harness {
    fn new() -> Self {
        let page_store = Arc::new(MemoryKeyValueStore::new());
        let page_window = Arc::new(RecordingWindow::default());
        let relay_window = Arc::new(RecordingWindow::default());
        let background = Arc::new(BackgroundSync::new(MemoryKeyValueStore::new()));

        let page = PageSync::new(page_store.clone() as Arc<dyn KeyValueStore>, page_window.clone());
        let relay = ContentRelay::new(
            relay_window.clone(),
            BackgroundChannel(background.clone()),
            page_store.clone() as Arc<dyn KeyValueStore>,
            OriginPolicy::single(WEB_ORIGIN),
            WEB_ORIGIN,
        );

        Self {
            page_store,
            page,
            relay,
            relay_window,
            page_window,
            background,
        }
    }

    /// Deliver relay posts to the page, then page posts back to the relay,
    /// until the window traffic settles.
    fn pump(&self) {
        loop {
            let mut delivered = false;
            for (message, _) in self.relay_window.drain() {
                self.page.on_window_message(message);
                delivered = true;
            }
            for (message, _) in self.page_window.drain() {
                // The browser stamps every window message with the page origin.
                self.relay.on_window_message(WEB_ORIGIN, message);
                delivered = true;
            }
            if !delivered {
                break;
            }
        }
    }
}

fn snapshot(pairs: &[(&str, &str)]) -> StorageMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// === Forward direction: page state reaches durable storage ===

#[test]
fn handshake_mirrors_page_storage_into_the_extension() {
    let harness = Harness::new();
    harness.page_store.set("k", "v");

    harness.relay.handshake();
    harness.pump();

    assert_eq!(
        harness.background.durable().snapshot(),
        snapshot(&[("k", "v")])
    );
}

#[test]
fn empty_page_storage_clears_durable_storage() {
    let harness = Harness::new();
    harness.background.durable().set("stale", "old");

    harness.relay.handshake();
    harness.pump();

    assert!(
        harness.background.durable().snapshot().is_empty(),
        "empty sync must clear, not write an empty map"
    );
}

#[test]
fn sync_replaces_rather_than_merges() {
    let harness = Harness::new();
    harness.background.durable().set("stale", "old");
    harness.page_store.set("fresh", "1");

    harness.relay.handshake();
    harness.pump();

    let durable = harness.background.durable().snapshot();
    assert_eq!(durable, snapshot(&[("fresh", "1")]));
    assert!(!durable.contains_key("stale"), "sync clears stale keys");
}

#[test]
fn storage_event_resyncs_without_a_handshake() {
    let harness = Harness::new();
    harness.page_store.set("k", "v1");
    harness.relay.handshake();
    harness.pump();

    harness.page_store.set("k", "v2");
    harness.page.on_storage_event();
    harness.pump();

    assert_eq!(
        harness.background.durable().get("k").as_deref(),
        Some("v2")
    );
}

// === Reverse direction: the extension pulls a snapshot ===

#[test]
fn background_pull_persists_the_page_snapshot() {
    let harness = Harness::new();
    harness.page_store.set("k", "v");

    let response = harness
        .relay
        .on_runtime_message(&BridgeMessage::RequestWebsiteStorage);
    harness.pump();

    assert!(response.is_success());
    assert_eq!(
        harness.background.durable().snapshot(),
        snapshot(&[("k", "v")])
    );
}

// === Trust boundary ===

#[test]
fn spoofed_origin_cannot_write_durable_storage() {
    let harness = Harness::new();
    harness.background.durable().set("k", "genuine");

    harness.relay.on_window_message(
        "https://evil.example",
        BridgeMessage::SyncLocalStorage {
            payload: snapshot(&[("k", "forged")]),
        },
    );

    assert_eq!(
        harness.background.durable().get("k").as_deref(),
        Some("genuine")
    );
}

#[test]
fn malformed_wire_payloads_never_reach_the_handlers() {
    // The browser hands the relay raw JSON; decoding is the trust boundary.
    let raw = r#"{ "type": "SYNC_LOCALSTORAGE", "payload": "not a map" }"#;
    assert!(serde_json::from_str::<BridgeMessage>(raw).is_err());

    let raw = r#"{ "type": "TOTALLY_UNKNOWN" }"#;
    assert!(serde_json::from_str::<BridgeMessage>(raw).is_err());
}
