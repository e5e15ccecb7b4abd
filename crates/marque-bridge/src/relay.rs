//! Content-script relay between the page window and the background context.

use std::sync::Arc;
use std::time::Duration;

use crate::channel::{RuntimeChannel, WindowSink, ANY_ORIGIN};
use crate::message::{BridgeMessage, SyncResponse};
use crate::origin::OriginPolicy;
use crate::storage::KeyValueStore;

/// Delay before the load-time handshake, giving the page script time to
/// install its message listener. Single fire, no retry.
pub const HANDSHAKE_DELAY: Duration = Duration::from_secs(2);

/// The content-script endpoint.
///
/// Runs inside the website tab with one foot on each side: it shares the
/// page's local storage, posts into the page's window, and holds the only
/// runtime channel to the background. Window input is untrusted and goes
/// through the origin policy first.
pub struct ContentRelay<W, R> {
    window: W,
    runtime: R,
    page: Arc<dyn KeyValueStore>,
    policy: OriginPolicy,
    page_origin: String,
}

impl<W: WindowSink, R: RuntimeChannel> ContentRelay<W, R> {
    pub fn new(
        window: W,
        runtime: R,
        page: Arc<dyn KeyValueStore>,
        policy: OriginPolicy,
        page_origin: impl Into<String>,
    ) -> Self {
        Self {
            window,
            runtime,
            page,
            policy,
            page_origin: page_origin.into(),
        }
    }

    /// Load-time handshake: ask the page for its store. Fired once after
    /// [`HANDSHAKE_DELAY`].
    pub fn handshake(&self) {
        self.window.post(&BridgeMessage::RequestWebsiteStorage, ANY_ORIGIN);
    }

    /// Handle a message arriving on the window channel.
    ///
    /// The origin check comes before anything else. A page snapshot is
    /// forwarded to the background; a dead runtime channel is logged and
    /// dropped — the next handshake or storage event resyncs.
    pub fn on_window_message(&self, origin: &str, message: BridgeMessage) {
        if !self.policy.allows(origin) {
            tracing::warn!(%origin, "dropping window message from untrusted origin");
            return;
        }

        if let BridgeMessage::SyncLocalStorage { payload } = message {
            self.forward(BridgeMessage::UpdateExtensionStorage { data: payload });
        }
    }

    /// Handle a message arriving on the runtime channel (from the
    /// background) and produce the response envelope.
    ///
    /// A snapshot request is answered from the page store this script
    /// shares with the website; the snapshot travels back to the background
    /// as its own runtime message and is also posted into the page window
    /// so the page can reconcile.
    pub fn on_runtime_message(&self, message: &BridgeMessage) -> SyncResponse {
        match message {
            BridgeMessage::RequestWebsiteStorage => {
                let data = self.page.snapshot();
                self.window.post(
                    &BridgeMessage::WebsiteStorageResponse { data: data.clone() },
                    &self.page_origin,
                );
                self.forward(BridgeMessage::WebsiteStorageResponse { data });
                SyncResponse::success()
            }
            other => {
                tracing::warn!(?other, "unknown runtime message");
                SyncResponse::error("invalid message type or data")
            }
        }
    }

    fn forward(&self, message: BridgeMessage) {
        match self.runtime.send(&message) {
            Ok(response) if response.is_success() => {}
            Ok(response) => {
                tracing::warn!(error = ?response.error, "background rejected sync")
            }
            Err(e) => tracing::warn!("background unavailable: {e}"),
        }
    }
}
