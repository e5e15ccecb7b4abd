//! Wire messages for the storage bridge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat string-to-string snapshot of a key-value store.
pub type StorageMap = BTreeMap<String, String>;

/// A message crossing the window or runtime channel.
///
/// Closed tagged union keyed by `type`. Decoding happens at the trust
/// boundary, so an unknown tag or malformed payload never reaches a
/// handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeMessage {
    /// Ask the page for its entire local store.
    #[serde(rename = "REQUEST_WEBSITE_STORAGE")]
    RequestWebsiteStorage,

    /// Page → relay: a snapshot of the page's local store.
    #[serde(rename = "SYNC_LOCALSTORAGE")]
    SyncLocalStorage { payload: StorageMap },

    /// Relay → background: a snapshot answering an explicit request.
    #[serde(rename = "WEBSITE_STORAGE_RESPONSE")]
    WebsiteStorageResponse { data: StorageMap },

    /// Relay → background: replace durable storage with this snapshot.
    #[serde(rename = "UPDATE_EXTENSION_STORAGE")]
    UpdateExtensionStorage { data: StorageMap },
}

/// Outcome of handling a runtime message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Error,
}

/// Response envelope returned over the runtime channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub status: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleared: Option<bool>,
}

impl SyncResponse {
    pub fn success() -> Self {
        Self {
            status: SyncStatus::Success,
            error: None,
            cleared: None,
        }
    }

    /// Success after clearing the destination instead of writing to it.
    pub fn cleared() -> Self {
        Self {
            status: SyncStatus::Success,
            error: None,
            cleared: Some(true),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: SyncStatus::Error,
            error: Some(message.into()),
            cleared: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SyncStatus::Success
    }
}
