//! Transport seams for the two messaging surfaces.
//!
//! The browser supplies both channels (`window.postMessage` and the
//! extension runtime bus); the endpoints in this crate only ever talk to
//! these traits, so every handler is testable without a browser.

use std::sync::Arc;

use thiserror::Error;

use crate::message::{BridgeMessage, SyncResponse};

/// Wildcard target origin for window posts.
pub const ANY_ORIGIN: &str = "*";

/// Errors from the privileged runtime channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The receiving end is gone (extension context unloaded).
    #[error("receiving end does not exist: {0}")]
    NoReceiver(String),
}

/// `window.postMessage` as seen from one execution context.
pub trait WindowSink {
    /// Post a message into the window, delivered to listeners whose origin
    /// matches `target_origin` ("*" for any).
    fn post(&self, message: &BridgeMessage, target_origin: &str);
}

/// The extension-internal runtime message bus.
pub trait RuntimeChannel {
    /// Send a message to the other extension context and wait for its
    /// response envelope.
    fn send(&self, message: &BridgeMessage) -> Result<SyncResponse, ChannelError>;
}

impl<T: WindowSink + ?Sized> WindowSink for Arc<T> {
    fn post(&self, message: &BridgeMessage, target_origin: &str) {
        (**self).post(message, target_origin)
    }
}

impl<T: RuntimeChannel + ?Sized> RuntimeChannel for Arc<T> {
    fn send(&self, message: &BridgeMessage) -> Result<SyncResponse, ChannelError> {
        (**self).send(message)
    }
}
