//! Origin allow-list for window messages.

/// Origin the companion website runs on during local development.
pub const DEFAULT_WEB_ORIGIN: &str = "http://localhost:3000";

/// Allow-list of window-message origins the relay trusts.
///
/// Anything arriving over the window channel is reachable by arbitrary page
/// scripts; a message from an unlisted origin is dropped before any storage
/// is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPolicy {
    allowed: Vec<String>,
}

impl OriginPolicy {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    /// Trust a single origin — the usual deployment shape.
    pub fn single(origin: impl Into<String>) -> Self {
        Self {
            allowed: vec![origin.into()],
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.allowed.iter().any(|o| o == origin)
    }
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self::single(DEFAULT_WEB_ORIGIN)
    }
}
