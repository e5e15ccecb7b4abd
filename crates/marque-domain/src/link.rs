//! Link validation for bookmarkable URLs.

use thiserror::Error;
use url::Url;

/// Why a link cannot be bookmarked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("link is empty")]
    Empty,

    #[error("link is not a valid URL: {0}")]
    Malformed(String),

    #[error("local addresses cannot be bookmarked: {0}")]
    LocalAddress(String),
}

/// Hosts that never make sense as shared bookmarks.
const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1", "[::1]", "0.0.0.0"];

/// Validate that a link is bookmarkable.
///
/// Rejects empty and malformed links, and links to loopback hosts — a dev
/// server open in the active tab is not a shareable site.
pub fn validate_link(link: &str) -> Result<(), LinkError> {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return Err(LinkError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| LinkError::Malformed(e.to_string()))?;
    match url.host_str() {
        Some(host) if LOCAL_HOSTS.contains(&host) => Err(LinkError::LocalAddress(host.to_string())),
        Some(_) => Ok(()),
        None => Err(LinkError::Malformed(trimmed.to_string())),
    }
}
