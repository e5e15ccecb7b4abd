//! Error types for resolver operations

use marque_domain::LinkError;
use marque_store::StoreError;
use thiserror::Error;

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, SitesError>;

/// Main error type for resolver operations.
///
/// Reads never produce `NotFound` — a missing record surfaces as an empty
/// page or `None` so callers can render an empty state. Writes raise.
#[derive(Debug, Error)]
pub enum SitesError {
    /// No authenticated caller on a write, or the caller is not the owner
    #[error("unauthorized")]
    Unauthorized,

    /// A record the operation requires does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Username already owned by another user
    #[error("username is already taken: {0}")]
    Conflict(String),

    /// The link cannot be bookmarked
    #[error(transparent)]
    InvalidLink(#[from] LinkError),

    /// Profile fields out of bounds
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// Failure from the record store
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
