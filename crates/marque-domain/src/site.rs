//! Bookmarkable site records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique site identifier.
pub type SiteId = uuid::Uuid;

/// A bookmarkable URL, shared across every user who bookmarks it.
///
/// `link` is the dedup key: at most one site row exists per distinct link.
/// Callers must look up by link before inserting (best-effort — two racing
/// first bookmarks can still produce a transient duplicate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub created: DateTime<Utc>,
}

impl Site {
    /// Create a new site record for a link.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id: SiteId::new_v4(),
            title: title.into(),
            description: None,
            link: link.into(),
            created: Utc::now(),
        }
    }

    /// Builder method to add a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for a site row. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitePatch {
    pub description: Option<String>,
}
