//! Per-user bookmark records and visibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::site::SiteId;
use crate::user::UserId;

/// Unique bookmark identifier.
pub type BookmarkId = uuid::Uuid;

/// Who can see a bookmark, and the listings derived from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// One user's relationship to one site.
///
/// At most one exists per (user, site) pair. Tags are a semantic set:
/// insertion order is preserved for display, duplicates carry no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteBookmark {
    pub id: BookmarkId,
    pub user: UserId,
    pub site: SiteId,
    pub visibility: Visibility,
    pub tags: Vec<String>,
    pub created: DateTime<Utc>,
}

impl SiteBookmark {
    /// Create a new bookmark for a (user, site) pair.
    pub fn new(user: UserId, site: SiteId, visibility: Visibility) -> Self {
        Self {
            id: BookmarkId::new_v4(),
            user,
            site,
            visibility,
            tags: Vec::new(),
            created: Utc::now(),
        }
    }

    /// Builder method to set tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// OR-semantics tag match: true when the bookmark carries at least one
    /// of the given tags. An empty filter matches everything.
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.is_empty() || self.tags.iter().any(|t| tags.contains(t))
    }
}

/// Partial update for a bookmark row. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkPatch {
    pub visibility: Option<Visibility>,
    pub tags: Option<Vec<String>>,
}
