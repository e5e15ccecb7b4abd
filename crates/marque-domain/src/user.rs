//! User account and profile records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bookmark::Visibility;

/// Unique user identifier.
pub type UserId = uuid::Uuid;

/// Maximum number of social links on a profile.
pub const MAX_SOCIAL_LINKS: usize = 5;

/// A (kind, url) pair on a profile, e.g. ("github", "https://github.com/x").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub kind: String,
    pub link: String,
}

impl SocialLink {
    pub fn new(kind: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            link: link.into(),
        }
    }
}

/// Account/profile record.
///
/// Created by the auth collaborator on sign-up; mutated by the owning user
/// only; never deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    /// Unique across users when set; checked before every rename.
    pub username: Option<String>,
    pub bio: Option<String>,
    /// Applied to new bookmarks when the caller does not pick a visibility.
    pub default_visibility: Visibility,
    pub links: Vec<SocialLink>,
    pub created: DateTime<Utc>,
}

impl User {
    /// Create a bare account record, as the auth collaborator would.
    pub fn new() -> Self {
        Self {
            id: UserId::new_v4(),
            name: None,
            image: None,
            email: None,
            username: None,
            bio: None,
            default_visibility: Visibility::Public,
            links: Vec::new(),
            created: Utc::now(),
        }
    }

    /// Builder method to set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method to set the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder method to set the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for a profile. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub default_visibility: Option<Visibility>,
    pub links: Option<Vec<SocialLink>>,
}
