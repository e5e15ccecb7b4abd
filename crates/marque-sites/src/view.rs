//! Read models for enriched listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use marque_domain::{Site, SiteBookmark, SiteId, UserId, Visibility};

/// One row of an enriched listing: site fields joined with the
/// representative bookmark's state and the derived count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkView {
    pub site: SiteId,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    /// How many bookmarks reference this site within the listing's scope
    /// (all of them for a user's own listing, public ones for public
    /// listings).
    pub bookmark_count: usize,
    pub visibility: Visibility,
    pub tags: Vec<String>,
    /// Created-at of the representative bookmark; the pagination sort key.
    pub bookmarked_at: DateTime<Utc>,
}

impl BookmarkView {
    /// Join a bookmark to its site, with the count supplied by the caller.
    pub fn join(bookmark: &SiteBookmark, site: &Site, bookmark_count: usize) -> Self {
        Self {
            site: site.id,
            title: site.title.clone(),
            description: site.description.clone(),
            link: site.link.clone(),
            bookmark_count,
            visibility: bookmark.visibility,
            tags: bookmark.tags.clone(),
            bookmarked_at: bookmark.created,
        }
    }
}

/// A ranked contributor on the public leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub user: UserId,
    pub name: Option<String>,
    pub username: String,
    pub image: Option<String>,
    pub public_count: usize,
    /// Unique tags across the contributor's public bookmarks, first-seen
    /// order.
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_copies_site_and_bookmark_fields() {
        let site = Site::new("Rust", "https://rust-lang.org").with_description("The language");
        let bookmark = SiteBookmark::new(UserId::new_v4(), site.id, Visibility::Private)
            .with_tags(vec!["lang".into()]);

        let view = BookmarkView::join(&bookmark, &site, 3);

        assert_eq!(view.site, site.id);
        assert_eq!(view.title, "Rust");
        assert_eq!(view.description.as_deref(), Some("The language"));
        assert_eq!(view.bookmark_count, 3);
        assert_eq!(view.visibility, Visibility::Private);
        assert_eq!(view.tags, vec!["lang".to_string()]);
        assert_eq!(view.bookmarked_at, bookmark.created);
    }
}
