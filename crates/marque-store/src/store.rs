use marque_domain::{
    BookmarkId, BookmarkPatch, ProfilePatch, Site, SiteBookmark, SiteId, SitePatch, User, UserId,
};

/// The trait that all record-store backends implement.
///
/// Models the hosted document database behind the product: independent
/// insert/get/patch/delete calls plus filter scans over the three
/// collections. There are no transactions and no joins — callers compose
/// multi-step flows out of single round trips, and every scan reflects
/// whatever the store holds at that instant.
///
/// Scan results come back in store iteration order. Nothing stronger is
/// promised; sort tie-breaks downstream inherit this order.
pub trait RecordStore: Send + Sync {
    // --- sites ---

    /// Insert a new site row. Returns its ID.
    fn insert_site(&self, site: Site) -> Result<SiteId, StoreError>;

    /// Get a site by ID.
    fn site(&self, id: SiteId) -> Result<Option<Site>, StoreError>;

    /// Find the site row for a link, if any.
    fn site_by_link(&self, link: &str) -> Result<Option<Site>, StoreError>;

    /// Apply a partial update to an existing site.
    fn patch_site(&self, id: SiteId, patch: SitePatch) -> Result<(), StoreError>;

    /// Delete a site by ID.
    fn delete_site(&self, id: SiteId) -> Result<(), StoreError>;

    // --- bookmarks ---

    /// Insert a new bookmark row. Returns its ID.
    fn insert_bookmark(&self, bookmark: SiteBookmark) -> Result<BookmarkId, StoreError>;

    /// Find the bookmark for a (user, site) pair, if any.
    fn bookmark_for(&self, user: UserId, site: SiteId)
        -> Result<Option<SiteBookmark>, StoreError>;

    /// All bookmarks owned by a user.
    fn bookmarks_for_user(&self, user: UserId) -> Result<Vec<SiteBookmark>, StoreError>;

    /// All bookmarks referencing a site, any owner, any visibility.
    fn bookmarks_for_site(&self, site: SiteId) -> Result<Vec<SiteBookmark>, StoreError>;

    /// Full scan over every bookmark row.
    fn bookmarks(&self) -> Result<Vec<SiteBookmark>, StoreError>;

    /// All public bookmarks.
    fn public_bookmarks(&self) -> Result<Vec<SiteBookmark>, StoreError>;

    /// Apply a partial update to an existing bookmark.
    fn patch_bookmark(&self, id: BookmarkId, patch: BookmarkPatch) -> Result<(), StoreError>;

    /// Delete a bookmark by ID.
    fn delete_bookmark(&self, id: BookmarkId) -> Result<(), StoreError>;

    // --- users ---

    /// Insert a new user row, as the auth collaborator does on sign-up.
    fn insert_user(&self, user: User) -> Result<UserId, StoreError>;

    /// Get a user by ID.
    fn user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Find the user owning a username, if any.
    fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Apply a partial update to an existing user.
    fn patch_user(&self, id: UserId, patch: ProfilePatch) -> Result<(), StoreError>;
}

/// Errors from the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(uuid::Uuid),

    #[error("storage error: {0}")]
    Storage(String),
}
