use std::sync::Mutex;

use marque_domain::{
    BookmarkId, BookmarkPatch, ProfilePatch, Site, SiteBookmark, SiteId, SitePatch, User, UserId,
};

use crate::store::{RecordStore, StoreError};

#[derive(Default)]
struct Inner {
    sites: Vec<Site>,
    bookmarks: Vec<SiteBookmark>,
    users: Vec<User>,
}

/// In-process implementation of the record store (for testing and local
/// development).
///
/// Rows live in insertion-ordered vectors behind one mutex, so scans iterate
/// in insertion order — the tie-break order documented on [`RecordStore`].
/// The mutex serializes individual calls only; multi-call flows are exactly
/// as racy here as against the hosted backend.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|e| StoreError::Storage(e.to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn insert_site(&self, site: Site) -> Result<SiteId, StoreError> {
        let mut inner = self.lock()?;
        let id = site.id;
        inner.sites.push(site);
        Ok(id)
    }

    fn site(&self, id: SiteId) -> Result<Option<Site>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.sites.iter().find(|s| s.id == id).cloned())
    }

    fn site_by_link(&self, link: &str) -> Result<Option<Site>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.sites.iter().find(|s| s.link == link).cloned())
    }

    fn patch_site(&self, id: SiteId, patch: SitePatch) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let site = inner
            .sites
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if let Some(description) = patch.description {
            site.description = Some(description);
        }
        Ok(())
    }

    fn delete_site(&self, id: SiteId) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let before = inner.sites.len();
        inner.sites.retain(|s| s.id != id);
        if inner.sites.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn insert_bookmark(&self, bookmark: SiteBookmark) -> Result<BookmarkId, StoreError> {
        let mut inner = self.lock()?;
        let id = bookmark.id;
        inner.bookmarks.push(bookmark);
        Ok(id)
    }

    fn bookmark_for(
        &self,
        user: UserId,
        site: SiteId,
    ) -> Result<Option<SiteBookmark>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .bookmarks
            .iter()
            .find(|b| b.user == user && b.site == site)
            .cloned())
    }

    fn bookmarks_for_user(&self, user: UserId) -> Result<Vec<SiteBookmark>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.bookmarks.iter().filter(|b| b.user == user).cloned().collect())
    }

    fn bookmarks_for_site(&self, site: SiteId) -> Result<Vec<SiteBookmark>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.bookmarks.iter().filter(|b| b.site == site).cloned().collect())
    }

    fn bookmarks(&self) -> Result<Vec<SiteBookmark>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.bookmarks.clone())
    }

    fn public_bookmarks(&self) -> Result<Vec<SiteBookmark>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .bookmarks
            .iter()
            .filter(|b| b.visibility.is_public())
            .cloned()
            .collect())
    }

    fn patch_bookmark(&self, id: BookmarkId, patch: BookmarkPatch) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let bookmark = inner
            .bookmarks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if let Some(visibility) = patch.visibility {
            bookmark.visibility = visibility;
        }
        if let Some(tags) = patch.tags {
            bookmark.tags = tags;
        }
        Ok(())
    }

    fn delete_bookmark(&self, id: BookmarkId) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let before = inner.bookmarks.len();
        inner.bookmarks.retain(|b| b.id != id);
        if inner.bookmarks.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn insert_user(&self, user: User) -> Result<UserId, StoreError> {
        let mut inner = self.lock()?;
        let id = user.id;
        inner.users.push(user);
        Ok(id)
    }

    fn user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .users
            .iter()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    fn patch_user(&self, id: UserId, patch: ProfilePatch) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if let Some(name) = patch.name {
            user.name = Some(name);
        }
        if let Some(image) = patch.image {
            user.image = Some(image);
        }
        if let Some(username) = patch.username {
            user.username = Some(username);
        }
        if let Some(bio) = patch.bio {
            user.bio = Some(bio);
        }
        if let Some(default_visibility) = patch.default_visibility {
            user.default_visibility = default_visibility;
        }
        if let Some(links) = patch.links {
            user.links = links;
        }
        Ok(())
    }
}
