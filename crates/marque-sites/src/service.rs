//! Resolver operations over the record store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use marque_domain::{
    validate_link, BookmarkPatch, ProfilePatch, Site, SiteBookmark, SiteId, SitePatch, User,
    UserId, Visibility, MAX_SOCIAL_LINKS,
};
use marque_store::{RecordStore, StoreError};

use crate::error::{Result, SitesError};
use crate::filter::{BookmarkFilter, SortOrder};
use crate::page::{dedup_by_site, paginate, sort_views, Page};
use crate::view::{BookmarkView, Contributor};

/// Input for a new bookmark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBookmark {
    pub link: String,
    pub title: String,
    pub description: Option<String>,
    /// Defaults to the caller's profile preference when unset.
    pub visibility: Option<Visibility>,
    pub tags: Vec<String>,
}

/// Input for editing an existing bookmark. Tags replace the previous set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkUpdate {
    pub visibility: Option<Visibility>,
    pub tags: Vec<String>,
    /// Written through to the shared site row when set: every user who
    /// bookmarked the site sees the new description, last writer wins.
    pub description: Option<String>,
}

/// The resolver: all reads and writes over sites, bookmarks, and users.
///
/// Every operation takes the authenticated caller as `Option<UserId>` (the
/// auth collaborator yields the current user or none). Writes without a
/// caller fail `Unauthorized`; reads without one return empty results.
pub struct SiteService<S> {
    store: S,
}

impl<S: RecordStore> SiteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Direct access to the underlying store (tests, account provisioning).
    pub fn store(&self) -> &S {
        &self.store
    }

    // --- mutations ---

    /// Bookmark a link: find-or-create the site row, then create the
    /// caller's association unless one already exists.
    ///
    /// Idempotent per (caller, link); an existing association is left
    /// untouched — edits go through [`SiteService::update_bookmark`].
    /// Returns the site ID either way.
    pub fn add_bookmark(&self, viewer: Option<UserId>, new: NewBookmark) -> Result<SiteId> {
        let user = viewer.ok_or(SitesError::Unauthorized)?;
        validate_link(&new.link)?;

        let site_id = match self.store.site_by_link(&new.link)? {
            Some(site) => site.id,
            None => {
                let mut site = Site::new(new.title, new.link);
                site.description = new.description;
                self.store.insert_site(site)?
            }
        };

        if self.store.bookmark_for(user, site_id)?.is_none() {
            let visibility = match new.visibility {
                Some(v) => v,
                None => self.default_visibility(user)?,
            };
            let bookmark = SiteBookmark::new(user, site_id, visibility).with_tags(new.tags);
            self.store.insert_bookmark(bookmark)?;
        }

        Ok(site_id)
    }

    /// Edit the caller's bookmark of a site. If the association has gone
    /// missing it is recreated with the given fields (self-healing upsert);
    /// the site itself must exist.
    pub fn update_bookmark(
        &self,
        viewer: Option<UserId>,
        site: SiteId,
        update: BookmarkUpdate,
    ) -> Result<()> {
        let user = viewer.ok_or(SitesError::Unauthorized)?;
        if self.store.site(site)?.is_none() {
            return Err(SitesError::NotFound(format!("site {site}")));
        }

        match self.store.bookmark_for(user, site)? {
            Some(existing) => {
                self.store.patch_bookmark(
                    existing.id,
                    BookmarkPatch {
                        visibility: update.visibility,
                        tags: Some(update.tags),
                    },
                )?;
            }
            None => {
                let visibility = match update.visibility {
                    Some(v) => v,
                    None => self.default_visibility(user)?,
                };
                let bookmark = SiteBookmark::new(user, site, visibility).with_tags(update.tags);
                self.store.insert_bookmark(bookmark)?;
            }
        }

        if update.description.is_some() {
            // Shared field on the site row, not per-association data.
            self.store.patch_site(
                site,
                SitePatch {
                    description: update.description,
                },
            )?;
        }

        Ok(())
    }

    /// Remove the caller's bookmark of a site, deleting the site row itself
    /// once its last association is gone.
    ///
    /// The orphan check is a second round trip, not a transaction: a racing
    /// first bookmark can resurrect the site in between, and a site already
    /// deleted by the race counts as cleaned up.
    pub fn remove_bookmark(&self, viewer: Option<UserId>, site: SiteId) -> Result<()> {
        let user = viewer.ok_or(SitesError::Unauthorized)?;
        let bookmark = self
            .store
            .bookmark_for(user, site)?
            .ok_or_else(|| SitesError::NotFound(format!("bookmark for site {site}")))?;

        self.store.delete_bookmark(bookmark.id)?;

        if self.store.bookmarks_for_site(site)?.is_empty() {
            match self.store.delete_site(site) {
                Ok(()) | Err(StoreError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }

    // --- reads ---

    /// Whether the caller already bookmarked this link. False when
    /// unauthenticated or the link is unknown.
    pub fn is_bookmarked(&self, viewer: Option<UserId>, link: &str) -> Result<bool> {
        let Some(user) = viewer else {
            return Ok(false);
        };
        match self.store.site_by_link(link)? {
            Some(site) => Ok(self.store.bookmark_for(user, site.id)?.is_some()),
            None => Ok(false),
        }
    }

    /// The caller's own bookmarks, filtered, enriched, sorted, paginated.
    ///
    /// Bookmark counts here include every association of a site, public and
    /// private, so the caller sees how popular a site is overall.
    pub fn list_mine(
        &self,
        viewer: Option<UserId>,
        filter: &BookmarkFilter,
    ) -> Result<Page<BookmarkView>> {
        let Some(user) = viewer else {
            return Ok(Page::empty());
        };

        let counts = count_by_site(&self.store.bookmarks()?);
        let mut views = Vec::new();
        for bookmark in self.store.bookmarks_for_user(user)? {
            if !bookmark.has_any_tag(&filter.tags) {
                continue;
            }
            let Some(site) = self.store.site(bookmark.site)? else {
                continue;
            };
            if !filter.matches_search(&site.title, &site.link) {
                continue;
            }
            let count = counts.get(&site.id).copied().unwrap_or(0);
            views.push(BookmarkView::join(&bookmark, &site, count));
        }

        sort_views(&mut views, filter.sort);
        Ok(paginate(views, filter.sort, filter.page_size, filter.cursor))
    }

    /// Public bookmarks, newest first, one row per site.
    pub fn latest_public(&self, filter: &BookmarkFilter) -> Result<Page<BookmarkView>> {
        let scoped = self.store.public_bookmarks()?;
        self.enrich_public(scoped, filter, SortOrder::Latest)
    }

    /// Public bookmarks ranked by how many users saved each site.
    pub fn most_bookmarked_public(&self, filter: &BookmarkFilter) -> Result<Page<BookmarkView>> {
        let scoped = self.store.public_bookmarks()?;
        self.enrich_public(scoped, filter, SortOrder::MostBookmarked)
    }

    /// A named user's public bookmarks, under the filter's own sort order.
    /// An unknown username yields an empty page.
    pub fn public_by_username(
        &self,
        username: &str,
        filter: &BookmarkFilter,
    ) -> Result<Page<BookmarkView>> {
        let Some(user) = self.store.user_by_username(username)? else {
            return Ok(Page::empty());
        };
        let scoped: Vec<_> = self
            .store
            .bookmarks_for_user(user.id)?
            .into_iter()
            .filter(|b| b.visibility.is_public())
            .collect();
        self.enrich_public(scoped, filter, filter.sort)
    }

    /// Users ranked by public bookmark count, with the unique tag set each
    /// uses across those bookmarks. Users without a username are excluded
    /// (nothing to link their profile page to).
    pub fn top_contributors(&self, limit: usize) -> Result<Vec<Contributor>> {
        let mut by_user: HashMap<UserId, (usize, Vec<String>)> = HashMap::new();
        for bookmark in self.store.public_bookmarks()? {
            let entry = by_user.entry(bookmark.user).or_default();
            entry.0 += 1;
            for tag in bookmark.tags {
                if !entry.1.contains(&tag) {
                    entry.1.push(tag);
                }
            }
        }

        let mut contributors = Vec::new();
        for (user_id, (count, tags)) in by_user {
            let Some(user) = self.store.user(user_id)? else {
                continue;
            };
            let Some(username) = user.username else {
                continue;
            };
            contributors.push(Contributor {
                user: user_id,
                name: user.name,
                username,
                image: user.image,
                public_count: count,
                tags,
            });
        }

        // Count descending; equal counts fall back to username so the
        // leaderboard is stable across runs.
        contributors.sort_by(|a, b| {
            b.public_count
                .cmp(&a.public_count)
                .then_with(|| a.username.cmp(&b.username))
        });
        contributors.truncate(limit);
        Ok(contributors)
    }

    // --- profiles ---

    /// The caller's own profile record.
    pub fn me(&self, viewer: Option<UserId>) -> Result<Option<User>> {
        match viewer {
            Some(id) => Ok(self.store.user(id)?),
            None => Ok(None),
        }
    }

    /// Self-service profile edit. Usernames must stay unique; social links
    /// are capped. Returns the updated record.
    pub fn update_user(
        &self,
        viewer: Option<UserId>,
        target: UserId,
        patch: ProfilePatch,
    ) -> Result<User> {
        let user = viewer.ok_or(SitesError::Unauthorized)?;
        if user != target {
            return Err(SitesError::Unauthorized);
        }

        if let Some(username) = &patch.username {
            if let Some(existing) = self.store.user_by_username(username)? {
                if existing.id != target {
                    return Err(SitesError::Conflict(username.clone()));
                }
            }
        }
        if let Some(links) = &patch.links {
            if links.len() > MAX_SOCIAL_LINKS {
                return Err(SitesError::InvalidProfile(format!(
                    "at most {MAX_SOCIAL_LINKS} social links"
                )));
            }
        }

        self.store.patch_user(target, patch)?;
        self.store
            .user(target)?
            .ok_or_else(|| SitesError::NotFound(format!("user {target}")))
    }

    // --- internals ---

    /// Join, filter, sort, dedup, and paginate a set of public bookmarks.
    /// Counts are computed over all public bookmarks so a scoped listing
    /// (one user's page) still shows global popularity.
    fn enrich_public(
        &self,
        scoped: Vec<SiteBookmark>,
        filter: &BookmarkFilter,
        sort: SortOrder,
    ) -> Result<Page<BookmarkView>> {
        let counts = count_by_site(&self.store.public_bookmarks()?);

        let mut views = Vec::new();
        for bookmark in scoped {
            if !bookmark.has_any_tag(&filter.tags) {
                continue;
            }
            let Some(site) = self.store.site(bookmark.site)? else {
                continue;
            };
            if !filter.matches_search(&site.title, &site.link) {
                continue;
            }
            let count = counts.get(&site.id).copied().unwrap_or(0);
            views.push(BookmarkView::join(&bookmark, &site, count));
        }

        sort_views(&mut views, sort);
        dedup_by_site(&mut views);
        Ok(paginate(views, sort, filter.page_size, filter.cursor))
    }

    fn default_visibility(&self, user: UserId) -> Result<Visibility> {
        Ok(self
            .store
            .user(user)?
            .map(|u| u.default_visibility)
            .unwrap_or_default())
    }
}

/// Group bookmarks by site and count them.
fn count_by_site(bookmarks: &[SiteBookmark]) -> HashMap<SiteId, usize> {
    bookmarks.iter().fold(HashMap::new(), |mut counts, b| {
        *counts.entry(b.site).or_insert(0) += 1;
        counts
    })
}
