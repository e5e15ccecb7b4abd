//! Sorting and creation-time cursor pagination.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::SortOrder;
use crate::view::BookmarkView;

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the next page; none once a page comes back short.
    pub next_cursor: Option<DateTime<Utc>>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Sort views in place under the given order.
///
/// `sort_by` is stable, so ties keep the incoming (store iteration) order.
pub fn sort_views(views: &mut [BookmarkView], order: SortOrder) {
    match order {
        SortOrder::MostBookmarked => {
            views.sort_by(|a, b| b.bookmark_count.cmp(&a.bookmark_count))
        }
        SortOrder::Latest => views.sort_by(|a, b| b.bookmarked_at.cmp(&a.bookmarked_at)),
        SortOrder::Longest => views.sort_by(|a, b| a.bookmarked_at.cmp(&b.bookmarked_at)),
        SortOrder::NameAsc => {
            views.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortOrder::NameDesc => {
            views.sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase()))
        }
    }
}

/// Collapse a sorted listing to one representative row per site, keeping
/// the first occurrence in sort order.
pub fn dedup_by_site(views: &mut Vec<BookmarkView>) {
    let mut seen = HashSet::new();
    views.retain(|v| seen.insert(v.site));
}

/// Slice a sorted listing into one page.
///
/// The cursor is the created-at of the previous page's last row and only
/// applies to the time-based orders, where the next page starts strictly
/// past it in the sort direction. Other orders ignore any supplied cursor
/// and return a single page with no continuation.
pub fn paginate(
    mut views: Vec<BookmarkView>,
    order: SortOrder,
    page_size: usize,
    cursor: Option<DateTime<Utc>>,
) -> Page<BookmarkView> {
    if order.is_time_based() {
        if let Some(cursor) = cursor {
            views.retain(|v| match order {
                SortOrder::Latest => v.bookmarked_at < cursor,
                _ => v.bookmarked_at > cursor,
            });
        }
    }

    let page_size = page_size.max(1);
    let items: Vec<_> = views.into_iter().take(page_size).collect();
    let next_cursor = if items.len() < page_size || !order.is_time_based() {
        None
    } else {
        items.last().map(|v| v.bookmarked_at)
    };

    Page { items, next_cursor }
}
