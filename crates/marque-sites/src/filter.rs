//! Listing filters and sort orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page size when the caller does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Sort order for bookmark listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    MostBookmarked,
    #[default]
    Latest,
    Longest,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    /// Whether the creation-time cursor is meaningful under this order.
    ///
    /// Count- and name-ordered listings have no time-shaped cursor to
    /// continue from; they return a single page.
    pub fn is_time_based(self) -> bool {
        matches!(self, SortOrder::Latest | SortOrder::Longest)
    }
}

/// Filter for bookmark listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkFilter {
    /// Case-insensitive substring matched against title and link.
    pub search: Option<String>,
    /// OR semantics: a bookmark matches if it carries at least one of these.
    pub tags: Vec<String>,
    pub sort: SortOrder,
    pub page_size: usize,
    /// Created-at of the last row of the previous page.
    pub cursor: Option<DateTime<Utc>>,
}

impl Default for BookmarkFilter {
    fn default() -> Self {
        Self {
            search: None,
            tags: Vec::new(),
            sort: SortOrder::default(),
            page_size: DEFAULT_PAGE_SIZE,
            cursor: None,
        }
    }
}

impl BookmarkFilter {
    /// Builder method to set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Builder method to set the tag filter.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Builder method to set the sort order.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Builder method to set the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Builder method to continue from a cursor.
    pub fn with_cursor(mut self, cursor: DateTime<Utc>) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Case-insensitive substring match over a site's title and link.
    pub fn matches_search(&self, title: &str, link: &str) -> bool {
        match &self.search {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                needle.is_empty()
                    || title.to_lowercase().contains(&needle)
                    || link.to_lowercase().contains(&needle)
            }
        }
    }
}
