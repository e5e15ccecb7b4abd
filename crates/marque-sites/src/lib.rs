//! Bookmark resolver for the marque suite
//!
//! Joins the three record collections (sites, bookmarks, users) into
//! enriched listings, computes derived aggregates (bookmark counts, top
//! contributors), and paginates with creation-time cursors. The underlying
//! store offers no joins or aggregates; everything here is composed out of
//! single-collection scans.

pub mod error;
pub mod filter;
pub mod page;
pub mod service;
pub mod view;

pub use error::*;
pub use filter::*;
pub use page::*;
pub use service::*;
pub use view::*;
