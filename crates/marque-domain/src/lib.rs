//! Domain types shared across the marque bookmarking suite
//!
//! This crate provides the canonical models for social bookmarking:
//! - Site: a bookmarkable URL, shared across every user who saved it
//! - SiteBookmark: one user's relationship to a site (visibility, tags)
//! - User: account and profile record
//! - Link validation: which URLs are bookmarkable at all

pub mod bookmark;
pub mod link;
pub mod site;
pub mod user;

pub use bookmark::*;
pub use link::*;
pub use site::*;
pub use user::*;
