//! Record-store seam for the marque bookmarking suite
//!
//! The product's persistence is a hosted document database; this crate
//! defines the trait through which every other crate consumes it, plus an
//! in-process implementation used by tests and local development.

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::*;
