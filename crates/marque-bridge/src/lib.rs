//! Storage bridge between the marque extension and its companion website
//!
//! Three isolated execution contexts hold the same flat string-keyed state:
//! the extension background (durable storage), the content script injected
//! into the website (relay), and the website page itself (local storage).
//! None of them can share memory or storage directly, so this crate defines
//! the message protocol and the three endpoints that keep them in sync:
//! best-effort, single-attempt, origin-checked, full-replace.

pub mod background;
pub mod cell;
pub mod channel;
pub mod message;
pub mod origin;
pub mod page;
pub mod relay;
pub mod storage;

pub use background::*;
pub use cell::*;
pub use channel::*;
pub use message::*;
pub use origin::*;
pub use page::*;
pub use relay::*;
pub use storage::*;
