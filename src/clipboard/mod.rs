// Lusakey — Clipboard Module
//
// Timed exposure of revealed secrets on the shared clipboard.

mod backend;
mod error;
mod policy;

pub use backend::{ClipboardBackend, MemoryClipboard, SystemClipboard};
pub use error::ClipboardError;
pub use policy::{ClipboardPolicy, CLEAR_AFTER};
