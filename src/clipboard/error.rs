// Lusakey — Clipboard error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard backend error: {0}")]
    Backend(String),

    #[error("No async runtime available to schedule the clipboard clear")]
    NoRuntime,
}
