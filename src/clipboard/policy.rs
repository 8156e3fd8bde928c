// Lusakey — Clipboard exposure policy
//
// `expose()` writes a value to the shared clipboard and spawns a one-shot
// task that empties it after a fixed delay. Timers are independent and not
// cancellable: an earlier exposure's timer still fires after a later copy,
// and the clear never checks what the clipboard holds at that point.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::{ClipboardBackend, ClipboardError, SystemClipboard};

/// Delay before an exposed value is cleared.
pub const CLEAR_AFTER: Duration = Duration::from_secs(30);

pub struct ClipboardPolicy {
    backend: Arc<dyn ClipboardBackend>,
    clear_after: Duration,
}

impl ClipboardPolicy {
    pub fn new(backend: Arc<dyn ClipboardBackend>) -> Self {
        Self {
            backend,
            clear_after: CLEAR_AFTER,
        }
    }

    /// Policy bound to the desktop clipboard.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClipboard::new()))
    }

    pub fn clear_after(&self) -> Duration {
        self.clear_after
    }

    /// Put `value` on the clipboard and schedule the clear.
    ///
    /// Must be called from within a tokio runtime. The returned handle can be
    /// awaited to observe the clear; dropping it does not cancel anything.
    pub fn expose(&self, value: &str) -> Result<JoinHandle<()>, ClipboardError> {
        let runtime = Handle::try_current().map_err(|_| ClipboardError::NoRuntime)?;

        self.backend.set_text(value)?;
        tracing::info!(
            clear_after_secs = self.clear_after.as_secs(),
            "Value copied to clipboard"
        );

        let backend = Arc::clone(&self.backend);
        let delay = self.clear_after;
        Ok(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            match backend.clear() {
                Ok(()) => tracing::info!("Clipboard cleared"),
                Err(e) => tracing::warn!(error = %e, "Failed to clear clipboard"),
            }
        }))
    }

    /// Empty the clipboard now.
    pub fn clear_now(&self) -> Result<(), ClipboardError> {
        self.backend.clear()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
