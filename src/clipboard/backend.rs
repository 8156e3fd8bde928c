// Lusakey — Clipboard backends
//
// `SystemClipboard` talks to the desktop clipboard through `arboard`; the
// handle is created on first use so headless processes can still start.
// `MemoryClipboard` keeps the value in process for tests and headless runs.

use std::sync::Mutex;

use super::ClipboardError;

/// A shared clipboard the exposure policy can write to and clear.
pub trait ClipboardBackend: Send + Sync {
    /// Replace the clipboard contents with `value`.
    fn set_text(&self, value: &str) -> Result<(), ClipboardError>;

    /// Empty the clipboard.
    fn clear(&self) -> Result<(), ClipboardError>;
}

// ─── System Implementation ───────────────────────────────────────────────────

/// The desktop clipboard (X11/Wayland-via-XWayland, macOS, Windows).
#[derive(Default)]
pub struct SystemClipboard {
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_clipboard<T>(
        &self,
        op: impl FnOnce(&mut arboard::Clipboard) -> Result<T, arboard::Error>,
    ) -> Result<T, ClipboardError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| ClipboardError::Backend("clipboard lock poisoned".to_string()))?;

        if guard.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Backend(format!("failed to open clipboard: {}", e)))?;
            *guard = Some(clipboard);
        }

        match guard.as_mut() {
            Some(clipboard) => op(clipboard).map_err(|e| ClipboardError::Backend(e.to_string())),
            None => Err(ClipboardError::Backend("clipboard unavailable".to_string())),
        }
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set_text(&self, value: &str) -> Result<(), ClipboardError> {
        self.with_clipboard(|clipboard| clipboard.set_text(value))
    }

    fn clear(&self) -> Result<(), ClipboardError> {
        self.with_clipboard(|clipboard| clipboard.clear())
    }
}

// ─── In-Memory Implementation ────────────────────────────────────────────────

/// Process-local clipboard.
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents; `None` when empty.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn set_text(&self, value: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| ClipboardError::Backend("clipboard lock poisoned".to_string()))?;
        *guard = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClipboardError> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| ClipboardError::Backend("clipboard lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_set_and_clear() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);

        clipboard.set_text("p@ss1").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("p@ss1"));

        clipboard.set_text("other").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("other"));

        clipboard.clear().unwrap();
        assert_eq!(clipboard.contents(), None);
    }

    #[test]
    fn test_clearing_an_empty_clipboard_is_ok() {
        let clipboard = MemoryClipboard::new();
        assert!(clipboard.clear().is_ok());
    }
}
