//! Native clipboard provider via `arboard`.
//!
//! `arboard` handles are not `Send` on every platform, so one is created
//! per call instead of being held between `open` and `close`.
//!
//! Creating a handle never reports contention; only access does. `open`
//! therefore probes with a read, and a clipboard held by another process
//! (`ClipboardOccupied`) maps to the retryable [`ClipboardError::Busy`]
//! there. Reads and writes map it the same way, and the guard retries them
//! too.

use std::sync::atomic::{AtomicBool, Ordering};

use super::{ClipboardError, ClipboardResource};

/// OS clipboard through `arboard`.
#[derive(Default)]
pub struct SystemClipboard {
    open: AtomicBool,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self) -> Result<arboard::Clipboard, ClipboardError> {
        if !self.open.load(Ordering::Acquire) {
            return Err(ClipboardError::Backend("clipboard not open".into()));
        }
        arboard::Clipboard::new().map_err(map_error)
    }
}

fn map_error(e: arboard::Error) -> ClipboardError {
    match e {
        arboard::Error::ClipboardOccupied => ClipboardError::Busy(e.to_string()),
        other => ClipboardError::Backend(other.to_string()),
    }
}

/// An empty or non-text clipboard is still open for business.
fn probe_result(probe: Result<String, arboard::Error>) -> Result<(), ClipboardError> {
    match probe {
        Ok(_) | Err(arboard::Error::ContentNotAvailable) => Ok(()),
        Err(e) => Err(map_error(e)),
    }
}

impl ClipboardResource for SystemClipboard {
    fn open(&self) -> Result<(), ClipboardError> {
        if self.open.swap(true, Ordering::AcqRel) {
            return Err(ClipboardError::Busy("already open in this process".into()));
        }
        let probe = arboard::Clipboard::new().and_then(|mut cb| cb.get_text());
        if let Err(e) = probe_result(probe) {
            self.open.store(false, Ordering::Release);
            return Err(e);
        }
        Ok(())
    }

    fn close(&self) {
        self.open.store(false, Ordering::Release);
    }

    fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        match self.handle()?.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(map_error(e)),
        }
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        // arboard empties the clipboard and publishes CF_UNICODETEXT; Windows
        // synthesizes CF_TEXT from it for ANSI readers.
        self.handle()?.set_text(text).map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_probe_is_busy() {
        let r = probe_result(Err(arboard::Error::ClipboardOccupied));
        assert!(matches!(r, Err(ClipboardError::Busy(_))));
    }

    #[test]
    fn empty_clipboard_probe_opens() {
        assert!(probe_result(Err(arboard::Error::ContentNotAvailable)).is_ok());
        assert!(probe_result(Ok("X".into())).is_ok());
    }

    #[test]
    fn other_probe_errors_are_backend_failures() {
        let r = probe_result(Err(arboard::Error::ClipboardNotSupported));
        assert!(matches!(r, Err(ClipboardError::Backend(_))));
    }

    #[test]
    fn access_without_open_is_rejected() {
        let cb = SystemClipboard::new();
        assert!(matches!(cb.read_text(), Err(ClipboardError::Backend(_))));
    }
}
