//! X11 clipboard provider: read/write via `xclip`.
//!
//! Wraps `xclip -selection clipboard` for clipboard access. X11 selections
//! have no open/close ownership step, so `open` only checks that no other
//! call in this process is mid-operation.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};

use super::{ClipboardError, ClipboardResource};

/// X11 implementation of [`ClipboardResource`] via `xclip`.
#[derive(Default)]
pub struct XclipClipboard {
    open: AtomicBool,
}

impl XclipClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardResource for XclipClipboard {
    fn open(&self) -> Result<(), ClipboardError> {
        if self.open.swap(true, Ordering::AcqRel) {
            return Err(ClipboardError::Busy("already open in this process".into()));
        }
        Ok(())
    }

    fn close(&self) {
        self.open.store(false, Ordering::Release);
    }

    fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        let output = Command::new("xclip")
            .args(["-selection", "clipboard", "-o"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| ClipboardError::Backend(format!("failed to spawn xclip -o: {e}")))?;

        // xclip exits non-zero when the selection is empty or holds no text.
        if !output.status.success() {
            tracing::debug!(status = %output.status, "xclip -o returned no text");
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new("xclip")
            .args(["-selection", "clipboard"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ClipboardError::Backend(format!("failed to spawn xclip: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| ClipboardError::Backend(format!("failed to write to xclip: {e}")))?;
            // Drop stdin to close the pipe so xclip can finish.
        }

        let status = child
            .wait()
            .map_err(|e| ClipboardError::Backend(format!("failed to wait for xclip: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Backend(format!(
                "xclip exited with status {status}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_is_exclusive_within_process() {
        let cb = XclipClipboard::new();
        cb.open().unwrap();
        assert!(matches!(cb.open(), Err(ClipboardError::Busy(_))));
        cb.close();
        cb.open().unwrap();
    }

    #[test]
    fn close_without_open_is_harmless() {
        let cb = XclipClipboard::new();
        cb.close();
        cb.open().unwrap();
    }
}
