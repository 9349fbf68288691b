//! Preserve-and-restore scope for destructive clipboard use.
//!
//! Paste-style actions use the clipboard as a side channel: they overwrite
//! it, send `Ctrl+V`, and move on. [`PreservedClipboard`] snapshots the
//! user's text on entry and writes it back when the scope ends, whether the
//! body returned normally, bailed out with `?`, or panicked.

use super::{ClipboardGuard, ClipboardResource, RetryPolicy};

/// RAII snapshot of the clipboard text.
///
/// Bind it to a named variable (`let _preserved = ...`) so it lives for
/// the whole body; `let _ = ...` drops it immediately.
pub struct PreservedClipboard<'a> {
    resource: &'a dyn ClipboardResource,
    policy: RetryPolicy,
    snapshot: Option<String>,
    restored: bool,
}

impl<'a> PreservedClipboard<'a> {
    /// Capture the current clipboard text.
    ///
    /// Never fails: if the clipboard cannot be acquired or read, the
    /// snapshot is `None` and nothing is restored on exit.
    pub fn enter(resource: &'a dyn ClipboardResource, policy: RetryPolicy) -> Self {
        let snapshot = match ClipboardGuard::acquire(resource, &policy) {
            Ok(guard) => match guard.read_text() {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(error = %e, "clipboard snapshot read failed");
                    None
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "clipboard snapshot acquire failed");
                None
            }
        };

        Self {
            resource,
            policy,
            snapshot,
            restored: false,
        }
    }

    /// The text captured on entry, if any.
    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    /// Restore immediately instead of waiting for drop.
    pub fn restore_now(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        let Some(text) = self.snapshot.as_deref() else {
            return;
        };

        let result = ClipboardGuard::acquire(self.resource, &self.policy)
            .and_then(|guard| guard.write_text(text));
        match result {
            Ok(()) => tracing::trace!(bytes = text.len(), "clipboard restored"),
            Err(e) => tracing::warn!(error = %e, "clipboard restore failed"),
        }
    }
}

impl Drop for PreservedClipboard<'_> {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};
    use std::time::Duration;

    use super::*;
    use crate::clipboard::ClipboardError;
    use crate::clipboard::memory::MemoryClipboard;

    fn fast() -> RetryPolicy {
        RetryPolicy::new(3, Duration::ZERO)
    }

    fn overwrite(cb: &MemoryClipboard, text: &str) -> Result<(), ClipboardError> {
        let guard = ClipboardGuard::acquire(cb, &fast())?;
        guard.write_text(text)
    }

    #[test]
    fn restores_after_normal_exit() {
        let cb = MemoryClipboard::with_text("X");
        {
            let preserved = PreservedClipboard::enter(&cb, fast());
            assert_eq!(preserved.snapshot(), Some("X"));
            overwrite(&cb, "Y").unwrap();
            assert_eq!(cb.text().as_deref(), Some("Y"));
        }
        assert_eq!(cb.text().as_deref(), Some("X"));
        assert!(!cb.is_open());
    }

    #[test]
    fn restores_and_propagates_body_error() {
        fn body(cb: &MemoryClipboard) -> Result<(), ClipboardError> {
            let _preserved = PreservedClipboard::enter(cb, fast());
            overwrite(cb, "Y")?;
            Err(ClipboardError::Backend("body failed".into()))
        }

        let cb = MemoryClipboard::with_text("X");
        let err = body(&cb).unwrap_err();
        assert!(err.to_string().contains("body failed"));
        assert_eq!(cb.text().as_deref(), Some("X"));
    }

    #[test]
    fn restores_after_panic() {
        let cb = MemoryClipboard::with_text("X");
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _preserved = PreservedClipboard::enter(&cb, fast());
            overwrite(&cb, "Y").unwrap();
            panic!("body panicked");
        }));
        assert!(result.is_err());
        assert_eq!(cb.text().as_deref(), Some("X"));
    }

    #[test]
    fn nothing_restored_when_clipboard_was_empty() {
        let cb = MemoryClipboard::empty();
        {
            let preserved = PreservedClipboard::enter(&cb, fast());
            assert_eq!(preserved.snapshot(), None);
            overwrite(&cb, "Y").unwrap();
        }
        assert_eq!(cb.text().as_deref(), Some("Y"));
        assert_eq!(cb.writes(), vec!["Y".to_string()]);
    }

    #[test]
    fn failed_snapshot_read_is_swallowed() {
        let cb = MemoryClipboard::with_text("X");
        cb.set_fail_reads(true);
        let preserved = PreservedClipboard::enter(&cb, fast());
        assert_eq!(preserved.snapshot(), None);
        assert!(!cb.is_open());
    }

    #[test]
    fn busy_clipboard_yields_empty_snapshot() {
        let cb = MemoryClipboard::with_text("X");
        cb.set_busy_for(10);
        let preserved = PreservedClipboard::enter(&cb, fast());
        assert_eq!(preserved.snapshot(), None);
    }

    #[test]
    fn transient_busy_read_still_snapshots_and_restores() {
        let cb = MemoryClipboard::with_text("X");
        cb.set_busy_io_for(1);
        {
            let preserved = PreservedClipboard::enter(&cb, RetryPolicy::new(10, Duration::ZERO));
            assert_eq!(preserved.snapshot(), Some("X"));
            overwrite(&cb, "Y").unwrap();
        }
        assert_eq!(cb.text().as_deref(), Some("X"));
    }

    #[test]
    fn failed_restore_is_swallowed() {
        let cb = MemoryClipboard::with_text("X");
        let preserved = PreservedClipboard::enter(&cb, fast());
        overwrite(&cb, "Y").unwrap();
        cb.set_fail_writes(true);
        drop(preserved);
        assert_eq!(cb.text().as_deref(), Some("Y"));
        assert!(!cb.is_open());
    }

    #[test]
    fn restore_now_runs_once() {
        let cb = MemoryClipboard::with_text("X");
        let preserved = PreservedClipboard::enter(&cb, fast());
        overwrite(&cb, "Y").unwrap();
        preserved.restore_now();
        assert_eq!(cb.text().as_deref(), Some("X"));
        assert_eq!(cb.writes(), vec!["Y".to_string(), "X".to_string()]);
    }
}
