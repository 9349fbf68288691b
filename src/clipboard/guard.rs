//! Bounded-retry clipboard acquisition.
//!
//! The [`ClipboardGuard`] uses RAII to guarantee the clipboard is closed
//! on every exit path, including early `?` returns and panics.
//!
//! Some backends only see contention once the clipboard is accessed, so
//! reads and writes that fail with [`ClipboardError::Busy`] are retried
//! under the same policy as `open`.

use std::thread;

use super::{ClipboardError, ClipboardResource, RetryPolicy};

/// Scoped ownership of a [`ClipboardResource`].
///
/// Created by [`acquire`](ClipboardGuard::acquire). The explicit
/// [`release`](ClipboardGuard::release) is idempotent; the [`Drop`] impl
/// is the safety net for all other exit paths.
pub struct ClipboardGuard<'a> {
    resource: &'a dyn ClipboardResource,
    policy: RetryPolicy,
    released: bool,
}

impl<'a> ClipboardGuard<'a> {
    /// Open the clipboard, sleeping `policy.backoff` between failed
    /// attempts.
    ///
    /// Returns [`ClipboardError::Unavailable`] once `policy.attempts()`
    /// tries have failed. Nothing has been mutated at that point.
    pub fn acquire(
        resource: &'a dyn ClipboardResource,
        policy: &RetryPolicy,
    ) -> Result<Self, ClipboardError> {
        let attempts = policy.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            match resource.open() {
                Ok(()) => {
                    if attempt > 1 {
                        tracing::debug!(attempt, "clipboard acquired after retry");
                    }
                    return Ok(Self {
                        resource,
                        policy: *policy,
                        released: false,
                    });
                }
                Err(e) if attempt >= attempts => {
                    tracing::warn!(attempts, error = %e, "clipboard acquisition exhausted");
                    return Err(ClipboardError::Unavailable {
                        attempts,
                        last: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::trace!(attempt, error = %e, "clipboard busy, retrying");
                    thread::sleep(policy.backoff);
                }
            }
        }
    }

    pub fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        self.retry_busy("read", || self.resource.read_text())
    }

    pub fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.retry_busy("write", || self.resource.write_text(text))
    }

    /// Run `op` until it stops failing with `Busy` or the policy runs out.
    /// Other errors are returned as-is.
    fn retry_busy<T>(
        &self,
        op_name: &'static str,
        mut op: impl FnMut() -> Result<T, ClipboardError>,
    ) -> Result<T, ClipboardError> {
        let attempts = self.policy.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            match op() {
                Err(ClipboardError::Busy(last)) => {
                    if attempt >= attempts {
                        tracing::warn!(op = op_name, attempts, error = %last, "clipboard stayed busy");
                        return Err(ClipboardError::Unavailable { attempts, last });
                    }
                    tracing::trace!(op = op_name, attempt, error = %last, "clipboard busy, retrying");
                    thread::sleep(self.policy.backoff);
                }
                result => return result,
            }
        }
    }

    /// Close the clipboard now. Safe to call more than once.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.resource.close();
        }
    }
}

impl Drop for ClipboardGuard<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
