//! Clipboard access: bounded-retry acquisition and scoped preservation.
//!
//! The OS clipboard is a process-global resource that other programs may
//! hold open at any moment. Every operation in this crate goes through an
//! explicit [`ClipboardResource`] handle rather than ambient global state:
//! [`ClipboardGuard`] acquires it with bounded retries, and
//! [`PreservedClipboard`] snapshots and restores the user's text around a
//! destructive operation.

pub mod guard;
#[cfg(test)]
pub mod memory;
pub mod preserve;
pub mod system;
pub mod xclip;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use guard::ClipboardGuard;
pub use preserve::PreservedClipboard;
pub use system::SystemClipboard;
pub use xclip::XclipClipboard;

/// Errors returned by clipboard adapters and the acquisition guard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// The clipboard is held by another process. Retryable.
    #[error("clipboard busy: {0}")]
    Busy(String),

    /// The clipboard could not be acquired after exhausting the retry
    /// policy.
    #[error("clipboard unavailable after {attempts} attempts: {last}")]
    Unavailable { attempts: u32, last: String },

    /// Backend failure while reading or writing (e.g. xclip missing,
    /// pipe error).
    #[error("clipboard: {0}")]
    Backend(String),
}

/// Exclusive-access clipboard handle.
///
/// `open` may fail transiently when another process holds the clipboard;
/// callers acquire through [`ClipboardGuard`], which retries. `read_text`
/// and `write_text` are only called between a successful `open` and the
/// matching `close`.
///
/// `Send + Sync` mirrors the platform handles, which are safe to move to
/// whichever thread the dispatch engine runs actions on.
pub trait ClipboardResource: Send + Sync {
    /// Try once to take ownership of the clipboard.
    fn open(&self) -> Result<(), ClipboardError>;

    /// Give up ownership. Must tolerate being called when not open.
    fn close(&self);

    /// Read the current text, `None` if the clipboard holds no text.
    fn read_text(&self) -> Result<Option<String>, ClipboardError>;

    /// Empty the clipboard and publish `text` in every text
    /// representation the backend supports (ANSI and Unicode on Windows).
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// How hard to try when the clipboard is held by someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Fixed sleep between attempts.
    #[serde(with = "millis")]
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_ATTEMPTS: u32 = 10;
    pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(100);

    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Attempts actually made, never zero.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_BACKOFF)
    }
}

/// `Duration` as integer milliseconds in config files (`backoff = 100`).
pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
