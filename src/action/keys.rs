//! Keystroke injection: the external "send these keys" collaborator.
//!
//! Chords use xdotool keysym syntax (`ctrl+v`, `Alt_L`).

use std::process::{Command, Stdio};

/// Paste from the clipboard.
pub const PASTE: &str = "ctrl+v";
/// Copy the selection.
pub const COPY: &str = "ctrl+c";
/// Focus the location bar in browsers and file managers.
pub const FOCUS_LOCATION: &str = "ctrl+l";
/// Tap Alt to move focus off the location bar.
pub const LEAVE_LOCATION: &str = "Alt_L";

#[derive(Debug, thiserror::Error)]
#[error("send keys {chord:?}: {reason}")]
pub struct KeyError {
    pub chord: String,
    pub reason: String,
}

/// Sends a key chord to the focused window. Fire-and-forget: success
/// means the chord was handed to the OS, not that anything reacted.
pub trait KeySender {
    fn send(&self, chord: &str) -> Result<(), KeyError>;
}

/// Injects keys through `xdotool key`.
pub struct XdotoolKeys;

impl KeySender for XdotoolKeys {
    fn send(&self, chord: &str) -> Result<(), KeyError> {
        let status = Command::new("xdotool")
            .args(["key", "--clearmodifiers", chord])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| KeyError {
                chord: chord.to_string(),
                reason: format!("failed to spawn xdotool: {e}"),
            })?;

        if status.success() {
            tracing::trace!(chord, "keys sent");
            Ok(())
        } else {
            Err(KeyError {
                chord: chord.to_string(),
                reason: format!("xdotool exited with status {status}"),
            })
        }
    }
}

/// Drops every chord. For running actions from a terminal, where the
/// focused window is the terminal itself.
pub struct NoKeys;

impl KeySender for NoKeys {
    fn send(&self, chord: &str) -> Result<(), KeyError> {
        tracing::debug!(chord, "key injection disabled, chord dropped");
        Ok(())
    }
}
