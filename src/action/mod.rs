//! Hotkey actions: clipboard side effects composed with key injection and
//! the desktop opener.
//!
//! Each action runs to completion on the calling thread. Actions that use
//! the clipboard as a side channel (paste, ID generation, reading the
//! location bar) hold a [`PreservedClipboard`] for their whole body so the
//! user's clipboard text survives.

pub mod binding;
pub mod keys;
pub mod opener;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::archive::{self, ArchiveError, ArchiveOutcome};
use crate::clipboard::{
    ClipboardError, ClipboardGuard, ClipboardResource, PreservedClipboard, RetryPolicy, millis,
};
use crate::parallel::{ParallelResolver, Resolution, ResolveError};
use crate::transform::{self, CaseMode, TransformError, convert_case};

pub use binding::{Action, Binding, Outcome, SwitchDirection, find_binding};
pub use keys::{KeyError, KeySender, NoKeys, XdotoolKeys};
pub use opener::{OpenError, Opener, SystemOpener};

/// Length of IDs pasted by [`ActionContext::generate_id_and_paste`].
pub const ID_LENGTH: usize = 5;

/// Action errors.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Keys(#[from] KeyError),
    #[error(transparent)]
    Open(#[from] OpenError),
    #[error("no binding for chord {0:?}")]
    UnknownChord(String),
    #[error("no archive directory: set [archive] dir in the config")]
    NoArchiveDir,
}

/// Pauses that give the target window time to react to injected keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// After a key chord whose effect the next step depends on.
    #[serde(with = "millis")]
    pub settle: Duration,
    /// After pasting a generated ID, before the clipboard is restored.
    #[serde(with = "millis")]
    pub after_paste: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(50),
            after_paste: Duration::from_millis(30),
        }
    }
}

/// Everything an action needs, passed explicitly.
pub struct ActionContext<'a> {
    pub clipboard: &'a dyn ClipboardResource,
    pub keys: &'a dyn KeySender,
    pub opener: &'a dyn Opener,
    pub resolver: &'a ParallelResolver,
    pub policy: RetryPolicy,
    pub timing: Timing,
    /// Where [`Action::SaveBrowserUrl`] writes when it names no directory.
    /// `None` if no default could be resolved; only actions that need it
    /// fail.
    pub archive_dir: Option<PathBuf>,
}

impl ActionContext<'_> {
    /// Run a binding's steps in order. Stops at the first step the engine
    /// must handle (reload, switch, quit) and returns it.
    pub fn run_all(&self, actions: &[Action]) -> Result<Outcome, ActionError> {
        for action in actions {
            let outcome = self.run(action)?;
            if outcome != Outcome::Done {
                return Ok(outcome);
            }
        }
        Ok(Outcome::Done)
    }

    /// Run a single action.
    pub fn run(&self, action: &Action) -> Result<Outcome, ActionError> {
        tracing::debug!(?action, "running action");
        match action {
            Action::Launch { program, args } => self.opener.launch(program, args)?,
            Action::Open { target } => self.opener.open(target)?,
            Action::SendKeys { keys } => {
                for chord in keys {
                    self.keys.send(chord)?;
                }
            }
            Action::Sleep { ms } => thread::sleep(Duration::from_millis(*ms)),
            Action::Paste { text } => self.paste_text(text)?,
            Action::Case { mode } => {
                self.convert_clipboard_case(*mode)?;
            }
            Action::GenerateId => {
                self.generate_id_and_paste()?;
            }
            Action::SaveBrowserUrl { dir } => {
                let dir = match dir {
                    Some(dir) => dir.as_path(),
                    None => self.default_archive_dir()?,
                };
                self.save_browser_url(dir)?;
            }
            Action::OpenParallel { root, create } => {
                self.open_parallel_dir(root, *create)?;
            }
            Action::OpenClipboardUrl => {
                self.open_clipboard_url()?;
            }
            Action::Reload => return Ok(Outcome::Reload),
            Action::Switch { direction } => return Ok(Outcome::Switch(*direction)),
            Action::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Done)
    }

    pub fn default_archive_dir(&self) -> Result<&Path, ActionError> {
        self.archive_dir.as_deref().ok_or(ActionError::NoArchiveDir)
    }

    /// Put `text` on the clipboard, paste it, and restore the clipboard.
    pub fn paste_text(&self, text: &str) -> Result<(), ActionError> {
        let _preserved = PreservedClipboard::enter(self.clipboard, self.policy);
        self.write_clipboard(text)?;
        thread::sleep(self.timing.settle);
        self.keys.send(keys::PASTE)?;
        Ok(())
    }

    /// Paste a fresh [`ID_LENGTH`]-character token, preserving the
    /// clipboard. Returns the token.
    pub fn generate_id_and_paste(&self) -> Result<String, ActionError> {
        let preserved = PreservedClipboard::enter(self.clipboard, self.policy);
        let id = transform::random_token(ID_LENGTH, transform::token::DEFAULT_ATTEMPTS)?;
        self.write_clipboard(&id)?;
        self.keys.send(keys::PASTE)?;
        thread::sleep(self.timing.after_paste);
        tracing::info!(id = %id, restoring = preserved.snapshot().is_some(), "id pasted");
        preserved.restore_now();
        Ok(id)
    }

    /// Rewrite the clipboard text in `mode`, in place. The conversion is
    /// the point, so nothing is restored. Returns the new text, or `None`
    /// if the clipboard held no text.
    pub fn convert_clipboard_case(&self, mode: CaseMode) -> Result<Option<String>, ActionError> {
        let guard = ClipboardGuard::acquire(self.clipboard, &self.policy)?;
        let Some(text) = guard.read_text()?.filter(|t| !t.is_empty()) else {
            tracing::debug!(%mode, "clipboard empty, nothing to convert");
            return Ok(None);
        };
        let converted = convert_case(&text, mode);
        guard.write_text(&converted)?;
        tracing::info!(%mode, "clipboard case converted");
        Ok(Some(converted))
    }

    /// Copy the focused browser's location bar and archive the URL in
    /// `dir`. Returns `None` if nothing was copied.
    pub fn save_browser_url(&self, dir: &Path) -> Result<Option<ArchiveOutcome>, ActionError> {
        let _preserved = PreservedClipboard::enter(self.clipboard, self.policy);
        let copied = self.copy_location_bar()?;
        self.keys.send(keys::LEAVE_LOCATION)?;

        let Some(url) = copied else {
            tracing::info!("location bar empty, nothing to save");
            return Ok(None);
        };
        Ok(Some(archive::save_url_as_file(&url, dir)?))
    }

    /// Archive a URL given directly. No keys, no clipboard.
    pub fn save_url(&self, url: &str, dir: &Path) -> Result<ArchiveOutcome, ActionError> {
        Ok(archive::save_url_as_file(url, dir)?)
    }

    /// Copy the file manager's current directory from its location bar and
    /// open its parallel under `root`.
    pub fn open_parallel_dir(&self, root: &str, create: bool) -> Result<Resolution, ActionError> {
        let _preserved = PreservedClipboard::enter(self.clipboard, self.policy);
        let Some(current) = self.copy_location_bar()? else {
            tracing::info!("location bar empty, nothing to resolve");
            return Ok(Resolution::Ignore);
        };
        self.open_parallel_of(&current, root, create)
    }

    /// Open the parallel of `source` under `root`.
    pub fn open_parallel_of(
        &self,
        source: &str,
        root: &str,
        create: bool,
    ) -> Result<Resolution, ActionError> {
        let resolution = self.resolver.resolve(source, root, create)?;
        if let Resolution::Open(path) = &resolution {
            self.opener.open(&path.to_string_lossy())?;
        }
        Ok(resolution)
    }

    /// Open the clipboard text if it names an existing path or looks like a
    /// web URL. Returns what was opened.
    pub fn open_clipboard_url(&self) -> Result<Option<String>, ActionError> {
        let Some(text) = self.read_clipboard()? else {
            return Ok(None);
        };
        let target = text.trim();

        let is_web = ["http://", "https://", "www."]
            .iter()
            .any(|prefix| target.starts_with(prefix));
        if !is_web && !Path::new(target).exists() {
            tracing::debug!(text = %target, "clipboard is neither a path nor a URL");
            return Ok(None);
        }

        self.opener.open(target)?;
        Ok(Some(target.to_string()))
    }

    /// `ctrl+l`, `ctrl+c`, then read what landed on the clipboard.
    fn copy_location_bar(&self) -> Result<Option<String>, ActionError> {
        self.keys.send(keys::FOCUS_LOCATION)?;
        thread::sleep(self.timing.settle);
        self.keys.send(keys::COPY)?;
        thread::sleep(self.timing.settle);
        Ok(self.read_clipboard()?)
    }

    /// Clipboard text, `None` when absent or blank.
    fn read_clipboard(&self) -> Result<Option<String>, ClipboardError> {
        let guard = ClipboardGuard::acquire(self.clipboard, &self.policy)?;
        Ok(guard.read_text()?.filter(|t| !t.trim().is_empty()))
    }

    fn write_clipboard(&self, text: &str) -> Result<(), ClipboardError> {
        ClipboardGuard::acquire(self.clipboard, &self.policy)?.write_text(text)
    }
}
