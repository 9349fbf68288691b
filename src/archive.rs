//! URL archiver: save a URL as a Windows internet-shortcut (`.url`) file.
//!
//! File names are derived from the URL itself (`host/path@query#fragment`),
//! so saving the same URL twice refreshes the existing file's timestamp
//! instead of creating a copy, while different URLs that decode to the
//! same readable name get `_2`, `_3`, … suffixes.
//!
//! The existence checks and the write are not transactional: a crash or a
//! concurrent writer between them can leave a stray or partial file.

use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use url::Url;

use crate::transform::{escape_for_filename, unescape_filename};

/// Scheme assumed for bare-host input such as `example.com/page`.
pub const DEFAULT_SCHEME: &str = "http://";

/// Shortcut file extension, without the dot.
pub const EXTENSION: &str = "url";

/// Longest file stem, in characters, before the extension is appended.
pub const MAX_STEM_CHARS: usize = 200;

/// Archiver errors.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl ArchiveError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What [`save_url_as_file`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// A new shortcut file was written.
    Created(PathBuf),
    /// An existing shortcut for the same URL had its mtime refreshed.
    Touched(PathBuf),
}

impl ArchiveOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(p) | Self::Touched(p) => p,
        }
    }
}

/// A URL with the text that will be written into the shortcut.
#[derive(Debug)]
struct ShortcutUrl {
    /// The input, trimmed, with [`DEFAULT_SCHEME`] prepended if it had none.
    text: String,
    parsed: Url,
}

impl ShortcutUrl {
    fn parse(input: &str) -> Result<Self, ArchiveError> {
        let trimmed = input.trim();
        let invalid = |e: url::ParseError| ArchiveError::InvalidUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        };

        match Url::parse(trimmed) {
            Ok(parsed) => Ok(Self {
                text: trimmed.to_string(),
                parsed,
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let text = format!("{DEFAULT_SCHEME}{trimmed}");
                let parsed = Url::parse(&text).map_err(invalid)?;
                Ok(Self { text, parsed })
            }
            Err(e) => Err(invalid(e)),
        }
    }

    /// `[user[:password]@]host[:port]`, empty for URLs without authority.
    fn netloc(&self) -> String {
        let url = &self.parsed;
        let mut netloc = String::new();
        if !url.username().is_empty() {
            netloc.push_str(url.username());
            if let Some(password) = url.password() {
                netloc.push(':');
                netloc.push_str(password);
            }
            netloc.push('@');
        }
        if let Some(host) = url.host_str() {
            netloc.push_str(host);
        }
        if let Some(port) = url.port() {
            let _ = write!(netloc, ":{port}");
        }
        netloc
    }

    /// Escaped file stem: `host--path@query#fragment`, trailing `-` removed.
    fn escaped_stem(&self) -> String {
        let mut stem = escape_for_filename(&(self.netloc() + self.parsed.path()));
        if let Some(query) = self.parsed.query().filter(|q| !q.is_empty()) {
            stem.push('@');
            stem.push_str(&escape_for_filename(query));
        }
        if let Some(fragment) = self.parsed.fragment().filter(|f| !f.is_empty()) {
            stem.push('#');
            stem.push_str(&escape_for_filename(fragment));
        }
        stem.trim_end_matches('-').to_string()
    }
}

/// Save `url` as a `.url` shortcut in `output_dir`, creating the directory
/// if needed.
///
/// An existing file named exactly after the escaped URL, or starting with
/// that name plus a space (a manually annotated copy), is touched instead.
/// Otherwise the file gets the percent-decoded name, truncated to
/// [`MAX_STEM_CHARS`] and suffixed `_2`, `_3`, … past files for other URLs.
/// If that name cannot be created the escaped name is tried once. URLs
/// with neither host nor path (`mailto:`, `file:///`) are rejected.
pub fn save_url_as_file(url: &str, output_dir: &Path) -> Result<ArchiveOutcome, ArchiveError> {
    let url = ShortcutUrl::parse(url)?;
    let escaped = url.escaped_stem();
    if escaped.is_empty() {
        return Err(ArchiveError::InvalidUrl {
            url: url.text,
            reason: "no host or path to name the file after".into(),
        });
    }

    fs::create_dir_all(output_dir).map_err(|e| ArchiveError::io(output_dir, e))?;

    if let Some(existing) = find_existing(output_dir, &escaped)? {
        touch(&existing).map_err(|e| ArchiveError::io(&existing, e))?;
        tracing::info!(path = %existing.display(), "url shortcut touched");
        return Ok(ArchiveOutcome::Touched(existing));
    }

    let decoded = unescape_filename(&escaped);
    if decoded.chars().count() > MAX_STEM_CHARS {
        tracing::warn!(url = %url.text, "file name too long, truncated");
    }
    let readable = truncate_chars(&decoded, MAX_STEM_CHARS);

    let first_error = if is_single_component(&readable) {
        match write_into_slot(output_dir, &readable, &url.text) {
            Ok(outcome) => return Ok(outcome),
            Err(e) => e,
        }
    } else {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "decoded name contains a path separator",
        )
    };

    tracing::debug!(
        name = %readable,
        error = %first_error,
        "readable name rejected, falling back to escaped name"
    );
    let fallback = truncate_chars(&escaped, MAX_STEM_CHARS);
    write_into_slot(output_dir, &fallback, &url.text)
        .map_err(|e| ArchiveError::io(&output_dir.join(format!("{fallback}.{EXTENSION}")), e))
}

/// Exact escaped name first, then any `"<escaped> "`-prefixed entry.
fn find_existing(dir: &Path, escaped: &str) -> Result<Option<PathBuf>, ArchiveError> {
    let exact = dir.join(format!("{escaped}.{EXTENSION}"));
    if exact.exists() {
        return Ok(Some(exact));
    }

    let prefix = format!("{escaped} ");
    let entries = fs::read_dir(dir).map_err(|e| ArchiveError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ArchiveError::io(dir, e))?;
        if entry.file_name().to_string_lossy().starts_with(&prefix) {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

/// Where a shortcut for a given stem should go.
enum Slot {
    Free(PathBuf),
    /// A suffixed file already holds this exact URL.
    SameUrl(PathBuf),
}

/// First of `<stem>.url`, `<stem>_2.url`, … that is unused or already
/// points at `url`.
fn find_slot(dir: &Path, stem: &str, url: &str) -> Slot {
    let mut n = 1u32;
    loop {
        let name = if n == 1 {
            format!("{stem}.{EXTENSION}")
        } else {
            format!("{stem}_{n}.{EXTENSION}")
        };
        let path = dir.join(name);
        if !path.exists() {
            return Slot::Free(path);
        }
        if shortcut_target(&path).as_deref() == Some(url) {
            return Slot::SameUrl(path);
        }
        n += 1;
    }
}

fn write_into_slot(dir: &Path, stem: &str, url: &str) -> io::Result<ArchiveOutcome> {
    match find_slot(dir, stem, url) {
        Slot::SameUrl(path) => {
            touch(&path)?;
            tracing::info!(path = %path.display(), "url shortcut touched");
            Ok(ArchiveOutcome::Touched(path))
        }
        Slot::Free(path) => {
            let mut file = File::create(&path)?;
            file.write_all(shortcut_content(url).as_bytes())?;
            tracing::info!(path = %path.display(), "url shortcut created");
            Ok(ArchiveOutcome::Created(path))
        }
    }
}

/// `[InternetShortcut]` file body. No trailing newline.
pub fn shortcut_content(url: &str) -> String {
    format!("[InternetShortcut]\nURL={url}")
}

/// The `URL=` value of an existing shortcut, if readable.
fn shortcut_target(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    content
        .lines()
        .find_map(|line| line.strip_prefix("URL="))
        .map(|url| url.trim_end().to_string())
}

fn touch(path: &Path) -> io::Result<()> {
    OpenOptions::new()
        .write(true)
        .open(path)?
        .set_modified(SystemTime::now())
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn is_single_component(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\'])
}
