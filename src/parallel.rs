//! Parallel directory resolution.
//!
//! Jumps from a directory in one tree to the analogous directory in
//! another: with prefix `Study` and destination `D:/Software`, the source
//! `C:\Study\Dev\Lang\Python` maps to `D:/Software/Dev/Lang/Python`, or to
//! its closest existing ancestor when that does not exist.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Prefixes checked in order when none are configured.
pub const DEFAULT_PREFIXES: [&str; 5] = [
    "Study",
    "Software",
    "SoftwareData",
    "All\\Software2\\SoftwareBig",
    "All\\Software2\\SoftwareSmall",
];

/// Resolver errors.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("create {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },
}

/// What the caller should do with a resolved source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Open this directory.
    Open(PathBuf),
    /// Nothing suitable exists; take no action.
    Ignore,
}

/// Ordered prefix table. The first matching prefix wins; longer prefixes
/// are not preferred automatically, so list them first if they overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelResolver {
    /// Normalized to `/` separators, no leading or trailing separator.
    prefixes: Vec<String>,
}

impl Default for ParallelResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIXES)
    }
}

impl ParallelResolver {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|p| trim_separators(&to_forward(p.as_ref())).to_string())
                .collect(),
        }
    }

    /// Map `source_path` into `destination_root`.
    ///
    /// - With `create_if_missing`, the mirrored directory is created (with
    ///   parents) and opened; there is no fallback to an ancestor.
    /// - Without it, the mirrored directory or its closest existing
    ///   ancestor is opened. Reaching the drive or filesystem root yields
    ///   [`Resolution::Ignore`].
    /// - If no prefix matches, `destination_root` itself is opened.
    pub fn resolve(
        &self,
        source_path: &str,
        destination_root: &str,
        create_if_missing: bool,
    ) -> Result<Resolution, ResolveError> {
        let source = to_forward(strip_drive(source_path.trim()));
        let source = trim_separators(&source);
        tracing::debug!(source, "resolving parallel directory");

        let Some(relative) = self.relative_to_prefix(source) else {
            tracing::info!(open = destination_root, "no prefix matched");
            return Ok(Resolution::Open(PathBuf::from(destination_root)));
        };

        let candidate = join_forward(destination_root, relative);

        if create_if_missing {
            if !candidate.is_dir() {
                fs::create_dir_all(&candidate).map_err(|source| ResolveError::Create {
                    path: candidate.clone(),
                    source,
                })?;
                tracing::info!(path = %candidate.display(), "created parallel directory");
            }
            return Ok(Resolution::Open(candidate));
        }

        let mut current = candidate;
        loop {
            if current.is_dir() {
                tracing::info!(open = %current.display(), "parallel directory resolved");
                return Ok(Resolution::Open(current));
            }
            match current.parent() {
                Some(parent) if !is_root(parent) => current = parent.to_path_buf(),
                _ => {
                    tracing::info!(source = source_path, "no existing parallel directory");
                    return Ok(Resolution::Ignore);
                }
            }
        }
    }

    /// Remainder of `source` after the first matching prefix.
    ///
    /// A prefix matches only whole components: `Study` matches `Study` and
    /// `Study/Dev` but not `Study2`.
    fn relative_to_prefix<'s>(&self, source: &'s str) -> Option<&'s str> {
        self.prefixes.iter().find_map(|prefix| {
            let rest = source.strip_prefix(prefix.as_str())?;
            if rest.is_empty() || rest.starts_with('/') {
                Some(rest.trim_start_matches('/'))
            } else {
                None
            }
        })
    }
}

/// Drop a leading `X:` drive designator.
fn strip_drive(path: &str) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        &path[2..]
    } else {
        path
    }
}

fn to_forward(path: &str) -> String {
    path.replace('\\', "/")
}

fn trim_separators(path: &str) -> &str {
    path.trim_matches(['/', '\\'])
}

/// `root/relative` with `/` separators throughout.
fn join_forward(root: &str, relative: &str) -> PathBuf {
    let root = to_forward(root);
    if relative.is_empty() {
        return PathBuf::from(root);
    }
    let base = root.trim_end_matches('/');
    PathBuf::from(format!("{base}/{relative}"))
}

/// True for `""`, `/`, `X:` and `X:/`.
fn is_root(path: &Path) -> bool {
    let path = to_forward(&path.to_string_lossy());
    matches!(strip_drive(&path), "" | "/")
}
