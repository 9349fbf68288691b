//! Opening paths/URLs and launching programs.

use std::process::{Command, Stdio};

#[derive(Debug, thiserror::Error)]
#[error("{action} {target:?}: {source}")]
pub struct OpenError {
    pub action: &'static str,
    pub target: String,
    pub source: std::io::Error,
}

/// Hands targets to the desktop. Both calls return once the process is
/// spawned; they never wait for it.
pub trait Opener {
    /// Open a directory, file, or URL with its default handler.
    fn open(&self, target: &str) -> Result<(), OpenError>;

    /// Start `program` with `args`.
    fn launch(&self, program: &str, args: &[String]) -> Result<(), OpenError>;
}

/// Opens through the platform handler: `explorer` on Windows, `open` on
/// macOS, `xdg-open` elsewhere.
pub struct SystemOpener;

impl SystemOpener {
    fn handler() -> &'static str {
        if cfg!(target_os = "windows") {
            "explorer"
        } else if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        }
    }
}

impl Opener for SystemOpener {
    fn open(&self, target: &str) -> Result<(), OpenError> {
        spawn_detached(Command::new(Self::handler()).arg(target)).map_err(|source| OpenError {
            action: "open",
            target: target.to_string(),
            source,
        })?;
        tracing::info!(path = target, "opened");
        Ok(())
    }

    fn launch(&self, program: &str, args: &[String]) -> Result<(), OpenError> {
        spawn_detached(Command::new(program).args(args)).map_err(|source| OpenError {
            action: "launch",
            target: program.to_string(),
            source,
        })?;
        tracing::info!(program, ?args, "launched");
        Ok(())
    }
}

fn spawn_detached(command: &mut Command) -> std::io::Result<()> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
}
