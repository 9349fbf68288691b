use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::transform::CaseMode;

#[derive(Parser)]
#[command(name = "hotclip", about = "Clipboard actions for hotkey bindings")]
pub struct Cli {
    /// Config file [default: config.toml in the platform config dir]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log key chords instead of sending them
    #[arg(long, global = true)]
    pub no_keys: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rewrite the clipboard text in another case
    Case {
        #[arg(value_enum)]
        mode: CaseMode,
    },

    /// Paste text into the focused window, keeping the clipboard
    Paste { text: String },

    /// Paste a random 5-character ID, keeping the clipboard
    GenId,

    /// Save a URL as a .url shortcut file
    SaveUrl {
        /// URL to save; read from the browser location bar if omitted
        #[arg(long)]
        url: Option<String>,

        /// Output directory [default: archive dir from config]
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Open the parallel of a directory under another root
    Parallel {
        /// Destination root, e.g. D:/Software
        #[arg(long)]
        root: String,

        /// Create the mirrored directory instead of falling back
        #[arg(long)]
        create: bool,

        /// Source directory; read from the file manager location bar if omitted
        #[arg(long)]
        path: Option<String>,
    },

    /// Open the clipboard text if it is a URL or existing path
    OpenClipboardUrl,

    /// List configured bindings
    Bindings,

    /// Run the binding for a chord
    Run {
        /// Chord exactly as configured, e.g. "^!]"
        chord: String,
    },
}

impl Command {
    /// Subcommand name as typed, for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Case { .. } => "case",
            Self::Paste { .. } => "paste",
            Self::GenId => "gen-id",
            Self::SaveUrl { .. } => "save-url",
            Self::Parallel { .. } => "parallel",
            Self::OpenClipboardUrl => "open-clipboard-url",
            Self::Bindings => "bindings",
            Self::Run { .. } => "run",
        }
    }
}
