//! Configuration loaded from `config.toml` in the platform config dir.
//!
//! Every section is optional; a missing file is created with the defaults
//! on first run so the binding table has somewhere to be edited.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::action::{Action, Binding, SwitchDirection, Timing, keys};
use crate::clipboard::RetryPolicy;
use crate::parallel::DEFAULT_PREFIXES;
use crate::transform::CaseMode;

/// Config errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no home directory to place the config in")]
    NoConfigDir,
    #[error("read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("serialize: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Which clipboard adapter to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    /// Native clipboard through `arboard`.
    #[default]
    System,
    /// `xclip` subprocess, for X11 sessions without a native handle.
    Xclip,
}

/// Which key injector to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyBackend {
    #[default]
    Xdotool,
    /// Log chords instead of sending them.
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub backend: ClipboardBackend,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub backend: KeyBackend,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Where browser URLs are saved. Defaults to `urls/` in the data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Checked in order; first match wins.
    pub prefixes: Vec<String>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotclipConfig {
    pub clipboard: ClipboardConfig,
    pub keys: KeysConfig,
    pub timing: Timing,
    pub archive: ArchiveConfig,
    pub parallel: ParallelConfig,
    pub bindings: Vec<Binding>,
}

impl Default for HotclipConfig {
    fn default() -> Self {
        Self {
            clipboard: ClipboardConfig::default(),
            keys: KeysConfig::default(),
            timing: Timing::default(),
            archive: ArchiveConfig::default(),
            parallel: ParallelConfig::default(),
            bindings: default_bindings(),
        }
    }
}

impl HotclipConfig {
    /// Configured archive dir, or `urls/` under the platform data dir.
    pub fn archive_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.archive.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().join("urls")),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("com", "hotclip", "hotclip").ok_or(ConfigError::NoConfigDir)
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Load `path`, writing the defaults there first if it does not exist.
pub fn load_or_init(path: &Path) -> Result<HotclipConfig, ConfigError> {
    if !path.exists() {
        let config = HotclipConfig::default();
        let text = toml::to_string_pretty(&config)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "created default config");
        return Ok(config);
    }
    load(path)
}

pub fn load(path: &Path) -> Result<HotclipConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn copy_then(action: Action) -> Vec<Action> {
    vec![
        Action::SendKeys {
            keys: vec![keys::COPY.into()],
        },
        Action::Sleep { ms: 20 },
        action,
    ]
}

fn convert_selection(mode: CaseMode) -> Vec<Action> {
    let mut actions = copy_then(Action::Case { mode });
    actions.push(Action::SendKeys {
        keys: vec![keys::PASTE.into()],
    });
    actions
}

fn parallel(root: &str, create: bool) -> Vec<Action> {
    vec![Action::OpenParallel {
        root: root.into(),
        create,
    }]
}

/// Table written to a fresh config file.
pub fn default_bindings() -> Vec<Binding> {
    vec![
        Binding::new("+{ESC}", vec![Action::Reload]),
        Binding::new("!{ESC}", parallel("D:/Study", false)),
        Binding::new("#!{ESC}", parallel("D:/Study", true)),
        Binding::new(
            "::{ESC}2",
            vec![Action::Paste {
                text: "SHOW CREATE TABLE ".into(),
            }],
        ),
        Binding::new("+F1", convert_selection(CaseMode::Lower)),
        Binding::new("+F2", convert_selection(CaseMode::Upper)),
        Binding::new("+F3", convert_selection(CaseMode::Pascal)),
        Binding::new("+F4", convert_selection(CaseMode::Camel)),
        Binding::new("!F1", parallel("D:/Software", false)),
        Binding::new("#!F1", parallel("D:/Software", true)),
        Binding::new("!F2", parallel("F:/all/Software2/SoftwareSmall", false)),
        Binding::new("#!F2", parallel("F:/all/Software2/SoftwareSmall", true)),
        Binding::new("!F3", parallel("F:/all/Software2/SoftwareBig", false)),
        Binding::new("#!F3", parallel("F:/all/Software2/SoftwareBig", true)),
        Binding::new("!F5", parallel("D:/SoftwareData", false)),
        Binding::new("#!F5", parallel("D:/SoftwareData", true)),
        Binding::new(
            "F1",
            vec![Action::Open {
                target: "https://www.google.com/".into(),
            }],
        ),
        Binding::new(
            "^1",
            vec![Action::SaveBrowserUrl {
                dir: Some(PathBuf::from(r"D:\SoftwareData\URL")),
            }],
        ),
        Binding::new(
            "^2",
            vec![Action::SendKeys {
                keys: vec!["ctrl+w".into()],
            }],
        ),
        Binding::new("$^3", vec![Action::GenerateId]),
        Binding::new("!r", copy_then(Action::OpenClipboardUrl)),
        Binding::new("^!+q", vec![Action::Quit]),
        Binding::new(
            "^![",
            vec![Action::Switch {
                direction: SwitchDirection::Prev,
            }],
        ),
        Binding::new(
            "^!]",
            vec![Action::Switch {
                direction: SwitchDirection::Next,
            }],
        ),
    ]
}
