//! Declarative chord → action table.
//!
//! The hotkey engine owns chord matching; this side only defines the
//! closed set of actions a chord can trigger and looks a chord up by its
//! exact text. Earlier bindings win over later ones with the same chord.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::transform::CaseMode;

/// Direction for [`Action::Switch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchDirection {
    Prev,
    Next,
}

/// Everything a binding can do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Start a program.
    Launch {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// Open a path or URL with its default handler.
    Open { target: String },
    /// Send chords in order.
    SendKeys { keys: Vec<String> },
    /// Pause between steps of a binding.
    Sleep { ms: u64 },
    /// Paste literal text, preserving the clipboard.
    Paste { text: String },
    /// Rewrite the clipboard text in another case.
    Case { mode: CaseMode },
    /// Paste a fresh random ID, preserving the clipboard.
    GenerateId,
    /// Copy the browser location bar and archive it as a `.url` file.
    /// Uses the configured archive directory when `dir` is absent.
    SaveBrowserUrl {
        #[serde(default)]
        dir: Option<PathBuf>,
    },
    /// Jump from the file manager's current directory to its parallel.
    OpenParallel {
        root: String,
        #[serde(default)]
        create: bool,
    },
    /// Open the clipboard text if it is a URL or an existing path.
    OpenClipboardUrl,
    /// Ask the engine to reload the binding table.
    Reload,
    /// Ask the engine to switch to another binding table.
    Switch { direction: SwitchDirection },
    /// Ask the engine to exit.
    Quit,
}

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Chord in the engine's notation, e.g. `^!]` or `+F1`.
    pub chord: String,
    /// Steps run in order.
    pub actions: Vec<Action>,
}

impl Binding {
    pub fn new(chord: &str, actions: Vec<Action>) -> Self {
        Self {
            chord: chord.to_string(),
            actions,
        }
    }
}

/// First binding whose chord is exactly `chord`.
pub fn find_binding<'a>(bindings: &'a [Binding], chord: &str) -> Option<&'a Binding> {
    bindings.iter().find(|b| b.chord == chord)
}

/// Outcome of running a binding that the engine must act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Reload,
    Switch(SwitchDirection),
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Table {
        bindings: Vec<Binding>,
    }

    #[test]
    fn actions_parse_from_toml() {
        let table: Table = toml::from_str(
            r#"
            [[bindings]]
            chord = "+F1"
            actions = [
                { type = "send_keys", keys = ["ctrl+c"] },
                { type = "sleep", ms = 20 },
                { type = "case", mode = "lower" },
                { type = "send_keys", keys = ["ctrl+v"] },
            ]

            [[bindings]]
            chord = "!F1"
            actions = [{ type = "open_parallel", root = "D:/Software" }]

            [[bindings]]
            chord = "^!]"
            actions = [{ type = "switch", direction = "next" }]
            "#,
        )
        .unwrap();

        assert_eq!(table.bindings.len(), 3);
        assert_eq!(table.bindings[0].actions[2], Action::Case { mode: CaseMode::Lower });
        assert_eq!(
            table.bindings[1].actions[0],
            Action::OpenParallel {
                root: "D:/Software".into(),
                create: false
            }
        );
        assert_eq!(
            table.bindings[2].actions[0],
            Action::Switch {
                direction: SwitchDirection::Next
            }
        );
    }

    #[test]
    fn unknown_action_type_is_rejected() {
        let result: Result<Table, _> = toml::from_str(
            r#"
            [[bindings]]
            chord = "F1"
            actions = [{ type = "format_disk" }]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn lookup_is_first_match_wins() {
        let bindings = vec![
            Binding::new("F1", vec![Action::Reload]),
            Binding::new("F2", vec![Action::Quit]),
            Binding::new("F1", vec![Action::Quit]),
        ];
        assert_eq!(find_binding(&bindings, "F1").unwrap().actions, vec![Action::Reload]);
        assert_eq!(find_binding(&bindings, "F2").unwrap().actions, vec![Action::Quit]);
        assert!(find_binding(&bindings, "F3").is_none());
    }
}
