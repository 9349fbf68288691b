//! Output formatting for CLI commands.
//!
//! Status lines go to stdout so a shell binding can capture them
//! (`hotclip save-url --url ... | notify-send`).

use crate::action::{Action, Binding, Outcome};
use crate::archive::ArchiveOutcome;
use crate::parallel::Resolution;

/// Print the binding table, one chord per line.
pub fn print_bindings(bindings: &[Binding]) {
    if bindings.is_empty() {
        println!("No bindings configured");
        return;
    }

    println!("{:<12} ACTIONS", "CHORD");
    println!("{}", "-".repeat(60));
    for b in bindings {
        let steps: Vec<String> = b.actions.iter().map(describe).collect();
        println!("{:<12} {}", b.chord, steps.join(", "));
    }
}

pub fn print_archive(outcome: Option<&ArchiveOutcome>) {
    let Some(outcome) = outcome else {
        println!("Nothing to save");
        return;
    };
    let verb = match outcome {
        ArchiveOutcome::Created(_) => "Saved",
        ArchiveOutcome::Touched(_) => "Already saved, touched",
    };
    println!("{verb} {}", outcome.path().display());
}

pub fn print_resolution(resolution: &Resolution) {
    match resolution {
        Resolution::Open(path) => println!("Opened {}", path.display()),
        Resolution::Ignore => println!("No parallel directory"),
    }
}

pub fn print_opened(target: Option<&str>) {
    match target {
        Some(target) => println!("Opened {target}"),
        None => println!("Clipboard holds no URL or path"),
    }
}

pub fn print_outcome(chord: &str, outcome: Outcome) {
    match outcome {
        Outcome::Done => println!("Ran {chord}"),
        Outcome::Reload => println!("Ran {chord}: reload requested"),
        Outcome::Switch(direction) => println!("Ran {chord}: switch {direction:?} requested"),
        Outcome::Quit => println!("Ran {chord}: quit requested"),
    }
}

/// One-word-ish summary of an action for the binding table.
fn describe(action: &Action) -> String {
    match action {
        Action::Launch { program, .. } => format!("launch {program}"),
        Action::Open { target } => format!("open {target}"),
        Action::SendKeys { keys } => format!("keys {}", keys.join(" ")),
        Action::Sleep { ms } => format!("sleep {ms}ms"),
        Action::Paste { text } => format!("paste {:?}", truncate(text, 20)),
        Action::Case { mode } => format!("case {mode}"),
        Action::GenerateId => "gen-id".to_string(),
        Action::SaveBrowserUrl { dir: Some(dir) } => format!("save-url {}", dir.display()),
        Action::SaveBrowserUrl { dir: None } => "save-url".to_string(),
        Action::OpenParallel { root, create } => {
            format!("parallel {root}{}", if *create { " (create)" } else { "" })
        }
        Action::OpenClipboardUrl => "open-clipboard-url".to_string(),
        Action::Reload => "reload".to_string(),
        Action::Switch { direction } => format!("switch {direction:?}").to_lowercase(),
        Action::Quit => "quit".to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::SwitchDirection;
    use crate::transform::CaseMode;

    #[test]
    fn describe_is_short() {
        assert_eq!(describe(&Action::Case { mode: CaseMode::Camel }), "case camel");
        assert_eq!(
            describe(&Action::OpenParallel {
                root: "D:/Study".into(),
                create: true
            }),
            "parallel D:/Study (create)"
        );
        assert_eq!(
            describe(&Action::Switch {
                direction: SwitchDirection::Next
            }),
            "switch next"
        );
    }

    #[test]
    fn long_paste_text_is_truncated() {
        let text = "SELECT *\nFROM\nWHERE 1\nAND 1\nORDER BY id DESC";
        assert_eq!(
            describe(&Action::Paste { text: text.into() }),
            format!("paste {:?}", "SELECT *\nFROM\nWHERE ...")
        );
    }
}
