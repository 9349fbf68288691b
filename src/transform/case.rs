//! Case conversion: lower, upper, camelCase, PascalCase.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Target case for [`convert_case`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    Lower,
    Upper,
    Camel,
    Pascal,
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Camel => "camel",
            Self::Pascal => "pascal",
        };
        f.write_str(name)
    }
}

/// Anything that is not an ASCII letter or digit separates words.
static WORD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").expect("separator pattern is valid"));

/// Convert `text` to the requested case. Never fails; empty in, empty out.
///
/// `Camel` and `Pascal` drop every non-alphanumeric character, treat it as
/// a word break, and capitalize each word (`"foo_bar-baz"` becomes
/// `"FooBarBaz"` / `"fooBarBaz"`). Letters inside a word are lowered, so
/// `"HTTP server"` becomes `"HttpServer"`.
pub fn convert_case(text: &str, mode: CaseMode) -> String {
    match mode {
        CaseMode::Lower => text.to_lowercase(),
        CaseMode::Upper => text.to_uppercase(),
        CaseMode::Pascal => pascal_words(text),
        CaseMode::Camel => {
            let pascal = pascal_words(text);
            let mut chars = pascal.chars();
            match chars.next() {
                Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        }
    }
}

fn pascal_words(text: &str) -> String {
    WORD_SEPARATOR
        .replace_all(text, " ")
        .split_whitespace()
        .map(capitalize)
        .collect()
}

/// First character upper, the rest lower.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}
