//! Filename-safe escaping for URL-derived names.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters escaped in file names: everything except ASCII letters,
/// digits, space, and ``! # $ % & ' ( ) * + , - . ; = @ [ ] ^ _ ` { } ~``.
const FILENAME_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'%')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b';')
    .remove(b'=')
    .remove(b'@')
    .remove(b'[')
    .remove(b']')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'{')
    .remove(b'}')
    .remove(b'~');

/// Make `text` usable as a file name.
///
/// `/` becomes `--` (`pypi.org/project` → `pypi.org--project`); other
/// unsafe characters, including non-ASCII, are percent-escaped as UTF-8.
pub fn escape_for_filename(text: &str) -> String {
    let text = text.replace('/', "--");
    utf8_percent_encode(&text, FILENAME_ESCAPE).to_string()
}

/// Reverse percent-escaping for a human-readable name. `+` reads as a
/// space, as in form-encoded URLs. Invalid UTF-8 is replaced.
pub fn unescape_filename(text: &str) -> String {
    let text = text.replace('+', " ");
    percent_decode_str(&text).decode_utf8_lossy().into_owned()
}
