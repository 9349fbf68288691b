//! Pure text transforms used by clipboard actions.
//!
//! Case conversion, random ID tokens, and filename-safe escaping. None of
//! these touch the clipboard; callers read and write it around them.

pub mod case;
pub mod escape;
pub mod token;

pub use case::{CaseMode, convert_case};
pub use escape::{escape_for_filename, unescape_filename};
pub use token::random_token;

/// Transform errors.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("no acceptable token after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
}
