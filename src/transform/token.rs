//! Random ID tokens: base62 over 16 random bytes, rejection sampled.

use rand::RngCore;

use super::TransformError;

/// Default number of draws before giving up.
pub const DEFAULT_ATTEMPTS: u32 = 100;

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate an uppercase base62 token of at most `length` characters whose
/// first character is a digit `1`-`9`.
///
/// Draws that fail the check are discarded, not repaired. Gives up with
/// [`TransformError::GenerationExhausted`] after `max_attempts` draws.
pub fn random_token(length: usize, max_attempts: u32) -> Result<String, TransformError> {
    random_token_with(&mut rand::thread_rng(), length, max_attempts)
}

/// [`random_token`] with a caller-supplied generator.
pub fn random_token_with<R: RngCore + ?Sized>(
    rng: &mut R,
    length: usize,
    max_attempts: u32,
) -> Result<String, TransformError> {
    for attempt in 1..=max_attempts {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);

        let mut token = encode_base62(u128::from_be_bytes(bytes));
        token.truncate(length);
        let token = token.to_uppercase();

        if token_is_ok(&token) {
            return Ok(token);
        }
        tracing::trace!(attempt, token = %token, "token rejected");
    }

    Err(TransformError::GenerationExhausted {
        attempts: max_attempts,
    })
}

/// Tokens must start with a non-zero digit so they sort and read as IDs.
fn token_is_ok(token: &str) -> bool {
    matches!(token.as_bytes().first(), Some(b'1'..=b'9'))
}

/// Big-endian base62, most significant digit first, no padding.
fn encode_base62(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(22);
    while value > 0 {
        digits.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    digits.reverse();
    // ALPHABET is ASCII.
    String::from_utf8_lossy(&digits).into_owned()
}
