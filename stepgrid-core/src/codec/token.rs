//! URL-safe text form of a [`CompactPattern`].
//!
//! Token format: unpadded base64url (RFC 4648 §5) of the compact JSON.
//! Trailing `=` padding is tolerated on input. Tokens from the older
//! compressed-text scheme use `+` and `$`, which are outside this alphabet,
//! so they are rejected before any decoding is attempted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use super::compact::CompactPattern;

/// Tokens longer than this are refused outright.
pub const MAX_TOKEN_LEN: usize = 8 * 1024;

#[derive(Debug)]
pub enum DecodeError {
    Empty,
    TooLong(usize),
    UnsupportedScheme(char),
    Base64(base64::DecodeError),
    Utf8(std::str::Utf8Error),
    Json(serde_json::Error),
}

impl From<base64::DecodeError> for DecodeError {
    fn from(e: base64::DecodeError) -> Self {
        Self::Base64(e)
    }
}

impl From<std::str::Utf8Error> for DecodeError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::Utf8(e)
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty token"),
            Self::TooLong(len) => write!(f, "token too long: {} bytes", len),
            Self::UnsupportedScheme(c) => {
                write!(f, "unsupported token encoding (unexpected {:?})", c)
            }
            Self::Base64(e) => write!(f, "base64 error: {}", e),
            Self::Utf8(e) => write!(f, "payload is not UTF-8: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for DecodeError {}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

pub fn encode(compact: &CompactPattern) -> Option<String> {
    match serde_json::to_vec(compact) {
        Ok(json) => Some(URL_SAFE_NO_PAD.encode(json)),
        Err(e) => {
            log::error!(target: "codec", "could not serialize pattern: {}", e);
            None
        }
    }
}

pub fn try_decode(token: &str) -> Result<CompactPattern, DecodeError> {
    let token = token.trim().trim_end_matches('=');
    if token.is_empty() {
        return Err(DecodeError::Empty);
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(DecodeError::TooLong(token.len()));
    }
    if let Some(c) = token.chars().find(|c| !is_token_char(*c)) {
        return Err(DecodeError::UnsupportedScheme(c));
    }

    let bytes = URL_SAFE_NO_PAD.decode(token)?;
    let json = std::str::from_utf8(&bytes)?;
    Ok(serde_json::from_str(json)?)
}

/// Decode a token, or `None` if it is malformed in any way.
pub fn decode(token: &str) -> Option<CompactPattern> {
    match try_decode(token) {
        Ok(compact) => Some(compact),
        Err(e) => {
            log::warn!(target: "codec", "rejecting pattern token: {}", e);
            None
        }
    }
}
