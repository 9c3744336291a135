//! Share links.
//!
//! A pattern travels in the `pattern` query parameter:
//! `https://host/path?pattern=<token>`. Anything after `#` is ignored.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::codec::{self, PatternSnapshot};

pub const PATTERN_PARAM: &str = "pattern";

pub fn create_share_token(snapshot: &PatternSnapshot) -> Option<String> {
    codec::encode(&codec::compress(snapshot))
}

/// Build the link for `token` on top of `base_url`, dropping any query or
/// fragment `base_url` already carries.
pub fn share_url(base_url: &str, token: &str) -> String {
    let end = base_url.find(['?', '#']).unwrap_or(base_url.len());
    format!("{}?{}={}", &base_url[..end], PATTERN_PARAM, token)
}

/// Pull the token out of a location string such as
/// `https://host/?x=1&pattern=abc#top`. Percent escapes in the value are
/// decoded (`%3D` becomes `=`); `+` is kept as is so tokens from the
/// compressed-text scheme are still recognized by the decoder.
pub fn token_from_location(raw: &str) -> Option<Cow<'_, str>> {
    let without_fragment = raw.split('#').next().unwrap_or(raw);
    let (_, query) = without_fragment.split_once('?')?;
    let value = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == PATTERN_PARAM)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())?;
    match percent_decode_str(value).decode_utf8() {
        Ok(token) => Some(token),
        Err(e) => {
            log::debug!(target: "share", "pattern parameter is not UTF-8 after unescaping: {}", e);
            None
        }
    }
}

/// Decode, expand and validate a bare token.
pub fn load_token(token: &str) -> Option<PatternSnapshot> {
    let compact = codec::decode(token)?;
    codec::validate(codec::decompress(compact))
}

/// Read a shared pattern back out of a location string. `None` means there
/// was no usable pattern and the caller should keep its default state.
pub fn load_from_location_string(raw: &str) -> Option<PatternSnapshot> {
    let Some(token) = token_from_location(raw) else {
        log::debug!(target: "share", "no pattern parameter in location");
        return None;
    };
    load_token(&token)
}
