//! Display-name resolution from the page's `?name=` query parameter.
//!
//! The query value is untrusted text that ends up in the greeting, so it goes
//! through a fixed pipeline: NFKC normalization, tag stripping, an allow-list
//! filter, whitespace collapsing, trimming and truncation. The result is always
//! non-empty, at most [`MAX_NAME_CHARS`] characters long, and contains only
//! `[A-Za-z0-9 .,'-]`.

use percent_encoding::percent_decode_str;
use unicode_normalization::UnicodeNormalization;

use crate::config::DEFAULT_NAME;

pub const MAX_NAME_CHARS: usize = 32;
pub const NAME_PARAM: &str = "name";

/// A sanitized, bounded, non-empty name. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[inline]
pub fn is_allowed_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | ',' | '\'' | '-')
}

/// Look up `key` in a URL search string (`?a=1&name=Sam`), decoding the way
/// `URLSearchParams` does: `+` is a space and percent escapes are decoded
/// lossily. The first matching pair wins.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    let search = search.strip_prefix('?').unwrap_or(search);
    search
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (form_decode(k), form_decode(v)),
            None => (form_decode(pair), String::new()),
        })
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

fn form_decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Strict percent-decoding (`+` → space first). A malformed escape or a byte
/// sequence that is not UTF-8 leaves the raw string untouched.
pub fn decode_name(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    if has_malformed_escape(&spaced) {
        return raw.to_string();
    }
    match percent_decode_str(&spaced).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

fn has_malformed_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let ok = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !ok {
                return true;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    false
}

/// Remove every `<...>` run. An unmatched `<` is kept (the allow-list drops it later).
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(c);
            in_ws = false;
        }
    }
    out
}

/// Sanitize a decoded name. May return an empty string.
pub fn sanitize_name(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let normalized: String = value.nfkc().collect();
    let untagged = strip_tags(&normalized);
    let filtered: String = untagged.chars().filter(|&c| is_allowed_name_char(c)).collect();
    collapse_whitespace(&filtered)
        .trim()
        .chars()
        .take(MAX_NAME_CHARS)
        .collect()
}

/// Resolve the greeting name from a location search string.
pub fn resolve_display_name(search: &str, fallback: &str) -> DisplayName {
    let query_value = query_param(search, NAME_PARAM).unwrap_or_default();
    let safe = sanitize_name(&decode_name(&query_value));
    if !safe.is_empty() {
        tracing::debug!(name = %safe, "display name from query");
        return DisplayName(safe);
    }

    let fallback = sanitize_name(fallback);
    if fallback.is_empty() {
        DisplayName(DEFAULT_NAME.to_string())
    } else {
        DisplayName(fallback)
    }
}
