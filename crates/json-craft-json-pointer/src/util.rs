//! Token escape/unescape and pointer string handling.

use crate::JsonPointerError;

/// Escape a reference token: `~` → `~0`, `/` → `~1`.
pub fn escape(token: &str) -> String {
    if !token.contains('~') && !token.contains('/') {
        return token.to_string();
    }
    token.replace('~', "~0").replace('/', "~1")
}

/// Unescape a reference token: `~1` → `/` then `~0` → `~` (order matters).
///
/// A `~` not followed by `0` or `1` is rejected, as RFC 6901 recommends.
pub fn unescape(token: &str) -> Result<String, JsonPointerError> {
    if !token.contains('~') {
        return Ok(token.to_string());
    }
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(JsonPointerError::PointerInvalid),
        }
    }
    Ok(out)
}

/// Parse a pointer string into unescaped tokens. The empty string is the
/// root; any other pointer must begin with `/`.
pub fn parse_pointer(pointer: &str) -> Result<Vec<String>, JsonPointerError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let rest = pointer
        .strip_prefix('/')
        .ok_or(JsonPointerError::PointerInvalid)?;
    rest.split('/').map(unescape).collect()
}

/// Format unescaped tokens back into a pointer string.
pub fn format_pointer(tokens: &[String]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push('/');
        out.push_str(&escape(token));
    }
    out
}

/// Whether a token is a canonical array index: decimal digits with no
/// leading zero (except `"0"` itself).
pub fn is_valid_index(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}
