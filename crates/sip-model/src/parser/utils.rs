// Utility functions for parsing and encoding

use crate::error::{Error, Result};

fn is_wsp(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

/// Unfolds header line folding (RFC 3261 §7.3.1).
///
/// A CRLF (or bare LF) followed by whitespace, together with the whitespace
/// around it, becomes a single SP. Other whitespace is left untouched so
/// quoted text keeps its spacing.
pub fn unfold_lws(input: &[u8]) -> Vec<u8> {
    let mut unfolded = Vec::with_capacity(input.len());
    let len = input.len();
    let mut i = 0;

    while i < len {
        let eol = if input[i] == b'\r' && i + 1 < len && input[i + 1] == b'\n' {
            2
        } else if input[i] == b'\n' {
            1
        } else {
            0
        };

        if eol > 0 && i + eol < len && is_wsp(input[i + eol]) {
            while unfolded.last().map_or(false, |c: &u8| is_wsp(*c)) {
                unfolded.pop();
            }
            unfolded.push(b' ');
            i += eol;
            while i < len && is_wsp(input[i]) {
                i += 1;
            }
        } else {
            unfolded.push(input[i]);
            i += 1;
        }
    }

    unfolded
}

/// Decodes URI percent-encoding (%HH).
pub fn unescape_uri_component(input: &[u8]) -> Result<String> {
    let mut unescaped: Vec<u8> = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if input[i] == b'%' {
            if i + 2 >= input.len() {
                return Err(Error::ParseError(
                    "Incomplete escape sequence at end of input".to_string(),
                ));
            }
            match (hex_val(input[i + 1]), hex_val(input[i + 2])) {
                (Some(v1), Some(v2)) => {
                    unescaped.push((v1 << 4) | v2);
                    i += 3;
                }
                _ => {
                    return Err(Error::ParseError(format!(
                        "Invalid hex sequence: %{}{}",
                        input[i + 1] as char,
                        input[i + 2] as char
                    )))
                }
            }
        } else {
            unescaped.push(input[i]);
            i += 1;
        }
    }

    String::from_utf8(unescaped)
        .map_err(|e| Error::ParseError(format!("UTF-8 error after URI unescaping: {}", e)))
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// unreserved = alphanum / mark
pub(crate) fn is_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

// user-unreserved = "&" / "=" / "+" / "$" / "," / ";" / "?" / "/"
pub(crate) fn is_user_char(c: u8) -> bool {
    is_unreserved(c) || matches!(c, b'&' | b'=' | b'+' | b'$' | b',' | b';' | b'?' | b'/')
}

// password = *( unreserved / escaped / "&" / "=" / "+" / "$" / "," )
pub(crate) fn is_password_char(c: u8) -> bool {
    is_unreserved(c) || matches!(c, b'&' | b'=' | b'+' | b'$' | b',')
}

// param-unreserved = "[" / "]" / "/" / ":" / "&" / "+" / "$"
pub(crate) fn is_param_unreserved(c: u8) -> bool {
    is_unreserved(c) || matches!(c, b'[' | b']' | b'/' | b':' | b'&' | b'+' | b'$')
}

// hnv-unreserved = "[" / "]" / "/" / "?" / ":" / "+" / "$"
pub(crate) fn is_hnv_char(c: u8) -> bool {
    is_unreserved(c) || matches!(c, b'[' | b']' | b'/' | b'?' | b':' | b'+' | b'$')
}

fn escape_with(s: &str, allowed: fn(u8) -> bool) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if allowed(b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

/// Percent-escapes a URI user part.
pub fn escape_user(user: &str) -> String {
    escape_with(user, is_user_char)
}

/// Percent-escapes a URI password.
pub fn escape_password(password: &str) -> String {
    escape_with(password, is_password_char)
}

/// Percent-escapes the name or value of a URI header (`?subject=...`).
pub fn escape_uri_header(text: &str) -> String {
    escape_with(text, is_hnv_char)
}

/// Splits a header value at commas that are not inside quotes, angle
/// brackets or comments.
pub(crate) fn split_top_level_commas(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut angle = 0usize;
    let mut paren = 0usize;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes || paren > 0 => escaped = true,
            '"' if paren == 0 => in_quotes = !in_quotes,
            '<' if !in_quotes => angle += 1,
            '>' if !in_quotes => angle = angle.saturating_sub(1),
            '(' if !in_quotes => paren += 1,
            ')' if !in_quotes => paren = paren.saturating_sub(1),
            ',' if !in_quotes && angle == 0 && paren == 0 => {
                parts.push(value[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(value[start..].trim());
    parts
}
