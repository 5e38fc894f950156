use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_while1},
    combinator::{map_res, recognize, verify},
    multi::many0,
    sequence::{delimited, pair, preceded},
};

use super::separators::{dquote, lparen, rparen};
use super::utils::unfold_lws;
use super::whitespace::{lws, sws};
use super::ParseResult;
use crate::error::{Error, Result};

// quoted-pair = "\" (%x00-09 / %x0B-0C / %x0E-7F)
pub(crate) fn quoted_pair(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(
        tag(b"\\"),
        verify(take(1usize), |c: &[u8]| c[0] != b'\r' && c[0] != b'\n' && c[0] < 0x80),
    ))(input)
}

// qdtext = LWS / %x21 / %x23-5B / %x5D-7E / UTF8-NONASCII
fn qdtext(input: &[u8]) -> ParseResult<&[u8]> {
    alt((
        lws,
        take_while1(|c: u8| c == 0x21 || (0x23..=0x5B).contains(&c) || (0x5D..=0x7E).contains(&c) || c >= 0x80),
    ))(input)
}

// quoted-string = SWS DQUOTE *(qdtext / quoted-pair ) DQUOTE
// Returns the raw content between the quotes, escapes included.
pub(crate) fn quoted_string(input: &[u8]) -> ParseResult<&[u8]> {
    preceded(
        sws,
        delimited(dquote, recognize(many0(alt((qdtext, quoted_pair)))), dquote),
    )(input)
}

/// Removes quoted-pair escapes and unfolds line folding.
pub(crate) fn unescape_quoted_string(input: &[u8]) -> Vec<u8> {
    let unfolded = unfold_lws(input);
    let mut result = Vec::with_capacity(unfolded.len());
    let mut i = 0;
    while i < unfolded.len() {
        if unfolded[i] == b'\\' && i + 1 < unfolded.len() {
            result.push(unfolded[i + 1]);
            i += 2;
        } else {
            result.push(unfolded[i]);
            i += 1;
        }
    }
    result
}

/// Parses a quoted string and returns its unescaped content.
pub(crate) fn parse_quoted_string(input: &[u8]) -> ParseResult<String> {
    map_res(quoted_string, |raw| String::from_utf8(unescape_quoted_string(raw)))(input)
}

/// Escapes `"`, `\` and control characters other than HTAB so `s` can be
/// written between double quotes. CR and LF have no escaped form; text
/// holding them must be refused before it gets here.
pub fn escape_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '"' || c == '\\' || (c.is_ascii_control() && c != '\t') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Refuses text that would end the header line it is written into.
pub(crate) fn check_text(what: &str, text: &str) -> Result<()> {
    if text.contains(['\r', '\n']) {
        return Err(Error::InvalidArgument(format!("{} must not contain line breaks", what)));
    }
    Ok(())
}

// ctext = %x21-27 / %x2A-5B / %x5D-7E / UTF8-NONASCII / LWS
fn ctext(input: &[u8]) -> ParseResult<&[u8]> {
    alt((
        lws,
        take_while1(|c: u8| (0x21..=0x27).contains(&c) || (0x2A..=0x5B).contains(&c) || (0x5D..=0x7E).contains(&c) || c >= 0x80),
    ))(input)
}

// comment = LPAREN *(ctext / quoted-pair / comment) RPAREN
// Returns the raw text inside the outer parentheses.
pub(crate) fn comment(input: &[u8]) -> ParseResult<&[u8]> {
    delimited(
        lparen,
        recognize(many0(alt((ctext, quoted_pair, recognize(nested_comment))))),
        rparen,
    )(input)
}

fn nested_comment(input: &[u8]) -> ParseResult<&[u8]> {
    delimited(tag(b"("), recognize(many0(alt((ctext, quoted_pair, nested_comment)))), tag(b")"))(input)
}

/// Parses a comment and returns its text.
pub(crate) fn parse_comment(input: &[u8]) -> ParseResult<String> {
    map_res(comment, |raw| String::from_utf8(raw.to_vec()))(input)
}
