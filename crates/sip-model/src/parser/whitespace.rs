use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    combinator::{opt, recognize},
    sequence::{pair, tuple},
};

use super::ParseResult;

fn is_wsp(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

pub(crate) fn wsp(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(is_wsp)(input)
}

/// Parses CRLF (accepts \r\n or just \n)
pub(crate) fn crlf(input: &[u8]) -> ParseResult<&[u8]> {
    alt((tag(b"\r\n"), tag(b"\n")))(input)
}

// LWS = [*WSP CRLF] 1*WSP
pub(crate) fn lws(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(opt(tuple((take_while(is_wsp), crlf))), wsp))(input)
}

// SWS = [LWS]
pub(crate) fn sws(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(opt(lws))(input)
}
