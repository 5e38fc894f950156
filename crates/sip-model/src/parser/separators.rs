use nom::{
    bytes::complete::{tag, take_while},
    combinator::recognize,
    sequence::{pair, tuple},
};

use super::whitespace::sws;
use super::ParseResult;

// HCOLON = *( SP / HTAB ) ":" SWS
pub(crate) fn hcolon(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((take_while(|c| c == b' ' || c == b'\t'), tag(b":"), sws)))(input)
}

pub(crate) fn dquote(input: &[u8]) -> ParseResult<&[u8]> {
    tag(b"\"")(input)
}

pub(crate) fn star(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(b"*"), sws)))(input)
}

pub(crate) fn slash(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(b"/"), sws)))(input)
}

pub(crate) fn equal(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(b"="), sws)))(input)
}

// LPAREN = SWS "("
pub(crate) fn lparen(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(sws, tag(b"(")))(input)
}

// RPAREN = ")" SWS
pub(crate) fn rparen(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(tag(b")"), sws))(input)
}

// RAQUOT = ">" SWS
pub(crate) fn raquot(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(tag(b">"), sws))(input)
}

// LAQUOT = SWS "<"
pub(crate) fn laquot(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(sws, tag(b"<")))(input)
}

pub(crate) fn comma(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(b","), sws)))(input)
}

pub(crate) fn semi(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(b";"), sws)))(input)
}

pub(crate) fn colon(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(tuple((sws, tag(b":"), sws)))(input)
}
