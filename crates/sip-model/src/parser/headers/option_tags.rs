// Require        = "Require" HCOLON option-tag *(COMMA option-tag)
// Supported      = ( "Supported" / "k" ) HCOLON [option-tag *(COMMA option-tag)]
// Unsupported    = "Unsupported" HCOLON option-tag *(COMMA option-tag)
// Proxy-Require  = "Proxy-Require" HCOLON option-tag *(COMMA option-tag)
// Allow          = "Allow" HCOLON [Method *(COMMA Method)]
// Allow-Events   = ( "Allow-Events" / "u" ) HCOLON event-type *(COMMA event-type)

use nom::combinator::map;

use super::cseq::method;
use crate::headers::option_tags::{Allow, AllowEvents, ProxyRequire, Require, Supported, Unsupported};
use crate::parser::token::token_string;
use crate::parser::ParseResult;

pub(crate) fn require(input: &[u8]) -> ParseResult<Require> {
    map(token_string, Require::from_parts)(input)
}

pub(crate) fn supported(input: &[u8]) -> ParseResult<Supported> {
    map(token_string, Supported::from_parts)(input)
}

pub(crate) fn unsupported(input: &[u8]) -> ParseResult<Unsupported> {
    map(token_string, Unsupported::from_parts)(input)
}

pub(crate) fn proxy_require(input: &[u8]) -> ParseResult<ProxyRequire> {
    map(token_string, ProxyRequire::from_parts)(input)
}

pub(crate) fn allow_events(input: &[u8]) -> ParseResult<AllowEvents> {
    map(token_string, AllowEvents::from_parts)(input)
}

pub(crate) fn allow(input: &[u8]) -> ParseResult<Allow> {
    map(method, Allow::new)(input)
}
