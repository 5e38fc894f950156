// Max-Forwards   = "Max-Forwards" HCOLON 1*DIGIT
// Content-Length = ( "Content-Length" / "l" ) HCOLON 1*DIGIT
// Expires        = "Expires" HCOLON delta-seconds
// Min-Expires    = "Min-Expires" HCOLON delta-seconds
// Session-Expires = ( "Session-Expires" / "x" ) HCOLON delta-seconds *( SEMI se-params )
// Min-SE         = "Min-SE" HCOLON delta-seconds *( SEMI generic-param )

use std::str;

use nom::{
    character::complete::digit1,
    combinator::{map, map_res},
    sequence::pair,
};

use crate::headers::numeric::{ContentLength, Expires, MaxForwards, MinExpires, MinSe, SessionExpires};
use crate::parser::params::generic_params0;
use crate::parser::ParseResult;

fn digits(input: &[u8]) -> ParseResult<&str> {
    map_res(digit1, str::from_utf8)(input)
}

/// Plain 32-bit decimal; overflow is a parse error.
pub(crate) fn u32_value(input: &[u8]) -> ParseResult<u32> {
    map_res(digits, str::parse::<u32>)(input)
}

/// delta-seconds = 1*DIGIT. Values too large for 32 bits saturate at 2^32-1.
pub(crate) fn delta_seconds(input: &[u8]) -> ParseResult<u32> {
    map(digits, |s| s.parse::<u32>().unwrap_or(u32::MAX))(input)
}

pub(crate) fn max_forwards(input: &[u8]) -> ParseResult<MaxForwards> {
    map_res(u32_value, MaxForwards::new)(input)
}

pub(crate) fn content_length(input: &[u8]) -> ParseResult<ContentLength> {
    map(u32_value, ContentLength::new)(input)
}

pub(crate) fn expires(input: &[u8]) -> ParseResult<Expires> {
    map(delta_seconds, Expires::new)(input)
}

pub(crate) fn min_expires(input: &[u8]) -> ParseResult<MinExpires> {
    map(delta_seconds, MinExpires::new)(input)
}

pub(crate) fn session_expires(input: &[u8]) -> ParseResult<SessionExpires> {
    map(pair(delta_seconds, generic_params0), |(delta, params)| {
        SessionExpires::from_parts(delta, params)
    })(input)
}

pub(crate) fn min_se(input: &[u8]) -> ParseResult<MinSe> {
    map(pair(delta_seconds, generic_params0), |(delta, params)| MinSe::from_parts(delta, params))(input)
}
