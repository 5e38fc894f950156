// Warning        =  "Warning" HCOLON warning-value *(COMMA warning-value)
// warning-value  =  warn-code SP warn-agent SP warn-text
// warn-code      =  3DIGIT
// warn-agent     =  hostport / pseudonym
// warn-text      =  quoted-string

use std::str;

use nom::{
    bytes::complete::{take_till1, take_while_m_n},
    combinator::{map_res, verify},
    sequence::tuple,
};

use crate::headers::warning::Warning;
use crate::parser::quoted::parse_quoted_string;
use crate::parser::whitespace::lws;
use crate::parser::ParseResult;

fn warn_code(input: &[u8]) -> ParseResult<u16> {
    map_res(take_while_m_n(3, 3, |c: u8| c.is_ascii_digit()), |b: &[u8]| {
        str::from_utf8(b)
            .map_err(|_| ())
            .and_then(|s| s.parse::<u16>().map_err(|_| ()))
    })(input)
}

fn warn_agent(input: &[u8]) -> ParseResult<&str> {
    verify(
        map_res(take_till1(|c: u8| c == b' ' || c == b'\t' || c == b'"'), str::from_utf8),
        |agent: &str| Warning::is_valid_agent(agent),
    )(input)
}

pub(crate) fn warning(input: &[u8]) -> ParseResult<Warning> {
    map_res(
        tuple((warn_code, lws, warn_agent, lws, parse_quoted_string)),
        |(code, _, agent, _, text)| Warning::new(code, agent, text),
    )(input)
}
