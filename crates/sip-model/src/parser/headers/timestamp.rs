// Timestamp  =  "Timestamp" HCOLON 1*(DIGIT) [ "." *(DIGIT) ] [ LWS delay ]
// delay      =  *(DIGIT) [ "." *(DIGIT) ]

use std::str;

use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{digit0, digit1},
    combinator::{map_res, opt, recognize},
    sequence::{pair, preceded},
};

use crate::headers::timestamp::Timestamp;
use crate::parser::whitespace::lws;
use crate::parser::ParseResult;

fn number(input: &[u8]) -> ParseResult<f64> {
    map_res(recognize(pair(digit1, opt(pair(tag(b"."), digit0)))), parse_f64)(input)
}

fn delay(input: &[u8]) -> ParseResult<f64> {
    map_res(take_while1(|c: u8| c.is_ascii_digit() || c == b'.'), parse_f64)(input)
}

fn parse_f64(b: &[u8]) -> std::result::Result<f64, ()> {
    str::from_utf8(b)
        .map_err(|_| ())
        .and_then(|s| s.parse::<f64>().map_err(|_| ()))
}

pub(crate) fn timestamp(input: &[u8]) -> ParseResult<Timestamp> {
    map_res(pair(number, opt(preceded(lws, delay))), |(time, delay)| {
        let mut ts = Timestamp::new(time)?;
        if let Some(d) = delay {
            ts.set_delay(d)?;
        }
        Ok::<_, crate::error::Error>(ts)
    })(input)
}
