// Parsers for name-addr / addr-spec (RFC 3261 §25.1)

use std::str;

use nom::{
    branch::alt,
    combinator::{map, map_res, opt, recognize},
    multi::many1,
    sequence::{delimited, pair, terminated},
};

use super::quoted::parse_quoted_string;
use super::separators::{laquot, raquot};
use super::token::token;
use super::uri::{uri, uri_no_params};
use super::whitespace::sws;
use super::ParseResult;
use crate::types::address::{Address, AddressForm};

// display-name = *(token LWS) / quoted-string
// Unquoted names are normalized to single spaces between tokens.
fn display_name(input: &[u8]) -> ParseResult<String> {
    alt((
        terminated(parse_quoted_string, sws),
        map_res(recognize(many1(terminated(token, sws))), |b: &[u8]| {
            str::from_utf8(b).map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        }),
    ))(input)
}

// name-addr = [ display-name ] LAQUOT addr-spec RAQUOT
pub(crate) fn name_addr(input: &[u8]) -> ParseResult<Address> {
    map(pair(opt(display_name), delimited(laquot, uri, raquot)), |(name, u)| {
        Address::from_parts(name, u, AddressForm::NameAddr)
    })(input)
}

pub(crate) fn addr_spec(input: &[u8]) -> ParseResult<Address> {
    map(uri_no_params, |u| Address::from_parts(None, u, AddressForm::AddrSpec))(input)
}

pub(crate) fn address(input: &[u8]) -> ParseResult<Address> {
    alt((name_addr, addr_spec))(input)
}
