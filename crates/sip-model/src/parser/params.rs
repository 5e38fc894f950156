// Parsers for generic parameters, URI parameters and authentication parameters

use std::str;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1, take_while_m_n},
    combinator::{all_consuming, map, map_res, opt, recognize, verify},
    multi::{many0, many1, separated_list1},
    sequence::{pair, preceded, separated_pair, tuple},
};

use super::host::ipv6_reference;
use super::quoted::parse_quoted_string;
use super::separators::{comma, equal, semi};
use super::token::{token, token_string};
use super::utils::{is_hnv_char, is_param_unreserved};
use super::ParseResult;
use crate::types::param::{GenericValue, NameValue, NameValueList, Separator};

// gen-value = token / host / quoted-string
// Hostnames and IPv4 addresses are also tokens; only IPv6 references need the host form.
fn gen_value(input: &[u8]) -> ParseResult<GenericValue> {
    alt((
        map(ipv6_reference, GenericValue::Host),
        map(parse_quoted_string, GenericValue::Quoted),
        map(token_string, GenericValue::Token),
    ))(input)
}

// generic-param = token [ EQUAL gen-value ]
pub(crate) fn generic_param(input: &[u8]) -> ParseResult<NameValue> {
    map(pair(token_string, opt(preceded(equal, gen_value))), |(name, value)| {
        NameValue::from_parts(name, value)
    })(input)
}

fn collect(items: Vec<NameValue>, separator: Separator) -> NameValueList {
    let mut list = NameValueList::with_separator(separator);
    list.extend(items);
    list
}

/// Zero or more `;`-prefixed generic parameters.
pub(crate) fn generic_params0(input: &[u8]) -> ParseResult<NameValueList> {
    map(many0(preceded(semi, generic_param)), |items| collect(items, Separator::Semicolon))(input)
}

/// One or more `;`-separated generic parameters without a leading `;`.
pub(crate) fn generic_params1(input: &[u8]) -> ParseResult<NameValueList> {
    map(separated_list1(semi, generic_param), |items| collect(items, Separator::Semicolon))(input)
}

// escaped = "%" HEXDIG HEXDIG
pub(crate) fn escaped(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(pair(tag(b"%"), take_while_m_n(2, 2, |c: u8| c.is_ascii_hexdigit())))(input)
}

// paramchar = param-unreserved / unreserved / escaped
fn paramchars(input: &[u8]) -> ParseResult<String> {
    map_res(
        recognize(many1(alt((take_while1(is_param_unreserved), escaped)))),
        |b: &[u8]| str::from_utf8(b).map(str::to_string),
    )(input)
}

/// Whether `s` is a complete `pname` or `pvalue`, escapes included.
pub(crate) fn is_param_text(s: &str) -> bool {
    all_consuming(paramchars)(s.as_bytes()).is_ok()
}

// uri-parameter = pname [ "=" pvalue ]
// Values are kept in their escaped wire form.
fn uri_param(input: &[u8]) -> ParseResult<NameValue> {
    map(pair(paramchars, opt(preceded(tag(b"="), paramchars))), |(name, value)| {
        NameValue::from_parts(name, value.map(GenericValue::Token))
    })(input)
}

pub(crate) fn uri_params(input: &[u8]) -> ParseResult<NameValueList> {
    map(many0(preceded(tag(b";"), uri_param)), |items| collect(items, Separator::Semicolon))(input)
}

fn hnvchars0(input: &[u8]) -> ParseResult<String> {
    map_res(
        recognize(many0(alt((take_while1(is_hnv_char), escaped)))),
        |b: &[u8]| str::from_utf8(b).map(str::to_string),
    )(input)
}

// headers = "?" header *( "&" header )
// header  = hname "=" hvalue
pub(crate) fn uri_headers(input: &[u8]) -> ParseResult<NameValueList> {
    map(
        preceded(
            tag(b"?"),
            separated_list1(
                tag(b"&"),
                map(
                    separated_pair(
                        verify(hnvchars0, |s: &String| !s.is_empty()),
                        tag(b"="),
                        hnvchars0,
                    ),
                    |(name, value)| NameValue::from_parts(name, Some(GenericValue::Token(value))),
                ),
            ),
        ),
        |items| collect(items, Separator::Ampersand),
    )(input)
}

// auth-param = auth-param-name EQUAL ( token / quoted-string )
// Some agents send unquoted values with characters outside token (e.g. uri=sip:x);
// those are accepted up to the next comma.
fn auth_param(input: &[u8]) -> ParseResult<NameValue> {
    map(
        separated_pair(
            token_string,
            equal,
            alt((
                map(parse_quoted_string, GenericValue::Quoted),
                map(
                    map_res(
                        recognize(tuple((token, take_while(|c: u8| c != b',' && c != b' ' && c != b'\t')))),
                        |b: &[u8]| str::from_utf8(b).map(str::to_string),
                    ),
                    GenericValue::Token,
                ),
            )),
        ),
        |(name, value)| NameValue::from_parts(name, Some(value)),
    )(input)
}

/// Comma-separated authentication parameters.
pub(crate) fn auth_params(input: &[u8]) -> ParseResult<NameValueList> {
    map(separated_list1(comma, auth_param), |items| collect(items, Separator::Comma))(input)
}
