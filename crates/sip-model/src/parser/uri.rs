// Parsers for SIP, SIPS, tel and other absolute URIs (RFC 3261 §25.1, RFC 3966)

use std::str;

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while, take_while1},
    combinator::{map, map_res, opt, recognize, value, verify},
    multi::{many0, many1},
    sequence::{pair, preceded, terminated, tuple},
};

use super::host::hostport;
use super::params::{escaped, uri_headers, uri_params};
use super::utils::{is_password_char, is_user_char, unescape_uri_component};
use super::ParseResult;
use crate::types::param::NameValueList;
use crate::types::uri::{GenericUri, SipUri, TelUri, Uri};

fn sip_scheme(input: &[u8]) -> ParseResult<bool> {
    alt((value(true, tag_no_case(b"sips:")), value(false, tag_no_case(b"sip:"))))(input)
}

// user = 1*( unreserved / escaped / user-unreserved )
fn user(input: &[u8]) -> ParseResult<String> {
    map_res(recognize(many1(alt((take_while1(is_user_char), escaped)))), unescape_uri_component)(input)
}

// password = *( unreserved / escaped / "&" / "=" / "+" / "$" / "," )
fn password(input: &[u8]) -> ParseResult<String> {
    map_res(recognize(many0(alt((take_while1(is_password_char), escaped)))), unescape_uri_component)(input)
}

// userinfo = ( user / telephone-subscriber ) [ ":" password ] "@"
fn userinfo(input: &[u8]) -> ParseResult<(String, Option<String>)> {
    terminated(pair(user, opt(preceded(tag(b":"), password))), tag(b"@"))(input)
}

// SIP-URI = "sip:" [ userinfo ] hostport uri-parameters [ headers ]
pub(crate) fn sip_uri(input: &[u8]) -> ParseResult<SipUri> {
    map(
        tuple((sip_scheme, opt(userinfo), hostport, uri_params, opt(uri_headers))),
        |(secure, userinfo, hp, params, headers)| {
            SipUri::from_parts(secure, userinfo, hp, params, headers.unwrap_or_default())
        },
    )(input)
}

/// A SIP URI written outside angle brackets: `;` and `?` belong to the header.
fn sip_uri_no_params(input: &[u8]) -> ParseResult<SipUri> {
    map(tuple((sip_scheme, opt(userinfo), hostport)), |(secure, userinfo, hp)| {
        SipUri::from_parts(secure, userinfo, hp, NameValueList::new(), NameValueList::default())
    })(input)
}

pub(crate) fn is_phone_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'.' | b'(' | b')' | b'*' | b'#')
}

fn tel_number(input: &[u8]) -> ParseResult<(bool, String)> {
    preceded(
        tag_no_case(b"tel:"),
        pair(
            map(opt(tag(b"+")), |p| p.is_some()),
            map_res(take_while1(is_phone_char), |b: &[u8]| str::from_utf8(b).map(str::to_string)),
        ),
    )(input)
}

// telephone-uri = "tel:" telephone-subscriber
pub(crate) fn tel_uri(input: &[u8]) -> ParseResult<TelUri> {
    map(pair(tel_number, uri_params), |((global, number), params)| {
        TelUri::from_parts(number, global, params)
    })(input)
}

fn tel_uri_no_params(input: &[u8]) -> ParseResult<TelUri> {
    map(tel_number, |(global, number)| TelUri::from_parts(number, global, NameValueList::new()))(input)
}

// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn scheme(input: &[u8]) -> ParseResult<&str> {
    map_res(
        verify(
            recognize(pair(
                take_while1(|c: u8| c.is_ascii_alphabetic()),
                take_while(|c: u8| c.is_ascii_alphanumeric() || matches!(c, b'+' | b'-' | b'.')),
            )),
            |s: &[u8]| {
                !s.eq_ignore_ascii_case(b"sip") && !s.eq_ignore_ascii_case(b"sips") && !s.eq_ignore_ascii_case(b"tel")
            },
        ),
        str::from_utf8,
    )(input)
}

fn generic_with<'a>(
    input: &'a [u8],
    stop: fn(u8) -> bool,
) -> ParseResult<'a, GenericUri> {
    map_res(
        pair(
            terminated(scheme, tag(b":")),
            map_res(take_while1(move |c: u8| !stop(c)), str::from_utf8),
        ),
        |(s, opaque)| GenericUri::new(s, opaque),
    )(input)
}

fn opaque_stop(c: u8) -> bool {
    c.is_ascii_whitespace() || matches!(c, b'<' | b'>' | b'"')
}

fn opaque_stop_no_params(c: u8) -> bool {
    opaque_stop(c) || c == b';' || c == b','
}

// absoluteURI = scheme ":" ( hier-part / opaque-part )
pub(crate) fn generic_uri(input: &[u8]) -> ParseResult<GenericUri> {
    generic_with(input, opaque_stop)
}

fn generic_uri_no_params(input: &[u8]) -> ParseResult<GenericUri> {
    generic_with(input, opaque_stop_no_params)
}

/// Any URI, including its parameters and headers.
pub(crate) fn uri(input: &[u8]) -> ParseResult<Uri> {
    alt((
        map(sip_uri, Uri::Sip),
        map(tel_uri, Uri::Tel),
        map(generic_uri, Uri::Generic),
    ))(input)
}

/// A URI in addr-spec position, stopping before header parameters.
pub(crate) fn uri_no_params(input: &[u8]) -> ParseResult<Uri> {
    alt((
        map(sip_uri_no_params, Uri::Sip),
        map(tel_uri_no_params, Uri::Tel),
        map(generic_uri_no_params, Uri::Generic),
    ))(input)
}
