// Parsers for the address headers: From, To, Contact, Reply-To, Refer-To,
// Referred-By, Route, Record-Route, Path and Service-Route.
//
// from-spec  = ( name-addr / addr-spec ) *( SEMI from-param )
// rec-route  = name-addr *( SEMI rr-param )
// contact    = ( STAR / (contact-param *(COMMA contact-param)))

use nom::{
    branch::alt,
    combinator::map,
    sequence::pair,
};

use crate::headers::address as hdr;
use crate::parser::address::{address, name_addr};
use crate::parser::params::generic_params0;
use crate::parser::separators::star;
use crate::parser::ParseResult;
use crate::types::address::Address;
use crate::types::param::NameValueList;

fn address_and_params(input: &[u8]) -> ParseResult<(Address, NameValueList)> {
    pair(address, generic_params0)(input)
}

fn name_addr_and_params(input: &[u8]) -> ParseResult<(Address, NameValueList)> {
    pair(name_addr, generic_params0)(input)
}

pub(crate) fn from(input: &[u8]) -> ParseResult<hdr::From> {
    map(address_and_params, |(a, p)| hdr::From::from_parts(a, p))(input)
}

pub(crate) fn to(input: &[u8]) -> ParseResult<hdr::To> {
    map(address_and_params, |(a, p)| hdr::To::from_parts(a, p))(input)
}

pub(crate) fn reply_to(input: &[u8]) -> ParseResult<hdr::ReplyTo> {
    map(address_and_params, |(a, p)| hdr::ReplyTo::from_parts(a, p))(input)
}

pub(crate) fn refer_to(input: &[u8]) -> ParseResult<hdr::ReferTo> {
    map(address_and_params, |(a, p)| hdr::ReferTo::from_parts(a, p))(input)
}

pub(crate) fn referred_by(input: &[u8]) -> ParseResult<hdr::ReferredBy> {
    map(address_and_params, |(a, p)| hdr::ReferredBy::from_parts(a, p))(input)
}

pub(crate) fn route(input: &[u8]) -> ParseResult<hdr::Route> {
    map(name_addr_and_params, |(a, p)| hdr::Route::from_parts(a, p))(input)
}

pub(crate) fn record_route(input: &[u8]) -> ParseResult<hdr::RecordRoute> {
    map(name_addr_and_params, |(a, p)| hdr::RecordRoute::from_parts(a, p))(input)
}

pub(crate) fn path(input: &[u8]) -> ParseResult<hdr::Path> {
    map(name_addr_and_params, |(a, p)| hdr::Path::from_parts(a, p))(input)
}

pub(crate) fn service_route(input: &[u8]) -> ParseResult<hdr::ServiceRoute> {
    map(name_addr_and_params, |(a, p)| hdr::ServiceRoute::from_parts(a, p))(input)
}

// A single contact-param, or the STAR wildcard
pub(crate) fn contact(input: &[u8]) -> ParseResult<hdr::Contact> {
    alt((
        map(star, |_| hdr::Contact::wildcard()),
        map(address_and_params, |(a, p)| hdr::Contact::from_parts(Some(a), p)),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_with_tag() {
        let (rem, f) = from(b"\"Alice\" <sip:alice@atlanta.com>;tag=1928301774").unwrap();
        assert!(rem.is_empty());
        assert_eq!(f.tag(), Some("1928301774"));
        assert_eq!(f.address().display_name(), Some("Alice"));
    }

    #[test]
    fn test_addr_spec_params_belong_to_header() {
        let (_, t) = to(b"sip:bob@biloxi.com;tag=a6c85cf").unwrap();
        assert_eq!(t.tag(), Some("a6c85cf"));
        assert!(t.uri().as_sip().unwrap().params().is_empty());
    }

    #[test]
    fn test_route_requires_brackets() {
        assert!(route(b"<sip:p1.example.com;lr>").is_ok());
        assert!(route(b"sip:p1.example.com").is_err());
    }

    #[test]
    fn test_contact_wildcard() {
        let (rem, c) = contact(b"*").unwrap();
        assert!(rem.is_empty());
        assert!(c.is_wildcard());
    }
}
