use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::{self, FromStr};

use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::digit1,
    combinator::{map, map_res, opt, verify},
    sequence::{delimited, pair, preceded},
};

use super::ParseResult;
use crate::error::Error;
use crate::types::host::{Host, HostPort};

fn is_hostname_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'.'
}

// domainlabel = alphanum / alphanum *( alphanum / "-" ) alphanum
fn valid_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|c| c.is_ascii_alphanumeric() || c == b'-')
}

fn classify_host(s: &str) -> Result<Host, Error> {
    if let Ok(addr) = Ipv4Addr::from_str(s) {
        return Ok(Host::Ipv4(addr));
    }
    // hostname = *( domainlabel "." ) toplabel [ "." ]
    let trimmed = s.strip_suffix('.').unwrap_or(s);
    if trimmed.split('.').all(valid_label) {
        Ok(Host::Domain(s.to_string()))
    } else {
        Err(Error::InvalidUri(format!("Invalid hostname: '{}'", s)))
    }
}

// hostname / IPv4address
fn hostname_or_ipv4(input: &[u8]) -> ParseResult<Host> {
    map_res(take_while1(is_hostname_char), |b: &[u8]| {
        str::from_utf8(b)
            .map_err(|e| Error::ParseError(e.to_string()))
            .and_then(classify_host)
    })(input)
}

// IPv6reference = "[" IPv6address "]"
pub(crate) fn ipv6_reference(input: &[u8]) -> ParseResult<Host> {
    map_res(
        delimited(
            tag(b"["),
            take_while1(|c: u8| c.is_ascii_hexdigit() || c == b':' || c == b'.'),
            tag(b"]"),
        ),
        |b: &[u8]| {
            str::from_utf8(b)
                .map_err(|e| Error::ParseError(e.to_string()))
                .and_then(|s| {
                    Ipv6Addr::from_str(s).map_err(|_| Error::InvalidUri(format!("Invalid IPv6 address: '{}'", s)))
                })
                .map(Host::Ipv6)
        },
    )(input)
}

// host = hostname / IPv4address / IPv6reference
pub(crate) fn host(input: &[u8]) -> ParseResult<Host> {
    nom::branch::alt((ipv6_reference, hostname_or_ipv4))(input)
}

// port = 1*DIGIT, limited to 1..=65535
pub(crate) fn port(input: &[u8]) -> ParseResult<u16> {
    verify(
        map_res(digit1, |b: &[u8]| {
            str::from_utf8(b)
                .map_err(|e| Error::ParseError(e.to_string()))
                .and_then(|s| s.parse::<u16>().map_err(|e| Error::ParseError(e.to_string())))
        }),
        |p| *p != 0,
    )(input)
}

// hostport = host [ ":" port ]
pub(crate) fn hostport(input: &[u8]) -> ParseResult<HostPort> {
    map(pair(host, opt(preceded(tag(b":"), port))), |(h, p)| HostPort::new(h, p))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_variants() {
        assert_eq!(host(b"example.com;x").unwrap().1, Host::domain("example.com"));
        assert_eq!(host(b"10.0.0.1:5060").unwrap(), (&b":5060"[..], Host::Ipv4(Ipv4Addr::new(10, 0, 0, 1))));
        assert!(matches!(host(b"[2001:db8::1]").unwrap().1, Host::Ipv6(_)));
        assert!(host(b"-bad.com").is_err());
        assert!(host(b"[zz::1]").is_err());
    }

    #[test]
    fn test_hostport() {
        let (rem, hp) = hostport(b"atlanta.com:5060;branch=x").unwrap();
        assert_eq!(rem, b";branch=x");
        assert_eq!(hp.port(), Some(5060));
        assert!(hostport(b"atlanta.com:0").unwrap().0 == b":0");
        assert!(port(b"70000").is_err());
    }
}
