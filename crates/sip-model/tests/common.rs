// Shared helpers for the integration tests

#![allow(dead_code)]

use std::fmt::Debug;
use std::str::FromStr;

use sip_model::error::Error;
use sip_model::headers::TypedHeaderTrait;
use sip_model::types::{Host, SipUri, Uri};

/// Installs a test-friendly subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parses `value`, checks that encoding and parsing again gives an equal
/// header, and returns the parsed header.
pub fn assert_round_trip<H>(value: &str) -> H
where
    H: TypedHeaderTrait + FromStr<Err = Error> + PartialEq + Debug,
{
    let parsed: H = value
        .parse()
        .unwrap_or_else(|e| panic!("failed to parse {} '{}': {}", H::header_name(), value, e));
    let encoded = parsed.to_string();
    let reparsed: H = encoded
        .parse()
        .unwrap_or_else(|e| panic!("failed to reparse {} '{}': {}", H::header_name(), encoded, e));
    assert_eq!(parsed, reparsed, "round trip changed {} '{}'", H::header_name(), value);
    parsed
}

/// Encodes a header built through its setters and checks that it is a
/// single line that parses back to the same header.
pub fn assert_encodes_as_one_line<H>(header: &H) -> String
where
    H: TypedHeaderTrait + FromStr<Err = Error> + PartialEq + Debug,
{
    let line = header.encode();
    let body = line
        .strip_suffix("\r\n")
        .unwrap_or_else(|| panic!("'{}' does not end in CRLF", line.escape_default()));
    assert!(
        !body.contains(['\r', '\n']),
        "{} encoded over several lines: '{}'",
        H::header_name(),
        line.escape_default()
    );
    let reparsed: H = header
        .to_string()
        .parse()
        .unwrap_or_else(|e| panic!("failed to reparse {} '{}': {}", H::header_name(), line.escape_default(), e));
    assert_eq!(&reparsed, header, "round trip changed {}", H::header_name());
    line
}

/// Asserts that `value` is rejected by the parser of `H`.
pub fn assert_rejects<H>(value: &str)
where
    H: FromStr<Err = Error> + Debug,
{
    assert!(value.parse::<H>().is_err(), "'{}' should not parse", value);
}

pub fn sip_uri(user: &str, host: &str) -> Uri {
    Uri::Sip(SipUri::new(Host::domain(host)).with_user(user))
}

/// The request headers of the RFC 3261 §24.2 INVITE from Alice to Bob.
pub fn alice_invite_headers() -> &'static str {
    "Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bKnashds8\r\n\
     Max-Forwards: 70\r\n\
     To: Bob <sip:bob@biloxi.com>\r\n\
     From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
     Call-ID: a84b4c76e66710\r\n\
     CSeq: 314159 INVITE\r\n\
     Contact: <sip:alice@pc33.atlanta.com>\r\n\
     Content-Type: application/sdp\r\n\
     Content-Length: 142\r\n\
     \r\n"
}
