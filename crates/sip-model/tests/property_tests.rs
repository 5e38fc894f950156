// Property tests for encode/parse agreement on generated values

mod common;

use std::str::FromStr;

use proptest::prelude::*;

use common::assert_round_trip;
use sip_model::headers::{CSeq, MaxForwards, To, TypedHeaderTrait, Via, Warning};
use sip_model::types::{Address, Host, Method, NameValue, NameValueList, SipUri, Uri};

fn domain() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}(\\.[a-z][a-z0-9]{0,8}){0,2}\\.(com|org|net)"
}

fn token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9.!%*_+`'~-]{0,11}"
}

/// Arbitrary text, biased towards the characters that need quoting or
/// escaping and the line breaks that must be refused.
fn free_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,16}",
        "[a-z \t\"\\\\;,=<>?%&\r\n\u{1}\u{7f}é]{0,16}",
    ]
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\r', '\n'])
}

fn method() -> impl Strategy<Value = Method> {
    prop_oneof![
        Just(Method::Invite),
        Just(Method::Ack),
        Just(Method::Bye),
        Just(Method::Cancel),
        Just(Method::Register),
        Just(Method::Options),
        Just(Method::Subscribe),
        Just(Method::Notify),
        "[A-Z]{3,10}".prop_map(|m| match Method::from_str(&m) {
            Ok(method) => method,
            Err(_) => Method::Extension(m),
        }),
    ]
}

proptest! {
    /// SIP URIs built from parts display to text that parses back to the same URI
    #[test]
    fn prop_sip_uri_round_trip(
        user in "[a-z0-9._-]{1,12}",
        host in domain(),
        port in proptest::option::of(1u16..),
        secure in any::<bool>(),
    ) {
        let mut uri = SipUri::new(Host::domain(host.clone())).with_user(user.clone()).with_secure(secure);
        if let Some(port) = port {
            uri = uri.with_port(port);
        }
        let text = uri.to_string();
        let parsed = SipUri::from_str(&text);
        prop_assert!(parsed.is_ok(), "'{}' did not parse: {:?}", text, parsed);
        let parsed = parsed.unwrap();
        prop_assert_eq!(parsed.user(), Some(user.as_str()));
        prop_assert_eq!(parsed.port(), port);
        prop_assert_eq!(parsed.is_secure(), secure);
        prop_assert_eq!(parsed.host().to_string(), host);
        prop_assert_eq!(parsed, uri);
    }

    /// User parts needing escapes survive display and parse unchanged
    #[test]
    fn prop_escaped_user_round_trip(user in "[a-z0-9 @:%#<>]{1,10}", host in domain()) {
        let uri = Uri::Sip(SipUri::new(Host::domain(host)).with_user(user.clone()));
        let text = uri.to_string();
        prop_assert!(!text.contains(' '), "'{}' carries an unescaped space", text);
        prop_assert_eq!(text.matches('@').count(), 1);
        let parsed = Uri::from_str(&text);
        prop_assert!(parsed.is_ok(), "'{}' did not parse: {:?}", text, parsed);
        let parsed = parsed.unwrap();
        prop_assert_eq!(parsed.as_sip().and_then(SipUri::user), Some(user.as_str()));
    }

    /// Via headers keep transport, sent-by and branch through encoding
    #[test]
    fn prop_via_round_trip(
        transport in prop_oneof![Just("UDP"), Just("TCP"), Just("TLS"), Just("SCTP"), Just("WS")],
        host in domain(),
        port in proptest::option::of(1u16..),
        branch in "[a-zA-Z0-9]{1,16}",
    ) {
        let mut via = Via::new(transport, Host::domain(host), port).unwrap();
        via.set_branch(format!("z9hG4bK{}", branch)).unwrap();

        let encoded = via.encode();
        prop_assert!(encoded.starts_with("Via: SIP/2.0/"));
        prop_assert!(encoded.ends_with("\r\n"));

        let parsed: Via = assert_round_trip(&via.to_string());
        prop_assert_eq!(parsed.transport(), transport);
        prop_assert_eq!(parsed.port(), port);
        prop_assert!(parsed.has_rfc3261_branch());
        prop_assert_eq!(parsed, via);
    }

    /// Every CSeq below 2^31 round trips; anything above is refused
    #[test]
    fn prop_cseq_range(seq in 0u32..(1u32 << 31), method in method()) {
        let cseq = CSeq::new(seq, method.clone()).unwrap();
        let parsed: CSeq = assert_round_trip(&cseq.to_string());
        prop_assert_eq!(parsed.seq_number(), seq);
        prop_assert_eq!(parsed.method(), &method);
    }

    #[test]
    fn prop_cseq_rejects_large(seq in (1u32 << 31).., method in method()) {
        prop_assert!(CSeq::new(seq, method.clone()).is_err());
        let cseq_str = format!("{} {}", seq, method);
        prop_assert!(CSeq::from_str(&cseq_str).is_err());
    }

    /// Max-Forwards accepts exactly 0..=255
    #[test]
    fn prop_max_forwards_range(hops in 0u32..1000) {
        let built = MaxForwards::new(hops);
        let parsed = MaxForwards::from_str(&hops.to_string());
        if hops <= 255 {
            prop_assert_eq!(built.clone().map(|m| m.value() as u32), Ok(hops));
            prop_assert_eq!(parsed, built);
        } else {
            prop_assert!(built.is_err());
            prop_assert!(parsed.is_err());
        }
    }

    /// Parameter lists round trip and compare equal regardless of entry order
    #[test]
    fn prop_name_value_list(entries in proptest::collection::btree_map(
        "[a-z][a-z0-9-]{0,7}",
        proptest::option::of(token()),
        0..6,
    )) {
        let list: NameValueList = entries
            .iter()
            .map(|(name, value)| match value {
                Some(v) => NameValue::new(name.clone(), Some(v.as_str().into())).unwrap(),
                None => NameValue::flag(name.clone()).unwrap(),
            })
            .collect();
        prop_assert_eq!(list.len(), entries.len());

        let text = list.to_string();
        let parsed = NameValueList::from_str(&text);
        prop_assert!(parsed.is_ok(), "'{}' did not parse: {:?}", text, parsed);
        prop_assert_eq!(parsed.unwrap(), list.clone());

        let reversed: NameValueList = list.iter().rev().cloned().collect();
        prop_assert_eq!(reversed, list);
    }

    /// A display name is either refused for its line breaks or written so it
    /// parses back unchanged
    #[test]
    fn prop_display_name_setter(name in free_text(), host in domain()) {
        let mut address = Address::new(Uri::Sip(SipUri::new(Host::domain(host)).with_user("bob")));
        let result = address.set_display_name(name.clone());
        if has_line_break(&name) {
            prop_assert!(result.is_err());
            prop_assert_eq!(address.display_name(), None);
        } else {
            prop_assert!(result.is_ok());
            let to = To::new(address);
            let text = to.to_string();
            let parsed = To::from_str(&text);
            prop_assert!(parsed.is_ok(), "'{}' did not parse: {:?}", text.escape_default(), parsed);
            prop_assert_eq!(parsed.unwrap(), to);
        }
    }

    /// Warning text is refused for line breaks and otherwise survives quoting
    #[test]
    fn prop_warning_text_setter(text in free_text()) {
        let mut warning = Warning::new(399, "isi.edu", "").unwrap();
        let result = warning.set_text(text.clone());
        prop_assert_eq!(result.is_err(), has_line_break(&text));
        prop_assert_eq!(Warning::new(399, "isi.edu", text.clone()).is_err(), has_line_break(&text));
        if result.is_ok() {
            let encoded = warning.encode();
            prop_assert!(!encoded.trim_end_matches("\r\n").contains(['\r', '\n']));
            let parsed = Warning::from_str(&warning.to_string());
            prop_assert!(parsed.is_ok(), "'{}' did not parse: {:?}", encoded.escape_default(), parsed);
            let parsed = parsed.unwrap();
            prop_assert_eq!(parsed.text(), text.as_str());
        }
    }

    /// A URI parameter is either refused or written as given and read back
    /// as the same single parameter
    #[test]
    fn prop_uri_parameter_setter(
        name in prop_oneof![Just("x".to_string()), "[a-z]{1,6}", free_text()],
        value in prop_oneof!["[a-zA-Z0-9%:+-]{1,8}", free_text()],
        host in domain(),
    ) {
        let mut uri = SipUri::new(Host::domain(host));
        match uri.set_parameter(name.clone(), value.clone()) {
            Err(_) => prop_assert!(uri.params().is_empty()),
            Ok(()) => {
                prop_assert!(!value.contains([' ', ';', '?', '=', '\r', '\n']));
                let text = Address::new(Uri::Sip(uri.clone())).to_string();
                let parsed = Address::from_str(&text);
                prop_assert!(parsed.is_ok(), "'{}' did not parse: {:?}", text, parsed);
                let parsed = parsed.unwrap();
                let sip = parsed.uri().as_sip().unwrap();
                prop_assert_eq!(sip.params().len(), 1);
                prop_assert_eq!(sip.parameter(&name), Some(value.as_str()));
                prop_assert_eq!(sip, &uri);
            }
        }
    }
}
