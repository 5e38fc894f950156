// Integration tests for the typed headers: RFC 3261 examples, setter
// validation, lists, template matching and serialization.

mod common;

use std::str::FromStr;

use common::*;
use sip_model::headers::address::From as FromHeader;
use sip_model::headers::{
    Accept, AcceptLanguage, Allow, AuthenticationInfo, Authorization, CSeq, CallId, CallInfo, Contact,
    ContentDisposition, ContentLength, ContentType, Date, ErrorInfo, Event, Expires, Header, HeaderName,
    InReplyTo, Matches, MaxForwards, Merge, MimeVersion, MinExpires, Organization, Priority,
    ProxyAuthenticate, RAck, RSeq, Reason, RecordRoute, ReferTo, ReplyTo, Require, RetryAfter, Route,
    Server, SessionExpires, SipHeaderList, Subject, SubscriptionState, Supported, Timestamp, To,
    TypedHeaderTrait, UserAgent, Via, Warning, WwwAuthenticate,
};
use sip_model::types::{Address, Host, Method, SipUri, TelUri, Uri};
use sip_model::Error;

#[test]
fn test_rfc3261_header_round_trips() {
    init_tracing();
    assert_round_trip::<Via>("SIP/2.0/UDP erlang.bell-telephone.com:5060;branch=z9hG4bK87asdks7");
    assert_round_trip::<Via>("SIP/2.0/UDP 192.0.2.1:5060 ;received=192.0.2.207;branch=z9hG4bK77asjd");
    assert_round_trip::<To>("The Operator <sip:operator@cs.columbia.edu>;tag=287447");
    assert_round_trip::<FromHeader>("\"A. G. Bell\" <sip:agb@bell-telephone.com> ;tag=a48s");
    assert_round_trip::<FromHeader>("sip:+12125551212@server.phone2net.com;tag=887s");
    assert_round_trip::<Contact>("\"Mr. Watson\" <sip:watson@worcester.bell-telephone.com>;q=0.7; expires=3600");
    assert_round_trip::<CallId>("f81d4fae-7dec-11d0-a765-00a0c91e6bf6@foo.bar.com");
    assert_round_trip::<CSeq>("4711 INVITE");
    assert_round_trip::<MaxForwards>("6");
    assert_round_trip::<ContentType>("application/sdp");
    assert_round_trip::<ContentLength>("349");
    assert_round_trip::<Expires>("5");
    assert_round_trip::<MinExpires>("60");
    assert_round_trip::<Date>("Sat, 13 Nov 2010 23:29:00 GMT");
    assert_round_trip::<Timestamp>("54");
    assert_round_trip::<RetryAfter>("18000;duration=3600");
    assert_round_trip::<Warning>("307 isi.edu \"Session parameter 'foo' not understood\"");
    assert_round_trip::<Subject>("Need more boxes");
    assert_round_trip::<Organization>("Boxes by Bob");
    assert_round_trip::<Priority>("emergency");
    assert_round_trip::<Server>("HomeServer v2");
    assert_round_trip::<UserAgent>("Softphone Beta1.5");
    assert_round_trip::<MimeVersion>("1.0");
    assert_round_trip::<ContentDisposition>("session");
    assert_round_trip::<ReplyTo>("Bob <sip:bob@biloxi.com>");
    assert_round_trip::<ErrorInfo>("<sip:not-in-service-recording@atlanta.com>");
    assert_round_trip::<CallInfo>("<http://wwww.example.com/alice/photo.jpg> ;purpose=icon");
    assert_round_trip::<Route>("<sip:bigbox3.site3.atlanta.com;lr>");
    assert_round_trip::<RSeq>("988789");
    assert_round_trip::<RAck>("776656 1 INVITE");
    assert_round_trip::<SessionExpires>("4000;refresher=uas");
    assert_round_trip::<Event>("presence;id=abc");
    assert_round_trip::<SubscriptionState>("active;expires=60");
    assert_round_trip::<Reason>("SIP ;cause=200 ;text=\"Call completed elsewhere\"");
    assert_round_trip::<ReferTo>("<sip:carol@chicago.com?Replaces=12345%40192.168.118.3>");
    assert_round_trip::<InReplyTo>("70710@saturn.bell-tel.com");
}

#[test]
fn test_rfc3261_authentication_round_trips() {
    let challenge = assert_round_trip::<WwwAuthenticate>(
        "Digest realm=\"atlanta.com\", domain=\"sip:boxesbybob.com\", qop=\"auth\", \
         nonce=\"f84f1cec41e6cbe5aea9c8e88d359\", opaque=\"\", stale=FALSE, algorithm=MD5",
    );
    assert_eq!(challenge.realm(), Some("atlanta.com"));
    assert_eq!(challenge.stale(), Some(false));
    assert_eq!(challenge.qop_options(), vec!["auth"]);

    let credentials = assert_round_trip::<Authorization>(
        "Digest username=\"bob\", realm=\"biloxi.com\", nonce=\"dcd98b7102dd2f0e8b11d0f600bfb0c093\", \
         uri=\"sip:bob@biloxi.com\", qop=auth, nc=00000001, cnonce=\"0a4f113b\", \
         response=\"6629fae49393a05397450978507c4ef1\", opaque=\"5ccc069c403ebaf9f0171e9517f40e41\"",
    );
    assert_eq!(credentials.username(), Some("bob"));
    assert_eq!(credentials.nonce_count(), Some(1));

    assert_round_trip::<ProxyAuthenticate>("Digest realm=\"atlanta.com\", nonce=\"wf84f1ceczx41ae6cbe5aea9c8e88d359\"");
    assert_round_trip::<AuthenticationInfo>("nextnonce=\"47364c23432d2e131a5fb210812c\"");
}

#[test]
fn test_setter_range_validation() {
    assert!(MaxForwards::new(256).is_err());
    assert!(CSeq::new(1 << 31, Method::Invite).is_err());
    assert!(RSeq::new(1 << 31).is_err());
    assert!(Warning::new(99, "isi.edu", "x").is_err());
    assert!(Timestamp::new(-0.1).is_err());

    let mut via = Via::new("UDP", Host::domain("pc33.atlanta.com"), Some(5060)).unwrap();
    assert!(via.set_ttl(256).is_err());
    assert!(via.set_rport(0).is_err());
    assert!(via.set_rport(65536).is_err());
    assert!(via.set_port(0).is_err());
    via.set_ttl(16).unwrap();
    via.set_rport(5061).unwrap();
    assert_eq!(via.ttl(), Some(16));
    assert_eq!(via.rport(), Some(5061));

    let mut contact = Contact::new(Address::new(sip_uri("alice", "atlanta.com")));
    assert!(contact.set_q(1.5).is_err());
    assert!(contact.set_q(-0.1).is_err());
    contact.set_q(0.5).unwrap();
    assert_eq!(contact.q().map(|q| q.into_inner()), Some(0.5));

    let mut accept = Accept::from_str("application/sdp").unwrap();
    assert!(accept.set_q(1.01).is_err());

    assert!(CallId::new("").is_err());
    assert!(Require::new("").is_err());

    let mut auth = Authorization::digest();
    assert!(auth.set_realm("").is_err());
    assert!(auth.set_nonce_count(0).is_err());
    assert!(auth.set_nonce_count(0x1_0000_0000).is_err());
    auth.set_nonce_count(0xff).unwrap();
    assert_eq!(auth.parameter("nc"), Some("000000ff"));
}

#[test]
fn test_setter_built_values_round_trip() {
    let mut uri = SipUri::new(Host::domain("biloxi.com")).with_user("bob");
    uri.set_transport("tcp").unwrap();
    uri.set_parameter("x", "a%20b").unwrap();
    uri.set_header("subject", "lunch & coffee").unwrap();
    let mut to = To::new(Address::with_display_name(Uri::Sip(uri), "Bob \"The Builder\"\t\\").unwrap());
    to.set_tag("a6c85cf").unwrap();
    to.set_parameter("note", "two words; and more").unwrap();
    assert_eq!(
        assert_encodes_as_one_line(&to),
        "To: \"Bob \\\"The Builder\\\"\t\\\\\" \
         <sip:bob@biloxi.com;transport=tcp;x=a%20b?subject=lunch%20%26%20coffee>;\
         tag=a6c85cf;note=\"two words; and more\"\r\n"
    );

    let mut contact = Contact::new(Address::new(sip_uri("alice", "pc33.atlanta.com")));
    contact
        .set_parameter("+sip.instance", "<urn:uuid:00000000-0000-1000-8000-000A95A0E128>")
        .unwrap();
    contact.set_q(0.7).unwrap();
    contact.set_expires(3600);
    assert_encodes_as_one_line(&contact);

    let mut via = Via::new("UDP", Host::domain("pc33.atlanta.com"), None).unwrap();
    via.set_branch(Via::new_branch()).unwrap();
    via.set_received(Host::Ipv6("2001:db8::9".parse().unwrap())).unwrap();
    via.set_parameter("x-note", "a b").unwrap();
    assert_encodes_as_one_line(&via);

    assert_encodes_as_one_line(&Warning::new(399, "isi.edu", "say \"hi\"\tnow").unwrap());
    assert_encodes_as_one_line(&Reason::new("SIP", 200, Some("Call completed \"elsewhere\"")).unwrap());

    let mut auth = Authorization::digest();
    auth.set_username("bob").unwrap();
    auth.set_realm("biloxi.com").unwrap();
    auth.set_nonce("dcd98b71 \"02\"").unwrap();
    auth.set_uri(sip_uri("bob", "biloxi.com")).unwrap();
    auth.set_response("245f23415f11432b3434341c022").unwrap();
    auth.set_cnonce("0a4f113b").unwrap();
    auth.set_opaque("").unwrap();
    assert_encodes_as_one_line(&auth);

    let mut challenge = WwwAuthenticate::digest();
    challenge.set_realm("atlanta.com").unwrap();
    challenge.set_domain("sip:ss1.carrier.com sip:ss2.carrier.com").unwrap();
    challenge.set_qop_options(&["auth", "auth-int"]).unwrap();
    challenge.set_stale(false);
    assert_encodes_as_one_line(&challenge);

    let mut info = AuthenticationInfo::new();
    info.set_next_nonce("47364c23432d2e131a5fb210812c").unwrap();
    info.set_response_auth("e3b0").unwrap();
    assert_encodes_as_one_line(&info);
}

#[test]
fn test_setters_refuse_header_injection() {
    const INJECTED: &str = "Bob\r\nX-Evil: 1";

    let uri = sip_uri("bob", "biloxi.com");
    assert!(matches!(
        Address::with_display_name(uri.clone(), INJECTED),
        Err(Error::InvalidArgument(_))
    ));
    let mut address = Address::new(uri);
    assert!(address.set_display_name(INJECTED).is_err());
    assert!(address.set_display_name("Bob\n").is_err());
    assert_eq!(address.display_name(), None);

    assert!(Warning::new(399, "host", "line1\r\nX-Evil: 1").is_err());
    let mut warning = Warning::new(399, "host", "line1").unwrap();
    assert!(warning.set_text(INJECTED).is_err());

    let mut reason = Reason::with_protocol("SIP").unwrap();
    assert!(reason.set_text(INJECTED).is_err());
    assert_eq!(reason.text(), None);

    let mut auth = Authorization::digest();
    assert!(auth.set_nonce(INJECTED).is_err());
    assert!(auth.set_opaque(INJECTED).is_err());
    assert!(auth.set_response(INJECTED).is_err());
    assert!(auth.set_cnonce(INJECTED).is_err());
    assert!(auth.params().is_empty());

    let mut contact = Contact::new(address.clone());
    assert!(contact.set_parameter("x", "\r\n").is_err());
    assert!(contact.set_parameter("x;evil", "1").is_err());
    assert!(contact.params().is_empty());

    let mut sip = SipUri::new(Host::domain("biloxi.com")).with_user("bob");
    assert!(sip.set_parameter("x", "a b;evil=1").is_err());
    assert!(sip.set_user_param("phone;evil=1").is_err());
    assert!(sip.params().is_empty());
    let mut tel = TelUri::new("7042", false).unwrap();
    assert!(tel.set_phone_context("a b;evil=1").is_err());
    assert!(tel.set_post_dial("\r\n").is_err());
    assert!(tel.params().is_empty());

    // Everything that was refused left the headers untouched and encodable
    let mut to = To::new(address);
    to.set_tag("a6c85cf").unwrap();
    assert_eq!(assert_encodes_as_one_line(&to), "To: <sip:bob@biloxi.com>;tag=a6c85cf\r\n");
    assert_encodes_as_one_line(&warning);
    assert_encodes_as_one_line(&contact);
}

#[test]
fn test_tags_and_branches() {
    let mut from = FromHeader::new(Address::with_display_name(sip_uri("alice", "atlanta.com"), "Alice").unwrap());
    assert!(!from.has_tag());
    let tag = sip_model::headers::generate_tag();
    from.set_tag(tag.clone()).unwrap();
    assert_eq!(from.tag(), Some(tag.as_str()));
    assert!(from.set_tag("not a token").is_err());

    let mut via = Via::new("TCP", Host::domain("client.atlanta.com"), None).unwrap();
    via.set_branch(Via::new_branch()).unwrap();
    assert!(via.has_rfc3261_branch());
    assert_ne!(Via::new_branch(), Via::new_branch());
}

#[test]
fn test_header_list_concatenation_and_order() {
    let mut routes: SipHeaderList<RecordRoute> =
        "<sip:p2.domain.com;lr>, <sip:p1.example.com;lr>".parse().unwrap();
    let top: SipHeaderList<RecordRoute> = "<sip:p3.middle.com;lr>".parse().unwrap();
    let bottom: SipHeaderList<RecordRoute> = "<sip:p0.origin.com;lr>".parse().unwrap();
    routes.concatenate(top, true);
    routes.concatenate(bottom, false);

    let hosts: Vec<String> = routes.iter().map(|r| r.uri().to_string()).collect();
    assert_eq!(
        hosts,
        vec![
            "sip:p3.middle.com;lr",
            "sip:p2.domain.com;lr",
            "sip:p1.example.com;lr",
            "sip:p0.origin.com;lr"
        ]
    );
    assert!(routes.iter().all(|r| r.is_loose_routing()));
}

#[test]
fn test_auth_lists_encode_one_line_each() {
    let mut list = SipHeaderList::new();
    list.push(WwwAuthenticate::from_str("Digest realm=\"a.com\", nonce=\"1\"").unwrap());
    list.push(WwwAuthenticate::from_str("Digest realm=\"b.com\", nonce=\"2\"").unwrap());
    assert_eq!(
        list.encode(),
        "WWW-Authenticate: Digest realm=\"a.com\", nonce=\"1\"\r\n\
         WWW-Authenticate: Digest realm=\"b.com\", nonce=\"2\"\r\n"
    );
}

#[test]
fn test_list_matching_and_merge() {
    let supported: SipHeaderList<Supported> = "100rel, timer, path".parse().unwrap();
    let template: SipHeaderList<Supported> = "timer".parse().unwrap();
    assert!(supported.matches(&template));
    let missing: SipHeaderList<Supported> = "gruu".parse().unwrap();
    assert!(!supported.matches(&missing));

    let mut contacts: SipHeaderList<Contact> = "<sip:a@atlanta.com>;expires=60".parse().unwrap();
    let update: SipHeaderList<Contact> =
        "<sip:a@atlanta.com>;expires=120, <sip:b@atlanta.com>".parse().unwrap();
    contacts.merge(&update);
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts.first().and_then(|c| c.expires()), Some(120));
}

#[test]
fn test_template_matching_uses_wildcards() {
    let to = To::from_str("Bob <sip:bob@biloxi.com>;tag=a6c85cf").unwrap();
    let template = To::new(Address::new(sip_uri("bob", "biloxi.com")));
    assert!(to.matches(&template));

    let mut tagged_template = template.clone();
    tagged_template.set_tag("other").unwrap();
    assert!(!to.matches(&tagged_template));

    let mut merged = template;
    merged.merge(&to);
    assert_eq!(merged.tag(), Some("a6c85cf"));
}

#[test]
fn test_wildcard_contact() {
    let star = Contact::from_str("*").unwrap();
    assert!(star.is_wildcard());
    assert_eq!(star.encode(), "Contact: *\r\n");
    let normal = Contact::from_str("<sip:alice@atlanta.com>").unwrap();
    assert!(!normal.matches(&star));
    assert!(star.matches(&Contact::wildcard()));
}

#[test]
fn test_header_enum_conversions() {
    let allow = Allow::new(Method::Subscribe);
    let header = Header::from(allow.clone());
    assert_eq!(header.name(), HeaderName::Allow);
    assert_eq!(header.typed::<Allow>().unwrap(), allow);
    assert!(matches!(header.typed::<CSeq>(), Err(Error::InvalidHeader(_))));
    assert_eq!(header.encode(), "Allow: SUBSCRIBE\r\n");
}

#[test]
fn test_accept_language_preference() {
    let langs: SipHeaderList<AcceptLanguage> = "da, en-gb;q=0.8, en;q=0.7".parse().unwrap();
    let mut by_q: Vec<&AcceptLanguage> = langs.iter().collect();
    by_q.sort_by_key(|l| std::cmp::Reverse(l.q_or_default()));
    let order: Vec<&str> = by_q.iter().map(|l| l.language()).collect();
    assert_eq!(order, vec!["da", "en-gb", "en"]);
}

#[test]
fn test_serde_json_round_trip() {
    let via = Via::from_str("SIP/2.0/TLS client.biloxi.example.com:5061;branch=z9hG4bKnashd92;rport").unwrap();
    let json = serde_json::to_string(&via).unwrap();
    let back: Via = serde_json::from_str(&json).unwrap();
    assert_eq!(back, via);

    let header = Header::from(Date::from_str("Sat, 13 Nov 2010 23:29:00 GMT").unwrap());
    let json = serde_json::to_string(&header).unwrap();
    assert_eq!(serde_json::from_str::<Header>(&json).unwrap(), header);

    let accept = Accept::from_str("text/html;q=0.5").unwrap();
    let json = serde_json::to_string(&accept).unwrap();
    assert_eq!(serde_json::from_str::<Accept>(&json).unwrap(), accept);
}

#[test]
fn test_rejected_values() {
    assert_rejects::<CSeq>("INVITE 1");
    assert_rejects::<MaxForwards>("300");
    assert_rejects::<Via>("SIP/2.0/UDP");
    assert_rejects::<To>("<sip:bob@biloxi.com");
    assert_rejects::<Route>("sip:p1.example.com;lr");
    assert_rejects::<ContentType>("application");
    assert_rejects::<Date>("yesterday");
    assert_rejects::<Warning>("307 isi.edu no-quotes");
    assert_rejects::<Timestamp>("-1");
}
