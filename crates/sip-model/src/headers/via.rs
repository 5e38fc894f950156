//! # SIP Via Header
//!
//! The Via header records the path a request has taken and where responses
//! must go ([RFC 3261 §20.42](https://datatracker.ietf.org/doc/html/rfc3261#section-20.42)).
//!
//! ```text
//! Via: SIP/2.0/UDP pc33.atlanta.com:5060;branch=z9hG4bK776asdhds;received=192.0.2.1
//! ```
//!
//! Each [`Via`] is one hop; repeated hops are kept in a
//! [`SipHeaderList<Via>`](crate::headers::SipHeaderList).
//!
//! ## Examples
//!
//! ```rust
//! use sip_model::headers::Via;
//! use sip_model::types::Host;
//!
//! let mut via = Via::new("UDP", Host::domain("pc33.atlanta.com"), Some(5060)).unwrap();
//! via.set_branch("z9hG4bK776asdhds").unwrap();
//! via.set_rport_flag();
//! assert_eq!(via.to_string(), "SIP/2.0/UDP pc33.atlanta.com:5060;branch=z9hG4bK776asdhds;rport");
//!
//! let parsed: Via = via.to_string().parse().unwrap();
//! assert_eq!(parsed, via);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{match_token, Matches, Merge};
use crate::parser::token::is_token;
use crate::types::host::{Host, HostPort};
use crate::types::param::{GenericValue, NameValueList};
use crate::types::protocol::Protocol;

/// The magic cookie that starts every RFC 3261 branch identifier.
pub const BRANCH_MAGIC_COOKIE: &str = "z9hG4bK";

/// A single Via hop: `sent-protocol LWS sent-by *( SEMI via-params )`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Via {
    protocol: Protocol,
    sent_by: HostPort,
    params: NameValueList,
}

impl Via {
    /// A `SIP/2.0/<transport>` Via for the given host and port.
    pub fn new(transport: &str, host: Host, port: Option<u16>) -> Result<Self> {
        let mut sent_by = HostPort::from(host);
        if let Some(port) = port {
            sent_by.set_port(port)?;
        }
        Ok(Via {
            protocol: Protocol::sip(transport)?,
            sent_by,
            params: NameValueList::new(),
        })
    }

    pub fn with_protocol(protocol: Protocol, sent_by: HostPort) -> Self {
        Via {
            protocol,
            sent_by,
            params: NameValueList::new(),
        }
    }

    /// Generates a fresh branch identifier carrying the RFC 3261 magic cookie.
    pub fn new_branch() -> String {
        format!("{}{}", BRANCH_MAGIC_COOKIE, uuid::Uuid::new_v4().simple())
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = protocol;
    }

    pub fn transport(&self) -> &str {
        self.protocol.transport()
    }

    pub fn set_transport(&mut self, transport: impl Into<String>) -> Result<()> {
        self.protocol.set_transport(transport)
    }

    pub fn sent_by(&self) -> &HostPort {
        &self.sent_by
    }

    pub fn set_sent_by(&mut self, sent_by: HostPort) {
        self.sent_by = sent_by;
    }

    pub fn host(&self) -> &Host {
        self.sent_by.host()
    }

    pub fn set_host(&mut self, host: Host) {
        self.sent_by.set_host(host);
    }

    pub fn port(&self) -> Option<u16> {
        self.sent_by.port()
    }

    pub fn set_port(&mut self, port: u16) -> Result<()> {
        self.sent_by.set_port(port)
    }

    pub fn has_port(&self) -> bool {
        self.sent_by.has_port()
    }

    pub fn remove_port(&mut self) {
        self.sent_by.remove_port();
    }

    pub fn params(&self) -> &NameValueList {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut NameValueList {
        &mut self.params
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params.value(name)
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.params.has(name)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<GenericValue>) -> Result<()> {
        self.params.set(name, value)
    }

    pub fn remove_parameter(&mut self, name: &str) -> bool {
        self.params.remove(name)
    }

    pub fn branch(&self) -> Option<&str> {
        self.parameter("branch")
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) -> Result<()> {
        let branch = branch.into();
        if !is_token(&branch) {
            return Err(Error::InvalidArgument(format!("Invalid branch: '{}'", branch)));
        }
        self.params.put("branch", GenericValue::Token(branch));
        Ok(())
    }

    pub fn remove_branch(&mut self) -> bool {
        self.params.remove("branch")
    }

    /// True when the branch starts with the RFC 3261 magic cookie.
    pub fn has_rfc3261_branch(&self) -> bool {
        self.branch().map_or(false, |b| b.starts_with(BRANCH_MAGIC_COOKIE))
    }

    pub fn received(&self) -> Option<Host> {
        match self.params.generic_value("received")? {
            GenericValue::Host(h) => Some(h.clone()),
            GenericValue::Token(t) => t.parse().ok(),
            GenericValue::Quoted(_) => None,
        }
    }

    /// Fails for a domain name that is not a token.
    pub fn set_received(&mut self, received: Host) -> Result<()> {
        self.params.set("received", received)
    }

    pub fn maddr(&self) -> Option<Host> {
        match self.params.generic_value("maddr")? {
            GenericValue::Host(h) => Some(h.clone()),
            GenericValue::Token(t) => t.parse().ok(),
            GenericValue::Quoted(_) => None,
        }
    }

    pub fn set_maddr(&mut self, maddr: Host) -> Result<()> {
        self.params.set("maddr", maddr)
    }

    pub fn ttl(&self) -> Option<u8> {
        self.parameter("ttl").and_then(|t| t.parse().ok())
    }

    /// Sets the multicast TTL. Valid values are 0..=255.
    pub fn set_ttl(&mut self, ttl: u32) -> Result<()> {
        let ttl = u8::try_from(ttl)
            .map_err(|_| Error::InvalidArgument(format!("ttl {} is outside 0..=255", ttl)))?;
        self.params.put("ttl", GenericValue::Token(ttl.to_string()));
        Ok(())
    }

    /// The `rport` value. A bare `rport` flag (RFC 3581 request) gives `None`.
    pub fn rport(&self) -> Option<u16> {
        self.parameter("rport").and_then(|p| p.parse().ok())
    }

    pub fn has_rport(&self) -> bool {
        self.params.has("rport")
    }

    /// Sets `rport=<port>`. Valid ports are 1..=65535.
    pub fn set_rport(&mut self, port: u32) -> Result<()> {
        if !(1..=65535).contains(&port) {
            return Err(Error::InvalidArgument(format!("rport {} is outside 1..=65535", port)));
        }
        self.params.put("rport", GenericValue::Token(port.to_string()));
        Ok(())
    }

    /// Adds a bare `rport` asking the server to fill in the source port.
    pub fn set_rport_flag(&mut self) {
        self.params.put_flag("rport");
    }

    pub(crate) fn from_parts(protocol: Protocol, sent_by: HostPort, params: NameValueList) -> Self {
        Via {
            protocol,
            sent_by,
            params,
        }
    }
}

impl fmt::Display for Via {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.protocol, self.sent_by)?;
        self.params.fmt_prefixed(f)
    }
}

typed_header!(Via, Via, crate::parser::headers::via::via);

impl Matches for Via {
    fn matches(&self, template: &Self) -> bool {
        match_token(self.protocol.name(), template.protocol.name())
            && match_token(self.protocol.transport(), template.protocol.transport())
            && self.sent_by.host() == template.sent_by.host()
            && (template.port().is_none() || self.port() == template.port())
            && self.params.matches(&template.params)
    }
}

impl Merge for Via {
    fn merge(&mut self, other: &Self) {
        self.protocol = other.protocol.clone();
        self.sent_by.set_host(other.sent_by.host().clone());
        if let Some(port) = other.port() {
            let _ = self.sent_by.set_port(port);
        }
        self.params.merge(&other.params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::header::TypedHeaderTrait;
    use crate::headers::HeaderName;
    use std::str::FromStr;

    #[test]
    fn test_via_typed_header_trait() {
        let via = Via::from_str("SIP/2.0/UDP 192.168.1.1:5060;branch=z9hG4bK776asdhds").unwrap();
        assert_eq!(Via::header_name(), HeaderName::Via);
        let header = via.to_header();
        assert_eq!(Via::from_header(&header).unwrap(), via);
        assert_eq!(
            via.encode(),
            "Via: SIP/2.0/UDP 192.168.1.1:5060;branch=z9hG4bK776asdhds\r\n"
        );
    }

    #[test]
    fn test_parse_full_via() {
        let via = Via::from_str(
            "SIP / 2.0 / tcp [2001:db8::9]:5061 ;branch=z9hG4bKnashds8;received=192.0.2.2;rport=9988;ttl=16;maddr=224.2.0.1",
        )
        .unwrap();
        assert_eq!(via.transport(), "TCP");
        assert!(matches!(via.host(), Host::Ipv6(_)));
        assert_eq!(via.port(), Some(5061));
        assert_eq!(via.branch(), Some("z9hG4bKnashds8"));
        assert_eq!(via.received(), Some(Host::Ipv4("192.0.2.2".parse().unwrap())));
        assert_eq!(via.rport(), Some(9988));
        assert_eq!(via.ttl(), Some(16));
        assert_eq!(via.maddr(), Some(Host::Ipv4("224.2.0.1".parse().unwrap())));
        assert_eq!(
            via.to_string(),
            "SIP/2.0/TCP [2001:db8::9]:5061;branch=z9hG4bKnashds8;received=192.0.2.2;rport=9988;ttl=16;maddr=224.2.0.1"
        );
    }

    #[test]
    fn test_setter_validation() {
        let mut via = Via::new("UDP", Host::domain("host.com"), None).unwrap();
        assert!(via.set_ttl(256).is_err());
        via.set_ttl(255).unwrap();
        assert!(via.set_rport(0).is_err());
        assert!(via.set_rport(65536).is_err());
        via.set_rport(5060).unwrap();
        assert!(via.set_branch("bad branch").is_err());
        assert!(via.set_port(0).is_err());
        assert!(via.set_transport("").is_err());
        assert!(Via::new("UDP", Host::domain("host.com"), Some(0)).is_err());
    }

    #[test]
    fn test_port_handling() {
        let mut via = Via::from_str("SIP/2.0/UDP host.com:5060").unwrap();
        assert!(via.has_port());
        via.remove_port();
        assert!(!via.has_port());
        assert_eq!(via.to_string(), "SIP/2.0/UDP host.com");
    }

    #[test]
    fn test_new_branch_has_cookie() {
        let branch = Via::new_branch();
        assert!(branch.starts_with(BRANCH_MAGIC_COOKIE));
        assert_ne!(branch, Via::new_branch());

        let mut via = Via::new("UDP", Host::domain("a.com"), None).unwrap();
        via.set_branch(branch).unwrap();
        assert!(via.has_rfc3261_branch());
    }

    #[test]
    fn test_received_ipv6_round_trip() {
        let mut via = Via::new("UDP", Host::domain("a.com"), None).unwrap();
        via.set_received(Host::Ipv6("2001:db8::1".parse().unwrap())).unwrap();
        let text = via.to_string();
        assert_eq!(text, "SIP/2.0/UDP a.com;received=[2001:db8::1]");
        assert_eq!(Via::from_str(&text).unwrap(), via);
    }

    #[test]
    fn test_parameter_setters_are_checked() {
        let mut via = Via::new("UDP", Host::domain("a.com"), None).unwrap();
        assert!(via.set_maddr(Host::domain("evil;x=1")).is_err());
        assert!(via.set_received(Host::domain("a\r\nb")).is_err());
        assert!(via.set_parameter("x", "\r\n").is_err());
        assert!(via.set_parameter("x;y", "1").is_err());
        assert!(via.params().is_empty());

        via.set_maddr(Host::domain("224.2.0.1")).unwrap();
        via.set_parameter("comment", "two words").unwrap();
        let text = via.to_string();
        assert_eq!(text, "SIP/2.0/UDP a.com;maddr=224.2.0.1;comment=\"two words\"");
        assert_eq!(Via::from_str(&text).unwrap(), via);
    }

    #[test]
    fn test_matches_template() {
        let via = Via::from_str("SIP/2.0/UDP a.com:5060;branch=z9hG4bK1;rport").unwrap();
        assert!(via.matches(&Via::from_str("SIP/2.0/udp A.COM").unwrap()));
        assert!(via.matches(&Via::from_str("SIP/2.0/UDP a.com;branch=z9hG4bK1").unwrap()));
        assert!(!via.matches(&Via::from_str("SIP/2.0/TCP a.com").unwrap()));
        assert!(!via.matches(&Via::from_str("SIP/2.0/UDP a.com:5070").unwrap()));
    }
}
