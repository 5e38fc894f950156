//! # Hosts
//!
//! [`Host`] is the `host` production of RFC 3261 §25.1 (hostname, IPv4 address
//! or bracketed IPv6 reference) and [`HostPort`] pairs it with an optional
//! port, as used by SIP URIs and the Via `sent-by`.
//!
//! ```rust
//! use sip_model::types::host::{Host, HostPort};
//!
//! let hp: HostPort = "[2001:db8::1]:5061".parse().unwrap();
//! assert!(matches!(hp.host(), Host::Ipv6(_)));
//! assert_eq!(hp.port(), Some(5061));
//! assert_eq!(hp.to_string(), "[2001:db8::1]:5061");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser;

/// A hostname or an IP address.
///
/// Domain names compare case-insensitively. IPv6 addresses always display in
/// their bracketed reference form.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub enum Host {
    /// A domain name (e.g., "example.com").
    Domain(String),
    /// An IPv4 address.
    Ipv4(Ipv4Addr),
    /// An IPv6 address.
    Ipv6(Ipv6Addr),
}

impl Host {
    /// Create a host from a domain name without validating it.
    pub fn domain(domain: impl Into<String>) -> Self {
        Host::Domain(domain.into())
    }

    /// Returns true if the host is an IP address rather than a name.
    pub fn is_ip(&self) -> bool {
        !matches!(self, Host::Domain(_))
    }

    /// The IP address, if this host is one.
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Host::Domain(_) => None,
            Host::Ipv4(addr) => Some(IpAddr::V4(*addr)),
            Host::Ipv6(addr) => Some(IpAddr::V6(*addr)),
        }
    }
}

impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Host::Domain(a), Host::Domain(b)) => a.eq_ignore_ascii_case(b),
            (Host::Ipv4(a), Host::Ipv4(b)) => a == b,
            (Host::Ipv6(a), Host::Ipv6(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for Host {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Host::Domain(d) => d.to_ascii_lowercase().hash(state),
            Host::Ipv4(a) => a.hash(state),
            Host::Ipv6(a) => a.hash(state),
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Domain(domain) => write!(f, "{}", domain),
            Host::Ipv4(addr) => write!(f, "{}", addr),
            Host::Ipv6(addr) => write!(f, "[{}]", addr),
        }
    }
}

impl FromStr for Host {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Bare IPv6 text is accepted here even though the wire form is bracketed
        if let Ok(addr) = Ipv6Addr::from_str(s) {
            return Ok(Host::Ipv6(addr));
        }
        parser::parse_all(s, parser::host::host)
            .map_err(|_| Error::InvalidArgument(format!("Invalid host: '{}'", s)))
    }
}

impl From<IpAddr> for Host {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Host::Ipv4(v4),
            IpAddr::V6(v6) => Host::Ipv6(v6),
        }
    }
}

impl From<Ipv4Addr> for Host {
    fn from(addr: Ipv4Addr) -> Self {
        Host::Ipv4(addr)
    }
}

impl From<Ipv6Addr> for Host {
    fn from(addr: Ipv6Addr) -> Self {
        Host::Ipv6(addr)
    }
}

/// `hostport = host [ ":" port ]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostPort {
    host: Host,
    port: Option<u16>,
}

impl HostPort {
    pub fn new(host: Host, port: Option<u16>) -> Self {
        HostPort { host, port }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn set_host(&mut self, host: Host) {
        self.host = host;
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Sets the port. Port 0 is not a valid SIP port.
    pub fn set_port(&mut self, port: u16) -> Result<()> {
        if port == 0 {
            return Err(Error::invalid_argument("port must be in 1..=65535"));
        }
        self.port = Some(port);
        Ok(())
    }

    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }

    pub fn remove_port(&mut self) {
        self.port = None;
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

impl FromStr for HostPort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_all(s, parser::host::hostport)
    }
}

impl From<Host> for HostPort {
    fn from(host: Host) -> Self {
        HostPort { host, port: None }
    }
}
