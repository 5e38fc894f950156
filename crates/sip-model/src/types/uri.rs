//! # URIs
//!
//! Three URI shapes appear in SIP headers:
//!
//! - [`SipUri`]: `sip:` and `sips:` URIs (RFC 3261 §19.1) with user info,
//!   host/port, `;` parameters and `?` headers
//! - [`TelUri`]: `tel:` telephone numbers (RFC 3966)
//! - [`GenericUri`]: any other absolute URI, kept as scheme plus opaque text
//!
//! [`Uri`] is the union of all three.
//!
//! ```rust
//! use sip_model::types::uri::Uri;
//!
//! let uri: Uri = "sips:alice:secret@atlanta.com:5061;transport=tcp;lr?subject=project".parse().unwrap();
//! let sip = uri.as_sip().unwrap();
//! assert!(sip.is_secure());
//! assert_eq!(sip.user(), Some("alice"));
//! assert_eq!(sip.transport(), Some("tcp"));
//! assert!(sip.has_lr());
//! assert_eq!(sip.header("subject"), Some("project"));
//! assert_eq!(uri.scheme(), "sips");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::headers::matching::{Matches, Merge};
use crate::parser;
use crate::parser::token::is_token;
use crate::parser::params::is_param_text;
use crate::parser::utils::{escape_password, escape_uri_header, escape_user};
use crate::types::host::{Host, HostPort};
use crate::types::method::Method;
use crate::types::param::{GenericValue, NameValueList, Separator};

/// A `sip:` or `sips:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipUri {
    secure: bool,
    user: Option<String>,
    password: Option<String>,
    host_port: HostPort,
    params: NameValueList,
    headers: NameValueList,
}

impl SipUri {
    /// `sip:host`
    pub fn new(host: Host) -> Self {
        SipUri {
            secure: false,
            user: None,
            password: None,
            host_port: HostPort::from(host),
            params: NameValueList::new(),
            headers: NameValueList::with_separator(Separator::Ampersand),
        }
    }

    /// Builder-style user setter.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Builder-style port setter. Port 0 leaves the URI without a port.
    pub fn with_port(mut self, port: u16) -> Self {
        // set_port only rejects 0
        let _ = self.host_port.set_port(port);
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn set_secure(&mut self, secure: bool) {
        self.secure = secure;
    }

    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "sips"
        } else {
            "sip"
        }
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn set_user(&mut self, user: impl Into<String>) -> Result<()> {
        let user = user.into();
        if user.is_empty() {
            return Err(Error::invalid_argument("URI user must not be empty"));
        }
        self.user = Some(user);
        Ok(())
    }

    pub fn remove_user(&mut self) {
        self.user = None;
        self.password = None;
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Sets the password. A password needs a user.
    pub fn set_password(&mut self, password: impl Into<String>) -> Result<()> {
        if self.user.is_none() {
            return Err(Error::invalid_argument("cannot set a password without a user"));
        }
        self.password = Some(password.into());
        Ok(())
    }

    pub fn remove_password(&mut self) {
        self.password = None;
    }

    pub fn host_port(&self) -> &HostPort {
        &self.host_port
    }

    pub fn host(&self) -> &Host {
        self.host_port.host()
    }

    pub fn set_host(&mut self, host: Host) {
        self.host_port.set_host(host);
    }

    pub fn port(&self) -> Option<u16> {
        self.host_port.port()
    }

    pub fn set_port(&mut self, port: u16) -> Result<()> {
        self.host_port.set_port(port)
    }

    pub fn remove_port(&mut self) {
        self.host_port.remove_port();
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

    /// Sets a URI parameter. Name and value are taken in their escaped wire
    /// form (`a%20b`) and must both be `paramchar` text.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        set_uri_param(&mut self.params, name.into(), Some(value.into()))
    }

    pub fn set_flag_parameter(&mut self, name: impl Into<String>) -> Result<()> {
        set_uri_param(&mut self.params, name.into(), None)
    }

    pub fn remove_parameter(&mut self, name: &str) -> bool {
        self.params.remove(name)
    }

    pub fn clear_params(&mut self) {
        self.params.clear();
    }

    pub fn transport(&self) -> Option<&str> {
        self.parameter("transport")
    }

    pub fn set_transport(&mut self, transport: impl Into<String>) -> Result<()> {
        let transport = transport.into();
        if transport.is_empty() || !is_token(&transport) {
            return Err(Error::InvalidArgument(format!("Invalid transport: '{}'", transport)));
        }
        self.set_parameter("transport", transport)
    }

    /// The `user=` URI parameter (`phone`, `ip`, ...).
    pub fn user_param(&self) -> Option<&str> {
        self.parameter("user")
    }

    pub fn set_user_param(&mut self, value: impl Into<String>) -> Result<()> {
        self.set_parameter("user", value)
    }

    pub fn method(&self) -> Option<Method> {
        self.parameter("method").and_then(|m| m.parse().ok())
    }

    pub fn set_method(&mut self, method: Method) {
        self.params.put("method", GenericValue::Token(method.to_string()));
    }

    pub fn ttl(&self) -> Option<u8> {
        self.parameter("ttl").and_then(|t| t.parse().ok())
    }

    pub fn set_ttl(&mut self, ttl: u8) {
        self.params.put("ttl", GenericValue::Token(ttl.to_string()));
    }

    pub fn maddr(&self) -> Option<&str> {
        self.parameter("maddr")
    }

    pub fn set_maddr(&mut self, maddr: Host) -> Result<()> {
        self.set_parameter("maddr", maddr.to_string())
    }

    pub fn has_lr(&self) -> bool {
        self.params.has("lr")
    }

    pub fn set_lr(&mut self) {
        self.params.put_flag("lr");
    }

    pub fn headers(&self) -> &NameValueList {
        &self.headers
    }

    /// The value of a URI header, percent-escaped as it is written in the URI.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.value(name)
    }

    /// Sets a URI header from plain text. Name and value are percent-escaped
    /// on the way in, so `header()` hands back the escaped form.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("URI header name must not be empty"));
        }
        let value = value.into();
        self.headers
            .put(&escape_uri_header(&name), GenericValue::Token(escape_uri_header(&value)));
        Ok(())
    }

    pub fn remove_header(&mut self, name: &str) -> bool {
        self.headers.remove(name)
    }

    pub(crate) fn from_parts(
        secure: bool,
        userinfo: Option<(String, Option<String>)>,
        host_port: HostPort,
        params: NameValueList,
        headers: NameValueList,
    ) -> Self {
        let (user, password) = match userinfo {
            Some((u, p)) => (Some(u), p),
            None => (None, None),
        };
        let mut headers = headers;
        headers.set_separator(Separator::Ampersand);
        SipUri {
            secure,
            user,
            password,
            host_port,
            params,
            headers,
        }
    }
}

impl fmt::Display for SipUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme())?;
        if let Some(user) = &self.user {
            write!(f, "{}", escape_user(user))?;
            if let Some(password) = &self.password {
                write!(f, ":{}", escape_password(password))?;
            }
            write!(f, "@")?;
        }
        write!(f, "{}", self.host_port)?;
        self.params.fmt_prefixed(f)?;
        if !self.headers.is_empty() {
            write!(f, "?{}", self.headers)?;
        }
        Ok(())
    }
}

impl FromStr for SipUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match Uri::from_str(s)? {
            Uri::Sip(sip) => Ok(sip),
            other => Err(Error::InvalidUri(format!("Not a SIP URI: {}", other))),
        }
    }
}

/// A `tel:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelUri {
    number: String,
    global: bool,
    params: NameValueList,
}

impl TelUri {
    /// A telephone number. Global numbers are written with a leading `+`.
    pub fn new(number: impl Into<String>, global: bool) -> Result<Self> {
        let number = number.into();
        if number.is_empty() {
            return Err(Error::invalid_argument("telephone number must not be empty"));
        }
        if !number.bytes().all(parser::uri::is_phone_char) {
            return Err(Error::InvalidArgument(format!(
                "Invalid telephone number: '{}'",
                number.escape_default()
            )));
        }
        Ok(TelUri {
            number,
            global,
            params: NameValueList::new(),
        })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn set_global(&mut self, global: bool) {
        self.global = global;
    }

    pub fn params(&self) -> &NameValueList {
        &self.params
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params.value(name)
    }

    /// Same rules as [`SipUri::set_parameter`].
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        set_uri_param(&mut self.params, name.into(), Some(value.into()))
    }

    pub fn remove_parameter(&mut self, name: &str) -> bool {
        self.params.remove(name)
    }

    pub fn phone_context(&self) -> Option<&str> {
        self.parameter("phone-context")
    }

    pub fn set_phone_context(&mut self, context: impl Into<String>) -> Result<()> {
        self.set_parameter("phone-context", context)
    }

    pub fn isdn_subaddress(&self) -> Option<&str> {
        self.parameter("isub")
    }

    pub fn set_isdn_subaddress(&mut self, isub: impl Into<String>) -> Result<()> {
        self.set_parameter("isub", isub)
    }

    pub fn post_dial(&self) -> Option<&str> {
        self.parameter("postd")
    }

    pub fn set_post_dial(&mut self, postd: impl Into<String>) -> Result<()> {
        self.set_parameter("postd", postd)
    }

    pub(crate) fn from_parts(number: String, global: bool, params: NameValueList) -> Self {
        TelUri {
            number,
            global,
            params,
        }
    }
}

fn set_uri_param(params: &mut NameValueList, name: String, value: Option<String>) -> Result<()> {
    if !is_param_text(&name) {
        return Err(Error::InvalidArgument(format!(
            "Invalid URI parameter name: '{}'",
            name.escape_default()
        )));
    }
    match value {
        Some(value) if !is_param_text(&value) => Err(Error::InvalidArgument(format!(
            "Invalid value for URI parameter '{}': '{}'",
            name,
            value.escape_default()
        ))),
        Some(value) => {
            params.put(&name, GenericValue::Token(value));
            Ok(())
        }
        None => {
            params.put_flag(&name);
            Ok(())
        }
    }
}

impl fmt::Display for TelUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tel:")?;
        if self.global {
            write!(f, "+")?;
        }
        write!(f, "{}", self.number)?;
        self.params.fmt_prefixed(f)
    }
}

/// Any absolute URI other than sip, sips and tel, kept verbatim.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct GenericUri {
    scheme: String,
    opaque: String,
}

impl GenericUri {
    pub fn new(scheme: impl Into<String>, opaque: impl Into<String>) -> Result<Self> {
        let scheme = scheme.into();
        let valid = scheme
            .bytes()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic())
            && scheme
                .bytes()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, b'+' | b'-' | b'.'));
        if !valid {
            return Err(Error::InvalidArgument(format!("Invalid URI scheme: '{}'", scheme)));
        }
        Ok(GenericUri {
            scheme,
            opaque: opaque.into(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn opaque(&self) -> &str {
        &self.opaque
    }
}

impl PartialEq for GenericUri {
    fn eq(&self, other: &Self) -> bool {
        self.scheme.eq_ignore_ascii_case(&other.scheme) && self.opaque == other.opaque
    }
}

impl fmt::Display for GenericUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.opaque)
    }
}

/// Any URI that can appear in a SIP header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Uri {
    Sip(SipUri),
    Tel(TelUri),
    Generic(GenericUri),
}

impl Uri {
    /// `sip:host`
    pub fn sip(host: impl Into<String>) -> Result<Self> {
        let host = Host::from_str(&host.into())?;
        Ok(Uri::Sip(SipUri::new(host)))
    }

    pub fn scheme(&self) -> &str {
        match self {
            Uri::Sip(sip) => sip.scheme(),
            Uri::Tel(_) => "tel",
            Uri::Generic(g) => g.scheme(),
        }
    }

    pub fn is_sip_uri(&self) -> bool {
        matches!(self, Uri::Sip(_))
    }

    pub fn as_sip(&self) -> Option<&SipUri> {
        match self {
            Uri::Sip(sip) => Some(sip),
            _ => None,
        }
    }

    pub fn as_sip_mut(&mut self) -> Option<&mut SipUri> {
        match self {
            Uri::Sip(sip) => Some(sip),
            _ => None,
        }
    }

    pub fn as_tel(&self) -> Option<&TelUri> {
        match self {
            Uri::Tel(tel) => Some(tel),
            _ => None,
        }
    }

    /// True when the text form contains characters that force angle brackets
    /// in an address (`,`, `;` or `?`).
    pub(crate) fn needs_brackets(&self) -> bool {
        self.to_string().contains([',', ';', '?'])
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uri::Sip(sip) => write!(f, "{}", sip),
            Uri::Tel(tel) => write!(f, "{}", tel),
            Uri::Generic(g) => write!(f, "{}", g),
        }
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_all(s.trim(), parser::uri::uri)
            .map_err(|e| Error::InvalidUri(format!("'{}': {}", s, e)))
    }
}

impl From<SipUri> for Uri {
    fn from(sip: SipUri) -> Self {
        Uri::Sip(sip)
    }
}

impl From<TelUri> for Uri {
    fn from(tel: TelUri) -> Self {
        Uri::Tel(tel)
    }
}

impl From<GenericUri> for Uri {
    fn from(g: GenericUri) -> Self {
        Uri::Generic(g)
    }
}

impl Matches for Uri {
    /// SIP URIs match when scheme, user and host agree, the template's port
    /// (if any) agrees and the template's parameters are present here.
    fn matches(&self, template: &Self) -> bool {
        match (self, template) {
            (Uri::Sip(mine), Uri::Sip(t)) => {
                mine.secure == t.secure
                    && (t.user.is_none() || mine.user == t.user)
                    && mine.host() == t.host()
                    && (t.port().is_none() || mine.port() == t.port())
                    && mine.params.matches(&t.params)
                    && mine.headers.matches(&t.headers)
            }
            (Uri::Tel(mine), Uri::Tel(t)) => {
                mine.global == t.global && mine.number == t.number && mine.params.matches(&t.params)
            }
            (a, b) => a == b,
        }
    }
}

impl Merge for Uri {
    fn merge(&mut self, other: &Self) {
        match (self, other) {
            (Uri::Sip(mine), Uri::Sip(o)) => {
                if o.user.is_some() {
                    mine.user = o.user.clone();
                    mine.password = o.password.clone();
                }
                mine.host_port.set_host(o.host().clone());
                if let Some(port) = o.port() {
                    let _ = mine.host_port.set_port(port);
                }
                mine.secure = o.secure;
                mine.params.merge(&o.params);
                mine.headers.merge(&o.headers);
            }
            (Uri::Tel(mine), Uri::Tel(o)) => {
                mine.number = o.number.clone();
                mine.global = o.global;
                mine.params.merge(&o.params);
            }
            (mine, o) => *mine = o.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sip_uri_round_trip() {
        for s in [
            "sip:alice@atlanta.com",
            "sip:alice:secretword@atlanta.com;transport=tcp",
            "sips:alice@atlanta.com?subject=project&priority=urgent",
            "sip:+1-212-555-1212:1234@gateway.com;user=phone",
            "sip:alice@192.0.2.4",
            "sip:atlanta.com;method=REGISTER?to=alice%40atlanta.com",
            "sip:alice;day=tuesday@atlanta.com",
            "sip:[2001:db8::10]:5070;lr",
        ] {
            let uri = Uri::from_str(s).unwrap();
            assert_eq!(uri.to_string(), s, "display of {}", s);
            assert_eq!(Uri::from_str(&uri.to_string()).unwrap(), uri);
        }
    }

    #[test]
    fn test_user_escaping() {
        let mut sip = SipUri::new(Host::domain("example.com"));
        sip.set_user("alice smith").unwrap();
        assert_eq!(sip.to_string(), "sip:alice%20smith@example.com");
        let parsed = SipUri::from_str("sip:alice%20smith@example.com").unwrap();
        assert_eq!(parsed.user(), Some("alice smith"));
        assert_eq!(parsed, sip);
    }

    #[test]
    fn test_sip_uri_accessors() {
        let mut sip = SipUri::new(Host::domain("biloxi.com")).with_user("bob");
        sip.set_transport("udp").unwrap();
        sip.set_method(Method::Register);
        sip.set_ttl(15);
        sip.set_maddr(Host::Ipv4("239.255.255.1".parse().unwrap())).unwrap();
        sip.set_lr();
        assert_eq!(sip.transport(), Some("udp"));
        assert_eq!(sip.method(), Some(Method::Register));
        assert_eq!(sip.ttl(), Some(15));
        assert_eq!(sip.maddr(), Some("239.255.255.1"));
        assert!(sip.has_lr());
        assert!(sip.remove_parameter("ttl"));
        assert_eq!(sip.ttl(), None);
        sip.clear_params();
        assert!(sip.params().is_empty());
        assert!(sip.set_transport("").is_err());
        assert!(sip.set_port(0).is_err());
    }

    #[test]
    fn test_password_requires_user() {
        let mut sip = SipUri::new(Host::domain("example.com"));
        assert!(sip.set_password("secret").is_err());
        sip.set_user("alice").unwrap();
        sip.set_password("secret").unwrap();
        assert_eq!(sip.to_string(), "sip:alice:secret@example.com");
    }

    #[test]
    fn test_tel_uri() {
        let uri = Uri::from_str("tel:+1-201-555-0123;isub=1411").unwrap();
        let tel = uri.as_tel().unwrap();
        assert!(tel.is_global());
        assert_eq!(tel.number(), "1-201-555-0123");
        assert_eq!(tel.isdn_subaddress(), Some("1411"));
        assert_eq!(uri.to_string(), "tel:+1-201-555-0123;isub=1411");
        assert_eq!(uri.scheme(), "tel");

        let mut local = TelUri::new("7042", false).unwrap();
        local.set_phone_context("example.com").unwrap();
        assert_eq!(local.to_string(), "tel:7042;phone-context=example.com");
        assert!(TelUri::new("", true).is_err());
        assert!(TelUri::new("7042;evil=1", false).is_err());
        assert!(local.set_post_dial("pp 22").is_err());
        assert!(local.set_isdn_subaddress("1411\r\n").is_err());
        local.set_isdn_subaddress("1411").unwrap();
        assert_eq!(Uri::from_str(&local.to_string()).unwrap(), Uri::Tel(local));
    }

    #[test]
    fn test_parameter_setters_check_paramchars() {
        let mut sip = SipUri::new(Host::domain("biloxi.com")).with_user("bob");
        let before = sip.clone();
        assert!(sip.set_parameter("x", "a b;evil=1").is_err());
        assert!(sip.set_parameter("x", "a?b").is_err());
        assert!(sip.set_parameter("x", "").is_err());
        assert!(sip.set_parameter("x y", "1").is_err());
        assert!(sip.set_flag_parameter("lr;evil").is_err());
        assert!(sip.set_user_param("phone\r\n").is_err());
        assert!(sip.set_maddr(Host::domain("evil host")).is_err());
        assert_eq!(sip, before);

        sip.set_parameter("x", "a%20b").unwrap();
        sip.set_parameter("maddr", "[2001:db8::1]").unwrap();
        sip.set_user_param("phone").unwrap();
        sip.set_flag_parameter("ob").unwrap();
        assert_eq!(
            sip.to_string(),
            "sip:bob@biloxi.com;x=a%20b;maddr=[2001:db8::1];user=phone;ob"
        );
        assert_eq!(SipUri::from_str(&sip.to_string()).unwrap(), sip);
    }

    #[test]
    fn test_set_header_escapes() {
        let mut sip = SipUri::new(Host::domain("biloxi.com"));
        sip.set_header("subject", "lunch & coffee").unwrap();
        sip.set_header("x", "a;b=c\r\n").unwrap();
        assert_eq!(sip.header("subject"), Some("lunch%20%26%20coffee"));
        assert_eq!(
            sip.to_string(),
            "sip:biloxi.com?subject=lunch%20%26%20coffee&x=a%3Bb%3Dc%0D%0A"
        );
        assert_eq!(SipUri::from_str(&sip.to_string()).unwrap(), sip);
        assert!(sip.set_header("", "x").is_err());
    }

    #[test]
    fn test_generic_uri() {
        let uri = Uri::from_str("http://www.example.com/alice/photo.jpg").unwrap();
        assert_eq!(uri.scheme(), "http");
        assert!(!uri.is_sip_uri());
        assert_eq!(uri.to_string(), "http://www.example.com/alice/photo.jpg");
        assert!(GenericUri::new("1http", "x").is_err());
    }

    #[test]
    fn test_invalid_uris() {
        assert!(Uri::from_str("").is_err());
        assert!(Uri::from_str("sip:").is_err());
        assert!(Uri::from_str("not a uri").is_err());
    }

    #[test]
    fn test_uri_matching() {
        let uri = Uri::from_str("sip:alice@atlanta.com:5060;transport=tcp").unwrap();
        assert!(uri.matches(&Uri::from_str("sip:alice@ATLANTA.com").unwrap()));
        assert!(uri.matches(&Uri::from_str("sip:atlanta.com;transport=tcp").unwrap()));
        assert!(!uri.matches(&Uri::from_str("sip:bob@atlanta.com").unwrap()));
        assert!(!uri.matches(&Uri::from_str("sips:alice@atlanta.com").unwrap()));
    }
}
