use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::token::is_token;

/// SIP header names
///
/// One variant per header this crate models, plus `Other` for everything
/// else. Header names are case-insensitive in SIP; parsing accepts any case
/// and the compact forms of RFC 3261 §7.3.3, and `as_str` returns the
/// canonical spelling.
///
/// # Examples
///
/// ```rust
/// use sip_model::headers::HeaderName;
/// use std::str::FromStr;
///
/// assert_eq!(HeaderName::from_str("f").unwrap(), HeaderName::From);
/// assert_eq!(HeaderName::from_str("call-id").unwrap().as_str(), "Call-ID");
/// assert_eq!(HeaderName::Via.compact_form(), Some("v"));
/// assert_eq!(
///     HeaderName::from_str("X-Custom").unwrap(),
///     HeaderName::Other("X-Custom".to_string())
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HeaderName {
    Accept,
    AcceptEncoding,
    AcceptLanguage,
    AlertInfo,
    Allow,
    AllowEvents,
    AuthenticationInfo,
    Authorization,
    CallId,
    CallInfo,
    Contact,
    ContentDisposition,
    ContentEncoding,
    ContentLanguage,
    ContentLength,
    ContentType,
    CSeq,
    Date,
    ErrorInfo,
    Event,
    Expires,
    From,
    InReplyTo,
    MaxForwards,
    MimeVersion,
    MinExpires,
    MinSe,
    Organization,
    Path,
    Priority,
    ProxyAuthenticate,
    ProxyAuthorization,
    ProxyRequire,
    RAck,
    Reason,
    RecordRoute,
    ReferredBy,
    ReferTo,
    ReplyTo,
    Require,
    RetryAfter,
    Route,
    RSeq,
    Server,
    ServiceRoute,
    SessionExpires,
    Subject,
    SubscriptionState,
    Supported,
    Timestamp,
    To,
    Unsupported,
    UserAgent,
    Via,
    Warning,
    WwwAuthenticate,
    /// Any header this crate does not model, with the spelling it was given.
    Other(String),
}

impl HeaderName {
    /// Canonical spelling.
    pub fn as_str(&self) -> &str {
        match self {
            HeaderName::Accept => "Accept",
            HeaderName::AcceptEncoding => "Accept-Encoding",
            HeaderName::AcceptLanguage => "Accept-Language",
            HeaderName::AlertInfo => "Alert-Info",
            HeaderName::Allow => "Allow",
            HeaderName::AllowEvents => "Allow-Events",
            HeaderName::AuthenticationInfo => "Authentication-Info",
            HeaderName::Authorization => "Authorization",
            HeaderName::CallId => "Call-ID",
            HeaderName::CallInfo => "Call-Info",
            HeaderName::Contact => "Contact",
            HeaderName::ContentDisposition => "Content-Disposition",
            HeaderName::ContentEncoding => "Content-Encoding",
            HeaderName::ContentLanguage => "Content-Language",
            HeaderName::ContentLength => "Content-Length",
            HeaderName::ContentType => "Content-Type",
            HeaderName::CSeq => "CSeq",
            HeaderName::Date => "Date",
            HeaderName::ErrorInfo => "Error-Info",
            HeaderName::Event => "Event",
            HeaderName::Expires => "Expires",
            HeaderName::From => "From",
            HeaderName::InReplyTo => "In-Reply-To",
            HeaderName::MaxForwards => "Max-Forwards",
            HeaderName::MimeVersion => "MIME-Version",
            HeaderName::MinExpires => "Min-Expires",
            HeaderName::MinSe => "Min-SE",
            HeaderName::Organization => "Organization",
            HeaderName::Path => "Path",
            HeaderName::Priority => "Priority",
            HeaderName::ProxyAuthenticate => "Proxy-Authenticate",
            HeaderName::ProxyAuthorization => "Proxy-Authorization",
            HeaderName::ProxyRequire => "Proxy-Require",
            HeaderName::RAck => "RAck",
            HeaderName::Reason => "Reason",
            HeaderName::RecordRoute => "Record-Route",
            HeaderName::ReferredBy => "Referred-By",
            HeaderName::ReferTo => "Refer-To",
            HeaderName::ReplyTo => "Reply-To",
            HeaderName::Require => "Require",
            HeaderName::RetryAfter => "Retry-After",
            HeaderName::Route => "Route",
            HeaderName::RSeq => "RSeq",
            HeaderName::Server => "Server",
            HeaderName::ServiceRoute => "Service-Route",
            HeaderName::SessionExpires => "Session-Expires",
            HeaderName::Subject => "Subject",
            HeaderName::SubscriptionState => "Subscription-State",
            HeaderName::Supported => "Supported",
            HeaderName::Timestamp => "Timestamp",
            HeaderName::To => "To",
            HeaderName::Unsupported => "Unsupported",
            HeaderName::UserAgent => "User-Agent",
            HeaderName::Via => "Via",
            HeaderName::Warning => "Warning",
            HeaderName::WwwAuthenticate => "WWW-Authenticate",
            HeaderName::Other(name) => name.as_str(),
        }
    }

    /// The RFC 3261 §7.3.3 compact form, where one exists.
    pub fn compact_form(&self) -> Option<&'static str> {
        match self {
            HeaderName::CallId => Some("i"),
            HeaderName::Contact => Some("m"),
            HeaderName::ContentLength => Some("l"),
            HeaderName::ContentType => Some("c"),
            HeaderName::From => Some("f"),
            HeaderName::To => Some("t"),
            HeaderName::Via => Some("v"),
            HeaderName::Supported => Some("k"),
            HeaderName::Subject => Some("s"),
            HeaderName::ContentEncoding => Some("e"),
            HeaderName::ReferTo => Some("r"),
            HeaderName::ReferredBy => Some("b"),
            HeaderName::Event => Some("o"),
            HeaderName::AllowEvents => Some("u"),
            HeaderName::SessionExpires => Some("x"),
            _ => None,
        }
    }

    /// Headers whose grammar allows several comma-separated values in one line.
    pub fn is_list_header(&self) -> bool {
        matches!(
            self,
            HeaderName::Accept
                | HeaderName::AcceptEncoding
                | HeaderName::AcceptLanguage
                | HeaderName::AlertInfo
                | HeaderName::Allow
                | HeaderName::AllowEvents
                | HeaderName::Authorization
                | HeaderName::CallInfo
                | HeaderName::Contact
                | HeaderName::ContentEncoding
                | HeaderName::ContentLanguage
                | HeaderName::ErrorInfo
                | HeaderName::InReplyTo
                | HeaderName::Path
                | HeaderName::ProxyAuthenticate
                | HeaderName::ProxyAuthorization
                | HeaderName::ProxyRequire
                | HeaderName::Reason
                | HeaderName::RecordRoute
                | HeaderName::Require
                | HeaderName::Route
                | HeaderName::ServiceRoute
                | HeaderName::Supported
                | HeaderName::Unsupported
                | HeaderName::Via
                | HeaderName::Warning
                | HeaderName::WwwAuthenticate
        )
    }

    /// Headers that may repeat but must never be combined with commas
    /// (RFC 3261 §7.3.1), plus every unknown header.
    pub fn must_encode_separately(&self) -> bool {
        matches!(
            self,
            HeaderName::WwwAuthenticate
                | HeaderName::ProxyAuthenticate
                | HeaderName::Authorization
                | HeaderName::ProxyAuthorization
                | HeaderName::Other(_)
        )
    }

    /// True when one line may carry several comma-separated values.
    pub fn is_comma_separated(&self) -> bool {
        self.is_list_header() && !self.must_encode_separately()
    }
}

impl PartialEq for HeaderName {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HeaderName::Other(a), HeaderName::Other(b)) => a.eq_ignore_ascii_case(b),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

impl Eq for HeaderName {}

impl std::hash::Hash for HeaderName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let HeaderName::Other(name) = self {
            name.to_ascii_lowercase().hash(state);
        }
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if !is_token(s) {
            return Err(Error::ParseError(format!("Invalid header name: '{}'", s)));
        }

        let lower = s.to_ascii_lowercase();
        Ok(match lower.as_str() {
            "accept" => HeaderName::Accept,
            "accept-encoding" => HeaderName::AcceptEncoding,
            "accept-language" => HeaderName::AcceptLanguage,
            "alert-info" => HeaderName::AlertInfo,
            "allow" => HeaderName::Allow,
            "allow-events" | "u" => HeaderName::AllowEvents,
            "authentication-info" => HeaderName::AuthenticationInfo,
            "authorization" => HeaderName::Authorization,
            "call-id" | "i" => HeaderName::CallId,
            "call-info" => HeaderName::CallInfo,
            "contact" | "m" => HeaderName::Contact,
            "content-disposition" => HeaderName::ContentDisposition,
            "content-encoding" | "e" => HeaderName::ContentEncoding,
            "content-language" => HeaderName::ContentLanguage,
            "content-length" | "l" => HeaderName::ContentLength,
            "content-type" | "c" => HeaderName::ContentType,
            "cseq" => HeaderName::CSeq,
            "date" => HeaderName::Date,
            "error-info" => HeaderName::ErrorInfo,
            "event" | "o" => HeaderName::Event,
            "expires" => HeaderName::Expires,
            "from" | "f" => HeaderName::From,
            "in-reply-to" => HeaderName::InReplyTo,
            "max-forwards" => HeaderName::MaxForwards,
            "mime-version" => HeaderName::MimeVersion,
            "min-expires" => HeaderName::MinExpires,
            "min-se" => HeaderName::MinSe,
            "organization" => HeaderName::Organization,
            "path" => HeaderName::Path,
            "priority" => HeaderName::Priority,
            "proxy-authenticate" => HeaderName::ProxyAuthenticate,
            "proxy-authorization" => HeaderName::ProxyAuthorization,
            "proxy-require" => HeaderName::ProxyRequire,
            "rack" => HeaderName::RAck,
            "reason" => HeaderName::Reason,
            "record-route" => HeaderName::RecordRoute,
            "referred-by" | "b" => HeaderName::ReferredBy,
            "refer-to" | "r" => HeaderName::ReferTo,
            "reply-to" => HeaderName::ReplyTo,
            "require" => HeaderName::Require,
            "retry-after" => HeaderName::RetryAfter,
            "route" => HeaderName::Route,
            "rseq" => HeaderName::RSeq,
            "server" => HeaderName::Server,
            "service-route" => HeaderName::ServiceRoute,
            "session-expires" | "x" => HeaderName::SessionExpires,
            "subject" | "s" => HeaderName::Subject,
            "subscription-state" => HeaderName::SubscriptionState,
            "supported" | "k" => HeaderName::Supported,
            "timestamp" => HeaderName::Timestamp,
            "to" | "t" => HeaderName::To,
            "unsupported" => HeaderName::Unsupported,
            "user-agent" => HeaderName::UserAgent,
            "via" | "v" => HeaderName::Via,
            "warning" => HeaderName::Warning,
            "www-authenticate" => HeaderName::WwwAuthenticate,
            // Request-Disposition (RFC 3841) is not modelled; keep its full name
            "d" => HeaderName::Other("Request-Disposition".to_string()),
            _ => HeaderName::Other(s.to_string()),
        })
    }
}
