//! # Headers
//!
//! [`TypedHeaderTrait`] is the contract every typed header implements, and
//! [`Header`] is the union of all of them plus [`ExtensionHeader`] for names
//! this crate does not model.
//!
//! ```rust
//! use sip_model::headers::{CSeq, Header, HeaderName, TypedHeaderTrait};
//! use sip_model::types::Method;
//!
//! let cseq = CSeq::new(4711, Method::Invite).unwrap();
//! assert_eq!(cseq.encode(), "CSeq: 4711 INVITE\r\n");
//!
//! let header = cseq.to_header();
//! assert_eq!(header.name(), HeaderName::CSeq);
//! assert_eq!(CSeq::from_header(&header).unwrap(), cseq);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EncodeOptions;
use crate::error::Result;
use crate::headers::header_name::HeaderName;
use crate::headers::*;
// The explicit import wins over the glob, so `From` below is the conversion trait
use std::convert::From;

/// Common behaviour of all typed SIP headers.
pub trait TypedHeaderTrait: Sized + Clone + fmt::Display {
    /// The name of this header type.
    fn header_name() -> HeaderName;

    /// Wraps a copy of this header in the [`Header`] union.
    fn to_header(&self) -> Header;

    /// Extracts this header type from a [`Header`], parsing the raw value of
    /// an extension header with a matching name.
    fn from_header(header: &Header) -> Result<Self>;

    /// The header value in canonical wire form.
    fn encode_body(&self) -> String {
        self.to_string()
    }

    /// The complete header line, `Name: value\r\n`.
    fn encode(&self) -> String {
        format!("{}: {}\r\n", Self::header_name(), self.encode_body())
    }
}

macro_rules! define_headers {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        /// Any SIP header: one variant per typed header plus raw extension headers.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub enum Header {
            $($variant($ty),)+
            Extension(ExtensionHeader),
        }

        impl Header {
            pub fn name(&self) -> HeaderName {
                match self {
                    $(Header::$variant(_) => HeaderName::$variant,)+
                    Header::Extension(ext) => ext.header_name(),
                }
            }

            /// The header value in canonical wire form.
            pub fn encode_body(&self) -> String {
                match self {
                    $(Header::$variant(h) => h.to_string(),)+
                    Header::Extension(ext) => ext.value().to_string(),
                }
            }

            /// Parses a single header value of the given type. Unknown names
            /// become extension headers.
            pub(crate) fn parse_value(name: &HeaderName, value: &str) -> Result<Header> {
                match name {
                    $(HeaderName::$variant => value.trim().parse::<$ty>().map(Header::$variant),)+
                    HeaderName::Other(raw) => ExtensionHeader::new(raw.clone(), value).map(Header::Extension),
                }
            }
        }

        $(
            impl From<$ty> for Header {
                fn from(h: $ty) -> Self {
                    Header::$variant(h)
                }
            }
        )+
    };
}

define_headers! {
    Accept(Accept),
    AcceptEncoding(AcceptEncoding),
    AcceptLanguage(AcceptLanguage),
    AlertInfo(AlertInfo),
    Allow(Allow),
    AllowEvents(AllowEvents),
    AuthenticationInfo(AuthenticationInfo),
    Authorization(Authorization),
    CallId(CallId),
    CallInfo(CallInfo),
    Contact(Contact),
    ContentDisposition(ContentDisposition),
    ContentEncoding(ContentEncoding),
    ContentLanguage(ContentLanguage),
    ContentLength(ContentLength),
    ContentType(ContentType),
    CSeq(CSeq),
    Date(Date),
    ErrorInfo(ErrorInfo),
    Event(Event),
    Expires(Expires),
    From(address::From),
    InReplyTo(InReplyTo),
    MaxForwards(MaxForwards),
    MimeVersion(MimeVersion),
    MinExpires(MinExpires),
    MinSe(MinSe),
    Organization(Organization),
    Path(Path),
    Priority(Priority),
    ProxyAuthenticate(ProxyAuthenticate),
    ProxyAuthorization(ProxyAuthorization),
    ProxyRequire(ProxyRequire),
    RAck(RAck),
    Reason(Reason),
    RecordRoute(RecordRoute),
    ReferredBy(ReferredBy),
    ReferTo(ReferTo),
    ReplyTo(ReplyTo),
    Require(Require),
    RetryAfter(RetryAfter),
    Route(Route),
    RSeq(RSeq),
    Server(Server),
    ServiceRoute(ServiceRoute),
    SessionExpires(SessionExpires),
    Subject(Subject),
    SubscriptionState(SubscriptionState),
    Supported(Supported),
    Timestamp(Timestamp),
    To(To),
    Unsupported(Unsupported),
    UserAgent(UserAgent),
    Via(Via),
    Warning(Warning),
    WwwAuthenticate(WwwAuthenticate),
}

impl Header {
    /// The complete header line, `Name: value\r\n`.
    pub fn encode(&self) -> String {
        self.encode_with(&EncodeOptions::default())
    }

    /// The complete header line, using the compact name when asked to.
    pub fn encode_with(&self, options: &EncodeOptions) -> String {
        let name = self.name();
        let name_str = match name.compact_form() {
            Some(compact) if options.compact_names => compact,
            _ => name.as_str(),
        };
        format!("{}: {}\r\n", name_str, self.encode_body())
    }

    /// Converts to a typed header.
    pub fn typed<T: TypedHeaderTrait>(&self) -> Result<T> {
        T::from_header(self)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_body())
    }
}

impl From<ExtensionHeader> for Header {
    fn from(h: ExtensionHeader) -> Self {
        Header::Extension(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Method;

    #[test]
    fn test_encode_with_compact_names() {
        let header = Header::from(CallId::new("a84b4c76e66710@pc33.atlanta.com").unwrap());
        assert_eq!(header.encode(), "Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n");
        let compact = EncodeOptions {
            compact_names: true,
            ..Default::default()
        };
        assert_eq!(header.encode_with(&compact), "i: a84b4c76e66710@pc33.atlanta.com\r\n");

        // No compact form: full name is used
        let cseq = Header::from(CSeq::new(1, Method::Invite).unwrap());
        assert_eq!(cseq.encode_with(&compact), "CSeq: 1 INVITE\r\n");
    }

    #[test]
    fn test_from_header_wrong_type() {
        let header = Header::from(MaxForwards::new(70).unwrap());
        assert!(CSeq::from_header(&header).is_err());
        assert_eq!(header.typed::<MaxForwards>().unwrap().value(), 70);
    }

    #[test]
    fn test_from_header_reparses_extension_with_known_name() {
        let raw = Header::Extension(ExtensionHeader::new("Max-Forwards", "69").unwrap());
        assert_eq!(MaxForwards::from_header(&raw).unwrap().value(), 69);
    }

    #[test]
    fn test_parse_value_dispatch() {
        let h = Header::parse_value(&HeaderName::Via, "SIP/2.0/TCP host;branch=z9hG4bKx").unwrap();
        assert!(matches!(h, Header::Via(_)));
        let h = Header::parse_value(&HeaderName::Other("X-Custom".into()), "anything goes").unwrap();
        assert_eq!(h.encode(), "X-Custom: anything goes\r\n");
    }
}
