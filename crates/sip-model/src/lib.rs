//! # sip-model
//!
//! A typed object model for SIP (RFC 3261) headers: parse header text into
//! strongly typed values, inspect and modify them through validating
//! setters, and encode them back to canonical wire form.
//!
//! ```rust
//! use sip_model::prelude::*;
//!
//! let headers = parse_header_block(
//!     "Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds\r\n\
//!      Max-Forwards: 70\r\n\
//!      CSeq: 314159 INVITE\r\n",
//! )
//! .unwrap();
//!
//! let cseq: CSeq = headers[2].typed().unwrap();
//! assert_eq!(cseq.method(), &Method::Invite);
//!
//! let mut max_forwards: MaxForwards = headers[1].typed().unwrap();
//! max_forwards.decrement().unwrap();
//! assert_eq!(max_forwards.encode(), "Max-Forwards: 69\r\n");
//! ```
//!
//! ## Modules
//!
//! - [`types`]: URIs, addresses, hosts, parameters and other shared values
//! - [`headers`]: the typed headers, [`headers::Header`] and [`headers::SipHeaderList`]
//! - [`parser`]: nom parsers and the header line/block entry points
//! - [`config`]: parse and encode options
//! - [`error`]: the crate error type

#[macro_use]
mod macros;

pub mod config;
pub mod error;
pub mod headers;
pub mod parser;
pub mod types;

pub use error::{Error, Result};

/// The types most code needs. The From header is left out so the glob does
/// not shadow the conversion trait; use `headers::From`.
pub mod prelude {
    pub use crate::config::{EncodeOptions, ParseOptions};
    pub use crate::error::{Error, Result};
    pub use crate::headers::{
        Accept, AcceptEncoding, AcceptLanguage, AlertInfo, Allow, AllowEvents, AuthenticationInfo,
        Authorization, CSeq, CallId, CallInfo, Contact, ContentDisposition, ContentEncoding,
        ContentLanguage, ContentLength, ContentType, Date, ErrorInfo, Event, Expires, ExtensionHeader,
        Header, HeaderName, InReplyTo, Matches, MaxForwards, Merge, MimeVersion, MinExpires, MinSe,
        Organization, Path, Priority, ProxyAuthenticate, ProxyAuthorization, ProxyRequire, RAck, RSeq,
        Reason, RecordRoute, ReferTo, ReferredBy, ReplyTo, Require, RetryAfter, Route, Server,
        ServiceRoute, SessionExpires, SipHeaderList, Subject, SubscriptionState, Supported, Timestamp,
        To, TypedHeaderTrait, Unsupported, UserAgent, Via, Warning, WwwAuthenticate,
    };
    pub use crate::parser::{parse_header, parse_header_block, parse_header_line};
    pub use crate::types::{Address, GenericValue, Host, HostPort, MediaRange, Method, NameValueList, Protocol, Uri};
}
