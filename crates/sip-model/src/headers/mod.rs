//! # SIP headers
//!
//! One typed struct per header, the [`HeaderName`] registry, the [`Header`]
//! union, [`SipHeaderList`] for repeated headers and the [`Matches`] /
//! [`Merge`] template traits.
//!
//! Every typed header parses with `FromStr` and encodes with `Display`
//! (value only) or [`TypedHeaderTrait::encode`] (complete line):
//!
//! ```rust
//! use sip_model::headers::{TypedHeaderTrait, Via};
//!
//! let via: Via = "SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds".parse().unwrap();
//! assert_eq!(via.encode(), "Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds\r\n");
//! ```
//!
//! The From header is exported as [`From`]; import it under another name or
//! through its module (`headers::address::From`) where the conversion trait
//! is also needed.

pub mod accept;
pub mod address;
pub mod auth;
pub mod call_id;
pub mod content;
pub mod cseq;
pub mod date;
pub mod event;
pub mod extension;
pub mod header;
pub mod header_name;
pub mod info;
pub mod list;
pub mod matching;
pub mod numeric;
pub mod option_tags;
pub mod product;
pub mod reason;
pub mod retry_after;
pub mod text;
pub mod timestamp;
pub mod via;
pub mod warning;

pub use accept::{Accept, AcceptEncoding, AcceptLanguage};
pub use address::{
    generate_tag, Contact, From, Path, RecordRoute, ReferTo, ReferredBy, ReplyTo, Route, ServiceRoute, To,
};
pub use auth::{AuthenticationInfo, Authorization, ProxyAuthenticate, ProxyAuthorization, WwwAuthenticate};
pub use call_id::{CallId, InReplyTo};
pub use content::{ContentDisposition, ContentEncoding, ContentLanguage, ContentType, Handling, MimeVersion};
pub use cseq::{CSeq, RAck, RSeq};
pub use date::Date;
pub use event::{Event, SubState, SubscriptionState};
pub use extension::ExtensionHeader;
pub use header::{Header, TypedHeaderTrait};
pub use header_name::HeaderName;
pub use info::{AlertInfo, CallInfo, ErrorInfo, Purpose};
pub use list::SipHeaderList;
pub use matching::{Matches, Merge};
pub use numeric::{ContentLength, Expires, MaxForwards, MinExpires, MinSe, Refresher, SessionExpires};
pub use option_tags::{Allow, AllowEvents, ProxyRequire, Require, Supported, Unsupported};
pub use product::{Product, ProductInfo, Server, UserAgent};
pub use reason::Reason;
pub use retry_after::RetryAfter;
pub use text::{Organization, Priority, Subject};
pub use timestamp::Timestamp;
pub use via::Via;
pub use warning::Warning;
